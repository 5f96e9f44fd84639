// LeadDesk - ui/mod.rs
//
// UI layer: presentation only.
// Dependencies: app (state), core (read-only models and derivations), egui.
// Must NOT depend on: platform, direct I/O.
// Contact links are queued on the state; the binary launches them.

pub mod panels;
pub mod theme;
