// LeadDesk - app/mod.rs
//
// Application layer: orchestration, state management, dataset loading.
// Dependencies: core layer.
// Must NOT depend on: ui, platform specifics.

pub mod dataset_mgr;
pub mod report;
pub mod session;
pub mod state;
