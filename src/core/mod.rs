// LeadDesk - core/mod.rs
//
// Core business logic layer.
// Dependencies: util, serde, chrono, regex, and the csv/json writers for export.
// Must NOT depend on: ui, platform, app, or the filesystem.

pub mod analytics;
pub mod call_queue;
pub mod clock;
pub mod dataset;
pub mod export;
pub mod filter;
pub mod follow_up;
pub mod format;
pub mod model;
pub mod pipeline;
pub mod repository;
pub mod stats;
pub mod targets;
