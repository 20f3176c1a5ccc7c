//! Form validation, account flows, and mock marketplace data for the Carebook app.

pub mod checklist;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod flows;
pub mod forms;
pub mod telemetry;
