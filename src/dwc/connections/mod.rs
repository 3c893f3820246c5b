//! Connection module

mod api;
mod commands;
mod models;
mod ops;

pub use commands::run_connections_command;
pub use models::{ConnectionDefinition, ConnectionRecord};
