//! Share module

mod api;
mod commands;
mod models;
mod ops;

pub use commands::run_shares_command;
pub use models::{SharePayload, ShareRecord, ShareTarget};
