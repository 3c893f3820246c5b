//! User module

mod api;
mod commands;
mod models;

pub use commands::run_users_command;
pub use models::{RoleAssignment, UserInfo, UserRecord, UserReport};
