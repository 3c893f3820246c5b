//! Workspace module

mod api;
pub mod bulk;
mod commands;
mod models;
mod ops;
pub mod validate;

pub use api::builder_objects_query;
pub use bulk::BulkSummary;
pub use commands::run_spaces_command;
pub use models::{
    MemberRow, SpaceDefinition, SpaceMember, WorkspaceDefinition, WorkspaceDetail,
    WorkspaceRecord,
};
pub use ops::{CreateSpaceRequest, MembershipChange};
pub use validate::{validate_space_id, validate_space_label};
