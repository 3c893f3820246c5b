//! Tenant session and resource engine
//!
//! Logs in to a Data Warehouse Cloud tenant through its browser login flow,
//! keeps the authenticated session, caches the workspace and user
//! inventories and runs create/delete/list operations on workspaces,
//! members, connections and shares.

pub mod auth;
pub mod cache;
pub mod connections;
pub mod dispatcher;
mod envelope;
pub mod external;
pub mod resolver;
mod session;
pub mod shares;
pub mod spaces;
pub mod templates;
pub mod traits;
mod transport;
pub mod users;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{AuthClient, SamlAuthClient};
pub use cache::{ResourceCache, ResourceKind, SnapshotInfo};
pub use dispatcher::Dispatcher;
pub use external::{CommandOutput, ExternalCommandAdapter, ProcessAdapter};
pub use resolver::NamePatterns;
pub use session::SessionContext;
pub use traits::{TenantApi, TenantResource};
pub use transport::{Transport, TransportResponse};
