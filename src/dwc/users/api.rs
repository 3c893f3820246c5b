//! User API operations

use log::debug;

use crate::dwc::envelope::parse_list;
use crate::dwc::SessionContext;
use crate::error::Result;

use super::models::UserRecord;

impl SessionContext {
    /// Get all users of the tenant
    pub async fn list_users(&mut self) -> Result<Vec<UserRecord>> {
        let tenant_id = self.identity().await?.tenant_id()?;
        let body = self
            .get_json("users", &[("tenant_id", &tenant_id)])
            .await?;
        let users: Vec<UserRecord> = parse_list(body)?.into_records()?;
        debug!("Fetched {} users for tenant {}", users.len(), tenant_id);
        Ok(users)
    }
}
