//! Share operations

use log::{info, warn};
use serde_json::Value;

use crate::dwc::dispatcher::Dispatcher;
use crate::dwc::external::ExternalCommandAdapter;
use crate::dwc::resolver::NamePatterns;
use crate::dwc::traits::TenantApi;
use crate::error::{DwcError, Result};

use super::models::{SharePayload, ShareRecord};

impl<A: TenantApi, C: ExternalCommandAdapter> Dispatcher<A, C> {
    /// Share an object of `source` with every workspace matching `targets`
    ///
    /// The object itself is not checked; the tenant rejects unknown objects.
    pub async fn create_share(
        &mut self,
        source: &str,
        object_name: &str,
        targets: &NamePatterns,
        wildcard: bool,
    ) -> Result<SharePayload> {
        if targets.is_all() {
            return Err(DwcError::InvalidInput("no share targets given".to_string()));
        }

        let source_space = self
            .cache
            .find_workspace(&mut self.api, source)
            .await?
            .ok_or_else(|| DwcError::NotFound(format!("source workspace '{}'", source)))?;

        let mut names: Vec<String> = Vec::new();
        for target in self.resolve_workspaces(targets, wildcard).await? {
            if target.name != source_space.name && !names.contains(&target.name) {
                names.push(target.name);
            }
        }
        if names.is_empty() {
            return Err(DwcError::NotFound("no matching target workspaces".to_string()));
        }

        let payload = SharePayload::new(&source_space.name, object_name, names);
        self.api.create_share(&payload).await?;
        info!(
            "Shared {}.{} with {}",
            payload.space_name,
            object_name,
            payload.share_space_names.join(", ")
        );
        Ok(payload)
    }

    /// Shared data-builder objects of the matching workspaces and their targets
    pub async fn list_shares(
        &mut self,
        spaces: &NamePatterns,
        wildcard: bool,
    ) -> Result<Vec<ShareRecord>> {
        let spaces = self.resolve_workspaces(spaces, wildcard).await?;
        if spaces.is_empty() {
            warn!("No matching workspaces found");
        }

        let mut records = Vec::new();
        for space in spaces {
            let objects = self
                .api
                .fetch_builder_objects(Some(&space.name), true)
                .await?;
            let object_names: Vec<String> = objects
                .iter()
                .filter_map(|o| o.get("name").and_then(Value::as_str))
                .map(str::to_string)
                .collect();
            if object_names.is_empty() {
                continue;
            }

            let shares = self.api.fetch_shares(&space.name, &object_names).await?;
            for (object_name, targets) in shares {
                records.extend(targets.into_iter().map(|t| ShareRecord {
                    space_name: space.name.clone(),
                    object_name: object_name.clone(),
                    target_space: t.name,
                }));
            }
        }
        Ok(records)
    }
}
