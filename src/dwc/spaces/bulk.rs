//! Bulk workspace create/delete from CSV files
//!
//! Create rows are `name,label,disk,memory,template,force,user1,user2,...`;
//! delete rows only use the first column. Blank lines and lines starting
//! with `#` are ignored after the header lines are skipped.

use log::{error, info, warn};
use serde_json::Value;
use std::path::Path;

use crate::dwc::dispatcher::Dispatcher;
use crate::dwc::external::ExternalCommandAdapter;
use crate::dwc::resolver::NamePatterns;
use crate::dwc::traits::TenantApi;
use crate::error::{DwcError, Result};

use super::ops::CreateSpaceRequest;

/// Outcome of a bulk run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkSummary {
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
}

/// Data lines of a bulk file
pub fn read_rows(path: &Path, skip: usize) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        DwcError::InvalidInput(format!("cannot read bulk file '{}': {}", path.display(), e))
    })?;

    Ok(content
        .lines()
        .skip(skip)
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

fn optional(column: Option<&str>) -> Option<&str> {
    column.map(str::trim).filter(|c| !c.is_empty())
}

fn quota(column: Option<&str>, what: &str, name: &str) -> Result<Option<f64>> {
    optional(column)
        .map(|value| {
            value.parse::<f64>().map_err(|_| {
                DwcError::InvalidInput(format!("{} '{}' of {} is not a number", what, value, name))
            })
        })
        .transpose()
}

/// Parse one create row; `force` and `template` given on the command line win
pub fn parse_create_row(
    line: &str,
    force: bool,
    template: Option<&str>,
) -> Result<CreateSpaceRequest> {
    let mut columns = line.split(',');

    let name = optional(columns.next())
        .ok_or_else(|| DwcError::InvalidInput(format!("row without workspace name: {}", line)))?
        .to_string();
    let label = optional(columns.next()).map(|l| Value::String(l.to_string()));
    let disk = quota(columns.next(), "disk", &name)?;
    let memory = quota(columns.next(), "memory", &name)?;
    let row_template = optional(columns.next());
    let row_force = optional(columns.next());
    let users = columns
        .filter_map(|u| optional(Some(u)))
        .map(str::to_string)
        .collect();

    let row_force = match row_force {
        None => false,
        Some(value) if value.eq_ignore_ascii_case("true") => true,
        Some(value) => {
            warn!("Workspace {}: force value '{}' is not 'true' - ignored", name, value);
            false
        }
    };

    Ok(CreateSpaceRequest {
        name,
        label,
        template: template.or(row_template).map(str::to_string),
        disk,
        memory,
        users,
        force: force || row_force,
    })
}

impl<A: TenantApi, C: ExternalCommandAdapter> Dispatcher<A, C> {
    /// Create every workspace listed in a bulk file; failures do not stop the batch
    pub async fn bulk_create(
        &mut self,
        path: &Path,
        skip: usize,
        force: bool,
        template: Option<&str>,
    ) -> Result<BulkSummary> {
        let mut summary = BulkSummary::default();

        for line in read_rows(path, skip)? {
            let request = match parse_create_row(&line, force, template) {
                Ok(request) => request,
                Err(e) => {
                    error!("Skipping row '{}': {}", line, e);
                    summary.failed.push(line);
                    continue;
                }
            };

            match self.create_space(&request).await {
                Ok(def) => summary.succeeded.push(def.identifier),
                Err(e) => {
                    error!("Workspace {} not created: {}", request.name, e);
                    summary.failed.push(request.name);
                }
            }
        }

        info!(
            "Bulk create: {} created, {} failed",
            summary.succeeded.len(),
            summary.failed.len()
        );
        Ok(summary)
    }

    /// Delete every workspace named in the first column of a bulk file
    pub async fn bulk_delete(&mut self, path: &Path, skip: usize) -> Result<BulkSummary> {
        let names: Vec<String> = read_rows(path, skip)?
            .iter()
            .filter_map(|line| optional(line.split(',').next()))
            .map(str::to_uppercase)
            .collect();

        if names.is_empty() {
            warn!("No workspaces listed in {}", path.display());
            return Ok(BulkSummary::default());
        }

        let deleted = self
            .delete_spaces(&NamePatterns::from(names.clone()), false)
            .await?;
        let failed = names.into_iter().filter(|n| !deleted.contains(n)).collect();

        Ok(BulkSummary {
            succeeded: deleted,
            failed,
        })
    }
}
