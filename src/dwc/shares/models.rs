//! Share data models

use serde::{Deserialize, Serialize};

/// One object shared from a source workspace to a target workspace
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShareRecord {
    /// Source workspace
    pub space_name: String,
    pub object_name: String,
    pub target_space: String,
}

/// Target entry of the share list endpoint
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ShareTarget {
    pub name: String,
}

/// Share create request
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SharePayload {
    pub space_name: String,
    pub object_names: Vec<String>,
    pub share_space_names: Vec<String>,
    pub unshare_space_names: Vec<String>,
}

impl SharePayload {
    pub fn new(space_name: &str, object_name: &str, targets: Vec<String>) -> Self {
        Self {
            space_name: space_name.to_string(),
            object_names: vec![object_name.to_string()],
            share_space_names: targets,
            unshare_space_names: Vec::new(),
        }
    }
}
