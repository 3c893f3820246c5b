//! URL template registry
//!
//! Maps logical operation names to endpoint templates with named
//! `{placeholder}` segments. Resolution substitutes every placeholder and
//! fails with a typed error when a value is missing, so a literal
//! `{placeholder}` never reaches the wire.

use std::collections::HashMap;

use crate::config::api;
use crate::error::{DwcError, Result};

/// Registry of endpoint templates for one tenant
#[derive(Debug, Clone)]
pub struct UrlRegistry {
    base_url: String,
    templates: HashMap<String, String>,
}

impl UrlRegistry {
    /// Create a registry with the static tenant templates
    pub fn new(base_url: &str) -> Self {
        let mut registry = Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            templates: HashMap::new(),
        };

        for (name, template) in [
            ("authenticate", api::AUTHENTICATE),
            ("logon", api::LOGON),
            ("spaces", api::SPACES),
            ("spaces_resources", api::SPACES_RESOURCES),
            ("space", api::SPACE),
            ("shares", api::SHARES),
            ("share_list", api::SHARE_LIST),
            ("connections", api::CONNECTIONS),
            ("connection", api::CONNECTION),
            ("connection_delete", api::CONNECTION_DELETE),
            ("remotetables", api::REMOTE_TABLES),
            ("businessbuilder", api::BUSINESS_BUILDER),
            ("users", api::USERS),
        ] {
            registry.register(name, template);
        }

        registry
    }

    /// Tenant URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Register (or replace) a template at runtime
    pub fn register(&mut self, name: &str, template: &str) {
        self.templates.insert(name.to_string(), template.to_string());
    }

    /// Check whether a template is registered
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Resolve a template into an absolute URL
    ///
    /// Values are percent-encoded. Extra params are ignored; a placeholder
    /// without a value is an error.
    pub fn resolve(&self, name: &str, params: &[(&str, &str)]) -> Result<String> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| DwcError::UnknownTemplate(name.to_string()))?;

        let mut url = String::with_capacity(self.base_url.len() + template.len());
        url.push_str(&self.base_url);

        let mut rest = template.as_str();
        while let Some(open) = rest.find('{') {
            url.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(|| DwcError::MissingParameter {
                template: name.to_string(),
                placeholder: after.to_string(),
            })?;
            let placeholder = &after[..close];

            let value = params
                .iter()
                .find(|(key, _)| *key == placeholder)
                .map(|(_, value)| *value)
                .ok_or_else(|| DwcError::MissingParameter {
                    template: name.to_string(),
                    placeholder: placeholder.to_string(),
                })?;

            url.push_str(&urlencoding::encode(value));
            rest = &after[close + 1..];
        }
        url.push_str(rest);

        Ok(url)
    }
}
