//! Name pattern resolution against cached inventories
//!
//! Patterns are matched per resource type. Workspace names compare
//! case-sensitively; users compare upper-cased on both sides. Results are
//! owned copies, and a record matched by two patterns is returned twice.

use log::warn;

use crate::dwc::spaces::WorkspaceRecord;
use crate::dwc::users::UserRecord;

/// Operator supplied name patterns
///
/// No patterns (or an empty list) selects every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamePatterns(Option<Vec<String>>);

impl NamePatterns {
    /// Select everything
    pub fn all() -> Self {
        Self(None)
    }

    /// True when no filtering applies
    pub fn is_all(&self) -> bool {
        self.as_list().is_none()
    }

    /// Pattern list, `None` when everything is selected
    pub fn as_list(&self) -> Option<&[String]> {
        match &self.0 {
            Some(patterns) if !patterns.is_empty() => Some(patterns),
            _ => None,
        }
    }
}

impl From<&str> for NamePatterns {
    fn from(pattern: &str) -> Self {
        Self(Some(vec![pattern.to_string()]))
    }
}

impl From<String> for NamePatterns {
    fn from(pattern: String) -> Self {
        Self(Some(vec![pattern]))
    }
}

impl From<Vec<String>> for NamePatterns {
    fn from(patterns: Vec<String>) -> Self {
        Self(Some(patterns))
    }
}

impl From<&[String]> for NamePatterns {
    fn from(patterns: &[String]) -> Self {
        Self(Some(patterns.to_vec()))
    }
}

impl From<Option<Vec<String>>> for NamePatterns {
    fn from(patterns: Option<Vec<String>>) -> Self {
        Self(patterns)
    }
}

/// Per-type matching rules
pub trait Matchable {
    /// Label used in "not found" warnings
    const KIND: &'static str;

    /// Exact match
    fn equals_pattern(&self, pattern: &str) -> bool;

    /// Containment (wildcard) match
    fn contains_pattern(&self, pattern: &str) -> bool;
}

impl Matchable for WorkspaceRecord {
    const KIND: &'static str = "workspace";

    fn equals_pattern(&self, pattern: &str) -> bool {
        self.name == pattern
    }

    fn contains_pattern(&self, pattern: &str) -> bool {
        self.name.contains(pattern)
    }
}

impl Matchable for UserRecord {
    const KIND: &'static str = "user";

    fn equals_pattern(&self, pattern: &str) -> bool {
        let pattern = pattern.to_uppercase();
        self.user_name.to_uppercase() == pattern
            || self.email().is_some_and(|e| e.to_uppercase() == pattern)
    }

    fn contains_pattern(&self, pattern: &str) -> bool {
        let pattern = pattern.to_uppercase();
        [Some(self.user_name.as_str()), self.email(), self.display_name()]
            .into_iter()
            .flatten()
            .any(|field| field.to_uppercase().contains(&pattern))
    }
}

/// Resolve patterns against a snapshot
///
/// Wildcard patterns collect every containing record; exact patterns stop at
/// the first equal record. Unmatched patterns are logged and skipped.
pub fn resolve<T: Matchable + Clone>(records: &[T], patterns: &NamePatterns, wildcard: bool) -> Vec<T> {
    let Some(patterns) = patterns.as_list() else {
        return records.to_vec();
    };

    let mut resolved = Vec::new();
    for pattern in patterns {
        let mut matched = false;
        for record in records {
            if wildcard {
                if record.contains_pattern(pattern) {
                    resolved.push(record.clone());
                    matched = true;
                }
            } else if record.equals_pattern(pattern) {
                resolved.push(record.clone());
                matched = true;
                break;
            }
        }

        if !matched {
            warn!(
                "{} {} not found - did you want wildcards?",
                T::KIND,
                pattern
            );
        }
    }
    resolved
}
