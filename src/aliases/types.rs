// Alias data model - alias entries, group maps, derived stats and operation responses

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the protected group that always exists
pub const DEFAULT_GROUP: &str = "default";

/// A single shell alias
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AliasData {
    /// Alias name, unique within its group
    pub name: String,
    /// Shell command the alias expands to
    #[serde(rename = "cmd", alias = "command")]
    pub command: String,
    /// Disabled aliases are kept but never exported as active
    #[serde(default)]
    pub disabled: bool,
    /// Optional free-text annotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AliasData {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            disabled: false,
            description: None,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = normalize_description(description);
        self
    }

    pub fn is_active(&self) -> bool {
        !self.disabled
    }
}

/// Empty descriptions are stored as absent
pub(crate) fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|d| !d.is_empty())
}

/// Aliases of one group, keyed by alias name
pub type AliasGroup = BTreeMap<String, AliasData>;

/// Whole store contents, keyed by group name
pub type AliasGroups = BTreeMap<String, AliasGroup>;

/// Derived statistics for a group. Never persisted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupStats {
    pub name: String,
    pub alias_count: usize,
    pub active_count: usize,
    pub disabled_count: usize,
    pub is_deletable: bool,
    pub is_renamable: bool,
}

impl GroupStats {
    /// Compute stats from a group's current aliases
    pub fn compute(name: &str, aliases: &AliasGroup) -> Self {
        let disabled_count = aliases.values().filter(|a| a.disabled).count();
        let alias_count = aliases.len();
        let protected = name == DEFAULT_GROUP;
        Self {
            name: name.to_string(),
            alias_count,
            active_count: alias_count - disabled_count,
            disabled_count,
            is_deletable: !protected,
            is_renamable: !protected,
        }
    }
}

/// Group stats together with the group's aliases
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupInfo {
    #[serde(flatten)]
    pub stats: GroupStats,
    pub aliases: AliasGroup,
}

/// Plain acknowledgment for alias and group mutations
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OperationResponse {
    pub success: bool,
    pub message: String,
}

impl OperationResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Acknowledgment for add/update carrying the resulting alias identity
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AliasResponse {
    pub success: bool,
    pub message: String,
    pub group: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RenameGroupResponse {
    pub success: bool,
    pub message: String,
    /// Number of aliases moved to the new group name
    pub alias_count: usize,
}

/// An alias renamed while being transferred into the default group
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RenamedAlias {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteGroupResponse {
    pub success: bool,
    pub message: String,
    pub deleted_alias_count: usize,
    pub transferred_alias_count: usize,
    /// Transferred aliases that collided with a default alias and got a suffix
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub renamed_aliases: Vec<RenamedAlias>,
}

/// Flattened alias for table display and search results
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AliasRow {
    /// "<group>-<name>"
    pub id: String,
    pub name: String,
    pub command: String,
    pub group: String,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AliasRow {
    pub fn new(group: &str, alias: &AliasData) -> Self {
        Self {
            id: format!("{}-{}", group, alias.name),
            name: alias.name.clone(),
            command: alias.command.clone(),
            group: group.to_string(),
            enabled: alias.is_active(),
            description: alias.description.clone(),
        }
    }
}

/// Which row field a search term is matched against
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    #[default]
    All,
    Name,
    Command,
    Group,
}

impl std::str::FromStr for FilterField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(FilterField::All),
            "name" => Ok(FilterField::Name),
            "command" => Ok(FilterField::Command),
            "group" => Ok(FilterField::Group),
            _ => Err(format!("Unknown filter field: {}", s)),
        }
    }
}

/// Search criteria; empty fields match everything
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilter {
    #[serde(default)]
    pub term: Option<String>,
    #[serde(default)]
    pub field: FilterField,
    #[serde(default)]
    pub group: Option<String>,
}

impl SearchFilter {
    /// Check a row against the filter. Term matching is case-insensitive.
    pub fn matches(&self, row: &AliasRow) -> bool {
        if let Some(group) = self.group.as_deref().filter(|g| !g.is_empty()) {
            if row.group != group {
                return false;
            }
        }

        let term = match self.term.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_lowercase(),
            _ => return true,
        };
        let contains = |value: &str| value.to_lowercase().contains(&term);

        match self.field {
            FilterField::Name => contains(&row.name),
            FilterField::Command => contains(&row.command),
            FilterField::Group => contains(&row.group),
            FilterField::All => {
                contains(&row.name)
                    || contains(&row.command)
                    || contains(&row.group)
                    || row.description.as_deref().is_some_and(contains)
            }
        }
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
