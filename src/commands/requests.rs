// Request payloads for the alias commands
// Field names mirror the camelCase payloads sent by the desktop frontend

use serde::Deserialize;

/// Trim caller-supplied text; the store still validates the result
pub(crate) fn clean(value: &str) -> &str {
    value.trim()
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddAliasRequest {
    pub name: String,
    pub command: String,
    pub group: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAliasRequest {
    pub old_name: String,
    pub new_name: String,
    pub command: String,
    pub group: String,
    /// Replaces the description when present
    #[serde(default)]
    pub description: Option<String>,
}

/// Identifies a single alias (remove)
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AliasRefRequest {
    pub name: String,
    pub group: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ToggleAliasRequest {
    pub name: String,
    pub group: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionRequest {
    pub name: String,
    pub group: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub group_name: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RenameGroupRequest {
    pub old_name: String,
    pub new_name: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteGroupRequest {
    pub group_name: String,
    #[serde(default)]
    pub delete_aliases: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupInfoRequest {
    pub group_name: String,
}
