// Alias command logic - testable functions the frontend bridge calls into
// Each function locks the shared store for the whole validate -> mutate -> persist sequence

use super::requests::{
    clean, AddAliasRequest, AliasRefRequest, CreateGroupRequest, DeleteGroupRequest,
    DescriptionRequest, GroupInfoRequest, RenameGroupRequest, ToggleAliasRequest,
    UpdateAliasRequest,
};
use super::AliasStoreState;
use crate::aliases::{
    AliasGroups, AliasResponse, AliasRow, AliasStoreError, DeleteGroupResponse, GroupInfo,
    GroupStats, OperationResponse, RenameGroupResponse, SearchFilter,
};

/// Map AliasStoreError to user-friendly error messages
pub fn to_user_error(error: AliasStoreError) -> String {
    match error {
        AliasStoreError::Validation(e) => format!("Invalid input: {}", e),
        AliasStoreError::DuplicateAlias { name, group } => {
            format!("Alias '{}' already exists in group '{}'", name, group)
        }
        AliasStoreError::DuplicateGroup(group) => format!("Group '{}' already exists", group),
        AliasStoreError::AliasNotFound { name, group } => {
            format!("Alias '{}' not found in group '{}'", name, group)
        }
        AliasStoreError::GroupNotFound(group) => format!("Group '{}' not found", group),
        AliasStoreError::GroupProtected(group) => {
            format!("Group '{}' cannot be renamed or deleted", group)
        }
        AliasStoreError::PersistenceError(msg) => format!("Failed to save aliases: {}", msg),
        AliasStoreError::LoadError(msg) => format!("Failed to load aliases: {}", msg),
    }
}

fn clean_description(description: Option<String>) -> Option<String> {
    description.map(|d| d.trim().to_string())
}

/// List every group with its aliases
pub fn list_all_aliases_impl(state: &AliasStoreState) -> AliasGroups {
    state.lock().list_all()
}

/// List group names
pub fn get_groups_impl(state: &AliasStoreState) -> Vec<String> {
    state.lock().list_group_names()
}

/// Add a new alias
///
/// # Errors
/// Returns a user-facing message if validation fails, the alias already
/// exists in the group, or the store cannot be saved.
pub fn add_alias_impl(
    state: &AliasStoreState,
    request: AddAliasRequest,
) -> Result<AliasResponse, String> {
    state
        .lock()
        .add_alias(
            clean(&request.name),
            clean(&request.command),
            clean(&request.group),
            clean_description(request.description),
        )
        .map_err(to_user_error)
}

/// Rename an alias and/or replace its command
pub fn update_alias_impl(
    state: &AliasStoreState,
    request: UpdateAliasRequest,
) -> Result<AliasResponse, String> {
    state
        .lock()
        .update_alias(
            clean(&request.old_name),
            clean(&request.new_name),
            clean(&request.command),
            clean(&request.group),
            clean_description(request.description),
        )
        .map_err(to_user_error)
}

/// Delete an alias
pub fn remove_alias_impl(
    state: &AliasStoreState,
    request: AliasRefRequest,
) -> Result<OperationResponse, String> {
    state
        .lock()
        .remove_alias(clean(&request.name), clean(&request.group))
        .map_err(to_user_error)
}

/// Enable or disable an alias
pub fn toggle_alias_impl(
    state: &AliasStoreState,
    request: ToggleAliasRequest,
) -> Result<OperationResponse, String> {
    state
        .lock()
        .toggle_alias(clean(&request.name), clean(&request.group), request.disabled)
        .map_err(to_user_error)
}

/// Replace or clear an alias description
pub fn update_alias_description_impl(
    state: &AliasStoreState,
    request: DescriptionRequest,
) -> Result<OperationResponse, String> {
    state
        .lock()
        .update_alias_description(
            clean(&request.name),
            clean(&request.group),
            clean(&request.description),
        )
        .map_err(to_user_error)
}

/// Create an empty group
pub fn create_group_impl(
    state: &AliasStoreState,
    request: CreateGroupRequest,
) -> Result<OperationResponse, String> {
    state
        .lock()
        .create_group(clean(&request.group_name))
        .map_err(to_user_error)
}

/// Rename a group, keeping its aliases
pub fn rename_group_impl(
    state: &AliasStoreState,
    request: RenameGroupRequest,
) -> Result<RenameGroupResponse, String> {
    state
        .lock()
        .rename_group(clean(&request.old_name), clean(&request.new_name))
        .map_err(to_user_error)
}

/// Delete a group, deleting its aliases or moving them to the default group
pub fn delete_group_impl(
    state: &AliasStoreState,
    request: DeleteGroupRequest,
) -> Result<DeleteGroupResponse, String> {
    state
        .lock()
        .delete_group(clean(&request.group_name), request.delete_aliases)
        .map_err(to_user_error)
}

/// Aliases and stats of one group
pub fn get_group_info_impl(
    state: &AliasStoreState,
    request: GroupInfoRequest,
) -> Result<GroupInfo, String> {
    state
        .lock()
        .group_info(clean(&request.group_name))
        .map_err(to_user_error)
}

/// Stats for every group
pub fn get_groups_stats_impl(state: &AliasStoreState) -> Vec<GroupStats> {
    state.lock().groups_stats()
}

/// Table rows matching a filter
pub fn search_aliases_impl(state: &AliasStoreState, filter: SearchFilter) -> Vec<AliasRow> {
    state.lock().search(&filter)
}

/// Sourceable shell script for the current aliases
pub fn export_shell_impl(state: &AliasStoreState) -> String {
    state.lock().export_shell()
}

#[cfg(test)]
#[path = "aliases_test.rs"]
mod tests;
