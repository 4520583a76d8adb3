// Alias store - owns alias/group data, enforces naming and group lifecycle rules, persists state
// Follows the dictionary store pattern: validate, build the new state, persist atomically, then commit

use std::fmt;
use std::sync::Arc;

use super::shell;
use super::types::{
    normalize_description, AliasData, AliasGroup, AliasGroups, AliasResponse, AliasRow,
    DeleteGroupResponse, GroupInfo, GroupStats, OperationResponse, RenameGroupResponse,
    RenamedAlias, SearchFilter, DEFAULT_GROUP,
};
use super::validation::{self, ValidationError};
use crate::events::{AliasAction, AliasEventEmitter, AliasesUpdatedPayload};
use crate::storage::{AliasBackend, FileBackend};

/// Error types for alias store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AliasStoreError {
    /// Malformed alias name, group name or command
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Alias name already used in the group
    #[error("Alias '{name}' already exists in group '{group}'")]
    DuplicateAlias { name: String, group: String },
    /// Group name already used
    #[error("Group '{0}' already exists")]
    DuplicateGroup(String),
    /// No alias with this name in the group
    #[error("Alias '{name}' not found in group '{group}'")]
    AliasNotFound { name: String, group: String },
    /// No group with this name
    #[error("Group '{0}' not found")]
    GroupNotFound(String),
    /// Attempt to rename or delete the default group
    #[error("Group '{0}' is protected and cannot be renamed or deleted")]
    GroupProtected(String),
    /// Failed to persist aliases; in-memory state was left unchanged
    #[error("Failed to persist aliases: {0}")]
    PersistenceError(String),
    /// Failed to load aliases
    #[error("Failed to load aliases: {0}")]
    LoadError(String),
}

/// Store for aliases grouped by name, persisted through an injected backend.
///
/// Every mutation is applied to a copy of the groups, saved, and only then
/// swapped in, so a failed write never leaves memory ahead of storage.
pub struct AliasStore {
    /// Aliases indexed by group, then alias name
    groups: AliasGroups,
    backend: Box<dyn AliasBackend>,
    emitter: Option<Arc<dyn AliasEventEmitter>>,
}

impl fmt::Debug for AliasStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AliasStore")
            .field("groups", &self.groups.len())
            .field("backend", &self.backend.location())
            .field("emitter", &self.emitter.is_some())
            .finish()
    }
}

fn initial_groups() -> AliasGroups {
    let mut groups = AliasGroups::new();
    groups.insert(DEFAULT_GROUP.to_string(), AliasGroup::new());
    groups
}

impl AliasStore {
    /// Create an empty store (only the default group) over the given backend.
    /// Nothing is read until `load` is called.
    pub fn new(backend: impl AliasBackend + 'static) -> Self {
        Self {
            groups: initial_groups(),
            backend: Box::new(backend),
            emitter: None,
        }
    }

    /// Create a store and load its persisted state
    pub fn open(backend: impl AliasBackend + 'static) -> Result<Self, AliasStoreError> {
        let mut store = Self::new(backend);
        store.load()?;
        Ok(store)
    }

    /// Open the store at the default config path
    pub fn with_default_path() -> Result<Self, AliasStoreError> {
        let backend = FileBackend::with_default_path()
            .map_err(|e| AliasStoreError::LoadError(e.to_string()))?;
        Self::open(backend)
    }

    /// Attach a change-notification hook
    pub fn with_emitter(mut self, emitter: Arc<dyn AliasEventEmitter>) -> Self {
        self.emitter = Some(emitter);
        self
    }

    /// Replace the in-memory state with what the backend holds
    pub fn load(&mut self) -> Result<(), AliasStoreError> {
        crate::debug!("Loading aliases from {}", self.backend.location());

        let loaded = self
            .backend
            .load()
            .map_err(|e| AliasStoreError::LoadError(e.to_string()))?;

        let mut groups = match loaded {
            Some(groups) => groups,
            None => {
                crate::debug!("No alias file found, starting with empty store");
                AliasGroups::new()
            }
        };

        groups.entry(DEFAULT_GROUP.to_string()).or_default();
        for (group_name, aliases) in groups.iter_mut() {
            for (key, alias) in aliases.iter_mut() {
                if alias.name != *key {
                    crate::warn!(
                        "Alias '{}' in group '{}' is stored under key '{}', using the key",
                        alias.name,
                        group_name,
                        key
                    );
                    alias.name = key.clone();
                }
            }
        }

        self.groups = groups;
        crate::info!(
            "Loaded {} aliases in {} groups",
            self.total_alias_count(),
            self.groups.len()
        );
        Ok(())
    }

    /// Apply `mutate` to a working copy, persist it, then make it current
    fn commit<T>(
        &mut self,
        mutate: impl FnOnce(&mut AliasGroups) -> Result<T, AliasStoreError>,
    ) -> Result<T, AliasStoreError> {
        let mut next = self.groups.clone();
        let value = mutate(&mut next)?;

        crate::debug!(
            "Persisting {} groups to {}",
            next.len(),
            self.backend.location()
        );
        self.backend.save(&next).map_err(|e| {
            crate::warn!("Alias store write failed, keeping previous state: {}", e);
            AliasStoreError::PersistenceError(e.to_string())
        })?;

        self.groups = next;
        Ok(value)
    }

    fn notify(&self, payload: AliasesUpdatedPayload) {
        if let Some(emitter) = &self.emitter {
            emitter.emit_aliases_updated(payload);
        }
    }

    /// Snapshot of every group and alias
    pub fn list_all(&self) -> AliasGroups {
        self.groups.clone()
    }

    /// Group names in sorted order
    pub fn list_group_names(&self) -> Vec<String> {
        self.groups.keys().cloned().collect()
    }

    /// Get an alias by group and name
    pub fn get(&self, group: &str, name: &str) -> Option<&AliasData> {
        self.groups.get(group).and_then(|aliases| aliases.get(name))
    }

    pub fn total_alias_count(&self) -> usize {
        self.groups.values().map(|aliases| aliases.len()).sum()
    }

    /// Add a new alias, creating its group if needed
    #[must_use = "this returns a Result that should be handled"]
    pub fn add_alias(
        &mut self,
        name: &str,
        command: &str,
        group: &str,
        description: Option<String>,
    ) -> Result<AliasResponse, AliasStoreError> {
        validation::validate_alias(name, command, group)?;

        self.commit(|groups| {
            let aliases = groups.entry(group.to_string()).or_default();
            if aliases.contains_key(name) {
                return Err(AliasStoreError::DuplicateAlias {
                    name: name.to_string(),
                    group: group.to_string(),
                });
            }
            aliases.insert(
                name.to_string(),
                AliasData::new(name, command).with_description(description),
            );
            Ok(())
        })?;

        crate::info!("Added alias '{}' to group '{}'", name, group);
        self.notify(AliasesUpdatedPayload::alias(AliasAction::Add, group, name));
        Ok(AliasResponse {
            success: true,
            message: format!("Alias '{}' added to group '{}'", name, group),
            group: group.to_string(),
            name: name.to_string(),
        })
    }

    /// Rename an alias and replace its command within a group.
    ///
    /// `disabled` is always preserved. The description is preserved unless
    /// `description` is given, in which case it replaces it (empty clears).
    ///
    /// `new_name` is validated even when it equals `old_name`. A name that grew
    /// past the length limit through a transfer suffix (see `delete_group`)
    /// therefore has to be shortened in the same call that edits the command.
    #[must_use = "this returns a Result that should be handled"]
    pub fn update_alias(
        &mut self,
        old_name: &str,
        new_name: &str,
        command: &str,
        group: &str,
        description: Option<String>,
    ) -> Result<AliasResponse, AliasStoreError> {
        if self.get(group, old_name).is_none() {
            return Err(AliasStoreError::AliasNotFound {
                name: old_name.to_string(),
                group: group.to_string(),
            });
        }
        validation::validate_alias(new_name, command, group)?;

        self.commit(|groups| {
            let aliases = groups
                .get_mut(group)
                .ok_or_else(|| AliasStoreError::GroupNotFound(group.to_string()))?;
            if new_name != old_name && aliases.contains_key(new_name) {
                return Err(AliasStoreError::DuplicateAlias {
                    name: new_name.to_string(),
                    group: group.to_string(),
                });
            }
            let mut alias =
                aliases
                    .remove(old_name)
                    .ok_or_else(|| AliasStoreError::AliasNotFound {
                        name: old_name.to_string(),
                        group: group.to_string(),
                    })?;
            alias.name = new_name.to_string();
            alias.command = command.to_string();
            if description.is_some() {
                alias.description = normalize_description(description);
            }
            aliases.insert(new_name.to_string(), alias);
            Ok(())
        })?;

        if old_name == new_name {
            crate::info!("Updated alias '{}' in group '{}'", new_name, group);
        } else {
            crate::info!(
                "Updated alias '{}' -> '{}' in group '{}'",
                old_name,
                new_name,
                group
            );
        }
        self.notify(AliasesUpdatedPayload::alias(AliasAction::Update, group, new_name));
        Ok(AliasResponse {
            success: true,
            message: format!("Alias '{}' updated in group '{}'", new_name, group),
            group: group.to_string(),
            name: new_name.to_string(),
        })
    }

    /// Apply an in-place edit to an existing alias
    fn edit_alias(
        &mut self,
        name: &str,
        group: &str,
        edit: impl FnOnce(&mut AliasData),
    ) -> Result<(), AliasStoreError> {
        self.commit(|groups| {
            let alias = groups
                .get_mut(group)
                .and_then(|aliases| aliases.get_mut(name))
                .ok_or_else(|| AliasStoreError::AliasNotFound {
                    name: name.to_string(),
                    group: group.to_string(),
                })?;
            edit(alias);
            Ok(())
        })
    }

    /// Delete an alias from a group
    #[must_use = "this returns a Result that should be handled"]
    pub fn remove_alias(
        &mut self,
        name: &str,
        group: &str,
    ) -> Result<OperationResponse, AliasStoreError> {
        self.commit(|groups| {
            groups
                .get_mut(group)
                .and_then(|aliases| aliases.remove(name))
                .map(|_| ())
                .ok_or_else(|| AliasStoreError::AliasNotFound {
                    name: name.to_string(),
                    group: group.to_string(),
                })
        })?;

        crate::info!("Removed alias '{}' from group '{}'", name, group);
        self.notify(AliasesUpdatedPayload::alias(AliasAction::Remove, group, name));
        Ok(OperationResponse::ok(format!(
            "Alias '{}' removed from group '{}'",
            name, group
        )))
    }

    /// Set the disabled flag. Setting the current value again succeeds.
    #[must_use = "this returns a Result that should be handled"]
    pub fn toggle_alias(
        &mut self,
        name: &str,
        group: &str,
        disabled: bool,
    ) -> Result<OperationResponse, AliasStoreError> {
        self.edit_alias(name, group, |alias| alias.disabled = disabled)?;

        let state = if disabled { "disabled" } else { "enabled" };
        crate::info!("Alias '{}' in group '{}' {}", name, group, state);
        self.notify(AliasesUpdatedPayload::alias(AliasAction::Toggle, group, name));
        Ok(OperationResponse::ok(format!("Alias '{}' {}", name, state)))
    }

    /// Replace an alias description; an empty string clears it
    #[must_use = "this returns a Result that should be handled"]
    pub fn update_alias_description(
        &mut self,
        name: &str,
        group: &str,
        description: &str,
    ) -> Result<OperationResponse, AliasStoreError> {
        let description = normalize_description(Some(description.to_string()));
        let cleared = description.is_none();
        self.edit_alias(name, group, |alias| alias.description = description)?;

        crate::info!("Updated description of alias '{}' in group '{}'", name, group);
        self.notify(AliasesUpdatedPayload::alias(AliasAction::Describe, group, name));
        let message = if cleared {
            format!("Description of alias '{}' cleared", name)
        } else {
            format!("Description of alias '{}' updated", name)
        };
        Ok(OperationResponse::ok(message))
    }

    /// Create an empty group
    #[must_use = "this returns a Result that should be handled"]
    pub fn create_group(&mut self, group: &str) -> Result<OperationResponse, AliasStoreError> {
        validation::validate_group_name(group)?;

        self.commit(|groups| {
            if groups.contains_key(group) {
                return Err(AliasStoreError::DuplicateGroup(group.to_string()));
            }
            groups.insert(group.to_string(), AliasGroup::new());
            Ok(())
        })?;

        crate::info!("Created group '{}'", group);
        self.notify(AliasesUpdatedPayload::group(AliasAction::CreateGroup, group));
        Ok(OperationResponse::ok(format!("Group '{}' created", group)))
    }

    /// Rename a group, moving all of its aliases unchanged
    #[must_use = "this returns a Result that should be handled"]
    pub fn rename_group(
        &mut self,
        old_name: &str,
        new_name: &str,
    ) -> Result<RenameGroupResponse, AliasStoreError> {
        if !self.groups.contains_key(old_name) {
            return Err(AliasStoreError::GroupNotFound(old_name.to_string()));
        }
        if old_name == DEFAULT_GROUP {
            return Err(AliasStoreError::GroupProtected(old_name.to_string()));
        }
        validation::validate_group_name(new_name)?;

        let moved = self.commit(|groups| {
            if groups.contains_key(new_name) {
                return Err(AliasStoreError::DuplicateGroup(new_name.to_string()));
            }
            let aliases = groups
                .remove(old_name)
                .ok_or_else(|| AliasStoreError::GroupNotFound(old_name.to_string()))?;
            let moved = aliases.len();
            groups.insert(new_name.to_string(), aliases);
            Ok(moved)
        })?;

        crate::info!(
            "Renamed group '{}' to '{}' ({} aliases)",
            old_name,
            new_name,
            moved
        );
        self.notify(AliasesUpdatedPayload::group(AliasAction::RenameGroup, new_name));
        Ok(RenameGroupResponse {
            success: true,
            message: format!(
                "Group '{}' renamed to '{}' ({} aliases moved)",
                old_name, new_name, moved
            ),
            alias_count: moved,
        })
    }

    /// Delete a group, either dropping its aliases or moving them into the
    /// default group. Moved aliases that collide with an existing default
    /// alias get the first free `-N` suffix, starting at 2.
    /// The suffix may push a name past the alias name length limit; such
    /// aliases keep working but must be renamed before `update_alias` accepts them.
    #[must_use = "this returns a Result that should be handled"]
    pub fn delete_group(
        &mut self,
        group: &str,
        delete_aliases: bool,
    ) -> Result<DeleteGroupResponse, AliasStoreError> {
        if !self.groups.contains_key(group) {
            return Err(AliasStoreError::GroupNotFound(group.to_string()));
        }
        if group == DEFAULT_GROUP {
            return Err(AliasStoreError::GroupProtected(group.to_string()));
        }

        let (deleted, transferred, renamed) = self.commit(|groups| {
            let aliases = groups
                .remove(group)
                .ok_or_else(|| AliasStoreError::GroupNotFound(group.to_string()))?;
            if delete_aliases {
                return Ok((aliases.len(), 0, Vec::new()));
            }

            let default = groups.entry(DEFAULT_GROUP.to_string()).or_default();
            let transferred = aliases.len();
            let mut renamed = Vec::new();
            for (name, mut alias) in aliases {
                let target = free_alias_name(default, &name);
                if target != name {
                    renamed.push(RenamedAlias {
                        from: name,
                        to: target.clone(),
                    });
                    alias.name = target.clone();
                }
                default.insert(target, alias);
            }
            Ok((0, transferred, renamed))
        })?;

        let message = if delete_aliases {
            format!("Group '{}' deleted with {} aliases", group, deleted)
        } else if renamed.is_empty() {
            format!(
                "Group '{}' deleted, {} aliases moved to '{}'",
                group, transferred, DEFAULT_GROUP
            )
        } else {
            format!(
                "Group '{}' deleted, {} aliases moved to '{}' ({} renamed to avoid conflicts)",
                group,
                transferred,
                DEFAULT_GROUP,
                renamed.len()
            )
        };
        crate::info!("{}", message);
        self.notify(AliasesUpdatedPayload::group(AliasAction::DeleteGroup, group));
        Ok(DeleteGroupResponse {
            success: true,
            message,
            deleted_alias_count: deleted,
            transferred_alias_count: transferred,
            renamed_aliases: renamed,
        })
    }

    /// Aliases of a group together with its derived stats
    pub fn group_info(&self, group: &str) -> Result<GroupInfo, AliasStoreError> {
        let aliases = self
            .groups
            .get(group)
            .ok_or_else(|| AliasStoreError::GroupNotFound(group.to_string()))?;
        Ok(GroupInfo {
            stats: GroupStats::compute(group, aliases),
            aliases: aliases.clone(),
        })
    }

    /// Stats for every group, ordered by group name
    pub fn groups_stats(&self) -> Vec<GroupStats> {
        self.groups
            .iter()
            .map(|(name, aliases)| GroupStats::compute(name, aliases))
            .collect()
    }

    /// Flattened rows matching the filter, ordered by group then alias name
    pub fn search(&self, filter: &SearchFilter) -> Vec<AliasRow> {
        self.groups
            .iter()
            .flat_map(|(group, aliases)| {
                aliases
                    .values()
                    .map(move |alias| AliasRow::new(group, alias))
            })
            .filter(|row| filter.matches(row))
            .collect()
    }

    /// Render the store as a sourceable shell script
    pub fn export_shell(&self) -> String {
        shell::render_aliases(&self.groups)
    }
}

/// First name not present in `aliases`: `name` itself, else `name-2`, `name-3`, ...
fn free_alias_name(aliases: &AliasGroup, name: &str) -> String {
    if !aliases.contains_key(name) {
        return name.to_string();
    }
    (2usize..)
        .map(|n| format!("{}-{}", name, n))
        .find(|candidate| !aliases.contains_key(candidate))
        .unwrap_or_else(|| name.to_string())
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
