// Alias store events for UI notification
// Defines event payloads and the emission trait the store calls after persisted mutations

use serde::Serialize;

/// Alias-related event names
pub mod alias_events {
    pub const ALIASES_UPDATED: &str = "aliases_updated";
}

/// Kind of mutation that produced an event
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AliasAction {
    Add,
    Update,
    Remove,
    Toggle,
    Describe,
    CreateGroup,
    RenameGroup,
    DeleteGroup,
}

/// Payload for aliases_updated event
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AliasesUpdatedPayload {
    /// Type of mutation
    pub action: AliasAction,
    /// Group affected (the new name for renames)
    pub group: String,
    /// Alias affected, absent for group-level actions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AliasesUpdatedPayload {
    pub fn alias(action: AliasAction, group: &str, name: &str) -> Self {
        Self {
            action,
            group: group.to_string(),
            name: Some(name.to_string()),
        }
    }

    pub fn group(action: AliasAction, group: &str) -> Self {
        Self {
            action,
            group: group.to_string(),
            name: None,
        }
    }
}

/// Trait for emitting alias events
///
/// Called synchronously by the store once a mutation has been persisted.
/// Implementations must not call back into the store.
pub trait AliasEventEmitter: Send + Sync {
    /// Emit aliases_updated event
    fn emit_aliases_updated(&self, payload: AliasesUpdatedPayload);
}

/// Emitter that forwards events to the log, used by the CLI
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventEmitter;

impl AliasEventEmitter for LogEventEmitter {
    fn emit_aliases_updated(&self, payload: AliasesUpdatedPayload) {
        match serde_json::to_string(&payload) {
            Ok(json) => crate::debug!("{}: {}", alias_events::ALIASES_UPDATED, json),
            Err(e) => crate::warn!(
                "Failed to serialize event '{}': {}",
                alias_events::ALIASES_UPDATED,
                e
            ),
        }
    }
}

#[cfg(test)]
#[path = "events_test.rs"]
mod tests;
