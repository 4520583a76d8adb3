// Tests for AliasStore
// Test cases:
// - Alias CRUD workflow: add, list, update, toggle, describe, remove
// - Duplicate/not-found/validation errors leave the store unchanged
// - Group lifecycle: create, rename, delete with and without aliases
// - Transfer into default renames collisions deterministically
// - Default group can never be renamed or deleted
// - Stats stay consistent after every mutation
// - Failed writes never change memory and emit nothing
// - State persists across store reload

use super::*;
use crate::aliases::{FilterField, ValidationError};
use crate::events::{AliasAction, AliasEventEmitter, AliasesUpdatedPayload};
use crate::storage::{FileBackend, MemoryBackend};
use parking_lot::Mutex;
use std::sync::Arc;
use tempfile::TempDir;

/// Emitter that records every payload for assertions
#[derive(Default)]
struct RecordingEmitter {
    events: Mutex<Vec<AliasesUpdatedPayload>>,
}

impl RecordingEmitter {
    fn actions(&self) -> Vec<AliasAction> {
        self.events.lock().iter().map(|e| e.action).collect()
    }
}

impl AliasEventEmitter for RecordingEmitter {
    fn emit_aliases_updated(&self, payload: AliasesUpdatedPayload) {
        self.events.lock().push(payload);
    }
}

/// Helper to create a store over a shared in-memory backend
fn create_test_store() -> (AliasStore, MemoryBackend) {
    let backend = MemoryBackend::new();
    let store = AliasStore::new(backend.clone());
    (store, backend)
}

fn assert_counts_consistent(store: &AliasStore) {
    for stats in store.groups_stats() {
        assert_eq!(
            stats.alias_count,
            stats.active_count + stats.disabled_count,
            "inconsistent counts for group {}",
            stats.name
        );
    }
}

#[test]
fn test_new_store_has_default_group() {
    let (store, _backend) = create_test_store();

    assert_eq!(store.list_group_names(), vec![DEFAULT_GROUP.to_string()]);
    assert_eq!(store.total_alias_count(), 0);
}

#[test]
fn test_add_alias_then_group_info() {
    let (mut store, backend) = create_test_store();

    let response = store.add_alias("ll", "ls -la", "work", None).unwrap();
    assert!(response.success);
    assert_eq!(response.group, "work");
    assert_eq!(response.name, "ll");

    let info = store.group_info("work").unwrap();
    let alias = &info.aliases["ll"];
    assert_eq!(alias.name, "ll");
    assert_eq!(alias.command, "ls -la");
    assert!(!alias.disabled);
    assert_eq!(info.stats.alias_count, 1);

    // Group was created implicitly and the change was persisted
    assert_eq!(store.list_group_names(), vec!["default", "work"]);
    assert_eq!(backend.saved().unwrap(), store.list_all());
}

#[test]
fn test_add_alias_with_description() {
    let (mut store, _backend) = create_test_store();

    store
        .add_alias("gs", "git status", DEFAULT_GROUP, Some("Status".to_string()))
        .unwrap();

    assert_eq!(
        store.get(DEFAULT_GROUP, "gs").unwrap().description.as_deref(),
        Some("Status")
    );
}

#[test]
fn test_duplicate_alias_rejected() {
    let (mut store, _backend) = create_test_store();
    store.add_alias("ll", "ls -la", DEFAULT_GROUP, None).unwrap();

    let result = store.add_alias("ll", "ls -lh", DEFAULT_GROUP, None);

    assert_eq!(
        result,
        Err(AliasStoreError::DuplicateAlias {
            name: "ll".to_string(),
            group: DEFAULT_GROUP.to_string()
        })
    );
    assert_eq!(store.get(DEFAULT_GROUP, "ll").unwrap().command, "ls -la");
}

#[test]
fn test_same_name_allowed_in_different_groups() {
    let (mut store, _backend) = create_test_store();

    store.add_alias("build", "make", DEFAULT_GROUP, None).unwrap();
    store.add_alias("build", "cargo build", "rust", None).unwrap();

    assert_eq!(store.get(DEFAULT_GROUP, "build").unwrap().command, "make");
    assert_eq!(store.get("rust", "build").unwrap().command, "cargo build");
}

#[test]
fn test_invalid_names_rejected() {
    let (mut store, backend) = create_test_store();

    assert_eq!(
        store.add_alias("1bad", "ls", DEFAULT_GROUP, None),
        Err(AliasStoreError::Validation(
            ValidationError::AliasNameStartsWithDigit("1bad".to_string())
        ))
    );
    assert!(matches!(
        store.add_alias("ok name", "ls", DEFAULT_GROUP, None),
        Err(AliasStoreError::Validation(ValidationError::InvalidAliasName(_)))
    ));
    assert!(matches!(
        store.add_alias("ok", "ls", "bad group", None),
        Err(AliasStoreError::Validation(ValidationError::InvalidGroupName(_)))
    ));
    assert!(matches!(
        store.add_alias("ok", "", DEFAULT_GROUP, None),
        Err(AliasStoreError::Validation(ValidationError::EmptyCommand))
    ));

    assert_eq!(store.total_alias_count(), 0);
    assert_eq!(backend.save_count(), 0);
}

#[test]
fn test_update_alias_renames_and_preserves_flags() {
    let (mut store, _backend) = create_test_store();
    store
        .add_alias("gs", "git status", "git", Some("Status".to_string()))
        .unwrap();
    store.toggle_alias("gs", "git", true).unwrap();

    let response = store
        .update_alias("gs", "gst", "git status -sb", "git", None)
        .unwrap();
    assert_eq!(response.name, "gst");

    assert!(store.get("git", "gs").is_none());
    let alias = store.get("git", "gst").unwrap();
    assert_eq!(alias.name, "gst");
    assert_eq!(alias.command, "git status -sb");
    assert!(alias.disabled);
    assert_eq!(alias.description.as_deref(), Some("Status"));
}

#[test]
fn test_update_alias_can_replace_description() {
    let (mut store, _backend) = create_test_store();
    store
        .add_alias("gs", "git status", "git", Some("Status".to_string()))
        .unwrap();

    store
        .update_alias("gs", "gs", "git status", "git", Some(String::new()))
        .unwrap();

    assert_eq!(store.get("git", "gs").unwrap().description, None);
}

#[test]
fn test_update_alias_errors() {
    let (mut store, _backend) = create_test_store();
    store.add_alias("a", "echo a", DEFAULT_GROUP, None).unwrap();
    store.add_alias("b", "echo b", DEFAULT_GROUP, None).unwrap();

    assert!(matches!(
        store.update_alias("missing", "x", "echo", DEFAULT_GROUP, None),
        Err(AliasStoreError::AliasNotFound { .. })
    ));
    assert!(matches!(
        store.update_alias("a", "a", "echo", "nogroup", None),
        Err(AliasStoreError::AliasNotFound { .. })
    ));
    assert_eq!(
        store.update_alias("a", "b", "echo", DEFAULT_GROUP, None),
        Err(AliasStoreError::DuplicateAlias {
            name: "b".to_string(),
            group: DEFAULT_GROUP.to_string()
        })
    );
    assert!(matches!(
        store.update_alias("a", "9a", "echo", DEFAULT_GROUP, None),
        Err(AliasStoreError::Validation(_))
    ));

    // Keeping the same name is not a duplicate
    store
        .update_alias("a", "a", "echo A", DEFAULT_GROUP, None)
        .unwrap();
    assert_eq!(store.get(DEFAULT_GROUP, "a").unwrap().command, "echo A");
    assert_eq!(store.get(DEFAULT_GROUP, "b").unwrap().command, "echo b");
}

#[test]
fn test_remove_alias() {
    let (mut store, _backend) = create_test_store();
    store.add_alias("ll", "ls -la", DEFAULT_GROUP, None).unwrap();

    store.remove_alias("ll", DEFAULT_GROUP).unwrap();

    assert!(store.get(DEFAULT_GROUP, "ll").is_none());
    assert!(matches!(
        store.remove_alias("ll", DEFAULT_GROUP),
        Err(AliasStoreError::AliasNotFound { .. })
    ));
    // Removing the last alias keeps the group
    assert!(store.group_info(DEFAULT_GROUP).is_ok());
}

#[test]
fn test_toggle_is_idempotent_and_reversible() {
    let (mut store, _backend) = create_test_store();
    store.add_alias("ll", "ls -la", DEFAULT_GROUP, None).unwrap();
    let before = store.list_all();

    store.toggle_alias("ll", DEFAULT_GROUP, true).unwrap();
    store.toggle_alias("ll", DEFAULT_GROUP, true).unwrap();
    let stats = store.group_info(DEFAULT_GROUP).unwrap().stats;
    assert_eq!(stats.disabled_count, 1);
    assert_eq!(stats.active_count, 0);

    store.toggle_alias("ll", DEFAULT_GROUP, false).unwrap();
    assert_eq!(store.list_all(), before);

    assert!(matches!(
        store.toggle_alias("nope", DEFAULT_GROUP, true),
        Err(AliasStoreError::AliasNotFound { .. })
    ));
}

#[test]
fn test_update_description_and_clear() {
    let (mut store, _backend) = create_test_store();
    store.add_alias("ll", "ls -la", DEFAULT_GROUP, None).unwrap();

    store
        .update_alias_description("ll", DEFAULT_GROUP, "Long listing")
        .unwrap();
    assert_eq!(
        store.get(DEFAULT_GROUP, "ll").unwrap().description.as_deref(),
        Some("Long listing")
    );

    store.update_alias_description("ll", DEFAULT_GROUP, "").unwrap();
    assert_eq!(store.get(DEFAULT_GROUP, "ll").unwrap().description, None);

    assert!(matches!(
        store.update_alias_description("nope", DEFAULT_GROUP, "x"),
        Err(AliasStoreError::AliasNotFound { .. })
    ));
}

#[test]
fn test_create_group() {
    let (mut store, _backend) = create_test_store();

    store.create_group("ops").unwrap();
    let info = store.group_info("ops").unwrap();
    assert_eq!(info.stats.alias_count, 0);
    assert!(info.aliases.is_empty());

    assert_eq!(
        store.create_group("ops"),
        Err(AliasStoreError::DuplicateGroup("ops".to_string()))
    );
    assert_eq!(
        store.create_group(DEFAULT_GROUP),
        Err(AliasStoreError::DuplicateGroup(DEFAULT_GROUP.to_string()))
    );
    assert!(matches!(
        store.create_group(&"g".repeat(31)),
        Err(AliasStoreError::Validation(ValidationError::GroupNameTooLong { .. }))
    ));
}

#[test]
fn test_rename_group_moves_aliases_unchanged() {
    let (mut store, _backend) = create_test_store();
    store
        .add_alias("deploy", "./deploy.sh", "work", Some("Ship".to_string()))
        .unwrap();
    store.add_alias("logs", "tail -f log", "work", None).unwrap();
    store.toggle_alias("logs", "work", true).unwrap();
    let before = store.group_info("work").unwrap().aliases;

    let response = store.rename_group("work", "projects").unwrap();

    assert_eq!(response.alias_count, 2);
    assert!(matches!(
        store.group_info("work"),
        Err(AliasStoreError::GroupNotFound(_))
    ));
    assert_eq!(store.group_info("projects").unwrap().aliases, before);
}

#[test]
fn test_rename_group_errors() {
    let (mut store, _backend) = create_test_store();
    store.create_group("work").unwrap();
    store.create_group("home").unwrap();

    assert_eq!(
        store.rename_group("missing", "x"),
        Err(AliasStoreError::GroupNotFound("missing".to_string()))
    );
    assert_eq!(
        store.rename_group(DEFAULT_GROUP, "main"),
        Err(AliasStoreError::GroupProtected(DEFAULT_GROUP.to_string()))
    );
    assert_eq!(
        store.rename_group("work", "home"),
        Err(AliasStoreError::DuplicateGroup("home".to_string()))
    );
    assert_eq!(
        store.rename_group("work", DEFAULT_GROUP),
        Err(AliasStoreError::DuplicateGroup(DEFAULT_GROUP.to_string()))
    );
    assert!(matches!(
        store.rename_group("work", "has space"),
        Err(AliasStoreError::Validation(_))
    ));
    assert_eq!(store.list_group_names(), vec!["default", "home", "work"]);
}

#[test]
fn test_delete_group_with_aliases() {
    let (mut store, _backend) = create_test_store();
    store.add_alias("a", "echo a", "tmp", None).unwrap();
    store.add_alias("b", "echo b", "tmp", None).unwrap();

    let response = store.delete_group("tmp", true).unwrap();

    assert_eq!(response.deleted_alias_count, 2);
    assert_eq!(response.transferred_alias_count, 0);
    assert!(!store.list_group_names().contains(&"tmp".to_string()));
    assert_eq!(store.total_alias_count(), 0);
}

#[test]
fn test_delete_group_transfers_with_collision_rename() {
    let (mut store, _backend) = create_test_store();
    store.add_alias("build", "make", DEFAULT_GROUP, None).unwrap();
    store.add_alias("build", "cargo build", "work", None).unwrap();
    store
        .add_alias("test", "cargo test", "work", Some("Tests".to_string()))
        .unwrap();
    store.toggle_alias("test", "work", true).unwrap();
    let total_before = store.total_alias_count();

    let response = store.delete_group("work", false).unwrap();

    assert_eq!(response.deleted_alias_count, 0);
    assert_eq!(response.transferred_alias_count, 2);
    assert_eq!(
        response.renamed_aliases,
        vec![RenamedAlias {
            from: "build".to_string(),
            to: "build-2".to_string()
        }]
    );
    assert_eq!(store.total_alias_count(), total_before);
    assert_eq!(store.list_group_names(), vec![DEFAULT_GROUP]);

    assert_eq!(store.get(DEFAULT_GROUP, "build").unwrap().command, "make");
    let renamed = store.get(DEFAULT_GROUP, "build-2").unwrap();
    assert_eq!(renamed.name, "build-2");
    assert_eq!(renamed.command, "cargo build");
    let moved = store.get(DEFAULT_GROUP, "test").unwrap();
    assert!(moved.disabled);
    assert_eq!(moved.description.as_deref(), Some("Tests"));
}

#[test]
fn test_transfer_skips_taken_suffixes() {
    let (mut store, _backend) = create_test_store();
    store.add_alias("build", "make", DEFAULT_GROUP, None).unwrap();
    store.add_alias("build-2", "make two", DEFAULT_GROUP, None).unwrap();
    store.add_alias("build", "cargo build", "work", None).unwrap();

    let response = store.delete_group("work", false).unwrap();

    assert_eq!(response.renamed_aliases[0].to, "build-3");
    assert_eq!(store.get(DEFAULT_GROUP, "build-3").unwrap().command, "cargo build");
    assert_eq!(store.get(DEFAULT_GROUP, "build-2").unwrap().command, "make two");
}

#[test]
fn test_overlong_transferred_name_is_renamed_on_update() {
    let (mut store, _backend) = create_test_store();
    let long = "a".repeat(validation::MAX_ALIAS_NAME_LEN);
    store.add_alias(&long, "one", DEFAULT_GROUP, None).unwrap();
    store.add_alias(&long, "two", "work", None).unwrap();

    let response = store.delete_group("work", false).unwrap();
    let suffixed = format!("{}-2", long);
    assert_eq!(response.renamed_aliases[0].to, suffixed);
    assert_eq!(store.get(DEFAULT_GROUP, &suffixed).unwrap().command, "two");

    assert!(matches!(
        store.update_alias(&suffixed, &suffixed, "three", DEFAULT_GROUP, None),
        Err(AliasStoreError::Validation(ValidationError::AliasNameTooLong { .. }))
    ));
    assert_eq!(store.get(DEFAULT_GROUP, &suffixed).unwrap().command, "two");

    store
        .update_alias(&suffixed, "short", "three", DEFAULT_GROUP, None)
        .unwrap();
    assert_eq!(store.get(DEFAULT_GROUP, "short").unwrap().command, "three");
    assert!(store.get(DEFAULT_GROUP, &suffixed).is_none());
}

#[test]
fn test_default_group_is_protected() {
    let (mut store, _backend) = create_test_store();
    store.add_alias("ll", "ls -la", DEFAULT_GROUP, None).unwrap();
    let before = store.list_all();

    assert_eq!(
        store.delete_group(DEFAULT_GROUP, true),
        Err(AliasStoreError::GroupProtected(DEFAULT_GROUP.to_string()))
    );
    assert_eq!(
        store.delete_group(DEFAULT_GROUP, false),
        Err(AliasStoreError::GroupProtected(DEFAULT_GROUP.to_string()))
    );
    assert_eq!(store.list_all(), before);
}

#[test]
fn test_delete_missing_group() {
    let (mut store, _backend) = create_test_store();
    assert_eq!(
        store.delete_group("ghost", false),
        Err(AliasStoreError::GroupNotFound("ghost".to_string()))
    );
}

#[test]
fn test_groups_stats_ordered_and_consistent() {
    let (mut store, _backend) = create_test_store();
    store.add_alias("z", "echo z", "zeta", None).unwrap();
    store.add_alias("a", "echo a", "alpha", None).unwrap();
    store.add_alias("b", "echo b", "alpha", None).unwrap();
    store.toggle_alias("b", "alpha", true).unwrap();
    assert_counts_consistent(&store);

    store.rename_group("zeta", "omega").unwrap();
    assert_counts_consistent(&store);
    store.delete_group("alpha", false).unwrap();
    assert_counts_consistent(&store);

    let stats = store.groups_stats();
    let names: Vec<&str> = stats.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["default", "omega"]);
    assert_eq!(stats[0].alias_count, 2);
    assert_eq!(stats[0].disabled_count, 1);
    assert!(!stats[0].is_deletable);
    assert!(stats[1].is_renamable);
}

#[test]
fn test_failed_write_leaves_memory_unchanged() {
    let (store, backend) = create_test_store();
    let emitter = Arc::new(RecordingEmitter::default());
    let mut store = store.with_emitter(emitter.clone());
    store.add_alias("ll", "ls -la", DEFAULT_GROUP, None).unwrap();
    store.create_group("work").unwrap();
    let before = store.list_all();
    let events_before = emitter.actions().len();

    backend.set_fail_writes(true);

    assert!(matches!(
        store.add_alias("gs", "git status", DEFAULT_GROUP, None),
        Err(AliasStoreError::PersistenceError(_))
    ));
    assert!(matches!(
        store.toggle_alias("ll", DEFAULT_GROUP, true),
        Err(AliasStoreError::PersistenceError(_))
    ));
    assert!(matches!(
        store.rename_group("work", "play"),
        Err(AliasStoreError::PersistenceError(_))
    ));
    assert!(matches!(
        store.delete_group("work", false),
        Err(AliasStoreError::PersistenceError(_))
    ));

    assert_eq!(store.list_all(), before);
    assert_eq!(backend.saved().unwrap(), before);
    assert_eq!(emitter.actions().len(), events_before);

    backend.set_fail_writes(false);
    store.add_alias("gs", "git status", DEFAULT_GROUP, None).unwrap();
    assert!(store.get(DEFAULT_GROUP, "gs").is_some());
}

#[test]
fn test_emitter_receives_one_event_per_mutation() {
    let (store, _backend) = create_test_store();
    let emitter = Arc::new(RecordingEmitter::default());
    let mut store = store.with_emitter(emitter.clone());

    store.add_alias("ll", "ls -la", "work", None).unwrap();
    store.update_alias("ll", "la", "ls -A", "work", None).unwrap();
    store.toggle_alias("la", "work", true).unwrap();
    store.update_alias_description("la", "work", "All").unwrap();
    store.remove_alias("la", "work").unwrap();
    store.create_group("ops").unwrap();
    store.rename_group("ops", "infra").unwrap();
    store.delete_group("infra", true).unwrap();
    // Failed operation emits nothing
    let _ = store.remove_alias("missing", "work");

    assert_eq!(
        emitter.actions(),
        vec![
            AliasAction::Add,
            AliasAction::Update,
            AliasAction::Toggle,
            AliasAction::Describe,
            AliasAction::Remove,
            AliasAction::CreateGroup,
            AliasAction::RenameGroup,
            AliasAction::DeleteGroup,
        ]
    );
    let events = emitter.events.lock();
    assert_eq!(events[1].name.as_deref(), Some("la"));
    assert_eq!(events[6].group, "infra");
}

#[test]
fn test_search_rows() {
    let (mut store, _backend) = create_test_store();
    store.add_alias("gs", "git status", "git", None).unwrap();
    store.add_alias("gp", "git push", "git", None).unwrap();
    store
        .add_alias("ll", "ls -la", DEFAULT_GROUP, Some("listing".to_string()))
        .unwrap();
    store.toggle_alias("gp", "git", true).unwrap();

    let all = store.search(&SearchFilter::default());
    let ids: Vec<&str> = all.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["default-ll", "git-gp", "git-gs"]);
    assert!(!all[1].enabled);

    let by_command = store.search(&SearchFilter {
        term: Some("PUSH".to_string()),
        field: FilterField::Command,
        group: None,
    });
    assert_eq!(by_command.len(), 1);
    assert_eq!(by_command[0].name, "gp");

    let by_description = store.search(&SearchFilter {
        term: Some("listing".to_string()),
        field: FilterField::All,
        group: None,
    });
    assert_eq!(by_description.len(), 1);

    let in_group = store.search(&SearchFilter {
        term: None,
        field: FilterField::All,
        group: Some("git".to_string()),
    });
    assert_eq!(in_group.len(), 2);
}

#[test]
fn test_export_shell_uses_current_state() {
    let (mut store, _backend) = create_test_store();
    store.add_alias("ll", "ls -la", DEFAULT_GROUP, None).unwrap();
    store.add_alias("gs", "git status", DEFAULT_GROUP, None).unwrap();
    store.toggle_alias("gs", DEFAULT_GROUP, true).unwrap();

    let script = store.export_shell();

    assert!(script.contains("\nalias ll='ls -la'\n"));
    assert!(script.contains("# alias gs='git status'  # disabled"));
}

#[test]
fn test_state_persists_across_reload() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("aliases.json");

    let before = {
        let mut store = AliasStore::open(FileBackend::new(config_path.clone())).unwrap();
        store
            .add_alias("ll", "ls -la", DEFAULT_GROUP, Some("Long".to_string()))
            .unwrap();
        store.add_alias("deploy", "./deploy.sh 'prod'", "work", None).unwrap();
        store.toggle_alias("deploy", "work", true).unwrap();
        store.create_group("empty").unwrap();
        store.list_all()
    };

    let store = AliasStore::open(FileBackend::new(config_path)).unwrap();

    assert_eq!(store.list_all(), before);
    assert!(store.get("work", "deploy").unwrap().disabled);
    assert_eq!(
        store.get(DEFAULT_GROUP, "ll").unwrap().description.as_deref(),
        Some("Long")
    );
}

#[test]
fn test_load_restores_missing_default_group() {
    let mut groups = AliasGroups::new();
    let mut work = AliasGroup::new();
    work.insert("ll".to_string(), AliasData::new("ll", "ls -la"));
    groups.insert("work".to_string(), work);

    let store = AliasStore::open(MemoryBackend::with_groups(groups)).unwrap();

    assert_eq!(store.list_group_names(), vec!["default", "work"]);
}

#[test]
fn test_load_uses_map_key_as_alias_name() {
    let mut groups = AliasGroups::new();
    let mut default = AliasGroup::new();
    default.insert("ll".to_string(), AliasData::new("stale", "ls -la"));
    groups.insert(DEFAULT_GROUP.to_string(), default);

    let store = AliasStore::open(MemoryBackend::with_groups(groups)).unwrap();

    assert_eq!(store.get(DEFAULT_GROUP, "ll").unwrap().name, "ll");
}

#[test]
fn test_load_malformed_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("aliases.json");
    std::fs::write(&config_path, "[1, 2, 3]").unwrap();

    let result = AliasStore::open(FileBackend::new(config_path));

    assert!(matches!(result, Err(AliasStoreError::LoadError(_))));
}
