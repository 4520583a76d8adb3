// Alias commands module
// Plain functions over explicit request types; a UI bridge calls these and
// shows the returned messages. The store is shared behind a mutex so calls
// are serialized.

pub mod aliases;
pub mod requests;

use parking_lot::Mutex;

use crate::aliases::AliasStore;

pub use aliases::to_user_error;
pub use requests::{
    AddAliasRequest, AliasRefRequest, CreateGroupRequest, DeleteGroupRequest, DescriptionRequest,
    GroupInfoRequest, RenameGroupRequest, ToggleAliasRequest, UpdateAliasRequest,
};

/// Type alias for alias store state
pub type AliasStoreState = Mutex<AliasStore>;

/// Wrap a store for sharing with the command boundary
pub fn manage(store: AliasStore) -> AliasStoreState {
    Mutex::new(store)
}
