// Alias module - grouped shell aliases with validation, persistence and derived stats

mod shell;
mod store;
mod types;
pub mod validation;

pub use shell::{render_aliases, shell_quote};
pub use store::{AliasStore, AliasStoreError};
pub use types::{
    AliasData, AliasGroup, AliasGroups, AliasResponse, AliasRow, DeleteGroupResponse,
    FilterField, GroupInfo, GroupStats, OperationResponse, RenameGroupResponse, RenamedAlias,
    SearchFilter, DEFAULT_GROUP,
};
pub use validation::ValidationError;
