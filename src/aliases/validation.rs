// Input validation for alias names, group names and commands

use regex::Regex;
use std::sync::LazyLock;

pub const MAX_ALIAS_NAME_LEN: usize = 50;
pub const MAX_GROUP_NAME_LEN: usize = 30;
pub const MAX_COMMAND_LEN: usize = 1000;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("identifier pattern is valid"));

/// Reasons an alias, group or command is rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Alias name cannot be empty")]
    EmptyAliasName,
    #[error("Alias name '{name}' is longer than {max} characters")]
    AliasNameTooLong { name: String, max: usize },
    #[error("Alias name '{0}' may only contain letters, digits, '_' and '-'")]
    InvalidAliasName(String),
    #[error("Alias name '{0}' cannot start with a digit")]
    AliasNameStartsWithDigit(String),
    #[error("Group name cannot be empty")]
    EmptyGroupName,
    #[error("Group name '{name}' is longer than {max} characters")]
    GroupNameTooLong { name: String, max: usize },
    #[error("Group name '{0}' may only contain letters, digits, '_' and '-'")]
    InvalidGroupName(String),
    #[error("Command cannot be empty")]
    EmptyCommand,
    #[error("Command is {len} characters long, the limit is {max}")]
    CommandTooLong { len: usize, max: usize },
}

pub fn validate_alias_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyAliasName);
    }
    if !IDENTIFIER.is_match(name) {
        return Err(ValidationError::InvalidAliasName(name.to_string()));
    }
    if name.len() > MAX_ALIAS_NAME_LEN {
        return Err(ValidationError::AliasNameTooLong {
            name: name.to_string(),
            max: MAX_ALIAS_NAME_LEN,
        });
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(ValidationError::AliasNameStartsWithDigit(name.to_string()));
    }
    Ok(())
}

pub fn validate_group_name(group: &str) -> Result<(), ValidationError> {
    if group.is_empty() {
        return Err(ValidationError::EmptyGroupName);
    }
    if !IDENTIFIER.is_match(group) {
        return Err(ValidationError::InvalidGroupName(group.to_string()));
    }
    // Charset is ASCII-only here, so byte length equals character count
    if group.len() > MAX_GROUP_NAME_LEN {
        return Err(ValidationError::GroupNameTooLong {
            name: group.to_string(),
            max: MAX_GROUP_NAME_LEN,
        });
    }
    Ok(())
}

pub fn validate_command(command: &str) -> Result<(), ValidationError> {
    if command.is_empty() {
        return Err(ValidationError::EmptyCommand);
    }
    let len = command.chars().count();
    if len > MAX_COMMAND_LEN {
        return Err(ValidationError::CommandTooLong {
            len,
            max: MAX_COMMAND_LEN,
        });
    }
    Ok(())
}

/// Validate the full triple accepted by add and update
pub fn validate_alias(name: &str, command: &str, group: &str) -> Result<(), ValidationError> {
    validate_alias_name(name)?;
    validate_group_name(group)?;
    validate_command(command)
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
