// Command-line entry point for the alias store
// Exclude entire file from coverage - binary entry point is exercised through the library tests
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aliasdeck_lib::aliases::{AliasStore, FilterField, SearchFilter, DEFAULT_GROUP};
use aliasdeck_lib::commands::{self, aliases as ops, AliasStoreState};
use aliasdeck_lib::events::LogEventEmitter;
use aliasdeck_lib::storage::FileBackend;

#[derive(Parser)]
#[command(name = "aliasdeck")]
#[command(about = "Manage grouped shell aliases")]
struct Cli {
    /// Alias file to use instead of the default config location
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every group with its aliases
    List,
    /// Print group names
    Groups,
    /// Print per-group alias counts
    Stats,
    /// Add an alias
    Add {
        name: String,
        command: String,
        #[arg(short, long, default_value = DEFAULT_GROUP)]
        group: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Rename an alias and/or replace its command
    Update {
        old_name: String,
        new_name: String,
        command: String,
        #[arg(short, long, default_value = DEFAULT_GROUP)]
        group: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete an alias
    Remove {
        name: String,
        #[arg(short, long, default_value = DEFAULT_GROUP)]
        group: String,
    },
    /// Enable an alias
    Enable {
        name: String,
        #[arg(short, long, default_value = DEFAULT_GROUP)]
        group: String,
    },
    /// Disable an alias without deleting it
    Disable {
        name: String,
        #[arg(short, long, default_value = DEFAULT_GROUP)]
        group: String,
    },
    /// Set an alias description (empty string clears it)
    Describe {
        name: String,
        description: String,
        #[arg(short, long, default_value = DEFAULT_GROUP)]
        group: String,
    },
    /// Group management
    #[command(subcommand)]
    Group(GroupCommands),
    /// Search aliases
    Search {
        term: Option<String>,
        /// Field to match: all, name, command or group
        #[arg(long, default_value = "all")]
        field: FilterField,
        #[arg(short, long)]
        group: Option<String>,
    },
    /// Write aliases as a sourceable shell script
    Export {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum GroupCommands {
    /// Create an empty group
    Create { name: String },
    /// Rename a group
    Rename { old_name: String, new_name: String },
    /// Delete a group, moving its aliases to the default group unless --delete-aliases
    Delete {
        name: String,
        #[arg(long)]
        delete_aliases: bool,
    },
    /// Show a group's aliases and counts
    Info { name: String },
}

/// Initialize tracing on stderr so stdout stays clean for command output
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "aliasdeck=info,aliasdeck_lib=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn open_store(file: Option<PathBuf>) -> anyhow::Result<AliasStoreState> {
    let backend = match file {
        Some(path) => FileBackend::new(path),
        None => FileBackend::with_default_path()?,
    };
    log::debug!("Using alias file {}", backend.path().display());
    let store = AliasStore::open(backend)
        .map_err(|e| anyhow::anyhow!(commands::to_user_error(e)))?
        .with_emitter(Arc::new(LogEventEmitter));
    Ok(commands::manage(store))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let state = open_store(cli.file)?;
    let fail = |message: String| anyhow::anyhow!(message);

    match cli.command {
        Commands::List => print_json(&ops::list_all_aliases_impl(&state)),
        Commands::Groups => print_json(&ops::get_groups_impl(&state)),
        Commands::Stats => print_json(&ops::get_groups_stats_impl(&state)),
        Commands::Add {
            name,
            command,
            group,
            description,
        } => {
            let request = commands::AddAliasRequest {
                name,
                command,
                group,
                description,
            };
            print_json(&ops::add_alias_impl(&state, request).map_err(fail)?)
        }
        Commands::Update {
            old_name,
            new_name,
            command,
            group,
            description,
        } => {
            let request = commands::UpdateAliasRequest {
                old_name,
                new_name,
                command,
                group,
                description,
            };
            print_json(&ops::update_alias_impl(&state, request).map_err(fail)?)
        }
        Commands::Remove { name, group } => {
            let request = commands::AliasRefRequest { name, group };
            print_json(&ops::remove_alias_impl(&state, request).map_err(fail)?)
        }
        Commands::Enable { name, group } => {
            let request = commands::ToggleAliasRequest {
                name,
                group,
                disabled: false,
            };
            print_json(&ops::toggle_alias_impl(&state, request).map_err(fail)?)
        }
        Commands::Disable { name, group } => {
            let request = commands::ToggleAliasRequest {
                name,
                group,
                disabled: true,
            };
            print_json(&ops::toggle_alias_impl(&state, request).map_err(fail)?)
        }
        Commands::Describe {
            name,
            description,
            group,
        } => {
            let request = commands::DescriptionRequest {
                name,
                group,
                description,
            };
            print_json(&ops::update_alias_description_impl(&state, request).map_err(fail)?)
        }
        Commands::Group(GroupCommands::Create { name }) => {
            let request = commands::CreateGroupRequest { group_name: name };
            print_json(&ops::create_group_impl(&state, request).map_err(fail)?)
        }
        Commands::Group(GroupCommands::Rename { old_name, new_name }) => {
            let request = commands::RenameGroupRequest { old_name, new_name };
            print_json(&ops::rename_group_impl(&state, request).map_err(fail)?)
        }
        Commands::Group(GroupCommands::Delete {
            name,
            delete_aliases,
        }) => {
            let request = commands::DeleteGroupRequest {
                group_name: name,
                delete_aliases,
            };
            print_json(&ops::delete_group_impl(&state, request).map_err(fail)?)
        }
        Commands::Group(GroupCommands::Info { name }) => {
            let request = commands::GroupInfoRequest { group_name: name };
            print_json(&ops::get_group_info_impl(&state, request).map_err(fail)?)
        }
        Commands::Search { term, field, group } => {
            let filter = SearchFilter { term, field, group };
            print_json(&ops::search_aliases_impl(&state, filter))
        }
        Commands::Export { output } => {
            let script = ops::export_shell_impl(&state);
            match output {
                Some(path) => {
                    std::fs::write(&path, script)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    log::info!("Exported aliases to {}", path.display());
                }
                None => print!("{}", script),
            }
            Ok(())
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();
    run(cli)
}
