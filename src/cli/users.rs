//! User registry CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_user_list;
use crate::error::LedgerResult;
use crate::services::{LedgerService, UserService};
use crate::source::open_source;
use crate::storage::Storage;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// List registered users
    List,
    /// Register the users of the current balance table
    Sync,
    /// Show a registered user
    Show {
        /// User name or ID
        user: String,
    },
}

/// Handle a user command
pub fn handle_user_command(
    storage: &Storage,
    settings: &Settings,
    cmd: UserCommands,
) -> LedgerResult<()> {
    let service = UserService::new(storage);

    match cmd {
        UserCommands::List => {
            print!("{}", format_user_list(&service.list()?));
        }
        UserCommands::Sync => {
            let source = open_source(settings, storage.paths())?;
            let balances = LedgerService::new(&*source, settings).list_user_balances()?;
            let result = service.sync(&balances)?;

            println!(
                "Synced {} users ({} new)",
                result.users.len(),
                result.created
            );
        }
        UserCommands::Show { user } => {
            let user = service.get(&user)?;
            let id = user.id.map(|id| id.to_string()).unwrap_or_default();

            println!("Name: {}", user.name);
            println!("ID:   {}", id);
        }
    }

    Ok(())
}
