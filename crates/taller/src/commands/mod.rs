//! Command dispatch: bridges CLI args -> core console -> output formatting.

pub mod auth;
pub mod config_cmd;
pub mod crud;
pub mod employees;
pub mod inventory;
pub mod orders;
pub mod payments;
pub mod report;
pub mod roles;
pub mod services;
pub mod users;
pub mod util;
pub mod vehicles;

use taller_core::{Console, Screen};

use crate::cli::{Command, GlobalOpts};
use crate::config::Target;
use crate::error::CliError;

/// Screen a command belongs to, for the permission gate.
fn screen_for(cmd: &Command) -> Option<Screen> {
    Some(match cmd {
        Command::Vehicles(_) => Screen::Vehicles,
        Command::Employees(_) => Screen::Employees,
        Command::Services(_) => Screen::Services,
        Command::Orders(_) => Screen::Orders,
        Command::Payments(_) => Screen::Payments,
        Command::Users(_) => Screen::Users,
        Command::Roles(_) => Screen::Roles,
        Command::Inventory(_) => Screen::Inventory,
        Command::Report => Screen::Reports,
        _ => return None,
    })
}

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    console: &Console,
    target: &Target,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => return auth::login(console, target, args, global).await,
        Command::Logout => {
            auth::logout(console, target, global);
            return Ok(());
        }
        _ => {}
    }

    auth::resume(console, target, global).await?;
    if let Some(screen) = screen_for(&cmd) {
        console.require(screen)?;
    }

    match cmd {
        Command::Whoami => auth::whoami(console, global),
        Command::Screens => auth::screens(console, global),
        Command::Vehicles(args) => vehicles::handle(console, args, global).await,
        Command::Employees(args) => employees::handle(console, args, global).await,
        Command::Services(args) => services::handle(console, args, global).await,
        Command::Orders(args) => orders::handle(console, args, global).await,
        Command::Payments(args) => payments::handle(console, args, global).await,
        Command::Users(args) => users::handle(console, args, global).await,
        Command::Roles(args) => roles::handle(console, args, global).await,
        Command::Inventory(args) => inventory::handle(console, args, global).await,
        Command::Report => report::handle(console, global).await,
        // Handled before a console exists.
        Command::Login(_) | Command::Logout | Command::Config(_) | Command::Completions(_) => {
            Err(CliError::Internal(
                "command does not need a backend session".into(),
            ))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::Cli;

    fn command(args: &[&str]) -> Command {
        let mut argv = vec!["taller"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn resource_commands_are_gated_by_their_screen() {
        assert_eq!(screen_for(&command(&["vehicles", "list"])), Some(Screen::Vehicles));
        assert_eq!(screen_for(&command(&["inventory", "low-stock"])), Some(Screen::Inventory));
        assert_eq!(screen_for(&command(&["employees", "available"])), Some(Screen::Employees));
        assert_eq!(screen_for(&command(&["report"])), Some(Screen::Reports));
    }

    #[test]
    fn session_commands_are_not_gated() {
        assert_eq!(screen_for(&command(&["whoami"])), None);
        assert_eq!(screen_for(&command(&["screens"])), None);
        assert_eq!(screen_for(&command(&["logout"])), None);
    }
}
