//! User account command handlers.

use tabled::Tabled;

use taller_core::resource::Users;
use taller_core::{Console, User};

use crate::cli::{GlobalOpts, UsersArgs, UsersCommand};
use crate::error::CliError;
use crate::output::{Painter, detail_lines, or_dash};

use super::crud::{self, Present};
use super::util;

#[derive(Tabled)]
pub struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Usuario")]
    username: String,
    #[tabled(rename = "Rol")]
    role: String,
    #[tabled(rename = "Empleado")]
    employee: String,
    #[tabled(rename = "Activo")]
    active: String,
}

impl Present for Users {
    type Row = UserRow;

    fn row(u: &User, painter: Painter) -> UserRow {
        UserRow {
            id: u.id.to_string(),
            username: u.username.clone(),
            role: or_dash(u.role_id),
            employee: or_dash(u.employee_id),
            active: painter.flag(u.active),
        }
    }

    fn detail(u: &User, painter: Painter) -> String {
        detail_lines(&[
            ("ID", u.id.to_string()),
            ("Usuario", u.username.clone()),
            ("Rol", or_dash(u.role_id)),
            ("Empleado", or_dash(u.employee_id)),
            ("Activo", painter.flag(u.active)),
        ])
    }
}

pub async fn handle(console: &Console, args: UsersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        UsersCommand::List => crud::list::<Users>(console, global).await,

        UsersCommand::Crud(cmd) => crud::handle::<Users>(console, cmd, global).await,

        UsersCommand::Toggle { id } => {
            let user = console.toggle_user(util::id(id)).await?;
            if !global.quiet {
                let state = if user.active { "enabled" } else { "disabled" };
                eprintln!("✓ User {} {state}", user.username);
            }
            crud::print_one::<Users>(&user, global)
        }

        UsersCommand::SetPassword { id } => {
            let password = util::prompt_secret("New password")?;
            let confirmation = util::prompt_secret("Repeat password")?;
            console
                .set_user_password(util::id(id), &password, &confirmation)
                .await?;
            if !global.quiet {
                eprintln!("✓ Password updated for user {id}");
            }
            Ok(())
        }
    }
}
