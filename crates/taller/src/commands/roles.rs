//! Role command handlers.

use tabled::Tabled;

use taller_core::resource::Roles;
use taller_core::{Console, Role};

use crate::cli::{GlobalOpts, RolesArgs, RolesCommand};
use crate::error::CliError;
use crate::output::{Painter, detail_lines, or_dash};

use super::crud::{self, Present};

#[derive(Tabled)]
pub struct RoleRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Nombre")]
    name: String,
    #[tabled(rename = "Descripción")]
    description: String,
    #[tabled(rename = "Permisos")]
    permissions: String,
}

fn permissions(role: &Role) -> String {
    if role.permissions.is_empty() {
        "-".into()
    } else {
        role.permissions.to_string()
    }
}

impl Present for Roles {
    type Row = RoleRow;

    fn row(r: &Role, _: Painter) -> RoleRow {
        RoleRow {
            id: r.id.to_string(),
            name: r.name.clone(),
            description: or_dash(r.description.as_deref()),
            permissions: permissions(r),
        }
    }

    fn detail(r: &Role, _: Painter) -> String {
        detail_lines(&[
            ("ID", r.id.to_string()),
            ("Nombre", r.name.clone()),
            ("Descripción", or_dash(r.description.as_deref())),
            ("Permisos", permissions(r)),
        ])
    }
}

pub async fn handle(console: &Console, args: RolesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        RolesCommand::List => crud::list::<Roles>(console, global).await,
        RolesCommand::Crud(cmd) => crud::handle::<Roles>(console, cmd, global).await,
    }
}
