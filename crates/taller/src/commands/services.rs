//! Service catalogue command handlers.

use tabled::Tabled;

use taller_core::resource::Services;
use taller_core::{Console, Service};

use crate::cli::{GlobalOpts, ServicesArgs, ServicesCommand};
use crate::error::CliError;
use crate::output::{self, Painter, detail_lines, money, or_dash};

use super::crud::{self, Present};
use super::util;

#[derive(Tabled)]
pub struct ServiceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Nombre")]
    name: String,
    #[tabled(rename = "Costo")]
    cost: String,
    #[tabled(rename = "Duración")]
    duration: String,
    #[tabled(rename = "Activo")]
    active: String,
}

fn duration(s: &Service) -> String {
    s.duration_minutes
        .map_or_else(|| "-".into(), |m| format!("{m} min"))
}

impl Present for Services {
    type Row = ServiceRow;

    fn row(s: &Service, painter: Painter) -> ServiceRow {
        ServiceRow {
            id: s.id.to_string(),
            name: s.name.clone(),
            cost: money(s.cost),
            duration: duration(s),
            active: painter.flag(s.active),
        }
    }

    fn detail(s: &Service, painter: Painter) -> String {
        detail_lines(&[
            ("ID", s.id.to_string()),
            ("Nombre", s.name.clone()),
            ("Descripción", or_dash(s.description.as_deref())),
            ("Costo", money(s.cost)),
            ("Duración", duration(s)),
            ("Activo", painter.flag(s.active)),
        ])
    }
}

pub async fn handle(console: &Console, args: ServicesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ServicesCommand::List { active } => {
            let mut services = crud::fetch_all::<Services>(console, global).await?;
            if active {
                services.retain(|s| s.active);
            }
            crud::print_list::<Services>(&services, global)
        }

        ServicesCommand::Crud(cmd) => crud::handle::<Services>(console, cmd, global).await,

        ServicesCommand::Toggle { id } => {
            let service = console.toggle_service(util::id(id)).await?;
            if !global.quiet {
                let state = if service.active { "activated" } else { "deactivated" };
                eprintln!("✓ Service {} {state}", service.id);
            }
            crud::print_one::<Services>(&service, global)
        }

        ServicesCommand::Categories => {
            let categories = console.service_categories().await?;
            let out = output::render_single(
                global.output,
                &categories,
                |c| c.join("\n"),
                |c| c.join("\n"),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ServicesCommand::ByVehicle { id } => {
            let services = console.services_for_vehicle(util::id(id)).await?;
            crud::print_list::<Services>(&services, global)
        }
    }
}
