//! Vehicle command handlers.

use tabled::Tabled;

use taller_core::resource::Vehicles;
use taller_core::{Console, MaintenanceEntry, MaintenanceFilter, Vehicle};

use crate::cli::{GlobalOpts, VehiclesArgs, VehiclesCommand};
use crate::error::CliError;
use crate::output::{self, Painter, detail_lines, or_dash};

use super::crud::{self, Present};
use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct VehicleRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Placa")]
    plate: String,
    #[tabled(rename = "Marca")]
    make: String,
    #[tabled(rename = "Modelo")]
    model: String,
    #[tabled(rename = "Año")]
    year: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Tipo")]
    kind: String,
    #[tabled(rename = "Cliente")]
    owner: String,
}

impl Present for Vehicles {
    type Row = VehicleRow;

    fn row(v: &Vehicle, _: Painter) -> VehicleRow {
        VehicleRow {
            id: v.id.to_string(),
            plate: v.plate.clone(),
            make: v.make.clone(),
            model: v.model.clone(),
            year: or_dash(v.year),
            color: or_dash(v.color.as_deref()),
            kind: or_dash(v.kind.as_deref()),
            owner: or_dash(v.owner_id),
        }
    }

    fn detail(v: &Vehicle, _: Painter) -> String {
        detail_lines(&[
            ("ID", v.id.to_string()),
            ("Vehículo", v.label()),
            ("Año", or_dash(v.year)),
            ("Color", or_dash(v.color.as_deref())),
            ("Tipo", or_dash(v.kind.as_deref())),
            ("Cliente", or_dash(v.owner_id)),
        ])
    }
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Fecha")]
    date: String,
    #[tabled(rename = "Tipo")]
    kind: String,
    #[tabled(rename = "Costo")]
    cost: String,
    #[tabled(rename = "Estado")]
    status: String,
    #[tabled(rename = "Detalles")]
    details: String,
}

fn history_row(e: &MaintenanceEntry, painter: Painter) -> HistoryRow {
    HistoryRow {
        id: e.id.to_string(),
        date: or_dash(e.date),
        kind: e.kind.clone(),
        cost: e.cost.map_or_else(|| "-".into(), output::money),
        status: painter.order_status(&e.status),
        details: or_dash(e.details.as_deref()),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(console: &Console, args: VehiclesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        VehiclesCommand::List => crud::list::<Vehicles>(console, global).await,

        VehiclesCommand::Crud(cmd) => crud::handle::<Vehicles>(console, cmd, global).await,

        VehiclesCommand::History { id, status, range } => {
            let filter = MaintenanceFilter {
                vehicle: None,
                status: util::parse_status(status.as_deref())?,
                from: util::parse_date("from", range.from.as_deref())?,
                to: util::parse_date("to", range.to.as_deref())?,
            };
            let entries = console.vehicle_history(util::id(id), &filter).await?;
            let painter = Painter::new(global.color);
            let out = output::render_list(
                global.output,
                &entries,
                |e| history_row(e, painter),
                |e| e.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
