//! Work order command handlers, including the order's service lines.

use tabled::Tabled;

use taller_core::resource::Orders;
use taller_core::{Console, Order, OrderDetail, OrderFilter};

use crate::cli::{GlobalOpts, OrdersArgs, OrdersCommand};
use crate::error::CliError;
use crate::output::{self, Painter, detail_lines, or_dash};

use super::crud::{self, Present};
use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct OrderRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Vehículo")]
    vehicle: String,
    #[tabled(rename = "Empleado")]
    employee: String,
    #[tabled(rename = "Servicio")]
    service: String,
    #[tabled(rename = "Ingreso")]
    entered: String,
    #[tabled(rename = "Salida")]
    left: String,
    #[tabled(rename = "Estado")]
    status: String,
    #[tabled(rename = "Observaciones")]
    notes: String,
}

impl Present for Orders {
    type Row = OrderRow;

    fn row(o: &Order, painter: Painter) -> OrderRow {
        OrderRow {
            id: o.id.to_string(),
            vehicle: or_dash(o.vehicle_id),
            employee: or_dash(o.employee_id),
            service: or_dash(o.service_id),
            entered: or_dash(o.entered_on),
            left: or_dash(o.left_on),
            status: painter.order_status(&o.status),
            notes: or_dash(o.notes.as_deref()),
        }
    }

    fn detail(o: &Order, painter: Painter) -> String {
        detail_lines(&[
            ("ID", o.id.to_string()),
            ("Vehículo", or_dash(o.vehicle_id)),
            ("Empleado", or_dash(o.employee_id)),
            ("Servicio", or_dash(o.service_id)),
            ("Ingreso", or_dash(o.entered_on)),
            ("Salida", or_dash(o.left_on)),
            ("Estado", painter.order_status(&o.status)),
            ("Descripción", or_dash(o.description.as_deref())),
            ("Observaciones", or_dash(o.notes.as_deref())),
        ])
    }
}

#[derive(Tabled)]
struct DetailRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Servicio")]
    service: String,
    #[tabled(rename = "Cantidad")]
    quantity: i64,
    #[tabled(rename = "Precio")]
    unit_price: String,
    #[tabled(rename = "Subtotal")]
    subtotal: String,
}

fn detail_row(d: &OrderDetail) -> DetailRow {
    DetailRow {
        id: d.id.to_string(),
        service: or_dash(d.service_id),
        quantity: d.quantity,
        unit_price: d.unit_price.map_or_else(|| "-".into(), output::money),
        subtotal: d.subtotal.map_or_else(|| "-".into(), output::money),
    }
}

fn print_details(details: &[OrderDetail], global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(global.output, details, detail_row, |d| d.id.to_string())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Echo a written line item, or just acknowledge when the backend sent
/// no body back.
fn report_detail(written: Option<OrderDetail>, verb: &str, global: &GlobalOpts) -> Result<(), CliError> {
    if !global.quiet {
        eprintln!("✓ {verb} order detail");
    }
    match written {
        Some(detail) => print_details(std::slice::from_ref(&detail), global),
        None => Ok(()),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(console: &Console, args: OrdersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        OrdersCommand::List {
            search,
            status,
            range,
        } => {
            let filter = OrderFilter {
                search,
                status: util::parse_status(status.as_deref())?,
                from: util::parse_date("from", range.from.as_deref())?,
                to: util::parse_date("to", range.to.as_deref())?,
            };
            let orders = crud::fetch_all::<Orders>(console, global).await?;
            let shown: Vec<Order> = filter.apply(&orders).into_iter().cloned().collect();
            crud::print_list::<Orders>(&shown, global)
        }

        OrdersCommand::Crud(cmd) => crud::handle::<Orders>(console, cmd, global).await,

        OrdersCommand::Details { id } => {
            let details = console.order_details(util::id(id)).await?;
            print_details(&details, global)
        }

        OrdersCommand::AddDetail {
            order,
            service,
            quantity,
            price,
        } => {
            let written = console
                .add_order_detail(util::id(order), util::id(service), quantity, price)
                .await?;
            report_detail(written, "Added", global)
        }

        OrdersCommand::UpdateDetail {
            order,
            detail,
            service,
            quantity,
            price,
        } => {
            let written = console
                .update_order_detail(util::id(order), util::id(detail), util::id(service), quantity, price)
                .await?;
            report_detail(written, "Updated", global)
        }

        OrdersCommand::RemoveDetail { order, detail } => {
            let approved = util::confirm(
                &format!("Remove detail {detail} from order {order}?"),
                "remove order detail",
                global.yes,
            )?;
            if !approved {
                if !global.quiet {
                    eprintln!("Nothing removed");
                }
                return Ok(());
            }
            console
                .remove_order_detail(util::id(order), util::id(detail))
                .await?;
            if !global.quiet {
                eprintln!("✓ Removed detail {detail} from order {order}");
            }
            Ok(())
        }
    }
}
