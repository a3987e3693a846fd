//! Shop summary for the reports screen.

use taller_core::{Console, Report};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, Painter, detail_lines, money};

fn render(report: &Report, painter: Painter) -> String {
    let mut pairs: Vec<(&str, String)> = vec![("Órdenes", report.total_orders.to_string())];
    for (status, count) in &report.orders_by_status {
        pairs.push((status.label(), count.to_string()));
    }
    pairs.push(("Pagos", report.payments_count.to_string()));
    pairs.push(("Total cobrado", money(report.payments_total)));
    pairs.push(("Bajo stock", report.low_stock.to_string()));
    pairs.push(("Agotados", report.out_of_stock.to_string()));

    let mut out = detail_lines(&pairs);
    if report.out_of_stock > 0 {
        out.push('\n');
        out.push_str(&painter.stock(taller_core::StockStatus::OutOfStock));
        out.push_str(": run `taller inventory list --restock`");
    }
    out
}

pub async fn handle(console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    let bar = output::spinner("Compiling report", global.quiet);
    let result = console.report().await;
    bar.finish_and_clear();
    let report = result?;

    let painter = Painter::new(global.color);
    let out = output::render_single(
        global.output,
        &report,
        |r| render(r, painter),
        |r| r.total_orders.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ColorMode;
    use taller_core::OrderStatus;

    #[test]
    fn summary_lists_every_status() {
        let report = Report {
            orders_by_status: OrderStatus::ALL.into_iter().zip([2, 1, 0, 0]).collect(),
            total_orders: 3,
            payments_count: 1,
            payments_total: 150.5,
            low_stock: 1,
            out_of_stock: 0,
        };
        let out = render(&report, Painter::new(ColorMode::Never));
        assert!(out.contains("Pendiente"));
        assert!(out.contains("Cancelado"));
        assert!(out.contains("150.50"));
        assert!(!out.contains("--restock"));
    }
}
