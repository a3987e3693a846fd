//! Inventory command handlers.

use tabled::Tabled;

use taller_core::resource::Inventory;
use taller_core::{Console, InventoryItem};

use crate::cli::{GlobalOpts, InventoryArgs, InventoryCommand};
use crate::error::CliError;
use crate::output::{self, Painter, detail_lines, or_dash};

use super::crud::{self, Present};
use super::util;

#[derive(Tabled)]
pub struct InventoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Nombre")]
    name: String,
    #[tabled(rename = "Categoría")]
    category: String,
    #[tabled(rename = "Cantidad")]
    quantity: String,
    #[tabled(rename = "Mínimo")]
    min_quantity: i64,
    #[tabled(rename = "Estado")]
    status: String,
    #[tabled(rename = "Proveedor")]
    supplier: String,
    #[tabled(rename = "Precio")]
    price: String,
}

impl Present for Inventory {
    type Row = InventoryRow;

    fn row(i: &InventoryItem, painter: Painter) -> InventoryRow {
        InventoryRow {
            id: i.id.to_string(),
            name: i.name.clone(),
            category: i.category.clone(),
            quantity: format!("{} {}", i.quantity, i.unit),
            min_quantity: i.min_quantity,
            status: painter.stock(i.stock_status()),
            supplier: or_dash(i.supplier.as_deref()),
            price: i.price.map_or_else(|| "-".into(), output::money),
        }
    }

    fn detail(i: &InventoryItem, painter: Painter) -> String {
        detail_lines(&[
            ("ID", i.id.to_string()),
            ("Nombre", i.name.clone()),
            ("Categoría", i.category.clone()),
            ("Cantidad", format!("{} {}", i.quantity, i.unit)),
            ("Mínimo", i.min_quantity.to_string()),
            ("Estado", painter.stock(i.stock_status())),
            ("Proveedor", or_dash(i.supplier.as_deref())),
            ("Precio", i.price.map_or_else(|| "-".into(), output::money)),
        ])
    }
}

pub async fn handle(console: &Console, args: InventoryArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        InventoryCommand::List { restock } => {
            let mut items = crud::fetch_all::<Inventory>(console, global).await?;
            if restock {
                items.retain(InventoryItem::needs_restock);
            }
            crud::print_list::<Inventory>(&items, global)
        }

        InventoryCommand::Crud(cmd) => crud::handle::<Inventory>(console, cmd, global).await,

        InventoryCommand::Adjust { id, delta } => {
            let item = console.adjust_inventory(util::id(id), delta).await?;
            if !global.quiet {
                eprintln!("✓ {} now at {} {}", item.name, item.quantity, item.unit);
            }
            crud::print_one::<Inventory>(&item, global)
        }

        InventoryCommand::LowStock { threshold } => {
            let items = console.low_stock(threshold).await?;
            crud::print_list::<Inventory>(&items, global)
        }

        InventoryCommand::Categories => {
            let categories = console.inventory_categories().await?;
            let out = output::render_single(
                global.output,
                &categories,
                |c| c.join("\n"),
                |c| c.join("\n"),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
