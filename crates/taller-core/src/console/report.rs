// Shop summary for the reports screen.

use serde::Serialize;

use super::Console;
use crate::controller::CrudController;
use crate::error::CoreError;
use crate::model::{InventoryItem, Order, OrderStatus, Payment, StockStatus};
use crate::resource::{Inventory, Orders, Payments};

/// Aggregate figures over orders, payments and stock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Order count per known status, in workflow order.
    pub orders_by_status: Vec<(OrderStatus, usize)>,
    pub total_orders: usize,
    pub payments_count: usize,
    pub payments_total: f64,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

impl Report {
    pub fn compile(orders: &[Order], payments: &[Payment], inventory: &[InventoryItem]) -> Self {
        let orders_by_status = OrderStatus::ALL
            .into_iter()
            .map(|status| {
                let count = orders.iter().filter(|o| o.status == status).count();
                (status, count)
            })
            .collect();

        Self {
            orders_by_status,
            total_orders: orders.len(),
            payments_count: payments.len(),
            payments_total: payments.iter().map(|p| p.amount).sum(),
            low_stock: inventory
                .iter()
                .filter(|i| i.stock_status() == StockStatus::Low)
                .count(),
            out_of_stock: inventory
                .iter()
                .filter(|i| i.stock_status() == StockStatus::OutOfStock)
                .count(),
        }
    }
}

impl Console {
    /// Fetch orders, payments and inventory and summarize them.
    pub async fn report(&self) -> Result<Report, CoreError> {
        let mut orders: CrudController<Orders> = self.controller();
        let mut payments: CrudController<Payments> = self.controller();
        let mut inventory: CrudController<Inventory> = self.controller();
        orders.refresh().await?;
        payments.refresh().await?;
        inventory.refresh().await?;

        Ok(Report::compile(
            &orders.state().items,
            &payments.state().items,
            &inventory.state().items,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityId, PaymentMethod};

    fn order(id: i64, status: OrderStatus) -> Order {
        Order {
            id: EntityId::new(id),
            vehicle_id: None,
            employee_id: None,
            service_id: None,
            entered_on: None,
            left_on: None,
            status,
            notes: None,
            description: None,
        }
    }

    fn payment(amount: f64) -> Payment {
        Payment {
            id: EntityId::new(1),
            order_id: None,
            amount,
            paid_on: None,
            method: PaymentMethod::Cash,
            reference: None,
        }
    }

    fn item(quantity: i64) -> InventoryItem {
        InventoryItem {
            id: EntityId::new(quantity),
            name: "Filtro".into(),
            category: "Filtros".into(),
            quantity,
            unit: "Unidad".into(),
            min_quantity: 3,
            supplier: None,
            price: None,
        }
    }

    #[test]
    fn compile_counts_and_sums() {
        let report = Report::compile(
            &[
                order(1, OrderStatus::Pending),
                order(2, OrderStatus::Pending),
                order(3, OrderStatus::Completed),
            ],
            &[payment(100.0), payment(250.5)],
            &[item(0), item(2), item(10)],
        );
        assert_eq!(report.orders_by_status[0], (OrderStatus::Pending, 2));
        assert_eq!(report.orders_by_status[2], (OrderStatus::Completed, 1));
        assert_eq!(report.total_orders, 3);
        assert!((report.payments_total - 350.5).abs() < 1e-9);
        assert_eq!(report.low_stock, 1);
        assert_eq!(report.out_of_stock, 1);
    }
}
