// Resource-specific operations beyond plain CRUD.

use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use taller_api::models::{
    InventoryRecord, OrderDetailPayload, ServiceRecord, UserRecord,
};
use taller_api::resources::{INVENTORY, SERVICES, USERS};

use super::Console;
use crate::error::CoreError;
use crate::model::{
    Employee, EntityId, InventoryItem, MaintenanceEntry, MaintenanceFilter, Order, OrderDetail,
    Payment, Service, User,
};
use crate::resource::{PaymentDraft, Payments, Resource, check_password};

fn not_found(kind: &str, id: EntityId) -> impl FnOnce(taller_api::Error) -> CoreError + '_ {
    move |e| {
        if e.is_not_found() {
            CoreError::NotFound {
                entity_type: kind.to_owned(),
                identifier: id.to_string(),
            }
        } else {
            e.into()
        }
    }
}

impl Console {
    // ── Vehicles ─────────────────────────────────────────────────────

    /// Maintenance history of a vehicle, narrowed by `filter`.
    pub async fn vehicle_history(
        &self,
        vehicle: EntityId,
        filter: &MaintenanceFilter,
    ) -> Result<Vec<MaintenanceEntry>, CoreError> {
        let records = self
            .client
            .vehicle_maintenance(vehicle.get())
            .await
            .map_err(not_found("Vehicle", vehicle))?;
        Ok(filter.apply(records.into_iter().map(Into::into).collect()))
    }

    // ── Employees ────────────────────────────────────────────────────

    pub async fn employee_assignments(&self, employee: EntityId) -> Result<Vec<Order>, CoreError> {
        let records = self
            .client
            .employee_assignments(employee.get())
            .await
            .map_err(not_found("Employee", employee))?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    pub async fn available_employees(&self) -> Result<Vec<Employee>, CoreError> {
        let records = self.client.available_employees().await?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    // ── Services ─────────────────────────────────────────────────────

    /// Flip a service between active and inactive. Returns it as stored
    /// after the change.
    pub async fn toggle_service(&self, id: EntityId) -> Result<Service, CoreError> {
        let record: ServiceRecord = self
            .client
            .get_record(SERVICES, id.get())
            .await
            .map_err(not_found("Service", id))?;
        let mut service = Service::from(record);
        service.active = !service.active;
        self.client.set_service_status(id.get(), service.active).await?;
        info!(%id, active = service.active, "service status changed");
        Ok(service)
    }

    pub async fn service_categories(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.client.service_categories().await?)
    }

    pub async fn services_for_vehicle(&self, vehicle: EntityId) -> Result<Vec<Service>, CoreError> {
        let records = self
            .client
            .services_for_vehicle(vehicle.get())
            .await
            .map_err(not_found("Vehicle", vehicle))?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    // ── Orders ───────────────────────────────────────────────────────

    pub async fn order_details(&self, order: EntityId) -> Result<Vec<OrderDetail>, CoreError> {
        let records = self
            .client
            .order_details(order.get())
            .await
            .map_err(not_found("Order", order))?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Add a service line to an order.
    pub async fn add_order_detail(
        &self,
        order: EntityId,
        service: EntityId,
        quantity: i64,
        unit_price: Option<f64>,
    ) -> Result<Option<OrderDetail>, CoreError> {
        let payload = detail_payload(service, quantity, unit_price)?;
        let created = self
            .client
            .add_order_detail(order.get(), &payload)
            .await
            .map_err(not_found("Order", order))?;
        Ok(created.map(Into::into))
    }

    pub async fn update_order_detail(
        &self,
        order: EntityId,
        detail: EntityId,
        service: EntityId,
        quantity: i64,
        unit_price: Option<f64>,
    ) -> Result<Option<OrderDetail>, CoreError> {
        let payload = detail_payload(service, quantity, unit_price)?;
        let updated = self
            .client
            .update_order_detail(order.get(), detail.get(), &payload)
            .await
            .map_err(not_found("Order detail", detail))?;
        Ok(updated.map(Into::into))
    }

    pub async fn remove_order_detail(&self, order: EntityId, detail: EntityId) -> Result<(), CoreError> {
        self.client
            .remove_order_detail(order.get(), detail.get())
            .await
            .map_err(not_found("Order detail", detail))
    }

    // ── Payments ─────────────────────────────────────────────────────

    pub async fn payments_for_order(&self, order: EntityId) -> Result<Vec<Payment>, CoreError> {
        let records = self
            .client
            .payments_for_order(order.get())
            .await
            .map_err(not_found("Order", order))?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Register and settle a payment in one call. The draft goes through
    /// the same validation as a regular payment form.
    pub async fn process_payment(&self, draft: &PaymentDraft) -> Result<Option<Payment>, CoreError> {
        let missing = crate::resource::Draft::missing(draft, Payments::REQUIRED_FIELDS);
        if !missing.is_empty() {
            return Err(CoreError::validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }
        let payload = Payments::to_payload(draft, None)?;
        let processed = self.client.process_payment(&payload).await?;
        Ok(processed.map(Into::into))
    }

    // ── Users ────────────────────────────────────────────────────────

    /// Activate or deactivate an account. Returns it as stored after the
    /// change.
    pub async fn toggle_user(&self, id: EntityId) -> Result<User, CoreError> {
        let record: UserRecord = self
            .client
            .get_record(USERS, id.get())
            .await
            .map_err(not_found("User", id))?;
        let mut user = User::from(record);
        user.active = !user.active;
        self.client.set_user_status(id.get(), user.active).await?;
        info!(%id, active = user.active, "user status changed");
        Ok(user)
    }

    pub async fn set_user_password(
        &self,
        id: EntityId,
        password: &SecretString,
        confirmation: &SecretString,
    ) -> Result<(), CoreError> {
        check_password(password.expose_secret(), confirmation.expose_secret())?;
        self.client
            .set_user_password(id.get(), password)
            .await
            .map_err(not_found("User", id))
    }

    // ── Inventory ────────────────────────────────────────────────────

    /// Add `delta` units (negative to consume). The result may not drop
    /// below zero.
    pub async fn adjust_inventory(&self, id: EntityId, delta: i64) -> Result<InventoryItem, CoreError> {
        let record: InventoryRecord = self
            .client
            .get_record(INVENTORY, id.get())
            .await
            .map_err(not_found("Inventory item", id))?;
        let mut item = InventoryItem::from(record);
        let quantity = item.quantity.checked_add(delta).filter(|q| *q >= 0).ok_or_else(|| {
            CoreError::validation(format!(
                "quantity: only {} {} in stock",
                item.quantity, item.unit
            ))
        })?;
        self.client.set_inventory_quantity(id.get(), quantity).await?;
        info!(%id, from = item.quantity, to = quantity, "inventory adjusted");
        item.quantity = quantity;
        Ok(item)
    }

    /// Items at or below `threshold` units.
    pub async fn low_stock(&self, threshold: i64) -> Result<Vec<InventoryItem>, CoreError> {
        let records = self.client.low_stock(threshold).await?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    pub async fn inventory_categories(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.client.inventory_categories().await?)
    }
}

fn detail_payload(
    service: EntityId,
    quantity: i64,
    unit_price: Option<f64>,
) -> Result<OrderDetailPayload, CoreError> {
    if quantity < 1 {
        return Err(CoreError::validation("cantidad: at least 1"));
    }
    if unit_price.is_some_and(|p| !p.is_finite() || p < 0.0) {
        return Err(CoreError::validation("precioUnitario: must not be negative"));
    }
    Ok(OrderDetailPayload {
        id_servicio: service.get(),
        cantidad: quantity,
        precio_unitario: unit_price,
    })
}
