// ── Domain model ──
//
// Canonical, normalized representation of every backend entity. Wire
// quirks (per-table id names, duration labels, permission JSON strings)
// are resolved in `convert`; nothing here knows about them.

pub mod employee;
pub mod entity_id;
pub mod inventory;
pub mod maintenance;
pub mod order;
pub mod payment;
pub mod role;
pub mod service;
pub mod user;
pub mod vehicle;

// ── Re-exports ──────────────────────────────────────────────────────

pub use employee::Employee;
pub use entity_id::EntityId;
pub use inventory::{InventoryItem, StockStatus};
pub use maintenance::{MaintenanceEntry, MaintenanceFilter};
pub use order::{Order, OrderDetail, OrderFilter, OrderStatus};
pub use payment::{Payment, PaymentMethod};
pub use role::Role;
pub use service::Service;
pub use user::User;
pub use vehicle::Vehicle;
