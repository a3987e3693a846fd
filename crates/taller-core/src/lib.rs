// taller-core: CRUD controllers, session and navigation between taller-api and the CLI.

pub mod config;
pub mod console;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;
pub mod permissions;
pub mod resource;
pub mod service;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ConsoleConfig, TlsVerification};
pub use console::{Console, Report};
pub use controller::{ControllerState, CrudController};
pub use error::CoreError;
pub use permissions::{Capability, PermissionSet, Screen, can_access, navigable_screens};
pub use resource::{Draft, Resource};
pub use service::{ApiService, ListParams, ResourceService};
pub use session::{Identity, Session};

pub use model::{
    Employee, EntityId, InventoryItem, MaintenanceEntry, MaintenanceFilter, Order, OrderDetail,
    OrderFilter, OrderStatus, Payment, PaymentMethod, Role, Service, StockStatus, User, Vehicle,
};
