// taller-api: Async Rust client for the maintenance-shop REST backend

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod resources;
pub mod transport;

pub use auth::{LoginResponse, TokenSlot};
pub use client::ApiClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
