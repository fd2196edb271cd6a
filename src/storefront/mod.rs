//! Storefront bot: opens the shop mini-app and takes the orders it sends back
//! to admins and couriers.

pub mod commands;
pub mod context;
pub mod handlers;
pub mod intake;
pub mod payload;

pub type HandlerResult = anyhow::Result<()>;

pub use commands::Command;
pub use context::StorefrontContext;
pub use handlers::build_schema;
