pub mod commands;
pub mod context;
pub mod handlers;
pub mod replies;

pub type HandlerResult = anyhow::Result<()>;

pub use commands::Command;
pub use context::AppContext;
pub use handlers::build_schema;
