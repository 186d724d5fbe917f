pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{AppConfig, LogFormat};
pub use error::AppError;
pub use routes::router;
pub use state::{AppState, SharedState};
