pub mod app;
pub mod config;
pub mod errors;
pub mod gateways;
pub mod habits;
pub mod handlers;
pub mod history;
pub mod models;
pub mod report;
pub mod session;
pub mod state;
pub mod tarot_gate;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use session::SessionContext;
pub use state::AppState;
