pub mod app;
pub mod auth;
pub mod bucketing;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod mirror;
pub mod models;
pub mod state;
pub mod storage;
pub mod store;
pub mod ui;
pub mod validation;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::load_data;
pub use store::ClientStore;
