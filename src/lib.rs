pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod rates;
pub mod routes;
pub mod session;
pub mod state;
pub mod upstream;
pub mod views;

pub use routes::app;
pub use state::AppState;
