pub mod config;
pub mod credentials;
pub mod error;
pub mod routes;
pub mod state;
pub mod token;
