pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::{ApiConfig, ApiOverrides, StoreConfig};
pub use error::{ErrorKind, OpsError};
