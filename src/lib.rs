pub mod config;
pub mod enums;
pub mod error;
pub mod providers;
pub mod estimations;
pub mod tx_service;
pub mod api;

pub use config::Config;
pub use enums::Chain;
pub use error::{ AppError, Result };
