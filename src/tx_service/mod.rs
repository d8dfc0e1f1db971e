pub mod client;
pub mod manager;

pub use client::HttpTransactionApi;
pub use manager::TransactionApiManager;
