pub mod transaction_api;

pub use transaction_api::{ RawEstimationData, TransactionApi, TransactionApiResolver, Validator };
