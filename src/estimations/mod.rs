pub mod entities;
pub mod repository;
pub mod validator;

pub use entities::{ Estimation, EstimationParams, EstimationRequest };
pub use repository::EstimationsRepository;
pub use validator::EstimationsValidator;
