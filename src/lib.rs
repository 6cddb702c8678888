pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{AppError, Result};
pub use services::bandit::{BanditModel, Category, ModelCache, PantryContext};
pub use services::recommendation::Recommender;
