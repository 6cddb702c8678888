//! Per-user contextual bandit over recipe categories.
//!
//! The pipeline: pantry items become a [`PantryContext`], recipe titles and
//! tags map onto the [`Category`] taxonomy, feedback becomes a scalar reward,
//! and each user's [`BanditModel`] learns which categories to favor. The
//! [`ModelStore`] persists one model document per user; the [`ModelCache`]
//! keeps hot models in memory and is injected wherever selection or updates
//! happen.

pub mod context;
pub mod model;
pub mod reward;
pub mod store;
pub mod taxonomy;

pub use context::{PantryContext, FEATURE_NAMES};
pub use model::{ArmState, ArmStatistics, BanditConfig, BanditModel, ModelSnapshot};
pub use reward::{
    reward_for, REWARD_COOKED, REWARD_DOWNVOTE, REWARD_SKIP, REWARD_UPVOTE,
};
pub use store::{ModelCache, ModelStore};
pub use taxonomy::Category;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BanditError>;

#[derive(Error, Debug)]
pub enum BanditError {
    #[error("Redis error: {0}")]
    Redis(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<redis::RedisError> for BanditError {
    fn from(e: redis::RedisError) -> Self {
        BanditError::Redis(e.to_string())
    }
}

impl From<serde_json::Error> for BanditError {
    fn from(e: serde_json::Error) -> Self {
        BanditError::Serialization(e.to_string())
    }
}
