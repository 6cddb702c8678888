pub mod bandit;
pub mod inventory;
pub mod recipes;
pub mod recommendation;
pub mod scoring;
