pub mod allergies;
pub mod auth;
pub mod health;
pub mod inventory;
pub mod recipes;
pub mod recommendations;
pub mod users;
