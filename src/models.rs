pub mod auth;
pub mod production;
pub mod recipe;
pub mod report;
pub mod stock;
