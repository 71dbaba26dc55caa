pub mod admin;
pub mod analytics;
pub mod auth;
pub mod cart;
pub mod foods;
pub mod hotels;
pub mod orders;
pub mod payments;
pub mod receipts;
