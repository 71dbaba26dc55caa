pub mod admin_service;
pub mod analytics_service;
pub mod auth_service;
pub mod cart_service;
pub mod filters;
pub mod food_service;
pub mod hotel_service;
pub mod order_service;
pub mod payment_service;
pub mod receipt_service;
