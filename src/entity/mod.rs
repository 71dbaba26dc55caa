pub mod audit_logs;
pub mod cart_items;
pub mod carts;
pub mod customers;
pub mod foods;
pub mod hotel_owners;
pub mod hotels;
pub mod order_items;
pub mod orders;

pub use audit_logs::Entity as AuditLogs;
pub use cart_items::Entity as CartItems;
pub use carts::Entity as Carts;
pub use customers::Entity as Customers;
pub use foods::Entity as Foods;
pub use hotel_owners::Entity as HotelOwners;
pub use hotels::Entity as Hotels;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
