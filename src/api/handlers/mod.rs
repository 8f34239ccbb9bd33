//! HTTP request handlers.

pub mod account_handler;
pub mod customer_handler;
pub mod dashboard_handler;
pub mod order_handler;
pub mod password_reset_handler;
pub mod product_handler;

pub use account_handler::account_routes;
pub use customer_handler::customer_routes;
pub use dashboard_handler::dashboard_routes;
pub use order_handler::order_routes;
pub use password_reset_handler::password_reset_routes;
pub use product_handler::product_routes;
