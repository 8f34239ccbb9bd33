//! Domain layer - Core business entities and logic
//!
//! Identities and roles, customers, products, orders, and the order filter.
//! Nothing here touches the database or HTTP.

pub mod customer;
pub mod filter;
pub mod order;
pub mod password;
pub mod product;
pub mod user;

pub use customer::{Customer, CustomerDraft};
pub use filter::{OrderFilter, OrderFilterQuery};
pub use order::{Order, OrderDraft, OrderStatus, OrderSummary};
pub use password::Password;
pub use product::{Category, NewProduct, Product};
pub use user::{Role, User, UserResponse};
