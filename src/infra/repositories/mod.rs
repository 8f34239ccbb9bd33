//! Repository layer - Data access abstraction
//!
//! One trait per aggregate, each backed by a SeaORM store. The query bodies
//! are generic over the connection so the transactional repositories in
//! `unit_of_work` run the exact same statements inside a transaction.

mod customer_repository;
pub(crate) mod entities;
mod order_repository;
mod product_repository;
mod user_repository;

pub use customer_repository::{CustomerRepository, CustomerStore};
pub use order_repository::{OrderRepository, OrderStore};
pub use product_repository::{ProductRepository, ProductStore};
pub use user_repository::{UserRepository, UserStore, DUPLICATE_USERNAME};

pub(crate) use customer_repository::queries as customer_queries;
pub(crate) use order_repository::queries as order_queries;
pub(crate) use user_repository::queries as user_queries;

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use customer_repository::MockCustomerRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use order_repository::MockOrderRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use product_repository::MockProductRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
