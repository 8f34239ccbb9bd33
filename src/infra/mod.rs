//! Infrastructure layer - External systems integration
//!
//! Database connection, migrations, repositories, and the Unit of Work
//! that ties repositories to transactions.

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    CustomerRepository, CustomerStore, OrderRepository, OrderStore, ProductRepository,
    ProductStore, UserRepository, UserStore,
};
pub use unit_of_work::{
    Persistence, TransactionContext, TxCustomerRepository, TxOrderRepository, TxUserRepository,
    UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockCustomerRepository, MockOrderRepository, MockProductRepository, MockUserRepository,
};
