//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion and reach repositories through a Unit of Work.

mod auth_service;
pub mod container;
mod customer_service;
mod dashboard;
mod order_service;
mod product_service;

pub use container::{ServiceContainer, Services};

pub use auth_service::{AuthService, Authenticator, Claims, PasswordResetLink, TokenResponse};
pub use customer_service::{CustomerManager, CustomerOrders, CustomerService};
pub use dashboard::{CustomerHome, Dashboard};
pub use order_service::{OrderManager, OrderService};
pub use product_service::{ProductManager, ProductService};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use customer_service::MockCustomerService;
#[cfg(any(test, feature = "test-utils"))]
pub use order_service::MockOrderService;
#[cfg(any(test, feature = "test-utils"))]
pub use product_service::MockProductService;
