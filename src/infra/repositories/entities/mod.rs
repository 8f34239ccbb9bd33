//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod customer;
pub mod order;
pub mod product;
pub mod user;

#[allow(unused_imports)]
pub use customer::{ActiveModel as CustomerActiveModel, Entity as CustomerEntity};
#[allow(unused_imports)]
pub use order::{ActiveModel as OrderActiveModel, Entity as OrderEntity};
#[allow(unused_imports)]
pub use product::{ActiveModel as ProductActiveModel, Entity as ProductEntity};
#[allow(unused_imports)]
pub use user::{ActiveModel as UserActiveModel, Entity as UserEntity};
