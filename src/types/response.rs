//! Page contexts returned by GET handlers in place of rendered templates.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Customer, Order, OrderStatus, Product};

/// Message-only response
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Customer form, empty when adding and prefilled when editing.
#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerFormContext {
    pub customer: Option<Customer>,
}

/// Choices for the single order form.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderFormContext {
    /// The order being edited, absent on create
    pub order: Option<Order>,
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub statuses: Vec<OrderStatus>,
}

/// Blank formset offered for one customer.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderFormsetContext {
    pub customer: Customer,
    pub products: Vec<Product>,
    pub statuses: Vec<OrderStatus>,
    /// Number of empty rows offered
    pub extra: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerDeleteContext {
    pub customer: Customer,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDeleteContext {
    pub item: Order,
}

/// Whether a password reset link may still be used.
#[derive(Debug, Serialize, ToSchema)]
pub struct ResetLinkContext {
    pub validlink: bool,
}
