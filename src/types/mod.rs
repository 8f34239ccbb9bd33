//! Response payloads shared by handlers.

mod response;

pub use response::{
    CustomerDeleteContext, CustomerFormContext, MessageResponse, OrderDeleteContext,
    OrderFormContext, OrderFormsetContext, ResetLinkContext,
};
