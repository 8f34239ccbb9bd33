//! OpenAPI documentation configuration.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    account_handler, customer_handler, dashboard_handler, order_handler, password_reset_handler,
    product_handler,
};
use crate::domain::{
    Category, Customer, Order, OrderFilter, OrderStatus, OrderSummary, Product, Role, UserResponse,
};
use crate::forms::{
    CustomerForm, LoginForm, OrderForm, OrderFormset, OrderFormsetRow, PasswordResetForm,
    RegisterForm, SetPasswordForm,
};
use crate::services::{CustomerHome, CustomerOrders, Dashboard, TokenResponse};
use crate::types::{
    CustomerDeleteContext, CustomerFormContext, MessageResponse, OrderDeleteContext,
    OrderFormContext, OrderFormsetContext, ResetLinkContext,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Order Desk",
        version = "0.1.0",
        description = "Customer, product and order management with admin and customer roles"
    ),
    servers((url = "http://localhost:3000", description = "Local development server")),
    paths(
        account_handler::register,
        account_handler::login,
        account_handler::logout,
        dashboard_handler::home,
        dashboard_handler::user_page,
        dashboard_handler::profile,
        dashboard_handler::update_profile,
        product_handler::list_products,
        customer_handler::customer_detail,
        customer_handler::add_customer_form,
        customer_handler::add_customer,
        customer_handler::confirm_delete_customer,
        customer_handler::delete_customer,
        order_handler::create_order_form,
        order_handler::create_order,
        order_handler::update_order_form,
        order_handler::update_order,
        order_handler::confirm_delete_order,
        order_handler::delete_order,
        order_handler::order_formset,
        order_handler::place_orders,
        password_reset_handler::request_reset,
        password_reset_handler::reset_done,
        password_reset_handler::check_reset_link,
        password_reset_handler::confirm_reset,
        password_reset_handler::reset_complete,
    ),
    components(
        schemas(
            Role,
            UserResponse,
            Customer,
            Product,
            Category,
            Order,
            OrderStatus,
            OrderSummary,
            OrderFilter,
            RegisterForm,
            LoginForm,
            CustomerForm,
            OrderForm,
            OrderFormset,
            OrderFormsetRow,
            PasswordResetForm,
            SetPasswordForm,
            TokenResponse,
            Dashboard,
            CustomerHome,
            CustomerOrders,
            customer_handler::CustomerDetail,
            CustomerFormContext,
            CustomerDeleteContext,
            OrderFormContext,
            OrderFormsetContext,
            OrderDeleteContext,
            ResetLinkContext,
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Accounts", description = "Registration, login and logout"),
        (name = "Dashboard", description = "Landing pages and profile"),
        (name = "Products", description = "Product catalog"),
        (name = "Customers", description = "Customer management"),
        (name = "Orders", description = "Order management"),
        (name = "Password reset", description = "Reset a forgotten password")
    )
)]
pub struct ApiDoc;

/// Session cookie security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    crate::config::SESSION_COOKIE_NAME,
                    "Session token set by /login/",
                ))),
            );
        }
    }
}
