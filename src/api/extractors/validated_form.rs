//! Validated form extractor - deserialization, validation and cleaning.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;
use crate::forms::FormInput;

/// Extracts a form from a urlencoded or JSON body and yields its cleaned
/// value. Field problems are rejected as a `Validation` error listing every
/// offending field.
///
/// # Example
///
/// ```rust,ignore
/// async fn add_customer(ValidatedForm(draft): ValidatedForm<CustomerForm>) {
///     // draft is a CustomerDraft
/// }
/// ```
pub struct ValidatedForm<F: FormInput>(pub F::Cleaned);

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |ct| ct.trim_start().starts_with("application/json"))
}

#[async_trait]
impl<S, F> FromRequest<S> for ValidatedForm<F>
where
    S: Send + Sync,
    F: FormInput + DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let form = if is_json(&req) {
            let Json(value) = Json::<F>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            value
        } else {
            let Form(value) = Form::<F>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            value
        };

        form.full_clean().map(ValidatedForm)
    }
}
