//! Form and formset validators.
//!
//! Each form is deserialized from the raw request body, checked with its
//! `validator` rules, then cleaned into a typed value. All errors are
//! collected into one [`FieldErrors`] set; nothing touches the store here.
//! Checks that need the store (duplicate usernames, unknown references) live
//! in the services and report through the same field names.

mod account;
mod customer;
mod order;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::Validate;

use crate::errors::{AppError, AppResult, FieldErrors, NON_FIELD_ERRORS};

pub use account::{LoginForm, PasswordResetForm, RegisterForm, Registration, SetPasswordForm};
pub use customer::CustomerForm;
pub use order::{OrderForm, OrderFormset, OrderFormsetRow, PlacedOrder};

pub(crate) const REQUIRED: &str = "This field is required.";
pub(crate) const INVALID_CHOICE: &str = "Select a valid choice.";

pub(crate) static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.@+-]*$").expect("static username pattern"));

pub(crate) static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9 +()\-]*$").expect("static phone pattern"));

/// A submitted form that can be validated and cleaned into `Cleaned`.
pub trait FormInput: Validate + Sized {
    type Cleaned;

    /// Cross-field checks and conversion. Record problems in `errors`;
    /// the result is discarded whenever `errors` is non-empty.
    fn clean(self, errors: &mut FieldErrors) -> Option<Self::Cleaned>;

    /// Run field rules and `clean`, returning every error found.
    fn full_clean(self) -> AppResult<Self::Cleaned> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };
        let cleaned = self.clean(&mut errors);

        match cleaned {
            Some(value) if errors.is_empty() => Ok(value),
            _ => {
                if errors.is_empty() {
                    errors.add(NON_FIELD_ERRORS, "The submitted form is invalid.");
                }
                Err(AppError::Validation(errors))
            }
        }
    }
}

/// Trimmed value, or `None` when blank.
pub(crate) fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Parse a submitted record reference.
pub(crate) fn parse_choice(
    field: &str,
    raw: &str,
    errors: &mut FieldErrors,
) -> Option<uuid::Uuid> {
    match optional(raw) {
        None => {
            errors.add(field, REQUIRED);
            None
        }
        Some(value) => match uuid::Uuid::parse_str(&value) {
            Ok(id) => Some(id),
            Err(_) => {
                errors.add(field, INVALID_CHOICE);
                None
            }
        },
    }
}
