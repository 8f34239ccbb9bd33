//! Identity forms: registration, login, password reset.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidateEmail};

use super::{FormInput, REQUIRED, USERNAME_RE};
use crate::config::MAX_USERNAME_LENGTH;
use crate::errors::FieldErrors;

const PASSWORD_MISMATCH: &str = "The two password fields didn't match.";
const INVALID_USERNAME: &str = "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";

/// Self-registration of a customer identity
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct RegisterForm {
    /// 150 characters or fewer. Letters, digits and @/./+/-/_ only.
    #[serde(default)]
    #[schema(example = "jdoe", max_length = 150)]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    #[schema(example = "jdoe@example.com")]
    pub email: String,
    #[serde(default)]
    #[validate(length(
        min = 8,
        message = "This password is too short. It must contain at least 8 characters."
    ))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password1: String,
    /// Must repeat `password1`
    #[serde(default)]
    #[schema(example = "SecurePass123!")]
    pub password2: String,
}

/// Cleaned registration data
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl FormInput for RegisterForm {
    type Cleaned = Registration;

    fn clean(self, errors: &mut FieldErrors) -> Option<Registration> {
        let username = self.username.trim().to_string();
        if username.is_empty() {
            errors.add("username", REQUIRED);
        } else if username.chars().count() > MAX_USERNAME_LENGTH as usize {
            errors.add(
                "username",
                format!(
                    "Ensure this value has at most {} characters.",
                    MAX_USERNAME_LENGTH
                ),
            );
        } else if !USERNAME_RE.is_match(&username) {
            errors.add("username", INVALID_USERNAME);
        }
        let email = self.email.trim().to_string();
        if !email.is_empty() && !email.validate_email() {
            errors.add("email", "Enter a valid email address.");
        }
        if self.password2.is_empty() {
            errors.add("password2", REQUIRED);
        } else if self.password1 != self.password2 {
            errors.add("password2", PASSWORD_MISMATCH);
        }

        Some(Registration {
            username,
            email,
            password: self.password1,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    #[schema(example = "jdoe")]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

impl FormInput for LoginForm {
    type Cleaned = LoginForm;

    fn clean(self, _errors: &mut FieldErrors) -> Option<LoginForm> {
        Some(self)
    }
}

/// Request a password reset link
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct PasswordResetForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    #[schema(example = "jdoe@example.com")]
    pub email: String,
}

impl FormInput for PasswordResetForm {
    type Cleaned = String;

    fn clean(self, errors: &mut FieldErrors) -> Option<String> {
        let email = self.email.trim().to_string();
        if !email.is_empty() && !email.validate_email() {
            errors.add("email", "Enter a valid email address.");
        }
        Some(email)
    }
}

/// Choose a new password from a reset link
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct SetPasswordForm {
    #[serde(default)]
    #[validate(length(
        min = 8,
        message = "This password is too short. It must contain at least 8 characters."
    ))]
    pub new_password1: String,
    #[serde(default)]
    pub new_password2: String,
}

impl FormInput for SetPasswordForm {
    type Cleaned = String;

    fn clean(self, errors: &mut FieldErrors) -> Option<String> {
        if self.new_password1 != self.new_password2 {
            errors.add("new_password2", PASSWORD_MISMATCH);
        }
        Some(self.new_password1)
    }
}
