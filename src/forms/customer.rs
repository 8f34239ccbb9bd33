use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidateEmail};

use super::{optional, FormInput, PHONE_RE, REQUIRED};
use crate::config::MAX_NAME_LENGTH;
use crate::domain::CustomerDraft;
use crate::errors::FieldErrors;

/// Customer details, used by admins adding customers and by customers
/// editing their own profile.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CustomerForm {
    /// Required once surrounding whitespace is stripped, at most 200 characters
    #[serde(default)]
    #[schema(example = "Jane Doe", max_length = 200)]
    pub name: String,
    #[serde(default)]
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[serde(default)]
    #[validate(regex(path = *PHONE_RE, message = "Enter a valid phone number."))]
    #[schema(example = "+1 555 0100")]
    pub phone: String,
    /// Stored image reference
    #[serde(default)]
    #[schema(example = "profile1.png")]
    pub profile_pic: String,
}

impl FormInput for CustomerForm {
    type Cleaned = CustomerDraft;

    fn clean(self, errors: &mut FieldErrors) -> Option<CustomerDraft> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            errors.add("name", REQUIRED);
        } else if name.chars().count() > MAX_NAME_LENGTH as usize {
            errors.add(
                "name",
                format!("Ensure this value has at most {MAX_NAME_LENGTH} characters."),
            );
        }

        let email = optional(&self.email);
        if let Some(email) = &email {
            if !email.validate_email() {
                errors.add("email", "Enter a valid email address.");
            }
        }

        Some(CustomerDraft {
            name,
            email,
            phone: optional(&self.phone),
            profile_pic: optional(&self.profile_pic),
        })
    }
}
