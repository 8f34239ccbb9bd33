//! Order form and the per-customer order formset.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{optional, parse_choice, FormInput, INVALID_CHOICE, REQUIRED};
use crate::config::ORDER_FORMSET_EXTRA;
use crate::domain::{OrderDraft, OrderStatus};
use crate::errors::FieldErrors;

fn parse_status(field: &str, raw: &str, errors: &mut FieldErrors) -> Option<OrderStatus> {
    match optional(raw) {
        None => {
            errors.add(field, REQUIRED);
            None
        }
        Some(label) => {
            let status = OrderStatus::parse(&label);
            if status.is_none() {
                errors.add(field, INVALID_CHOICE);
            }
            status
        }
    }
}

/// Single order create/update
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct OrderForm {
    /// Customer id
    #[serde(default)]
    pub customer: String,
    /// Product id
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    #[schema(example = "Pending")]
    pub status: String,
    #[serde(default)]
    #[validate(length(max = 1000, message = "Ensure this value has at most 1000 characters."))]
    pub note: String,
}

impl FormInput for OrderForm {
    type Cleaned = OrderDraft;

    fn clean(self, errors: &mut FieldErrors) -> Option<OrderDraft> {
        let customer_id = parse_choice("customer", &self.customer, errors);
        let product_id = parse_choice("product", &self.product, errors);
        let status = parse_status("status", &self.status, errors);

        Some(OrderDraft {
            customer_id: customer_id?,
            product_id: product_id?,
            status: status?,
            note: optional(&self.note),
        })
    }
}

/// One row of the order formset. Missing keys read as blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct OrderFormsetRow {
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl OrderFormsetRow {
    fn is_blank(&self) -> bool {
        [&self.product, &self.status]
            .iter()
            .all(|v| v.as_deref().map_or(true, |s| s.trim().is_empty()))
    }
}

/// Several orders for one customer in a single submission.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct OrderFormset {
    #[serde(default)]
    #[validate(length(max = 10, message = "Please submit at most 10 forms."))]
    pub forms: Vec<OrderFormsetRow>,
}

impl OrderFormset {
    /// Rows offered on an empty formset
    pub const EXTRA: usize = ORDER_FORMSET_EXTRA;

    pub fn field_name(index: usize, field: &str) -> String {
        format!("form-{index}-{field}")
    }
}

/// A non-blank formset row, remembering its position for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedOrder {
    pub row: usize,
    pub product_id: Uuid,
    pub status: OrderStatus,
}

impl FormInput for OrderFormset {
    type Cleaned = Vec<PlacedOrder>;

    fn clean(self, errors: &mut FieldErrors) -> Option<Vec<PlacedOrder>> {
        let mut placed = Vec::new();

        for (row, form) in self.forms.iter().enumerate() {
            if form.is_blank() {
                continue;
            }
            let mut row_errors = FieldErrors::new();
            let product_id =
                parse_choice("product", form.product.as_deref().unwrap_or(""), &mut row_errors);
            let status =
                parse_status("status", form.status.as_deref().unwrap_or(""), &mut row_errors);

            if let (Some(product_id), Some(status)) = (product_id, status) {
                placed.push(PlacedOrder {
                    row,
                    product_id,
                    status,
                });
            }
            errors.extend_prefixed(&Self::field_name(row, ""), row_errors);
        }

        Some(placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    fn row(product: Option<&str>, status: Option<&str>) -> OrderFormsetRow {
        OrderFormsetRow {
            product: product.map(str::to_string),
            status: status.map(str::to_string),
        }
    }

    #[test]
    fn test_order_form_cleans_to_draft() {
        let customer = Uuid::new_v4();
        let product = Uuid::new_v4();
        let draft = OrderForm {
            customer: customer.to_string(),
            product: product.to_string(),
            status: "Out for delivery".into(),
            note: "  ring twice ".into(),
        }
        .full_clean()
        .unwrap();

        assert_eq!(draft.customer_id, customer);
        assert_eq!(draft.product_id, product);
        assert_eq!(draft.status, OrderStatus::OutForDelivery);
        assert_eq!(draft.note.as_deref(), Some("ring twice"));
    }

    #[test]
    fn test_order_form_rejects_unknown_status() {
        let err = OrderForm {
            customer: Uuid::new_v4().to_string(),
            product: Uuid::new_v4().to_string(),
            status: "Lost".into(),
            note: String::new(),
        }
        .full_clean()
        .unwrap_err();
        let AppError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert_eq!(fields.get("status"), Some(&[INVALID_CHOICE.to_string()][..]));
    }

    #[test]
    fn test_all_blank_formset_is_valid_and_empty() {
        let formset = OrderFormset {
            forms: (0..OrderFormset::EXTRA)
                .map(|i| if i % 2 == 0 { row(None, None) } else { row(Some(""), Some(" ")) })
                .collect(),
        };
        assert_eq!(formset.full_clean().unwrap(), vec![]);
    }

    #[test]
    fn test_formset_skips_blank_rows_and_keeps_positions() {
        let product = Uuid::new_v4();
        let formset = OrderFormset {
            forms: vec![
                row(None, None),
                row(Some(&product.to_string()), Some("Pending")),
                row(Some(""), None),
                row(Some(&product.to_string()), Some("Delivered")),
            ],
        };
        let placed = formset.full_clean().unwrap();
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].row, 1);
        assert_eq!(placed[1].row, 3);
        assert_eq!(placed[1].status, OrderStatus::Delivered);
    }

    #[test]
    fn test_formset_row_errors_are_prefixed() {
        let formset = OrderFormset {
            forms: vec![row(None, Some("Pending")), row(Some("bogus"), Some("Nope"))],
        };
        let AppError::Validation(fields) = formset.full_clean().unwrap_err() else {
            panic!("expected validation error");
        };
        assert_eq!(fields.get("form-0-product"), Some(&[REQUIRED.to_string()][..]));
        assert!(fields.contains("form-1-product"));
        assert!(fields.contains("form-1-status"));
        assert_eq!(OrderFormset::field_name(1, "status"), "form-1-status");
    }

    #[test]
    fn test_formset_rejects_too_many_rows() {
        let formset = OrderFormset {
            forms: vec![row(None, None); OrderFormset::EXTRA + 1],
        };
        let AppError::Validation(fields) = formset.full_clean().unwrap_err() else {
            panic!("expected validation error");
        };
        assert!(fields.contains("forms"));
    }
}
