//! Order filter: narrows an order collection by creation date range, exact
//! product and status, and note substring.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::{Order, OrderStatus};
use crate::errors::{AppResult, FieldErrors};

const INVALID_CHOICE: &str = "Select a valid choice.";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw query parameters as submitted. Empty strings count as absent.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderFilterQuery {
    /// Earliest creation date, inclusive (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Latest creation date, inclusive (YYYY-MM-DD)
    pub end_date: Option<String>,
    /// Exact product id
    pub product: Option<String>,
    /// Exact status label, e.g. `Out for delivery`
    pub status: Option<String>,
    /// Case-insensitive substring of the order note
    pub note: Option<String>,
}

/// Parsed filter. Each absent criterion imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct OrderFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub product: Option<Uuid>,
    pub status: Option<OrderStatus>,
    pub note: Option<String>,
}

impl OrderFilter {
    /// Parse query parameters, reporting bad dates as field errors.
    pub fn from_query(query: &OrderFilterQuery) -> AppResult<Self> {
        let mut errors = FieldErrors::new();
        let start_date = parse_date("start_date", query.start_date.as_deref(), &mut errors);
        let end_date = parse_date("end_date", query.end_date.as_deref(), &mut errors);
        let product = non_empty(query.product.as_deref()).and_then(|raw| {
            let id = Uuid::parse_str(raw).ok();
            if id.is_none() {
                errors.add("product", INVALID_CHOICE);
            }
            id
        });
        let status = non_empty(query.status.as_deref()).and_then(|raw| {
            let status = OrderStatus::parse(raw);
            if status.is_none() {
                errors.add("status", INVALID_CHOICE);
            }
            status
        });
        errors.into_result()?;

        Ok(Self {
            start_date,
            end_date,
            product,
            status,
            note: non_empty(query.note.as_deref()).map(str::to_string),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.product.is_none()
            && self.status.is_none()
            && self.note.is_none()
    }

    /// Whether one order satisfies every present criterion.
    pub fn matches(&self, order: &Order) -> bool {
        let created = order.created_date.date_naive();

        if self.start_date.is_some_and(|start| created < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| created > end) {
            return false;
        }
        if self.product.is_some_and(|product| order.product_id != product) {
            return false;
        }
        if self.status.is_some_and(|status| order.status != status) {
            return false;
        }
        match &self.note {
            Some(needle) => order
                .note
                .as_deref()
                .is_some_and(|note| note.to_lowercase().contains(&needle.to_lowercase())),
            None => true,
        }
    }

    /// Keep matching orders, preserving the input order.
    pub fn apply(&self, orders: Vec<Order>) -> Vec<Order> {
        if self.is_empty() {
            return orders;
        }
        orders.into_iter().filter(|o| self.matches(o)).collect()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_date(field: &str, raw: Option<&str>, errors: &mut FieldErrors) -> Option<NaiveDate> {
    let raw = non_empty(raw)?;
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, "Enter a valid date.");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderStatus;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use proptest::prelude::*;
    use uuid::Uuid;

    fn order_at(created: DateTime<Utc>, note: Option<&str>) -> Order {
        Order {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            status: OrderStatus::Pending,
            note: note.map(str::to_string),
            created_date: created,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn query(start: Option<&str>, end: Option<&str>, note: Option<&str>) -> OrderFilterQuery {
        OrderFilterQuery {
            start_date: start.map(str::to_string),
            end_date: end.map(str::to_string),
            note: note.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let filter = OrderFilter::from_query(&query(Some(""), None, Some("  "))).unwrap();
        assert!(filter.is_empty());

        let orders = vec![order_at(Utc::now(), None), order_at(Utc::now(), Some("x"))];
        assert_eq!(filter.apply(orders.clone()), orders);
    }

    #[test]
    fn test_invalid_dates_are_field_errors() {
        let err = OrderFilter::from_query(&query(Some("yesterday"), Some("2024-13-01"), None))
            .unwrap_err();
        match err {
            crate::errors::AppError::Validation(fields) => {
                assert!(fields.contains("start_date"));
                assert!(fields.contains("end_date"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_date_bounds_are_inclusive_days() {
        let filter =
            OrderFilter::from_query(&query(Some("2024-03-10"), Some("2024-03-10"), None)).unwrap();

        let morning = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 1).unwrap();
        let evening = Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 59).unwrap();
        let next_day = Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap();

        assert!(filter.matches(&order_at(morning, None)));
        assert!(filter.matches(&order_at(evening, None)));
        assert!(!filter.matches(&order_at(next_day, None)));
    }

    #[test]
    fn test_note_is_case_insensitive_substring() {
        let filter = OrderFilter::from_query(&query(None, None, Some("FRAGILE"))).unwrap();
        let now = Utc::now();

        let orders = vec![
            order_at(now, Some("Handle: fragile glass")),
            order_at(now, None),
            order_at(now, Some("sturdy")),
            order_at(now, Some("Fragile")),
        ];
        let kept = filter.apply(orders.clone());
        assert_eq!(kept, vec![orders[0].clone(), orders[3].clone()]);
    }

    #[test]
    fn test_product_and_status_match_exactly() {
        let now = Utc::now();
        let mut delivered = order_at(now, None);
        delivered.status = OrderStatus::Delivered;
        let pending = order_at(now, None);

        let filter = OrderFilter::from_query(&OrderFilterQuery {
            status: Some("Delivered".into()),
            ..Default::default()
        })
        .unwrap();
        assert!(filter.matches(&delivered));
        assert!(!filter.matches(&pending));

        let filter = OrderFilter::from_query(&OrderFilterQuery {
            product: Some(pending.product_id.to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            filter.apply(vec![delivered.clone(), pending.clone()]),
            vec![pending]
        );
    }

    #[test]
    fn test_unknown_product_or_status_is_field_error() {
        let err = OrderFilter::from_query(&OrderFilterQuery {
            product: Some("not-a-uuid".into()),
            status: Some("Lost".into()),
            ..Default::default()
        })
        .unwrap_err();
        let crate::errors::AppError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert!(fields.contains("product"));
        assert!(fields.contains("status"));
    }

    #[test]
    fn test_apply_preserves_input_order() {
        let filter = OrderFilter {
            start_date: Some(day(2024, 1, 1)),
            ..Default::default()
        };
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let orders: Vec<_> = (0..5)
            .map(|i| order_at(base - Duration::days(i * 3), None))
            .collect();
        let ids: Vec<_> = orders.iter().map(|o| o.id).collect();
        let kept: Vec<_> = filter.apply(orders).into_iter().map(|o| o.id).collect();
        assert_eq!(kept, ids);
    }

    fn arb_order() -> impl Strategy<Value = Order> {
        (0i64..2_000, proptest::option::of("[a-zA-Z ]{0,12}")).prop_map(|(offset, note)| {
            let created = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
                + Duration::hours(offset * 7);
            order_at(created, note.as_deref())
        })
    }

    proptest! {
        #[test]
        fn prop_start_date_lower_bound(orders in proptest::collection::vec(arb_order(), 0..40), offset in 0i64..600) {
            let start = day(2023, 1, 1) + Duration::days(offset);
            let filter = OrderFilter { start_date: Some(start), ..Default::default() };
            let kept = filter.apply(orders.clone());
            for o in &kept {
                prop_assert!(o.created_date.date_naive() >= start);
            }
            let expected = orders.iter().filter(|o| o.created_date.date_naive() >= start).count();
            prop_assert_eq!(kept.len(), expected);
        }

        #[test]
        fn prop_end_date_upper_bound(orders in proptest::collection::vec(arb_order(), 0..40), offset in 0i64..600) {
            let end = day(2023, 1, 1) + Duration::days(offset);
            let filter = OrderFilter { end_date: Some(end), ..Default::default() };
            let kept = filter.apply(orders.clone());
            for o in &kept {
                prop_assert!(o.created_date.date_naive() <= end);
            }
            let expected = orders.iter().filter(|o| o.created_date.date_naive() <= end).count();
            prop_assert_eq!(kept.len(), expected);
        }

        #[test]
        fn prop_note_substring(orders in proptest::collection::vec(arb_order(), 0..40), needle in "[a-zA-Z]{1,3}") {
            let filter = OrderFilter { note: Some(needle.clone()), ..Default::default() };
            for o in filter.apply(orders) {
                let note = o.note.expect("matched orders carry a note");
                prop_assert!(note.to_lowercase().contains(&needle.to_lowercase()));
            }
        }
    }
}
