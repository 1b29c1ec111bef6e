//! Response envelopes shared by the API server and its clients.
//!
//! The wire shape is flat (`data` / `success` / `message`, plus `pagination`
//! on paged responses) with the `success` boolean as the discriminant, so the
//! envelope is modeled as a tagged variant with hand-written serde impls
//! rather than one loosely-optional struct.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    Success { data: T, message: Option<String> },
    Failure { message: String },
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse::Success { data, message: None }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        ApiResponse::Success {
            data,
            message: Some(message.into()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        ApiResponse::Failure {
            message: message.into(),
        }
    }
}

impl<T: Serialize> Serialize for ApiResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ApiResponse::Success { data, message } => {
                let len = 2 + usize::from(message.is_some());
                let mut s = serializer.serialize_struct("ApiResponse", len)?;
                s.serialize_field("data", data)?;
                s.serialize_field("success", &true)?;
                if let Some(message) = message {
                    s.serialize_field("message", message)?;
                }
                s.end()
            }
            ApiResponse::Failure { message } => {
                let mut s = serializer.serialize_struct("ApiResponse", 2)?;
                s.serialize_field("success", &false)?;
                s.serialize_field("message", message)?;
                s.end()
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct RawResponse<T> {
    #[serde(default)]
    data: Option<T>,
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ApiResponse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawResponse::<T>::deserialize(deserializer)?;
        if raw.success {
            let data = raw.data.ok_or_else(|| de::Error::missing_field("data"))?;
            Ok(ApiResponse::Success {
                data,
                message: raw.message,
            })
        } else {
            let message = raw
                .message
                .ok_or_else(|| de::Error::missing_field("message"))?;
            Ok(ApiResponse::Failure { message })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: usize,
}

/// Success envelope for one page of a collection. Always carries
/// `success: true` on the wire; failures use the plain [`ApiResponse`]
/// failure shape.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub message: Option<String>,
    pub pagination: Pagination,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, pagination: Pagination) -> Self {
        Self {
            data,
            message: None,
            pagination,
        }
    }
}

impl<T: Serialize> Serialize for PaginatedResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 3 + usize::from(self.message.is_some());
        let mut s = serializer.serialize_struct("PaginatedResponse", len)?;
        s.serialize_field("data", &self.data)?;
        s.serialize_field("success", &true)?;
        if let Some(message) = &self.message {
            s.serialize_field("message", message)?;
        }
        s.serialize_field("pagination", &self.pagination)?;
        s.end()
    }
}

/// Returns the `page`-th window of `items` (1-based, `limit` per page) along
/// with the total count, which is always the full collection length.
pub fn paginate<T>(items: &[T], page: u32, limit: u32) -> (&[T], usize) {
    let start = (page as usize - 1).saturating_mul(limit as usize);
    let end = start.saturating_add(limit as usize).min(items.len());
    if start >= items.len() {
        (&[], items.len())
    } else {
        (&items[start..end], items.len())
    }
}

/// Raw `page`/`limit` query parameters as they arrive on the query string.
/// `validate` coerces them to positive integers with the contract defaults;
/// anything non-numeric or non-positive is rejected, never clamped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PaginationQuery {
    pub fn is_empty(&self) -> bool {
        self.page.is_none() && self.limit.is_none()
    }

    pub fn validate(&self) -> Result<(u32, u32), AppError> {
        let page = coerce_positive("page", self.page.as_deref(), 1)?;
        let limit = coerce_positive("limit", self.limit.as_deref(), 10)?;
        Ok((page, limit))
    }
}

fn coerce_positive(field: &'static str, raw: Option<&str>, default: u32) -> Result<u32, AppError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AppError::validation(field, "must be a positive integer")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_wire_shape() {
        let json = serde_json::to_value(ApiResponse::success(vec![1, 2])).unwrap();
        assert_eq!(json, serde_json::json!({"data": [1, 2], "success": true}));
    }

    #[test]
    fn success_envelope_with_message() {
        let json = serde_json::to_value(ApiResponse::success_with_message(3, "created")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"data": 3, "success": true, "message": "created"})
        );
    }

    #[test]
    fn failure_envelope_wire_shape() {
        let json = serde_json::to_value(ApiResponse::<()>::failure("boom")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "message": "boom"}));
    }

    #[test]
    fn envelope_deserializes_by_success_flag() {
        let ok: ApiResponse<u32> =
            serde_json::from_str(r#"{"data":5,"success":true}"#).unwrap();
        assert_eq!(ok, ApiResponse::success(5));

        let err: ApiResponse<u32> =
            serde_json::from_str(r#"{"success":false,"message":"nope"}"#).unwrap();
        assert_eq!(err, ApiResponse::failure("nope"));
    }

    #[test]
    fn success_without_data_is_rejected() {
        let res: Result<ApiResponse<u32>, _> = serde_json::from_str(r#"{"success":true}"#);
        assert!(res.is_err());
    }

    #[test]
    fn paginated_envelope_wire_shape() {
        let body = PaginatedResponse::new(
            vec!["a", "b"],
            Pagination { page: 1, limit: 2, total: 5 },
        );
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "data": ["a", "b"],
                "success": true,
                "pagination": {"page": 1, "limit": 2, "total": 5}
            })
        );
    }

    #[test]
    fn paginate_window_sizes_match_the_formula() {
        let items: Vec<u32> = (0..23).collect();
        for page in 1..=6u32 {
            for limit in 1..=11u32 {
                let (window, total) = paginate(&items, page, limit);
                let expected = (items.len() as i64 - (page as i64 - 1) * limit as i64)
                    .clamp(0, limit as i64) as usize;
                assert_eq!(window.len(), expected, "page={page} limit={limit}");
                assert_eq!(total, items.len());
            }
        }
    }

    #[test]
    fn paginate_past_the_end_is_empty_with_full_total() {
        let items = [1, 2, 3];
        let (window, total) = paginate(&items, 9, 10);
        assert!(window.is_empty());
        assert_eq!(total, 3);
    }

    #[test]
    fn paginate_second_page_starts_after_the_first() {
        let items = [10, 20, 30, 40, 50];
        let (window, _) = paginate(&items, 2, 2);
        assert_eq!(window, &[30, 40]);
    }

    #[test]
    fn pagination_query_defaults() {
        assert_eq!(PaginationQuery::default().validate().unwrap(), (1, 10));
    }

    #[test]
    fn pagination_query_coerces_strings() {
        let query = PaginationQuery {
            page: Some("3".to_string()),
            limit: Some("25".to_string()),
        };
        assert_eq!(query.validate().unwrap(), (3, 25));
    }

    #[test]
    fn pagination_query_rejects_bad_values_with_field_name() {
        for (page, limit, field) in [
            (Some("0"), None, "page"),
            (Some("-1"), None, "page"),
            (Some("abc"), None, "page"),
            (None, Some("1.5"), "limit"),
            (None, Some("0"), "limit"),
        ] {
            let query = PaginationQuery {
                page: page.map(String::from),
                limit: limit.map(String::from),
            };
            let err = query.validate().unwrap_err();
            assert!(err.to_string().starts_with(field), "{err}");
        }
    }
}
