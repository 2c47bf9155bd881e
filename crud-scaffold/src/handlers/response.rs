//! Success envelope for handler results
//!
//! Every successful operation answers `200 OK` with its payload under `data`:
//! the collection for list, the entity for get, the generated id for create
//! and the affected-row count for update and delete.
//!
//! # Example
//!
//! ```rust
//! use crud_scaffold::handlers::ItemResponse;
//!
//! let response = ItemResponse::new(3_u64);
//! assert_eq!(serde_json::to_string(&response).unwrap(), r#"{"data":3}"#);
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Successful handler payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResponse<T> {
    /// The response data
    pub data: T,
}

impl<T> ItemResponse<T> {
    /// Wrap a payload
    pub fn new(data: T) -> Self {
        Self { data }
    }

    /// Unwrap the payload
    pub fn into_inner(self) -> T {
        self.data
    }
}

impl<T: Serialize> IntoResponse for ItemResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let json = serde_json::to_value(ItemResponse::new(vec!["a", "b"])).unwrap();
        assert_eq!(json, serde_json::json!({ "data": ["a", "b"] }));
    }

    #[tokio::test]
    async fn test_into_response_is_ok_json() {
        let response = ItemResponse::new(17).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ItemResponse<i32> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.into_inner(), 17);
    }
}
