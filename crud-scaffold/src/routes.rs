//! HTTP routes for one entity collection
//!
//! | Method | Path | Operation |
//! |---|---|---|
//! | `GET` | `/all` | list |
//! | `GET` | `/{id}` | get |
//! | `POST` | `/` | create (JSON body) |
//! | `PUT` | `/` | update (JSON body, id inside) |
//! | `DELETE` | `/{id}` | delete |
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use axum::Router;
//! use crud_scaffold::routes::crud_router;
//!
//! let app = Router::new().nest("/api/registrants", crud_router(Arc::new(handler)));
//! ```

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    routing::{get, post},
    Json, Router,
};

use crate::entity::{Entity, EntityId};
use crate::handlers::{ApiError, ApiOperation, CollectionHandler, ItemResponse};

/// Router exposing a collection handler for entity `E`
pub fn crud_router<E, H>(handler: Arc<H>) -> Router
where
    E: Entity,
    H: CollectionHandler<E> + 'static,
{
    Router::new()
        .route("/all", get(list::<E, H>))
        .route("/{id}", get(get_one::<E, H>).delete(delete::<E, H>))
        .route("/", post(create::<E, H>).put(update::<E, H>))
        .with_state(handler)
}

async fn list<E, H>(State(handler): State<Arc<H>>) -> Result<ItemResponse<Vec<E>>, ApiError>
where
    E: Entity,
    H: CollectionHandler<E>,
{
    handler.list().await
}

async fn get_one<E, H>(
    State(handler): State<Arc<H>>,
    id: Result<Path<EntityId>, PathRejection>,
) -> Result<ItemResponse<E>, ApiError>
where
    E: Entity,
    H: CollectionHandler<E>,
{
    let Path(id) = id.map_err(|rejection| path_rejected::<E>(ApiOperation::Get, rejection))?;
    handler.get(id).await
}

async fn create<E, H>(
    State(handler): State<Arc<H>>,
    entity: Result<Json<E>, JsonRejection>,
) -> Result<ItemResponse<EntityId>, ApiError>
where
    E: Entity,
    H: CollectionHandler<E>,
{
    let Json(entity) =
        entity.map_err(|rejection| body_rejected::<E>(ApiOperation::Create, rejection))?;
    handler.create(entity).await
}

async fn update<E, H>(
    State(handler): State<Arc<H>>,
    entity: Result<Json<E>, JsonRejection>,
) -> Result<ItemResponse<u64>, ApiError>
where
    E: Entity,
    H: CollectionHandler<E>,
{
    let Json(entity) =
        entity.map_err(|rejection| body_rejected::<E>(ApiOperation::Update, rejection))?;
    handler.update(entity).await
}

async fn delete<E, H>(
    State(handler): State<Arc<H>>,
    id: Result<Path<EntityId>, PathRejection>,
) -> Result<ItemResponse<u64>, ApiError>
where
    E: Entity,
    H: CollectionHandler<E>,
{
    let Path(id) = id.map_err(|rejection| path_rejected::<E>(ApiOperation::Delete, rejection))?;
    handler.delete(id).await
}

// Extractor failures answer with the same error body as handler outcomes
fn path_rejected<E: Entity>(operation: ApiOperation, rejection: PathRejection) -> ApiError {
    ApiError::bad_request(operation, rejection.body_text()).with_entity_type(E::NAME)
}

fn body_rejected<E: Entity>(operation: ApiOperation, rejection: JsonRejection) -> ApiError {
    ApiError::bad_request(operation, rejection.body_text()).with_entity_type(E::NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::handlers::CrudHandler;
    use crate::registrant::Registrant;
    use crate::testing::{FailingRepository, MemoryRepository};

    fn app() -> Router {
        let handler = CrudHandler::<Registrant, _>::new(MemoryRepository::new());
        crud_router::<Registrant, _>(Arc::new(handler))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn alice() -> Value {
        json!({ "osuId": 100, "osuName": "alice", "discordId": 200, "discordName": "alice#1" })
    }

    #[tokio::test]
    async fn test_list_empty_is_404() {
        let (status, body) = send(&app(), Method::GET, "/all", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No entities exist");
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["entity_type"], "Registrant");
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let app = app();
        let (status, body) = send(&app, Method::POST, "/", Some(alice())).await;
        assert_eq!(status, StatusCode::OK);
        let id = body["data"].as_i64().unwrap();
        assert!(id > 0);

        let (status, body) = send(&app, Method::GET, &format!("/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], id);
        assert_eq!(body["data"]["osuId"], 100);
        assert_eq!(body["data"]["osuName"], "alice");
        assert_eq!(body["data"]["discordId"], 200);
        assert_eq!(body["data"]["discordName"], "alice#1");
        assert!(!body["data"]["createdAt"].is_null());
        assert!(body["data"]["updatedAt"].is_null());

        let (status, body) = send(&app, Method::GET, "/all", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_is_404() {
        let (status, body) = send(&app(), Method::GET, "/77", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No entity exists with that id");
        assert_eq!(body["entity_id"], "77");
    }

    #[tokio::test]
    async fn test_update_roundtrip() {
        let app = app();
        let (_, body) = send(&app, Method::POST, "/", Some(alice())).await;
        let id = body["data"].as_i64().unwrap();

        let mut changed = alice();
        changed["id"] = json!(id);
        changed["discordName"] = json!("alice#9");
        let (status, body) = send(&app, Method::PUT, "/", Some(changed)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], 1);

        let (_, body) = send(&app, Method::GET, &format!("/{}", id), None).await;
        assert_eq!(body["data"]["discordName"], "alice#9");
        assert!(!body["data"]["updatedAt"].is_null());
    }

    #[tokio::test]
    async fn test_update_missing_is_400() {
        let mut ghost = alice();
        ghost["id"] = json!(555);
        let (status, body) = send(&app(), Method::PUT, "/", Some(ghost)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Failed to update entity");
    }

    #[tokio::test]
    async fn test_delete_missing_is_400() {
        let (status, body) = send(&app(), Method::DELETE, "/31337", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Failed to delete entity");
        assert_eq!(body["operation"], "delete");
    }

    #[tokio::test]
    async fn test_delete_existing() {
        let app = app();
        let (_, body) = send(&app, Method::POST, "/", Some(alice())).await;
        let id = body["data"].as_i64().unwrap();

        let (status, body) = send(&app, Method::DELETE, &format!("/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], 1);

        let (status, _) = send(&app, Method::GET, "/all", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_numeric_id_uses_error_body() {
        let (status, body) = send(&app(), Method::GET, "/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
        assert_eq!(body["status"], 400);
        assert_eq!(body["operation"], "get");
        assert_eq!(body["entity_type"], "Registrant");

        let (status, body) = send(&app(), Method::DELETE, "/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["operation"], "delete");
    }

    #[tokio::test]
    async fn test_malformed_body_uses_error_body() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"osuId\": "))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "BAD_REQUEST");
        assert_eq!(body["operation"], "create");
        assert!(!body["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_content_type_uses_error_body() {
        let request = Request::builder()
            .method(Method::PUT)
            .uri("/")
            .body(Body::from(alice().to_string()))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["operation"], "update");
    }

    #[tokio::test]
    async fn test_store_outage_is_503_without_details() {
        let handler = CrudHandler::<Registrant, _>::new(FailingRepository);
        let app = crud_router::<Registrant, _>(Arc::new(handler));
        let (status, body) = send(&app, Method::GET, "/1", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "Service temporarily unavailable");
        assert!(!body.to_string().contains("refused"));
    }
}
