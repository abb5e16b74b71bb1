//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use bytes::Bytes;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use drivehub_api::AppState;
use drivehub_api::extractors::session::USER_HEADER;
use drivehub_core::config::AppConfig;
use drivehub_core::types::UserId;
use drivehub_service::{FixedQuota, MemoryTransport};

const BOUNDARY: &str = "drivehub-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum app for making test requests
    pub router: Router,
    /// Shared state, for subscribing to events
    pub state: AppState,
    /// Content behind the upload transport
    pub transport: Arc<MemoryTransport>,
    /// The user every authenticated request acts as
    pub user_id: UserId,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub bytes: Bytes,
    /// Parsed JSON body (Null if not JSON)
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The `id` of the returned entity.
    pub fn id(&self) -> String {
        self.data()["id"]
            .as_str()
            .expect("response has no data.id")
            .to_string()
    }
}

impl TestApp {
    /// Create a test application with default configuration
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with the given configuration
    pub fn with_config(config: AppConfig) -> Self {
        let transport = Arc::new(MemoryTransport::new());
        let quota = Arc::new(FixedQuota::new(config.storage.total_quota_bytes));
        let state = drivehub_api::build_state(config, transport.clone(), quota);
        let router = drivehub_api::build_app(state.clone());

        Self {
            router,
            state,
            transport,
            user_id: UserId::new(),
        }
    }

    /// Another user sharing the same running application
    pub fn other_user(&self) -> Self {
        Self {
            router: self.router.clone(),
            state: self.state.clone(),
            transport: self.transport.clone(),
            user_id: UserId::new(),
        }
    }

    /// Send a JSON request as the test user
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body = body
            .map(|b| serde_json::to_vec(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("content-type", "application/json")
            .header(USER_HEADER, self.user_id.to_string())
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a request with no identity headers
    pub async fn anonymous(&self, method: &str, path: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Upload `files` (name, content) as one multipart batch
    pub async fn upload(&self, folder_id: Option<&str>, files: &[(&str, &[u8])]) -> TestResponse {
        let mut body: Vec<u8> = Vec::new();
        if let Some(folder_id) = folder_id {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"folder_id\"\r\n\r\n{folder_id}\r\n"
                )
                .as_bytes(),
            );
        }
        for (name, content) in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/uploads")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(USER_HEADER, self.user_id.to_string())
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Create a folder and return its id
    pub async fn create_folder(&self, name: &str, parent_id: Option<&str>) -> String {
        let response = self
            .request(
                "POST",
                "/api/folders",
                Some(serde_json::json!({ "name": name, "parent_id": parent_id })),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Folder creation failed: {:?}",
            response.body
        );
        response.id()
    }

    /// Upload one file and return its id
    pub async fn upload_one(&self, folder_id: Option<&str>, name: &str, content: &[u8]) -> String {
        let response = self.upload(folder_id, &[(name, content)]).await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        let status = &response.data()["items"][0]["status"];
        assert_eq!(status["state"], "succeeded", "{status:?}");
        status["file_id"].as_str().expect("no file_id").to_string()
    }

    /// Lifecycle state of an entry via `GET /api/entries/{id}`
    pub async fn is_trashed(&self, id: &str) -> bool {
        let response = self.request("GET", &format!("/api/entries/{id}"), None).await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        !response.data()["trashed_at"].is_null()
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }
}
