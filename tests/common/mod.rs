//! Shared harness for the HTTP end-to-end tests: an in-process router over a fresh
//! in-memory store and a temporary upload directory.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use megahr_api::{app, ApiConfig, AppState};
use megahr_domain::repositories::UserRepository;
use megahr_domain::roles::UserRole;
use megahr_domain::value_objects::UserId;
use megahr_persistence::InMemoryRepositories;

pub const PASSWORD: &str = "password123";
const BOUNDARY: &str = "megahr-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub repos: InMemoryRepositories,
    _uploads: TempDir,
}

/// A registered user and their bearer token
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: String,
}

pub fn test_config(upload_dir: &std::path::Path) -> ApiConfig {
    ApiConfig {
        jwt_secret: "integration-test-secret".into(),
        encryption_key: "0f".repeat(32),
        upload_dir: upload_dir.to_path_buf(),
        bcrypt_cost: 4,
        google_client_id: Some("google-client".into()),
        google_client_secret: Some("google-secret".into()),
        google_redirect_uri: Some(
            "http://localhost:5000/api/v1/integrations/calendar/GOOGLE_WORKSPACE/callback".into(),
        ),
        ..Default::default()
    }
}

impl TestApp {
    pub fn new() -> Self {
        let uploads = tempfile::tempdir().expect("Failed to create upload dir");
        let repos = InMemoryRepositories::default();
        let state = AppState::with_repositories(test_config(uploads.path()), repos.clone())
            .expect("Failed to build app state");
        Self {
            router: app(state),
            repos,
            _uploads: uploads,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");
        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.call(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.call(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.call(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.call(Method::DELETE, uri, Some(token), None).await
    }

    pub async fn register(&self, email: &str) -> Session {
        let (status, body) = self
            .call(
                Method::POST,
                "/api/v1/auth/register",
                None,
                Some(json!({
                    "email": email,
                    "password": PASSWORD,
                    "firstName": "Test",
                    "lastName": "User",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        Session {
            token: body["data"]["token"].as_str().unwrap_or_default().to_string(),
            user_id: body["data"]["user"]["id"].as_str().unwrap_or_default().to_string(),
        }
    }

    /// Platform roles cannot be self-assigned, so tests set them in the store
    pub async fn promote(&self, session: &Session, role: UserRole) {
        let id = UserId::parse(&session.user_id).expect("Invalid user id");
        let mut user = self
            .repos
            .users
            .find_by_id(id)
            .await
            .expect("Lookup failed")
            .expect("User missing");
        user.role = role;
        self.repos.users.update(&user).await.expect("Update failed");
    }

    /// A platform ADMIN owning a fresh company
    pub async fn admin_with_company(&self, email: &str) -> (Session, String) {
        let admin = self.register(email).await;
        self.promote(&admin, UserRole::Admin).await;
        let (status, body) = self
            .post("/api/v1/companies", &admin.token, json!({ "name": "Acme Corp" }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "company creation failed: {body}");
        let company_id = body["data"]["id"].as_str().unwrap_or_default().to_string();
        (admin, company_id)
    }

    pub async fn create_job(&self, admin: &Session, company_id: &str) -> String {
        let (status, body) = self
            .post(
                &format!("/api/v1/jobs/company/{company_id}"),
                &admin.token,
                json!({
                    "title": "Backend Engineer",
                    "description": "Build the recruiting platform",
                    "employmentType": "FULL_TIME",
                    "workType": "REMOTE",
                    "status": "PUBLISHED",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "job creation failed: {body}");
        body["data"]["id"].as_str().unwrap_or_default().to_string()
    }

    /// Workflow template with Applied → Screen → Interview
    pub async fn create_pipeline(&self, admin: &Session, company_id: &str) -> String {
        let (status, body) = self
            .post(
                &format!("/api/v1/workflows/company/{company_id}/templates"),
                &admin.token,
                json!({
                    "name": "Standard pipeline",
                    "stages": [
                        { "name": "Applied", "type": "APPLIED", "order": 0 },
                        { "name": "Screen", "type": "SCREENING", "order": 1 },
                        { "name": "Interview", "type": "INTERVIEW", "order": 2 },
                    ],
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "template creation failed: {body}");
        body["data"]["id"].as_str().unwrap_or_default().to_string()
    }

    pub async fn assign(&self, admin: &Session, job_id: &str, template_id: &str) -> Value {
        let (status, body) = self
            .post(
                &format!("/api/v1/workflows/jobs/{job_id}/assign"),
                &admin.token,
                json!({ "templateId": template_id }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "assignment failed: {body}");
        body["data"].clone()
    }

    /// Submit a candidate through the multipart form, optionally with a résumé
    pub async fn submit_candidate(
        &self,
        admin: &Session,
        job_id: &str,
        email: &str,
        resume: Option<(&str, &[u8])>,
    ) -> (StatusCode, Value) {
        let mut body = Vec::new();
        for (name, value) in [
            ("firstName", "Ada"),
            ("lastName", "Lovelace"),
            ("email", email),
            ("jobId", job_id),
        ] {
            let part = format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"{name}\"\r\n\r\n\
                 {value}\r\n"
            );
            body.extend_from_slice(part.as_bytes());
        }
        if let Some((file_name, bytes)) = resume {
            let head = format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"resume\"; filename=\"{file_name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            );
            body.extend_from_slice(head.as_bytes());
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/candidates")
            .header(header::AUTHORIZATION, format!("Bearer {}", admin.token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("Failed to build multipart request");
        self.send(request).await
    }

    /// First application id of a freshly submitted candidate
    pub async fn apply(&self, admin: &Session, job_id: &str, email: &str) -> String {
        let (status, body) = self.submit_candidate(admin, job_id, email, None).await;
        assert_eq!(status, StatusCode::CREATED, "candidate submission failed: {body}");
        body["data"]["applications"][0]["id"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }
}

/// Paths of the field errors in a failure envelope
pub fn error_paths(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e["path"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
