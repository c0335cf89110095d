// testing/mod.rs - In-process helpers shared by unit tests
//
// `TestApp` drives the full router (global layers included) through
// `tower::ServiceExt::oneshot`; no socket is opened.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    response::Response,
    Router,
};
use axum_extra::headers::{Authorization, HeaderMapExt};
use serde_json::Value;
use tower::ServiceExt;

use crate::app::{app, AppState};
use crate::auth::{generate_jwt, BearerToken, Claims, SharedAuthenticator, StaticCredentials};
use crate::config::AppConfig;
use crate::database::memory::MemoryCommentStore;
use crate::database::models::comment::{Comment, CommentId};
use crate::database::store::{CommentStore, StorageError};
use crate::services::CommentService;

pub const ADMIN: &str = "admin";

const TEST_SECRET: &[u8] = b"test-secret-key";

/// Store whose every call fails as if the database were down
pub struct UnavailableStore;

#[async_trait]
impl CommentStore for UnavailableStore {
    async fn create(&self, _comment: Comment) -> Result<Comment, StorageError> {
        Err(down())
    }

    async fn read(&self, _id: CommentId) -> Result<Comment, StorageError> {
        Err(down())
    }

    async fn update(&self, _id: CommentId, _comment: Comment) -> Result<Comment, StorageError> {
        Err(down())
    }

    async fn delete(&self, _id: CommentId) -> Result<(), StorageError> {
        Err(down())
    }

    async fn list(&self) -> Result<Vec<Comment>, StorageError> {
        Err(down())
    }
}

fn down() -> StorageError {
    StorageError::Unavailable("connection refused".to_string())
}

/// Store that sleeps for the given duration before answering
pub struct SlowStore(pub Duration);

#[async_trait]
impl CommentStore for SlowStore {
    async fn create(&self, comment: Comment) -> Result<Comment, StorageError> {
        tokio::time::sleep(self.0).await;
        Ok(comment)
    }

    async fn read(&self, _id: CommentId) -> Result<Comment, StorageError> {
        tokio::time::sleep(self.0).await;
        Err(StorageError::NotFound)
    }

    async fn update(&self, _id: CommentId, comment: Comment) -> Result<Comment, StorageError> {
        tokio::time::sleep(self.0).await;
        Ok(comment)
    }

    async fn delete(&self, _id: CommentId) -> Result<(), StorageError> {
        tokio::time::sleep(self.0).await;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Comment>, StorageError> {
        tokio::time::sleep(self.0).await;
        Ok(Vec::new())
    }
}

/// The application router wired to an in-memory store
pub struct TestApp {
    router: Router,
    pub store: Arc<MemoryCommentStore>,
}

impl TestApp {
    /// Bearer-token auth over an empty memory store
    pub fn new() -> Self {
        let store = Arc::new(MemoryCommentStore::new());
        Self::build(store.clone(), store, Arc::new(BearerToken::new(TEST_SECRET)))
    }

    /// Every storage call fails; `store` stays empty
    pub fn unavailable_storage() -> Self {
        Self::build(
            Arc::new(UnavailableStore),
            Arc::new(MemoryCommentStore::new()),
            Arc::new(BearerToken::new(TEST_SECRET)),
        )
    }

    pub fn with_basic_auth(username: &str, password: &str) -> Self {
        let store = Arc::new(MemoryCommentStore::new());
        Self::build(
            store.clone(),
            store,
            Arc::new(StaticCredentials::new(username, password)),
        )
    }

    fn build(
        backend: Arc<dyn CommentStore>,
        store: Arc<MemoryCommentStore>,
        authenticator: SharedAuthenticator,
    ) -> Self {
        let config = AppConfig::development();
        let state = AppState::new(CommentService::new(backend));
        Self {
            router: app(state, authenticator, &config),
            store,
        }
    }

    /// A valid HS256 token for `subject`
    pub fn token(&self, subject: &str) -> String {
        generate_jwt(&Claims::new(subject, 1), TEST_SECRET).unwrap()
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Body::empty(), None).await
    }

    pub async fn post(&self, uri: &str, body: &str, token: Option<&str>) -> (StatusCode, Value) {
        let auth = token.map(|t| format!("Bearer {}", t));
        self.send(Method::POST, uri, Body::from(body.to_string()), auth).await
    }

    pub async fn put(&self, uri: &str, body: &str, token: Option<&str>) -> (StatusCode, Value) {
        let auth = token.map(|t| format!("Bearer {}", t));
        self.send(Method::PUT, uri, Body::from(body.to_string()), auth).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let auth = token.map(|t| format!("Bearer {}", t));
        self.send(Method::DELETE, uri, Body::empty(), auth).await
    }

    pub async fn post_basic(
        &self,
        uri: &str,
        body: &str,
        username: &str,
        password: &str,
    ) -> (StatusCode, Value) {
        let mut headers = HeaderMap::new();
        headers.typed_insert(Authorization::basic(username, password));
        let auth = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.send(Method::POST, uri, Body::from(body.to_string()), auth).await
    }

    /// Bearer-authenticated request with an arbitrary method
    pub async fn send_as(
        &self,
        method: Method,
        uri: &str,
        body: &str,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let auth = token.map(|t| format!("Bearer {}", t));
        self.send(method, uri, Body::from(body.to_string()), auth).await
    }

    pub async fn raw_get(&self, uri: &str) -> Response {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Body,
        authorization: Option<String>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}
