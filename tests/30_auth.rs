mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

// {"alg":"none","typ":"JWT"}.{"sub":"admin"}.
const UNSIGNED_TOKEN: &str = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.eyJzdWIiOiJhZG1pbiJ9.";

async fn comment_count(server: &common::TestServer) -> Result<usize> {
    let list: Value = server.client.get(server.url("/api/comment")).send().await?.json().await?;
    Ok(list.as_array().map(Vec::len).unwrap_or_default())
}

#[tokio::test]
async fn rejected_writes_leave_storage_untouched() -> Result<()> {
    let server = common::TestServer::jwt().await?;

    let res = server
        .client
        .post(server.url("/api/comment"))
        .json(&json!({"body": "anonymous"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "not authorized");

    let res = server
        .client
        .post(server.url("/api/comment"))
        .bearer_auth("not-a-jwt")
        .json(&json!({"body": "garbage"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(comment_count(&server).await?, 0);
    Ok(())
}

#[tokio::test]
async fn unsigned_and_foreign_tokens_are_rejected() -> Result<()> {
    let server = common::TestServer::jwt().await?;

    let res = server
        .client
        .post(server.url("/api/comment"))
        .bearer_auth(UNSIGNED_TOKEN)
        .json(&json!({"body": "x"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let foreign = comments_api::auth::generate_jwt(
        &comments_api::auth::Claims::new("admin", 1),
        b"some-other-secret",
    )?;
    let res = server
        .client
        .post(server.url("/api/comment"))
        .bearer_auth(foreign)
        .json(&json!({"body": "x"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(comment_count(&server).await?, 0);
    Ok(())
}

#[tokio::test]
async fn reads_are_public() -> Result<()> {
    let server = common::TestServer::jwt().await?;

    let res = server.client.get(server.url("/api/comment")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn basic_mode_accepts_configured_pair_only() -> Result<()> {
    let server = common::TestServer::basic().await?;

    let res = server
        .client
        .post(server.url("/api/comment"))
        .basic_auth(common::BASIC_USER, Some("wrong"))
        .json(&json!({"body": "x"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = server
        .client
        .post(server.url("/api/comment"))
        .basic_auth(common::BASIC_USER, Some(common::BASIC_PASSWORD))
        .json(&json!({"body": "x"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Bearer tokens mean nothing to the Basic strategy
    let res = server
        .client
        .delete(server.url("/api/comment/1"))
        .bearer_auth(common::token("admin")?)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(comment_count(&server).await?, 1);
    Ok(())
}
