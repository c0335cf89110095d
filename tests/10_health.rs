mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn healthz_reports_alive() -> Result<()> {
    let server = common::TestServer::jwt().await?;

    let res = server.client.get(server.url("/api/healthz")).send().await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()["content-type"],
        "application/json; charset=UTF-8"
    );
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.json::<serde_json::Value>().await?, json!({"message": "I am alive"}));
    Ok(())
}

#[tokio::test]
async fn healthz_ignores_query_and_needs_no_auth() -> Result<()> {
    let server = common::TestServer::basic().await?;

    let res = server
        .client
        .get(server.url("/api/healthz?verbose=1"))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_json_404() -> Result<()> {
    let server = common::TestServer::jwt().await?;

    let res = server.client.get(server.url("/api/unknown")).send().await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Route not found");
    Ok(())
}
