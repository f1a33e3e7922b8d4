use std::fs;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use treepz_admin::config::AppConfig;
use treepz_admin::{app, AppState};

fn assets_app(name: &str) -> Result<(axum::Router, std::path::PathBuf)> {
    let dir = std::env::temp_dir().join(format!("treepz-assets-{}-{}", name, std::process::id()));
    fs::create_dir_all(dir.join("admin"))?;
    fs::write(dir.join("index.html"), "<h1>Sign in</h1>")?;
    fs::write(dir.join("admin").join("index.html"), "<h1>Dashboard</h1>")?;

    let mut config = AppConfig::development();
    config.server.assets_dir = dir.clone();
    Ok((app(AppState::new(config)?), dir))
}

#[tokio::test]
async fn admin_pages_redirect_to_login_without_cookie() -> Result<()> {
    let (app, dir) = assets_app("redirect")?;

    for uri in ["/admin", "/admin/", "/admin/bookings/BK-1"] {
        let res = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty())?)
            .await?;
        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT, "{}", uri);
        assert_eq!(res.headers()[header::LOCATION], "/");
    }

    fs::remove_dir_all(dir)?;
    Ok(())
}

#[tokio::test]
async fn admin_pages_are_served_with_cookie() -> Result<()> {
    let (app, dir) = assets_app("served")?;

    // Presence is enough at the edge; the proxies validate the token later
    let res = app
        .oneshot(
            Request::builder()
                .uri("/admin/")
                .header(header::COOKIE, "treepz_admin_token=anything")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    fs::remove_dir_all(dir)?;
    Ok(())
}

#[tokio::test]
async fn login_page_is_public() -> Result<()> {
    let (app, dir) = assets_app("public")?;

    let res = app
        .oneshot(Request::builder().uri("/").body(Body::empty())?)
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    fs::remove_dir_all(dir)?;
    Ok(())
}

#[tokio::test]
async fn empty_cookie_counts_as_missing() -> Result<()> {
    let (app, dir) = assets_app("empty")?;

    let res = app
        .oneshot(
            Request::builder()
                .uri("/admin")
                .header(header::COOKIE, "treepz_admin_token=")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);

    fs::remove_dir_all(dir)?;
    Ok(())
}

#[tokio::test]
async fn unknown_api_paths_answer_in_json() -> Result<()> {
    let (app, dir) = assets_app("api-miss")?;

    for uri in ["/api", "/api/unknown", "/api/bookings/a/b"] {
        let res = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty())?)
            .await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{}", uri);
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
        let body: serde_json::Value = serde_json::from_slice(&body)?;
        assert_eq!(body, serde_json::json!({ "message": "Not found" }), "{}", uri);
    }

    // Other misses are still the asset server's
    let res = app
        .oneshot(Request::builder().uri("/missing.css").body(Body::empty())?)
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    fs::remove_dir_all(dir)?;
    Ok(())
}
