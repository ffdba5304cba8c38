mod common;

use anyhow::Result;
use axum::http::StatusCode;
use sitegate::database::SettingsStore;

#[tokio::test]
async fn gate_off_allows_all_paths() -> Result<()> {
    let (app, _store) = common::test_app();

    for path in ["/", "/Events", "/Gallery", "/maintenance", "/Admin", "/api/settings", "/health"]
    {
        let res = common::get(&app, path).await?;
        assert_eq!(res.status(), StatusCode::OK, "path {}", path);
    }
    Ok(())
}

#[tokio::test]
async fn gate_on_redirects_page_requests() -> Result<()> {
    let (app, store) = common::test_app();
    store.write(true).await?;

    for path in ["/", "/Events", "/Gallery", "/News", "/Team", "/Achievements"] {
        let res = common::get(&app, path).await?;
        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT, "path {}", path);
        assert_eq!(
            res.headers().get("location").and_then(|v| v.to_str().ok()),
            Some("/maintenance"),
            "path {}",
            path
        );
    }
    Ok(())
}

#[tokio::test]
async fn gate_on_leaves_bypass_paths_reachable() -> Result<()> {
    let (app, store) = common::test_app();
    store.write(true).await?;

    for path in ["/maintenance", "/Admin", "/api/settings", "/health"] {
        let res = common::get(&app, path).await?;
        assert_eq!(res.status(), StatusCode::OK, "path {}", path);
    }

    // Unrouted bypass prefixes fall through to 404, never to a redirect
    for path in ["/_next/static/x.js", "/favicon.ico"] {
        let res = common::get(&app, path).await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "path {}", path);
    }
    Ok(())
}

#[tokio::test]
async fn dev_override_allows_local_preview() -> Result<()> {
    let (app, store) = common::test_app();
    store.write(true).await?;

    let res = common::get_with_host(&app, "/Events?dev=true", "localhost:3000").await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = common::get_with_host(&app, "/Events?dev=true", "127.0.0.1").await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Same request without the opt-in flag is still redirected
    let res = common::get_with_host(&app, "/Events", "localhost:3000").await?;
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);

    // The flag alone is not enough from a public host
    let res = common::get_with_host(&app, "/Events?dev=true", "example.com").await?;
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    Ok(())
}

#[tokio::test]
async fn gate_fails_open_when_store_is_down() -> Result<()> {
    let app = common::broken_app();

    let res = common::get(&app, "/Events").await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn maintenance_page_declares_noindex() -> Result<()> {
    let (app, store) = common::test_app();
    store.write(true).await?;

    let res = common::get(&app, "/maintenance").await?;
    assert_eq!(res.status(), StatusCode::OK);

    let bytes = http_body_util::BodyExt::collect(res.into_body()).await?.to_bytes();
    let html = String::from_utf8(bytes.to_vec())?;
    assert!(html.contains(r#"<meta name="robots" content="noindex, nofollow">"#));
    Ok(())
}
