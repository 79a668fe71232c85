use std::error::Error;

use reqwest::StatusCode;

use crate::serve_tree;

#[tokio::test]
async fn stylesheet_is_served_from_the_embedded_bundle() -> Result<(), Box<dyn Error>> {
    let preview = serve_tree(&[]).await?;

    let res = reqwest::get(preview.url("/assets/gfm.css")).await?;

    assert!(res.status().is_success());
    assert_eq!(res.headers()["Content-Type"], "text/css");
    assert!(res.text().await?.contains(".markdown-body"));

    Ok(())
}

#[tokio::test]
async fn unknown_assets_are_not_found() -> Result<(), Box<dyn Error>> {
    let preview = serve_tree(&[]).await?;

    let res = reqwest::get(preview.url("/assets/missing.css")).await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}
