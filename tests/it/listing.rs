use std::error::Error;

use reqwest::StatusCode;

use crate::serve_tree;

#[tokio::test]
async fn lists_every_indexed_document() -> Result<(), Box<dyn Error>> {
    let preview = serve_tree(&[
        ("README.md", "# readme"),
        ("docs/guide.md", "# guide"),
        ("notes.txt", "not markdown"),
    ])
    .await?;

    let res = reqwest::get(preview.url("/")).await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers()["Content-Type"]
        .to_str()
        .unwrap()
        .contains("text/html"));

    let body = res.text().await?;

    assert!(body.contains(r#"<a href="/README.md">README.md</a>"#));
    assert!(body.contains(r#"<a href="/docs/guide.md">docs/guide.md</a>"#));
    assert!(!body.contains("notes.txt"));

    Ok(())
}

#[tokio::test]
async fn listed_links_round_trip() -> Result<(), Box<dyn Error>> {
    let preview = serve_tree(&[
        ("README.md", "# readme"),
        ("docs/guide.md", "# guide"),
        ("docs/deep/reference.md", "# reference"),
    ])
    .await?;

    let body = reqwest::get(preview.url("/")).await?.text().await?;

    let hrefs: Vec<&str> = body
        .split("<a href=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .collect();

    assert_eq!(hrefs.len(), 3);

    for href in hrefs {
        let res = reqwest::get(preview.url(href)).await?;
        assert_eq!(res.status(), StatusCode::OK, "link {} did not resolve", href);
    }

    Ok(())
}

#[tokio::test]
async fn empty_tree_lists_nothing() -> Result<(), Box<dyn Error>> {
    let preview = serve_tree(&[]).await?;

    let res = reqwest::get(preview.url("/")).await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(!res.text().await?.contains("<li>"));

    Ok(())
}
