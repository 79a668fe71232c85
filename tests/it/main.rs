use std::fs;

use tempfile::TempDir;
use tokio::net::lookup_host;

use mdserve::{FileIndex, MarkdownRenderer, Server};

mod assets;
mod listing;

/// A bound server together with the temporary document tree it serves.
struct TestServer {
    server: Server<MarkdownRenderer>,
    dir: TempDir,
}

impl TestServer {
    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.server.addr(), path)
    }
}

async fn serve_tree(files: &[(&str, &str)]) -> anyhow::Result<TestServer> {
    let dir = tempfile::tempdir()?;

    for (name, contents) in files {
        let path = dir.path().join(name);
        fs::create_dir_all(path.parent().unwrap())?;
        fs::write(path, contents)?;
    }

    let index = FileIndex::scan(dir.path())?;

    let addr = lookup_host("localhost:0").await?.next().unwrap();
    let server = Server::bind(&addr, index, MarkdownRenderer::new()).await?;

    Ok(TestServer { server, dir })
}
