use std::env;
use std::fmt;
use std::process::Command;

use anyhow::Context;
use clap::Parser;
use futures::future;
use tokio::net::lookup_host;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use mdserve::{CommandRenderer, FileIndex, MarkdownRenderer, Renderer, Server};

/// Serve the markdown files under the current directory as rendered HTML.
#[derive(Debug, Parser)]
#[command(name = "mdserve", version, about)]
struct Opts {
    /// The HTTP listen address. A bare `:port` listens on localhost.
    #[arg(short = 'l', long = "listen", default_value = "localhost:3030")]
    listen: String,

    /// Do not open the preview in a browser after startup.
    #[arg(long)]
    no_browser: bool,

    /// Render with an external command instead of the built-in renderer.
    /// The command receives markdown on stdin and must print HTML on stdout.
    #[arg(long, value_name = "COMMAND")]
    renderer: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();

    let listen = normalize_listen(&opts.listen);

    let addr = lookup_host(&listen)
        .await
        .with_context(|| format!("invalid listen address {listen}"))?
        .next()
        .with_context(|| format!("listen address {listen} did not resolve"))?;

    let root = env::current_dir().context("no current working directory")?;
    let index = FileIndex::scan(&root)?;

    match &opts.renderer {
        Some(spec) => {
            let renderer = CommandRenderer::new(parse_command(spec)?);
            run(Server::bind(&addr, index, renderer).await?, &opts).await
        }
        None => run(Server::bind(&addr, index, MarkdownRenderer::new()).await?, &opts).await,
    }
}

async fn run<R>(server: Server<R>, opts: &Opts) -> anyhow::Result<()>
where
    R: Renderer + Send + Sync + 'static,
    R::Error: fmt::Display,
{
    println!(
        "serving {} markdown files under {} at http://{}",
        server.index().len(),
        server.index().root().display(),
        server.addr()
    );

    if !opts.no_browser {
        // Launching a browser is a convenience; serving must survive its
        // failure.
        if let Err(err) = server.open_browser() {
            warn!("could not open a browser: {err}");
        }
    }

    let () = future::pending().await;

    Ok(())
}

/// A bare `:port` means "localhost on that port".
fn normalize_listen(listen: &str) -> String {
    if listen.starts_with(':') {
        format!("localhost{listen}")
    } else {
        listen.to_owned()
    }
}

fn parse_command(spec: &str) -> anyhow::Result<Command> {
    let mut parts = spec.split_whitespace();

    let program = parts.next().context("empty renderer command")?;

    let mut command = Command::new(program);
    command.args(parts);

    Ok(command)
}
