//! mdserve turns a folder of markdown into a browsable HTML preview.
//!
//! This crate provides a [`Server`] that serves a one-time scan of a
//! directory tree: `GET /` lists every discovered markdown document, and any
//! other path is resolved against the scan and rendered to styled HTML on the
//! fly. Styling assets ship embedded in the binary, so the server has no
//! runtime file dependencies beyond the documents themselves.
//!
//! Rendering happens through the [`Renderer`] trait. The built-in
//! [`MarkdownRenderer`] understands GitHub-flavored markdown; arbitrary
//! external programs can be plugged in with [`CommandRenderer`].
//!
//! # Example
//!
//! ```no_run
//! use std::net::SocketAddr;
//! use mdserve::{FileIndex, MarkdownRenderer, Server};
//!
//! # tokio_test::block_on(async {
//! let index = FileIndex::scan("./docs")?;
//!
//! let addr = "127.0.0.1:3030".parse::<SocketAddr>()?;
//! let server = Server::bind(&addr, index, MarkdownRenderer::new()).await?;
//!
//! server.open_browser()?;
//! #   Ok::<_, Box<dyn std::error::Error>>(())
//! # });
//! ```

#![warn(missing_debug_implementations)]
#![warn(missing_docs)]

use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer, extract::Extension, http::StatusCode, routing::get,
    BoxError, Router,
};
use tokio::process::Command;
use tokio::sync::oneshot;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod index;
pub mod render;
mod service;

pub use crate::index::{FileIndex, IndexEntry, ScanError};
pub use crate::render::{CommandRenderer, MarkdownRenderer, Renderer};

/// Requests that take longer than this are answered with 408. A stuck
/// external renderer must not wedge the connection forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Markdown preview server.
///
/// Serves a [`FileIndex`] over HTTP: a listing page at the root, rendered
/// documents everywhere else, and an embedded stylesheet bundle under
/// `/assets/`. The index is scanned before the server is bound and shared
/// read-only across requests, so handlers never contend on locks.
///
/// The server runs on the current `tokio` runtime and shuts down when the
/// handle is dropped.
pub struct Server<R> {
    addr: SocketAddr,
    state: Arc<State<R>>,
    _shutdown_tx: oneshot::Sender<()>,
}

impl<R> Server<R>
where
    R: Renderer + Send + Sync + 'static,
    R::Error: fmt::Display,
{
    /// Binds the server to a specified address `addr`, serving the documents
    /// in `index` rendered by `renderer`.
    ///
    /// Binding to port 0 will request a port assignment from the OS. Use
    /// [`addr()`][Self::addr] to determine what port was assigned.
    ///
    /// The server must be bound using a Tokio runtime.
    pub async fn bind(addr: &SocketAddr, index: FileIndex, renderer: R) -> io::Result<Server<R>> {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let state = Arc::new(State { index, renderer });

        let app = Router::new()
            .route("/", get(service::serve_listing::<R>))
            .route("/assets/*path", get(service::serve_asset))
            .fallback(get(service::serve_document::<R>))
            .layer(Extension(Arc::clone(&state)))
            .layer(TraceLayer::new_for_http())
            .layer(
                ServiceBuilder::new()
                    .layer(HandleErrorLayer::new(|_: BoxError| async {
                        (StatusCode::REQUEST_TIMEOUT, "request timed out")
                    }))
                    .timeout(REQUEST_TIMEOUT),
            );

        let http_server = axum::Server::try_bind(addr)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
            .serve(app.into_make_service());

        let addr = http_server.local_addr();
        info!("listening on {:?}", addr);

        let http_server = http_server.with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        });

        tokio::spawn(http_server);

        Ok(Server {
            addr,
            state,
            _shutdown_tx: shutdown_tx,
        })
    }

    /// Returns the socket address that the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the index of documents the server is serving.
    pub fn index(&self) -> &FileIndex {
        &self.state.index
    }

    /// Opens the user's default browser on the server's listing page in the
    /// background.
    ///
    /// This is a convenience action, decoupled from the serving lifecycle:
    /// the spawned process is not waited on, and a launch failure leaves the
    /// server running. The following platforms are supported:
    ///
    /// | Platform | Program    |
    /// | -------- | ---------- |
    /// | Linux    | `xdg-open` |
    /// | OS X     | `open -g`  |
    /// | Windows  | `explorer` |
    pub fn open_browser(&self) -> io::Result<()> {
        let command = if cfg!(target_os = "macos") {
            let mut command = Command::new("open");
            command.arg("-g");
            command
        } else if cfg!(target_os = "windows") {
            Command::new("explorer")
        } else {
            Command::new("xdg-open")
        };

        self.open_specific_browser(command)
    }

    /// Opens a browser with a specified command. The HTTP address of the
    /// server will be appended to the command as an argument.
    pub fn open_specific_browser(&self, mut command: Command) -> io::Result<()> {
        command.arg(&format!("http://{}", self.addr()));

        command.stdout(Stdio::null()).stderr(Stdio::null());

        info!("spawning browser: {:?}", command);
        command.spawn()?;
        Ok(())
    }
}

impl<R> fmt::Debug for Server<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Server")
            .field("addr", &self.addr)
            .field("index", &self.state.index)
            .finish_non_exhaustive()
    }
}

/// Read-only state shared with the request handlers.
pub(crate) struct State<R> {
    pub(crate) index: FileIndex,
    pub(crate) renderer: R,
}
