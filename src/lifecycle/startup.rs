//! Startup orchestration.
//!
//! # Responsibilities
//! - Build both routers
//! - Spawn one task per server (bind, then serve)
//! - Wait for both tasks to end
//!
//! # Design Decisions
//! - A bind failure is logged and ends only that server's task
//! - Neither task ends under normal operation, so `run` does not return
//!   until both servers have failed

use std::sync::Arc;

use tokio::task::{JoinError, JoinHandle};

use crate::config::{DemoConfig, ListenerConfig};
use crate::http::{App, HttpServer, ServeError};
use crate::net::{self, ListenerError};
use crate::routing::{chi, stdlib, MuxError};

/// How a server task ended.
#[derive(Debug)]
pub enum ServerExit {
    /// The listener could not be bound; the server never served.
    BindFailed(ListenerError),
    /// The server stopped on a fatal error after listening.
    Failed(ServeError),
    /// The serve loop returned without error.
    Stopped,
    /// The task panicked or was cancelled.
    Aborted(String),
}

/// Bind `config` and serve `server` on a new task.
pub fn spawn_server(server: HttpServer, config: ListenerConfig) -> JoinHandle<ServerExit> {
    tokio::spawn(async move {
        let name = server.name();
        let listener = match net::bind(&config).await {
            Ok(listener) => listener,
            Err(e) => {
                tracing::error!(server = name, error = %e, "Server not started");
                return ServerExit::BindFailed(e);
            }
        };

        match server.run(listener).await {
            Ok(()) => {
                tracing::info!(server = name, "HTTP server stopped");
                ServerExit::Stopped
            }
            Err(e) => {
                tracing::error!(server = name, error = %e, "HTTP server terminated");
                ServerExit::Failed(e)
            }
        }
    })
}

/// Start both servers concurrently and wait for both to end.
///
/// Returns the exit of the axum server and of the mux server, in that order.
pub async fn run(config: DemoConfig) -> Result<(ServerExit, ServerExit), MuxError> {
    let chi_server = HttpServer::new("chi", App::Chi(chi::router()));
    let stdlib_server = HttpServer::new("stdlib", App::StdLib(Arc::new(stdlib::mux()?)));

    let chi_task = spawn_server(chi_server, config.chi);
    let stdlib_task = spawn_server(stdlib_server, config.stdlib);

    let (chi_exit, stdlib_exit) = tokio::join!(chi_task, stdlib_task);
    Ok((settle("chi", chi_exit), settle("stdlib", stdlib_exit)))
}

fn settle(name: &'static str, result: Result<ServerExit, JoinError>) -> ServerExit {
    result.unwrap_or_else(|e| {
        tracing::error!(server = name, error = %e, "Server task aborted");
        ServerExit::Aborted(e.to_string())
    })
}
