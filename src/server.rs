//! Server lifecycle: foreground launch for the binary, background launch and
//! shutdown for tests.

use rocket::fairing::AdHoc;
use rocket::figment::Figment;
use rocket::{Ignite, Rocket, Shutdown};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::config::AppConfig;
use crate::db::Store;
use crate::error::ServerError;

fn figment(config: &AppConfig) -> Figment {
    rocket::Config::figment()
        .merge(("address", config.host))
        .merge(("port", config.port))
}

/// Launch in the foreground and return once the server shuts down.
pub async fn serve(config: &AppConfig, store: Store) -> Result<(), ServerError> {
    tracing::info!(host = %config.host, port = config.port, "starting blog post server");
    crate::assemble(rocket::custom(figment(config)), store)?
        .launch()
        .await?;
    Ok(())
}

/// A server launched by [`run_server`], running on a background task.
pub struct RunningServer {
    store: Store,
    base_url: String,
    shutdown: Shutdown,
    task: JoinHandle<Result<Rocket<Ignite>, rocket::Error>>,
}

impl RunningServer {
    /// Handle to the store the server was opened on.
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Open the store at `database_url`, launch the server on a background task and
/// wait until it is accepting connections.
pub async fn run_server(config: &AppConfig, database_url: &str) -> Result<RunningServer, ServerError> {
    let store = Store::open(database_url)?;
    let (ready_tx, ready_rx) = oneshot::channel::<u16>();

    let rocket = crate::assemble(rocket::custom(figment(config)), store.clone())?
        .attach(AdHoc::on_liftoff("Ready Signal", move |rocket| {
            Box::pin(async move {
                let _ = ready_tx.send(rocket.config().port);
            })
        }))
        .ignite()
        .await?;

    let shutdown = rocket.shutdown();
    let task = tokio::spawn(rocket.launch());

    match ready_rx.await {
        Ok(port) => {
            let base_url = format!("http://{}:{}", config.host, port);
            tracing::info!(%base_url, database_url, "server running");
            Ok(RunningServer { store, base_url, shutdown, task })
        }
        // The sender is dropped without firing when launch fails before liftoff.
        Err(_) => match task.await {
            Ok(Ok(_)) => Err(ServerError::Launch("server stopped before liftoff".to_string())),
            Ok(Err(e)) => Err(e.into()),
            Err(e) => Err(ServerError::Join(e.to_string())),
        },
    }
}

/// Request a graceful shutdown and wait for the server task to finish.
pub async fn close_server(server: RunningServer) -> Result<(), ServerError> {
    tracing::info!(base_url = %server.base_url, "closing server");
    server.shutdown.notify();
    match server.task.await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => Err(e.into()),
        Err(e) => Err(ServerError::Join(e.to_string())),
    }
}
