use thiserror::Error;

/// Failures raised by the blog post store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open database at {url}: {source}")]
    Open {
        url: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("could not create database directory {path}: {source}")]
    Directory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("blog post {0} not found")]
    NotFound(String),
}

/// Failures while building, launching or stopping the HTTP server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid CORS configuration: {0}")]
    Cors(#[from] rocket_cors::Error),

    // rocket::Error panics when dropped unread, so only its message is kept.
    #[error("server failed to launch: {0}")]
    Launch(String),

    #[error("server task failed: {0}")]
    Join(String),
}

impl From<rocket::Error> for ServerError {
    fn from(e: rocket::Error) -> Self {
        ServerError::Launch(e.to_string())
    }
}
