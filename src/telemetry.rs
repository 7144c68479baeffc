//! Tracing set-up and per-request logging.

use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Request, Response};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Honors `RUST_LOG`; `json` switches the
/// output to one JSON object per line.
pub fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,blog_posts=debug"));

    let result = if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()
    };

    match result {
        Ok(()) => tracing::info!(json_logs = json, "tracing initialized"),
        Err(e) => tracing::warn!(error = %e, "tracing subscriber already installed"),
    }
}

/// Logs every handled request with its final status.
pub struct RequestLogger;

#[rocket::async_trait]
impl Fairing for RequestLogger {
    fn info(&self) -> Info {
        Info { name: "Request Logger", kind: Kind::Response }
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        let status = res.status();
        if status.code >= 500 {
            tracing::error!(method = %req.method(), uri = %req.uri(), status = status.code, "request failed");
        } else {
            tracing::info!(method = %req.method(), uri = %req.uri(), status = status.code, "request handled");
        }
    }
}
