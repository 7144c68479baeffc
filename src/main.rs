use blog_posts::config::AppConfig;
use blog_posts::{seed, server, telemetry, ServerError, Store};

#[rocket::main]
async fn main() -> Result<(), ServerError> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env();
    telemetry::init_tracing(config.json_logs);

    let store = Store::open(&config.database_url)?;
    if config.seed_posts > 0 && store.count()? == 0 {
        seed::seed_post_data(&store, config.seed_posts)?;
    }

    server::serve(&config, store).await.inspect_err(|e| {
        tracing::error!(error = %e, "server exited with an error");
    })
}
