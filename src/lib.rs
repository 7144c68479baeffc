#[macro_use]
extern crate rocket;

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod seed;
pub mod server;
pub mod telemetry;

pub use db::Store;
pub use error::{ServerError, StoreError};

/// Rocket with default configuration serving the given store.
pub fn create_rocket(store: Store) -> Result<rocket::Rocket<rocket::Build>, ServerError> {
    assemble(rocket::build(), store)
}

pub(crate) fn assemble(
    base: rocket::Rocket<rocket::Build>,
    store: Store,
) -> Result<rocket::Rocket<rocket::Build>, ServerError> {
    let cors = rocket_cors::CorsOptions::default()
        .allowed_origins(rocket_cors::AllowedOrigins::all())
        .to_cors()?;

    Ok(base
        .manage(store)
        .attach(cors)
        .attach(telemetry::RequestLogger)
        .mount("/", routes![
            routes::health,
            routes::list_posts,
            routes::get_post,
            routes::create_post,
            routes::update_post,
            routes::delete_post,
        ])
        .register("/", catchers![
            routes::bad_request,
            routes::not_found,
            routes::unprocessable_entity,
            routes::internal_error,
            routes::default_catcher,
        ]))
}
