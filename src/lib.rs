#[cfg(feature = "server")]
use std::sync::Arc;

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::db::establish_connection_pool;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::{DieselRepository, SharedAdvocateReader, StaticRepository};
#[cfg(feature = "server")]
use crate::routes::api::api_advocates;
#[cfg(feature = "server")]
use crate::routes::main::show_index;

pub mod controller;
pub mod db;
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
pub mod models;
pub mod pagination;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod schema;
pub mod search;
#[cfg(feature = "server")]
pub mod services;

/// Picks the advocate data source: the SQLite store when a database URL is
/// configured, otherwise the bundled list.
#[cfg(feature = "server")]
pub fn build_reader(server_config: &ServerConfig) -> std::io::Result<Arc<SharedAdvocateReader>> {
    match server_config.database_url() {
        Some(database_url) => {
            log::info!("Serving advocates from database {database_url}");
            let pool = establish_connection_pool(database_url).map_err(|e| {
                std::io::Error::other(format!("Failed to establish database connection: {e}"))
            })?;
            Ok(Arc::new(DieselRepository::new(pool)))
        }
        None => {
            log::info!("No database configured, serving bundled advocates");
            let repo = StaticRepository::bundled().map_err(|e| {
                std::io::Error::other(format!("Failed to load bundled advocates: {e}"))
            })?;
            Ok(Arc::new(repo))
        }
    }
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let repo = web::Data::from(build_reader(&server_config)?);

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(web::scope("/api").service(api_advocates))
            .service(show_index)
            .app_data(repo.clone())
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
