mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};
use std::io;
use std::sync::Arc;
use crate::config::Config;
use crate::db::{postgres::PgEmployeeStore, EmployeeStore};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(|err| {
        error!("Configuration error: {}", err);
        io::Error::new(io::ErrorKind::InvalidInput, err.to_string())
    })?;

    let pool = db::connect(&config).await.map_err(|err| {
        error!("Employee store connection error: {}", err);
        io::Error::new(io::ErrorKind::Other, err)
    })?;

    let store: Arc<dyn EmployeeStore> = Arc::new(PgEmployeeStore::new(pool.clone()));
    let bind = (config.bind_address.clone(), config.port);

    info!("Server running on http://{}:{}", bind.0, bind.1);

    let result = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::from(store.clone()))
            .configure(handlers::configure)
    })
    .bind(bind)?
    .run()
    .await;

    pool.close().await;
    info!("Employee store connection closed");

    result
}
