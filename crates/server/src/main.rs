mod handlers;
mod pagination;
mod validation;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use axum::{Extension, Router, Server};
use common::{config::Config, logging};
use db::{Database, DatabaseConnection};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::new(None)?;

    logging::init(&config);

    let Some(server_config) = config.server.as_ref() else {
        return Err(anyhow::Error::msg("unable to load server config"));
    };

    info!("connecting to database");
    let database = Arc::new(Database::connect(&config.database.url).await?);
    let server = Server::bind(&server_config.address);

    info!(address = %server_config.address, "starting server");
    let config = Arc::new(config);

    server
        .serve(app_router(database, config).into_make_service())
        .await?;

    Ok(())
}

fn app_router(database: Arc<DatabaseConnection>, config: Arc<Config>) -> Router {
    Router::new()
        .nest("/student", handlers::student::routes())
        .nest("/faculty", handlers::faculty::routes())
        .nest("/avatar", handlers::avatar::routes(&config.storage))
        .merge(handlers::info::routes())
        .layer(Extension(config))
        .with_state(database)
}
