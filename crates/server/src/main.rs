use crate::{
    config::Config,
    doc::ApiDoc,
    routes::{auth::SchoolClaims, classes, health, records, root, students, teachers},
    utils::shutdown::shutdown_signal,
};
use axum::{Extension, Router, routing::get};
use database::db::create_connection;
use log::info;
use migration::{Migrator, MigratorTrait};
use std::error::Error;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_oauth2_resource_server::server::OAuth2ResourceServer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod doc;
mod dtos;
mod routes;
mod utils;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = Config::from_env()?;
    let db = create_connection(&config.database_url).await?;

    if config.run_migrations {
        info!("Applying pending migrations");
        Migrator::up(&db, None).await?;
    }

    let oauth2_resource_server = <OAuth2ResourceServer<SchoolClaims>>::builder()
        .issuer_url(config.oidc_issuer_url.as_str())
        .build()
        .await
        .map_err(|err| format!("Failed to build OAuth2ResourceServer: {err:?}"))?;

    let protected = Router::new()
        .route("/", get(root::root))
        .merge(students::router())
        .merge(classes::router())
        .merge(teachers::router())
        .merge(records::router())
        .layer(ServiceBuilder::new().layer(oauth2_resource_server.into_layer()));

    let app = Router::new()
        .route("/health", get(health::health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(CompressionLayer::new())
                .layer(Extension(db)),
        );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Running axum on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
