//! REST API over topics, articles, comments and users.
//!
//! [`app`] builds the complete endpoint around an injected database
//! connection; `main` owns the connection and the listener.
use poem::{
    Endpoint, EndpointExt, Route,
    middleware::{Cors, Tracing},
};
use poem_openapi::OpenApiService;
use sea_orm::DatabaseConnection;

pub mod api;
pub mod config;
pub mod entities;
pub mod error;
pub mod migration;
pub mod models;
pub mod query;

use api::{ArticlesApi, CommentsApi, EndpointsApi, TopicsApi, UsersApi};

pub fn app(db: DatabaseConnection) -> impl Endpoint {
    let api = OpenApiService::new(
        (
            EndpointsApi,
            TopicsApi::new(db.clone()),
            ArticlesApi::new(db.clone()),
            CommentsApi::new(db.clone()),
            UsersApi::new(db),
        ),
        "NC News API",
        env!("CARGO_PKG_VERSION"),
    );
    let ui = api.swagger_ui();
    let spec = api.spec_endpoint();

    Route::new()
        .nest("/docs", ui)
        .at("/openapi.json", spec)
        .nest("/", api)
        .catch_error(error::route_not_found)
        .catch_error(error::method_not_allowed)
        .catch_error(error::bad_payload)
        .catch_error(error::bad_param)
        .with(Cors::new())
        .with(Tracing)
}
