use poem_openapi::{OpenApi, payload::Json};
use serde_json::Value;
use tracing::error;

use super::ApiTags;
use crate::error::ApiError;

const ENDPOINTS: &str = include_str!("../../endpoints.json");

pub struct EndpointsApi;

#[OpenApi]
impl EndpointsApi {
    /// Description of every endpoint this service serves
    #[oai(path = "/api", method = "get", tag = "ApiTags::Api")]
    async fn get_api(&self) -> poem::Result<Json<Value>> {
        let endpoints = serde_json::from_str(ENDPOINTS).map_err(|e| {
            error!("endpoints.json is not valid JSON: {e}");
            ApiError::Internal(e.to_string())
        })?;

        Ok(Json(endpoints))
    }
}
