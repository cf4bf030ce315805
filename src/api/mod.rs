//! HTTP handlers. Each resource is its own `#[OpenApi]` impl; they are
//! combined into one service by [`crate::app`].
use poem_openapi::{ApiResponse, Tags};
use tracing::debug;
use validator::Validate;

use crate::error::{ApiError, ApiResult};

pub mod articles;
pub mod comments;
pub mod endpoints;
pub mod topics;
pub mod users;

pub use articles::ArticlesApi;
pub use comments::CommentsApi;
pub use endpoints::EndpointsApi;
pub use topics::TopicsApi;
pub use users::UsersApi;

#[derive(Tags)]
enum ApiTags {
    /// Endpoint discovery
    Api,
    Topics,
    Articles,
    Comments,
    Users,
}

#[derive(ApiResponse)]
pub enum DeleteResponse {
    #[oai(status = 204)]
    NoContent,
}

/// Rejects a body whose required fields are absent or empty, naming them.
fn require_fields(input: &impl Validate) -> ApiResult<()> {
    input.validate().map_err(|errors| {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        debug!(?fields, "Rejected body");

        ApiError::BadRequest(format!("Missing required fields: {}", fields.join(", ")))
    })
}
