use poem_openapi::{Object, OpenApi, param::Path, payload::Json};
use sea_orm::DatabaseConnection;

use super::{ApiTags, DeleteResponse, articles::VotePatch, require_fields};
use crate::{entities::comment, error::ApiError, models::comments, query::parse_id};

#[derive(Object)]
struct CommentBody {
    comment: comment::Model,
}

pub struct CommentsApi {
    db: DatabaseConnection,
}

impl CommentsApi {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[OpenApi]
impl CommentsApi {
    /// Add `inc_votes` (may be negative) to a comment's votes
    #[oai(path = "/api/comments/:comment_id", method = "patch", tag = "ApiTags::Comments")]
    async fn patch_comment(
        &self,
        Path(comment_id): Path<String>,
        Json(input): Json<VotePatch>,
    ) -> poem::Result<Json<CommentBody>> {
        let comment_id = parse_id(&comment_id)?;
        require_fields(&input)?;
        let Some(inc_votes) = input.inc_votes else {
            return Err(ApiError::bad_request().into());
        };

        let comment = comments::update_comment_votes(&self.db, comment_id, inc_votes).await?;
        Ok(Json(CommentBody { comment }))
    }

    /// Delete a comment
    #[oai(path = "/api/comments/:comment_id", method = "delete", tag = "ApiTags::Comments")]
    async fn delete_comment(&self, Path(comment_id): Path<String>) -> poem::Result<DeleteResponse> {
        let comment_id = parse_id(&comment_id)?;

        comments::delete_comment(&self.db, comment_id).await?;
        Ok(DeleteResponse::NoContent)
    }
}
