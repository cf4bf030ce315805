use poem_openapi::{ApiResponse, Object, OpenApi, payload::Json};
use sea_orm::DatabaseConnection;
use validator::Validate;

use super::{ApiTags, require_fields};
use crate::{entities::topic, error::ApiError, models::topics};

#[derive(Object, Validate)]
#[oai(rename_all = "snake_case")]
pub struct TopicCreate {
    #[validate(required, length(min = 1))]
    slug: Option<String>,
    #[validate(required, length(min = 1))]
    description: Option<String>,
}

#[derive(Object)]
struct TopicsBody {
    topics: Vec<topic::Model>,
}

#[derive(Object)]
struct TopicBody {
    topic: topic::Model,
}

#[derive(ApiResponse)]
enum CreateTopicResponse {
    #[oai(status = 201)]
    Created(Json<TopicBody>),
}

pub struct TopicsApi {
    db: DatabaseConnection,
}

impl TopicsApi {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[OpenApi]
impl TopicsApi {
    /// All topics
    #[oai(path = "/api/topics", method = "get", tag = "ApiTags::Topics")]
    async fn get_topics(&self) -> poem::Result<Json<TopicsBody>> {
        let topics = topics::select_topics(&self.db).await?;
        Ok(Json(TopicsBody { topics }))
    }

    /// Create a topic
    #[oai(path = "/api/topics", method = "post", tag = "ApiTags::Topics")]
    async fn post_topic(&self, Json(input): Json<TopicCreate>) -> poem::Result<CreateTopicResponse> {
        require_fields(&input)?;
        let (Some(slug), Some(description)) = (input.slug, input.description) else {
            return Err(ApiError::bad_request().into());
        };

        let topic = topics::insert_topic(&self.db, slug, description).await?;
        Ok(CreateTopicResponse::Created(Json(TopicBody { topic })))
    }
}
