use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::{entities::topic, error::ApiResult};

pub async fn select_topics(db: &DatabaseConnection) -> ApiResult<Vec<topic::Model>> {
    let topics = topic::Entity::find()
        .order_by_asc(topic::Column::Slug)
        .all(db)
        .await?;

    Ok(topics)
}

pub async fn insert_topic(
    db: &DatabaseConnection,
    slug: String,
    description: String,
) -> ApiResult<topic::Model> {
    let created = topic::ActiveModel {
        slug: Set(slug),
        description: Set(description),
    }
    .insert(db)
    .await?;

    Ok(created)
}
