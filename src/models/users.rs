use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::{
    entities::user,
    error::{ApiError, ApiResult},
};

pub async fn select_users(db: &DatabaseConnection) -> ApiResult<Vec<user::Model>> {
    let users = user::Entity::find()
        .order_by_asc(user::Column::Username)
        .all(db)
        .await?;

    Ok(users)
}

pub async fn select_user(db: &DatabaseConnection, username: &str) -> ApiResult<user::Model> {
    user::Entity::find_by_id(username.to_owned())
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))
}
