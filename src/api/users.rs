use poem_openapi::{Object, OpenApi, param::Path, payload::Json};
use sea_orm::DatabaseConnection;

use super::ApiTags;
use crate::{entities::user, models::users};

#[derive(Object)]
struct UsersBody {
    users: Vec<user::Model>,
}

#[derive(Object)]
struct UserBody {
    user: user::Model,
}

pub struct UsersApi {
    db: DatabaseConnection,
}

impl UsersApi {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[OpenApi]
impl UsersApi {
    /// All users
    #[oai(path = "/api/users", method = "get", tag = "ApiTags::Users")]
    async fn get_users(&self) -> poem::Result<Json<UsersBody>> {
        let users = users::select_users(&self.db).await?;
        Ok(Json(UsersBody { users }))
    }

    /// One user by username
    #[oai(path = "/api/users/:username", method = "get", tag = "ApiTags::Users")]
    async fn get_user(&self, Path(username): Path<String>) -> poem::Result<Json<UserBody>> {
        let user = users::select_user(&self.db, &username).await?;
        Ok(Json(UserBody { user }))
    }
}
