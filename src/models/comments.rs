use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, sea_query::Expr,
};
use tracing::debug;

use super::{exists::check_exists, votes_stay_in_range};
use crate::{
    entities::{article, comment},
    error::{ApiError, ApiResult},
    query::Page,
};

/// Newest first. An unknown article is not found even when the page would
/// simply be empty.
pub async fn select_comments(
    db: &DatabaseConnection,
    article_id: i32,
    page: Page,
) -> ApiResult<Vec<comment::Model>> {
    let article_check = check_exists::<article::Entity, _>(
        db,
        article::Column::ArticleId,
        article_id,
        "Article",
    );
    let rows = comment::Entity::find()
        .filter(comment::Column::ArticleId.eq(article_id))
        .order_by_desc(comment::Column::CreatedAt)
        .order_by_desc(comment::Column::CommentId)
        .limit(page.limit)
        .offset(page.offset())
        .all(db);

    let (exists, rows) = tokio::join!(article_check, rows);
    exists?;

    Ok(rows?)
}

/// A missing article or author surfaces from the foreign keys as not found.
pub async fn insert_comment(
    db: &DatabaseConnection,
    article_id: i32,
    author: String,
    body: String,
) -> ApiResult<comment::Model> {
    let created = comment::ActiveModel {
        body: Set(body),
        article_id: Set(article_id),
        author: Set(author),
        votes: Set(0),
        created_at: Set(Utc::now().fixed_offset()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(created)
}

pub async fn update_comment_votes(
    db: &DatabaseConnection,
    comment_id: i32,
    inc_votes: i32,
) -> ApiResult<comment::Model> {
    let result = comment::Entity::update_many()
        .col_expr(
            comment::Column::Votes,
            Expr::col(comment::Column::Votes).add(inc_votes),
        )
        .filter(comment::Column::CommentId.eq(comment_id))
        .filter(votes_stay_in_range(comment::Column::Votes, inc_votes))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        check_exists::<comment::Entity, _>(db, comment::Column::CommentId, comment_id, "Comment")
            .await?;
        debug!(comment_id, inc_votes, "Rejected vote increment out of range");
        return Err(ApiError::bad_request());
    }

    comment::Entity::find_by_id(comment_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Comment"))
}

pub async fn delete_comment(db: &DatabaseConnection, comment_id: i32) -> ApiResult<()> {
    let result = comment::Entity::delete_by_id(comment_id).exec(db).await?;

    if result.rows_affected == 0 {
        return Err(ApiError::not_found("Comment"));
    }

    Ok(())
}
