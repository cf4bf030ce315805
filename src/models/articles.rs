//! Article listing, detail and write operations.
//!
//! Listing and detail share one shape: articles left-joined to their
//! comments and grouped so `comment_count` is an aggregate, never stored.
use chrono::Utc;
use poem_openapi::Object;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
    prelude::DateTimeWithTimeZone,
    sea_query::{Expr, SimpleExpr},
};
use tracing::debug;

use super::{exists::check_exists, votes_stay_in_range};
use crate::{
    entities::{article, comment, topic},
    error::{ApiError, ApiResult},
    query::{ArticleQuery, SortKey},
};

/// Columns of the list view. `body` is left out on purpose.
const SUMMARY_COLUMNS: [article::Column; 7] = [
    article::Column::Author,
    article::Column::Title,
    article::Column::ArticleId,
    article::Column::Topic,
    article::Column::CreatedAt,
    article::Column::Votes,
    article::Column::ArticleImgUrl,
];

#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Object)]
#[oai(rename_all = "snake_case")]
pub struct ArticleSummary {
    pub article_id: i32,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub created_at: DateTimeWithTimeZone,
    pub votes: i32,
    pub article_img_url: String,
    pub comment_count: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Object)]
#[oai(rename_all = "snake_case")]
pub struct ArticleDetail {
    pub article_id: i32,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    pub created_at: DateTimeWithTimeZone,
    pub votes: i32,
    pub article_img_url: String,
    pub comment_count: i64,
}

impl ArticleDetail {
    fn from_model(model: article::Model, comment_count: i64) -> Self {
        Self {
            article_id: model.article_id,
            title: model.title,
            topic: model.topic,
            author: model.author,
            body: model.body,
            created_at: model.created_at,
            votes: model.votes,
            article_img_url: model.article_img_url,
            comment_count,
        }
    }
}

pub struct NewArticle {
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    pub article_img_url: Option<String>,
}

fn comment_count() -> SimpleExpr {
    Expr::col((comment::Entity, comment::Column::CommentId)).count()
}

/// Articles joined to comments, grouped by every selected article column.
fn with_comment_count(columns: &[article::Column]) -> Select<article::Entity> {
    let mut select = article::Entity::find()
        .select_only()
        .columns(columns.iter().copied())
        .column_as(comment_count(), "comment_count")
        .join(JoinType::LeftJoin, article::Relation::Comments.def());

    for column in columns {
        select = select.group_by(*column);
    }

    select
}

fn topic_filter(query: &ArticleQuery) -> Select<article::Entity> {
    let select = article::Entity::find();
    match &query.topic {
        Some(slug) => select.filter(article::Column::Topic.eq(slug.as_str())),
        None => select,
    }
}

/// Builds the paginated listing. Sort column and direction come from
/// validated enums; the topic is a bound value.
pub fn list_query(query: &ArticleQuery) -> Select<article::Entity> {
    let mut select = with_comment_count(&SUMMARY_COLUMNS);

    if let Some(slug) = &query.topic {
        select = select.filter(article::Column::Topic.eq(slug.as_str()));
    }

    select = select.order_by(query.sort_by.column(), query.order.into());
    if query.sort_by != SortKey::ArticleId {
        select = select.order_by_asc(article::Column::ArticleId);
    }

    select
        .limit(query.page.limit)
        .offset(query.page.offset())
}

/// One page of articles plus the number matching the topic filter overall.
///
/// The topic existence check runs alongside the listing; an unknown topic is
/// reported as not found even though the listing itself would be empty.
pub async fn select_articles(
    db: &DatabaseConnection,
    query: &ArticleQuery,
) -> ApiResult<(Vec<ArticleSummary>, u64)> {
    debug!(?query, "Listing articles");

    let topic_check = async {
        match &query.topic {
            Some(slug) => {
                check_exists::<topic::Entity, _>(db, topic::Column::Slug, slug.as_str(), "Topic")
                    .await
            }
            None => Ok(()),
        }
    };
    let rows = list_query(query).into_model::<ArticleSummary>().all(db);
    let total = topic_filter(query).count(db);

    let (exists, rows, total) = tokio::join!(topic_check, rows, total);
    exists?;

    Ok((rows?, total?))
}

pub async fn select_article(db: &DatabaseConnection, article_id: i32) -> ApiResult<ArticleDetail> {
    let mut columns = SUMMARY_COLUMNS.to_vec();
    columns.push(article::Column::Body);

    with_comment_count(&columns)
        .filter(article::Column::ArticleId.eq(article_id))
        .into_model::<ArticleDetail>()
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Article"))
}

pub async fn insert_article(db: &DatabaseConnection, input: NewArticle) -> ApiResult<ArticleDetail> {
    let created = article::ActiveModel {
        title: Set(input.title),
        topic: Set(input.topic),
        author: Set(input.author),
        body: Set(input.body),
        created_at: Set(Utc::now().fixed_offset()),
        votes: Set(0),
        article_img_url: Set(input
            .article_img_url
            .unwrap_or_else(|| article::DEFAULT_IMG_URL.to_string())),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(ArticleDetail::from_model(created, 0))
}

/// Adds `inc_votes` to the stored count in a single statement. An increment
/// that would leave `votes` outside `i32` is a bad request.
pub async fn update_article_votes(
    db: &DatabaseConnection,
    article_id: i32,
    inc_votes: i32,
) -> ApiResult<ArticleDetail> {
    let result = article::Entity::update_many()
        .col_expr(
            article::Column::Votes,
            Expr::col(article::Column::Votes).add(inc_votes),
        )
        .filter(article::Column::ArticleId.eq(article_id))
        .filter(votes_stay_in_range(article::Column::Votes, inc_votes))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        check_exists::<article::Entity, _>(db, article::Column::ArticleId, article_id, "Article")
            .await?;
        debug!(article_id, inc_votes, "Rejected vote increment out of range");
        return Err(ApiError::bad_request());
    }

    select_article(db, article_id).await
}

/// Removes the article's comments, then the article. The two statements
/// are not wrapped in a transaction.
pub async fn delete_article(db: &DatabaseConnection, article_id: i32) -> ApiResult<()> {
    let comments = comment::Entity::delete_many()
        .filter(comment::Column::ArticleId.eq(article_id))
        .exec(db)
        .await?;
    debug!(article_id, removed = comments.rows_affected, "Removed comments");

    let result = article::Entity::delete_by_id(article_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found("Article"));
    }

    Ok(())
}
