use poem_openapi::{
    ApiResponse, Object, OpenApi,
    param::{Path, Query},
    payload::Json,
};
use sea_orm::DatabaseConnection;
use validator::Validate;

use super::{ApiTags, DeleteResponse, require_fields};
use crate::{
    entities::comment,
    error::ApiError,
    models::{
        articles::{self, ArticleDetail, ArticleSummary, NewArticle},
        comments,
    },
    query::{ArticleQuery, Page, parse_id},
};

#[derive(Object, Validate)]
#[oai(rename_all = "snake_case")]
pub struct ArticleCreate {
    #[validate(required, length(min = 1))]
    title: Option<String>,
    #[validate(required, length(min = 1))]
    topic: Option<String>,
    #[validate(required, length(min = 1))]
    author: Option<String>,
    #[validate(required, length(min = 1))]
    body: Option<String>,
    article_img_url: Option<String>,
}

#[derive(Object, Validate)]
#[oai(rename_all = "snake_case")]
pub struct VotePatch {
    #[validate(required)]
    pub inc_votes: Option<i32>,
}

#[derive(Object, Validate)]
#[oai(rename_all = "snake_case")]
pub struct CommentCreate {
    #[validate(required, length(min = 1))]
    username: Option<String>,
    #[validate(required, length(min = 1))]
    body: Option<String>,
}

#[derive(Object)]
#[oai(rename_all = "snake_case")]
struct ArticlesBody {
    articles: Vec<ArticleSummary>,
    total_count: u64,
}

#[derive(Object)]
struct ArticleBody {
    article: ArticleDetail,
}

#[derive(Object)]
struct CommentsBody {
    comments: Vec<comment::Model>,
}

#[derive(Object)]
struct NewCommentBody {
    #[oai(rename = "newComment")]
    new_comment: comment::Model,
}

#[derive(ApiResponse)]
enum CreateArticleResponse {
    #[oai(status = 201)]
    Created(Json<ArticleBody>),
}

#[derive(ApiResponse)]
enum CreateCommentResponse {
    #[oai(status = 201)]
    Created(Json<NewCommentBody>),
}

pub struct ArticlesApi {
    db: DatabaseConnection,
}

impl ArticlesApi {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[OpenApi]
impl ArticlesApi {
    /// Articles, filtered, sorted and paginated
    #[oai(path = "/api/articles", method = "get", tag = "ApiTags::Articles")]
    async fn get_articles(
        &self,
        Query(topic): Query<Option<String>>,
        Query(sort_by): Query<Option<String>>,
        Query(order): Query<Option<String>>,
        Query(limit): Query<Option<String>>,
        Query(p): Query<Option<String>>,
    ) -> poem::Result<Json<ArticlesBody>> {
        let query = ArticleQuery::parse(
            topic,
            sort_by.as_deref(),
            order.as_deref(),
            limit.as_deref(),
            p.as_deref(),
        )?;

        let (articles, total_count) = articles::select_articles(&self.db, &query).await?;
        Ok(Json(ArticlesBody {
            articles,
            total_count,
        }))
    }

    /// Create an article
    #[oai(path = "/api/articles", method = "post", tag = "ApiTags::Articles")]
    async fn post_article(
        &self,
        Json(input): Json<ArticleCreate>,
    ) -> poem::Result<CreateArticleResponse> {
        require_fields(&input)?;
        let (Some(title), Some(topic), Some(author), Some(body)) =
            (input.title, input.topic, input.author, input.body)
        else {
            return Err(ApiError::bad_request().into());
        };

        let article = articles::insert_article(
            &self.db,
            NewArticle {
                title,
                topic,
                author,
                body,
                article_img_url: input.article_img_url,
            },
        )
        .await?;
        Ok(CreateArticleResponse::Created(Json(ArticleBody { article })))
    }

    /// One article with its body and comment count
    #[oai(path = "/api/articles/:article_id", method = "get", tag = "ApiTags::Articles")]
    async fn get_article(&self, Path(article_id): Path<String>) -> poem::Result<Json<ArticleBody>> {
        let article_id = parse_id(&article_id)?;

        let article = articles::select_article(&self.db, article_id).await?;
        Ok(Json(ArticleBody { article }))
    }

    /// Add `inc_votes` (may be negative) to an article's votes
    #[oai(path = "/api/articles/:article_id", method = "patch", tag = "ApiTags::Articles")]
    async fn patch_article(
        &self,
        Path(article_id): Path<String>,
        Json(input): Json<VotePatch>,
    ) -> poem::Result<Json<ArticleBody>> {
        let article_id = parse_id(&article_id)?;
        require_fields(&input)?;
        let Some(inc_votes) = input.inc_votes else {
            return Err(ApiError::bad_request().into());
        };

        let article = articles::update_article_votes(&self.db, article_id, inc_votes).await?;
        Ok(Json(ArticleBody { article }))
    }

    /// Delete an article and its comments
    #[oai(path = "/api/articles/:article_id", method = "delete", tag = "ApiTags::Articles")]
    async fn delete_article(&self, Path(article_id): Path<String>) -> poem::Result<DeleteResponse> {
        let article_id = parse_id(&article_id)?;

        articles::delete_article(&self.db, article_id).await?;
        Ok(DeleteResponse::NoContent)
    }

    /// Comments on an article, newest first
    #[oai(path = "/api/articles/:article_id/comments", method = "get", tag = "ApiTags::Comments")]
    async fn get_article_comments(
        &self,
        Path(article_id): Path<String>,
        Query(limit): Query<Option<String>>,
        Query(p): Query<Option<String>>,
    ) -> poem::Result<Json<CommentsBody>> {
        let article_id = parse_id(&article_id)?;
        let page = Page::parse(limit.as_deref(), p.as_deref())?;

        let comments = comments::select_comments(&self.db, article_id, page).await?;
        Ok(Json(CommentsBody { comments }))
    }

    /// Comment on an article
    #[oai(path = "/api/articles/:article_id/comments", method = "post", tag = "ApiTags::Comments")]
    async fn post_article_comment(
        &self,
        Path(article_id): Path<String>,
        Json(input): Json<CommentCreate>,
    ) -> poem::Result<CreateCommentResponse> {
        let article_id = parse_id(&article_id)?;
        require_fields(&input)?;
        let (Some(username), Some(body)) = (input.username, input.body) else {
            return Err(ApiError::bad_request().into());
        };

        let new_comment = comments::insert_comment(&self.db, article_id, username, body).await?;
        Ok(CreateCommentResponse::Created(Json(NewCommentBody {
            new_comment,
        })))
    }
}
