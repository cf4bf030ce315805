//! Validation of untrusted query-string and path values.
//!
//! Column names and sort directions cannot be bound as SQL parameters, so
//! they are only ever produced from the closed enums below. Filter values
//! (e.g. `topic`) stay as strings and are bound by the query builder.
use sea_orm::Order;
use tracing::debug;

use crate::{
    entities::article,
    error::{ApiError, ApiResult},
};

pub const DEFAULT_LIMIT: u64 = 10;
pub const DEFAULT_PAGE: u64 = 1;

/// Storage binds LIMIT and OFFSET as signed 64-bit integers.
const MAX_ROWS: u64 = i64::MAX as u64;

/// Article columns a listing may be sorted by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortKey {
    Title,
    ArticleId,
    Author,
    #[default]
    CreatedAt,
    Votes,
    ArticleImgUrl,
    Topic,
}

impl SortKey {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "title" => Some(SortKey::Title),
            "article_id" => Some(SortKey::ArticleId),
            "author" => Some(SortKey::Author),
            "created_at" => Some(SortKey::CreatedAt),
            "votes" => Some(SortKey::Votes),
            "article_img_url" => Some(SortKey::ArticleImgUrl),
            "topic" => Some(SortKey::Topic),
            _ => None,
        }
    }

    pub fn column(self) -> article::Column {
        match self {
            SortKey::Title => article::Column::Title,
            SortKey::ArticleId => article::Column::ArticleId,
            SortKey::Author => article::Column::Author,
            SortKey::CreatedAt => article::Column::CreatedAt,
            SortKey::Votes => article::Column::Votes,
            SortKey::ArticleImgUrl => article::Column::ArticleImgUrl,
            SortKey::Topic => article::Column::Topic,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("asc") {
            Some(SortOrder::Asc)
        } else if raw.eq_ignore_ascii_case("desc") {
            Some(SortOrder::Desc)
        } else {
            None
        }
    }
}

impl From<SortOrder> for Order {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub limit: u64,
    pub page: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
        }
    }
}

impl Page {
    pub fn parse(limit: Option<&str>, page: Option<&str>) -> ApiResult<Self> {
        let limit = match limit {
            Some(raw) => parse_count(raw)
                .filter(|l| *l <= MAX_ROWS)
                .ok_or_else(|| reject("limit", raw))?,
            None => DEFAULT_LIMIT,
        };
        let page = match page {
            Some(raw) => parse_count(raw)
                .filter(|p| (1..=MAX_ROWS).contains(p))
                .ok_or_else(|| reject("p", raw))?,
            None => DEFAULT_PAGE,
        };

        let in_range = (page - 1)
            .checked_mul(limit)
            .is_some_and(|offset| offset <= MAX_ROWS);
        if !in_range {
            debug!(limit, page, "Rejected page beyond addressable rows");
            return Err(ApiError::bad_request());
        }

        Ok(Self { limit, page })
    }

    /// Rows skipped before the returned slice. `parse` guarantees this fits.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    pub topic: Option<String>,
    pub sort_by: SortKey,
    pub order: SortOrder,
    pub page: Page,
}

impl ArticleQuery {
    pub fn parse(
        topic: Option<String>,
        sort_by: Option<&str>,
        order: Option<&str>,
        limit: Option<&str>,
        page: Option<&str>,
    ) -> ApiResult<Self> {
        let sort_by = match sort_by {
            Some(raw) => SortKey::parse(raw).ok_or_else(|| reject("sort_by", raw))?,
            None => SortKey::default(),
        };
        let order = match order {
            Some(raw) => SortOrder::parse(raw).ok_or_else(|| reject("order", raw))?,
            None => SortOrder::default(),
        };

        Ok(Self {
            topic,
            sort_by,
            order,
            page: Page::parse(limit, page)?,
        })
    }
}

/// Parses a path id such as `article_id`. Ids start at 1.
pub fn parse_id(raw: &str) -> ApiResult<i32> {
    parse_count(raw)
        .filter(|id| *id >= 1)
        .and_then(|id| i32::try_from(id).ok())
        .ok_or_else(|| reject("id", raw))
}

/// Digits only: no sign, whitespace, or trailing tokens.
fn parse_count(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn reject(field: &str, raw: &str) -> ApiError {
    debug!("Rejected {field}={raw:?}");
    ApiError::bad_request()
}
