//! Storage operations, one module per resource.
//!
//! Everything here takes the connection explicitly and returns
//! [`ApiResult`](crate::error::ApiResult); storage errors are translated on
//! the way out through `?`.
pub mod articles;
pub mod comments;
pub mod exists;
pub mod topics;
pub mod users;

use sea_orm::{ColumnTrait, sea_query::SimpleExpr};

/// Row filter that only matches when `column + inc_votes` still fits an
/// `i32`. Backends differ on overflow (Postgres raises, SQLite widens), so the
/// bound is applied in the UPDATE itself.
fn votes_stay_in_range<C: ColumnTrait>(column: C, inc_votes: i32) -> SimpleExpr {
    if inc_votes >= 0 {
        column.lte(i32::MAX - inc_votes)
    } else {
        column.gte(i32::MIN - inc_votes)
    }
}
