use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Value};

use crate::error::{ApiError, ApiResult};

/// Fails with `NotFound("<what> not found")` unless a row of `E` has
/// `column = value`.
///
/// Table and column come from the entity types, so nothing user-supplied
/// reaches an identifier position; `value` is bound.
pub async fn check_exists<E, V>(
    db: &DatabaseConnection,
    column: E::Column,
    value: V,
    what: &str,
) -> ApiResult<()>
where
    E: EntityTrait,
    E::Model: Send + Sync,
    V: Into<Value>,
{
    let found = E::find().filter(column.eq(value)).count(db).await?;

    if found == 0 {
        return Err(ApiError::not_found(what));
    }

    Ok(())
}
