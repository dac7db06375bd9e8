//! Bulk replacement of post/tag pairs.
//!
//! Both directions share one join table. Callers pass the transaction the owning
//! row was written in so the replacement commits or rolls back with it.

use std::collections::BTreeSet;

use sea_orm::sea_query::SimpleExpr;
use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QuerySelect};

use blogly_core::domain::PostTag;
use blogly_core::error::RepoError;

use super::entity::{post, post_tag, tag};
use super::postgres_base::map_db_err;

/// Attach exactly the existing tags among `tag_ids` to the post.
pub(crate) async fn replace_tags_of_post(
    txn: &DatabaseTransaction,
    post_id: i32,
    tag_ids: &[i32],
) -> Result<(), RepoError> {
    let resolved = existing_ids::<tag::Entity, _>(txn, tag::Column::Id, tag_ids).await?;
    let current = pairs_where(txn, post_tag::Column::PostId.eq(post_id)).await?;
    let desired = resolved
        .into_iter()
        .map(|tag_id| PostTag::new(post_id, tag_id))
        .collect();

    sync(txn, current, desired).await
}

/// Attach the tag to exactly the existing posts among `post_ids`.
pub(crate) async fn replace_posts_of_tag(
    txn: &DatabaseTransaction,
    tag_id: i32,
    post_ids: &[i32],
) -> Result<(), RepoError> {
    let resolved = existing_ids::<post::Entity, _>(txn, post::Column::Id, post_ids).await?;
    let current = pairs_where(txn, post_tag::Column::TagId.eq(tag_id)).await?;
    let desired = resolved
        .into_iter()
        .map(|post_id| PostTag::new(post_id, tag_id))
        .collect();

    sync(txn, current, desired).await
}

/// Ids from `ids` that name a row of `E`. Unknown ids are dropped.
async fn existing_ids<E, C>(
    txn: &DatabaseTransaction,
    id_column: C,
    ids: &[i32],
) -> Result<Vec<i32>, RepoError>
where
    E: EntityTrait,
    C: ColumnTrait,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    E::find()
        .select_only()
        .column(id_column)
        .filter(id_column.is_in(ids.iter().copied()))
        .into_tuple::<i32>()
        .all(txn)
        .await
        .map_err(map_db_err)
}

async fn pairs_where(
    txn: &DatabaseTransaction,
    condition: SimpleExpr,
) -> Result<BTreeSet<PostTag>, RepoError> {
    let rows = post_tag::Entity::find()
        .filter(condition)
        .all(txn)
        .await
        .map_err(map_db_err)?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Delete pairs no longer wanted and insert the missing ones. Untouched pairs stay.
async fn sync(
    txn: &DatabaseTransaction,
    current: BTreeSet<PostTag>,
    desired: BTreeSet<PostTag>,
) -> Result<(), RepoError> {
    let stale: Vec<PostTag> = current.difference(&desired).copied().collect();
    let missing: Vec<PostTag> = desired.difference(&current).copied().collect();

    for pair in &stale {
        post_tag::Entity::delete_by_id((pair.post_id, pair.tag_id))
            .exec(txn)
            .await
            .map_err(map_db_err)?;
    }

    if !missing.is_empty() {
        post_tag::Entity::insert_many(missing.iter().copied().map(post_tag::ActiveModel::from))
            .exec_without_returning(txn)
            .await
            .map_err(map_db_err)?;
    }

    tracing::debug!(
        detached = stale.len(),
        attached = missing.len(),
        "Replaced post/tag pairs"
    );
    Ok(())
}
