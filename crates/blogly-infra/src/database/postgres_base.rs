use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{DbConn, DbErr, EntityTrait, PrimaryKeyTrait, SqlErr};

use blogly_core::domain::DomainEntity;
use blogly_core::error::RepoError;
use blogly_core::ports::BaseRepository;

/// Generic SeaORM repository implementation.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

/// Classify a store error.
///
/// Unique and foreign-key violations become [`RepoError::Constraint`].
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg))
        | Some(SqlErr::ForeignKeyConstraintViolation(msg)) => return RepoError::Constraint(msg),
        _ => {}
    }

    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

pub(crate) fn not_found<T: DomainEntity>(id: i32) -> RepoError {
    RepoError::NotFound {
        entity_type: T::ENTITY_TYPE,
        id,
    }
}

#[async_trait]
impl<E, T> BaseRepository<T> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: Sync + Send,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = i32>,
    T: DomainEntity + From<E::Model>,
{
    async fn find_by_id(&self, id: i32) -> Result<Option<T>, RepoError> {
        tracing::debug!(entity = T::ENTITY_TYPE, id, "Finding by id");

        let result = E::find_by_id(id).one(&self.db).await.map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        let result = E::find().all(&self.db).await.map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        // Dependent posts and post/tag pairs go with it via ON DELETE CASCADE.
        let result = E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(not_found::<T>(id));
        }

        tracing::info!(entity = T::ENTITY_TYPE, id, "Deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnAcquireErr, DbErr};

    use super::*;

    #[test]
    fn pool_exhaustion_is_a_connection_error() {
        let err = map_db_err(DbErr::ConnectionAcquire(ConnAcquireErr::Timeout));
        assert!(matches!(err, RepoError::Connection(_)));
    }

    #[test]
    fn other_store_failures_are_query_errors() {
        let err = map_db_err(DbErr::Custom("boom".to_owned()));
        assert!(matches!(err, RepoError::Query(msg) if msg.contains("boom")));
    }
}
