//! SeaORM repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use blogly_core::domain::{Post, PostFields, Tag, TagFields, User, UserFields};
use blogly_core::error::RepoError;
use blogly_core::ports::{PostRepository, TagRepository, UserRepository};

use super::associations::{replace_posts_of_tag, replace_tags_of_post};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag;
use super::entity::tag::{self, Entity as TagEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err, not_found};

/// SeaORM user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// SeaORM post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// SeaORM tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, fields: UserFields) -> Result<User, RepoError> {
        let model = user::ActiveModel::from(&fields)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::info!(user_id = model.id, "User created");
        Ok(model.into())
    }

    async fn update(&self, id: i32, fields: UserFields) -> Result<User, RepoError> {
        let existing = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| not_found::<User>(id))?;

        let mut active = existing.into_active_model();
        active.apply(&fields);
        let model = active.update(&self.db).await.map_err(map_db_err)?;

        tracing::info!(user_id = id, "User updated");
        Ok(model.into())
    }

    async fn list_by_name(&self) -> Result<Vec<User>, RepoError> {
        let result = UserEntity::find()
            .order_by_asc(user::Column::LastName)
            .order_by_asc(user::Column::FirstName)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, user_id: i32, fields: PostFields) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        if UserEntity::find_by_id(user_id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .is_none()
        {
            return Err(not_found::<User>(user_id));
        }

        let mut active = post::ActiveModel {
            id: NotSet,
            title: NotSet,
            content: NotSet,
            created_at: Set(Utc::now().into()),
            user_id: Set(user_id),
        };
        active.apply(&fields);
        let model = active.insert(&txn).await.map_err(map_db_err)?;

        replace_tags_of_post(&txn, model.id, fields.tag_ids()).await?;
        txn.commit().await.map_err(map_db_err)?;

        tracing::info!(post_id = model.id, user_id, "Post created");
        Ok(model.into())
    }

    async fn update(&self, id: i32, fields: PostFields) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let existing = PostEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| not_found::<Post>(id))?;

        let mut active = existing.into_active_model();
        active.apply(&fields);
        let model = active.update(&txn).await.map_err(map_db_err)?;

        replace_tags_of_post(&txn, id, fields.tag_ids()).await?;
        txn.commit().await.map_err(map_db_err)?;

        tracing::info!(post_id = id, "Post updated");
        Ok(model.into())
    }

    async fn recent(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(user_id, "Finding posts by user");

        let result = PostEntity::find()
            .filter(post::Column::UserId.eq(user_id))
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn tags_of(&self, post_id: i32) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .inner_join(post_tag::Entity)
            .filter(post_tag::Column::PostId.eq(post_id))
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

/// A unique violation on `tags.name` surfaces as a readable duplicate message.
fn duplicate_tag(err: sea_orm::DbErr, name: &str) -> RepoError {
    match map_db_err(err) {
        RepoError::Constraint(_) => RepoError::Constraint(format!("Tag '{name}' already exists")),
        other => other,
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn create(&self, fields: TagFields) -> Result<Tag, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let model = tag::ActiveModel {
            id: NotSet,
            name: Set(fields.name().to_owned()),
        }
        .insert(&txn)
        .await
        .map_err(|e| duplicate_tag(e, fields.name()))?;

        replace_posts_of_tag(&txn, model.id, fields.post_ids()).await?;
        txn.commit().await.map_err(map_db_err)?;

        tracing::info!(tag_id = model.id, "Tag created");
        Ok(model.into())
    }

    async fn update(&self, id: i32, fields: TagFields) -> Result<Tag, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let existing = TagEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| not_found::<Tag>(id))?;

        let mut active = existing.into_active_model();
        active.name = Set(fields.name().to_owned());
        let model = active
            .update(&txn)
            .await
            .map_err(|e| duplicate_tag(e, fields.name()))?;

        replace_posts_of_tag(&txn, id, fields.post_ids()).await?;
        txn.commit().await.map_err(map_db_err)?;

        tracing::info!(tag_id = id, "Tag updated");
        Ok(model.into())
    }

    async fn posts_of(&self, tag_id: i32) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .inner_join(post_tag::Entity)
            .filter(post_tag::Column::TagId.eq(tag_id))
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
