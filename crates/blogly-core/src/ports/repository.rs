use async_trait::async_trait;

use crate::domain::{DomainEntity, Post, PostFields, Tag, TagFields, User, UserFields};
use crate::error::RepoError;

/// Generic repository trait defining the operations every entity shares.
#[async_trait]
pub trait BaseRepository<T>: Send + Sync
where
    T: DomainEntity,
{
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: i32) -> Result<Option<T>, RepoError>;

    /// Fetch an entity or fail with [`RepoError::NotFound`].
    ///
    /// Callers must never proceed with a missing entity.
    async fn get(&self, id: i32) -> Result<T, RepoError> {
        self.find_by_id(id).await?.ok_or(RepoError::NotFound {
            entity_type: T::ENTITY_TYPE,
            id,
        })
    }

    /// All rows, in store order.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Delete an entity by its ID, cascading to dependent rows.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}

/// User repository.
#[async_trait]
pub trait UserRepository: BaseRepository<User> {
    async fn create(&self, fields: UserFields) -> Result<User, RepoError>;

    /// Overwrite all fields of an existing user.
    async fn update(&self, id: i32, fields: UserFields) -> Result<User, RepoError>;

    /// All users ordered by last name, then first name.
    async fn list_by_name(&self) -> Result<Vec<User>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post> {
    /// Create a post for `user_id` and attach the requested tags that exist.
    async fn create(&self, user_id: i32, fields: PostFields) -> Result<Post, RepoError>;

    /// Overwrite title and content and replace the tag set, atomically.
    async fn update(&self, id: i32, fields: PostFields) -> Result<Post, RepoError>;

    /// The newest `limit` posts, newest first.
    async fn recent(&self, limit: u64) -> Result<Vec<Post>, RepoError>;

    /// Posts written by a user, newest first.
    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Post>, RepoError>;

    /// Tags attached to a post, by name.
    async fn tags_of(&self, post_id: i32) -> Result<Vec<Tag>, RepoError>;
}

/// Tag repository.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag> {
    /// Create a tag and attach it to the requested posts that exist.
    ///
    /// Fails with [`RepoError::Constraint`] if the name is taken.
    async fn create(&self, fields: TagFields) -> Result<Tag, RepoError>;

    /// Rename the tag and replace its post set, atomically.
    async fn update(&self, id: i32, fields: TagFields) -> Result<Tag, RepoError>;

    /// Posts carrying a tag, newest first.
    async fn posts_of(&self, tag_id: i32) -> Result<Vec<Post>, RepoError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SingleTagRepository(Tag);

    #[async_trait]
    impl BaseRepository<Tag> for SingleTagRepository {
        async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RepoError> {
            Ok((self.0.id == id).then(|| self.0.clone()))
        }

        async fn find_all(&self) -> Result<Vec<Tag>, RepoError> {
            Ok(vec![self.0.clone()])
        }

        async fn delete(&self, _id: i32) -> Result<(), RepoError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn get_returns_existing_entity() {
        let repo = SingleTagRepository(Tag {
            id: 7,
            name: "tech".to_string(),
        });
        let tag = repo.get(7).await.unwrap();
        assert_eq!(tag.name, "tech");
    }

    #[tokio::test]
    async fn get_reports_missing_entity() {
        let repo = SingleTagRepository(Tag {
            id: 7,
            name: "tech".to_string(),
        });
        let err = repo.get(999_999).await.unwrap_err();
        assert!(matches!(
            err,
            RepoError::NotFound {
                entity_type: "Tag",
                id: 999_999
            }
        ));
    }
}
