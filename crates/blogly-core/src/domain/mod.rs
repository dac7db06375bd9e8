//! Domain entities - the core business objects.

mod post;
mod post_tag;
mod tag;
mod user;

pub use post::{FRIENDLY_DATE_FORMAT, Post, PostFields};
pub use post_tag::PostTag;
pub use tag::{Tag, TagFields};
pub use user::{DEFAULT_IMAGE_URL, User, UserFields};

use crate::error::DomainError;

/// An entity with a stable integer identity in the store.
pub trait DomainEntity: Send + Sync + 'static {
    /// Human-readable entity name used in not-found errors.
    const ENTITY_TYPE: &'static str;

    fn id(&self) -> i32;
}

/// Rejects blank values for required text fields.
fn required(field: &str, value: impl Into<String>) -> Result<String, DomainError> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(DomainError::missing(field));
    }
    Ok(value)
}

/// Sorts and de-duplicates ids submitted for an association.
fn unique_ids(mut ids: Vec<i32>) -> Vec<i32> {
    ids.sort_unstable();
    ids.dedup();
    ids
}
