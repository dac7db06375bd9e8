use super::{DomainEntity, required, unique_ids};
use crate::error::DomainError;

/// Tag entity - a uniquely named label attachable to many posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i32,
    pub name: String,
}

impl DomainEntity for Tag {
    const ENTITY_TYPE: &'static str = "Tag";

    fn id(&self) -> i32 {
        self.id
    }
}

/// Validated field values for creating or editing a tag.
///
/// `post_ids` is the complete desired post set for the tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFields {
    name: String,
    post_ids: Vec<i32>,
}

impl TagFields {
    pub fn new(name: impl Into<String>, post_ids: Vec<i32>) -> Result<Self, DomainError> {
        Ok(Self {
            name: required("name", name)?,
            post_ids: unique_ids(post_ids),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn post_ids(&self) -> &[i32] {
        &self.post_ids
    }
}
