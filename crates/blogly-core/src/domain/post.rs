use chrono::{DateTime, Utc};

use super::{DomainEntity, required, unique_ids};
use crate::error::DomainError;

/// strftime pattern for [`Post::friendly_date`], e.g. `Mon Jan 1  2024, 3:04 PM`.
pub const FRIENDLY_DATE_FORMAT: &str = "%a %b %-d  %Y, %-I:%M %p";

/// Post entity - a blog post owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub user_id: i32,
}

impl Post {
    pub fn friendly_date(&self) -> String {
        self.created_at.format(FRIENDLY_DATE_FORMAT).to_string()
    }
}

impl DomainEntity for Post {
    const ENTITY_TYPE: &'static str = "Post";

    fn id(&self) -> i32 {
        self.id
    }
}

/// Validated field values for creating or editing a post.
///
/// `tag_ids` is the complete desired tag set: saving replaces whatever was attached before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    title: String,
    content: String,
    tag_ids: Vec<i32>,
}

impl PostFields {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        tag_ids: Vec<i32>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            title: required("title", title)?,
            content: required("content", content)?,
            tag_ids: unique_ids(tag_ids),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn tag_ids(&self) -> &[i32] {
        &self.tag_ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn friendly_date_formats_created_at() {
        let post = Post {
            id: 1,
            title: "Hello".to_string(),
            content: "World".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 15, 4, 0).unwrap(),
            user_id: 1,
        };
        assert_eq!(post.friendly_date(), "Mon Jan 1  2024, 3:04 PM");
    }

    #[test]
    fn tag_ids_are_deduplicated() {
        let fields = PostFields::new("Hello", "World", vec![3, 1, 3, 2]).unwrap();
        assert_eq!(fields.tag_ids(), &[1, 2, 3]);
    }

    #[test]
    fn title_and_content_are_required() {
        assert!(PostFields::new("", "World", vec![]).is_err());
        assert!(PostFields::new("Hello", "", vec![]).is_err());
    }
}
