//! Serializable shapes handed to templates, carrying the derived attributes.

use serde::Serialize;

use blogly_core::domain::{DomainEntity, Post, Tag, User};

#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub image_url: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            full_name: user.full_name(),
            image_url: user.image_url.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostView {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub friendly_date: String,
    pub user_id: i32,
}

impl From<&Post> for PostView {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id(),
            title: post.title.clone(),
            content: post.content.clone(),
            created_at: post.created_at.to_rfc3339(),
            friendly_date: post.friendly_date(),
            user_id: post.user_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TagView {
    pub id: i32,
    pub name: String,
}

impl From<&Tag> for TagView {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id(),
            name: tag.name.clone(),
        }
    }
}

/// Convert a slice of domain entities for a template.
pub fn to_views<'a, T, V>(items: &'a [T]) -> Vec<V>
where
    V: From<&'a T>,
{
    items.iter().map(V::from).collect()
}
