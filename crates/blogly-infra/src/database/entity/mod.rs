//! SeaORM entities: three tables plus the post/tag join table.

pub mod post;
pub mod post_tag;
pub mod tag;
pub mod user;
