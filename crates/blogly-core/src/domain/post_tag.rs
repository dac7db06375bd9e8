/// A tag attached to a post. The pair is its own identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostTag {
    pub post_id: i32,
    pub tag_id: i32,
}

impl PostTag {
    pub fn new(post_id: i32, tag_id: i32) -> Self {
        Self { post_id, tag_id }
    }
}
