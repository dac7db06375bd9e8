//! Home page.

use actix_web::{HttpRequest, HttpResponse, web};
use blogly_core::domain::User;
use serde::Serialize;

use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views::{self, PostView, UserView, context};

/// Number of posts shown on the home page.
pub const HOME_POST_LIMIT: u64 = 5;

#[derive(Serialize)]
struct HomeEntry {
    post: PostView,
    author: UserView,
}

/// GET / - the most recent posts, newest first.
pub async fn home(req: HttpRequest, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.recent(HOME_POST_LIMIT).await?;

    let mut entries = Vec::with_capacity(posts.len());
    for post in &posts {
        let author: User = state.users.get(post.user_id).await?;
        entries.push(HomeEntry {
            post: post.into(),
            author: (&author).into(),
        });
    }

    views::render(&req, "posts/homepage.html", context! { posts => entries })
}
