//! Post handlers.

use actix_web::{HttpRequest, HttpResponse, web};
use blogly_core::domain::{Post, PostFields, Tag};

use super::{FormBody, form_map};
use crate::flash;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views::{self, PostView, TagView, UserView, context, to_views};

fn post_fields(body: FormBody) -> AppResult<PostFields> {
    let form = form_map(body);
    Ok(PostFields::new(
        form.required("title")?,
        form.required("content")?,
        form.ids("tags")?,
    )?)
}

/// GET /users/{id}/posts/new
pub async fn new_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let user = state.users.get(path.into_inner()).await?;
    let tags: Vec<Tag> = state.tags.find_all().await?;
    let tags: Vec<TagView> = to_views(&tags);

    views::render(
        &req,
        "posts/new.html",
        context! { user => UserView::from(&user), tags },
    )
}

/// POST /users/{id}/posts/new
pub async fn create(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: FormBody,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();
    let fields = post_fields(body)?;
    let post = state.posts.create(user_id, fields).await?;

    Ok(flash::redirect(
        format!("/users/{user_id}"),
        format!("Post '{}' added.", post.title),
    ))
}

/// GET /posts/{id}
pub async fn show(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post: Post = state.posts.get(path.into_inner()).await?;
    let author = state.users.get(post.user_id).await?;
    let tags = state.posts.tags_of(post.id).await?;
    let tags: Vec<TagView> = to_views(&tags);

    views::render(
        &req,
        "posts/show.html",
        context! {
            post => PostView::from(&post),
            author => UserView::from(&author),
            tags,
        },
    )
}

/// GET /posts/{id}/edit
pub async fn edit_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post: Post = state.posts.get(path.into_inner()).await?;
    let tags: Vec<Tag> = state.tags.find_all().await?;
    let selected: Vec<i32> = state
        .posts
        .tags_of(post.id)
        .await?
        .iter()
        .map(|tag| tag.id)
        .collect();
    let tags: Vec<TagView> = to_views(&tags);

    views::render(
        &req,
        "posts/edit.html",
        context! { post => PostView::from(&post), tags, selected },
    )
}

/// POST /posts/{id}/edit - replaces the tag set with the submitted one.
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: FormBody,
) -> AppResult<HttpResponse> {
    let fields = post_fields(body)?;
    let post = state.posts.update(path.into_inner(), fields).await?;

    Ok(flash::redirect(
        format!("/users/{}", post.user_id),
        format!("Post '{}' edited.", post.title),
    ))
}

/// POST /posts/{id}/delete
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let post: Post = state.posts.get(path.into_inner()).await?;
    state.posts.delete(post.id).await?;

    Ok(flash::redirect(
        format!("/users/{}", post.user_id),
        format!("Post '{}' deleted.", post.title),
    ))
}
