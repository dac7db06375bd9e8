//! Tag handlers.

use actix_web::{HttpRequest, HttpResponse, web};
use blogly_core::domain::{Post, Tag, TagFields};

use super::{FormBody, form_map};
use crate::flash;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views::{self, PostView, TagView, context, to_views};

fn tag_fields(body: FormBody) -> AppResult<TagFields> {
    let form = form_map(body);
    Ok(TagFields::new(form.required("name")?, form.ids("posts")?)?)
}

/// GET /tags
pub async fn index(req: HttpRequest, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let tags: Vec<Tag> = state.tags.find_all().await?;
    let tags: Vec<TagView> = to_views(&tags);

    views::render(&req, "tags/index.html", context! { tags })
}

/// GET /tags/new
pub async fn new_form(req: HttpRequest, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts: Vec<Post> = state.posts.find_all().await?;
    let posts: Vec<PostView> = to_views(&posts);

    views::render(&req, "tags/new.html", context! { posts })
}

/// POST /tags/new
pub async fn create(state: web::Data<AppState>, body: FormBody) -> AppResult<HttpResponse> {
    let tag = state.tags.create(tag_fields(body)?).await?;

    Ok(flash::redirect("/tags", format!("Tag '{}' added", tag.name)))
}

/// GET /tags/{id}
pub async fn show(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let tag: Tag = state.tags.get(path.into_inner()).await?;
    let posts = state.tags.posts_of(tag.id).await?;
    let posts: Vec<PostView> = to_views(&posts);

    views::render(
        &req,
        "tags/show.html",
        context! { tag => TagView::from(&tag), posts },
    )
}

/// GET /tags/{id}/edit
pub async fn edit_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let tag: Tag = state.tags.get(path.into_inner()).await?;
    let posts: Vec<Post> = state.posts.find_all().await?;
    let selected: Vec<i32> = state
        .tags
        .posts_of(tag.id)
        .await?
        .iter()
        .map(|post| post.id)
        .collect();
    let posts: Vec<PostView> = to_views(&posts);

    views::render(
        &req,
        "tags/edit.html",
        context! { tag => TagView::from(&tag), posts, selected },
    )
}

/// POST /tags/{id}/edit - replaces the post set with the submitted one.
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: FormBody,
) -> AppResult<HttpResponse> {
    let fields = tag_fields(body)?;
    let tag = state.tags.update(path.into_inner(), fields).await?;

    Ok(flash::redirect("/tags", format!("Tag '{}' edited", tag.name)))
}

/// POST /tags/{id}/delete - posts carrying the tag are kept.
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let tag: Tag = state.tags.get(path.into_inner()).await?;
    state.tags.delete(tag.id).await?;

    Ok(flash::redirect("/tags", format!("Tag '{}' deleted", tag.name)))
}
