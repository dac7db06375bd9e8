//! User handlers.

use actix_web::{HttpRequest, HttpResponse, web};
use blogly_core::domain::UserFields;

use super::{FormBody, form_map};
use crate::flash;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views::{self, PostView, UserView, context, to_views};

fn user_fields(body: FormBody) -> AppResult<UserFields> {
    let form = form_map(body);
    Ok(UserFields::new(
        form.required("first_name")?,
        form.required("last_name")?,
        form.optional("image_url"),
    )?)
}

/// GET /users
pub async fn index(req: HttpRequest, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users = state.users.list_by_name().await?;
    let users: Vec<UserView> = to_views(&users);

    views::render(&req, "users/index.html", context! { users })
}

/// GET /users/new
pub async fn new_form(req: HttpRequest) -> AppResult<HttpResponse> {
    views::render(&req, "users/new.html", context! {})
}

/// POST /users/new
pub async fn create(state: web::Data<AppState>, body: FormBody) -> AppResult<HttpResponse> {
    let user = state.users.create(user_fields(body)?).await?;

    Ok(flash::redirect(
        "/users",
        format!("User {} added.", user.full_name()),
    ))
}

/// GET /users/{id}
pub async fn show(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let user = state.users.get(path.into_inner()).await?;
    let posts = state.posts.find_by_user(user.id).await?;
    let posts: Vec<PostView> = to_views(&posts);

    views::render(
        &req,
        "users/show.html",
        context! { user => UserView::from(&user), posts },
    )
}

/// GET /users/{id}/edit
pub async fn edit_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let user = state.users.get(path.into_inner()).await?;

    views::render(
        &req,
        "users/edit.html",
        context! { user => UserView::from(&user) },
    )
}

/// POST /users/{id}/edit
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: FormBody,
) -> AppResult<HttpResponse> {
    let fields = user_fields(body)?;
    let user = state.users.update(path.into_inner(), fields).await?;

    Ok(flash::redirect(
        "/users",
        format!("User {} edited.", user.full_name()),
    ))
}

/// POST /users/{id}/delete - removes the user's posts with it.
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let user = state.users.get(path.into_inner()).await?;
    state.users.delete(user.id).await?;

    Ok(flash::redirect(
        "/users",
        format!("User {} deleted.", user.full_name()),
    ))
}
