use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::middleware::from_fn;
use actix_web::{App, test, web};
use blogly_core::domain::{Post, PostFields, Tag, TagFields, User, UserFields};
use blogly_infra::database::DatabaseConnections;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};

use super::configure_routes;
use crate::flash::FLASH_COOKIE;
use crate::observability::request_id;
use crate::state::AppState;

async fn test_state() -> AppState {
    let opts = ConnectOptions::new("sqlite::memory:")
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false)
        .to_owned();
    let db = Database::connect(opts).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    AppState::new(&DatabaseConnections::from_conn(db))
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(from_fn(request_id))
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

async fn ada(state: &AppState) -> User {
    state
        .users
        .create(UserFields::new("Ada", "Lovelace", None).unwrap())
        .await
        .unwrap()
}

fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> &str {
    resp.headers().get(LOCATION).unwrap().to_str().unwrap()
}

#[actix_rt::test]
async fn creating_user_redirects_with_confirmation() {
    let state = test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/users/new")
        .set_form([("first_name", "Ada"), ("last_name", "Lovelace"), ("image_url", "")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/users");
    let flash = resp
        .response()
        .cookies()
        .find(|c| c.name() == FLASH_COOKIE)
        .unwrap()
        .into_owned();
    assert_eq!(flash.value(), "User Ada Lovelace added.");

    // The next page shows the message once and clears it.
    let req = test::TestRequest::get()
        .uri("/users")
        .cookie(flash)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cleared = resp
        .response()
        .cookies()
        .find(|c| c.name() == FLASH_COOKIE)
        .unwrap();
    assert_eq!(cleared.value(), "");
    let body = test::read_body(resp).await;
    let body = std::str::from_utf8(&body).unwrap();
    assert!(body.contains("User Ada Lovelace added."));
    assert!(body.contains("Ada Lovelace"));
}

#[actix_rt::test]
async fn confirmation_survives_separators_in_titles() {
    let state = test_state().await;
    let user = ada(&state).await;
    let app = test_app!(state);

    for title in ["a; b", "line1\nline2"] {
        let req = test::TestRequest::post()
            .uri(&format!("/users/{}/posts/new", user.id))
            .set_form([("title", title), ("content", "World")])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let flash = resp
            .response()
            .cookies()
            .find(|c| c.name() == FLASH_COOKIE)
            .unwrap()
            .into_owned();
        assert_eq!(flash.value(), format!("Post '{title}' added."));

        let req = test::TestRequest::get()
            .uri(&format!("/users/{}", user.id))
            .cookie(flash)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    assert_eq!(state.posts.find_by_user(user.id).await.unwrap().len(), 2);
}

#[actix_rt::test]
async fn missing_required_field_is_bad_request() {
    let state = test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/users/new")
        .set_form([("first_name", ""), ("last_name", "Lovelace")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/users/new")
        .set_form([("first_name", "Ada")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert!(state.users.list_by_name().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn unknown_ids_and_routes_are_not_found() {
    let state = test_state().await;
    let app = test_app!(state);

    for uri in [
        "/users/999999",
        "/users/999999/edit",
        "/users/999999/posts/new",
        "/posts/999999",
        "/tags/999999",
        "/users/abc",
        "/nowhere",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
    }

    let req = test::TestRequest::post()
        .uri("/users/999999/delete")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/users/999999/posts/new")
        .set_form([("title", "Hello"), ("content", "World")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn not_found_page_is_html_with_request_id() {
    let state = test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/nowhere")
        .insert_header(("x-request-id", "req-42"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "req-42");
    let body = test::read_body(resp).await;
    let body = std::str::from_utf8(&body).unwrap();
    assert!(body.contains("404 Not Found"));
    assert!(body.contains("req-42"));
}

#[actix_rt::test]
async fn home_shows_five_newest_posts() {
    let state = test_state().await;
    let user = ada(&state).await;
    for i in 1..=7 {
        state
            .posts
            .create(
                user.id,
                PostFields::new(format!("Post number {i}"), "body", vec![]).unwrap(),
            )
            .await
            .unwrap();
    }
    let app = test_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let body = std::str::from_utf8(&body).unwrap();

    assert_eq!(body.matches("<article>").count(), 5);
    assert!(body.contains("Post number 7"));
    assert!(!body.contains("Post number 2<"));
    assert!(body.find("Post number 7").unwrap() < body.find("Post number 3").unwrap());
}

#[actix_rt::test]
async fn duplicate_tag_is_bad_request() {
    let state = test_state().await;
    state
        .tags
        .create(TagFields::new("tech", vec![]).unwrap())
        .await
        .unwrap();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/tags/new")
        .set_form([("name", "tech")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let tags: Vec<Tag> = state.tags.find_all().await.unwrap();
    assert_eq!(tags.len(), 1);
}

#[actix_rt::test]
async fn non_numeric_tag_id_is_bad_request() {
    let state = test_state().await;
    let user = ada(&state).await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri(&format!("/users/{}/posts/new", user.id))
        .set_form([("title", "Hello"), ("content", "World"), ("tags", "x")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(state.posts.find_by_user(user.id).await.unwrap().is_empty());
}

#[actix_rt::test]
async fn post_tag_lifecycle() {
    let state = test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/users/new")
        .set_form([("first_name", "Ada"), ("last_name", "Lovelace")])
        .to_request();
    test::call_service(&app, req).await;
    let ada = state.users.list_by_name().await.unwrap().remove(0);
    assert_eq!(ada.full_name(), "Ada Lovelace");

    let req = test::TestRequest::post()
        .uri(&format!("/users/{}/posts/new", ada.id))
        .set_form([("title", "Hello"), ("content", "World")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/users/{}", ada.id));
    let post = state.posts.find_by_user(ada.id).await.unwrap().remove(0);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("Hello"));

    let req = test::TestRequest::post()
        .uri("/tags/new")
        .set_form([("name", "tech")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp), "/tags");
    let tech: Tag = state.tags.find_all().await.unwrap().remove(0);

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/edit", post.id))
        .set_form([
            ("title", "Hello"),
            ("content", "World"),
            ("tags", tech.id.to_string().as_str()),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp), format!("/users/{}", ada.id));
    assert_eq!(state.posts.tags_of(post.id).await.unwrap(), [tech.clone()]);

    let uri = format!("/posts/{}", post.id);
    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("tech"));

    let req = test::TestRequest::post()
        .uri(&format!("/tags/{}/delete", tech.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp), "/tags");

    let still_there: Post = state.posts.get(post.id).await.unwrap();
    assert_eq!(still_there.title, "Hello");
    assert!(state.posts.tags_of(post.id).await.unwrap().is_empty());
}

#[actix_rt::test]
async fn deleting_user_removes_their_posts() {
    let state = test_state().await;
    let user = ada(&state).await;
    let post = state
        .posts
        .create(user.id, PostFields::new("Hello", "World", vec![]).unwrap())
        .await
        .unwrap();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri(&format!("/users/{}/delete", user.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let uri = format!("/posts/{}", post.id);
    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn edit_forms_render_current_values() {
    let state = test_state().await;
    let user = ada(&state).await;
    let tech = state
        .tags
        .create(TagFields::new("tech", vec![]).unwrap())
        .await
        .unwrap();
    let post = state
        .posts
        .create(user.id, PostFields::new("Hello", "World", vec![tech.id]).unwrap())
        .await
        .unwrap();
    let app = test_app!(state);

    for uri in [
        format!("/users/{}/edit", user.id),
        format!("/users/{}/posts/new", user.id),
        format!("/posts/{}/edit", post.id),
        format!("/tags/{}/edit", tech.id),
        "/users/new".to_string(),
        "/tags/new".to_string(),
        "/tags".to_string(),
    ] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
    }

    let uri = format!("/posts/{}/edit", post.id);
    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains(" checked"));
}
