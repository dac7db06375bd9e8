//! HTML rendering through embedded minijinja templates.

use std::sync::OnceLock;

use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse};
use minijinja::{Environment, Value, default_auto_escape_callback};

mod models;

pub use minijinja::context;
pub use models::{PostView, TagView, UserView, to_views};

use crate::flash;
use crate::middleware::error::AppResult;

/// Template engine over the templates compiled into the binary.
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(default_auto_escape_callback);
        env.set_loader(embedded_template_loader);
        Self { env }
    }

    pub fn render(&self, template_name: &str, context: Value) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template_name)?;
        tmpl.render(context)
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide engine. Templates are immutable, so one instance serves every worker.
pub fn engine() -> &'static MiniJinjaEngine {
    static ENGINE: OnceLock<MiniJinjaEngine> = OnceLock::new();
    ENGINE.get_or_init(MiniJinjaEngine::new)
}

/// Render a full page, consuming any pending confirmation message.
pub fn render(req: &HttpRequest, template_name: &str, context: Value) -> AppResult<HttpResponse> {
    let message = flash::take(req);
    let has_flash = message.is_some();
    let body = engine().render(
        template_name,
        context! { flash => message, ..context },
    )?;

    let mut response = HttpResponse::Ok();
    response.content_type(ContentType::html());
    if has_flash {
        response.cookie(flash::removal());
    }
    Ok(response.body(body))
}

fn embedded_template_loader(name: &str) -> Result<Option<String>, minijinja::Error> {
    let template_content = match name {
        "base.html" => Some(include_str!("templates/base.html")),
        "error.html" => Some(include_str!("templates/error.html")),

        "posts/homepage.html" => Some(include_str!("templates/posts/homepage.html")),
        "posts/new.html" => Some(include_str!("templates/posts/new.html")),
        "posts/show.html" => Some(include_str!("templates/posts/show.html")),
        "posts/edit.html" => Some(include_str!("templates/posts/edit.html")),

        "users/index.html" => Some(include_str!("templates/users/index.html")),
        "users/new.html" => Some(include_str!("templates/users/new.html")),
        "users/show.html" => Some(include_str!("templates/users/show.html")),
        "users/edit.html" => Some(include_str!("templates/users/edit.html")),

        "tags/index.html" => Some(include_str!("templates/tags/index.html")),
        "tags/new.html" => Some(include_str!("templates/tags/new.html")),
        "tags/show.html" => Some(include_str!("templates/tags/show.html")),
        "tags/edit.html" => Some(include_str!("templates/tags/edit.html")),

        _ => None,
    };

    Ok(template_content.map(|s| s.to_string()))
}
