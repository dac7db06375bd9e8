//! One-shot confirmation messages carried across a redirect in a cookie.

use actix_web::cookie::Cookie;
use actix_web::http::header::{LOCATION, SET_COOKIE};
use actix_web::{HttpRequest, HttpResponse};

pub const FLASH_COOKIE: &str = "flash";

/// 303 redirect to `location` that leaves `message` for the next page.
///
/// The message embeds user input, so the cookie value is percent-encoded.
pub fn redirect(location: impl AsRef<str>, message: impl Into<String>) -> HttpResponse {
    let message = message.into();
    tracing::debug!(%message, "Flashing");

    let cookie = Cookie::build(FLASH_COOKIE, message)
        .path("/")
        .http_only(true)
        .finish();

    HttpResponse::SeeOther()
        .insert_header((LOCATION, location.as_ref()))
        .append_header((SET_COOKIE, cookie.encoded().to_string()))
        .finish()
}

/// The pending message, if any. Request cookies arrive already decoded.
pub fn take(req: &HttpRequest) -> Option<String> {
    req.cookie(FLASH_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .filter(|message| !message.is_empty())
}

/// Cookie that clears the message once shown.
pub fn removal() -> Cookie<'static> {
    let mut cookie = Cookie::build(FLASH_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}
