//! # Blogly Shared
//!
//! Types exchanged between the HTTP layer and the presentation layer.

pub mod form;
pub mod response;

pub use form::{FormError, FormMap};
pub use response::ErrorResponse;
