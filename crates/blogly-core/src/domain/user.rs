use super::{DomainEntity, required};
use crate::error::DomainError;

/// Placeholder avatar used when a user has no image.
pub const DEFAULT_IMAGE_URL: &str = "https://www.freeiconspng.com/uploads/icon-user-blue-symbol-people-person-generic--public-domain--21.png";

/// User entity - an author owning zero or more posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub image_url: String,
}

impl User {
    /// First and last name separated by exactly one space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl DomainEntity for User {
    const ENTITY_TYPE: &'static str = "User";

    fn id(&self) -> i32 {
        self.id
    }
}

/// Validated field values for creating or editing a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFields {
    first_name: String,
    last_name: String,
    image_url: String,
}

impl UserFields {
    /// Both names are required. A missing or blank image falls back to [`DEFAULT_IMAGE_URL`].
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        image_url: Option<String>,
    ) -> Result<Self, DomainError> {
        let image_url = image_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string());

        Ok(Self {
            first_name: required("first_name", first_name)?,
            last_name: required("last_name", last_name)?,
            image_url,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_joins_with_single_space() {
        let user = User {
            id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
        };
        assert_eq!(user.full_name(), "Ada Lovelace");
    }

    #[test]
    fn blank_image_falls_back_to_default() {
        let fields = UserFields::new("Ada", "Lovelace", Some("  ".to_string())).unwrap();
        assert_eq!(fields.image_url(), DEFAULT_IMAGE_URL);

        let fields = UserFields::new("Ada", "Lovelace", None).unwrap();
        assert_eq!(fields.image_url(), DEFAULT_IMAGE_URL);
    }

    #[test]
    fn explicit_image_is_kept() {
        let fields =
            UserFields::new("Ada", "Lovelace", Some("http://img/ada.png".to_string())).unwrap();
        assert_eq!(fields.image_url(), "http://img/ada.png");
    }

    #[test]
    fn names_are_required() {
        let err = UserFields::new("", "Lovelace", None).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("first_name")));

        let err = UserFields::new("Ada", "   ", None).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("last_name")));
    }
}
