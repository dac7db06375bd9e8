//! Parsed HTML form bodies.

use thiserror::Error;

/// Errors raised while reading fields out of a [`FormMap`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{field} is required")]
    Missing { field: String },

    #[error("{field} contains an invalid id: {value}")]
    InvalidId { field: String, value: String },
}

/// Field name to value pairs in submission order.
///
/// Keys may repeat, as checkbox lists such as `tags` do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormMap {
    pairs: Vec<(String, String)>,
}

impl FormMap {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value submitted for `field`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == field)
            .map(|(_, value)| value.as_str())
    }

    /// Every value submitted for `field`.
    pub fn get_all<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(key, _)| key == field)
            .map(|(_, value)| value.as_str())
    }

    /// A field that must be present. Blank values are left to domain validation.
    pub fn required(&self, field: &str) -> Result<String, FormError> {
        self.get(field)
            .map(str::to_owned)
            .ok_or_else(|| FormError::Missing {
                field: field.to_owned(),
            })
    }

    /// A field that may be absent or blank.
    pub fn optional(&self, field: &str) -> Option<String> {
        self.get(field)
            .filter(|value| !value.trim().is_empty())
            .map(str::to_owned)
    }

    /// Integer ids submitted under a repeated field. No values yields an empty list.
    pub fn ids(&self, field: &str) -> Result<Vec<i32>, FormError> {
        self.get_all(field)
            .map(|value| {
                value.trim().parse().map_err(|_| FormError::InvalidId {
                    field: field.to_owned(),
                    value: value.to_owned(),
                })
            })
            .collect()
    }
}

impl From<Vec<(String, String)>> for FormMap {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::new(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormMap {
        FormMap::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn repeated_fields_are_all_kept() {
        let form = form(&[("title", "Hello"), ("tags", "1"), ("tags", "3")]);
        assert_eq!(form.ids("tags"), Ok(vec![1, 3]));
        assert_eq!(form.get("title"), Some("Hello"));
    }

    #[test]
    fn absent_id_list_is_empty() {
        assert_eq!(form(&[("name", "tech")]).ids("posts"), Ok(vec![]));
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        let err = form(&[("tags", "abc")]).ids("tags").unwrap_err();
        assert_eq!(
            err,
            FormError::InvalidId {
                field: "tags".to_string(),
                value: "abc".to_string()
            }
        );
    }

    #[test]
    fn required_and_optional_fields() {
        let form = form(&[("first_name", ""), ("image_url", " ")]);
        assert_eq!(form.required("first_name"), Ok(String::new()));
        assert!(form.required("last_name").is_err());
        assert_eq!(form.optional("image_url"), None);
    }
}
