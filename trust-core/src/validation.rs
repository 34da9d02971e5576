use crate::model::Bilingual;
use itertools::Itertools;
use serde::Deserialize;
use std::borrow::Cow;
use utoipa::ToSchema;

/// A request payload that was missing or had malformed required fields.
/// The message is meant to be shown to whoever filled in the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Validation Error: {0}")]
pub struct ValidationError(Cow<'static, str>);

impl ValidationError {
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self(message.into())
    }

    pub fn missing(fields: &[Cow<'static, str>]) -> Self {
        let verb = if fields.len() == 1 { "is" } else { "are" };
        Self(format!("{} {verb} required", fields.iter().join(", ")).into())
    }

    pub fn detail(&self) -> &str {
        &self.0
    }
}

/// Turns an unchecked request shape (a "draft") into the record it describes.
pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, ValidationError>;
}

/// The request shape of a [`Bilingual`] value, both halves optional until validated.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BilingualDraft {
    pub english: Option<String>,
    pub marathi: Option<String>,
}

impl BilingualDraft {
    pub fn new(english: impl Into<String>, marathi: impl Into<String>) -> Self {
        Self {
            english: Some(english.into()),
            marathi: Some(marathi.into()),
        }
    }
}

/// Collects every missing required field so one error can name all of them.
///
/// Accessors hand back an empty value for a missing field; callers must call
/// [`Required::finish`] before using anything they got back.
#[derive(Debug, Default)]
pub struct Required {
    missing: Vec<Cow<'static, str>>,
}

impl Required {
    pub fn text(&mut self, field: &'static str, value: Option<String>) -> String {
        match present(value) {
            Some(v) => v,
            None => {
                self.missing.push(Cow::Borrowed(field));
                String::new()
            }
        }
    }

    pub fn bilingual(&mut self, field: &'static str, value: Option<BilingualDraft>) -> Bilingual {
        let value = value.unwrap_or_default();
        let english = match present(value.english) {
            Some(v) => v,
            None => {
                self.missing.push(Cow::Owned(format!("{field}.english")));
                String::new()
            }
        };
        let marathi = match present(value.marathi) {
            Some(v) => v,
            None => {
                self.missing.push(Cow::Owned(format!("{field}.marathi")));
                String::new()
            }
        };
        Bilingual { english, marathi }
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::missing(&self.missing))
        }
    }
}

/// Blank strings are treated the same as absent ones.
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Same shape check the public contact form uses: `something@something.tld`, no whitespace.
pub fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn required_names_every_missing_field() {
        let mut required = Required::default();
        required.text("imageUrl", None);
        required.text("icon", Some("   ".to_string()));
        required.bilingual("title", Some(BilingualDraft {
            english: Some("Seva".to_string()),
            marathi: None,
        }));

        let err = required.finish().unwrap_err();
        assert_eq!(
            "imageUrl, icon, title.marathi are required",
            err.detail()
        );
    }

    #[test]
    fn required_passes_when_everything_is_present() {
        let mut required = Required::default();
        let text = required.text("icon", Some("ri-heart-line".to_string()));
        let title = required.bilingual("title", Some(BilingualDraft::new("Seva", "सेवा")));

        assert!(required.finish().is_ok());
        assert_eq!("ri-heart-line", text);
        assert_eq!(Bilingual::new("Seva", "सेवा"), title);
    }

    #[test]
    fn single_missing_field_reads_naturally() {
        let err = ValidationError::missing(&[Cow::Borrowed("name.english")]);
        assert_eq!("Validation Error: name.english is required", err.to_string());
    }

    #[rstest]
    #[case("admin@mandal.org", true)]
    #[case("a@b.co", true)]
    #[case("no-at-sign.org", false)]
    #[case("@mandal.org", false)]
    #[case("admin@mandal", false)]
    #[case("admin@.org", false)]
    #[case("ad min@mandal.org", false)]
    #[case("admin@mandal.", false)]
    fn email_shape(#[case] email: &str, #[case] expected: bool) {
        assert_eq!(expected, looks_like_email(email), "{email}");
    }
}
