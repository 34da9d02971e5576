use crate::model::{Donation, DonationDetails};
use error_stack::{Report, ResultExt};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::collections::HashMap;

/// What the singleton resources look like before an admin ever edits them.
///
/// Built once at startup and handed to the services; a section that is not in
/// the table starts out as an empty object.
#[derive(Debug, Clone, PartialEq)]
pub struct SingletonDefaults {
    sections: HashMap<String, Value>,
    donation: DonationDetails,
}

#[derive(Debug, thiserror::Error)]
#[error("content defaults could not be read")]
pub struct DefaultsError;

/// Shape of a defaults override file. Both keys are optional.
#[derive(Debug, Deserialize)]
struct DefaultsOverride {
    #[serde(default)]
    sections: HashMap<String, Value>,
    donation: Option<DonationDetails>,
}

impl SingletonDefaults {
    pub fn new(sections: HashMap<String, Value>, donation: DonationDetails) -> Self {
        Self { sections, donation }
    }

    /// Applies a JSON override on top of the current table. Sections named in
    /// the override replace the built-in ones whole.
    pub fn with_overrides(mut self, raw: &str) -> Result<Self, Report<DefaultsError>> {
        let overrides: DefaultsOverride = serde_json::from_str(raw).change_context(DefaultsError)?;
        self.sections.extend(overrides.sections);
        if let Some(donation) = overrides.donation {
            self.donation = donation;
        }
        Ok(self)
    }

    pub fn section(&self, section_name: &str) -> Value {
        self.sections
            .get(section_name)
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()))
    }

    pub fn donation_details(&self) -> &DonationDetails {
        &self.donation
    }

    pub fn donation(&self) -> Donation {
        self.donation.to_donation()
    }
}

impl Default for SingletonDefaults {
    fn default() -> Self {
        let sections = HashMap::from([
            (
                "hero".to_string(),
                json!({
                    "heading": { "english": "Default Welcome (EN)", "marathi": "Default Welcome (MR)" },
                    "subtitle": { "english": "Default subtitle (EN)", "marathi": "Default subtitle (MR)" },
                    "imageUrl": "https://placehold.co/1920x1080/f97316/ffffff?text=Placeholder+Image",
                }),
            ),
            (
                "about".to_string(),
                json!({
                    "imageUrl": "https://placehold.co/800x600/fbbf24/ffffff?text=Placeholder",
                    "statYears": "39",
                    "statDevotees": "50K+",
                    "statVolunteers": "200+",
                    "statInitiatives": "15+",
                }),
            ),
        ]);

        Self::new(sections, DonationDetails::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_section_is_an_empty_object() {
        let defaults = SingletonDefaults::default();
        assert_eq!(json!({}), defaults.section("contactInfo"));
    }

    #[test]
    fn builtin_about_section() {
        let defaults = SingletonDefaults::default();
        assert_eq!("50K+", defaults.section("about")["statDevotees"]);
    }

    #[test]
    fn overrides_replace_and_extend() {
        let defaults = SingletonDefaults::default()
            .with_overrides(
                r#"{
                    "sections": {
                        "hero": { "imageUrl": "https://img.example/hero.jpg" },
                        "contactInfo": { "phone": "020-000000" }
                    }
                }"#,
            )
            .unwrap();

        assert_eq!(json!({ "imageUrl": "https://img.example/hero.jpg" }), defaults.section("hero"));
        assert_eq!("020-000000", defaults.section("contactInfo")["phone"]);
        assert_eq!("39", defaults.section("about")["statYears"]);
        assert_eq!("Donation for Vergani", defaults.donation().title);
    }

    #[test]
    fn malformed_override_is_an_error() {
        assert!(SingletonDefaults::default().with_overrides("{ not json").is_err());
    }
}
