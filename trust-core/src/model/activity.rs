use crate::model::Bilingual;
use crate::ordered::OrderedRecord;
use crate::validation::{BilingualDraft, Required, Validate, ValidationError, present};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use utoipa::ToSchema;

/// Which page section an activity is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Social,
    Cultural,
}

impl SectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Social => "social",
            SectionType::Cultural => "cultural",
        }
    }
}

impl Display for SectionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "social" => Ok(SectionType::Social),
            "cultural" => Ok(SectionType::Cultural),
            other => Err(ValidationError::new(format!(
                "'{other}' is not a valid sectionType (expected social or cultural)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub section_type: SectionType,
    pub title: Bilingual,
    pub description: Bilingual,
    pub image_url: String,
    pub icon: String,
}

/// An activity never moves between sections, so the section is not part of an update.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityUpdate {
    pub title: Bilingual,
    pub description: Bilingual,
    pub image_url: String,
    pub icon: String,
}

impl OrderedRecord for Activity {
    type Partition = SectionType;
    type Update = ActivityUpdate;
    type Draft = ActivityDraft;
    type UpdateDraft = ActivityUpdateDraft;

    const KIND: &'static str = "Activity";
    const COLLECTION: &'static str = "activities";

    fn partition(&self) -> SectionType {
        self.section_type
    }

    fn apply(&mut self, update: ActivityUpdate) {
        self.title = update.title;
        self.description = update.description;
        self.image_url = update.image_url;
        self.icon = update.icon;
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDraft {
    pub section_type: Option<String>,
    pub title: Option<BilingualDraft>,
    pub description: Option<BilingualDraft>,
    pub image_url: Option<String>,
    pub icon: Option<String>,
}

impl Validate for ActivityDraft {
    type Output = Activity;

    fn validate(self) -> Result<Activity, ValidationError> {
        let mut required = Required::default();
        let section_type = required.text("sectionType", self.section_type);
        let title = required.bilingual("title", self.title);
        let description = required.bilingual("description", self.description);
        let image_url = required.text("imageUrl", self.image_url);
        let icon = required.text("icon", self.icon);
        required.finish()?;

        Ok(Activity {
            section_type: section_type.parse()?,
            title,
            description,
            image_url,
            icon,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityUpdateDraft {
    pub title: Option<BilingualDraft>,
    pub description: Option<BilingualDraft>,
    pub image_url: Option<String>,
    pub icon: Option<String>,
}

impl Validate for ActivityUpdateDraft {
    type Output = ActivityUpdate;

    fn validate(self) -> Result<ActivityUpdate, ValidationError> {
        let mut required = Required::default();
        let title = required.bilingual("title", self.title);
        let description = required.bilingual("description", self.description);
        let image_url = required.text("imageUrl", self.image_url);
        let icon = required.text("icon", present(self.icon));
        required.finish()?;

        Ok(ActivityUpdate {
            title,
            description,
            image_url,
            icon,
        })
    }
}
