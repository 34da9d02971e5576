use crate::ordered::OrderedRecord;
use crate::validation::{Required, Validate, ValidationError, present};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Photo,
    Video,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Photo => "photo",
            MediaType::Video => "video",
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "photo" => Ok(MediaType::Photo),
            "video" => Ok(MediaType::Video),
            other => Err(ValidationError::new(format!(
                "'{other}' is not a valid mediaType (expected photo or video)"
            ))),
        }
    }
}

/// A gallery entry. For videos `url` is the thumbnail and `video_url` the link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub media_type: MediaType,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaUpdate {
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl OrderedRecord for MediaItem {
    type Partition = MediaType;
    type Update = MediaUpdate;
    type Draft = MediaDraft;
    type UpdateDraft = MediaUpdateDraft;

    const KIND: &'static str = "Media item";
    const COLLECTION: &'static str = "media";
    const CLEARABLE_FIELDS: &'static [&'static str] = &["videoUrl"];

    fn partition(&self) -> MediaType {
        self.media_type
    }

    fn apply(&mut self, update: MediaUpdate) {
        self.title = update.title;
        self.url = update.url;
        self.video_url = update.video_url;
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaDraft {
    pub media_type: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub video_url: Option<String>,
}

impl Validate for MediaDraft {
    type Output = MediaItem;

    fn validate(self) -> Result<MediaItem, ValidationError> {
        let mut required = Required::default();
        let media_type = required.text("mediaType", self.media_type);
        let title = required.text("title", self.title);
        let url = required.text("url", self.url);
        required.finish()?;

        Ok(MediaItem {
            media_type: media_type.parse()?,
            title,
            url,
            video_url: present(self.video_url),
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaUpdateDraft {
    pub title: Option<String>,
    pub url: Option<String>,
    pub video_url: Option<String>,
}

impl Validate for MediaUpdateDraft {
    type Output = MediaUpdate;

    fn validate(self) -> Result<MediaUpdate, ValidationError> {
        let mut required = Required::default();
        let title = required.text("title", self.title);
        let url = required.text("url", self.url);
        required.finish()?;

        Ok(MediaUpdate {
            title,
            url,
            video_url: present(self.video_url),
        })
    }
}
