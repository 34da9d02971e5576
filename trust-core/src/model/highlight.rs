use crate::model::EntityId;
use crate::validation::{Required, Validate, ValidationError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The photo and video highlights of one festival year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Highlight {
    pub year: String,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub videos: Vec<Video>,
}

impl Highlight {
    pub fn empty(year: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            photos: vec![],
            videos: vec![],
        }
    }

    pub fn push(&mut self, entry: HighlightEntry) {
        match entry {
            HighlightEntry::Photo(photo) => self.photos.push(photo),
            HighlightEntry::Video(video) => self.videos.push(video),
        }
    }

    /// Removing an id that is not in the list leaves the highlight as it was.
    pub fn pull(&mut self, list: HighlightList, id: EntityId) {
        match list {
            HighlightList::Photos => self.photos.retain(|p| p.id != id),
            HighlightList::Videos => self.videos.retain(|v| v.id != id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Photo {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub title: String,
    pub src: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Video {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub title: String,
    pub thumbnail: String,
}

/// An embedded entry appended to one of a highlight's lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HighlightEntry {
    Photo(Photo),
    Video(Video),
}

impl HighlightEntry {
    pub fn list(&self) -> HighlightList {
        match self {
            HighlightEntry::Photo(_) => HighlightList::Photos,
            HighlightEntry::Video(_) => HighlightList::Videos,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightList {
    Photos,
    Videos,
}

impl HighlightList {
    /// Name of the embedded array in a stored highlight.
    pub fn field(&self) -> &'static str {
        match self {
            HighlightList::Photos => "photos",
            HighlightList::Videos => "videos",
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct HighlightDraft {
    pub year: Option<String>,
}

impl Validate for HighlightDraft {
    type Output = Highlight;

    fn validate(self) -> Result<Highlight, ValidationError> {
        let mut required = Required::default();
        let year = required.text("year", self.year);
        required.finish()?;
        Ok(Highlight::empty(year.trim()))
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PhotoDraft {
    pub title: Option<String>,
    pub src: Option<String>,
}

impl Validate for PhotoDraft {
    type Output = HighlightEntry;

    fn validate(self) -> Result<HighlightEntry, ValidationError> {
        let mut required = Required::default();
        let title = required.text("title", self.title);
        let src = required.text("src", self.src);
        required.finish()?;
        Ok(HighlightEntry::Photo(Photo {
            id: EntityId::new(),
            title,
            src,
        }))
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct VideoDraft {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
}

impl Validate for VideoDraft {
    type Output = HighlightEntry;

    fn validate(self) -> Result<HighlightEntry, ValidationError> {
        let mut required = Required::default();
        let title = required.text("title", self.title);
        let thumbnail = required.text("thumbnail", self.thumbnail);
        required.finish()?;
        Ok(HighlightEntry::Video(Video {
            id: EntityId::new(),
            title,
            thumbnail,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_push_and_pull() {
        let mut highlight = Highlight::empty("2024");
        let entry = PhotoDraft {
            title: Some("Aagman".to_string()),
            src: Some("https://img.example/aagman.jpg".to_string()),
        }
        .validate()
        .unwrap();
        let HighlightEntry::Photo(photo) = entry.clone() else {
            panic!("expected a photo");
        };

        highlight.push(entry);
        assert_eq!(1, highlight.photos.len());

        highlight.pull(HighlightList::Videos, photo.id);
        assert_eq!(1, highlight.photos.len());

        highlight.pull(HighlightList::Photos, photo.id);
        assert!(highlight.photos.is_empty());
    }

    #[test]
    fn year_is_required() {
        let err = HighlightDraft { year: Some(" ".to_string()) }.validate().unwrap_err();
        assert_eq!("year is required", err.detail());
    }

    #[test]
    fn video_entry_targets_video_list() {
        let entry = VideoDraft {
            title: Some("Visarjan".to_string()),
            thumbnail: Some("https://img.example/v.jpg".to_string()),
        }
        .validate()
        .unwrap();

        assert_eq!(HighlightList::Videos, entry.list());
        assert_eq!("videos", entry.list().field());
    }
}
