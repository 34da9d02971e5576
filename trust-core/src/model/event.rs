use crate::model::Bilingual;
use crate::ordered::{OrderedRecord, Unpartitioned};
use crate::validation::{BilingualDraft, Required, Validate, ValidationError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One entry of the festival timeline. `date` and `time` are display text
/// ("Day 1", "6:00 AM - 8:00 PM"), not timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    pub title: Bilingual,
    pub date: String,
    pub time: String,
    pub activities: Bilingual,
}

impl OrderedRecord for Event {
    type Partition = Unpartitioned;
    type Update = Event;
    type Draft = EventDraft;
    type UpdateDraft = EventDraft;

    const KIND: &'static str = "Event";
    const COLLECTION: &'static str = "events";

    fn partition(&self) -> Unpartitioned {
        Unpartitioned
    }

    fn apply(&mut self, update: Event) {
        *self = update;
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct EventDraft {
    pub title: Option<BilingualDraft>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub activities: Option<BilingualDraft>,
}

impl Validate for EventDraft {
    type Output = Event;

    fn validate(self) -> Result<Event, ValidationError> {
        let mut required = Required::default();
        let title = required.bilingual("title", self.title);
        let date = required.text("date", self.date);
        let time = required.text("time", self.time);
        let activities = required.bilingual("activities", self.activities);
        required.finish()?;

        Ok(Event {
            title,
            date,
            time,
            activities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_draft_names_everything() {
        let err = EventDraft::default().validate().unwrap_err();
        assert_eq!(
            "title.english, title.marathi, date, time, activities.english, activities.marathi are required",
            err.detail()
        );
    }

    #[test]
    fn draft_becomes_event() {
        let event = EventDraft {
            title: Some(BilingualDraft::new("Ganesh Sthapana", "गणेश स्थापना")),
            date: Some("Day 1".to_string()),
            time: Some("6:00 AM - 8:00 PM".to_string()),
            activities: Some(BilingualDraft::new("Aarti", "आरती")),
        }
        .validate()
        .unwrap();

        assert_eq!("Day 1", event.date);
        assert_eq!(Unpartitioned, event.partition());
    }
}
