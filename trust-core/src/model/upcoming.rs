use crate::model::Bilingual;
use crate::validation::{BilingualDraft, Required, Validate, ValidationError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A teaser card for an event that is coming up soon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingEvent {
    pub title: Bilingual,
    pub date_time: Bilingual,
    pub icon: String,
    pub icon_bg_color: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingEventDraft {
    pub title: Option<BilingualDraft>,
    pub date_time: Option<BilingualDraft>,
    pub icon: Option<String>,
    pub icon_bg_color: Option<String>,
}

impl Validate for UpcomingEventDraft {
    type Output = UpcomingEvent;

    fn validate(self) -> Result<UpcomingEvent, ValidationError> {
        let mut required = Required::default();
        let title = required.bilingual("title", self.title);
        let date_time = required.bilingual("dateTime", self.date_time);
        let icon = required.text("icon", self.icon);
        let icon_bg_color = required.text("iconBgColor", self.icon_bg_color);
        required.finish()?;

        Ok(UpcomingEvent {
            title,
            date_time,
            icon,
            icon_bg_color,
        })
    }
}
