use crate::model::Bilingual;
use crate::ordered::{OrderedRecord, Unpartitioned};
use crate::validation::{BilingualDraft, Required, Validate, ValidationError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sponsor {
    pub name: String,
    pub logo_url: String,
    pub description: Bilingual,
    pub category: Bilingual,
}

impl OrderedRecord for Sponsor {
    type Partition = Unpartitioned;
    type Update = Sponsor;
    type Draft = SponsorDraft;
    type UpdateDraft = SponsorDraft;

    const KIND: &'static str = "Sponsor";
    const COLLECTION: &'static str = "sponsors";

    fn partition(&self) -> Unpartitioned {
        Unpartitioned
    }

    fn apply(&mut self, update: Sponsor) {
        *self = update;
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SponsorDraft {
    pub name: Option<String>,
    pub logo_url: Option<String>,
    pub description: Option<BilingualDraft>,
    pub category: Option<BilingualDraft>,
}

impl Validate for SponsorDraft {
    type Output = Sponsor;

    fn validate(self) -> Result<Sponsor, ValidationError> {
        let mut required = Required::default();
        let name = required.text("name", self.name);
        let logo_url = required.text("logoUrl", self.logo_url);
        let description = required.bilingual("description", self.description);
        let category = required.bilingual("category", self.category);
        required.finish()?;

        Ok(Sponsor {
            name,
            logo_url,
            description,
            category,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_logo_is_rejected() {
        let err = SponsorDraft {
            name: Some("Shree Traders".to_string()),
            logo_url: None,
            description: Some(BilingualDraft::new("Grain merchants", "धान्य व्यापारी")),
            category: Some(BilingualDraft::new("Gold", "सुवर्ण")),
        }
        .validate()
        .unwrap_err();

        assert_eq!("logoUrl is required", err.detail());
    }
}
