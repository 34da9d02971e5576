use crate::model::Bilingual;
use crate::validation::present;
use optional_field::{Field, serde_optional_fields};
use serde::{Deserialize, Serialize};
use utoipa::openapi::{RefOr, Schema};
use utoipa::{PartialSchema, ToSchema};

/// How to give to the trust. Only the active document is shown on the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub title: String,
    pub description: Bilingual,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code_url: Option<String>,
    #[serde(default)]
    pub bank_details: BankDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upi_id: Option<String>,
    #[serde(default = "active")]
    pub is_active: bool,
}

fn active() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ifsc_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

/// Body of a donation create. Anything left out is taken from the configured default.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationDraft {
    pub title: Option<String>,
    pub description: Option<Bilingual>,
    pub qr_code_url: Option<String>,
    pub bank_details: Option<BankDetails>,
    pub upi_id: Option<String>,
    pub is_active: Option<bool>,
}

impl DonationDraft {
    pub fn into_donation(self, default: &DonationDetails) -> Donation {
        Donation {
            title: present(self.title).unwrap_or_else(|| default.title.clone()),
            description: self.description.unwrap_or_else(|| default.description.clone()),
            qr_code_url: present(self.qr_code_url),
            bank_details: self.bank_details.unwrap_or_default(),
            upi_id: present(self.upi_id),
            is_active: self.is_active.unwrap_or(true),
        }
    }
}

/// Title and description a donation starts out with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationDetails {
    pub title: String,
    pub description: Bilingual,
}

impl DonationDetails {
    pub fn to_donation(&self) -> Donation {
        DonationDraft::default().into_donation(self)
    }
}

impl Default for DonationDetails {
    fn default() -> Self {
        Self {
            title: "Donation for Vergani".to_string(),
            description: Bilingual::new(
                "Support our cause by making a donation",
                "आमच्या कार्यासाठी दान करा",
            ),
        }
    }
}

fn nullable_text_schema() -> impl Into<RefOr<Schema>> {
    <Option<String> as PartialSchema>::schema()
}

/// Partial update of the active donation. An absent field is left alone;
/// `qrCodeUrl` and `upiId` may also be sent as `null` to remove them.
#[serde_optional_fields]
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationPatchDraft {
    pub title: Option<String>,
    pub description: Option<Bilingual>,
    #[schema(schema_with = nullable_text_schema)]
    pub qr_code_url: Field<String>,
    pub bank_details: Option<BankDetails>,
    #[schema(schema_with = nullable_text_schema)]
    pub upi_id: Field<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DonationPatch {
    pub title: Option<String>,
    pub description: Option<Bilingual>,
    pub qr_code_url: Field<String>,
    pub bank_details: Option<BankDetails>,
    pub upi_id: Field<String>,
    pub is_active: Option<bool>,
}

impl From<DonationPatchDraft> for DonationPatch {
    fn from(draft: DonationPatchDraft) -> Self {
        Self {
            title: present(draft.title),
            description: draft.description,
            qr_code_url: draft.qr_code_url,
            bank_details: draft.bank_details,
            upi_id: draft.upi_id,
            is_active: draft.is_active,
        }
    }
}

impl DonationPatch {
    pub fn apply(self, donation: &mut Donation) {
        if let Some(title) = self.title {
            donation.title = title;
        }
        if let Some(description) = self.description {
            donation.description = description;
        }
        if let Field::Present(qr_code_url) = self.qr_code_url {
            donation.qr_code_url = qr_code_url;
        }
        if let Some(bank_details) = self.bank_details {
            donation.bank_details = bank_details;
        }
        if let Field::Present(upi_id) = self.upi_id {
            donation.upi_id = upi_id;
        }
        if let Some(is_active) = self.is_active {
            donation.is_active = is_active;
        }
    }
}
