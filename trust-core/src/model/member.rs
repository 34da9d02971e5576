use crate::model::Bilingual;
use crate::ordered::OrderedRecord;
use crate::validation::{BilingualDraft, Required, Validate, ValidationError, present};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use utoipa::openapi::{RefOr, Schema};
use utoipa::{PartialSchema, ToSchema};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// A committee member. Featured members are shown with a designation and a
/// photo, so both are mandatory for them and nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MemberDocument", into = "MemberDocument")]
pub enum Member {
    Basic {
        name: Bilingual,
        image_url: Option<String>,
        contact: Contact,
    },
    Featured {
        name: Bilingual,
        designation: Bilingual,
        image_url: String,
        contact: Contact,
    },
}

impl Member {
    pub fn name(&self) -> &Bilingual {
        match self {
            Member::Basic { name, .. } | Member::Featured { name, .. } => name,
        }
    }

    pub fn is_featured(&self) -> bool {
        matches!(self, Member::Featured { .. })
    }

    pub fn contact(&self) -> &Contact {
        match self {
            Member::Basic { contact, .. } | Member::Featured { contact, .. } => contact,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberGroup {
    Featured,
    Regular,
}

impl MemberGroup {
    /// Anything other than `"true"` selects the regular members.
    pub fn from_query(featured: Option<&str>) -> Self {
        match featured {
            Some("true") => MemberGroup::Featured,
            _ => MemberGroup::Regular,
        }
    }

    pub fn is_featured(&self) -> bool {
        matches!(self, MemberGroup::Featured)
    }
}

impl OrderedRecord for Member {
    type Partition = MemberGroup;
    type Update = Member;
    type Draft = MemberDraft;
    type UpdateDraft = MemberDraft;

    const KIND: &'static str = "Member";
    const COLLECTION: &'static str = "members";
    const CLEARABLE_FIELDS: &'static [&'static str] = &["designation", "imageUrl", "phone", "email"];

    fn partition(&self) -> MemberGroup {
        if self.is_featured() {
            MemberGroup::Featured
        } else {
            MemberGroup::Regular
        }
    }

    fn apply(&mut self, update: Member) {
        *self = update;
    }
}

/// The flat shape a member has on the wire and in storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberDocument {
    pub name: Bilingual,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<Bilingual>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
}

impl TryFrom<MemberDocument> for Member {
    type Error = ValidationError;

    fn try_from(doc: MemberDocument) -> Result<Self, Self::Error> {
        let contact = Contact {
            phone: doc.phone,
            email: doc.email,
        };
        if !doc.is_featured {
            return Ok(Member::Basic {
                name: doc.name,
                image_url: doc.image_url,
                contact,
            });
        }
        match (doc.designation, doc.image_url) {
            (Some(designation), Some(image_url)) => Ok(Member::Featured {
                name: doc.name,
                designation,
                image_url,
                contact,
            }),
            _ => Err(ValidationError::new(
                "a featured member needs a designation and an imageUrl",
            )),
        }
    }
}

impl From<Member> for MemberDocument {
    fn from(member: Member) -> Self {
        match member {
            Member::Basic {
                name,
                image_url,
                contact,
            } => MemberDocument {
                name,
                designation: None,
                image_url,
                phone: contact.phone,
                email: contact.email,
                is_featured: false,
            },
            Member::Featured {
                name,
                designation,
                image_url,
                contact,
            } => MemberDocument {
                name,
                designation: Some(designation),
                image_url: Some(image_url),
                phone: contact.phone,
                email: contact.email,
                is_featured: true,
            },
        }
    }
}

impl PartialSchema for Member {
    fn schema() -> RefOr<Schema> {
        MemberDocument::schema()
    }
}

impl ToSchema for Member {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("Member")
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberDraft {
    pub name: Option<BilingualDraft>,
    pub designation: Option<BilingualDraft>,
    pub image_url: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_featured: Option<bool>,
}

impl Validate for MemberDraft {
    type Output = Member;

    fn validate(self) -> Result<Member, ValidationError> {
        let contact = Contact {
            phone: present(self.phone),
            email: present(self.email),
        };
        let mut required = Required::default();
        let name = required.bilingual("name", self.name);

        if !self.is_featured.unwrap_or(false) {
            required.finish()?;
            return Ok(Member::Basic {
                name,
                image_url: present(self.image_url),
                contact,
            });
        }

        let designation = required.bilingual("designation", self.designation);
        let image_url = required.text("imageUrl", self.image_url);
        required.finish()?;

        Ok(Member::Featured {
            name,
            designation,
            image_url,
            contact,
        })
    }
}
