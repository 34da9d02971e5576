use crate::model::EntityId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An administrator of the site, as seen by everything except the login check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdminUser {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub username: String,
}

/// What a login is checked against. Never leaves the service.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    pub user: AdminUser,
    pub password_hash: String,
}
