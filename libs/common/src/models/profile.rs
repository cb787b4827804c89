//! Profile model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ContactPreference, Municipio};

/// Per-user account record, keyed by the auth user's id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub display_name: String,
    pub municipio: Municipio,
    pub contact_preference: ContactPreference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New profile creation payload
///
/// The id comes from the signed-in user and `is_admin` is always false on
/// insert, so neither is part of the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProfile {
    pub display_name: String,
    pub municipio: Municipio,
    pub contact_preference: ContactPreference,
    #[serde(default)]
    pub contact_info: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Profile update payload; absent fields keep their stored value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UpdateProfile {
    pub display_name: Option<String>,
    pub municipio: Option<Municipio>,
    pub contact_preference: Option<ContactPreference>,
    pub contact_info: Option<String>,
    pub avatar_url: Option<String>,
}

impl UpdateProfile {
    pub fn is_empty(&self) -> bool {
        self == &UpdateProfile::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_deserializes_database_row() {
        let row = json!({
            "id": "2f0b6f0e-8a51-4f3e-9a43-2a7c1f1c2d11",
            "display_name": "Ana",
            "municipio": "San Juan",
            "contact_preference": "WhatsApp",
            "contact_info": "787-555-0101",
            "avatar_url": null,
            "is_admin": false,
            "created_at": "2024-03-01T12:00:00Z",
            "updated_at": "2024-03-01T12:00:00Z"
        });

        let profile: Profile = serde_json::from_value(row).unwrap();
        assert_eq!(profile.municipio, Municipio::SanJuan);
        assert_eq!(profile.contact_preference, ContactPreference::WhatsApp);
        assert_eq!(profile.contact_info.as_deref(), Some("787-555-0101"));
        assert!(profile.avatar_url.is_none());
    }

    #[test]
    fn test_update_profile_partial_payload() {
        let update: UpdateProfile =
            serde_json::from_value(json!({ "municipio": "Ponce" })).unwrap();
        assert_eq!(update.municipio, Some(Municipio::Ponce));
        assert!(update.display_name.is_none());
        assert!(!update.is_empty());
        assert!(UpdateProfile::default().is_empty());
    }
}
