//! Report model and the notification payload derived from it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::{Listing, Profile};

/// A user's complaint against a listing, resolved later by an administrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub reporter_id: Uuid,
    pub listing_id: Uuid,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing: Option<Listing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter: Option<Profile>,
}

impl Report {
    /// Build the notification payload; needs both the listing and the
    /// reporter joins to be loaded.
    pub fn notification(&self) -> Option<ReportNotification> {
        let listing = self.listing.as_ref()?;
        let reporter = self.reporter.as_ref()?;

        Some(ReportNotification {
            id: self.id.to_string(),
            reporter_id: self.reporter_id.to_string(),
            listing_id: self.listing_id.to_string(),
            reason: self.reason.clone(),
            description: self.description.clone(),
            created_at: self.created_at.to_rfc3339(),
            listing: Some(ListingSummary {
                title: listing.title.clone(),
                price: listing.price,
                user_id: listing.user_id.to_string(),
            }),
            reporter: Some(ReporterSummary {
                display_name: reporter.display_name.clone(),
            }),
        })
    }
}

/// Body of the report notification request
///
/// Every field may be absent or `null` on the wire; the handler, not the
/// JSON decoder, decides what is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ReportNotification {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reporter_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub listing_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default)]
    pub listing: Option<ListingSummary>,
    #[serde(default)]
    pub reporter: Option<ReporterSummary>,
}

/// The reported listing, as joined into the notification payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ListingSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: String,
}

/// The reporting user, as joined into the notification payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ReporterSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
}

/// Treat an explicit `null` like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
