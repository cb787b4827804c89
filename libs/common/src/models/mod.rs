//! Marketplace data model
//!
//! Mirrors the rows owned by the hosted database. Field names follow the
//! table columns so the same types serialize for both the REST payloads and
//! `sqlx` row mapping.

/// Declares a closed string enum whose wire form is its display name.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every value, in display order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err($crate::error::UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

pub mod enums;
pub mod favorite;
pub mod listing;
pub mod profile;
pub mod report;

pub use enums::{Category, Condition, ContactPreference, Municipio};
pub use favorite::Favorite;
pub use listing::Listing;
pub use profile::{NewProfile, Profile, UpdateProfile};
pub use report::{ListingSummary, Report, ReportNotification, ReporterSummary};
