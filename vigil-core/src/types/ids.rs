//! Prefixed newtype identifiers, one per entity.
//!
//! Ids are opaque strings (`comp_1f3a9c2e`, `flag_0b7d41aa`, ...) generated
//! at insert time and never reused across entity types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh id with this entity's prefix.
            pub fn generate() -> Self {
                let hex = Uuid::new_v4().simple().to_string();
                Self(format!(concat!($prefix, "_{}"), &hex[..8]))
            }

            /// Wrap an id read back from storage.
            pub fn from_string(raw: String) -> Self {
                Self(raw)
            }

            /// The id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of a registered component.
    ComponentId,
    "comp"
);

define_id!(
    /// Identifier of a user story revision.
    StoryId,
    "story"
);

define_id!(
    /// Identifier of a single touch point row.
    TouchPointId,
    "tp"
);

define_id!(
    /// Identifier of one drift measurement.
    MeasurementId,
    "drift"
);

define_id!(
    /// Identifier of a component flag.
    FlagId,
    "flag"
);

define_id!(
    /// Identifier of an analysis run.
    RunId,
    "run"
);
