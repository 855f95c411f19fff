//! Farm domain types
//!
//! Enumerations whose wire names back enumerated command parameters and
//! status rendering. Parsing ignores ASCII case; display uses the wire name.

use thiserror::Error;

/// A string did not name any variant of a farm enum
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid {kind}; expected one of: {expected}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const WIRE_NAMES: &'static [&'static str] = &[$($wire),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($wire) {
                        return Ok($name::$variant);
                    }
                )+
                Err($crate::domain::UnknownVariant {
                    kind: stringify!($name),
                    value: s.to_string(),
                    expected: Self::WIRE_NAMES.join(", "),
                })
            }
        }
    };
}

mod fleet;
mod license_endpoint;
mod session_action;
mod storage_profile;

pub use fleet::FleetStatus;
pub use license_endpoint::LicenseEndpointStatus;
pub use session_action::SessionActionStatus;
pub use storage_profile::OsFamily;

/// Broad health of a status value, used for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Good,
    Pending,
    Bad,
    Neutral,
}

/// Classify any known farm status string
pub fn status_tone(status: &str) -> Option<StatusTone> {
    if let Ok(status) = status.parse::<FleetStatus>() {
        return Some(status.tone());
    }
    if let Ok(status) = status.parse::<SessionActionStatus>() {
        return Some(status.tone());
    }
    if let Ok(status) = status.parse::<LicenseEndpointStatus>() {
        return Some(status.tone());
    }
    None
}
