use super::{Preferences, TeacherId};
use serde::{Deserialize, Serialize};

/// A teacher, with scheduling preferences and whether gaps between their
/// classes on the same day ("windows") are tolerated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
    pub preferences: Preferences,
    #[serde(rename = "windowsAllowed")]
    pub windows_allowed: bool,
}
