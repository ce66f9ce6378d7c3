use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Administrative region a city belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Central,
    Western,
    Eastern,
    Northern,
    Southern,
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Region::Central => write!(f, "central"),
            Region::Western => write!(f, "western"),
            Region::Eastern => write!(f, "eastern"),
            Region::Northern => write!(f, "northern"),
            Region::Southern => write!(f, "southern"),
        }
    }
}

/// Reference city entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub slug: String,
    /// Arabic display name
    pub name_local: String,
    /// Latin-script display name
    pub name_alt: String,
    pub region: Region,
}
