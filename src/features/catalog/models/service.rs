use serde::{Deserialize, Serialize};

/// Reference service entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub slug: String,
    /// Arabic display name
    pub name_local: String,
    /// Latin-script display name
    pub name_alt: String,
    /// Image pool / grouping key, e.g. "moving" or "cleaning"
    pub category: String,
}
