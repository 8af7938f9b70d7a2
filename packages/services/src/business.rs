use serde::{Deserialize, Serialize};

/// What the user tells us about their business before generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessInfo {
    pub name: String,
    /// Kind of business, e.g. "bakery"
    #[serde(rename = "type")]
    pub business_type: String,
    pub location: String,
    pub language: String,
}

impl BusinessInfo {
    pub fn new(
        name: impl Into<String>,
        business_type: impl Into<String>,
        location: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            business_type: business_type.into(),
            location: location.into(),
            language: language.into(),
        }
    }
}
