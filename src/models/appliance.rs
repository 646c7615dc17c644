use serde::{Deserialize, Serialize};

/// A bookable appliance category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appliance {
    pub id: String,
    pub display_name: String,
    pub image_ref: String,
}

impl Appliance {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            image_ref: image_ref.into(),
        }
    }

    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty()
            || self
                .display_name
                .to_lowercase()
                .contains(&query.to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technician {
    pub id: String,
    pub display_name: String,
    pub skill_tag: String,
}

impl Technician {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        skill_tag: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            skill_tag: skill_tag.into(),
        }
    }
}
