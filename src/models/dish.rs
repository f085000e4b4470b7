use std::fmt;
use std::str::FromStr;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DishCategory {
    Pizza,
    Soup,
    Sandwich,
}

impl DishCategory {
    pub const ALL: [DishCategory; 3] = [DishCategory::Pizza, DishCategory::Soup, DishCategory::Sandwich];

    pub fn as_str(&self) -> &'static str {
        match self {
            DishCategory::Pizza => "pizza",
            DishCategory::Soup => "soup",
            DishCategory::Sandwich => "sandwich",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DishCategory::Pizza => "Pizza",
            DishCategory::Soup => "Soup",
            DishCategory::Sandwich => "Sandwich",
        }
    }
}

impl fmt::Display for DishCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DishCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pizza" => Ok(DishCategory::Pizza),
            "soup" => Ok(DishCategory::Soup),
            "sandwich" => Ok(DishCategory::Sandwich),
            other => Err(format!("Unknown dish type: {other}")),
        }
    }
}

/// Payload POSTed to the dish API.
///
/// Category-specific attributes live in [`DishDetails`], so a soup can never
/// carry a pizza's diameter. Unset attributes are left out of the JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DishSubmission {
    pub name: String,
    pub preparation_time: String,
    #[serde(flatten)]
    pub details: DishDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DishDetails {
    Pizza {
        #[serde(skip_serializing_if = "Option::is_none")]
        no_of_slices: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        diameter: Option<f64>,
    },
    Soup {
        #[serde(skip_serializing_if = "Option::is_none")]
        spiciness_scale: Option<u8>,
    },
    Sandwich {
        #[serde(skip_serializing_if = "Option::is_none")]
        slices_of_bread: Option<u32>,
    },
}

impl DishDetails {
    pub fn category(&self) -> DishCategory {
        match self {
            DishDetails::Pizza { .. } => DishCategory::Pizza,
            DishDetails::Soup { .. } => DishCategory::Soup,
            DishDetails::Sandwich { .. } => DishCategory::Sandwich,
        }
    }
}
