//! The closed set of booking categories used by the agency.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Categorises ledger activity for reporting. Serialized by its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Freight Charges")]
    FreightCharges,
    #[serde(rename = "Port Charges")]
    PortCharges,
    #[serde(rename = "Agency Fees")]
    AgencyFees,
    #[serde(rename = "Customs Duty")]
    CustomsDuty,
    #[serde(rename = "Handling Charges")]
    HandlingCharges,
    #[serde(rename = "Documentation")]
    Documentation,
    #[serde(rename = "Insurance")]
    Insurance,
    #[serde(rename = "Vessel Expenses")]
    VesselExpenses,
    #[serde(rename = "Crew Wages")]
    CrewWages,
    #[serde(rename = "Fuel & Supplies")]
    FuelAndSupplies,
    #[serde(rename = "Repairs & Maintenance")]
    RepairsAndMaintenance,
    #[serde(rename = "Office Expenses")]
    OfficeExpenses,
    #[serde(rename = "Travel & Lodging")]
    TravelAndLodging,
    #[serde(rename = "Commission")]
    Commission,
    #[serde(rename = "Miscellaneous")]
    Miscellaneous,
}

impl Category {
    /// Every category, in presentation order.
    pub const ALL: [Category; 15] = [
        Category::FreightCharges,
        Category::PortCharges,
        Category::AgencyFees,
        Category::CustomsDuty,
        Category::HandlingCharges,
        Category::Documentation,
        Category::Insurance,
        Category::VesselExpenses,
        Category::CrewWages,
        Category::FuelAndSupplies,
        Category::RepairsAndMaintenance,
        Category::OfficeExpenses,
        Category::TravelAndLodging,
        Category::Commission,
        Category::Miscellaneous,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::FreightCharges => "Freight Charges",
            Category::PortCharges => "Port Charges",
            Category::AgencyFees => "Agency Fees",
            Category::CustomsDuty => "Customs Duty",
            Category::HandlingCharges => "Handling Charges",
            Category::Documentation => "Documentation",
            Category::Insurance => "Insurance",
            Category::VesselExpenses => "Vessel Expenses",
            Category::CrewWages => "Crew Wages",
            Category::FuelAndSupplies => "Fuel & Supplies",
            Category::RepairsAndMaintenance => "Repairs & Maintenance",
            Category::OfficeExpenses => "Office Expenses",
            Category::TravelAndLodging => "Travel & Lodging",
            Category::Commission => "Commission",
            Category::Miscellaneous => "Miscellaneous",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category `{0}`")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseCategoryError(needle.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!(
            "  fuel & supplies ".parse::<Category>(),
            Ok(Category::FuelAndSupplies)
        );
        assert_eq!("COMMISSION".parse::<Category>(), Ok(Category::Commission));
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = "Bunkering".parse::<Category>().unwrap_err();
        assert_eq!(err.to_string(), "unknown category `Bunkering`");
    }

    #[test]
    fn serde_uses_display_labels() {
        let json = serde_json::to_string(&Category::RepairsAndMaintenance).unwrap();
        assert_eq!(json, "\"Repairs & Maintenance\"");
        let parsed: Category = serde_json::from_str("\"Travel & Lodging\"").unwrap();
        assert_eq!(parsed, Category::TravelAndLodging);
    }

    #[test]
    fn every_label_round_trips_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.label().parse::<Category>(), Ok(category));
        }
    }
}
