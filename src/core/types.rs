//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a good in the goods catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GoodId(pub u16);

/// Identifier of a facility type in the facility registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FacilityTypeId(pub u16);

/// Identifier of a placed facility instance
///
/// Ordering matters: production visits facilities in ascending id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FacilityId(pub u32);

/// Identifier of a county (the economic aggregation unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CountyId(pub u32);

/// Identifier of a map cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellId(pub u32);

/// Simulated day counter
pub type Day = u64;

macro_rules! impl_id_display {
    ($($ty:ident => $prefix:literal),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, concat!($prefix, "#{}"), self.0)
                }
            }
        )*
    };
}

impl_id_display! {
    GoodId => "good",
    FacilityTypeId => "facility_type",
    FacilityId => "facility",
    CountyId => "county",
    CellId => "cell",
}

/// Category of labor a facility draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaborCategory {
    /// Field hands, miners, woodcutters
    Unskilled,
    /// Millers, smiths, weavers
    Skilled,
}

impl LaborCategory {
    pub const ALL: [LaborCategory; 2] = [LaborCategory::Unskilled, LaborCategory::Skilled];

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "unskilled" => Some(LaborCategory::Unskilled),
            "skilled" => Some(LaborCategory::Skilled),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facility_id_ordering() {
        let mut ids = vec![FacilityId(7), FacilityId(2), FacilityId(5)];
        ids.sort();
        assert_eq!(ids, vec![FacilityId(2), FacilityId(5), FacilityId(7)]);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(GoodId(3).to_string(), "good#3");
        assert_eq!(CountyId(12).to_string(), "county#12");
    }

    #[test]
    fn test_labor_category_parse_case_insensitive() {
        assert_eq!(LaborCategory::parse("SKILLED"), Some(LaborCategory::Skilled));
        assert_eq!(LaborCategory::parse("unskilled"), Some(LaborCategory::Unskilled));
        assert_eq!(LaborCategory::parse("serf"), None);
    }
}
