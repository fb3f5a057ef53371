//! # FSA Region Table
//!
//! The first letter of a postal code is its postal district, which maps
//! to a province or territory. Quebec and Ontario are split across several
//! districts, each naming a subdivision. Territory `X` is shared: the
//! three Baffin FSAs `X0A`, `X0B`, `X0C` belong to Nunavut, every other
//! `X` FSA to the Northwest Territories.
//!
//! Each region also carries a short region code (`ON1`, `QC2`, `NT`)
//! used to select a per-region municipality file.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::code::Fsa;
use crate::error::PostalCodeError;

/// Canadian provinces and territories reachable through the region table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Province {
    #[serde(rename = "Newfoundland")]
    Newfoundland,
    #[serde(rename = "Nova Scotia")]
    NovaScotia,
    #[serde(rename = "Prince Edward Island")]
    PrinceEdwardIsland,
    #[serde(rename = "New Brunswick")]
    NewBrunswick,
    #[serde(rename = "Quebec")]
    Quebec,
    #[serde(rename = "Ontario")]
    Ontario,
    #[serde(rename = "Manitoba")]
    Manitoba,
    #[serde(rename = "Saskatchewan")]
    Saskatchewan,
    #[serde(rename = "Alberta")]
    Alberta,
    #[serde(rename = "British Columbia")]
    BritishColumbia,
    #[serde(rename = "Nunavut")]
    Nunavut,
    #[serde(rename = "Northwest Territories")]
    NorthwestTerritories,
    #[serde(rename = "Yukon")]
    Yukon,
}

impl Province {
    /// Full English name as returned to API callers.
    pub fn name(self) -> &'static str {
        match self {
            Self::Newfoundland => "Newfoundland",
            Self::NovaScotia => "Nova Scotia",
            Self::PrinceEdwardIsland => "Prince Edward Island",
            Self::NewBrunswick => "New Brunswick",
            Self::Quebec => "Quebec",
            Self::Ontario => "Ontario",
            Self::Manitoba => "Manitoba",
            Self::Saskatchewan => "Saskatchewan",
            Self::Alberta => "Alberta",
            Self::BritishColumbia => "British Columbia",
            Self::Nunavut => "Nunavut",
            Self::NorthwestTerritories => "Northwest Territories",
            Self::Yukon => "Yukon",
        }
    }
}

impl std::fmt::Display for Province {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A province plus optional subdivision, and its region code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Region {
    pub province: Province,
    /// Empty unless the province spans several postal districts.
    pub subdivision: &'static str,
    /// Short code selecting the per-region municipality file.
    pub code: &'static str,
}

impl Region {
    pub const fn new(province: Province, subdivision: &'static str, code: &'static str) -> Self {
        Self {
            province,
            subdivision,
            code,
        }
    }

    /// Key used in the persisted region-code table: the province name,
    /// followed by a space and the subdivision when there is one.
    pub fn table_key(&self) -> String {
        if self.subdivision.is_empty() {
            self.province.name().to_string()
        } else {
            format!("{} {}", self.province.name(), self.subdivision)
        }
    }
}

/// Mapping from FSA to [`Region`].
///
/// Built once at startup and shared read-only. Lookups check per-FSA
/// overrides before falling back to the district letter.
#[derive(Debug, Clone, Default)]
pub struct RegionTable {
    districts: HashMap<char, Region>,
    overrides: HashMap<String, Region>,
}

impl RegionTable {
    /// An empty table. Use [`RegionTable::canadian`] for the real mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map every FSA starting with `district` to `region`.
    pub fn with_district(mut self, district: char, region: Region) -> Self {
        self.districts.insert(district.to_ascii_lowercase(), region);
        self
    }

    /// Map one specific FSA to `region`, taking precedence over its district.
    pub fn with_override(mut self, fsa: &str, region: Region) -> Self {
        self.overrides.insert(fsa.to_ascii_lowercase(), region);
        self
    }

    /// The Canada Post district mapping.
    pub fn canadian() -> Self {
        use Province::*;

        let nunavut = Region::new(Nunavut, "", "NU");

        Self::new()
            .with_district('a', Region::new(Newfoundland, "", "NL"))
            .with_district('b', Region::new(NovaScotia, "", "NS"))
            .with_district('c', Region::new(PrinceEdwardIsland, "", "PE"))
            .with_district('e', Region::new(NewBrunswick, "", "NB"))
            .with_district('g', Region::new(Quebec, "Eastern", "QC1"))
            .with_district('h', Region::new(Quebec, "Greater Montreal Area", "QC2"))
            .with_district('j', Region::new(Quebec, "Western", "QC3"))
            .with_district('k', Region::new(Ontario, "Ottawa", "ON1"))
            .with_district('l', Region::new(Ontario, "Greater Toronto Area", "ON2"))
            .with_district('m', Region::new(Ontario, "Toronto Proper", "ON3"))
            .with_district('n', Region::new(Ontario, "South", "ON4"))
            .with_district('p', Region::new(Ontario, "North", "ON5"))
            .with_district('r', Region::new(Manitoba, "", "MB"))
            .with_district('s', Region::new(Saskatchewan, "", "SK"))
            .with_district('t', Region::new(Alberta, "", "AB"))
            .with_district('v', Region::new(BritishColumbia, "", "BC"))
            .with_district('x', Region::new(NorthwestTerritories, "", "NT"))
            .with_district('y', Region::new(Yukon, "", "YT"))
            .with_override("x0a", nunavut)
            .with_override("x0b", nunavut)
            .with_override("x0c", nunavut)
    }

    /// Region for `fsa`.
    ///
    /// # Errors
    ///
    /// Returns [`PostalCodeError::InvalidFsa`] when neither the FSA nor its
    /// district letter has an entry.
    pub fn lookup(&self, fsa: &Fsa) -> Result<Region, PostalCodeError> {
        self.overrides
            .get(fsa.as_str())
            .or_else(|| self.districts.get(&fsa.district()))
            .copied()
            .ok_or(PostalCodeError::InvalidFsa)
    }

    /// Every distinct region in the table.
    pub fn regions(&self) -> Vec<Region> {
        let mut regions: Vec<Region> = self
            .districts
            .values()
            .chain(self.overrides.values())
            .copied()
            .collect();
        regions.sort_by_key(|r| r.code);
        regions.dedup();
        regions
    }

    /// The persisted region-code table: `"Ontario Ottawa" -> "ON1"`.
    pub fn region_codes(&self) -> BTreeMap<String, &'static str> {
        self.regions()
            .into_iter()
            .map(|r| (r.table_key(), r.code))
            .collect()
    }
}
