//! # Postal Code Classifier
//!
//! Turns a raw postal code into a [`PostalCode`] record:
//!
//! 1. Normalize and validate ([`NormalizedCode::parse`]).
//! 2. Look up province and subdivision from the FSA ([`RegionTable`]).
//! 3. Resolve the municipality ([`FsaResolver`]).
//! 4. Read the special-purpose flags off fixed character positions.
//!
//! Steps 1, 2 and 4 are pure and exposed separately as
//! [`Classifier::describe`]. Any failure aborts the whole classification.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::code::{Fsa, NormalizedCode};
use crate::error::PostalCodeError;
use crate::region::{Region, RegionTable};
use crate::resolver::FsaResolver;

/// LDU reserved for Business Reply Mail.
const BUSINESS_REPLY_LDU: &str = "9z9";

/// LDU reserved for regional distribution centres.
const DISTRIBUTION_CENTRE_LDU: &str = "9z0";

/// FSA covering federal government buildings in Ottawa.
const GOVERNMENT_FSA: &str = "k1a";

/// Information extracted from a Canadian postal code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PostalCode {
    /// Whether the code is in an urban delivery area.
    pub urban: bool,
    /// Province or territory.
    pub province: String,
    /// Area of the province, for provinces split across several districts.
    pub subdivision: String,
    /// Municipality served by the FSA.
    pub municipality: String,
    /// The code belongs to a Canada Post regional distribution centre.
    pub regional_distribution_centre: bool,
    /// The code belongs to a federal government building.
    pub government_building: bool,
    /// The code is used by the Business Reply Mail service.
    pub business_reply: bool,
    /// The code belongs to a Canada Post post office.
    pub post_office: bool,
}

/// Everything derivable from the code alone, without a municipality lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeFacts {
    pub code: NormalizedCode,
    pub fsa: Fsa,
    pub region: Region,
    pub urban: bool,
    pub regional_distribution_centre: bool,
    pub government_building: bool,
    pub business_reply: bool,
    pub post_office: bool,
}

impl CodeFacts {
    /// Combine with a resolved municipality into the public record.
    pub fn into_postal_code(self, municipality: String) -> PostalCode {
        PostalCode {
            urban: self.urban,
            province: self.region.province.name().to_string(),
            subdivision: self.region.subdivision.to_string(),
            municipality,
            regional_distribution_centre: self.regional_distribution_centre,
            government_building: self.government_building,
            business_reply: self.business_reply,
            post_office: self.post_office,
        }
    }
}

/// Stateless classifier over a shared region table.
///
/// Cheap to clone; safe to call concurrently.
#[derive(Debug, Clone)]
pub struct Classifier {
    regions: Arc<RegionTable>,
}

impl Classifier {
    pub fn new(regions: Arc<RegionTable>) -> Self {
        Self { regions }
    }

    /// Classifier over [`RegionTable::canadian`].
    pub fn canadian() -> Self {
        Self::new(Arc::new(RegionTable::canadian()))
    }

    pub fn regions(&self) -> &RegionTable {
        &self.regions
    }

    /// Validate `raw` and derive every fact that needs no lookup.
    ///
    /// # Errors
    ///
    /// [`PostalCodeError::InvalidFormat`] for malformed input,
    /// [`PostalCodeError::InvalidFsa`] if the region table has no entry.
    pub fn describe(&self, raw: &str) -> Result<CodeFacts, PostalCodeError> {
        let code = NormalizedCode::parse(raw)?;
        let fsa = code.fsa();
        let region = self.regions.lookup(&fsa)?;

        let ldu = code.ldu();
        let business_reply = ldu == BUSINESS_REPLY_LDU;
        let regional_distribution_centre = !business_reply && ldu == DISTRIBUTION_CENTRE_LDU;

        Ok(CodeFacts {
            urban: code.byte_at(1) != b'0',
            government_building: fsa.as_str() == GOVERNMENT_FSA,
            post_office: code.byte_at(5) == b'0',
            business_reply,
            regional_distribution_centre,
            region,
            fsa,
            code,
        })
    }

    /// Full classification, including the municipality lookup.
    ///
    /// The resolver is only queried once `raw` has been validated and
    /// mapped to a region.
    ///
    /// # Errors
    ///
    /// Everything [`Classifier::describe`] returns, plus
    /// [`PostalCodeError::MunicipalityLookupFailed`] carrying the
    /// resolver's error.
    pub async fn classify(
        &self,
        raw: &str,
        resolver: &dyn FsaResolver,
    ) -> Result<PostalCode, PostalCodeError> {
        let facts = self.describe(raw)?;
        tracing::debug!(
            fsa = %facts.fsa,
            region = facts.region.code,
            backend = resolver.backend_name(),
            "resolving municipality"
        );
        let municipality = resolver.resolve(&facts.fsa).await?;
        Ok(facts.into_postal_code(municipality))
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::canadian()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::error::ResolveError;
    use crate::region::Province;
    use crate::resolver::StaticResolver;

    const GOVERNMENT_OFFICES: &str =
        "Government of Canada Ottawa and Gatineau offices (partly in QC)";

    fn resolver() -> StaticResolver {
        StaticResolver::new()
            .with_entry("K1A", GOVERNMENT_OFFICES)
            .with_entry("B2C", "Iona")
            .with_entry("G1X", "Quebec City West Sainte-Foy")
            .with_entry("X0A", "Qikiqtaaluk Region")
    }

    /// Counts calls and always fails with a backend error.
    #[derive(Default)]
    struct FailingResolver {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FsaResolver for FailingResolver {
        async fn resolve(&self, _fsa: &Fsa) -> Result<String, ResolveError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ResolveError::Backend("disk I/O error".into()))
        }

        fn backend_name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn government_building() {
        let record = Classifier::canadian()
            .classify("K1A 0B1", &resolver())
            .await
            .unwrap();
        assert_eq!(
            record,
            PostalCode {
                urban: true,
                province: "Ontario".into(),
                subdivision: "Ottawa".into(),
                municipality: GOVERNMENT_OFFICES.into(),
                government_building: true,
                ..PostalCode::default()
            }
        );
    }

    #[tokio::test]
    async fn business_reply() {
        let record = Classifier::canadian()
            .classify("B2C 9Z9", &resolver())
            .await
            .unwrap();
        assert_eq!(record.province, "Nova Scotia");
        assert_eq!(record.subdivision, "");
        assert_eq!(record.municipality, "Iona");
        assert!(record.urban);
        assert!(record.business_reply);
        assert!(!record.regional_distribution_centre);
        assert!(!record.post_office);
    }

    #[tokio::test]
    async fn post_office() {
        let record = Classifier::canadian()
            .classify("G1X 2Z0", &resolver())
            .await
            .unwrap();
        assert_eq!(record.province, "Quebec");
        assert_eq!(record.subdivision, "Eastern");
        assert!(record.urban);
        assert!(record.post_office);
        assert!(!record.regional_distribution_centre);
    }

    #[tokio::test]
    async fn nunavut_rural() {
        let record = Classifier::canadian()
            .classify("X0A 1B2", &resolver())
            .await
            .unwrap();
        assert_eq!(record.province, "Nunavut");
        assert!(!record.urban);
    }

    #[test]
    fn regional_distribution_centre() {
        let facts = Classifier::canadian().describe("b2c9z0").unwrap();
        assert!(facts.regional_distribution_centre);
        assert!(!facts.business_reply);
        assert!(facts.post_office);
    }

    #[tokio::test]
    async fn invalid_format_never_reaches_resolver() {
        let failing = FailingResolver::default();
        let classifier = Classifier::canadian();
        for raw in ["K1A-0B1", "", "invalid", "K1A0B1X"] {
            let err = classifier.classify(raw, &failing).await.unwrap_err();
            assert_eq!(err, PostalCodeError::InvalidFormat, "{raw:?}");
            assert_eq!(err.to_string(), "invalid postal code");
        }
        assert_eq!(failing.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn lookup_failure_aborts_classification() {
        let failing = FailingResolver::default();
        let err = Classifier::canadian()
            .classify("K1A 0B1", &failing)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            PostalCodeError::MunicipalityLookupFailed(ResolveError::Backend(
                "disk I/O error".into()
            ))
        );
        assert_eq!(failing.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_fsa_is_not_found() {
        let err = Classifier::canadian()
            .classify("V5K 0A1", &resolver())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "no municipality found for fsa V5K");
    }

    #[tokio::test]
    async fn table_gap_is_invalid_fsa() {
        let table = RegionTable::new().with_district(
            'k',
            Region::new(Province::Ontario, "Ottawa", "ON1"),
        );
        let failing = FailingResolver::default();
        let err = Classifier::new(Arc::new(table))
            .classify("B2C 9Z9", &failing)
            .await
            .unwrap_err();
        assert_eq!(err, PostalCodeError::InvalidFsa);
        assert_eq!(failing.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn spacing_and_case_do_not_matter() {
        let classifier = Classifier::canadian();
        let resolver = resolver();
        let a = classifier.classify("k1a0b1", &resolver).await.unwrap();
        let b = classifier.classify("K1A 0B1", &resolver).await.unwrap();
        let c = classifier.classify(" k1A 0b1 ", &resolver).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn record_serializes_camel_case() {
        let json = serde_json::to_value(PostalCode::default()).unwrap();
        for key in [
            "urban",
            "province",
            "subdivision",
            "municipality",
            "regionalDistributionCentre",
            "governmentBuilding",
            "businessReply",
            "postOffice",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
