//! Known companies used for entity-centric enrichment

/// One row of a published company ranking (e.g. the Forbes Global 2000)
///
/// Every column except the rank is kept as the text found in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCompany {
    /// Position in the ranking
    pub rank: u32,
    /// Company name
    pub name: String,
    /// Headquarters country
    pub country: String,
    /// Industry, used as the record's sector
    pub sector: String,
    /// Sales figure
    pub sales: String,
    /// Profit figure
    pub profit: String,
    /// Assets figure
    pub assets: String,
    /// Market value, `"N/A"` when the row was cut short
    pub market_cap: String,
}
