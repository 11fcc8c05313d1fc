//! Asset-class classification for positions.

use serde::{Deserialize, Serialize};

/// Broad asset class of a position.
///
/// Drives stress-shock resolution and the per-class liquidity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    /// Cash and cash equivalents.
    Cash,
    /// Government bonds.
    GovernmentBond,
    /// Corporate bonds.
    CorporateBond,
    /// Large-capitalization equities.
    EquityLargeCap,
    /// Small-capitalization equities.
    EquitySmallCap,
    /// Real estate (REITs, direct holdings).
    RealEstate,
    /// Commodities.
    Commodity,
    /// Private equity and other unlisted holdings.
    PrivateEquity,
    /// Crypto assets.
    Crypto,
}

impl AssetClass {
    /// All asset classes, in declaration order.
    pub const ALL: [AssetClass; 9] = [
        Self::Cash,
        Self::GovernmentBond,
        Self::CorporateBond,
        Self::EquityLargeCap,
        Self::EquitySmallCap,
        Self::RealEstate,
        Self::Commodity,
        Self::PrivateEquity,
        Self::Crypto,
    ];

    /// Returns true for listed equity classes.
    #[must_use]
    pub fn is_equity(&self) -> bool {
        matches!(self, Self::EquityLargeCap | Self::EquitySmallCap)
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Cash => "Cash",
            Self::GovernmentBond => "Government Bond",
            Self::CorporateBond => "Corporate Bond",
            Self::EquityLargeCap => "Equity (Large Cap)",
            Self::EquitySmallCap => "Equity (Small Cap)",
            Self::RealEstate => "Real Estate",
            Self::Commodity => "Commodity",
            Self::PrivateEquity => "Private Equity",
            Self::Crypto => "Crypto",
        };
        write!(f, "{name}")
    }
}
