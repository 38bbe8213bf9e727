//! Jurisdiction registry
//!
//! Static table of the 50 U.S. states plus the District of Columbia. Each
//! entry knows its marital property regime, whether it recognizes
//! quasi-community property (QCP), and, where the engine documents them, the
//! statutory equitable-distribution factors.
//!
//! The table is plain `const` data, so concurrent readers need no
//! synchronization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;
use crate::types::Regime;

/// U.S. state or DC, identified by its postal code.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Jurisdiction {
    AL, AK, AZ, AR, CA, CO, CT, DE, DC, FL, GA, HI, ID, IL, IN, IA, KS,
    KY, LA, ME, MD, MA, MI, MN, MS, MO, MT, NE, NV, NH, NJ, NM, NY, NC,
    ND, OH, OK, OR, PA, RI, SC, SD, TN, TX, UT, VT, VA, WA, WV, WI, WY,
}

/// 23 Pa.C.S. § 3502(a), in statutory order.
const PENNSYLVANIA_FACTORS: &[&str] = &[
    "The length of the marriage",
    "Any prior marriage of either party",
    "The age, health, station, amount and sources of income, vocational skills, \
     employability, estate, liabilities and needs of each of the parties",
    "The contribution by one party to the education, training or increased earning \
     power of the other party",
    "The opportunity of each party for future acquisitions of capital assets and income",
    "The sources of income of both parties, including medical, retirement, insurance \
     or other benefits",
    "The contribution or dissipation of each party in the acquisition, preservation, \
     depreciation or appreciation of the marital property, including the contribution \
     of a party as homemaker",
    "The value of the property set apart to each party",
    "The standard of living of the parties established during the marriage",
    "The economic circumstances of each party at the time the division of property \
     is to become effective",
    "The federal, state and local tax ramifications associated with each asset to be \
     divided",
    "The expense of sale, transfer or liquidation associated with a particular asset",
    "Whether the party will be serving as the custodian of any dependent minor children",
];

impl Jurisdiction {
    /// Every jurisdiction, in alphabetical order of state name.
    #[rustfmt::skip]
    pub const ALL: [Jurisdiction; 51] = [
        Jurisdiction::AL, Jurisdiction::AK, Jurisdiction::AZ, Jurisdiction::AR,
        Jurisdiction::CA, Jurisdiction::CO, Jurisdiction::CT, Jurisdiction::DE,
        Jurisdiction::DC, Jurisdiction::FL, Jurisdiction::GA, Jurisdiction::HI,
        Jurisdiction::ID, Jurisdiction::IL, Jurisdiction::IN, Jurisdiction::IA,
        Jurisdiction::KS, Jurisdiction::KY, Jurisdiction::LA, Jurisdiction::ME,
        Jurisdiction::MD, Jurisdiction::MA, Jurisdiction::MI, Jurisdiction::MN,
        Jurisdiction::MS, Jurisdiction::MO, Jurisdiction::MT, Jurisdiction::NE,
        Jurisdiction::NV, Jurisdiction::NH, Jurisdiction::NJ, Jurisdiction::NM,
        Jurisdiction::NY, Jurisdiction::NC, Jurisdiction::ND, Jurisdiction::OH,
        Jurisdiction::OK, Jurisdiction::OR, Jurisdiction::PA, Jurisdiction::RI,
        Jurisdiction::SC, Jurisdiction::SD, Jurisdiction::TN, Jurisdiction::TX,
        Jurisdiction::UT, Jurisdiction::VT, Jurisdiction::VA, Jurisdiction::WA,
        Jurisdiction::WV, Jurisdiction::WI, Jurisdiction::WY,
    ];

    /// Marital property regime.
    pub fn regime(self) -> Regime {
        use Jurisdiction::*;
        match self {
            AZ | CA | ID | LA | NV | NM | TX | WA | WI => Regime::Community,
            _ => Regime::Equitable,
        }
    }

    /// Whether quasi-community property is recognized.
    ///
    /// Louisiana is a community-property state but is excluded: its civil-law
    /// separate-property rules do not fit the QCP model.
    pub fn supports_qcp(self) -> bool {
        matches!(
            self,
            Jurisdiction::AZ | Jurisdiction::CA | Jurisdiction::ID | Jurisdiction::WA
        )
    }

    /// Statutory equitable-distribution factors, informational only.
    pub fn statutory_factors(self) -> &'static [&'static str] {
        match self {
            Jurisdiction::PA => PENNSYLVANIA_FACTORS,
            _ => &[],
        }
    }

    /// Two-letter postal code.
    #[rustfmt::skip]
    pub fn code(self) -> &'static str {
        use Jurisdiction::*;
        match self {
            AL => "AL", AK => "AK", AZ => "AZ", AR => "AR", CA => "CA", CO => "CO",
            CT => "CT", DE => "DE", DC => "DC", FL => "FL", GA => "GA", HI => "HI",
            ID => "ID", IL => "IL", IN => "IN", IA => "IA", KS => "KS", KY => "KY",
            LA => "LA", ME => "ME", MD => "MD", MA => "MA", MI => "MI", MN => "MN",
            MS => "MS", MO => "MO", MT => "MT", NE => "NE", NV => "NV", NH => "NH",
            NJ => "NJ", NM => "NM", NY => "NY", NC => "NC", ND => "ND", OH => "OH",
            OK => "OK", OR => "OR", PA => "PA", RI => "RI", SC => "SC", SD => "SD",
            TN => "TN", TX => "TX", UT => "UT", VT => "VT", VA => "VA", WA => "WA",
            WV => "WV", WI => "WI", WY => "WY",
        }
    }

    /// Full name.
    pub fn name(self) -> &'static str {
        use Jurisdiction::*;
        match self {
            AL => "Alabama",
            AK => "Alaska",
            AZ => "Arizona",
            AR => "Arkansas",
            CA => "California",
            CO => "Colorado",
            CT => "Connecticut",
            DE => "Delaware",
            DC => "District of Columbia",
            FL => "Florida",
            GA => "Georgia",
            HI => "Hawaii",
            ID => "Idaho",
            IL => "Illinois",
            IN => "Indiana",
            IA => "Iowa",
            KS => "Kansas",
            KY => "Kentucky",
            LA => "Louisiana",
            ME => "Maine",
            MD => "Maryland",
            MA => "Massachusetts",
            MI => "Michigan",
            MN => "Minnesota",
            MS => "Mississippi",
            MO => "Missouri",
            MT => "Montana",
            NE => "Nebraska",
            NV => "Nevada",
            NH => "New Hampshire",
            NJ => "New Jersey",
            NM => "New Mexico",
            NY => "New York",
            NC => "North Carolina",
            ND => "North Dakota",
            OH => "Ohio",
            OK => "Oklahoma",
            OR => "Oregon",
            PA => "Pennsylvania",
            RI => "Rhode Island",
            SC => "South Carolina",
            SD => "South Dakota",
            TN => "Tennessee",
            TX => "Texas",
            UT => "Utah",
            VT => "Vermont",
            VA => "Virginia",
            WA => "Washington",
            WV => "West Virginia",
            WI => "Wisconsin",
            WY => "Wyoming",
        }
    }
}

/// Regime lookup, free-function form.
pub fn regime_of(jurisdiction: Jurisdiction) -> Regime {
    jurisdiction.regime()
}

/// QCP lookup, free-function form.
pub fn supports_qcp(jurisdiction: Jurisdiction) -> bool {
    jurisdiction.supports_qcp()
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Jurisdiction {
    type Err = EngineError;

    /// Accepts a postal code or a full name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Jurisdiction::ALL
            .iter()
            .copied()
            .find(|j| j.code().eq_ignore_ascii_case(needle) || j.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| EngineError::UnknownJurisdiction(s.to_string()))
    }
}

/// Summary of a registry entry, for UI and CLI consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JurisdictionInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub regime: Regime,
    #[serde(rename = "supportsQCP")]
    pub supports_qcp: bool,
    pub statutory_factors: &'static [&'static str],
}

impl From<Jurisdiction> for JurisdictionInfo {
    fn from(j: Jurisdiction) -> Self {
        Self {
            code: j.code(),
            name: j.name(),
            regime: j.regime(),
            supports_qcp: j.supports_qcp(),
            statutory_factors: j.statutory_factors(),
        }
    }
}
