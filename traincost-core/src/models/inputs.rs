use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::UsState;

/// Which of the two compared programs a line item or edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Program {
    /// The incumbent provider.
    Current,
    /// The provider under evaluation.
    Proposed,
}

impl Program {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Proposed => "proposed",
        }
    }
}

/// Store counts per operating state.
///
/// The chain-wide store total is always derived from these five counts;
/// there is deliberately no stored total to drift out of sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreCounts {
    pub nc: Decimal,
    pub sc: Decimal,
    pub tx: Decimal,
    pub ms: Decimal,
    pub ar: Decimal,
}

impl StoreCounts {
    pub fn count(&self, state: UsState) -> Decimal {
        match state {
            UsState::NorthCarolina => self.nc,
            UsState::SouthCarolina => self.sc,
            UsState::Texas => self.tx,
            UsState::Mississippi => self.ms,
            UsState::Arkansas => self.ar,
        }
    }

    /// Chain-wide store total: the sum of the five per-state counts.
    pub fn total(&self) -> Decimal {
        UsState::ALL.iter().map(|s| self.count(*s)).sum()
    }
}

/// Organization-level editable scalars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgInputs {
    pub total_employees: Decimal,
    /// Average frontline wage, currency per hour.
    pub avg_hourly_rate: Decimal,
    /// Annual frontline turnover as a percentage (120 = 120%).
    pub frontline_turnover_pct: Decimal,
    pub stores: StoreCounts,
}

/// One course in a program's core curriculum. Every new hire takes the
/// full core sequence regardless of state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseItem {
    pub name: String,
    #[serde(default, with = "crate::coerce::lenient")]
    pub cost_per_seat: Decimal,
    #[serde(default, with = "crate::coerce::lenient")]
    pub hours_per_seat: Decimal,
}

/// An ancillary tool the current program pays for annually. The proposed
/// program carries none; its equivalents are bundled into the platform fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolItem {
    pub name: String,
    #[serde(default, with = "crate::coerce::lenient")]
    pub annual_cost: Decimal,
}

/// A state-mandated certification course. Applies only to the cohort hired
/// into the named state; states without an entry contribute nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertCourse {
    pub state: UsState,
    pub name: String,
    #[serde(default, with = "crate::coerce::lenient")]
    pub cost_per_seat: Decimal,
    #[serde(default, with = "crate::coerce::lenient")]
    pub hours_per_seat: Decimal,
}

/// Everything one program charges: platform fee, core curriculum, state
/// certifications, and ancillary tools. The cost aggregator is parametrized
/// over this struct so both programs run through identical logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramConfig {
    /// Platform subscription, currency per store per month.
    pub platform_cost_per_store_month: Decimal,
    pub courses: Vec<CourseItem>,
    pub certs: Vec<CertCourse>,
    pub tools: Vec<ToolItem>,
}

/// The full immutable snapshot the calculation engine consumes. Built from
/// the persisted document (or defaults) plus any in-memory edits; the engine
/// never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorInputs {
    pub org: OrgInputs,
    pub current: ProgramConfig,
    pub proposed: ProgramConfig,
}
