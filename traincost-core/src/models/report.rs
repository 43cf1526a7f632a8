use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::UsState;

/// Annual training cohort sizes derived from store and employee counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Populations {
    pub total_employees: Decimal,
    /// Employees trained annually chain-wide: the core-curriculum cohort.
    pub frontline_turnover_total: Decimal,
    /// Employees trained annually per state: the certification cohorts.
    pub per_state_turnover: BTreeMap<UsState, Decimal>,
}

impl Populations {
    pub fn state_turnover(&self, state: UsState) -> Decimal {
        self.per_state_turnover
            .get(&state)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

/// Annual cost and hour totals for one program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramCostBreakdown {
    /// Platform subscription for the year across all stores.
    pub platform_annual: Decimal,
    /// Core curriculum plus state certifications, annualized.
    pub courses_total: Decimal,
    /// Ancillary tool subscriptions for the year.
    pub tools_total: Decimal,
    pub grand_total: Decimal,

    /// Seat price of the core curriculum (sum over core courses).
    pub core_per_seat_cost: Decimal,
    /// Seat time of the core curriculum, hours.
    pub core_per_seat_hours: Decimal,

    /// All training hours the program consumes in a year.
    pub total_hours: Decimal,
    /// Certification hours averaged over the whole trained cohort,
    /// weighted by each state's share of it.
    pub weighted_cert_hours: Decimal,
    /// Core hours plus weighted certification hours.
    pub hours_per_employee: Decimal,
    /// Wage cost of the program's training hours.
    pub annual_labor_cost: Decimal,
}

/// Head-to-head savings figures, current program minus proposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsSummary {
    pub direct_savings: Decimal,
    pub hours_saved: Decimal,
    pub labor_savings: Decimal,
    pub total_savings_value: Decimal,
    /// Total savings per dollar of proposed-program spend; zero when the
    /// proposed program costs nothing.
    pub roi_multiple: Decimal,
    /// Whole-number percent reduction in per-employee training time.
    pub time_reduction_pct: Decimal,
    pub hours_saved_per_employee: Decimal,
    pub savings_per_employee: Decimal,
}

/// The full derived report. Recomputed from scratch on every input change;
/// carries no state of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedReport {
    pub populations: Populations,
    pub current: ProgramCostBreakdown,
    pub proposed: ProgramCostBreakdown,
    pub savings: SavingsSummary,
}
