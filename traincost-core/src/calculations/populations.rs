//! Cohort sizing: converts store and employee counts into the populations
//! each cost line applies to.
//!
//! Two cohorts matter:
//!
//! * the chain-wide annual turnover cohort, which takes the core
//!   curriculum, and
//! * a per-state annual turnover cohort, which additionally takes that
//!   state's certifications.
//!
//! Both are produced by a single half-up rounding of the fully-multiplied
//! value. Rounding intermediate factors first (per-store averages, per-state
//! headcounts) compounds error across states, so the whole product, including
//! the division by the store total for the per-state cohorts, is carried in
//! exact decimal arithmetic and rounded once.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use traincost_core::calculations::populations::calculate_populations;
//! use traincost_core::{OrgInputs, StoreCounts, UsState};
//!
//! let org = OrgInputs {
//!     total_employees: dec!(3275),
//!     avg_hourly_rate: dec!(17.00),
//!     frontline_turnover_pct: dec!(120),
//!     stores: StoreCounts {
//!         nc: dec!(75),
//!         sc: dec!(60),
//!         tx: dec!(50),
//!         ms: dec!(45),
//!         ar: dec!(10),
//!     },
//! };
//!
//! let pops = calculate_populations(&org);
//! assert_eq!(pops.frontline_turnover_total, dec!(3930));
//! assert_eq!(pops.state_turnover(UsState::Texas), dec!(819));
//! ```

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::calculations::common::{ratio_or_zero, round_whole};
use crate::models::{OrgInputs, Populations, UsState};

/// Average headcount per store, zero when the chain has no stores.
pub fn avg_employees_per_store(org: &OrgInputs) -> Decimal {
    ratio_or_zero(org.total_employees, org.stores.total())
}

/// Annual turnover as a fraction (120% -> 1.2).
pub fn turnover_rate(org: &OrgInputs) -> Decimal {
    org.frontline_turnover_pct / Decimal::ONE_HUNDRED
}

/// Derives all cohort sizes from the organization inputs.
pub fn calculate_populations(org: &OrgInputs) -> Populations {
    let rate = turnover_rate(org);
    let total_stores = org.stores.total();

    let mut per_state_turnover = BTreeMap::new();
    for state in UsState::ALL {
        // One rounding of the exact product; dividing by the store total
        // last keeps the repeating-decimal per-store average out of it.
        let exact = ratio_or_zero(
            org.total_employees * org.stores.count(state) * rate,
            total_stores,
        );
        per_state_turnover.insert(state, round_whole(exact));
    }

    Populations {
        total_employees: org.total_employees,
        frontline_turnover_total: round_whole(org.total_employees * rate),
        per_state_turnover,
    }
}
