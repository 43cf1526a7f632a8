//! Annual cost and hour aggregation for a single training program.
//!
//! Both programs run through this one worksheet with their own line items;
//! there is no current-vs-proposed branching anywhere in the arithmetic.
//!
//! # Worksheet structure
//!
//! | Line | Description |
//! |------|-------------|
//! | 1    | Core seat price and seat hours (sum over core courses) |
//! | 2    | Core annualized: line 1 × chain-wide turnover cohort |
//! | 3    | Per-certification annualized: seat price/hours × that state's cohort |
//! | 4    | Courses total = line 2 cost + Σ line 3 costs; hours likewise |
//! | 5    | Tools total (sum of ancillary annual costs) |
//! | 6    | Platform annual = per-store monthly fee × stores × 12 |
//! | 7    | Grand total = line 6 + line 4 + line 5 |
//! | 8    | Weighted certification hours per trained employee |
//! | 9    | Hours per employee = core seat hours + line 8 |
//!
//! Line 8 is the subtle one: core hours apply to the whole trained cohort
//! while each certification applies only to one state's slice of it, so the
//! per-employee figure weights each state's certification hours by that
//! state's cohort share. It is **not** `total_hours / cohort`.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use traincost_core::Document;
//! use traincost_core::calculations::populations::calculate_populations;
//! use traincost_core::calculations::program::ProgramWorksheet;
//!
//! let inputs = Document::default().to_inputs();
//! let pops = calculate_populations(&inputs.org);
//!
//! let current = ProgramWorksheet::new(&inputs.org, &pops, &inputs.current).calculate();
//! assert_eq!(current.core_per_seat_hours, dec!(6.25));
//! assert_eq!(current.grand_total, dec!(161566));
//! ```

use rust_decimal::Decimal;

use crate::calculations::common::ratio_or_zero;
use crate::models::{OrgInputs, Populations, ProgramConfig, ProgramCostBreakdown, UsState};

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Reduces one program's configuration to its annual cost and hour totals.
#[derive(Debug, Clone)]
pub struct ProgramWorksheet<'a> {
    org: &'a OrgInputs,
    populations: &'a Populations,
    config: &'a ProgramConfig,
}

impl<'a> ProgramWorksheet<'a> {
    pub fn new(
        org: &'a OrgInputs,
        populations: &'a Populations,
        config: &'a ProgramConfig,
    ) -> Self {
        Self {
            org,
            populations,
            config,
        }
    }

    /// Computes the full breakdown for this program.
    pub fn calculate(&self) -> ProgramCostBreakdown {
        let core_per_seat_cost = self.core_per_seat_cost();
        let core_per_seat_hours = self.core_per_seat_hours();
        let cohort = self.populations.frontline_turnover_total;

        let courses_total = core_per_seat_cost * cohort + self.cert_annual_cost();
        let total_hours = core_per_seat_hours * cohort + self.cert_annual_hours();
        let tools_total = self.tools_total();
        let platform_annual = self.platform_annual();
        let weighted_cert_hours = self.weighted_cert_hours();

        ProgramCostBreakdown {
            platform_annual,
            courses_total,
            tools_total,
            grand_total: platform_annual + courses_total + tools_total,
            core_per_seat_cost,
            core_per_seat_hours,
            total_hours,
            weighted_cert_hours,
            hours_per_employee: core_per_seat_hours + weighted_cert_hours,
            annual_labor_cost: total_hours * self.org.avg_hourly_rate,
        }
    }

    /// Seat price of the core curriculum.
    fn core_per_seat_cost(&self) -> Decimal {
        self.config.courses.iter().map(|c| c.cost_per_seat).sum()
    }

    /// Seat time of the core curriculum, hours.
    fn core_per_seat_hours(&self) -> Decimal {
        self.config.courses.iter().map(|c| c.hours_per_seat).sum()
    }

    /// Annual certification spend: each item priced against its own
    /// state's cohort.
    fn cert_annual_cost(&self) -> Decimal {
        self.config
            .certs
            .iter()
            .map(|c| c.cost_per_seat * self.populations.state_turnover(c.state))
            .sum()
    }

    /// Annual certification hours, by the same per-state cohorts.
    fn cert_annual_hours(&self) -> Decimal {
        self.config
            .certs
            .iter()
            .map(|c| c.hours_per_seat * self.populations.state_turnover(c.state))
            .sum()
    }

    fn tools_total(&self) -> Decimal {
        self.config.tools.iter().map(|t| t.annual_cost).sum()
    }

    fn platform_annual(&self) -> Decimal {
        self.config.platform_cost_per_store_month * self.org.stores.total() * MONTHS_PER_YEAR
    }

    /// Certification seat hours owed by an employee hired in `state`
    /// (a state may require several certifications; their hours add).
    fn cert_hours_per_employee(
        &self,
        state: UsState,
    ) -> Decimal {
        self.config
            .certs
            .iter()
            .filter(|c| c.state == state)
            .map(|c| c.hours_per_seat)
            .sum()
    }

    /// Certification hours averaged over the whole trained cohort.
    ///
    /// Each state's per-employee certification hours are weighted by that
    /// state's cohort; states without certifications contribute nothing and
    /// are represented by the uncounted remainder of the denominator. Zero
    /// when nobody is trained.
    fn weighted_cert_hours(&self) -> Decimal {
        let numerator: Decimal = UsState::ALL
            .iter()
            .map(|s| self.populations.state_turnover(*s) * self.cert_hours_per_employee(*s))
            .sum();
        ratio_or_zero(numerator, self.populations.frontline_turnover_total)
    }
}
