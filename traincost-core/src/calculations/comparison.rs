//! Head-to-head savings figures for the two programs.
//!
//! Savings are always current-minus-proposed: direct spend, training hours,
//! the wage value of those hours, and the derived ratios. Every ratio has a
//! zero-valued fallback; a free proposed program, an empty chain, or zero
//! turnover produces zeros, never a division by zero.

use rust_decimal::Decimal;

use crate::calculations::common::{ratio_or_zero, round_whole};
use crate::models::{ProgramCostBreakdown, SavingsSummary};

/// Compares the two program breakdowns.
///
/// `avg_hourly_rate` prices the recovered hours; `frontline_turnover_total`
/// spreads the labor savings over the trained cohort.
pub fn compare(
    current: &ProgramCostBreakdown,
    proposed: &ProgramCostBreakdown,
    avg_hourly_rate: Decimal,
    frontline_turnover_total: Decimal,
) -> SavingsSummary {
    let direct_savings = current.grand_total - proposed.grand_total;
    let hours_saved = current.total_hours - proposed.total_hours;
    let labor_savings = hours_saved * avg_hourly_rate;
    let total_savings_value = direct_savings + labor_savings;

    let hours_saved_per_employee = current.hours_per_employee - proposed.hours_per_employee;

    SavingsSummary {
        direct_savings,
        hours_saved,
        labor_savings,
        total_savings_value,
        roi_multiple: ratio_or_zero(total_savings_value, proposed.grand_total),
        time_reduction_pct: round_whole(
            ratio_or_zero(hours_saved_per_employee, current.hours_per_employee)
                * Decimal::ONE_HUNDRED,
        ),
        hours_saved_per_employee,
        savings_per_employee: ratio_or_zero(labor_savings, frontline_turnover_total),
    }
}
