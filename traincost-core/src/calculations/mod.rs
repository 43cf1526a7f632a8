//! The calculation engine: a pure, stateless transform from an input
//! snapshot to the full derived report.
//!
//! Nothing here performs I/O, caches, or mutates its inputs; callers
//! recompute on every edit and rely on the result being identical for
//! identical snapshots.

pub mod common;
pub mod comparison;
pub mod populations;
pub mod program;

pub use comparison::compare;
pub use populations::calculate_populations;
pub use program::ProgramWorksheet;

use crate::models::{CalculatorInputs, DerivedReport};

/// Computes the full report for one input snapshot.
pub fn compute_report(inputs: &CalculatorInputs) -> DerivedReport {
    let populations = calculate_populations(&inputs.org);

    let current = ProgramWorksheet::new(&inputs.org, &populations, &inputs.current).calculate();
    let proposed = ProgramWorksheet::new(&inputs.org, &populations, &inputs.proposed).calculate();

    let savings = compare(
        &current,
        &proposed,
        inputs.org.avg_hourly_rate,
        populations.frontline_turnover_total,
    );

    DerivedReport {
        populations,
        current,
        proposed,
        savings,
    }
}
