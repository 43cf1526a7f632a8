//! Plain-text rendering of the derived report.
//!
//! Mirrors the sections the calculator has always presented: company data,
//! the two program cost cards, the labor comparison, and the savings
//! summary. All money goes through the threshold-based currency formatter.

use std::fmt::Write;

use traincost_core::{
    DerivedReport, Document, ProgramCostBreakdown, UsState, format_currency, format_hours,
};

/// Renders the full report for terminal display.
pub fn render_report(
    document: &Document,
    report: &DerivedReport,
) -> String {
    let mut out = String::new();
    let inputs = document.to_inputs();
    let org = &inputs.org;

    line(&mut out, "Training Cost Calculator: Current vs Proposed");
    line(&mut out, "=============================================");
    if let Some(ts) = document.timestamp {
        line(&mut out, &format!("Last saved: {}", ts.to_rfc3339()));
    }
    line(&mut out, "");

    line(&mut out, "Company & Employee Data");
    let stores: Vec<String> = UsState::ALL
        .iter()
        .map(|s| format!("{} {}", s.as_str(), org.stores.count(*s)))
        .collect();
    row(
        &mut out,
        "Total stores",
        &format!("{} ({})", org.stores.total(), stores.join(", ")),
    );
    row(
        &mut out,
        "Total employees",
        &report.populations.total_employees.to_string(),
    );
    row(
        &mut out,
        "Average hourly rate",
        &format_currency(org.avg_hourly_rate),
    );
    row(
        &mut out,
        "Frontline turnover",
        &format!("{}%", org.frontline_turnover_pct),
    );
    row(
        &mut out,
        "Employees trained annually",
        &report.populations.frontline_turnover_total.to_string(),
    );
    for state in UsState::ALL {
        row(
            &mut out,
            &format!("  {} turnover cohort", state.as_str()),
            &report.populations.state_turnover(state).to_string(),
        );
    }
    line(&mut out, "");

    program_card(&mut out, "Current Program (annual)", &report.current);
    program_card(&mut out, "Proposed Program (annual)", &report.proposed);

    line(&mut out, "Labor Comparison");
    row(
        &mut out,
        "Hours saved per employee",
        &format_hours(report.savings.hours_saved_per_employee, 2),
    );
    row(
        &mut out,
        "Total hours saved",
        &format_hours(report.savings.hours_saved, 0),
    );
    row(
        &mut out,
        "Time reduction",
        &format!("{}%", report.savings.time_reduction_pct),
    );
    row(
        &mut out,
        "Labor savings",
        &format_currency(report.savings.labor_savings),
    );
    row(
        &mut out,
        "Savings per employee trained",
        &format_currency(report.savings.savings_per_employee),
    );
    line(&mut out, "");

    line(&mut out, "Total Annual Savings");
    row(
        &mut out,
        "Direct cost savings",
        &format_currency(report.savings.direct_savings),
    );
    row(
        &mut out,
        "Labor recapture",
        &format_currency(report.savings.labor_savings),
    );
    row(
        &mut out,
        "Total value",
        &format_currency(report.savings.total_savings_value),
    );
    row(
        &mut out,
        "ROI multiple",
        &format!("{}x", format_hours(report.savings.roi_multiple, 1)),
    );

    out
}

fn program_card(
    out: &mut String,
    title: &str,
    program: &ProgramCostBreakdown,
) {
    line(out, title);
    row(out, "Platform", &format_currency(program.platform_annual));
    row(out, "Training courses", &format_currency(program.courses_total));
    row(out, "Additional tools", &format_currency(program.tools_total));
    row(out, "Annual total", &format_currency(program.grand_total));
    row(out, "Training hours", &format_hours(program.total_hours, 0));
    row(
        out,
        "Core hours per employee",
        &format_hours(program.core_per_seat_hours, 2),
    );
    row(
        out,
        "Avg cert hours per employee",
        &format_hours(program.weighted_cert_hours, 2),
    );
    row(
        out,
        "Hours per employee",
        &format_hours(program.hours_per_employee, 2),
    );
    row(
        out,
        "Annual labor cost",
        &format_currency(program.annual_labor_cost),
    );
    line(out, "");
}

fn line(
    out: &mut String,
    text: &str,
) {
    let _ = writeln!(out, "{text}");
}

fn row(
    out: &mut String,
    label: &str,
    value: &str,
) {
    let _ = writeln!(out, "  {label:<28} {value}");
}

#[cfg(test)]
mod tests {
    use traincost_core::{Document, compute_report};

    use super::*;

    fn default_render() -> String {
        let doc = Document::default();
        let report = compute_report(&doc.to_inputs());
        render_report(&doc, &report)
    }

    #[test]
    fn render_carries_the_headline_totals() {
        let text = default_render();

        assert!(text.contains("$161,566"), "current grand total:\n{text}");
        assert!(text.contains("$98,210"), "proposed grand total:\n{text}");
        assert!(text.contains("$427,735"), "total savings:\n{text}");
    }

    #[test]
    fn render_carries_the_labor_figures() {
        let text = default_render();

        assert!(text.contains("75%"), "time reduction:\n{text}");
        assert!(text.contains("3930"), "trained cohort:\n{text}");
        assert!(text.contains("$92.72"), "savings per employee:\n{text}");
    }

    #[test]
    fn render_omits_last_saved_for_a_fresh_document() {
        let text = default_render();
        assert!(!text.contains("Last saved"));
    }

    #[test]
    fn render_shows_last_saved_when_stamped() {
        let mut doc = Document::default();
        doc.timestamp = Some("2026-08-06T12:00:00Z".parse().unwrap());
        let report = compute_report(&doc.to_inputs());

        let text = render_report(&doc, &report);
        assert!(text.contains("Last saved"));
    }
}
