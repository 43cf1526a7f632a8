mod inputs;
mod report;
mod state;

pub use inputs::{
    CalculatorInputs, CertCourse, CourseItem, OrgInputs, Program, ProgramConfig, StoreCounts,
    ToolItem,
};
pub use report::{DerivedReport, Populations, ProgramCostBreakdown, SavingsSummary};
pub use state::UsState;
