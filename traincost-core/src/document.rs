//! The persisted calculator snapshot.
//!
//! A [`Document`] is the JSON object the store keeps under a single fixed
//! record key: the flattened organization scalars, the per-program platform
//! and certification figures, an embedded `state` object holding the three
//! editable sequences, and the last save timestamp. Loading is forgiving:
//! missing keys fall back to the documented defaults, malformed numerics
//! coerce to zero, and unknown keys are ignored, so an old or hand-edited
//! document can never be rejected.
//!
//! The document is the editable form of the data; [`Document::to_inputs`]
//! produces the immutable snapshot the calculation engine consumes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coerce;
use crate::models::{
    CalculatorInputs, CertCourse, CourseItem, OrgInputs, Program, ProgramConfig, StoreCounts,
    ToolItem, UsState,
};

/// Fixed record key the document is stored under. Last write wins.
pub const RECORD_KEY: &str = "traincost-calculator";

/// Error returned when an edit names a scalar field the document does not
/// have.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown document field '{0}'")]
pub struct UnknownField(pub String);

/// The three editable line-item sequences.
///
/// Items are identified by position, not by id: removing the item at
/// position `i` shifts every later item down by one. That is the contract
/// the editing surface relies on, and it is acceptable for a
/// single-operator tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SequencesState {
    pub current_core_courses: Vec<CourseItem>,
    pub proposed_core_courses: Vec<CourseItem>,
    pub current_tools: Vec<ToolItem>,
}

impl SequencesState {
    pub fn courses(
        &self,
        program: Program,
    ) -> &[CourseItem] {
        match program {
            Program::Current => &self.current_core_courses,
            Program::Proposed => &self.proposed_core_courses,
        }
    }

    fn courses_mut(
        &mut self,
        program: Program,
    ) -> &mut Vec<CourseItem> {
        match program {
            Program::Current => &mut self.current_core_courses,
            Program::Proposed => &mut self.proposed_core_courses,
        }
    }

    /// Appends a course to the end of a program's core sequence.
    pub fn add_course(
        &mut self,
        program: Program,
        item: CourseItem,
    ) {
        self.courses_mut(program).push(item);
    }

    /// Removes the course at `index`, shifting later positions down.
    /// Returns `None` (and changes nothing) when the position is empty.
    pub fn remove_course(
        &mut self,
        program: Program,
        index: usize,
    ) -> Option<CourseItem> {
        let courses = self.courses_mut(program);
        (index < courses.len()).then(|| courses.remove(index))
    }

    /// In-place access to the course at `index` for field edits.
    pub fn course_mut(
        &mut self,
        program: Program,
        index: usize,
    ) -> Option<&mut CourseItem> {
        self.courses_mut(program).get_mut(index)
    }

    /// Appends a tool to the current program's tool list.
    pub fn add_tool(
        &mut self,
        item: ToolItem,
    ) {
        self.current_tools.push(item);
    }

    /// Removes the tool at `index`, shifting later positions down.
    pub fn remove_tool(
        &mut self,
        index: usize,
    ) -> Option<ToolItem> {
        (index < self.current_tools.len()).then(|| self.current_tools.remove(index))
    }

    pub fn tool_mut(
        &mut self,
        index: usize,
    ) -> Option<&mut ToolItem> {
        self.current_tools.get_mut(index)
    }
}

impl Default for SequencesState {
    fn default() -> Self {
        let course = |name: &str, hours: Decimal| CourseItem {
            name: name.to_string(),
            cost_per_seat: Decimal::ZERO,
            hours_per_seat: hours,
        };
        let tool = |name: &str, cost: Decimal| ToolItem {
            name: name.to_string(),
            annual_cost: cost,
        };

        Self {
            current_core_courses: vec![
                course("Store Safety Basics", Decimal::new(125, 2)),
                course("POS/Register Operations", Decimal::new(125, 2)),
                course("Customer Service Standards", Decimal::new(125, 2)),
                course("Age-Restricted Sales Policy", Decimal::new(125, 2)),
                course("Fuel Pump & Dispenser Safety", Decimal::new(125, 2)),
            ],
            proposed_core_courses: vec![
                course("Basic Store Safety (17 min)", Decimal::new(28, 2)),
                course("Register Basics (14 min)", Decimal::new(23, 2)),
                course("Workplace Standards (17 min)", Decimal::new(28, 2)),
                course("Restricted Sales Overview (21 min)", Decimal::new(35, 2)),
                course("Class C Fuel Safety (15 min)", Decimal::new(25, 2)),
            ],
            current_tools: vec![
                tool("Course Authoring", Decimal::new(5000, 0)),
                tool("Knowledge Base/Wiki", Decimal::new(3000, 0)),
                tool("Video Hosting", Decimal::new(2000, 0)),
            ],
        }
    }
}

/// The full persisted snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    #[serde(with = "coerce::lenient")]
    pub total_employees: Decimal,
    #[serde(with = "coerce::lenient")]
    pub avg_hourly_rate: Decimal,
    /// Annual frontline turnover, percent (120 = 120%).
    #[serde(with = "coerce::lenient")]
    pub frontline_turnover: Decimal,

    #[serde(rename = "storesNC", with = "coerce::lenient")]
    pub stores_nc: Decimal,
    #[serde(rename = "storesSC", with = "coerce::lenient")]
    pub stores_sc: Decimal,
    #[serde(rename = "storesTX", with = "coerce::lenient")]
    pub stores_tx: Decimal,
    #[serde(rename = "storesMS", with = "coerce::lenient")]
    pub stores_ms: Decimal,
    #[serde(rename = "storesAR", with = "coerce::lenient")]
    pub stores_ar: Decimal,

    #[serde(with = "coerce::lenient")]
    pub current_platform_cost: Decimal,
    #[serde(with = "coerce::lenient")]
    pub proposed_platform_cost: Decimal,

    #[serde(with = "coerce::lenient")]
    pub current_tx_tabc_cost: Decimal,
    #[serde(with = "coerce::lenient")]
    pub current_tx_tabc_hours: Decimal,
    #[serde(with = "coerce::lenient")]
    pub current_tx_food_handler_cost: Decimal,
    #[serde(with = "coerce::lenient")]
    pub current_tx_food_handler_hours: Decimal,
    #[serde(with = "coerce::lenient")]
    pub current_sc_food_handler_cost: Decimal,
    #[serde(with = "coerce::lenient")]
    pub current_sc_food_handler_hours: Decimal,

    #[serde(with = "coerce::lenient")]
    pub proposed_tx_tabc_cost: Decimal,
    #[serde(with = "coerce::lenient")]
    pub proposed_tx_tabc_hours: Decimal,
    #[serde(with = "coerce::lenient")]
    pub proposed_tx_food_handler_cost: Decimal,
    #[serde(with = "coerce::lenient")]
    pub proposed_tx_food_handler_hours: Decimal,
    #[serde(with = "coerce::lenient")]
    pub proposed_sc_food_handler_cost: Decimal,
    #[serde(with = "coerce::lenient")]
    pub proposed_sc_food_handler_hours: Decimal,

    pub state: SequencesState,

    /// Stamped by the store on every successful save.
    #[serde(with = "coerce::lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            total_employees: Decimal::new(3275, 0),
            avg_hourly_rate: Decimal::new(1700, 2),
            frontline_turnover: Decimal::new(120, 0),
            stores_nc: Decimal::new(75, 0),
            stores_sc: Decimal::new(60, 0),
            stores_tx: Decimal::new(50, 0),
            stores_ms: Decimal::new(45, 0),
            stores_ar: Decimal::new(10, 0),
            current_platform_cost: Decimal::new(4000, 2),
            proposed_platform_cost: Decimal::new(2500, 2),
            current_tx_tabc_cost: Decimal::new(15, 0),
            current_tx_tabc_hours: Decimal::new(15, 1),
            current_tx_food_handler_cost: Decimal::new(15, 0),
            current_tx_food_handler_hours: Decimal::new(225, 2),
            current_sc_food_handler_cost: Decimal::new(12, 0),
            current_sc_food_handler_hours: Decimal::new(10, 1),
            proposed_tx_tabc_cost: Decimal::new(10, 0),
            proposed_tx_tabc_hours: Decimal::new(125, 2),
            proposed_tx_food_handler_cost: Decimal::new(10, 0),
            proposed_tx_food_handler_hours: Decimal::new(25, 2),
            proposed_sc_food_handler_cost: Decimal::new(10, 0),
            proposed_sc_food_handler_hours: Decimal::new(50, 2),
            state: SequencesState::default(),
            timestamp: None,
        }
    }
}

/// Scalar field names accepted by [`Document::set_scalar`], as they appear
/// on the wire.
pub const SCALAR_FIELDS: [&str; 22] = [
    "totalEmployees",
    "avgHourlyRate",
    "frontlineTurnover",
    "storesNC",
    "storesSC",
    "storesTX",
    "storesMS",
    "storesAR",
    "currentPlatformCost",
    "proposedPlatformCost",
    "currentTxTabcCost",
    "currentTxTabcHours",
    "currentTxFoodHandlerCost",
    "currentTxFoodHandlerHours",
    "currentScFoodHandlerCost",
    "currentScFoodHandlerHours",
    "proposedTxTabcCost",
    "proposedTxTabcHours",
    "proposedTxFoodHandlerCost",
    "proposedTxFoodHandlerHours",
    "proposedScFoodHandlerCost",
    "proposedScFoodHandlerHours",
];

impl Document {
    fn scalar_mut(
        &mut self,
        field: &str,
    ) -> Option<&mut Decimal> {
        let slot = match field {
            "totalEmployees" => &mut self.total_employees,
            "avgHourlyRate" => &mut self.avg_hourly_rate,
            "frontlineTurnover" => &mut self.frontline_turnover,
            "storesNC" => &mut self.stores_nc,
            "storesSC" => &mut self.stores_sc,
            "storesTX" => &mut self.stores_tx,
            "storesMS" => &mut self.stores_ms,
            "storesAR" => &mut self.stores_ar,
            "currentPlatformCost" => &mut self.current_platform_cost,
            "proposedPlatformCost" => &mut self.proposed_platform_cost,
            "currentTxTabcCost" => &mut self.current_tx_tabc_cost,
            "currentTxTabcHours" => &mut self.current_tx_tabc_hours,
            "currentTxFoodHandlerCost" => &mut self.current_tx_food_handler_cost,
            "currentTxFoodHandlerHours" => &mut self.current_tx_food_handler_hours,
            "currentScFoodHandlerCost" => &mut self.current_sc_food_handler_cost,
            "currentScFoodHandlerHours" => &mut self.current_sc_food_handler_hours,
            "proposedTxTabcCost" => &mut self.proposed_tx_tabc_cost,
            "proposedTxTabcHours" => &mut self.proposed_tx_tabc_hours,
            "proposedTxFoodHandlerCost" => &mut self.proposed_tx_food_handler_cost,
            "proposedTxFoodHandlerHours" => &mut self.proposed_tx_food_handler_hours,
            "proposedScFoodHandlerCost" => &mut self.proposed_sc_food_handler_cost,
            "proposedScFoodHandlerHours" => &mut self.proposed_sc_food_handler_hours,
            _ => return None,
        };
        Some(slot)
    }

    /// Reads a scalar by its wire name.
    pub fn scalar(
        &self,
        field: &str,
    ) -> Option<Decimal> {
        let value = match field {
            "totalEmployees" => self.total_employees,
            "avgHourlyRate" => self.avg_hourly_rate,
            "frontlineTurnover" => self.frontline_turnover,
            "storesNC" => self.stores_nc,
            "storesSC" => self.stores_sc,
            "storesTX" => self.stores_tx,
            "storesMS" => self.stores_ms,
            "storesAR" => self.stores_ar,
            "currentPlatformCost" => self.current_platform_cost,
            "proposedPlatformCost" => self.proposed_platform_cost,
            "currentTxTabcCost" => self.current_tx_tabc_cost,
            "currentTxTabcHours" => self.current_tx_tabc_hours,
            "currentTxFoodHandlerCost" => self.current_tx_food_handler_cost,
            "currentTxFoodHandlerHours" => self.current_tx_food_handler_hours,
            "currentScFoodHandlerCost" => self.current_sc_food_handler_cost,
            "currentScFoodHandlerHours" => self.current_sc_food_handler_hours,
            "proposedTxTabcCost" => self.proposed_tx_tabc_cost,
            "proposedTxTabcHours" => self.proposed_tx_tabc_hours,
            "proposedTxFoodHandlerCost" => self.proposed_tx_food_handler_cost,
            "proposedTxFoodHandlerHours" => self.proposed_tx_food_handler_hours,
            "proposedScFoodHandlerCost" => self.proposed_sc_food_handler_cost,
            "proposedScFoodHandlerHours" => self.proposed_sc_food_handler_hours,
            _ => return None,
        };
        Some(value)
    }

    /// Sets a scalar by its wire name, coercing unparseable input to zero.
    pub fn set_scalar(
        &mut self,
        field: &str,
        raw: &str,
    ) -> Result<(), UnknownField> {
        match self.scalar_mut(field) {
            Some(slot) => {
                *slot = coerce::parse_or_zero(raw);
                Ok(())
            }
            None => Err(UnknownField(field.to_string())),
        }
    }

    /// Builds the certification schedule one program charges for.
    fn certs(
        &self,
        program: Program,
    ) -> Vec<CertCourse> {
        let cert = |state, name: &str, cost, hours| CertCourse {
            state,
            name: name.to_string(),
            cost_per_seat: cost,
            hours_per_seat: hours,
        };
        match program {
            Program::Current => vec![
                cert(
                    UsState::Texas,
                    "TX TABC",
                    self.current_tx_tabc_cost,
                    self.current_tx_tabc_hours,
                ),
                cert(
                    UsState::Texas,
                    "TX Food Handler",
                    self.current_tx_food_handler_cost,
                    self.current_tx_food_handler_hours,
                ),
                cert(
                    UsState::SouthCarolina,
                    "SC Food Handler",
                    self.current_sc_food_handler_cost,
                    self.current_sc_food_handler_hours,
                ),
            ],
            Program::Proposed => vec![
                cert(
                    UsState::Texas,
                    "TX TABC",
                    self.proposed_tx_tabc_cost,
                    self.proposed_tx_tabc_hours,
                ),
                cert(
                    UsState::Texas,
                    "TX Food Handler",
                    self.proposed_tx_food_handler_cost,
                    self.proposed_tx_food_handler_hours,
                ),
                cert(
                    UsState::SouthCarolina,
                    "SC Food Handler",
                    self.proposed_sc_food_handler_cost,
                    self.proposed_sc_food_handler_hours,
                ),
            ],
        }
    }

    /// Produces the immutable engine snapshot for the current edit state.
    pub fn to_inputs(&self) -> CalculatorInputs {
        CalculatorInputs {
            org: OrgInputs {
                total_employees: self.total_employees,
                avg_hourly_rate: self.avg_hourly_rate,
                frontline_turnover_pct: self.frontline_turnover,
                stores: StoreCounts {
                    nc: self.stores_nc,
                    sc: self.stores_sc,
                    tx: self.stores_tx,
                    ms: self.stores_ms,
                    ar: self.stores_ar,
                },
            },
            current: ProgramConfig {
                platform_cost_per_store_month: self.current_platform_cost,
                courses: self.state.current_core_courses.clone(),
                certs: self.certs(Program::Current),
                tools: self.state.current_tools.clone(),
            },
            proposed: ProgramConfig {
                platform_cost_per_store_month: self.proposed_platform_cost,
                courses: self.state.proposed_core_courses.clone(),
                certs: self.certs(Program::Proposed),
                // Ancillary capabilities are bundled into the proposed
                // platform fee.
                tools: Vec::new(),
            },
        }
    }
}
