use serde::{Deserialize, Serialize};

/// The states the chain operates in. A closed set: store counts and
/// certification schedules are only ever keyed by these five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UsState {
    NorthCarolina,
    SouthCarolina,
    Texas,
    Mississippi,
    Arkansas,
}

impl UsState {
    /// All operating states, in display order.
    pub const ALL: [UsState; 5] = [
        Self::NorthCarolina,
        Self::SouthCarolina,
        Self::Texas,
        Self::Mississippi,
        Self::Arkansas,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NorthCarolina => "NC",
            Self::SouthCarolina => "SC",
            Self::Texas => "TX",
            Self::Mississippi => "MS",
            Self::Arkansas => "AR",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "NC" => Some(Self::NorthCarolina),
            "SC" => Some(Self::SouthCarolina),
            "TX" => Some(Self::Texas),
            "MS" => Some(Self::Mississippi),
            "AR" => Some(Self::Arkansas),
            _ => None,
        }
    }
}
