use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimingType {
    Requested,
    Resolved,
    Rendered,
}

/// One observed lifecycle event of a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryTiming {
    pub name: String,
    pub timing_type: TimingType,
    pub timestamp: f64,
    /// Only meaningful on `Resolved`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// Display label per phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseLabels {
    pub requested: String,
    pub resolved: String,
    pub rendered: String,
}

impl Default for PhaseLabels {
    fn default() -> Self {
        Self {
            requested: "Requested".to_string(),
            resolved: "Resolved".to_string(),
            rendered: "Rendered".to_string(),
        }
    }
}

impl PhaseLabels {
    pub fn label(&self, timing_type: TimingType) -> &str {
        match timing_type {
            TimingType::Requested => &self.requested,
            TimingType::Resolved => &self.resolved,
            TimingType::Rendered => &self.rendered,
        }
    }
}
