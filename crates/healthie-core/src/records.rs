use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A patient as surfaced by the search UI. Only `patient_id` is guaranteed;
/// whatever else the page exposes (name, date of birth, ...) lands in
/// `extra` keyed by field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PatientRecord {
    pub fn new(patient_id: impl Into<String>) -> Self {
        Self {
            patient_id: patient_id.into(),
            extra: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), Value::String(value.into()));
        self
    }
}

/// A booked appointment. `date` and `time` are kept as the strings the UI
/// accepted; Healthie does not document a canonical format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub appointment_id: String,
    pub patient_id: String,
    pub date: String,
    pub time: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Outcome of an appointment booking attempt. A rejection (slot taken,
/// invalid time, ...) is an expected business result, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BookingOutcome {
    Created(AppointmentRecord),
    Rejected { reason: String },
}

impl BookingOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, BookingOutcome::Created(_))
    }
}
