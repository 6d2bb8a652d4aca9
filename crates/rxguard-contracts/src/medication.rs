//! Medication line items.

use serde::{Deserialize, Serialize};

/// One medication on a prescription.
///
/// All fields are free text as entered by the prescriber. No unit or dosage
/// validation is performed anywhere in the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
}

impl Medication {
    pub fn new(
        name: impl Into<String>,
        dosage: impl Into<String>,
        frequency: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            dosage: dosage.into(),
            frequency: frequency.into(),
            duration: duration.into(),
        }
    }

    /// Lowercased name used for case-insensitive matching.
    pub fn normalized_name(&self) -> String {
        self.name.trim().to_lowercase()
    }
}
