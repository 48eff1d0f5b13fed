//! Main treatment tariff positions

/// A main treatment tariff position with its sampling weight
#[derive(Debug, Clone, PartialEq)]
pub struct TreatmentTariff {
    /// Tariff position code (e.g. "7301")
    pub code: String,
    /// Display label
    pub name: String,
    /// Tariff points per session
    pub points: u32,
    /// Share of practices offering this treatment as their main one, in (0, 1]
    pub probability: f64,
}

impl TreatmentTariff {
    pub fn new(code: &str, name: &str, points: u32, probability: f64) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            points,
            probability,
        }
    }
}

/// Build the 7 treatment tariffs in canonical order
///
/// The order is part of the sampling contract: weighted draws index into
/// this list, so reordering it changes every seeded result.
pub fn default_tariffs() -> Vec<TreatmentTariff> {
    // Format: (code, name, points, probability)
    let rows: &[(&str, &str, u32, f64)] = &[
        ("7301", "Allgemeine Physiotherapie", 48, 0.45),
        ("7311", "Aufwändige Physiotherapie", 77, 0.15),
        ("7312", "Manuelle Lymphdrainage", 77, 0.08),
        ("7313", "Medizinische Trainingstherapie", 25, 0.12),
        ("7320", "Hippotherapie", 48, 0.02),
        ("7330", "Gruppentherapie", 25, 0.08),
        ("7340", "Elektro- und Thermotherapie", 10, 0.10),
    ];

    rows.iter()
        .map(|&(code, name, points, probability)| TreatmentTariff::new(code, name, points, probability))
        .collect()
}
