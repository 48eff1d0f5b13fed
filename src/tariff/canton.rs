//! Canton tariff point value multipliers

/// Canton-specific multiplier applied to tariff points
#[derive(Debug, Clone, PartialEq)]
pub struct CantonMultiplier {
    /// Two-letter canton code (e.g. "ZH")
    pub code: String,
    /// Multiplier relative to the national reference value (1.0)
    pub multiplier: f64,
}

impl CantonMultiplier {
    pub fn new(code: &str, multiplier: f64) -> Self {
        Self {
            code: code.to_string(),
            multiplier,
        }
    }
}

/// Build the 26 canton multipliers in canonical (alphabetical) order
pub fn default_cantons() -> Vec<CantonMultiplier> {
    // Format: (code, multiplier)
    let rows: &[(&str, f64)] = &[
        ("AG", 1.00),
        ("AI", 0.95),
        ("AR", 0.96),
        ("BE", 1.00),
        ("BL", 1.03),
        ("BS", 1.06),
        ("FR", 0.98),
        ("GE", 1.11),
        ("GL", 0.96),
        ("GR", 0.99),
        ("JU", 0.97),
        ("LU", 0.98),
        ("NE", 1.01),
        ("NW", 0.96),
        ("OW", 0.95),
        ("SG", 0.97),
        ("SH", 0.98),
        ("SO", 0.99),
        ("SZ", 0.97),
        ("TG", 0.96),
        ("TI", 0.99),
        ("UR", 0.94),
        ("VD", 1.06),
        ("VS", 0.98),
        ("ZG", 1.02),
        ("ZH", 1.04),
    ];

    rows.iter()
        .map(|&(code, multiplier)| CantonMultiplier::new(code, multiplier))
        .collect()
}
