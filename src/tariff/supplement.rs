//! Supplement (Zuschlag) rules and raw value parsing
//!
//! Supplements are published as text: either a point amount ("24 Punkte")
//! or an annual flat fee ("CHF 50.– (jährlich)"). The text is parsed once,
//! when the table is built, into [`SupplementValue`].

use crate::error::{Result, SimError};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LEADING_NUMBER: Regex = Regex::new(r"(\d+)(?:\.(\d+))?").unwrap();
}

/// Parsed supplement amount
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SupplementValue {
    /// Tariff points per session, converted via the canton multiplier
    Points(u32),
    /// CHF charged once per year
    AnnualFlat(f64),
}

impl SupplementValue {
    /// Parse the published text of a supplement amount
    ///
    /// Text containing "CHF" is a flat amount (decimals allowed), anything
    /// else is a point amount taken from the leading integer.
    pub fn parse(raw: &str) -> Result<Self> {
        let caps = LEADING_NUMBER
            .captures(raw)
            .ok_or_else(|| SimError::config(format!("supplement value '{}' has no amount", raw)))?;

        if raw.to_uppercase().contains("CHF") {
            let amount: f64 = caps[0]
                .parse()
                .map_err(|_| SimError::config(format!("invalid CHF amount in '{}'", raw)))?;
            Ok(SupplementValue::AnnualFlat(amount))
        } else {
            let points: u32 = caps[1]
                .parse()
                .map_err(|_| SimError::config(format!("invalid point amount in '{}'", raw)))?;
            Ok(SupplementValue::Points(points))
        }
    }

    /// Flat CHF amount, zero for point supplements
    pub fn flat_amount(&self) -> f64 {
        match self {
            SupplementValue::AnnualFlat(chf) => *chf,
            SupplementValue::Points(_) => 0.0,
        }
    }
}

/// A stochastically triggered supplement
#[derive(Debug, Clone, PartialEq)]
pub struct SupplementRule {
    pub code: String,
    pub name: String,
    /// Probability that a practice bills this supplement, in [0, 1]
    pub trigger_probability: f64,
    pub value: SupplementValue,
}

impl SupplementRule {
    /// Build a rule from its published text form
    pub fn from_raw(code: &str, name: &str, trigger_probability: f64, raw_value: &str) -> Result<Self> {
        let value = SupplementValue::parse(raw_value)
            .map_err(|e| SimError::config(format!("supplement {}: {}", code, e)))?;
        Ok(Self {
            code: code.to_string(),
            name: name.to_string(),
            trigger_probability,
            value,
        })
    }
}

/// Build the 8 supplement rules in canonical order
pub fn default_supplements() -> Result<Vec<SupplementRule>> {
    // Format: (code, name, trigger_probability, raw_value)
    let rows: &[(&str, &str, f64, &str)] = &[
        ("7350", "Zuschlag Bewegungsbad", 0.05, "10 Punkte"),
        ("7351", "Zuschlag Domizilbehandlung", 0.10, "24 Punkte"),
        ("7352", "Zuschlag Wegentschädigung", 0.08, "18 Punkte"),
        ("7353", "Zuschlag Randzeitenbehandlung", 0.04, "15 Punkte"),
        ("7354", "Zuschlag Gerätebenützung", 0.20, "8 Punkte"),
        ("7355", "Zuschlag Erstbehandlung", 0.15, "12 Punkte"),
        ("7360", "Jahrespauschale Praxisinfrastruktur", 0.30, "CHF 90.– (jährlich)"),
        ("7361", "Jahrespauschale Verbrauchsmaterial", 0.50, "CHF 50.– (jährlich)"),
    ];

    rows.iter()
        .map(|&(code, name, p, raw)| SupplementRule::from_raw(code, name, p, raw))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_points() {
        assert_eq!(SupplementValue::parse("24 Punkte").unwrap(), SupplementValue::Points(24));
        assert_eq!(SupplementValue::parse("8 Punkte").unwrap(), SupplementValue::Points(8));
    }

    #[test]
    fn test_parse_flat() {
        assert_eq!(
            SupplementValue::parse("CHF 50.– (jährlich)").unwrap(),
            SupplementValue::AnnualFlat(50.0)
        );
        assert_eq!(
            SupplementValue::parse("CHF 12.50 (jährlich)").unwrap(),
            SupplementValue::AnnualFlat(12.5)
        );
    }

    #[test]
    fn test_parse_without_amount_fails() {
        let err = SupplementValue::parse("nach Aufwand").unwrap_err();
        assert!(matches!(err, SimError::Configuration(_)));
    }

    #[test]
    fn test_default_supplements() {
        let rules = default_supplements().unwrap();
        assert_eq!(rules.len(), 8);

        let flat_total: f64 = rules.iter().map(|r| r.value.flat_amount()).sum();
        assert_eq!(flat_total, 140.0);

        let point_rules = rules
            .iter()
            .filter(|r| matches!(r.value, SupplementValue::Points(_)))
            .count();
        assert_eq!(point_rules, 6);
    }
}
