//! Installment ("cuotas") metadata
//!
//! An expense is either a one-off payment or one installment of a
//! multi-payment purchase. The variant is decided once, when the expense is
//! decoded from the backend or built from a form, and the display label is
//! derived from it without touching the expense.

use serde_json::Value;
use std::fmt;

/// Whether an expense is part of an installment purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Installment {
    /// A single payment
    #[default]
    NotInstallment,
    /// One installment of a multi-payment purchase.
    ///
    /// Either count may be missing; no ordering between them is enforced.
    Plan {
        current: Option<u32>,
        total: Option<u32>,
    },
}

impl Installment {
    /// A fully specified plan, e.g. payment 3 of 12
    pub fn plan(current: u32, total: u32) -> Self {
        Self::Plan {
            current: Some(current),
            total: Some(total),
        }
    }

    /// Check if installment fields are active
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Plan { .. })
    }

    /// Display label: `"No"` for single payments, `"<current>/<total>"`
    /// otherwise, with `0` standing in for a missing count.
    pub fn label(&self) -> String {
        match self {
            Self::NotInstallment => "No".to_string(),
            Self::Plan { current, total } => {
                format!("{}/{}", current.unwrap_or(0), total.unwrap_or(0))
            }
        }
    }

    /// Build from the raw form inputs.
    ///
    /// When the checkbox is off the counts are ignored entirely. When it is
    /// on, blank or unparseable counts become missing rather than failing.
    pub fn from_form(enabled: bool, current: &str, total: &str) -> Self {
        if !enabled {
            return Self::NotInstallment;
        }
        Self::Plan {
            current: parse_count(current),
            total: parse_count(total),
        }
    }

    /// Build from the backend's `esCuota` / `cuotaActual` / `totalCuotas`.
    ///
    /// Stray counts on a non-installment expense are dropped.
    pub(crate) fn from_wire(flag: Option<bool>, current: Option<&Value>, total: Option<&Value>) -> Self {
        if !flag.unwrap_or(false) {
            return Self::NotInstallment;
        }
        Self::Plan {
            current: current.and_then(count_from_value),
            total: total.and_then(count_from_value),
        }
    }
}

impl fmt::Display for Installment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

fn parse_count(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(count) => Some(count),
        Err(_) => {
            tracing::warn!(value = raw, "ignoring non-numeric installment count");
            None
        }
    }
}

// The backend stores counts loosely: numbers, numeric strings, "" or null.
fn count_from_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_plan_label() {
        assert_eq!(Installment::plan(3, 12).label(), "3/12");
    }

    #[test]
    fn test_missing_counts_render_zero() {
        let plan = Installment::Plan {
            current: None,
            total: None,
        };
        assert_eq!(plan.label(), "0/0");

        let half = Installment::Plan {
            current: Some(2),
            total: None,
        };
        assert_eq!(half.label(), "2/0");
    }

    #[test]
    fn test_not_installment_label() {
        assert_eq!(Installment::NotInstallment.label(), "No");
        assert!(!Installment::NotInstallment.is_active());
    }

    #[test]
    fn test_no_ordering_constraint() {
        // current > total is carried through untouched
        assert_eq!(Installment::plan(14, 12).label(), "14/12");
    }

    #[test]
    fn test_from_form() {
        assert_eq!(
            Installment::from_form(false, "3", "12"),
            Installment::NotInstallment
        );
        assert_eq!(Installment::from_form(true, "3", "12"), Installment::plan(3, 12));
        assert_eq!(
            Installment::from_form(true, "", " "),
            Installment::Plan {
                current: None,
                total: None
            }
        );
        assert_eq!(
            Installment::from_form(true, "x", "6"),
            Installment::Plan {
                current: None,
                total: Some(6)
            }
        );
    }

    #[test]
    fn test_from_wire_loose_values() {
        let current = json!("3");
        let total = json!(12);
        assert_eq!(
            Installment::from_wire(Some(true), Some(&current), Some(&total)),
            Installment::plan(3, 12)
        );

        let blank = json!("");
        let null = Value::Null;
        assert_eq!(
            Installment::from_wire(Some(true), Some(&blank), Some(&null)),
            Installment::Plan {
                current: None,
                total: None
            }
        );
    }

    #[test]
    fn test_from_wire_ignores_stray_counts() {
        let current = json!(3);
        let total = json!(12);
        assert_eq!(
            Installment::from_wire(Some(false), Some(&current), Some(&total)),
            Installment::NotInstallment
        );
        assert_eq!(
            Installment::from_wire(None, Some(&current), Some(&total)),
            Installment::NotInstallment
        );
    }
}
