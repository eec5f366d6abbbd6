//! Expense model
//!
//! Represents a single recorded spending event ("gasto") as returned by the
//! backend, plus the request body used to create one.
//!
//! The backend is loose about types: `monto` may arrive as a string or a
//! number, `fecha` as a plain date or a full timestamp, and the installment
//! counts as numbers, strings or null. Decoding normalizes all of that once.

use chrono::{DateTime, NaiveDate};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::category::Category;
use super::ids::{CategoryId, ExpenseId};
use super::installment::Installment;

/// An expense with its category snapshot as of the last fetch
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "ExpenseWire")]
pub struct Expense {
    /// Backend-assigned identifier
    pub id: ExpenseId,

    /// What the money was spent on
    pub description: String,

    /// Decimal amount, kept as text for lossless transport
    pub amount: String,

    /// Calendar date of the expense
    pub date: NaiveDate,

    /// Denormalized category copy; `None` once the category is gone
    pub category: Option<Category>,

    /// Installment metadata
    pub installment: Installment,
}

impl Expense {
    /// Name of the embedded category, if the reference still resolves
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }

    /// Id of the embedded category, if any
    pub fn category_id(&self) -> Option<CategoryId> {
        self.category.as_ref().map(|c| c.id)
    }

    /// Installment display label ("No", "3/12", "0/0", ...)
    pub fn installment_label(&self) -> String {
        self.installment.label()
    }
}

#[derive(Deserialize)]
struct ExpenseWire {
    id: ExpenseId,
    descripcion: String,
    monto: Value,
    fecha: String,
    #[serde(default)]
    categoria: Option<Category>,
    #[serde(default, rename = "esCuota")]
    es_cuota: Option<bool>,
    #[serde(default, rename = "cuotaActual")]
    cuota_actual: Option<Value>,
    #[serde(default, rename = "totalCuotas")]
    total_cuotas: Option<Value>,
}

impl TryFrom<ExpenseWire> for Expense {
    type Error = String;

    fn try_from(wire: ExpenseWire) -> Result<Self, Self::Error> {
        let amount = match wire.monto {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            other => return Err(format!("invalid monto for expense {}: {}", wire.id, other)),
        };
        let date = parse_wire_date(&wire.fecha)
            .ok_or_else(|| format!("invalid fecha for expense {}: {:?}", wire.id, wire.fecha))?;
        let installment = Installment::from_wire(
            wire.es_cuota,
            wire.cuota_actual.as_ref(),
            wire.total_cuotas.as_ref(),
        );

        Ok(Self {
            id: wire.id,
            description: wire.descripcion,
            amount,
            date,
            category: wire.categoria,
            installment,
        })
    }
}

/// Parse a backend date: `YYYY-MM-DD` or an RFC 3339 timestamp
pub fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    // e.g. "2025-03-01T00:00:00" without an offset
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Request body for creating an expense.
///
/// Built only from a form that passed validation. When the installment
/// checkbox is off, `cuotaActual` and `totalCuotas` are left out of the body
/// entirely; when it is on, whichever counts are present are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub description: String,
    pub amount: String,
    pub date: String,
    pub category_id: CategoryId,
    pub installment: Installment,
}

impl Serialize for NewExpense {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("descripcion", &self.description)?;
        map.serialize_entry("monto", &self.amount)?;
        map.serialize_entry("fecha", &self.date)?;
        map.serialize_entry("categoriaId", &self.category_id)?;
        map.serialize_entry("esCuota", &self.installment.is_active())?;
        if let Installment::Plan { current, total } = self.installment {
            if let Some(current) = current {
                map.serialize_entry("cuotaActual", &current)?;
            }
            if let Some(total) = total {
                map.serialize_entry("totalCuotas", &total)?;
            }
        }
        map.end()
    }
}
