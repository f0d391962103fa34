use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::errors::DebtError;

/// Debt record as stored by the finance backend.
///
/// Fields the backend adds beyond the editable ones are kept in `extra` so a
/// write sends them back untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub debt_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub lender_name: String,
    #[serde(default)]
    pub debt_amount: f64,
    #[serde(default)]
    pub interest_rate: f64,
    #[serde(default)]
    pub installment: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// The backend sends null for text fields it never stored
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// `GET finance/debt/{id}` wraps the record in a `data` envelope
#[derive(Debug, Deserialize)]
pub struct DebtEnvelope {
    pub data: DebtRecord,
}

/// Editable fields of a debt record, named as on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebtField {
    DebtName,
    LenderName,
    DebtAmount,
    InterestRate,
    Installment,
    Description,
}

impl DebtField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::DebtName => "debtName",
            Self::LenderName => "lenderName",
            Self::DebtAmount => "debtAmount",
            Self::InterestRate => "interestRate",
            Self::Installment => "installment",
            Self::Description => "description",
        }
    }

    /// Numeric fields feed the projected amount
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::DebtAmount | Self::InterestRate | Self::Installment)
    }
}

impl FromStr for DebtField {
    type Err = DebtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debtName" => Ok(Self::DebtName),
            "lenderName" => Ok(Self::LenderName),
            "debtAmount" => Ok(Self::DebtAmount),
            "interestRate" => Ok(Self::InterestRate),
            "installment" => Ok(Self::Installment),
            "description" => Ok(Self::Description),
            other => Err(DebtError::UnknownField(other.to_string())),
        }
    }
}
