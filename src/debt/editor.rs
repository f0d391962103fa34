use log::{error, info};
use std::sync::Arc;

use crate::clients::DebtApi;
use crate::debt::projection::projected_amount;
use crate::errors::DebtError;
use crate::models::{DebtField, DebtRecord};

/// Edit session for one debt record.
///
/// Read and write failures are logged and never returned; after a failed
/// submit the editor keeps its state so the caller can try again.
#[derive(Debug)]
pub struct DebtEditor {
    api: Arc<dyn DebtApi>,
    id: String,
    record: Option<DebtRecord>,
    amount: f64,
}

impl DebtEditor {
    /// Load the record with `id`. On failure the editor opens without a record.
    pub async fn open(api: Arc<dyn DebtApi>, id: impl Into<String>) -> Self {
        let id = id.into();
        let record = match api.get_debt(&id).await {
            Ok(record) => Some(record),
            Err(e) => {
                error!("Error fetching debt details for {}: {}", id, e);
                None
            }
        };

        let amount = record.as_ref().map(project).unwrap_or(0.0);
        Self {
            api,
            id,
            record,
            amount,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn record(&self) -> Option<&DebtRecord> {
        self.record.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.record.is_some()
    }

    /// Projected amount for the current principal, rate and installments
    pub fn projected_amount(&self) -> f64 {
        self.amount
    }

    /// Apply one edit. Numeric fields recompute the projected amount at once.
    pub fn set_field(&mut self, field: DebtField, raw: &str) -> Result<(), DebtError> {
        let record = self.record.as_mut().ok_or(DebtError::NotLoaded)?;

        match field {
            DebtField::DebtName => record.debt_name = raw.to_string(),
            DebtField::LenderName => record.lender_name = raw.to_string(),
            DebtField::Description => record.description = raw.to_string(),
            DebtField::DebtAmount => record.debt_amount = parse_number(field, raw)?,
            DebtField::InterestRate => record.interest_rate = parse_number(field, raw)?,
            DebtField::Installment => record.installment = parse_number(field, raw)?,
        }

        if field.is_numeric() {
            self.amount = project(record);
        }
        Ok(())
    }

    /// Write the record back. Returns the saved record, or `None` after logging a failure.
    pub async fn submit(&self) -> Option<DebtRecord> {
        let Some(record) = &self.record else {
            error!("Cannot update debt {}: nothing loaded", self.id);
            return None;
        };

        match self.api.update_debt(&self.id, record).await {
            Ok(()) => {
                info!("Debt {} updated", self.id);
                Some(record.clone())
            }
            Err(e) => {
                error!("Error updating debt {}: {}", self.id, e);
                None
            }
        }
    }
}

fn parse_number(field: DebtField, raw: &str) -> Result<f64, DebtError> {
    raw.trim().parse().map_err(|_| DebtError::InvalidNumber {
        field: field.name(),
        value: raw.to_string(),
    })
}

fn project(record: &DebtRecord) -> f64 {
    projected_amount(record.debt_amount, record.interest_rate, record.installment)
}
