use serde::{Deserialize, Serialize};

/// A fee billed against a borrow. Amounts are computed by the backend only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fee {
    pub id: i64,
    pub borrow_id: i64,
    #[serde(alias = "fineAmount")]
    pub amount: f64,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub calculation_date: Option<String>,
    #[serde(default)]
    pub payment_date: Option<String>,
}

/// Backend fee estimate for a borrow (`GET /fees/calculate/{borrowId}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeCalculation {
    pub borrow_id: i64,
    #[serde(default)]
    pub days_late: i64,
    pub fee_amount: f64,
}
