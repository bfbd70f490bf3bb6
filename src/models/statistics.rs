use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookStatistics {
    pub total_books: i64,
    pub available_books: i64,
    pub borrowed_books: i64,
    pub total_borrows: i64,
    pub active_borrows: i64,
    pub overdue_borrows: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStatistics {
    pub total_borrows: i64,
    pub active_borrows: i64,
    pub overdue_borrows: i64,
    pub total_fees: f64,
    pub unpaid_fees: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopBooksRequest {
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}
