use serde::{Deserialize, Serialize};

/// Backend loan status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BorrowStatus {
    Borrowed,
    Returned,
    Overdue,
    Lost,
    Compensated,
    #[serde(other)]
    Unknown,
}

/// Client-side view of a loan's lifecycle.
///
/// `Active` may loop into itself on renew; `Returned` is terminal for that
/// loan instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanState {
    Active,
    OverdueActive,
    Returned,
    /// Lost or compensated; no further borrow actions apply.
    Closed,
}

impl LoanState {
    /// Whether return and renew still apply.
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, Self::Active | Self::OverdueActive)
    }
}

/// A single loan linking a user to a copy. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRecord {
    pub borrow_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub username: String,
    pub copy_id: i64,
    #[serde(default)]
    pub book_title: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub borrow_time: Option<String>,
    /// Due date.
    #[serde(default)]
    pub return_time: Option<String>,
    #[serde(default)]
    pub actual_return_time: Option<String>,
    pub status: BorrowStatus,
    #[serde(default)]
    pub fine: Option<f64>,
}

impl BorrowRecord {
    /// Derives the lifecycle state from the backend status.
    #[must_use]
    pub fn loan_state(&self) -> LoanState {
        match self.status {
            BorrowStatus::Borrowed => LoanState::Active,
            BorrowStatus::Overdue => LoanState::OverdueActive,
            BorrowStatus::Returned => LoanState::Returned,
            BorrowStatus::Lost | BorrowStatus::Compensated => LoanState::Closed,
            // Anything the backend still lists without a return is treated as open.
            BorrowStatus::Unknown if self.actual_return_time.is_none() => LoanState::Active,
            BorrowStatus::Unknown => LoanState::Returned,
        }
    }

    /// Due date as reported by the backend.
    #[must_use]
    pub fn due_date(&self) -> Option<&str> {
        self.return_time.as_deref()
    }
}

/// Body for copy-keyed borrow endpoints (`/borrow/borrow`, legacy return/renew).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequest {
    pub user_id: i64,
    pub copy_id: i64,
}

/// Response of borrow and legacy return/renew calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowResponse {
    pub borrow_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub username: String,
    pub copy_id: i64,
    #[serde(default)]
    pub book_title: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub borrow_time: Option<String>,
    #[serde(default)]
    pub return_time: Option<String>,
    pub status: BorrowStatus,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(status: &str) -> BorrowRecord {
        serde_json::from_value(json!({
            "borrowId": 1,
            "userId": 2,
            "username": "alice",
            "copyId": 3,
            "bookTitle": "Dune",
            "isbn": "9780441013593",
            "borrowTime": "2024-03-01T10:00:00",
            "returnTime": "2024-03-31T10:00:00",
            "status": status
        }))
        .unwrap()
    }

    #[test]
    fn test_loan_state_from_status() {
        assert_eq!(record("BORROWED").loan_state(), LoanState::Active);
        assert_eq!(record("OVERDUE").loan_state(), LoanState::OverdueActive);
        assert_eq!(record("RETURNED").loan_state(), LoanState::Returned);
        assert_eq!(record("LOST").loan_state(), LoanState::Closed);
        assert_eq!(record("SOMETHING_NEW").loan_state(), LoanState::Active);
    }

    #[test]
    fn test_only_active_states_are_open() {
        assert!(record("BORROWED").loan_state().is_open());
        assert!(record("OVERDUE").loan_state().is_open());
        assert!(!record("RETURNED").loan_state().is_open());
        assert!(!record("COMPENSATED").loan_state().is_open());
    }

    #[test]
    fn test_due_date_is_backend_return_time() {
        assert_eq!(record("BORROWED").due_date(), Some("2024-03-31T10:00:00"));
    }

    #[test]
    fn test_borrow_request_wire_shape() {
        let body = serde_json::to_value(BorrowRequest { user_id: 5, copy_id: 7 }).unwrap();
        assert_eq!(body, json!({"userId": 5, "copyId": 7}));
    }
}
