//! Borrow lifecycle: borrow, return, renew, and loan listings.
//!
//! Return and renew always locate the caller's active record first, through
//! a [`BorrowRecordResolver`], before any mutating call is issued. A missing
//! record is an expected outcome (another session may have returned it) and
//! surfaces as [`ClientError::BorrowNotFound`] with no mutation attempted.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::books::BooksService;
use crate::config::BorrowEndpointMode;
use crate::error::ClientError;
use crate::models::{BookCopy, BorrowRecord, BorrowRequest, BorrowResponse, MessageResponse};
use crate::paging::{PageRequest, PagedResponse, paginate};
use crate::transport::{ApiClient, ApiError, Method, QueryParams, RequestOptions};

const BASE_PATH: &str = "/borrow";

/// Looks up one of the caller's active borrow records by id.
#[async_trait]
pub trait BorrowRecordResolver: Send + Sync {
    /// Returns the active record for `borrow_id`, or `None` when the caller
    /// has no such active loan.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the lookup itself fails.
    async fn find_active(&self, borrow_id: i64) -> Result<Option<BorrowRecord>, ApiError>;
}

/// Resolves by scanning `GET /borrow/my-current`.
///
/// A user's active loans are a short list, so a linear search is enough.
/// Entries the backend still lists but whose
/// [`LoanState`](crate::models::LoanState) is no longer open
/// (returned, lost, compensated) count as missing.
#[derive(Debug, Clone)]
pub struct CurrentBorrowsResolver {
    api: ApiClient,
}

impl CurrentBorrowsResolver {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl BorrowRecordResolver for CurrentBorrowsResolver {
    async fn find_active(&self, borrow_id: i64) -> Result<Option<BorrowRecord>, ApiError> {
        let current = fetch_current(&self.api).await?;
        let Some(record) = current
            .into_iter()
            .find(|record| record.borrow_id == borrow_id)
        else {
            return Ok(None);
        };

        let state = record.loan_state();
        if !state.is_open() {
            debug!(borrow_id, ?state, "Listed borrow record is no longer open");
            return Ok(None);
        }
        Ok(Some(record))
    }
}

async fn fetch_current(api: &ApiClient) -> Result<Vec<BorrowRecord>, ApiError> {
    api.get(&format!("{BASE_PATH}/my-current"), QueryParams::new())
        .await
}

/// First copy with status `AVAILABLE`, in backend order.
#[must_use]
pub fn select_available_copy(copies: &[BookCopy]) -> Option<&BookCopy> {
    copies.iter().find(|copy| copy.is_available())
}

/// Result of a return.
///
/// `borrow` is the record as located before the return; the actual return
/// time is only known to the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnOutcome {
    pub borrow: BorrowRecord,
    pub message: Option<String>,
}

/// Result of a renew.
///
/// `current` is the record re-fetched after the renew call, carrying the
/// backend's new due date. It is `None` when the record disappeared from the
/// active list between the two reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenewOutcome {
    pub previous: BorrowRecord,
    pub current: Option<BorrowRecord>,
    pub message: Option<String>,
}

impl RenewOutcome {
    /// The authoritative due date after renewal, if the record was re-read.
    #[must_use]
    pub fn due_date(&self) -> Option<&str> {
        self.current.as_ref().and_then(BorrowRecord::due_date)
    }
}

/// Borrow, return, renew, and loan listings.
#[derive(Clone)]
pub struct BorrowService {
    api: ApiClient,
    books: BooksService,
    mode: BorrowEndpointMode,
    resolver: Arc<dyn BorrowRecordResolver>,
}

impl fmt::Debug for BorrowService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BorrowService")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl BorrowService {
    /// Service resolving records through `GET /borrow/my-current`.
    #[must_use]
    pub fn new(api: ApiClient, mode: BorrowEndpointMode) -> Self {
        let resolver = Arc::new(CurrentBorrowsResolver::new(api.clone()));
        Self {
            books: BooksService::new(api.clone()),
            api,
            mode,
            resolver,
        }
    }

    /// Replaces the record resolver, e.g. with a direct backend lookup.
    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn BorrowRecordResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    #[must_use]
    pub fn mode(&self) -> BorrowEndpointMode {
        self.mode
    }

    /// Borrows a specific copy. Availability is enforced by the backend.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the backend refuses (e.g. the copy was
    /// taken in the meantime).
    #[instrument(skip(self))]
    pub async fn borrow(&self, user_id: i64, copy_id: i64) -> Result<BorrowResponse, ClientError> {
        let request = BorrowRequest { user_id, copy_id };
        let response: BorrowResponse = self
            .api
            .post(&format!("{BASE_PATH}/borrow"), Some(&request))
            .await?;
        info!(borrow_id = response.borrow_id, "Borrowed copy");
        Ok(response)
    }

    /// Borrows the first available copy of a title.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NoAvailableCopy`] without any mutating call when
    /// no copy is `AVAILABLE`, or [`ClientError::Api`] on transport failure.
    #[instrument(skip(self))]
    pub async fn borrow_by_book(
        &self,
        user_id: i64,
        book_id: i64,
    ) -> Result<BorrowResponse, ClientError> {
        let copies = self.books.copies(book_id).await?;
        let Some(copy) = select_available_copy(&copies) else {
            warn!(copies = copies.len(), "No available copy");
            return Err(ClientError::NoAvailableCopy { book_id });
        };
        debug!(
            copy_id = copy.id,
            owning_book_id = copy.owning_book_id(),
            "Selected available copy"
        );
        self.borrow(user_id, copy.id).await
    }

    /// Returns the loan `borrow_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::BorrowNotFound`] when the loan is not among the
    /// caller's current borrows, or [`ClientError::Api`] on transport failure.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub async fn return_book(&self, borrow_id: i64) -> Result<ReturnOutcome, ClientError> {
        let record = self.locate(borrow_id).await?;

        let message = match self.mode {
            BorrowEndpointMode::ById => self.return_by_id(borrow_id).await?.message,
            BorrowEndpointMode::Legacy => {
                self.return_by_copy(&legacy_request(&record)).await?.message
            }
        };

        info!(borrow_id, "Returned loan");
        Ok(ReturnOutcome {
            borrow: record,
            message,
        })
    }

    /// Renews the loan `borrow_id` and re-reads it for the new due date.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::BorrowNotFound`] when the loan is not among the
    /// caller's current borrows, or [`ClientError::Api`] on transport failure.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub async fn renew_book(&self, borrow_id: i64) -> Result<RenewOutcome, ClientError> {
        let previous = self.locate(borrow_id).await?;

        let message = match self.mode {
            BorrowEndpointMode::ById => self.renew_by_id(borrow_id).await?.message,
            BorrowEndpointMode::Legacy => {
                self.renew_by_copy(&legacy_request(&previous)).await?.message
            }
        };

        let current = self.resolver.find_active(borrow_id).await?;
        if current.is_none() {
            warn!(borrow_id, "Renewed loan missing from current borrows on re-read");
        }
        info!(
            borrow_id,
            due = current.as_ref().and_then(BorrowRecord::due_date).unwrap_or("unknown"),
            "Renewed loan"
        );
        Ok(RenewOutcome {
            previous,
            current,
            message,
        })
    }

    async fn locate(&self, borrow_id: i64) -> Result<BorrowRecord, ClientError> {
        match self.resolver.find_active(borrow_id).await? {
            Some(record) => Ok(record),
            None => {
                info!(borrow_id, "Borrow record not among current loans");
                Err(ClientError::BorrowNotFound { borrow_id })
            }
        }
    }

    /// `PUT /borrow/{id}/return` with no prior lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn return_by_id(&self, borrow_id: i64) -> Result<MessageResponse, ClientError> {
        Ok(self
            .api
            .request(
                Method::Put,
                &format!("{BASE_PATH}/{borrow_id}/return"),
                RequestOptions::new(),
            )
            .await?)
    }

    /// `PUT /borrow/{id}/renew` with no prior lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn renew_by_id(&self, borrow_id: i64) -> Result<MessageResponse, ClientError> {
        Ok(self
            .api
            .request(
                Method::Put,
                &format!("{BASE_PATH}/{borrow_id}/renew"),
                RequestOptions::new(),
            )
            .await?)
    }

    /// Legacy copy-keyed `POST /borrow/return`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn return_by_copy(
        &self,
        request: &BorrowRequest,
    ) -> Result<BorrowResponse, ClientError> {
        Ok(self
            .api
            .post(&format!("{BASE_PATH}/return"), Some(request))
            .await?)
    }

    /// Legacy copy-keyed `POST /borrow/renew`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn renew_by_copy(
        &self,
        request: &BorrowRequest,
    ) -> Result<BorrowResponse, ClientError> {
        Ok(self
            .api
            .post(&format!("{BASE_PATH}/renew"), Some(request))
            .await?)
    }

    /// The caller's active loans (flat list).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn current_borrows(&self) -> Result<Vec<BorrowRecord>, ClientError> {
        Ok(fetch_current(&self.api).await?)
    }

    /// The caller's full borrow history, including returned loans.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn history(&self) -> Result<Vec<BorrowRecord>, ClientError> {
        Ok(self
            .api
            .get(&format!("{BASE_PATH}/my-history"), QueryParams::new())
            .await?)
    }

    /// A page window over the caller's active loans.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn user_borrows(
        &self,
        page: u32,
        size: u32,
    ) -> Result<PagedResponse<BorrowRecord>, ClientError> {
        Ok(paginate(self.current_borrows().await?, page, size))
    }

    /// A page window over the caller's borrow history.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn history_page(
        &self,
        page: u32,
        size: u32,
    ) -> Result<PagedResponse<BorrowRecord>, ClientError> {
        Ok(paginate(self.history().await?, page, size))
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn overdue(&self, page: &PageRequest) -> Result<Vec<BorrowRecord>, ClientError> {
        Ok(self
            .api
            .get(&format!("{BASE_PATH}/overdue"), page.to_params())
            .await?)
    }

    /// Admin: borrow on behalf of a user.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn admin_borrow(
        &self,
        request: &BorrowRequest,
    ) -> Result<BorrowResponse, ClientError> {
        Ok(self
            .api
            .post(&format!("{BASE_PATH}/admin/borrow"), Some(request))
            .await?)
    }

    /// Admin: return on behalf of a user.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn admin_return(
        &self,
        request: &BorrowRequest,
    ) -> Result<BorrowResponse, ClientError> {
        Ok(self
            .api
            .post(&format!("{BASE_PATH}/admin/return"), Some(request))
            .await?)
    }

    /// Admin: renew on behalf of a user.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn admin_renew(
        &self,
        request: &BorrowRequest,
    ) -> Result<BorrowResponse, ClientError> {
        Ok(self
            .api
            .post(&format!("{BASE_PATH}/admin/renew"), Some(request))
            .await?)
    }

    /// Admin: every loan.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn admin_all(&self, page: &PageRequest) -> Result<Vec<BorrowRecord>, ClientError> {
        Ok(self
            .api
            .get(&format!("{BASE_PATH}/admin/all"), page.to_params())
            .await?)
    }
}

fn legacy_request(record: &BorrowRecord) -> BorrowRequest {
    BorrowRequest {
        user_id: record.user_id,
        copy_id: record.copy_id,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::BookCopyStatus;

    fn copy(id: i64, status: &str) -> BookCopy {
        serde_json::from_value(json!({"id": id, "bookId": 1, "status": status})).unwrap()
    }

    #[test]
    fn test_select_available_copy_takes_first_available() {
        let copies = vec![copy(3, "BORROWED"), copy(7, "AVAILABLE"), copy(9, "AVAILABLE")];
        assert_eq!(select_available_copy(&copies).unwrap().id, 7);
    }

    #[test]
    fn test_select_available_copy_none_available() {
        let copies = vec![copy(1, "BORROWED"), copy(2, "MAINTENANCE"), copy(3, "DISCARDED")];
        assert!(select_available_copy(&copies).is_none());
        assert!(select_available_copy(&[]).is_none());
        assert_eq!(copies[1].status, BookCopyStatus::Maintenance);
    }

    #[test]
    fn test_legacy_request_uses_located_record() {
        let record: BorrowRecord = serde_json::from_value(json!({
            "borrowId": 42,
            "userId": 5,
            "copyId": 77,
            "status": "BORROWED"
        }))
        .unwrap();
        assert_eq!(
            legacy_request(&record),
            BorrowRequest {
                user_id: 5,
                copy_id: 77
            }
        );
    }

    #[test]
    fn test_renew_outcome_due_date_only_from_reread() {
        let previous: BorrowRecord = serde_json::from_value(json!({
            "borrowId": 1, "userId": 1, "copyId": 1, "status": "BORROWED",
            "returnTime": "2024-03-31T10:00:00"
        }))
        .unwrap();
        let outcome = RenewOutcome {
            previous,
            current: None,
            message: None,
        };
        assert_eq!(outcome.due_date(), None);
    }
}
