//! Statistics reads and the admin dashboard fan-out.

use serde::Serialize;
use tracing::{instrument, warn};

use super::fees::FeesService;
use crate::error::ClientError;
use crate::models::{Book, BookStatistics, Fee, TopBooksRequest, UserStatistics};
use crate::paging::{PageRequest, PagedResponse};
use crate::transport::{ApiClient, QueryParams};

const BASE_PATH: &str = "/statistics";
const DASHBOARD_TOP_BOOKS: u32 = 10;

/// One independently loaded part of the dashboard.
///
/// Exactly one of `data` and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSection<T> {
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> DashboardSection<T> {
    fn from_result(section: &'static str, result: Result<T, ClientError>) -> Self {
        match result {
            Ok(data) => Self {
                data: Some(data),
                error: None,
            },
            Err(error) => {
                warn!(section, error = %error, "Dashboard section failed");
                Self {
                    data: None,
                    error: Some(error.user_message()),
                }
            }
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregated dashboard; sections fail independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub book_statistics: DashboardSection<BookStatistics>,
    pub user_statistics: DashboardSection<UserStatistics>,
    pub top_books: DashboardSection<Vec<Book>>,
    pub unpaid_fees: DashboardSection<PagedResponse<Fee>>,
}

impl Dashboard {
    /// Number of sections that failed to load.
    #[must_use]
    pub fn failed_sections(&self) -> usize {
        [
            self.book_statistics.is_ok(),
            self.user_statistics.is_ok(),
            self.top_books.is_ok(),
            self.unpaid_fees.is_ok(),
        ]
        .iter()
        .filter(|ok| !**ok)
        .count()
    }
}

#[derive(Debug, Clone)]
pub struct StatisticsService {
    api: ApiClient,
    fees: FeesService,
}

impl StatisticsService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            fees: FeesService::new(api.clone()),
            api,
        }
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn book_statistics(&self) -> Result<BookStatistics, ClientError> {
        Ok(self
            .api
            .get(&format!("{BASE_PATH}/books"), QueryParams::new())
            .await?)
    }

    /// Most borrowed titles (`POST /statistics/top-books`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn top_books(&self, request: &TopBooksRequest) -> Result<Vec<Book>, ClientError> {
        Ok(self
            .api
            .post(&format!("{BASE_PATH}/top-books"), Some(request))
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn user_statistics(&self) -> Result<UserStatistics, ClientError> {
        Ok(self
            .api
            .get(&format!("{BASE_PATH}/user"), QueryParams::new())
            .await?)
    }

    /// Loads every dashboard section concurrently.
    ///
    /// A failing section is reported in its own `error` field and never
    /// aborts its siblings.
    #[instrument(skip_all)]
    pub async fn load_dashboard(&self) -> Dashboard {
        let top_request = TopBooksRequest {
            limit: DASHBOARD_TOP_BOOKS,
            start_date: None,
            end_date: None,
        };
        let unpaid_page = PageRequest::default();

        let (book_statistics, user_statistics, top_books, unpaid_fees) = tokio::join!(
            self.book_statistics(),
            self.user_statistics(),
            self.top_books(&top_request),
            self.fees.unpaid(&unpaid_page),
        );

        Dashboard {
            book_statistics: DashboardSection::from_result("book_statistics", book_statistics),
            user_statistics: DashboardSection::from_result("user_statistics", user_statistics),
            top_books: DashboardSection::from_result("top_books", top_books),
            unpaid_fees: DashboardSection::from_result("unpaid_fees", unpaid_fees),
        }
    }
}
