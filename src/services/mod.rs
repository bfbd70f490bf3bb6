//! Domain services: one façade per backend resource.
//!
//! Most services are typed pass-throughs. [`BorrowService`] carries the
//! borrow reconciliation logic and [`StatisticsService`] the dashboard
//! fan-out. [`LibraryApi`] wires every service to one shared transport and
//! session.
//!
//! # Example
//!
//! ```no_run
//! use library_client::{ClientConfig, LibraryApi};
//!
//! # async fn example() -> Result<(), library_client::ClientError> {
//! let api = LibraryApi::in_memory(ClientConfig::default())?;
//! api.auth().login("alice", "secret").await?;
//! let loans = api.borrow().user_borrows(0, 10).await?;
//! println!("{} active loans", loans.total_elements);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

mod books;
mod borrow;
mod categories;
mod comments;
mod favorites;
mod fees;
mod notices;
mod reservations;
mod rules;
mod statistics;
mod users;

pub use books::BooksService;
pub use borrow::{
    BorrowRecordResolver, BorrowService, CurrentBorrowsResolver, RenewOutcome, ReturnOutcome,
    select_available_copy,
};
pub use categories::CategoriesService;
pub use comments::CommentsService;
pub use favorites::FavoritesService;
pub use fees::FeesService;
pub use notices::NoticesService;
pub use reservations::ReservationsService;
pub use rules::BorrowingRulesService;
pub use statistics::{Dashboard, DashboardSection, StatisticsService};
pub use users::UsersService;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::session::{AuthService, SessionContext, SessionStore};
use crate::transport::ApiClient;

/// Entry point wiring transport, session, and services together.
#[derive(Debug, Clone)]
pub struct LibraryApi {
    config: ClientConfig,
    api: ApiClient,
    session: Arc<SessionContext>,
}

impl LibraryApi {
    /// Validates `config` and builds a client whose session persists in `store`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] for an invalid config, or
    /// [`ClientError::Api`] when the HTTP client cannot be built.
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self, ClientError> {
        config.validate()?;
        let session = Arc::new(SessionContext::new(store));
        let api = ApiClient::new(&config, session.clone())?;
        Ok(Self {
            config,
            api,
            session,
        })
    }

    /// Client whose session lives only in memory.
    ///
    /// # Errors
    ///
    /// See [`LibraryApi::new`].
    pub fn in_memory(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let session = Arc::new(SessionContext::in_memory());
        let api = ApiClient::new(&config, session.clone())?;
        Ok(Self {
            config,
            api,
            session,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Shared transport, for endpoints without a dedicated service.
    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    #[must_use]
    pub fn auth(&self) -> AuthService {
        AuthService::new(self.api.clone(), self.session.clone())
    }

    #[must_use]
    pub fn books(&self) -> BooksService {
        BooksService::new(self.api.clone())
    }

    #[must_use]
    pub fn borrow(&self) -> BorrowService {
        BorrowService::new(self.api.clone(), self.config.borrow_endpoints)
    }

    #[must_use]
    pub fn reservations(&self) -> ReservationsService {
        ReservationsService::new(self.api.clone())
    }

    #[must_use]
    pub fn favorites(&self) -> FavoritesService {
        FavoritesService::new(self.api.clone())
    }

    #[must_use]
    pub fn fees(&self) -> FeesService {
        FeesService::new(self.api.clone())
    }

    #[must_use]
    pub fn notices(&self) -> NoticesService {
        NoticesService::new(self.api.clone())
    }

    #[must_use]
    pub fn categories(&self) -> CategoriesService {
        CategoriesService::new(self.api.clone())
    }

    #[must_use]
    pub fn borrowing_rules(&self) -> BorrowingRulesService {
        BorrowingRulesService::new(self.api.clone())
    }

    #[must_use]
    pub fn users(&self) -> UsersService {
        UsersService::new(self.api.clone())
    }

    #[must_use]
    pub fn comments(&self) -> CommentsService {
        CommentsService::new(self.api.clone())
    }

    #[must_use]
    pub fn statistics(&self) -> StatisticsService {
        StatisticsService::new(self.api.clone())
    }

    /// See [`StatisticsService::load_dashboard`].
    pub async fn load_dashboard(&self) -> Dashboard {
        self.statistics().load_dashboard().await
    }
}
