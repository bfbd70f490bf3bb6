use crate::error::ClientError;
use crate::models::{MessageResponse, Reservation, ReserveRequest};
use crate::paging::{PageRequest, PagedResponse};
use crate::transport::{ApiClient, QueryParams};

const BASE_PATH: &str = "/reservations";

/// Holds on titles with no available copy.
#[derive(Debug, Clone)]
pub struct ReservationsService {
    api: ApiClient,
}

impl ReservationsService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// The caller's reservations.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn user_reservations(
        &self,
        page: &PageRequest,
    ) -> Result<PagedResponse<Reservation>, ClientError> {
        Ok(self
            .api
            .get(&format!("{BASE_PATH}/user"), page.to_params())
            .await?)
    }

    /// Admin: every reservation.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn all(&self, page: &PageRequest) -> Result<PagedResponse<Reservation>, ClientError> {
        Ok(self.api.get(BASE_PATH, page.to_params()).await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the backend refuses the reservation.
    pub async fn create(&self, book_id: i64) -> Result<MessageResponse, ClientError> {
        Ok(self
            .api
            .post(BASE_PATH, Some(&ReserveRequest { book_id }))
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn cancel(&self, reservation_id: i64) -> Result<MessageResponse, ClientError> {
        Ok(self
            .api
            .delete(&format!("{BASE_PATH}/{reservation_id}"))
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn get(&self, reservation_id: i64) -> Result<Reservation, ClientError> {
        Ok(self
            .api
            .get(&format!("{BASE_PATH}/{reservation_id}"), QueryParams::new())
            .await?)
    }
}
