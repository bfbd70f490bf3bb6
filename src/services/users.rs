use crate::error::ClientError;
use crate::models::{MessageResponse, Role, UserCreate, UserIdentity, UserPublic, UserUpdate};
use crate::paging::{PageRequest, PagedResponse};
use crate::transport::{ApiClient, Method, QueryParams, RequestOptions, encode_segment};

const BASE_PATH: &str = "/users";

/// Profiles and admin user management.
///
/// `UserCreate::password` must already be digested with
/// [`hash_password`](crate::session::hash_password).
#[derive(Debug, Clone)]
pub struct UsersService {
    api: ApiClient,
}

impl UsersService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn get(&self, id: i64) -> Result<UserPublic, ClientError> {
        Ok(self
            .api
            .get(&format!("{BASE_PATH}/{id}"), QueryParams::new())
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn get_by_username(&self, username: &str) -> Result<UserPublic, ClientError> {
        let path = format!("{BASE_PATH}/username/{}", encode_segment(username));
        Ok(self.api.get(&path, QueryParams::new()).await?)
    }

    /// `GET /users/me`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure or missing auth.
    pub async fn current(&self) -> Result<UserIdentity, ClientError> {
        Ok(self
            .api
            .get(&format!("{BASE_PATH}/me"), QueryParams::new())
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the backend rejects the update.
    pub async fn update_current(
        &self,
        update: &UserUpdate,
    ) -> Result<MessageResponse, ClientError> {
        Ok(self
            .api
            .put(&format!("{BASE_PATH}/me"), Some(update))
            .await?)
    }

    /// Admin: every account.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn list(
        &self,
        page: &PageRequest,
    ) -> Result<PagedResponse<UserIdentity>, ClientError> {
        Ok(self
            .api
            .get(&format!("{BASE_PATH}/all"), page.to_params())
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the backend rejects the account.
    pub async fn create(&self, user: &UserCreate) -> Result<MessageResponse, ClientError> {
        Ok(self
            .api
            .post(&format!("{BASE_PATH}/create"), Some(user))
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the backend rejects the update.
    pub async fn update(
        &self,
        id: i64,
        update: &UserUpdate,
    ) -> Result<MessageResponse, ClientError> {
        Ok(self
            .api
            .put(&format!("{BASE_PATH}/{id}"), Some(update))
            .await?)
    }

    /// `PUT /users/{id}/role?role=...`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the backend rejects the change.
    pub async fn update_role(&self, id: i64, role: Role) -> Result<MessageResponse, ClientError> {
        let params = QueryParams::new().with("role", role.as_str());
        Ok(self
            .api
            .request(
                Method::Put,
                &format!("{BASE_PATH}/{id}/role"),
                RequestOptions::new().params(params),
            )
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on transport failure.
    pub async fn delete(&self, id: i64) -> Result<MessageResponse, ClientError> {
        Ok(self.api.delete(&format!("{BASE_PATH}/{id}")).await?)
    }
}
