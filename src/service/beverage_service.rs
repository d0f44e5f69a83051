//! Read access to the beverage catalog.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::Beverage;
use crate::error::ApiError;
use crate::persistence::Store;

/// Serves the active beverage catalog.
#[derive(Debug, Clone)]
pub struct BeverageService {
    store: Arc<dyn Store>,
}

impl BeverageService {
    /// Creates a new `BeverageService`.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Active beverages ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    pub async fn list(&self) -> Result<Vec<Beverage>, ApiError> {
        Ok(self.store.beverages(false).await?)
    }

    /// One active beverage.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if it is unknown or retired.
    pub async fn get(&self, id: Uuid) -> Result<Beverage, ApiError> {
        self.store
            .beverage(id)
            .await?
            .filter(|b| b.is_active)
            .ok_or_else(|| ApiError::not_found("beverage", id))
    }
}
