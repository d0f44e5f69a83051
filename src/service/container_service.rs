//! User-defined drinking containers.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use super::load_user;
use crate::api::dto::{CreateContainerRequest, UpdateContainerRequest};
use crate::domain::{Container, UsageLimits, UserId};
use crate::error::ApiError;
use crate::persistence::Store;

/// Container CRUD with free-plan quotas.
#[derive(Debug, Clone)]
pub struct ContainerService {
    store: Arc<dyn Store>,
}

impl ContainerService {
    /// Creates a new `ContainerService`.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// The caller's containers, favorites first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<Container>, ApiError> {
        Ok(self.store.containers(user_id).await?)
    }

    /// Fetches one container.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if it does not exist for this user.
    pub async fn get(&self, user_id: UserId, id: Uuid) -> Result<Container, ApiError> {
        self.store
            .container(user_id, id)
            .await?
            .ok_or_else(|| ApiError::not_found("container", id))
    }

    /// Defines a new container.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for invalid fields and
    /// [`ApiError::UsageLimitReached`] when the plan quota is used up.
    pub async fn create(
        &self,
        user_id: UserId,
        req: CreateContainerRequest,
    ) -> Result<Container, ApiError> {
        req.validate()?;
        let user = load_user(self.store.as_ref(), user_id).await?;
        if let Some(limit) = UsageLimits::for_plan(user.is_premium).max_containers {
            let count = self.store.containers(user_id).await?.len();
            if count >= usize::try_from(limit).unwrap_or(usize::MAX) {
                return Err(ApiError::UsageLimitReached {
                    resource: "containers",
                    limit,
                });
            }
        }

        let mut container = Container::new(user_id, req.name.trim().to_string(), req.capacity_ml);
        container.is_favorite = req.is_favorite;
        container.color = req.color;
        container.icon = req.icon;
        self.store.save_container(&container).await?;

        tracing::info!(%user_id, container_id = %container.id, capacity_ml = container.capacity_ml, "container created");
        Ok(container)
    }

    /// Edits a container.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown container and
    /// [`ApiError::Validation`] for invalid fields.
    pub async fn update(
        &self,
        user_id: UserId,
        id: Uuid,
        req: UpdateContainerRequest,
    ) -> Result<Container, ApiError> {
        req.validate()?;
        let mut container = self.get(user_id, id).await?;
        if let Some(name) = req.name {
            container.name = name.trim().to_string();
        }
        if let Some(capacity_ml) = req.capacity_ml {
            container.capacity_ml = capacity_ml;
        }
        if let Some(is_favorite) = req.is_favorite {
            container.is_favorite = is_favorite;
        }
        if let Some(color) = req.color {
            container.color = Some(color).filter(|c| !c.is_empty());
        }
        if let Some(icon) = req.icon {
            container.icon = Some(icon).filter(|i| !i.is_empty());
        }
        container.updated_at = Utc::now();
        self.store.save_container(&container).await?;
        tracing::info!(%user_id, container_id = %id, "container updated");
        Ok(container)
    }

    /// Deletes a container. Past consumptions keep their volumes but lose
    /// the container reference.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if it does not exist for this user.
    pub async fn delete(&self, user_id: UserId, id: Uuid) -> Result<(), ApiError> {
        if !self.store.delete_container(user_id, id).await? {
            return Err(ApiError::not_found("container", id));
        }
        tracing::info!(%user_id, container_id = %id, "container deleted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::User;
    use crate::persistence::MemoryStore;

    fn bottle(name: &str, capacity_ml: i32) -> CreateContainerRequest {
        CreateContainerRequest {
            name: name.into(),
            capacity_ml,
            is_favorite: false,
            color: None,
            icon: None,
        }
    }

    async fn setup() -> (Arc<MemoryStore>, ContainerService, UserId) {
        let memory = Arc::new(MemoryStore::new());
        let user = User::new("ana".into(), "ana@example.com".into(), "hash".into());
        let Ok(()) = memory.insert_user(&user).await else {
            panic!("insert failed");
        };
        let service = ContainerService::new(Arc::clone(&memory) as Arc<dyn Store>);
        (memory, service, user.id)
    }

    #[tokio::test]
    async fn free_plan_is_capped_at_three() {
        let (memory, service, user_id) = setup().await;
        for i in 0..3 {
            assert!(service.create(user_id, bottle(&format!("b{i}"), 500)).await.is_ok());
        }
        assert!(matches!(
            service.create(user_id, bottle("extra", 500)).await,
            Err(ApiError::UsageLimitReached { resource: "containers", limit: 3 })
        ));

        assert_eq!(memory.set_premium(user_id, true).await, Ok(true));
        assert!(service.create(user_id, bottle("extra", 500)).await.is_ok());
    }

    #[tokio::test]
    async fn capacity_and_name_are_validated() {
        let (_, service, user_id) = setup().await;
        for capacity in [0, 5001] {
            let Err(err) = service.create(user_id, bottle("cup", capacity)).await else {
                panic!("capacity {capacity} accepted");
            };
            assert_eq!(err.field(), Some("capacity_ml"));
        }
        let Err(err) = service.create(user_id, bottle("   ", 250)).await else {
            panic!("blank name accepted");
        };
        assert_eq!(err.field(), Some("name"));
    }

    #[tokio::test]
    async fn update_and_delete_are_owner_scoped() {
        let (_, service, user_id) = setup().await;
        let Ok(container) = service.create(user_id, bottle("Mug", 300)).await else {
            panic!("create failed");
        };
        let changes = UpdateContainerRequest {
            capacity_ml: Some(350),
            is_favorite: Some(true),
            ..UpdateContainerRequest::default()
        };
        let Ok(updated) = service.update(user_id, container.id, changes).await else {
            panic!("update failed");
        };
        assert_eq!(updated.capacity_ml, 350);
        assert!(updated.is_favorite);

        let stranger = UserId::new();
        assert!(matches!(
            service.delete(stranger, container.id).await,
            Err(ApiError::NotFound { .. })
        ));
        assert!(service.delete(user_id, container.id).await.is_ok());
        assert!(service.get(user_id, container.id).await.is_err());
    }
}
