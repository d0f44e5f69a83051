//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::auth::TokenIssuer;
use crate::config::ServiceConfig;
use crate::persistence::Store;
use crate::service::{
    ActivityService, AuthService, BeverageService, ConsumptionService, ContainerService,
    GoalService, PremiumService, ProfileService, ReminderService,
};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Backing store, used directly by the health check.
    pub store: Arc<dyn Store>,
    /// Registration, login and token checks.
    pub auth_service: Arc<AuthService>,
    /// Profile reads and updates.
    pub profile_service: Arc<ProfileService>,
    /// Daily goal computation and history.
    pub goal_service: Arc<GoalService>,
    /// Activity logging.
    pub activity_service: Arc<ActivityService>,
    /// Beverage catalog.
    pub beverage_service: Arc<BeverageService>,
    /// Drink logging.
    pub consumption_service: Arc<ConsumptionService>,
    /// User containers.
    pub container_service: Arc<ContainerService>,
    /// Reminders.
    pub reminder_service: Arc<ReminderService>,
    /// Plan features, limits and statistics.
    pub premium_service: Arc<PremiumService>,
}

impl AppState {
    /// Wires every service on top of `store`.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: &ServiceConfig) -> Self {
        let issuer = TokenIssuer::new(
            config.jwt_secret.as_bytes(),
            config.access_token_ttl_secs,
            config.refresh_token_ttl_secs,
        );
        let goal_service = Arc::new(GoalService::new(Arc::clone(&store)));

        Self {
            auth_service: Arc::new(AuthService::new(Arc::clone(&store), issuer)),
            profile_service: Arc::new(ProfileService::new(
                Arc::clone(&store),
                Arc::clone(&goal_service),
            )),
            activity_service: Arc::new(ActivityService::new(Arc::clone(&store))),
            beverage_service: Arc::new(BeverageService::new(Arc::clone(&store))),
            consumption_service: Arc::new(ConsumptionService::new(
                Arc::clone(&store),
                Arc::clone(&goal_service),
            )),
            container_service: Arc::new(ContainerService::new(Arc::clone(&store))),
            reminder_service: Arc::new(ReminderService::new(Arc::clone(&store))),
            premium_service: Arc::new(PremiumService::new(Arc::clone(&store))),
            goal_service,
            store,
        }
    }
}
