//! Drink logging.
//!
//! Each consumption is evaluated against its beverage (effective hydration,
//! alcohol compensation), and the store rebuilds the affected day's goal in
//! the same write.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;
use validator::Validate;

use super::goal_service::{GoalService, resolve_range};
use super::{ensure_not_future, load_user};
use crate::api::dto::{
    CreateConsumptionRequest, TodayConsumptionsResponse, UpdateConsumptionRequest,
};
use crate::domain::{Beverage, Consumption, Container, PremiumFeature, User, UserId};
use crate::error::ApiError;
use crate::hydration::dates;
use crate::persistence::{GoalSync, Store};

/// Default listing window when no range is given, in days.
const DEFAULT_LIST_DAYS: u32 = 30;

/// Consumption CRUD with synchronous goal recomputation.
#[derive(Debug, Clone)]
pub struct ConsumptionService {
    store: Arc<dyn Store>,
    goals: Arc<GoalService>,
}

impl ConsumptionService {
    /// Creates a new `ConsumptionService`.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, goals: Arc<GoalService>) -> Self {
        Self { store, goals }
    }

    /// Logs a drink.
    ///
    /// The volume defaults to the container's capacity when omitted.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Validation`] for an inactive beverage, a missing volume,
    ///   an unknown container or a future timestamp.
    /// - [`ApiError::PremiumRequired`] for premium beverages on a free plan.
    /// - [`ApiError::NotFound`] for an unknown beverage.
    pub async fn create(
        &self,
        user_id: UserId,
        req: CreateConsumptionRequest,
    ) -> Result<Consumption, ApiError> {
        req.validate()?;
        let now = Utc::now();
        let consumed_at = req.consumed_at.unwrap_or(now);
        ensure_not_future("consumed_at", consumed_at, now)?;

        let user = load_user(self.store.as_ref(), user_id).await?;
        let beverage = self.usable_beverage(&user, req.beverage_id).await?;
        let container = match req.container_id {
            Some(id) => Some(self.owned_container(user_id, id).await?),
            None => None,
        };
        let volume_ml = req
            .volume_ml
            .or_else(|| container.as_ref().map(|c| c.capacity_ml))
            .ok_or_else(|| {
                ApiError::validation("volume_ml", "required when no container is given")
            })?;

        let consumption = Consumption::new(
            user_id,
            &beverage,
            container.map(|c| c.id),
            volume_ml,
            consumed_at,
        );
        let sync = GoalSync::for_days(user_id, &[consumption.day()]);
        self.store.save_consumption(&consumption, &sync).await?;

        tracing::info!(
            %user_id,
            consumption_id = %consumption.id,
            beverage = %beverage.slug,
            volume_ml,
            effective_ml = consumption.effective_ml,
            "consumption logged"
        );
        Ok(consumption)
    }

    /// Fetches one of the caller's consumptions.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if it does not exist for this user.
    pub async fn get(&self, user_id: UserId, id: Uuid) -> Result<Consumption, ApiError> {
        self.store
            .consumption(user_id, id)
            .await?
            .ok_or_else(|| ApiError::not_found("consumption", id))
    }

    /// Consumptions between `from` and `to` (inclusive), oldest first.
    ///
    /// Defaults to the last 30 days.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for inverted or overlong ranges.
    pub async fn list(
        &self,
        user_id: UserId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Consumption>, ApiError> {
        let range = resolve_range(from, to, dates::today(), DEFAULT_LIST_DAYS)?;
        Ok(self.store.consumptions_in(user_id, range.time_range()).await?)
    }

    /// Today's drinks with totals and the current goal.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown user.
    pub async fn today(&self, user_id: UserId) -> Result<TodayConsumptionsResponse, ApiError> {
        let goal = self.goals.today(user_id).await?;
        let consumptions = self
            .store
            .consumptions_in(user_id, dates::day_bounds(goal.date))
            .await?;

        let (total_volume_ml, total_effective_ml, total_compensation_water_ml) =
            consumptions.iter().fold((0_i32, 0_i32, 0_i32), |acc, c| {
                (
                    acc.0.saturating_add(c.volume_ml),
                    acc.1.saturating_add(c.effective_ml),
                    acc.2.saturating_add(c.compensation_water_ml.unwrap_or(0)),
                )
            });

        Ok(TodayConsumptionsResponse {
            date: goal.date,
            total_volume_ml,
            total_effective_ml,
            total_compensation_water_ml,
            goal,
            consumptions,
        })
    }

    /// Edits a consumption and recomputes the old and new days' goals.
    ///
    /// Changing the beverage applies the same plan checks as logging it.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::create`], plus
    /// [`ApiError::NotFound`] for an unknown consumption.
    pub async fn update(
        &self,
        user_id: UserId,
        id: Uuid,
        req: UpdateConsumptionRequest,
    ) -> Result<Consumption, ApiError> {
        req.validate()?;
        let now = Utc::now();
        if let Some(consumed_at) = req.consumed_at {
            ensure_not_future("consumed_at", consumed_at, now)?;
        }

        let user = load_user(self.store.as_ref(), user_id).await?;
        let mut consumption = self.get(user_id, id).await?;
        let old_day = consumption.day();

        let beverage = match req.beverage_id {
            Some(beverage_id) if beverage_id != consumption.beverage_id => {
                self.usable_beverage(&user, beverage_id).await?
            }
            _ => self
                .store
                .beverage(consumption.beverage_id)
                .await?
                .ok_or_else(|| ApiError::not_found("beverage", consumption.beverage_id))?,
        };
        if let Some(container_id) = req.container_id {
            let container = self.owned_container(user_id, container_id).await?;
            consumption.container_id = Some(container.id);
            if req.volume_ml.is_none() {
                consumption.volume_ml = container.capacity_ml;
            }
        }
        if let Some(volume_ml) = req.volume_ml {
            consumption.volume_ml = volume_ml;
        }
        if let Some(consumed_at) = req.consumed_at {
            consumption.consumed_at = consumed_at;
        }
        consumption.apply_beverage(&beverage);
        consumption.updated_at = now;

        let sync = GoalSync::for_days(user_id, &[old_day, consumption.day()]);
        self.store.save_consumption(&consumption, &sync).await?;

        tracing::info!(%user_id, consumption_id = %id, effective_ml = consumption.effective_ml, "consumption updated");
        Ok(consumption)
    }

    /// Deletes a consumption and recomputes its day's goal.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if it does not exist for this user.
    pub async fn delete(&self, user_id: UserId, id: Uuid) -> Result<(), ApiError> {
        let consumption = self.get(user_id, id).await?;
        let sync = GoalSync::for_days(user_id, &[consumption.day()]);
        if !self.store.delete_consumption(user_id, id, &sync).await? {
            return Err(ApiError::not_found("consumption", id));
        }
        tracing::info!(%user_id, consumption_id = %id, "consumption deleted");
        Ok(())
    }

    async fn usable_beverage(&self, user: &User, id: Uuid) -> Result<Beverage, ApiError> {
        let beverage = self
            .store
            .beverage(id)
            .await?
            .ok_or_else(|| ApiError::not_found("beverage", id))?;
        if !beverage.is_active {
            return Err(ApiError::validation("beverage_id", "beverage is not available"));
        }
        if beverage.is_premium && !user.is_premium {
            return Err(ApiError::PremiumRequired(
                PremiumFeature::PremiumBeverages.as_str(),
            ));
        }
        Ok(beverage)
    }

    async fn owned_container(&self, user_id: UserId, id: Uuid) -> Result<Container, ApiError> {
        self.store
            .container(user_id, id)
            .await?
            .ok_or_else(|| ApiError::validation("container_id", "unknown container"))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::domain::beverage::BEVERAGE_CATALOG;
    use crate::persistence::MemoryStore;

    struct Fixture {
        memory: Arc<MemoryStore>,
        store: Arc<dyn Store>,
        service: ConsumptionService,
        user_id: UserId,
    }

    async fn fixture() -> Fixture {
        let memory = Arc::new(MemoryStore::with_beverages(&BEVERAGE_CATALOG));
        let store: Arc<dyn Store> = Arc::clone(&memory) as Arc<dyn Store>;
        let user = User::new("ana".into(), "ana@example.com".into(), "hash".into());
        let Ok(()) = store.insert_user(&user).await else {
            panic!("insert failed");
        };
        let goals = Arc::new(GoalService::new(Arc::clone(&store)));
        Fixture {
            service: ConsumptionService::new(Arc::clone(&store), goals),
            memory,
            store,
            user_id: user.id,
        }
    }

    async fn beverage_id(f: &Fixture, slug: &str) -> Uuid {
        let Ok(all) = f.store.beverages(true).await else {
            panic!("beverages failed");
        };
        let Some(b) = all.into_iter().find(|b| b.slug == slug) else {
            panic!("unknown slug {slug}");
        };
        b.id
    }

    fn drink(beverage_id: Uuid, volume_ml: Option<i32>) -> CreateConsumptionRequest {
        CreateConsumptionRequest {
            beverage_id,
            container_id: None,
            volume_ml,
            consumed_at: None,
        }
    }

    #[tokio::test]
    async fn alcohol_reports_net_dehydration() {
        let f = fixture().await;
        let beer = beverage_id(&f, "beer").await;
        let Ok(c) = f.service.create(f.user_id, drink(beer, Some(330))).await else {
            panic!("create failed");
        };
        assert_eq!(c.effective_ml, 165);
        assert_eq!(c.net_dehydration_ml, Some(-165));
        assert_eq!(c.compensation_water_ml, Some(165));

        let water = beverage_id(&f, "water").await;
        let Ok(w) = f.service.create(f.user_id, drink(water, Some(500))).await else {
            panic!("create failed");
        };
        assert_eq!(w.net_dehydration_ml, None);
        assert_eq!(w.compensation_water_ml, None);

        let Ok(today) = f.service.today(f.user_id).await else {
            panic!("today failed");
        };
        assert_eq!(today.total_volume_ml, 830);
        assert_eq!(today.total_effective_ml, 665);
        assert_eq!(today.total_compensation_water_ml, 165);
        assert_eq!(today.goal.effective_ml, 665);
    }

    #[tokio::test]
    async fn premium_beverages_need_premium() {
        let f = fixture().await;
        let sports = beverage_id(&f, "sports_drink").await;
        assert!(matches!(
            f.service.create(f.user_id, drink(sports, Some(500))).await,
            Err(ApiError::PremiumRequired("premium_beverages"))
        ));

        assert_eq!(f.memory.set_premium(f.user_id, true).await, Ok(true));
        assert!(f.service.create(f.user_id, drink(sports, Some(500))).await.is_ok());
    }

    #[tokio::test]
    async fn inactive_beverage_is_a_validation_error() {
        let f = fixture().await;
        let soda = beverage_id(&f, "soda").await;
        assert!(f.memory.set_beverage_active(soda, false).await);
        let Err(err) = f.service.create(f.user_id, drink(soda, Some(250))).await else {
            panic!("inactive beverage accepted");
        };
        assert_eq!(err.field(), Some("beverage_id"));
    }

    #[tokio::test]
    async fn volume_defaults_to_container_capacity() {
        let f = fixture().await;
        let container = Container::new(f.user_id, "Bottle".into(), 750);
        let Ok(()) = f.store.save_container(&container).await else {
            panic!("save failed");
        };
        let water = beverage_id(&f, "water").await;

        let mut req = drink(water, None);
        req.container_id = Some(container.id);
        let Ok(c) = f.service.create(f.user_id, req).await else {
            panic!("create failed");
        };
        assert_eq!(c.volume_ml, 750);
        assert_eq!(c.container_id, Some(container.id));

        let Err(err) = f.service.create(f.user_id, drink(water, None)).await else {
            panic!("missing volume accepted");
        };
        assert_eq!(err.field(), Some("volume_ml"));
    }

    #[tokio::test]
    async fn goal_completes_and_reverts() {
        let f = fixture().await;
        let water = beverage_id(&f, "water").await;
        let Ok(c) = f.service.create(f.user_id, drink(water, Some(2000))).await else {
            panic!("create failed");
        };
        let Ok(goal) = f.service.goals.today(f.user_id).await else {
            panic!("today failed");
        };
        assert!(goal.completed);

        let Ok(()) = f.service.delete(f.user_id, c.id).await else {
            panic!("delete failed");
        };
        let Ok(goal) = f.service.goals.today(f.user_id).await else {
            panic!("today failed");
        };
        assert!(!goal.completed);
        assert_eq!(goal.effective_ml, 0);
    }

    #[tokio::test]
    async fn update_switches_beverage_and_rejects_future() {
        let f = fixture().await;
        let water = beverage_id(&f, "water").await;
        let wine = beverage_id(&f, "wine").await;
        let Ok(c) = f.service.create(f.user_id, drink(water, Some(200))).await else {
            panic!("create failed");
        };

        let changes = UpdateConsumptionRequest {
            beverage_id: Some(wine),
            ..UpdateConsumptionRequest::default()
        };
        let Ok(updated) = f.service.update(f.user_id, c.id, changes).await else {
            panic!("update failed");
        };
        assert_eq!(updated.effective_ml, 80);
        assert_eq!(updated.net_dehydration_ml, Some(-120));

        let changes = UpdateConsumptionRequest {
            consumed_at: Some(Utc::now() + Duration::hours(1)),
            ..UpdateConsumptionRequest::default()
        };
        let Err(err) = f.service.update(f.user_id, c.id, changes).await else {
            panic!("future timestamp accepted");
        };
        assert_eq!(err.field(), Some("consumed_at"));
    }
}
