//! REST endpoint handlers organized by resource.

pub mod activity;
pub mod auth;
pub mod beverage;
pub mod consumption;
pub mod container;
pub mod daily_goal;
pub mod premium;
pub mod profile;
pub mod reminder;
pub mod system;

use axum::{Router, middleware};

use crate::app_state::AppState;
use crate::auth::require_auth;

/// Composes all resource routes under `/api/v1`.
///
/// Everything except registration, login, refresh and the availability
/// checks sits behind [`require_auth`].
pub fn routes(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .merge(auth::protected_routes())
        .merge(profile::routes())
        .merge(activity::routes())
        .merge(beverage::routes())
        .merge(consumption::routes())
        .merge(container::routes())
        .merge(daily_goal::routes())
        .merge(reminder::routes())
        .merge(premium::routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new().merge(auth::public_routes()).merge(protected)
}
