//! OpenAPI document served at `/api-docs/openapi.json`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::handlers::{
    activity, auth, beverage, consumption, container, daily_goal, premium, profile, reminder,
    system,
};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated API description.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Hydration Tracker API",
        description = "Hydration goals adjusted for sweat loss, drink logging with beverage effectiveness, reminders and premium plan features."
    ),
    paths(
        system::health_handler,
        auth::register,
        auth::login,
        auth::refresh,
        auth::logout,
        auth::change_password,
        auth::check_username,
        auth::check_email,
        profile::get_profile,
        profile::update_profile,
        activity::create_activity,
        activity::list_activities,
        activity::today_activities,
        activity::day_summary,
        activity::get_activity,
        activity::update_activity,
        activity::delete_activity,
        beverage::list_beverages,
        beverage::get_beverage,
        consumption::create_consumption,
        consumption::list_consumptions,
        consumption::today_consumptions,
        consumption::get_consumption,
        consumption::update_consumption,
        consumption::delete_consumption,
        container::list_containers,
        container::create_container,
        container::get_container,
        container::update_container,
        container::delete_container,
        daily_goal::today_goal,
        daily_goal::goal_history,
        reminder::list_reminders,
        reminder::create_reminder,
        reminder::get_reminder,
        reminder::update_reminder,
        reminder::delete_reminder,
        premium::features,
        premium::limits,
        premium::stats,
    ),
    components(schemas(ErrorResponse, ErrorBody)),
    modifiers(&BearerAuth),
    tags(
        (name = "System", description = "Health"),
        (name = "Auth", description = "Accounts and tokens"),
        (name = "Profile", description = "Physiological profile and current goal"),
        (name = "Activities", description = "Physical activity and sweat loss"),
        (name = "Beverages", description = "Beverage catalog"),
        (name = "Consumptions", description = "Logged drinks"),
        (name = "Containers", description = "User-defined containers"),
        (name = "Daily goals", description = "Per-day targets and progress"),
        (name = "Reminders", description = "Drink reminders"),
        (name = "Premium", description = "Plan features, limits and statistics"),
    )
)]
pub struct ApiDoc;

/// Registers the `bearer` JWT security scheme referenced by protected paths.
#[derive(Debug)]
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_protected_and_public_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/health"));
        assert!(doc.paths.paths.contains_key("/api/v1/auth/register"));
        assert!(doc.paths.paths.contains_key("/api/v1/activities/{id}"));
        let has_bearer = doc
            .components
            .as_ref()
            .is_some_and(|c| c.security_schemes.contains_key("bearer"));
        assert!(has_bearer);
    }
}
