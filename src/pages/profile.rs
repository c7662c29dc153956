//! Signed-in profile: account details, trips, forecast, suggestions, and the
//! form for planning a new trip.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected route. Redirects to `/login` without a session; otherwise loads
//! everything through the profile API with the session's bearer token.
//!
//! ERROR HANDLING
//! ==============
//! Only a failed `/auth/me` aborts the load. Later sections degrade to empty
//! and the failure is logged or listed on the page. Trip submission reports
//! through the notification store, like registration.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use log::{debug, info, warn};

use crate::components::forecast_card::ForecastCard;
use crate::components::notice_banner::NoticeBanner;
#[cfg(feature = "csr")]
use crate::context::PlatformContext;
use crate::net::api::ProfileApi;
use crate::net::transport::Transport;
use crate::net::types::{Destination, Recommendation, UserProfile, WeatherForecast};
use crate::state::auth::AuthState;
use crate::state::notification::NotificationStore;
use crate::util::auth::install_unauth_redirect;
use crate::util::validation::validate_trip;

#[cfg_attr(not(feature = "csr"), allow(dead_code))]
const PAST_DESTINATIONS_FAILED: &str = "Error fetching past destinations";

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ProfileData {
    pub user: Option<UserProfile>,
    pub past: Vec<Destination>,
    pub current: Option<Destination>,
    pub forecast: Vec<WeatherForecast>,
    pub recommendation: Option<Recommendation>,
    pub errors: Vec<String>,
}

/// Fetch every profile section in dependency order: account, trips, then the
/// current trip's recommendation and forecast.
#[cfg_attr(not(feature = "csr"), allow(dead_code))]
pub(crate) async fn load_profile<T: Transport>(api: &ProfileApi<T>) -> ProfileData {
    let mut data = ProfileData::default();
    let user = match api.current_user().await {
        Ok(user) => user,
        Err(err) => {
            warn!("profile: current user failed: {err}");
            data.errors.push(err.user_message());
            return data;
        }
    };

    match api.past_destinations(user.user_id).await {
        Ok(past) => data.past = past,
        Err(err) => {
            warn!("profile: past destinations failed: {err}");
            data.errors.push(PAST_DESTINATIONS_FAILED.to_owned());
        }
    }

    match api.current_destination(user.user_id).await {
        Ok(current) => {
            match api.recommendations(&current).await {
                Ok(rec) => data.recommendation = Some(rec),
                Err(err) => warn!("profile: recommendation failed: {err}"),
            }
            match api.five_day_forecast(&current.location_name).await {
                Ok(rows) => data.forecast = rows,
                Err(err) => warn!("profile: forecast failed: {err}"),
            }
            data.current = Some(current);
        }
        Err(err) => debug!("profile: no current destination: {err}"),
    }

    data.user = Some(user);
    data
}

/// Validate and save a trip. The outcome lands on `notifications`; the saved
/// trip is returned so the page can show it as current.
#[cfg_attr(not(feature = "csr"), allow(dead_code))]
pub(crate) async fn plan_trip<T: Transport>(
    api: &ProfileApi<T>,
    notifications: &NotificationStore,
    location_name: &str,
    date: &str,
    days: &str,
) -> Option<Destination> {
    let trip = match validate_trip(location_name, date, days) {
        Ok(input) => Destination {
            location_name: input.location_name.to_owned(),
            date: input.date.to_owned(),
            days: input.days,
        },
        Err(message) => {
            notifications.set_error(message);
            return None;
        }
    };
    match api.submit_destination(&trip).await {
        Ok(message) => {
            info!("trip to {} saved", trip.location_name);
            notifications.set_success(message);
            Some(trip)
        }
        Err(err) => {
            warn!("profile: trip submission failed: {err}");
            notifications.set_error(err.user_message());
            None
        }
    }
}

fn trip_summary(destination: &Destination) -> String {
    match (destination.date.is_empty(), destination.days) {
        (true, _) => destination.location_name.clone(),
        (false, 0) => format!("{} from {}", destination.location_name, destination.date),
        (false, 1) => format!("{} from {} (1 day)", destination.location_name, destination.date),
        (false, days) => format!("{} from {} ({days} days)", destination.location_name, destination.date),
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    #[cfg(feature = "csr")]
    let ctx = expect_context::<PlatformContext>();
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    let data = RwSignal::new(ProfileData::default());
    let loading = RwSignal::new(true);
    let trip_location = RwSignal::new(String::new());
    let trip_date = RwSignal::new(String::new());
    let trip_days = RwSignal::new(String::new());
    let trip_busy = RwSignal::new(false);

    #[cfg(feature = "csr")]
    {
        if auth.get_untracked().is_logged_in() {
            let profile = ctx.profile.clone();
            leptos::task::spawn_local(async move {
                let loaded = load_profile(&profile).await;
                let _ = data.try_set(loaded);
                let _ = loading.try_set(false);
            });
        } else {
            loading.set(false);
        }
    }
    #[cfg(not(feature = "csr"))]
    loading.set(false);

    let on_plan_trip = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if trip_busy.get() {
            return;
        }
        trip_busy.set(true);

        #[cfg(feature = "csr")]
        {
            let profile = ctx.profile.clone();
            let notifications = ctx.notifications.clone();
            let (location_value, date_value, days_value) = (trip_location.get(), trip_date.get(), trip_days.get());
            leptos::task::spawn_local(async move {
                let saved = plan_trip(&profile, &notifications, &location_value, &date_value, &days_value).await;
                if let Some(trip) = saved {
                    let _ = data.try_update(|d| d.current = Some(trip));
                }
                let _ = trip_busy.try_set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        trip_busy.set(false);
    };

    view! {
        <div class="profile-page">
            <Show when=move || loading.get()>
                <p>"Loading..."</p>
            </Show>
            <For
                each=move || data.get().errors
                key=|message| message.clone()
                children=|message| view! { <p class="notice notice--error">{message}</p> }
            />
            {move || {
                data.get()
                    .user
                    .map(|user| {
                        view! {
                            <section class="profile-card">
                                <h2>{user.phone.clone()}</h2>
                                <p>"Email: " {user.email.clone().unwrap_or_default()}</p>
                            </section>
                        }
                    })
            }}
            <section class="profile-plan">
                <p class="profile-label">"PLAN A TRIP"</p>
                <NoticeBanner/>
                <form class="auth-form" on:submit=on_plan_trip>
                    <label for="location_name">"City Name:"</label>
                    <input
                        id="location_name"
                        type="text"
                        placeholder="Nairobi"
                        prop:value=move || trip_location.get()
                        on:input=move |ev| trip_location.set(event_target_value(&ev))
                    />
                    <label for="travel_date">"Travel Date:"</label>
                    <input
                        id="travel_date"
                        type="date"
                        prop:value=move || trip_date.get()
                        on:input=move |ev| trip_date.set(event_target_value(&ev))
                    />
                    <label for="days">"Number of days:"</label>
                    <input
                        id="days"
                        type="number"
                        min="1"
                        placeholder="2"
                        prop:value=move || trip_days.get()
                        on:input=move |ev| trip_days.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || trip_busy.get()>
                        "Enter"
                    </button>
                </form>
            </section>
            <section class="profile-trips">
                <p class="profile-label">"CURRENT DESTINATION"</p>
                <p>{move || data.get().current.as_ref().map(trip_summary).unwrap_or_default()}</p>
                <p class="profile-label">"PREVIOUS DESTINATIONS"</p>
                <ul>
                    <For
                        each=move || data.get().past
                        key=|trip| (trip.location_name.clone(), trip.date.clone())
                        children=|trip| view! { <li>{trip_summary(&trip)}</li> }
                    />
                </ul>
            </section>
            {move || {
                data.get()
                    .recommendation
                    .map(|rec| {
                        view! {
                            <section class="profile-recommendation">
                                <p class="profile-label">"WARDROBE SUGGESTION"</p>
                                <p>{rec.description.clone()}</p>
                                <p>{rec.suggestions.join(", ")}</p>
                            </section>
                        }
                    })
            }}
            <div class="forecast__grid">
                <For
                    each=move || data.get().forecast
                    key=|row| row.forecast_id
                    children=|row| view! { <ForecastCard forecast=row/> }
                />
            </div>
        </div>
    }
}
