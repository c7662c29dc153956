//! Landing page with a five-day forecast lookup.
//!
//! SYSTEM CONTEXT
//! ==============
//! Public route. The forecast search works without a session; a signed-in
//! user's token is attached anyway.

use leptos::prelude::*;

use crate::components::forecast_card::ForecastCard;
#[cfg(feature = "csr")]
use crate::context::PlatformContext;
use crate::net::types::WeatherForecast;

#[component]
pub fn HomePage() -> impl IntoView {
    #[cfg(feature = "csr")]
    let ctx = expect_context::<PlatformContext>();
    let city = RwSignal::new(String::new());
    let forecast = RwSignal::new(Vec::<WeatherForecast>::new());
    let status = RwSignal::new(String::new());

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let city_value = city.get().trim().to_owned();
        if city_value.is_empty() {
            status.set("Enter the name of a city.".to_owned());
            return;
        }
        status.set("Loading...".to_owned());

        #[cfg(feature = "csr")]
        {
            let profile = ctx.profile.clone();
            leptos::task::spawn_local(async move {
                match profile.five_day_forecast(&city_value).await {
                    Ok(rows) => {
                        let message = if rows.is_empty() { "No forecast available." } else { "" };
                        let _ = status.try_set(message.to_owned());
                        let _ = forecast.try_set(rows);
                    }
                    Err(err) => {
                        let _ = status.try_set(err.user_message());
                        let _ = forecast.try_set(Vec::new());
                    }
                }
            });
        }
    };

    view! {
        <section class="hero">
            <h1>"Planning a trip?"</h1>
            <p class="hero__lead">"Check out the weather conditions at your trip destinations!"</p>
        </section>
        <section class="forecast">
            <h4>"Enter Name Of A City"</h4>
            <form class="forecast__search" on:submit=on_search>
                <input
                    type="text"
                    placeholder="City"
                    prop:value=move || city.get()
                    on:input=move |ev| city.set(event_target_value(&ev))
                />
                <button type="submit">"Check Forecast"</button>
            </form>
            <Show when=move || !status.get().is_empty()>
                <p class="forecast__status">{move || status.get()}</p>
            </Show>
            <div class="forecast__grid">
                <For
                    each=move || forecast.get()
                    key=|row| row.forecast_id
                    children=|row| view! { <ForecastCard forecast=row/> }
                />
            </div>
        </section>
    }
}
