//! Card for one five-day forecast window.

#[cfg(test)]
#[path = "forecast_card_test.rs"]
mod forecast_card_test;

use leptos::prelude::*;

use crate::net::types::WeatherForecast;

/// `"21.5°C"`-style reading, or `"n/a"` when the server sent nothing.
pub(crate) fn format_reading(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "n/a".to_owned(), |v| format!("{}{unit}", (v * 10.0).round() / 10.0))
}

/// Calendar date part of an ISO-8601 timestamp.
pub(crate) fn forecast_day(date_time: &str) -> &str {
    date_time.split_once('T').map_or(date_time, |(day, _)| day)
}

#[component]
pub fn ForecastCard(forecast: WeatherForecast) -> impl IntoView {
    view! {
        <div class="forecast-card">
            <h3>{forecast_day(&forecast.date_time).to_owned()}</h3>
            <p>"Temperature: " {format_reading(forecast.temperature, "°C")}</p>
            <p>"Wind: " {format_reading(forecast.wind_speed, " m/s")}</p>
            <p>"Humidity: " {format_reading(forecast.humidity, "%")}</p>
            <p>"Precipitation: " {format_reading(forecast.precipitation_probability, "%")}</p>
        </div>
    }
}
