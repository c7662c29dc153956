use super::*;

#[test]
fn user_profile_tolerates_missing_optionals() {
    let profile: UserProfile = serde_json::from_value(serde_json::json!({
        "user_id": 7,
        "phone": "555-0100"
    }))
    .unwrap();
    assert_eq!(profile.user_id, 7);
    assert_eq!(profile.email, None);
    assert_eq!(profile.gender, None);
}

#[test]
fn forecast_decimals_accept_numbers_strings_and_null() {
    let forecast: WeatherForecast = serde_json::from_value(serde_json::json!({
        "forecast_id": 1,
        "location_id": 2,
        "date_time": "2024-01-01T00:00:00",
        "start_time": "2024-01-01T00:00:00",
        "end_time": "2024-01-01T03:00:00",
        "temperature": "21.50",
        "humidity": 40,
        "wind_speed": null
    }))
    .unwrap();
    assert_eq!(forecast.temperature, Some(21.5));
    assert_eq!(forecast.humidity, Some(40.0));
    assert_eq!(forecast.wind_speed, None);
    assert_eq!(forecast.precipitation_probability, None);
}

#[test]
fn forecast_rejects_non_numeric_decimal() {
    let result = serde_json::from_value::<WeatherForecast>(serde_json::json!({
        "forecast_id": 1,
        "location_id": 2,
        "date_time": "x",
        "start_time": "x",
        "end_time": "x",
        "temperature": "warm"
    }));
    assert!(result.is_err());
}

#[test]
fn past_destinations_accept_legacy_name_field() {
    let past: PastDestinations = serde_json::from_value(serde_json::json!({
        "destinations": [
            { "name": "Lisbon" },
            { "location_name": "Oslo", "date": "2024-02-01", "days": 4 }
        ]
    }))
    .unwrap();
    assert_eq!(past.destinations[0].location_name, "Lisbon");
    assert_eq!(past.destinations[0].days, 0);
    assert_eq!(past.destinations[1].days, 4);
}

#[test]
fn recommendation_defaults_collections() {
    let rec: Recommendation = serde_json::from_value(serde_json::json!({
        "description": "Mild and dry"
    }))
    .unwrap();
    assert!(rec.suggestions.is_empty());
    assert!(rec.weather_descriptions.is_empty());
}
