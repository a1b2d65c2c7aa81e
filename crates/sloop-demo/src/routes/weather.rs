//! Weather forecast routes: `/api/v1/weatherforecast/*`

use std::sync::Arc;

use axum::extract::Path;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{Days, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use sloop_server::error::AppError;

use crate::openapi::ErrorResponse;
use crate::state::DemoState;

const SUMMARIES: [&str; 10] = [
    "Freezing", "Bracing", "Chilly", "Cool", "Mild", "Warm", "Balmy", "Hot", "Sweltering",
    "Scorching",
];

/// Longest forecast a client may ask for.
const MAX_DAYS: u32 = 365;

/// Build the `/api/v1/weatherforecast` router.
pub fn router() -> Router<Arc<DemoState>> {
    Router::new()
        .route("/", get(five_day_forecast))
        .route("/{days}", get(forecast_for_days))
}

/// One day of forecast.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherForecast {
    pub date: NaiveDate,
    #[schema(example = 21)]
    pub temperature_c: i32,
    #[schema(example = 69)]
    pub temperature_f: i32,
    #[schema(value_type = String, example = "Mild")]
    pub summary: &'static str,
}

/// Fahrenheit as the sample computes it: truncating `c / 0.5556`.
#[allow(clippy::cast_possible_truncation)]
fn fahrenheit(celsius: i32) -> i32 {
    32_i32.saturating_add((f64::from(celsius) / 0.5556) as i32)
}

fn forecast(today: NaiveDate, days: u32) -> Vec<WeatherForecast> {
    (1..=days)
        .map(|offset| {
            let temperature_c = fastrand::i32(-20..55);
            WeatherForecast {
                date: today
                    .checked_add_days(Days::new(u64::from(offset)))
                    .unwrap_or(today),
                temperature_c,
                temperature_f: fahrenheit(temperature_c),
                summary: SUMMARIES[fastrand::usize(..SUMMARIES.len())],
            }
        })
        .collect()
}

/// Forecast for the next five days.
#[utoipa::path(
    get,
    path = "/api/v1/weatherforecast",
    tag = "Weather",
    operation_id = "getWeatherForecast",
    summary = "Get weather forecast",
    description = "Returns weather forecast for the next 5 days",
    responses((status = 200, description = "Daily forecasts", body = [WeatherForecast]))
)]
pub(crate) async fn five_day_forecast() -> Json<Vec<WeatherForecast>> {
    Json(forecast(Utc::now().date_naive(), 5))
}

/// Forecast for the next `days` days.
#[utoipa::path(
    get,
    path = "/api/v1/weatherforecast/{days}",
    tag = "Weather",
    operation_id = "getWeatherForecastForDays",
    summary = "Get weather forecast for specific days",
    description = "Returns weather forecast for specified number of days",
    params(("days" = u32, Path, description = "Number of days to forecast (1-365)")),
    responses(
        (status = 200, description = "Daily forecasts", body = [WeatherForecast]),
        (status = 400, description = "Day count out of range", body = ErrorResponse)
    )
)]
pub(crate) async fn forecast_for_days(
    Path(days): Path<u32>,
) -> Result<Json<Vec<WeatherForecast>>, AppError> {
    if days == 0 || days > MAX_DAYS {
        return Err(AppError::BadRequest(format!(
            "days must be between 1 and {MAX_DAYS}"
        )));
    }
    Ok(Json(forecast(Utc::now().date_naive(), days)))
}
