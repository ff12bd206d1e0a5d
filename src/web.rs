//! Web boundary: axum router and inline HTML pages
//!
//! Thin layer over the core: handlers render what the service returns and
//! map each error kind to a user-facing message. Nothing upstream-shaped
//! leaks to the user; unrecognized failures come out as a generic error
//! page.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::{Form, Router};
use axum::http::StatusCode;
use axum::response::{Html, Json, Redirect};
use axum::routing::get;
use chrono::Local;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::models::ForecastView;
use crate::query;
use crate::service::WeatherService;

/// Shared handler state: the service facade over the weather pipeline.
pub struct AppState {
    pub service: WeatherService,
}

#[derive(Deserialize)]
struct SearchForm {
    search: String,
}

#[derive(Serialize)]
struct WeatherResponse {
    location: String,
    forecast: ForecastView,
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(home).post(search))
        .route("/api/weather/{city}", get(api_weather))
        .route("/{city}", get(city_page))
        .layer(cors)
        .with_state(state)
}

/// Bind the listener and serve until shutdown.
pub async fn run(state: Arc<AppState>, port: u16) -> Result<()> {
    let app = router(state);
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{port}");
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

async fn home() -> Html<String> {
    Html(render_home(None))
}

async fn search(Form(form): Form<SearchForm>) -> Result<Redirect, Html<String>> {
    let city = form.search.trim();
    if city.is_empty() {
        return Err(Html(render_home(Some("Please enter a city name"))));
    }
    Ok(Redirect::to(&format!("/{}", urlencoding::encode(city))))
}

async fn city_page(State(state): State<Arc<AppState>>, Path(city): Path<String>) -> Html<String> {
    let city_name = query::capitalize_words(city.trim());
    match state.service.weather_for_city(&city_name).await {
        Ok((forecast, location)) => Html(render_city(&location, &forecast)),
        Err(err) => {
            tracing::error!("Weather lookup failed for '{city_name}': {err}");
            Html(render_error(&err.user_message(&city_name)))
        }
    }
}

async fn api_weather(
    State(state): State<Arc<AppState>>,
    Path(city): Path<String>,
) -> Result<Json<WeatherResponse>, (StatusCode, String)> {
    let city_name = query::capitalize_words(city.trim());
    match state.service.weather_for_city(&city_name).await {
        Ok((forecast, location)) => Ok(Json(WeatherResponse { location, forecast })),
        Err(err) => {
            let status = err
                .http_code()
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            Err((status, err.user_message(&city_name)))
        }
    }
}

fn render_page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n{body}\n</body>\n</html>\n"
    )
}

fn render_home(notice: Option<&str>) -> String {
    let notice = notice
        .map(|message| format!("<p class=\"notice\">{}</p>\n", escape_html(message)))
        .unwrap_or_default();
    let body = format!(
        "<h1>Weathercast</h1>\n{notice}\
         <form method=\"post\" action=\"/\">\n\
         <input name=\"search\" placeholder=\"City name\" autofocus>\n\
         <button type=\"submit\">Search</button>\n\
         </form>"
    );
    render_page("Weathercast", &body)
}

fn render_city(location: &str, forecast: &ForecastView) -> String {
    let today = Local::now();
    let current_date = today.format("%A, %B %d").to_string();

    let outlook: String = forecast
        .five_day
        .iter()
        .enumerate()
        .map(|(offset, day)| {
            let label = (today + chrono::Duration::days(offset as i64)).format("%a");
            format!(
                "<td><div>{label}</div><div>{}&deg;</div><div>{}</div></td>",
                day.temp,
                escape_html(&day.condition)
            )
        })
        .collect();

    let summary = forecast
        .summary
        .as_deref()
        .map(|text| format!("<p class=\"summary\">{}</p>\n", escape_html(text)))
        .unwrap_or_default();

    let location = escape_html(location);
    let body = format!(
        "<h1>{location}</h1>\n\
         <p>{current_date}</p>\n\
         {summary}\
         <div class=\"current\">\n\
         <p>{}&deg; {}</p>\n\
         <p>Feels like {}&deg; &middot; High {}&deg; &middot; Low {}&deg;</p>\n\
         <p>Wind {} m/s &middot; Humidity {}% &middot; UV {} &middot; Visibility {} km</p>\n\
         </div>\n\
         <table class=\"outlook\"><tr>{outlook}</tr></table>\n\
         <p><a href=\"/\">Search again</a></p>",
        forecast.current_temp,
        escape_html(&forecast.current_condition),
        forecast.feels_like,
        forecast.max_temp,
        forecast.min_temp,
        forecast.wind_speed,
        forecast.humidity,
        forecast.uvi,
        forecast.visibility_km,
    );
    render_page(&format!("Weather for {location}"), &body)
}

fn render_error(message: &str) -> String {
    let body = format!(
        "<h1>Something went wrong</h1>\n<p>{}</p>\n<p><a href=\"/\">Back to search</a></p>",
        escape_html(message)
    );
    render_page("Weathercast error", &body)
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
