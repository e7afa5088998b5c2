//! Fixed values reported where the schema has no live source.
//!
//! Every constant here is a stand-in, not telemetry. Handlers that put one in
//! a response list the affected JSON fields in the `X-Placeholder-Fields`
//! header via [`flagged`].

use axum::{
    Json,
    http::{HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub const HEADER: HeaderName = HeaderName::from_static("x-placeholder-fields");

// Decision flow: no rain sensor and no per-decision duration column.
pub const IS_RAINING: bool = false;
pub const DECISION_DURATION_MIN: i64 = 30;

// Decision flow: values used when no measurement falls inside the window.
pub const DEFAULT_WATER_LEVEL: f64 = 70.0;
pub const DEFAULT_SOIL_MOISTURE: f64 = 60.0;
pub const DEFAULT_PH: f64 = 6.5;
pub const DEFAULT_TEMPERATURE: f64 = 25.0;
pub const DEFAULT_SUN_INTENSITY: f64 = 500.0;

// Sensor database statistics.
pub const SENSOR_ACCURACY: f64 = 98.7;
pub const STORAGE_USED_MB: i64 = 847;
pub const MEASUREMENTS_PER_DAY: i64 = 2880;
pub const SENSOR_ONLINE: &str = "100% Online";
pub const PH_SENSOR_STATUS: &str = "Calibrando";

// AI report cards: no history to compute a change against.
pub const CHANGE_LEARNING: &str = "+15%";
pub const CHANGE_EFFICIENCY: &str = "+1.8%";
pub const CHANGE_SAVINGS: &str = "+18.7%";
pub const CHANGE_ACCURACY: &str = "+4.2%";
pub const TREND_UP: &str = "up";

/// Improvement rows with no backing column: (metric, before, after, improvement).
pub const FIXED_IMPROVEMENTS: [(&str, &str, &str, &str); 3] = [
    ("Aproveitamento Solar", "N/A", "87%", "Novo"),
    ("Prevenção Chuva", "Manual", "100%", "Automático"),
    ("Controle Umidade", "±15%", "±3%", "+400%"),
];

// Irrigation page.
pub const DAILY_CONSUMPTION_L: i64 = 2450;

// Weather panel.
pub const WIND_SPEED: &str = "15 km/h";
pub const CONDITION: &str = "Parcialmente nublado";
pub const RAIN_CHANCE: &str = "20%";
pub const DELAY_SAVINGS: &str = "~500L";

/// Default AI model label for decisions without a linked crop.
pub const BASIC_AI_MODEL: &str = "Básico";

/// JSON response carrying the placeholder field list in its headers.
pub fn flagged<T: Serialize>(fields: &[&str], body: T) -> Response {
    let mut response = Json(body).into_response();
    if let Ok(value) = HeaderValue::from_str(&fields.join(",")) {
        response.headers_mut().insert(HEADER, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flagged_sets_header() {
        let response = flagged(&["sensorAccuracy", "storageUsed"], serde_json::json!({}));
        assert_eq!(
            response.headers().get(HEADER).unwrap(),
            "sensorAccuracy,storageUsed"
        );
    }
}
