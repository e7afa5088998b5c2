//! Weather panel. Only temperature and humidity come from sensors; the rest
//! of the panel is fixed text.

use axum::{extract::State, response::Response};
use sea_orm::{ActiveEnum, EntityTrait, QueryOrder};
use serde::Serialize;
use utoipa::ToSchema;

use crate::common::{AppState, placeholders};
use crate::db;
use crate::entity::{SensorType, sectors};
use crate::error::{AppResult, QueryContext};

/// Soil humidity (percent) above which irrigation should wait.
pub const HUMIDITY_DELAY_THRESHOLD: f64 = 75.0;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    /// `N.N°C` or `N/A`
    pub temperature: String,
    /// `N.N%` or `N/A`
    pub humidity: String,
    pub wind_speed: String,
    pub condition: String,
    pub rain_chance: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Recommendation {
    pub sector: String,
    pub recommendation: String,
    pub reason: String,
    /// `delay` or `continue`
    pub action: String,
    pub savings: Option<String>,
}

impl Recommendation {
    #[must_use]
    pub fn for_sector(sector: String, humidity: Option<f64>) -> Self {
        if humidity.is_some_and(|h| h > HUMIDITY_DELAY_THRESHOLD) {
            Self {
                sector,
                recommendation: "Adiar irrigação".to_string(),
                reason: "Umidade do solo está alta".to_string(),
                action: "delay".to_string(),
                savings: Some(placeholders::DELAY_SAVINGS.to_string()),
            }
        } else {
            Self {
                sector,
                recommendation: "Irrigar normalmente".to_string(),
                reason: "Condições ideais para a cultura".to_string(),
                action: "continue".to_string(),
                savings: None,
            }
        }
    }
}

fn reading(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.1}{unit}"))
}

async fn last_hour_average(state: &AppState, sensor_type: SensorType) -> AppResult<Option<f64>> {
    db::fetch_f64(
        &*state.db,
        "SELECT CAST(AVG(m.valor_medicao) AS DOUBLE) AS value \
         FROM Medicao m JOIN Sensor s ON m.ID_sensor_fk = s.ID_sensor \
         WHERE s.tipo = ? AND m.data_hora >= NOW() - INTERVAL 1 HOUR",
        vec![sensor_type.to_value().into()],
    )
    .await
    .context("Erro ao buscar condições climáticas atuais")
}

/// Current conditions from the last hour of sensor readings
#[utoipa::path(
    get,
    path = "/api/weather/current",
    responses(
        (status = 200, description = "Conditions retrieved successfully", body = CurrentWeather),
    ),
    tag = "clima"
)]
pub async fn current(State(state): State<AppState>) -> AppResult<Response> {
    let temperature = last_hour_average(&state, SensorType::Temperature).await?;
    let humidity = last_hour_average(&state, SensorType::Humidity).await?;

    Ok(placeholders::flagged(
        &["windSpeed", "condition", "rainChance"],
        CurrentWeather {
            temperature: reading(temperature, "°C"),
            humidity: reading(humidity, "%"),
            wind_speed: placeholders::WIND_SPEED.to_string(),
            condition: placeholders::CONDITION.to_string(),
            rain_chance: placeholders::RAIN_CHANCE.to_string(),
        },
    ))
}

/// Irrigate-or-wait advice per sector based on soil humidity
#[utoipa::path(
    get,
    path = "/api/weather/recommendations",
    responses(
        (status = 200, description = "Recommendations retrieved successfully", body = Vec<Recommendation>),
    ),
    tag = "clima"
)]
pub async fn recommendations(State(state): State<AppState>) -> AppResult<Response> {
    let rows = sectors::Entity::find()
        .order_by_asc(sectors::Column::Id)
        .all(&*state.db)
        .await
        .context("Erro ao buscar recomendações de irrigação")?;

    let advice: Vec<Recommendation> = rows
        .into_iter()
        .map(|s| Recommendation::for_sector(s.name, s.current_humidity))
        .collect();

    Ok(placeholders::flagged(&["savings"], advice))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humid_sectors_wait() {
        let advice = Recommendation::for_sector("Setor A".into(), Some(80.0));
        assert_eq!(advice.action, "delay");
        assert_eq!(advice.savings.as_deref(), Some("~500L"));
    }

    #[test]
    fn dry_or_unknown_sectors_continue() {
        let advice = Recommendation::for_sector("Setor B".into(), Some(75.0));
        assert_eq!(advice.action, "continue");
        assert!(advice.savings.is_none());

        let advice = Recommendation::for_sector("Setor C".into(), None);
        assert_eq!(advice.action, "continue");
    }

    #[test]
    fn readings_fall_back_to_na() {
        assert_eq!(reading(Some(23.456), "°C"), "23.5°C");
        assert_eq!(reading(None, "%"), "N/A");
    }
}
