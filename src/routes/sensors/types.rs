use chrono::NaiveDateTime;
use sea_orm::{ActiveValue::Set, FromQueryResult};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::common::{required, required_text};
use crate::entity::{SensorType, measurements, properties, sensors};
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize, ToSchema)]
pub struct SensorResponse {
    #[serde(rename = "ID_sensor")]
    pub id: i32,
    #[serde(rename = "tipo")]
    pub sensor_type: SensorType,
    #[serde(rename = "fabricante")]
    pub manufacturer: Option<String>,
    #[serde(rename = "ID_PropriedadeRural_fk")]
    pub property_id: i32,
    #[serde(rename = "propriedade_nome")]
    pub property_name: Option<String>,
}

impl SensorResponse {
    pub fn new(sensor: sensors::Model, property: Option<properties::Model>) -> Self {
        Self {
            id: sensor.id,
            sensor_type: sensor.sensor_type,
            manufacturer: sensor.manufacturer,
            property_id: sensor.property_id,
            property_name: property.map(|p| p.name),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SensorPayload {
    /// One of `Reservatorio`, `Umidade`, `pH`, `Temperatura`, `LuzSolar`
    #[serde(rename = "tipo")]
    pub sensor_type: Option<String>,
    #[serde(rename = "fabricante")]
    pub manufacturer: Option<String>,
    #[serde(rename = "ID_PropriedadeRural_fk")]
    pub property_id: Option<i32>,
}

impl SensorPayload {
    /// # Errors
    ///
    /// 400 when `tipo` or the property is missing, or `tipo` is unknown.
    pub fn into_new(self) -> AppResult<sensors::ActiveModel> {
        let sensor_type = parse_sensor_type(&required_text(self.sensor_type)?)?;
        let property_id = required(self.property_id)?;

        Ok(sensors::ActiveModel {
            sensor_type: Set(sensor_type),
            manufacturer: Set(self.manufacturer),
            property_id: Set(property_id),
            ..Default::default()
        })
    }

    /// # Errors
    ///
    /// 400 when `tipo` is unknown.
    pub fn apply(self, row: &mut sensors::ActiveModel) -> AppResult<usize> {
        let mut changed = 0;
        if let Some(label) = self.sensor_type {
            row.sensor_type = Set(parse_sensor_type(&label)?);
            changed += 1;
        }
        if let Some(manufacturer) = self.manufacturer {
            row.manufacturer = Set(Some(manufacturer));
            changed += 1;
        }
        if let Some(property_id) = self.property_id {
            row.property_id = Set(property_id);
            changed += 1;
        }
        Ok(changed)
    }
}

/// Parse a sensor type label.
///
/// # Errors
///
/// 400 listing the accepted labels.
pub fn parse_sensor_type(label: &str) -> AppResult<SensorType> {
    SensorType::from_label(label).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Tipo deve ser um dos: {}",
            SensorType::labels().join(", ")
        ))
    })
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct MeasurementsQuery {
    /// Page size, 1 to 1000 (default: 50)
    pub limit: Option<i64>,
    /// Rows to skip (default: 0)
    pub offset: Option<i64>,
}

impl MeasurementsQuery {
    pub const DEFAULT_LIMIT: i64 = 50;
    pub const MAX_LIMIT: i64 = 1000;

    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
            .unsigned_abs()
    }

    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset.unwrap_or(0).max(0).unsigned_abs()
    }
}

/// A measurement with its sensor's type and manufacturer.
#[derive(Debug, Serialize, ToSchema)]
pub struct MeasurementResponse {
    #[serde(rename = "ID_medicao")]
    pub id: i64,
    #[serde(rename = "data_hora")]
    pub taken_at: NaiveDateTime,
    #[serde(rename = "valor_medicao")]
    pub value: f64,
    #[serde(rename = "ID_sensor_fk")]
    pub sensor_id: i32,
    #[serde(rename = "ID_propriedade_fk")]
    pub property_id: i32,
    #[serde(rename = "sensor_tipo")]
    pub sensor_type: SensorType,
    #[serde(rename = "fabricante")]
    pub manufacturer: Option<String>,
}

impl MeasurementResponse {
    pub fn new(measurement: measurements::Model, sensor: &sensors::Model) -> Self {
        Self {
            id: measurement.id,
            taken_at: measurement.taken_at,
            value: measurement.value,
            sensor_id: measurement.sensor_id,
            property_id: measurement.property_id,
            sensor_type: sensor.sensor_type,
            manufacturer: sensor.manufacturer.clone(),
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub(super) struct RecentMeasurementRow {
    pub id: i64,
    pub taken_at: NaiveDateTime,
    pub value: f64,
    pub sensor_id: i32,
    pub property_id: i32,
    pub manufacturer: Option<String>,
    pub property_name: String,
}

/// A measurement from the last 24 hours with its sensor and property names.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecentMeasurementResponse {
    #[serde(rename = "ID_medicao")]
    pub id: i64,
    #[serde(rename = "data_hora")]
    pub taken_at: NaiveDateTime,
    #[serde(rename = "valor_medicao")]
    pub value: f64,
    #[serde(rename = "ID_sensor_fk")]
    pub sensor_id: i32,
    #[serde(rename = "ID_propriedade_fk")]
    pub property_id: i32,
    #[serde(rename = "fabricante")]
    pub manufacturer: Option<String>,
    #[serde(rename = "propriedade_nome")]
    pub property_name: String,
}

impl From<RecentMeasurementRow> for RecentMeasurementResponse {
    fn from(r: RecentMeasurementRow) -> Self {
        Self {
            id: r.id,
            taken_at: r.taken_at,
            value: r.value,
            sensor_id: r.sensor_id,
            property_id: r.property_id,
            manufacturer: r.manufacturer,
            property_name: r.property_name,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct MeasurementPayload {
    #[serde(rename = "ID_sensor_fk")]
    pub sensor_id: Option<i32>,
    #[serde(rename = "ID_propriedade_fk")]
    pub property_id: Option<i32>,
    #[serde(rename = "valor_medicao")]
    pub value: Option<f64>,
}

#[derive(Debug, Serialize, FromQueryResult, ToSchema)]
pub struct SensorTypeCount {
    pub tipo: String,
    pub quantidade: i64,
}

#[derive(Debug, Serialize, FromQueryResult, ToSchema)]
pub struct SensorTypeAverage {
    pub tipo: String,
    pub valor_medio: f64,
    pub ultima_medicao: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SensorSummaryResponse {
    pub sensores_por_tipo: Vec<SensorTypeCount>,
    pub ultimas_medicoes: Vec<SensorTypeAverage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_bounds_are_clamped() {
        let query = MeasurementsQuery {
            limit: None,
            offset: None,
        };
        assert_eq!(query.limit(), 50);
        assert_eq!(query.offset(), 0);

        let query = MeasurementsQuery {
            limit: Some(0),
            offset: Some(-5),
        };
        assert_eq!(query.limit(), 1);
        assert_eq!(query.offset(), 0);

        let query = MeasurementsQuery {
            limit: Some(50_000),
            offset: None,
        };
        assert_eq!(query.limit(), 1000);
    }

    #[test]
    fn unknown_sensor_type_lists_labels() {
        match parse_sensor_type("Vento") {
            Err(AppError::BadRequest(msg)) => {
                assert!(msg.contains("Reservatorio"));
                assert!(msg.contains("LuzSolar"));
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(parse_sensor_type("pH").unwrap(), SensorType::Ph);
    }

    #[test]
    fn sensor_create_requires_type_and_property() {
        let payload = SensorPayload {
            sensor_type: Some("Umidade".into()),
            ..Default::default()
        };
        assert!(payload.into_new().is_err());
    }
}
