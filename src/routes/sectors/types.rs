use chrono::NaiveDateTime;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::{required, required_text};
use crate::entity::{properties, sectors};
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize, ToSchema)]
pub struct SectorResponse {
    #[serde(rename = "ID_setor")]
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cultura")]
    pub crop_name: String,
    /// Minutes per irrigation run
    #[serde(rename = "duracao_irrigacao")]
    pub irrigation_duration: Option<i32>,
    #[serde(rename = "ultima_irrigacao")]
    pub last_irrigation: Option<NaiveDateTime>,
    #[serde(rename = "proxima_irrigacao")]
    pub next_irrigation: Option<NaiveDateTime>,
    #[serde(rename = "umidade_atual")]
    pub current_humidity: Option<f64>,
    #[serde(rename = "ID_propriedade_fk")]
    pub property_id: i32,
    #[serde(rename = "ID_zona_fk")]
    pub zone_id: Option<i32>,
    #[serde(rename = "propriedade_nome")]
    pub property_name: Option<String>,
}

impl SectorResponse {
    pub fn new(sector: sectors::Model, property: Option<properties::Model>) -> Self {
        Self {
            id: sector.id,
            name: sector.name,
            crop_name: sector.crop_name,
            irrigation_duration: sector.irrigation_duration,
            last_irrigation: sector.last_irrigation,
            next_irrigation: sector.next_irrigation,
            current_humidity: sector.current_humidity,
            property_id: sector.property_id,
            zone_id: sector.zone_id,
            property_name: property.map(|p| p.name),
        }
    }
}

/// Sector fields editable through CRUD. Irrigation times are set by the
/// scheduling endpoint only.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SectorPayload {
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "cultura")]
    pub crop_name: Option<String>,
    #[serde(rename = "duracao_irrigacao")]
    pub irrigation_duration: Option<i32>,
    #[serde(rename = "umidade_atual")]
    pub current_humidity: Option<f64>,
    #[serde(rename = "ID_propriedade_fk")]
    pub property_id: Option<i32>,
    #[serde(rename = "ID_zona_fk")]
    pub zone_id: Option<i32>,
}

impl SectorPayload {
    /// # Errors
    ///
    /// 400 when `nome`, `cultura` or the property is missing.
    pub fn into_new(self) -> AppResult<sectors::ActiveModel> {
        Ok(sectors::ActiveModel {
            name: Set(required_text(self.name)?),
            crop_name: Set(required_text(self.crop_name)?),
            irrigation_duration: Set(self.irrigation_duration.map(validate_duration).transpose()?),
            current_humidity: Set(self.current_humidity),
            property_id: Set(required(self.property_id)?),
            zone_id: Set(self.zone_id),
            ..Default::default()
        })
    }

    /// # Errors
    ///
    /// 400 when a present field is invalid.
    pub fn apply(self, row: &mut sectors::ActiveModel) -> AppResult<usize> {
        let mut changed = 0;
        if let Some(name) = self.name {
            row.name = Set(required_text(Some(name))?);
            changed += 1;
        }
        if let Some(crop_name) = self.crop_name {
            row.crop_name = Set(required_text(Some(crop_name))?);
            changed += 1;
        }
        if let Some(duration) = self.irrigation_duration {
            row.irrigation_duration = Set(Some(validate_duration(duration)?));
            changed += 1;
        }
        if let Some(humidity) = self.current_humidity {
            row.current_humidity = Set(Some(humidity));
            changed += 1;
        }
        if let Some(property_id) = self.property_id {
            row.property_id = Set(property_id);
            changed += 1;
        }
        if let Some(zone_id) = self.zone_id {
            row.zone_id = Set(Some(zone_id));
            changed += 1;
        }
        Ok(changed)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SchedulePayload {
    /// Minutes per irrigation run
    pub duracao_irrigacao: Option<i32>,
    /// Hours until the next run (default: 24)
    pub intervalo_horas: Option<i32>,
}

impl SchedulePayload {
    pub const DEFAULT_INTERVAL_HOURS: i32 = 24;

    /// Returns `(duration_minutes, interval_hours)`.
    ///
    /// # Errors
    ///
    /// 400 when the duration is missing or either value is not positive.
    pub fn validate(self) -> AppResult<(i32, i32)> {
        let duration = self.duracao_irrigacao.ok_or_else(|| {
            AppError::BadRequest("Duração da irrigação é obrigatória".to_string())
        })?;
        let interval = self
            .intervalo_horas
            .unwrap_or(Self::DEFAULT_INTERVAL_HOURS);

        if interval <= 0 {
            return Err(AppError::BadRequest(
                "intervalo_horas deve ser positivo".to_string(),
            ));
        }

        Ok((validate_duration(duration)?, interval))
    }
}

fn validate_duration(minutes: i32) -> AppResult<i32> {
    if minutes > 0 {
        Ok(minutes)
    } else {
        Err(AppError::BadRequest(
            "duracao_irrigacao deve ser positiva".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_defaults_to_daily() {
        let payload = SchedulePayload {
            duracao_irrigacao: Some(45),
            intervalo_horas: None,
        };
        assert_eq!(payload.validate().unwrap(), (45, 24));
    }

    #[test]
    fn schedule_requires_duration() {
        match SchedulePayload::default().validate() {
            Err(AppError::BadRequest(msg)) => {
                assert_eq!(msg, "Duração da irrigação é obrigatória");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn schedule_rejects_non_positive_values() {
        let payload = SchedulePayload {
            duracao_irrigacao: Some(30),
            intervalo_horas: Some(0),
        };
        assert!(payload.validate().is_err());

        let payload = SchedulePayload {
            duracao_irrigacao: Some(-5),
            intervalo_horas: Some(12),
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn sector_create_requires_crop() {
        let payload = SectorPayload {
            name: Some("Setor A".into()),
            property_id: Some(1),
            ..Default::default()
        };
        assert!(payload.into_new().is_err());
    }
}
