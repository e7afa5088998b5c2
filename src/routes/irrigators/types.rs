use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::{required, required_text};
use crate::entity::{IrrigatorStatus, irrigators, zones};
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize, ToSchema)]
pub struct IrrigatorResponse {
    #[serde(rename = "ID_irrigador")]
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "status_")]
    pub status: IrrigatorStatus,
    #[serde(rename = "eficiencia_hidrica")]
    pub water_efficiency: Option<f64>,
    /// Battery charge in percent
    #[serde(rename = "bateria")]
    pub battery: Option<i32>,
    #[serde(rename = "economia")]
    pub savings: Option<f64>,
    #[serde(rename = "ID_zona_fk")]
    pub zone_id: i32,
    #[serde(rename = "zona_nome")]
    pub zone_name: Option<String>,
}

impl IrrigatorResponse {
    pub fn new(irrigator: irrigators::Model, zone: Option<zones::Model>) -> Self {
        Self {
            id: irrigator.id,
            name: irrigator.name,
            status: irrigator.status,
            water_efficiency: irrigator.water_efficiency,
            battery: irrigator.battery,
            savings: irrigator.savings,
            zone_id: irrigator.zone_id,
            zone_name: zone.map(|z| z.name),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct IrrigatorPayload {
    #[serde(rename = "nome")]
    pub name: Option<String>,
    /// `Ativo`, `Ocioso` or `Manutenção`
    #[serde(rename = "status_")]
    pub status: Option<String>,
    #[serde(rename = "eficiencia_hidrica")]
    pub water_efficiency: Option<f64>,
    #[serde(rename = "bateria")]
    pub battery: Option<i32>,
    #[serde(rename = "economia")]
    pub savings: Option<f64>,
    #[serde(rename = "ID_zona_fk")]
    pub zone_id: Option<i32>,
}

impl IrrigatorPayload {
    /// New irrigators start `Ocioso` unless a status is given.
    ///
    /// # Errors
    ///
    /// 400 when `nome` or the zone is missing, or a field is out of range.
    pub fn into_new(self) -> AppResult<irrigators::ActiveModel> {
        let status = match self.status {
            Some(label) => parse_status(&label)?,
            None => IrrigatorStatus::Idle,
        };

        Ok(irrigators::ActiveModel {
            name: Set(required_text(self.name)?),
            status: Set(status),
            water_efficiency: Set(self.water_efficiency),
            battery: Set(self.battery.map(validate_battery).transpose()?),
            savings: Set(self.savings),
            zone_id: Set(required(self.zone_id)?),
            ..Default::default()
        })
    }

    /// # Errors
    ///
    /// 400 when a present field is invalid.
    pub fn apply(self, row: &mut irrigators::ActiveModel) -> AppResult<usize> {
        let mut changed = 0;
        if let Some(name) = self.name {
            row.name = Set(required_text(Some(name))?);
            changed += 1;
        }
        if let Some(label) = self.status {
            row.status = Set(parse_status(&label)?);
            changed += 1;
        }
        if let Some(efficiency) = self.water_efficiency {
            row.water_efficiency = Set(Some(efficiency));
            changed += 1;
        }
        if let Some(battery) = self.battery {
            row.battery = Set(Some(validate_battery(battery)?));
            changed += 1;
        }
        if let Some(savings) = self.savings {
            row.savings = Set(Some(savings));
            changed += 1;
        }
        if let Some(zone_id) = self.zone_id {
            row.zone_id = Set(zone_id);
            changed += 1;
        }
        Ok(changed)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StatusPayload {
    #[serde(rename = "status_")]
    pub status: Option<String>,
}

/// Parse an irrigator status label.
///
/// # Errors
///
/// 400 listing the accepted labels.
pub fn parse_status(label: &str) -> AppResult<IrrigatorStatus> {
    IrrigatorStatus::from_label(label).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Status deve ser um dos: {}",
            IrrigatorStatus::labels().join(", ")
        ))
    })
}

fn validate_battery(battery: i32) -> AppResult<i32> {
    if (0..=100).contains(&battery) {
        Ok(battery)
    } else {
        Err(AppError::BadRequest(
            "bateria deve estar entre 0 e 100".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue;

    #[test]
    fn rejected_status_lists_valid_ones() {
        match parse_status("Quebrado") {
            Err(AppError::BadRequest(msg)) => {
                assert_eq!(msg, "Status deve ser um dos: Ativo, Ocioso, Manutenção");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn new_irrigator_defaults_to_idle() {
        let payload = IrrigatorPayload {
            name: Some("Pivô 1".into()),
            zone_id: Some(2),
            ..Default::default()
        };
        let row = payload.into_new().unwrap();
        assert_eq!(row.status, ActiveValue::Set(IrrigatorStatus::Idle));
    }

    #[test]
    fn battery_is_a_percentage() {
        let payload = IrrigatorPayload {
            battery: Some(140),
            ..Default::default()
        };
        let mut row = irrigators::ActiveModel::default();
        assert!(payload.apply(&mut row).is_err());
    }
}
