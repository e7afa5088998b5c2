use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::{required, required_text};
use crate::entity::{properties, zones};
use crate::error::AppResult;

#[derive(Debug, Serialize, ToSchema)]
pub struct ZoneResponse {
    #[serde(rename = "ID_zona")]
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    pub hectares: f64,
    /// Accumulated water savings in litres
    #[serde(rename = "economia")]
    pub savings: f64,
    #[serde(rename = "eficiencia")]
    pub efficiency: Option<f64>,
    #[serde(rename = "ID_propriedade_fk")]
    pub property_id: i32,
    #[serde(rename = "propriedade_nome")]
    pub property_name: Option<String>,
}

impl ZoneResponse {
    pub fn new(zone: zones::Model, property: Option<properties::Model>) -> Self {
        Self {
            id: zone.id,
            name: zone.name,
            hectares: zone.area_hectares,
            savings: zone.savings,
            efficiency: zone.efficiency,
            property_id: zone.property_id,
            property_name: property.map(|p| p.name),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ZonePayload {
    #[serde(rename = "nome")]
    pub name: Option<String>,
    pub hectares: Option<f64>,
    #[serde(rename = "economia")]
    pub savings: Option<f64>,
    #[serde(rename = "eficiencia")]
    pub efficiency: Option<f64>,
    #[serde(rename = "ID_propriedade_fk")]
    pub property_id: Option<i32>,
}

impl ZonePayload {
    /// Area and savings default to zero.
    ///
    /// # Errors
    ///
    /// 400 when `nome` or the property is missing.
    pub fn into_new(self) -> AppResult<zones::ActiveModel> {
        Ok(zones::ActiveModel {
            name: Set(required_text(self.name)?),
            area_hectares: Set(self.hectares.unwrap_or(0.0)),
            savings: Set(self.savings.unwrap_or(0.0)),
            efficiency: Set(self.efficiency),
            property_id: Set(required(self.property_id)?),
            ..Default::default()
        })
    }

    /// # Errors
    ///
    /// 400 when `nome` is blank.
    pub fn apply(self, row: &mut zones::ActiveModel) -> AppResult<usize> {
        let mut changed = 0;
        if let Some(name) = self.name {
            row.name = Set(required_text(Some(name))?);
            changed += 1;
        }
        if let Some(hectares) = self.hectares {
            row.area_hectares = Set(hectares);
            changed += 1;
        }
        if let Some(savings) = self.savings {
            row.savings = Set(savings);
            changed += 1;
        }
        if let Some(efficiency) = self.efficiency {
            row.efficiency = Set(Some(efficiency));
            changed += 1;
        }
        if let Some(property_id) = self.property_id {
            row.property_id = Set(property_id);
            changed += 1;
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue;

    #[test]
    fn new_zone_defaults_numeric_fields() {
        let payload = ZonePayload {
            name: Some("Zona Norte".into()),
            property_id: Some(1),
            ..Default::default()
        };
        let row = payload.into_new().unwrap();
        assert_eq!(row.area_hectares, ActiveValue::Set(0.0));
        assert_eq!(row.savings, ActiveValue::Set(0.0));
        assert_eq!(row.efficiency, ActiveValue::Set(None));
    }

    #[test]
    fn blank_name_is_rejected() {
        let payload = ZonePayload {
            name: Some("  ".into()),
            property_id: Some(1),
            ..Default::default()
        };
        assert!(payload.into_new().is_err());
    }
}
