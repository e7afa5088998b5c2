use chrono::NaiveDate;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::{required, required_text};
use crate::entity::farmers;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize, ToSchema)]
pub struct FarmerResponse {
    #[serde(rename = "ID_agricultor")]
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "CPF")]
    pub tax_id: String,
    #[serde(rename = "data_nascimento")]
    pub birth_date: NaiveDate,
    #[serde(rename = "telefones_de_conato")]
    pub phones: String,
}

impl From<farmers::Model> for FarmerResponse {
    fn from(f: farmers::Model) -> Self {
        Self {
            id: f.id,
            name: f.name,
            tax_id: f.tax_id,
            birth_date: f.birth_date,
            phones: f.phones,
        }
    }
}

/// Farmer fields accepted on create (all required) and update (any subset).
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct FarmerPayload {
    #[serde(rename = "nome")]
    pub name: Option<String>,
    /// 11 digits, punctuation optional
    #[serde(rename = "CPF")]
    pub tax_id: Option<String>,
    #[serde(rename = "data_nascimento")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "telefones_de_conato")]
    pub phones: Option<String>,
}

impl FarmerPayload {
    /// Build the row to insert.
    ///
    /// # Errors
    ///
    /// 400 when a field is missing or invalid.
    pub fn into_new(self) -> AppResult<farmers::ActiveModel> {
        let name = required_text(self.name)?;
        let tax_id = validate_tax_id(required_text(self.tax_id)?)?;
        let birth_date = required(self.birth_date)?;
        let phones = required_text(self.phones)?;

        Ok(farmers::ActiveModel {
            name: Set(name),
            tax_id: Set(tax_id),
            birth_date: Set(birth_date),
            phones: Set(phones),
            ..Default::default()
        })
    }

    /// Copy the present fields onto `row`, returning how many were set.
    ///
    /// # Errors
    ///
    /// 400 when a present field is invalid.
    pub fn apply(self, row: &mut farmers::ActiveModel) -> AppResult<usize> {
        let mut changed = 0;
        if let Some(name) = self.name {
            row.name = Set(required_text(Some(name))?);
            changed += 1;
        }
        if let Some(tax_id) = self.tax_id {
            row.tax_id = Set(validate_tax_id(tax_id)?);
            changed += 1;
        }
        if let Some(birth_date) = self.birth_date {
            row.birth_date = Set(birth_date);
            changed += 1;
        }
        if let Some(phones) = self.phones {
            row.phones = Set(required_text(Some(phones))?);
            changed += 1;
        }
        Ok(changed)
    }
}

/// Accepts `12345678901` or `123.456.789-01`; stores the value as sent.
fn validate_tax_id(raw: String) -> AppResult<String> {
    let digits = raw.chars().filter(char::is_ascii_digit).count();
    let only_allowed = raw
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == '-');

    if digits == 11 && only_allowed {
        Ok(raw)
    } else {
        Err(AppError::BadRequest("CPF inválido".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tax_id_accepts_plain_and_punctuated() {
        assert!(validate_tax_id("12345678901".into()).is_ok());
        assert!(validate_tax_id("123.456.789-01".into()).is_ok());
        assert!(validate_tax_id("1234567890".into()).is_err());
        assert!(validate_tax_id("123.456.789/01".into()).is_err());
    }

    #[test]
    fn create_requires_every_field() {
        let payload = FarmerPayload {
            name: Some("Ana".into()),
            tax_id: None,
            birth_date: NaiveDate::from_ymd_opt(1980, 5, 1),
            phones: Some("(11) 99999-0000".into()),
        };
        assert!(matches!(payload.into_new(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn update_counts_present_fields() {
        let mut row = farmers::ActiveModel::default();
        let payload = FarmerPayload {
            name: Some("Ana".into()),
            phones: Some("(11) 99999-0000".into()),
            ..Default::default()
        };
        assert_eq!(payload.apply(&mut row).unwrap(), 2);

        let mut row = farmers::ActiveModel::default();
        assert_eq!(FarmerPayload::default().apply(&mut row).unwrap(), 0);
    }
}
