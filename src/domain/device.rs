use crate::domain::Id;
use crate::domain::warranty::{WarrantyStatus, warranty_status};
use crate::filter::{Searchable, fields};
use crate::validation::{Validate, ValidationError, end_after_start, required, required_some};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[allow(dead_code)]
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Device {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub company_id: Option<Id>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub warranty_end_date: Option<NaiveDate>,
}

impl Device {
    pub fn warranty_status(&self, today: NaiveDate) -> WarrantyStatus {
        warranty_status(self.warranty_end_date, today)
    }
}

impl Searchable for Device {
    fn search_fields(&self) -> Vec<&str> {
        fields([
            Some(self.name.as_str()),
            self.serial_number.as_deref(),
            self.model.as_deref(),
            self.company_name.as_deref(),
        ])
    }
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct DeviceForm {
    pub name: String,
    pub serial_number: String,
    pub company_id: Option<Id>,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub location: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_end_date: Option<NaiveDate>,
}

impl Validate for DeviceForm {
    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)?;
        required("serial_number", &self.serial_number)?;
        required_some("company_id", &self.company_id)?;

        if let (Some(purchased), Some(warranty_end)) = (self.purchase_date, self.warranty_end_date) {
            end_after_start(purchased, warranty_end)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn form() -> DeviceForm {
        DeviceForm {
            name: "ThinkPad T14".to_string(),
            serial_number: "PF-3X9".to_string(),
            company_id: Some(Id::Number(1)),
            purchase_date: NaiveDate::from_ymd_opt(2025, 1, 10),
            warranty_end_date: NaiveDate::from_ymd_opt(2028, 1, 10),
            ..DeviceForm::default()
        }
    }

    #[test]
    fn validate_accepts_a_complete_form() {
        assert_eq!(form().validate(), Ok(()));
    }

    #[test]
    fn validate_requires_a_company() {
        let form = DeviceForm { company_id: None, ..form() };

        assert_eq!(form.validate(), Err(ValidationError::Required { field: "company_id" }));
    }

    #[test]
    fn validate_rejects_a_warranty_ending_before_purchase() {
        let form = DeviceForm {
            warranty_end_date: NaiveDate::from_ymd_opt(2024, 1, 10),
            ..form()
        };

        assert_eq!(form.validate(), Err(ValidationError::EndNotAfterStart));
    }
}
