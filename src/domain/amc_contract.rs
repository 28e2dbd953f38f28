use crate::domain::Id;
use crate::filter::{Searchable, fields};
use crate::validation::{Validate, ValidationError, at_least, end_after_start, required, required_some};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Annual maintenance contract covering a set of devices.
#[allow(dead_code)]
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct AmcContract {
    pub id: Id,
    pub contract_number: String,
    #[serde(default)]
    pub company_id: Option<Id>,
    #[serde(default)]
    pub company_name: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub contract_value: Option<f64>,
    #[serde(default)]
    pub visits_included: Option<u32>,
    #[serde(default)]
    pub device_ids: Vec<Id>,
}

impl AmcContract {
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

impl Searchable for AmcContract {
    fn search_fields(&self) -> Vec<&str> {
        fields([Some(self.contract_number.as_str()), self.company_name.as_deref()])
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct AmcContractForm {
    pub contract_number: String,
    pub company_id: Option<Id>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub contract_value: Option<f64>,
    pub visits_included: Option<u32>,
    #[serde(default)]
    pub device_ids: Vec<Id>,
}

impl Validate for AmcContractForm {
    fn validate(&self) -> Result<(), ValidationError> {
        required("contract_number", &self.contract_number)?;
        required_some("company_id", &self.company_id)?;
        end_after_start(self.start_date, self.end_date)?;

        if let Some(visits) = self.visits_included {
            at_least("visits_included", i64::from(visits), 1)?;
        }
        Ok(())
    }
}
