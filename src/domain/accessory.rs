use crate::domain::Id;
use crate::filter::{Searchable, fields};
use crate::validation::{Validate, ValidationError, required};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[allow(dead_code)]
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Accessory {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub status: AccessoryStatus,
    #[serde(default)]
    pub employee_id: Option<Id>,
    #[serde(default)]
    pub employee_name: Option<String>,
}

impl Searchable for Accessory {
    fn search_fields(&self) -> Vec<&str> {
        fields([
            Some(self.name.as_str()),
            self.serial_number.as_deref(),
            self.employee_name.as_deref(),
        ])
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AccessoryStatus {
    #[default]
    Available,
    Assigned,
    UnderRepair,
    Retired,
}

impl Display for AccessoryStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AccessoryStatus::Available => "available",
            AccessoryStatus::Assigned => "assigned",
            AccessoryStatus::UnderRepair => "under repair",
            AccessoryStatus::Retired => "retired",
        };
        write!(f, "{}", label)
    }
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(from = "AccessoryFormFields")]
pub struct AccessoryForm {
    pub name: String,
    pub category: Option<String>,
    pub serial_number: Option<String>,
    employee_id: Option<Id>,
    status: AccessoryStatus,
}

/// Form as typed by a user; the status is derived from the employee
/// through [`AccessoryForm::set_employee`].
#[derive(Default, Deserialize)]
#[serde(default)]
struct AccessoryFormFields {
    name: String,
    category: Option<String>,
    serial_number: Option<String>,
    employee_id: Option<Id>,
    status: AccessoryStatus,
}

impl From<AccessoryFormFields> for AccessoryForm {
    fn from(fields: AccessoryFormFields) -> Self {
        let mut form = AccessoryForm {
            name: fields.name,
            category: fields.category,
            serial_number: fields.serial_number,
            employee_id: None,
            status: fields.status,
        };
        if fields.employee_id.is_some() {
            form.set_employee(fields.employee_id);
        }
        form
    }
}

impl AccessoryForm {
    pub fn new(name: String) -> Self {
        AccessoryForm {
            name,
            ..AccessoryForm::default()
        }
    }

    pub fn employee_id(&self) -> Option<&Id> {
        self.employee_id.as_ref()
    }

    pub fn status(&self) -> AccessoryStatus {
        self.status
    }

    /// Selecting an employee marks the accessory as assigned, clearing the
    /// selection makes it available again.
    pub fn set_employee(&mut self, employee_id: Option<Id>) {
        self.status = match (&employee_id, self.status) {
            (Some(_), _) => AccessoryStatus::Assigned,
            (None, AccessoryStatus::Assigned) => AccessoryStatus::Available,
            (None, status) => status,
        };
        self.employee_id = employee_id;
    }

    /// Statuses other than `assigned` cannot coexist with an employee.
    pub fn set_status(&mut self, status: AccessoryStatus) {
        if status != AccessoryStatus::Assigned {
            self.employee_id = None;
        }
        self.status = status;
    }
}

impl From<&Accessory> for AccessoryForm {
    fn from(accessory: &Accessory) -> Self {
        AccessoryForm {
            name: accessory.name.clone(),
            category: accessory.category.clone(),
            serial_number: accessory.serial_number.clone(),
            employee_id: accessory.employee_id.clone(),
            status: accessory.status,
        }
    }
}

impl Validate for AccessoryForm {
    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)?;
        if self.status == AccessoryStatus::Assigned && self.employee_id.is_none() {
            return Err(ValidationError::Required { field: "employee_id" });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn selecting_an_employee_assigns_the_accessory() {
        let mut form = AccessoryForm::new("USB-C dock".to_string());

        form.set_employee(Some(Id::Number(8)));

        assert_eq!(form.status(), AccessoryStatus::Assigned);
        assert_eq!(form.employee_id(), Some(&Id::Number(8)));
    }

    #[test]
    fn clearing_the_employee_makes_the_accessory_available() {
        let mut form = AccessoryForm::new("USB-C dock".to_string());
        form.set_employee(Some(Id::Number(8)));

        form.set_employee(None);

        assert_eq!(form.status(), AccessoryStatus::Available);
        assert_eq!(form.employee_id(), None);
    }

    #[test]
    fn clearing_the_employee_keeps_a_repair_status() {
        let mut form = AccessoryForm::new("Headset".to_string());
        form.set_status(AccessoryStatus::UnderRepair);

        form.set_employee(None);

        assert_eq!(form.status(), AccessoryStatus::UnderRepair);
    }

    #[test]
    fn retiring_drops_the_employee() {
        let mut form = AccessoryForm::new("Headset".to_string());
        form.set_employee(Some(Id::Number(2)));

        form.set_status(AccessoryStatus::Retired);

        assert_eq!(form.employee_id(), None);
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn deserializing_an_employee_assigns_the_accessory() {
        let form = serde_json::from_value::<AccessoryForm>(json!({ "name": "Dock", "employee_id": 12 })).unwrap();

        assert_eq!(form.status(), AccessoryStatus::Assigned);
        assert_eq!(form.employee_id(), Some(&Id::Number(12)));
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn deserializing_keeps_the_status_without_an_employee() {
        let form = serde_json::from_value::<AccessoryForm>(json!({ "name": "Headset", "status": "under_repair" })).unwrap();

        assert_eq!(form.status(), AccessoryStatus::UnderRepair);
        assert_eq!(form.employee_id(), None);
    }

    #[test]
    fn serializes_the_derived_status() {
        let mut form = AccessoryForm::new("Monitor".to_string());
        form.set_employee(Some(Id::Number(4)));

        assert_eq!(
            serde_json::to_value(&form).unwrap(),
            json!({
                "name": "Monitor",
                "category": null,
                "serial_number": null,
                "employee_id": 4,
                "status": "assigned"
            })
        );
    }
}
