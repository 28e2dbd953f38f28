use crate::domain::Id;
use crate::filter::{Searchable, fields};
use crate::validation::{Validate, ValidationError, at_least, email, end_after_start, required};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[allow(dead_code)]
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Company {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl Searchable for Company {
    fn search_fields(&self) -> Vec<&str> {
        fields([Some(self.name.as_str()), self.email.as_deref(), self.phone.as_deref()])
    }
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct CompanyForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl Validate for CompanyForm {
    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)?;
        required("email", &self.email)?;
        email("email", &self.email)
    }
}

#[allow(dead_code)]
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct User {
    pub id: Id,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        fields([Some(self.name.as_str()), Some(self.email.as_str()), self.role.as_deref()])
    }
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Validate for UserForm {
    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)?;
        required("email", &self.email)?;
        email("email", &self.email)?;
        required("role", &self.role)
    }
}

/// Spare part kept in stock for repairs.
#[allow(dead_code)]
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Part {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub part_number: Option<String>,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default)]
    pub unit_price: Option<f64>,
}

impl Searchable for Part {
    fn search_fields(&self) -> Vec<&str> {
        fields([Some(self.name.as_str()), self.part_number.as_deref()])
    }
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct PartForm {
    pub name: String,
    pub part_number: Option<String>,
    pub stock_quantity: i64,
    pub unit_price: Option<f64>,
}

impl Validate for PartForm {
    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)?;
        at_least("stock_quantity", self.stock_quantity, 0)
    }
}

/// Software license with a number of seats.
#[allow(dead_code)]
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct License {
    pub id: Id,
    pub product_name: String,
    #[serde(default)]
    pub license_key: Option<String>,
    #[serde(default)]
    pub seats: Option<i64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
}

impl Searchable for License {
    fn search_fields(&self) -> Vec<&str> {
        fields([Some(self.product_name.as_str()), self.license_key.as_deref()])
    }
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct LicenseForm {
    pub product_name: String,
    pub license_key: Option<String>,
    pub seats: i64,
    pub start_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
}

impl Validate for LicenseForm {
    fn validate(&self) -> Result<(), ValidationError> {
        required("product_name", &self.product_name)?;
        at_least("seats", self.seats, 1)?;
        if let (Some(start), Some(expiry)) = (self.start_date, self.expiry_date) {
            end_after_start(start, expiry)?;
        }
        Ok(())
    }
}
