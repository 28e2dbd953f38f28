use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::domain::Id;
use crate::domain::accessory::{Accessory, AccessoryForm};
use crate::domain::amc_contract::{AmcContract, AmcContractForm};
use crate::domain::device::{Device, DeviceForm};
use crate::domain::directory::{Company, CompanyForm, License, LicenseForm, Part, PartForm, User, UserForm};
use crate::filter::{Searchable, matches};
use crate::validation::Validate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::marker::PhantomData;
use tracing::{info, instrument};

/// A collection managed through the admin list/modal pages.
pub trait Resource {
    /// Path below `/api/admin`, e.g. `companies`.
    const PATH: &'static str;
    /// Human readable plural, used in log lines.
    const LABEL: &'static str;

    type Item: DeserializeOwned + Searchable + Debug;
    type Form: Serialize + Validate + Debug;
}

/// Collections are sent either as a bare array or wrapped with paging
/// information.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Plain(Vec<T>),
    Paged { items: Vec<T> },
}

impl<T> ListResponse<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Plain(items) => items,
            ListResponse::Paged { items } => items,
        }
    }
}

pub struct ResourceClient<'a, R: Resource> {
    api: &'a ApiClient,
    resource: PhantomData<R>,
}

impl<'a, R: Resource> ResourceClient<'a, R> {
    pub fn new(api: &'a ApiClient) -> Self {
        ResourceClient {
            api,
            resource: PhantomData,
        }
    }

    fn collection_path(&self) -> String {
        format!("/api/admin/{}", R::PATH)
    }

    fn item_path(&self, id: &Id) -> String {
        format!("/api/admin/{}/{}", R::PATH, id)
    }

    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn list(&self) -> Result<Vec<R::Item>, ApiError> {
        info!("Retrieving {}...", R::LABEL);
        let items = self.api.get::<ListResponse<R::Item>>(&self.collection_path()).await?.into_items();
        info!("Retrieving {}... OK, {} found", R::LABEL, items.len());
        Ok(items)
    }

    /// Lists the collection and keeps the rows matching `query`.
    pub async fn search(&self, query: &str) -> Result<Vec<R::Item>, ApiError> {
        let mut items = self.list().await?;
        items.retain(|item| matches(item, query));
        Ok(items)
    }

    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn get(&self, id: &Id) -> Result<R::Item, ApiError> {
        self.api.get(&self.item_path(id)).await
    }

    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn create(&self, form: &R::Form) -> Result<R::Item, ApiError> {
        form.validate()?;
        let item = self.api.post(&self.collection_path(), form).await?;
        info!("🟢 Created {} entry", R::LABEL);
        Ok(item)
    }

    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn update(&self, id: &Id, form: &R::Form) -> Result<R::Item, ApiError> {
        form.validate()?;
        let item = self.api.put(&self.item_path(id), form).await?;
        info!("🟢 Updated {} entry '{}'", R::LABEL, id);
        Ok(item)
    }

    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn delete(&self, id: &Id) -> Result<(), ApiError> {
        self.api.delete(&self.item_path(id)).await?;
        info!("🟢 Deleted {} entry '{}'", R::LABEL, id);
        Ok(())
    }
}

macro_rules! resource {
    ($name:ident, $path:literal, $label:literal, $item:ty, $form:ty) => {
        pub struct $name;

        impl Resource for $name {
            const PATH: &'static str = $path;
            const LABEL: &'static str = $label;

            type Item = $item;
            type Form = $form;
        }
    };
}

resource!(Companies, "companies", "companies", Company, CompanyForm);
resource!(Devices, "devices", "devices", Device, DeviceForm);
resource!(Users, "users", "users", User, UserForm);
resource!(Accessories, "accessories", "accessories", Accessory, AccessoryForm);
resource!(AmcContracts, "amc-contracts", "AMC contracts", AmcContract, AmcContractForm);
resource!(Parts, "parts", "parts", Part, PartForm);
resource!(Licenses, "licenses", "licenses", License, LicenseForm);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::new_client;
    use crate::app_config::AppConfigBuilder;
    use crate::domain::accessory::AccessoryStatus;
    use crate::portal::Portal;
    use crate::validation::ValidationError;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_log::test;

    async fn client(server: &mockito::ServerGuard) -> ApiClient {
        let config = AppConfigBuilder::new().base_url(server.url()).build();
        new_client(&config, Portal::Admin, Some("admin-token")).unwrap()
    }

    #[test(tokio::test)]
    async fn list_accepts_paged_responses() -> Result<(), ApiError> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/admin/accessories")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("../../tests/resources/accessories_response.json"))
            .create_async()
            .await;

        let api = client(&server).await;
        let accessories = ResourceClient::<Accessories>::new(&api).list().await?;

        mock.assert_async().await;
        assert_eq!(accessories.len(), 3);
        assert_eq!(accessories[0].status, AccessoryStatus::Assigned);
        assert_eq!(accessories[0].employee_name.as_deref(), Some("Priya Nair"));
        Ok(())
    }

    #[test(tokio::test)]
    async fn search_filters_the_fetched_collection() -> Result<(), ApiError> {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/admin/accessories")
            .with_status(200)
            .with_body(include_str!("../../tests/resources/accessories_response.json"))
            .create_async()
            .await;

        let api = client(&server).await;
        let accessories = ResourceClient::<Accessories>::new(&api).search("PRIYA").await?;

        assert_eq!(accessories.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(), vec!["Wireless mouse"]);
        Ok(())
    }

    #[test(tokio::test)]
    async fn create_posts_the_form_with_the_derived_status() -> Result<(), ApiError> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/admin/accessories")
            .match_body(Matcher::PartialJson(json!({ "name": "Docking station", "employee_id": 12, "status": "assigned" })))
            .with_status(201)
            .with_body(r#"{"id": 40, "name": "Docking station", "status": "assigned", "employee_id": 12}"#)
            .create_async()
            .await;

        let api = client(&server).await;
        let mut form = AccessoryForm::new("Docking station".to_string());
        form.set_employee(Some(Id::Number(12)));

        let created = ResourceClient::<Accessories>::new(&api).create(&form).await?;

        mock.assert_async().await;
        assert_eq!(created.id, Id::Number(40));
        Ok(())
    }

    #[test(tokio::test)]
    async fn create_validates_before_sending() -> Result<(), ApiError> {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/api/admin/amc-contracts").expect(0).create_async().await;

        let api = client(&server).await;
        let form = AmcContractForm {
            contract_number: "AMC-1".to_string(),
            company_id: Some(Id::Number(1)),
            start_date: "2026-03-01".parse().unwrap(),
            end_date: "2026-03-01".parse().unwrap(),
            contract_value: None,
            visits_included: None,
            device_ids: vec![],
        };

        let result = ResourceClient::<AmcContracts>::new(&api).create(&form).await;

        mock.assert_async().await;
        assert!(matches!(result, Err(ApiError::Validation(ValidationError::EndNotAfterStart))));
        Ok(())
    }

    #[test(tokio::test)]
    async fn update_and_delete_address_the_item() -> Result<(), ApiError> {
        let mut server = mockito::Server::new_async().await;
        let put = server
            .mock("PUT", "/api/admin/companies/7")
            .with_status(200)
            .with_body(r#"{"id": 7, "name": "Acme Ltd", "email": "it@acme.io"}"#)
            .create_async()
            .await;
        let delete = server.mock("DELETE", "/api/admin/companies/7").with_status(204).create_async().await;

        let api = client(&server).await;
        let companies = ResourceClient::<Companies>::new(&api);
        let form = CompanyForm {
            name: "Acme Ltd".to_string(),
            email: "it@acme.io".to_string(),
            ..CompanyForm::default()
        };

        let updated = companies.update(&Id::Number(7), &form).await?;
        companies.delete(&Id::Number(7)).await?;

        put.assert_async().await;
        delete.assert_async().await;
        assert_eq!(updated.name, "Acme Ltd");
        Ok(())
    }
}
