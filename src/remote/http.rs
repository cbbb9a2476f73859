//! HTTP client for the POS backend.
//!
//! Implements all four collaborator traits against the JSON API described by
//! the backend: `GET items`, `GET customizations`, `POST promos/validate`,
//! `POST customers`, `GET customers/membership/{id}`, `POST transactions`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::catalog::{CatalogItem, CustomizationDefinition};
use crate::remote::records::{
    CustomerRecord, NewCustomer, PersistedTransaction, PromoValidateRequest, PromoValidation,
    TransactionRequest,
};
use crate::remote::{CatalogApi, CustomerApi, PromoApi, RemoteError, TransactionApi};

/// Reqwest-backed client for the POS backend.
#[derive(Debug, Clone)]
pub struct HttpPosClient {
    base_url: String,
    http: Client,
}

impl HttpPosClient {
    /// Create a client for the service at `base_url`,
    /// e.g. `"http://localhost:8080/api"`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        let response = self.http.get(self.url(path)).send().await?;

        Self::expect_success(path, response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, RemoteError>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self.http.post(self.url(path)).json(body).send().await?;

        Self::expect_success(path, response).await
    }

    async fn expect_success<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, RemoteError> {
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            tracing::warn!(path, %status, "request failed");

            return Err(RemoteError::UnexpectedResponse(format!(
                "{path} failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl CatalogApi for HttpPosClient {
    async fn fetch_items(&self) -> Result<Vec<CatalogItem>, RemoteError> {
        let items: Vec<CatalogItem> = self.get_json("items").await?;

        tracing::info!(count = items.len(), "fetched item catalog");

        Ok(items)
    }

    async fn fetch_customizations(&self) -> Result<Vec<CustomizationDefinition>, RemoteError> {
        let customizations: Vec<CustomizationDefinition> =
            self.get_json("customizations").await?;

        tracing::info!(count = customizations.len(), "fetched customizations");

        Ok(customizations)
    }
}

#[async_trait]
impl PromoApi for HttpPosClient {
    async fn validate_promo(&self, code: &str) -> Result<PromoValidation, RemoteError> {
        let request = PromoValidateRequest { code: code.into() };

        // The service answers 400 with a {valid: false, message} body for
        // unknown codes; surface that as a verdict, not a transport error.
        let response = self
            .http
            .post(self.url("promos/validate"))
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() || status == StatusCode::BAD_REQUEST {
            return Ok(response.json().await?);
        }

        let text = response.text().await.unwrap_or_default();

        tracing::warn!(%status, "promo validation failed");

        Err(RemoteError::UnexpectedResponse(format!(
            "promos/validate failed with status {status}: {text}"
        )))
    }
}

#[async_trait]
impl CustomerApi for HttpPosClient {
    async fn create_customer(&self, customer: NewCustomer) -> Result<CustomerRecord, RemoteError> {
        self.post_json("customers", &customer).await
    }

    async fn find_member(
        &self,
        membership_id: &str,
    ) -> Result<Option<CustomerRecord>, RemoteError> {
        let path = format!("customers/membership/{membership_id}");
        let response = self.http.get(self.url(&path)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let record: CustomerRecord = Self::expect_success(&path, response).await?;

        Ok(Some(record))
    }
}

#[async_trait]
impl TransactionApi for HttpPosClient {
    async fn submit_transaction(
        &self,
        request: TransactionRequest,
    ) -> Result<PersistedTransaction, RemoteError> {
        let persisted: PersistedTransaction = self.post_json("transactions", &request).await?;

        tracing::info!(id = persisted.id, "transaction persisted");

        Ok(persisted)
    }
}
