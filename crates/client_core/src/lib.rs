use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Property, PropertyId, PropertyInput},
    error::ProblemDetail,
    protocol::{properties_route, property_route, ListQuery, PropertyPage},
};
use tracing::{debug, warn};
use url::Url;

pub mod controller;
pub mod error;
pub mod notify;
pub mod render;

pub use controller::{
    ConfirmDelete, EditSurface, Filters, ListController, Navigation, PageState, ITEMS_PER_PAGE,
};
pub use error::ClientError;
pub use notify::{Notification, NotificationCenter, NotificationKind, DEFAULT_NOTIFICATION_TTL};
pub use render::{DetailView, EditForm, ListView, PropertyCard};

/// The REST surface of the properties backend.
#[async_trait]
pub trait PropertyApi: Send + Sync {
    async fn list_properties(&self, query: &ListQuery) -> Result<PropertyPage, ClientError>;
    async fn get_property(&self, id: PropertyId) -> Result<Property, ClientError>;
    async fn create_property(&self, input: &PropertyInput) -> Result<Property, ClientError>;
    async fn update_property(
        &self,
        id: PropertyId,
        input: &PropertyInput,
    ) -> Result<Property, ClientError>;
    async fn delete_property(&self, id: PropertyId) -> Result<(), ClientError>;
}

pub struct HttpPropertyApi {
    http: Client,
    server_url: String,
}

impl HttpPropertyApi {
    pub fn new(server_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: impl Into<String>) -> Result<Self, ClientError> {
        let server_url = server_url.into();
        Url::parse(&server_url)?;
        Ok(Self {
            http,
            server_url: server_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn url(&self, route: &str) -> String {
        format!("{}{route}", self.server_url)
    }
}

#[async_trait]
impl PropertyApi for HttpPropertyApi {
    async fn list_properties(&self, query: &ListQuery) -> Result<PropertyPage, ClientError> {
        debug!(
            page = query.page,
            size = query.size,
            location = query.location.as_deref(),
            price = query.price,
            size_property = query.size_property,
            "properties: GET list"
        );
        let response = self
            .http
            .get(self.url(properties_route()))
            .query(query)
            .send()
            .await?;
        read_json(response).await
    }

    async fn get_property(&self, id: PropertyId) -> Result<Property, ClientError> {
        debug!(property_id = id.0, "properties: GET one");
        let response = self.http.get(self.url(&property_route(id))).send().await?;
        read_json(response).await
    }

    async fn create_property(&self, input: &PropertyInput) -> Result<Property, ClientError> {
        debug!(address = %input.address, "properties: POST");
        let response = self
            .http
            .post(self.url(properties_route()))
            .json(input)
            .send()
            .await?;
        read_json(response).await
    }

    async fn update_property(
        &self,
        id: PropertyId,
        input: &PropertyInput,
    ) -> Result<Property, ClientError> {
        debug!(property_id = id.0, "properties: PUT");
        let response = self
            .http
            .put(self.url(&property_route(id)))
            .json(input)
            .send()
            .await?;
        read_json(response).await
    }

    async fn delete_property(&self, id: PropertyId) -> Result<(), ClientError> {
        debug!(property_id = id.0, "properties: DELETE");
        let response = self
            .http
            .delete(self.url(&property_route(id)))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let response = check_status(response).await?;
    Ok(response.json().await?)
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let problem = parse_problem(status, &body);
    warn!(
        status = status.as_u16(),
        detail = problem.message(),
        "properties: backend returned error"
    );
    Err(ClientError::api(status.as_u16(), problem))
}

fn parse_problem(status: reqwest::StatusCode, body: &str) -> ProblemDetail {
    let reason = status.canonical_reason().unwrap_or("request failed");
    match serde_json::from_str::<ProblemDetail>(body) {
        Ok(mut problem) => {
            if problem.detail.is_none() && problem.title.is_none() {
                problem.detail = Some(reason.to_string());
            }
            problem.status.get_or_insert(status.as_u16());
            problem
        }
        Err(_) => ProblemDetail::new(status.as_u16(), reason),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
