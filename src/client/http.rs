//! Cloud Vision REST client

use super::wire::{
    self, AnnotateImageRequest, BatchAnnotateImagesRequest, BatchAnnotateImagesResponse,
    ErrorEnvelope, Feature, ListProductSetsResponse,
};
use super::{ImageAnnotator, ListStep, ProductSearchService, ProductSetCursor};
use crate::config::Config;
use crate::error::{ProductSearchError, RemoteError, Result};
use crate::payload::ImagePayload;
use async_trait::async_trait;
use product_search_common::{ImageContext, ProductSearchResults, ProductSet, ResourceName};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use tracing::debug;

const USER_AGENT: &str = concat!("product-search/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct VisionClient {
    http: reqwest::Client,
    endpoint: String,
    access_token: String,
    quota_project: Option<String>,
    page_size: u32,
}

impl VisionClient {
    pub fn new(endpoint: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProductSearchError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            quota_project: None,
            page_size: 100,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Self::new(config.endpoint.as_str(), config.access_token()?)?
            .with_page_size(config.page_size);

        Ok(match &config.quota_project {
            Some(project) => client.with_quota_project(project.as_str()),
            None => client,
        })
    }

    pub fn with_quota_project(mut self, project: impl Into<String>) -> Self {
        self.quota_project = Some(project.into());
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.endpoint, path)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .bearer_auth(&self.access_token);

        match &self.quota_project {
            Some(project) => builder.header("x-goog-user-project", project),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder) -> std::result::Result<Response, RemoteError> {
        let response = builder
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, &body))
    }

    async fn json<T: DeserializeOwned>(response: Response) -> std::result::Result<T, RemoteError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| RemoteError::Malformed(e.to_string()))
    }
}

/// Map a non-2xx response onto [`RemoteError::Status`]
fn status_error(status: StatusCode, body: &str) -> RemoteError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => RemoteError::Status {
            http_status: status.as_u16(),
            status: envelope.error.status,
            message: envelope.error.message,
        },
        Err(_) => RemoteError::Status {
            http_status: status.as_u16(),
            status: status.canonical_reason().unwrap_or("UNKNOWN").to_string(),
            message: body.trim().to_string(),
        },
    }
}

#[async_trait]
impl ProductSearchService for VisionClient {
    async fn delete(&self, name: &ResourceName) -> std::result::Result<(), RemoteError> {
        let url = self.url(name.as_str());
        debug!(%url, "DELETE");

        Self::send(self.request(Method::DELETE, &url)).await?;
        Ok(())
    }

    fn list_product_sets(&self, parent: &ResourceName) -> Box<dyn ProductSetCursor> {
        let url = format!("{}/productSets", self.url(parent.as_str()));
        Box::new(HttpProductSetCursor::new(self.clone(), url))
    }
}

#[async_trait]
impl ImageAnnotator for VisionClient {
    async fn product_search(
        &self,
        image: &ImagePayload,
        context: &ImageContext,
    ) -> std::result::Result<ProductSearchResults, RemoteError> {
        let url = self.url("images:annotate");
        let body = BatchAnnotateImagesRequest {
            requests: vec![AnnotateImageRequest {
                image: wire::Image {
                    content: image.to_base64(),
                },
                features: vec![Feature {
                    kind: wire::PRODUCT_SEARCH_FEATURE,
                }],
                image_context: context,
            }],
        };
        debug!(%url, bytes = image.len(), "POST annotate");

        let response = Self::send(self.request(Method::POST, &url).json(&body)).await?;
        let batch: BatchAnnotateImagesResponse = Self::json(response).await?;

        let first = batch
            .responses
            .into_iter()
            .next()
            .ok_or_else(|| RemoteError::Malformed("annotate response has no entries".into()))?;

        // Per-image failures arrive inside a 200 response
        if let Some(error) = first.error.filter(|e| e.code != 0) {
            return Err(RemoteError::Status {
                http_status: StatusCode::OK.as_u16(),
                status: wire::code_name(error.code).to_string(),
                message: error.message,
            });
        }

        Ok(first.product_search_results.unwrap_or_default())
    }
}

/// Pages through `GET .../productSets` one item at a time
struct HttpProductSetCursor {
    client: VisionClient,
    url: String,
    buffered: VecDeque<ProductSet>,
    page_token: Option<String>,
    finished: bool,
    pages_fetched: usize,
}

impl HttpProductSetCursor {
    fn new(client: VisionClient, url: String) -> Self {
        Self {
            client,
            url,
            buffered: VecDeque::new(),
            page_token: None,
            finished: false,
            pages_fetched: 0,
        }
    }

    async fn fetch_page(&mut self) -> std::result::Result<ListProductSetsResponse, RemoteError> {
        let mut query = vec![("pageSize", self.client.page_size.to_string())];
        if let Some(token) = &self.page_token {
            query.push(("pageToken", token.clone()));
        }
        debug!(url = %self.url, page = self.pages_fetched + 1, "GET productSets");

        let builder = self.client.request(Method::GET, &self.url).query(&query);
        let response = VisionClient::send(builder).await?;
        let page: ListProductSetsResponse = VisionClient::json(response).await?;
        self.pages_fetched += 1;

        Ok(page)
    }
}

#[async_trait]
impl ProductSetCursor for HttpProductSetCursor {
    async fn next(&mut self) -> ListStep<ProductSet> {
        loop {
            if let Some(item) = self.buffered.pop_front() {
                return ListStep::Item(item);
            }
            if self.finished {
                return ListStep::Exhausted;
            }

            match self.fetch_page().await {
                Ok(page) => {
                    self.buffered.extend(page.product_sets);

                    if page.next_page_token.is_empty() {
                        self.finished = true;
                        self.page_token = None;
                    } else if self.page_token.as_deref() == Some(page.next_page_token.as_str()) {
                        self.finished = true;
                        self.buffered.clear();
                        return ListStep::Failed(RemoteError::Malformed(format!(
                            "page token repeated: {}",
                            page.next_page_token
                        )));
                    } else {
                        self.page_token = Some(page.next_page_token);
                    }
                }
                Err(e) => {
                    self.finished = true;
                    self.buffered.clear();
                    return ListStep::Failed(e);
                }
            }
        }
    }
}
