use async_trait::async_trait;
use log::{debug, info, warn};
use portal_core::{ClassificationOutcome, Config, FailureReason, WireLabel};
use reqwest::{Client, Method, Proxy, Url};

use crate::api::models::{ClassifyRequest, ClassifyResponse};
use crate::client_trait::ClassifierClient;
use crate::error::{ClassifierError, Result};
use crate::utils::http_utils::execute_request;

/// Classification client talking to the HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpClassifierClient {
    client: Client,
    endpoint: Url,
}

impl HttpClassifierClient {
    pub fn new(config: &Config) -> Result<Self> {
        let endpoint = Url::parse(&config.classifier_url).map_err(|e| {
            ClassifierError::Config(format!("bad classifier url {:?}: {e}", config.classifier_url))
        })?;
        let client = Self::build_http_client(config)?;
        Ok(Self { client, endpoint })
    }

    /// Client without proxies, pointed at `endpoint`.
    pub fn with_endpoint(endpoint: &str) -> Result<Self> {
        let config = Config {
            classifier_url: endpoint.to_string(),
            ..Config::default()
        };
        Self::new(&config)
    }

    fn build_http_client(config: &Config) -> Result<Client> {
        let mut builder = Client::builder();
        if !config.http_proxy.is_empty() {
            builder = builder.proxy(Proxy::http(&config.http_proxy)?);
        }
        if !config.https_proxy.is_empty() {
            builder = builder.proxy(Proxy::https(&config.https_proxy)?);
        }
        Ok(builder.build()?)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends the query and decodes the endpoint's reply.
    pub async fn request_label(&self, query: &str) -> Result<ClassifyResponse> {
        let body = ClassifyRequest {
            query: query.to_string(),
        };
        let response = execute_request(&self.client, Method::POST, &self.endpoint, Some(&body)).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifierError::Status(status));
        }

        let text = response.text().await?;
        serde_json::from_str::<ClassifyResponse>(&text)
            .map_err(|e| ClassifierError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ClassifierClient for HttpClassifierClient {
    async fn classify(&self, query: &str) -> ClassificationOutcome {
        match self.request_label(query).await {
            Ok(response) => {
                debug!(
                    "Classifier replied {:?} (original_query={:?}, confidence={:?})",
                    response.ministry, response.original_query, response.confidence
                );
                let outcome = ClassificationOutcome::from(WireLabel::from_raw(&response.ministry));
                info!("Classified query as {:?}", outcome);
                outcome
            }
            Err(err) => {
                warn!("Classification failed: {}", err);
                ClassificationOutcome::failed(FailureReason::NetworkUnavailable)
            }
        }
    }
}
