use std::error::Error;

use log::{debug, error, info};
use reqwest::{Client, Method, Response, Url};
use serde::Serialize;

use crate::error::Result;

/// Executes an HTTP request with a JSON body and logs the exchange.
/// Retries are deliberately absent; the caller decides what a failure means.
pub async fn execute_request<T: Serialize + ?Sized>(
    client: &Client,
    method: Method,
    url: &Url,
    json_body: Option<&T>,
) -> Result<Response> {
    let mut request_builder = client.request(method.clone(), url.clone());
    if let Some(body) = json_body {
        request_builder = request_builder.json(body);
    }

    info!("Sending {} request to {}", method.as_str(), url);
    let start_time = std::time::Instant::now();

    match request_builder.send().await {
        Ok(resp) => {
            info!(
                "Got response from {} after {:?} with status {}",
                url,
                start_time.elapsed(),
                resp.status()
            );
            debug!("Response headers: {:?}", resp.headers());
            Ok(resp)
        }
        Err(e) => {
            error!("Failed HTTP request to {}: {}", url, e);
            if let Some(source) = e.source() {
                error!("Error source: {:?}", source);
            }
            if e.is_timeout() {
                error!("Request timed out");
            }
            if e.is_connect() {
                error!("Connection error");
            }
            if e.is_decode() {
                error!("Decode error");
            }
            Err(e.into())
        }
    }
}
