use crate::session::WebDriverSession;
use crate::{ChromeOptions, wire};
use geninfo_traits::{BrowserConnector, BrowserError};
use log::{debug, info};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

/// Opens sessions against a remote WebDriver endpoint.
#[derive(Debug, Clone)]
pub struct WebDriverClient {
    http: Client,
    endpoint: String,
    options: ChromeOptions,
}

impl WebDriverClient {
    /// `endpoint` is the WebDriver base URL, e.g. `http://localhost:4444/wd/hub`.
    pub fn new(endpoint: impl Into<String>, options: ChromeOptions) -> Result<Self, BrowserError> {
        // Requests never time out.
        let http = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| BrowserError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            options,
        })
    }

    /// A Selenium hub on `host:port`.
    pub fn for_host(host: &str, port: u16, options: ChromeOptions) -> Result<Self, BrowserError> {
        Self::new(Self::hub_url(host, port), options)
    }

    pub fn hub_url(host: &str, port: u16) -> String {
        format!("http://{}:{}/wd/hub", host, port)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl BrowserConnector for WebDriverClient {
    type Session = WebDriverSession;

    fn connect(&self) -> Result<WebDriverSession, BrowserError> {
        let url = format!("{}/session", self.endpoint);
        debug!("POST {}", url);
        let response = self
            .http
            .post(&url)
            .json(&self.options.to_capabilities())
            .send()
            .map_err(|e| BrowserError::SessionStart(format!("{}: {}", self.endpoint, e)))?;

        let success = response.status().is_success();
        let body: Value = response
            .json()
            .map_err(|e| BrowserError::SessionStart(format!("unreadable response: {}", e)))?;
        let legacy_id = body.get("sessionId").and_then(Value::as_str).map(str::to_string);
        let value = wire::unwrap_value(success, body)
            .map_err(|e| BrowserError::SessionStart(e.to_string()))?;
        let id = wire::session_id(&value, legacy_id.as_deref())
            .ok_or_else(|| {
                BrowserError::SessionStart("response carries no session id".to_string())
            })?;

        info!("Browser session {} opened on {}", id, self.endpoint);
        Ok(WebDriverSession::new(
            self.http.clone(),
            format!("{}/session/{}", self.endpoint, id),
            id,
        ))
    }
}
