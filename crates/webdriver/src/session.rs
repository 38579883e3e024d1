use crate::wire;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use geninfo_traits::{BrowserError, BrowserSession};
use log::{debug, warn};
use reqwest::Method;
use reqwest::blocking::Client;
use serde_json::{Value, json};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// A live WebDriver session. Deleted on [`close`](BrowserSession::close) or drop.
#[derive(Debug)]
pub struct WebDriverSession {
    http: Client,
    base: String,
    id: Option<String>,
}

impl WebDriverSession {
    pub(crate) fn new(http: Client, base: String, id: String) -> Self {
        Self {
            http,
            base,
            id: Some(id),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn command(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, BrowserError> {
        if self.id.is_none() {
            return Err(BrowserError::Closed);
        }
        let url = format!("{}{}", self.base, path);
        debug!("{} {}", method, url);
        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request
            .send()
            .map_err(|e| BrowserError::Transport(e.to_string()))?;
        let success = response.status().is_success();
        let body: Value = response
            .json()
            .map_err(|e| BrowserError::InvalidResponse(e.to_string()))?;
        wire::unwrap_value(success, body)
    }

    fn delete_session(&mut self) -> Result<(), BrowserError> {
        if self.id.is_none() {
            return Ok(());
        }
        let result = self.command(Method::DELETE, "", None).map(|_| ());
        if let Some(id) = self.id.take() {
            debug!("Browser session {} closed", id);
        }
        result
    }
}

impl BrowserSession for WebDriverSession {
    fn clear_cookies(&mut self) -> Result<(), BrowserError> {
        self.command(Method::DELETE, "/cookie", None).map(|_| ())
    }

    fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        self.command(Method::POST, "/url", Some(json!({ "url": url })))
            .map(|_| ())
    }

    fn wait_for_class(&mut self, class: &str, timeout: Duration) -> Result<bool, BrowserError> {
        let selector = json!({ "using": "css selector", "value": format!(".{}", class) });
        let deadline = Instant::now() + timeout;
        loop {
            match self.command(Method::POST, "/element", Some(selector.clone())) {
                Ok(_) => return Ok(true),
                Err(e) if wire::is_no_such_element(&e) => {}
                Err(e) => return Err(e),
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(false);
            }
            thread::sleep(POLL_INTERVAL.min(deadline - now));
        }
    }

    fn set_window_size(&mut self, width: u32, height: u32) -> Result<(), BrowserError> {
        self.command(
            Method::POST,
            "/window/rect",
            Some(json!({ "width": width, "height": height })),
        )
        .map(|_| ())
    }

    fn screenshot_png(&mut self) -> Result<Vec<u8>, BrowserError> {
        let value = self.command(Method::GET, "/screenshot", None)?;
        let encoded = value
            .as_str()
            .ok_or_else(|| {
                BrowserError::InvalidResponse("screenshot is not a string".to_string())
            })?;
        STANDARD
            .decode(encoded)
            .map_err(|e| BrowserError::InvalidResponse(format!("screenshot is not base64: {}", e)))
    }

    fn close(mut self) -> Result<(), BrowserError> {
        self.delete_session()
    }
}

impl Drop for WebDriverSession {
    fn drop(&mut self) {
        if let Err(e) = self.delete_session() {
            warn!("Failed to close browser session: {}", e);
        }
    }
}
