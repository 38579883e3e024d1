use serde_json::{Value, json};

/// Chrome capabilities sent when a session is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeOptions {
    pub args: Vec<String>,
    pub exclude_switches: Vec<String>,
    pub headless: bool,
}

impl Default for ChromeOptions {
    fn default() -> Self {
        Self {
            args: vec![
                "--hide-scrollbars".to_string(),
                "--window-size=2480,3508".to_string(),
                "--log-level=3".to_string(),
            ],
            exclude_switches: vec!["enable-logging".to_string()],
            headless: false,
        }
    }
}

impl ChromeOptions {
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// The `capabilities` payload of a new-session request.
    pub fn to_capabilities(&self) -> Value {
        let mut args = self.args.clone();
        if self.headless && !args.iter().any(|a| a.starts_with("--headless")) {
            args.push("--headless=new".to_string());
        }
        json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "chrome",
                    "goog:chromeOptions": {
                        "args": args,
                        "excludeSwitches": self.exclude_switches,
                    }
                }
            }
        })
    }
}
