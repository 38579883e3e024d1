//! W3C WebDriver client.
//!
//! Talks to a remote Selenium/ChromeDriver endpoint over plain HTTP and
//! implements the browser seam from `geninfo-traits`. Only the handful of
//! commands the export stage needs are covered.
//!
//! ```ignore
//! let client = WebDriverClient::for_host("selenium", 4444, ChromeOptions::default());
//! let mut session = client.connect()?;
//! session.navigate("file:///data/out/html/MAD/CAS/B1.html")?;
//! ```

mod client;
mod options;
mod session;
mod wire;

pub use client::WebDriverClient;
pub use options::ChromeOptions;
pub use session::WebDriverSession;
