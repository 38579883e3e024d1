use geninfo::{BrowserConnector, BrowserError, BrowserSession};
use image::{ImageFormat, Rgba, RgbaImage};
use std::cell::RefCell;
use std::io::Cursor;
use std::rc::Rc;
use std::time::Duration;

/// Everything the fake browser was asked to do.
#[derive(Debug, Default)]
pub struct Calls {
    pub connects: usize,
    pub cookie_clears: usize,
    pub navigations: Vec<String>,
    pub waits: usize,
    pub window_sizes: Vec<(u32, u32)>,
    pub screenshots: usize,
    pub closes: usize,
    pub dropped_open: usize,
}

impl Calls {
    pub fn remote_calls(&self) -> usize {
        self.connects
            + self.cookie_clears
            + self.navigations.len()
            + self.waits
            + self.window_sizes.len()
            + self.screenshots
            + self.closes
    }
}

/// A browser that records calls and returns a small generated PNG.
#[derive(Debug, Clone)]
pub struct FakeConnector {
    pub calls: Rc<RefCell<Calls>>,
    pub chart_ready: bool,
    pub fail_connect: bool,
}

impl Default for FakeConnector {
    fn default() -> Self {
        Self {
            calls: Rc::default(),
            chart_ready: true,
            fail_connect: false,
        }
    }
}

impl FakeConnector {
    pub fn reset(&self) {
        *self.calls.borrow_mut() = Calls::default();
    }
}

pub struct FakeSession {
    calls: Rc<RefCell<Calls>>,
    chart_ready: bool,
    closed: bool,
}

impl BrowserConnector for FakeConnector {
    type Session = FakeSession;

    fn connect(&self) -> Result<FakeSession, BrowserError> {
        self.calls.borrow_mut().connects += 1;
        if self.fail_connect {
            return Err(BrowserError::SessionStart("connection refused".to_string()));
        }
        Ok(FakeSession {
            calls: Rc::clone(&self.calls),
            chart_ready: self.chart_ready,
            closed: false,
        })
    }
}

impl BrowserSession for FakeSession {
    fn clear_cookies(&mut self) -> Result<(), BrowserError> {
        self.calls.borrow_mut().cookie_clears += 1;
        Ok(())
    }

    fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        self.calls.borrow_mut().navigations.push(url.to_string());
        Ok(())
    }

    fn wait_for_class(&mut self, _class: &str, _timeout: Duration) -> Result<bool, BrowserError> {
        self.calls.borrow_mut().waits += 1;
        Ok(self.chart_ready)
    }

    fn set_window_size(&mut self, width: u32, height: u32) -> Result<(), BrowserError> {
        self.calls.borrow_mut().window_sizes.push((width, height));
        Ok(())
    }

    fn screenshot_png(&mut self) -> Result<Vec<u8>, BrowserError> {
        self.calls.borrow_mut().screenshots += 1;
        Ok(sample_png(31, 44))
    }

    fn close(mut self) -> Result<(), BrowserError> {
        self.closed = true;
        self.calls.borrow_mut().closes += 1;
        Ok(())
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        if !self.closed {
            self.calls.borrow_mut().dropped_open += 1;
        }
    }
}

pub fn sample_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([20, 90, 160, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .expect("encoding an in-memory PNG cannot fail");
    out.into_inner()
}
