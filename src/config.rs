//! Per-session settings.

use std::time::Duration;

use crate::Layout;

/// How a [`Session`](crate::Session) finds its device and interprets it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Which of several matching devices to use, counting from 0
    pub device_number: usize,
    /// Searched for in port names instead of the family's keywords
    pub port_name: Option<String>,
    pub layout: Layout,
    /// Report pressure events instead of skipping them
    pub return_pressure: bool,
    /// Launch Control template selected on open, 1..=16
    pub template: u8,
    /// Time between two frames of scrolling text
    pub text_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            device_number: 0,
            port_name: None,
            layout: Layout::Classic,
            return_pressure: false,
            template: 1,
            text_delay: Duration::from_millis(150),
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn device_number(mut self, device_number: usize) -> Self {
        self.device_number = device_number;
        self
    }

    pub fn port_name(mut self, port_name: impl Into<String>) -> Self {
        self.port_name = Some(port_name.into());
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn return_pressure(mut self, return_pressure: bool) -> Self {
        self.return_pressure = return_pressure;
        self
    }

    /// Out of range templates are pulled to 1 or 16
    pub fn template(mut self, template: u8) -> Self {
        self.template = template.clamp(1, 16);
        self
    }

    pub fn text_delay(mut self, text_delay: Duration) -> Self {
        self.text_delay = text_delay;
        self
    }
}
