//! Debounced multi-click classification
//!
//! The helmet has one button. During a countdown the rider answers with a
//! burst of presses: two to send the alert immediately, three to cancel.
//! Presses are grouped into a window that closes once no press has been
//! counted for `click_window_ms`.

use crate::config::ButtonConfig;

/// A recognised click burst
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClickCount {
    /// Two presses: confirm
    Double,
    /// Three presses: cancel
    Triple,
}

impl ClickCount {
    pub fn from_count(count: u8) -> Option<Self> {
        match count {
            2 => Some(ClickCount::Double),
            3 => Some(ClickCount::Triple),
            _ => None,
        }
    }
}

/// Button debouncer and click-window accumulator
#[derive(Debug, Clone)]
pub struct ClickClassifier {
    config: ButtonConfig,
    /// Last confirmed level (true = pressed)
    stable: bool,
    /// Level seen on the previous poll
    raw: bool,
    /// When `raw` last changed
    raw_since_ms: u32,
    /// Presses counted in the open window
    count: u8,
    /// When the last press was counted
    last_press_ms: u32,
}

impl ClickClassifier {
    pub fn new(config: ButtonConfig) -> Self {
        Self {
            config,
            stable: false,
            raw: false,
            raw_since_ms: 0,
            count: 0,
            last_press_ms: 0,
        }
    }

    /// Presses counted in the open window
    pub fn pending_count(&self) -> u8 {
        self.count
    }

    /// Discard the open window
    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Feed the current button level
    ///
    /// Returns a count only when a window closes with two or three presses;
    /// other counts are dropped silently.
    pub fn poll_clicks(&mut self, pressed: bool, now_ms: u32) -> Option<ClickCount> {
        if pressed != self.raw {
            self.raw = pressed;
            self.raw_since_ms = now_ms;
        } else if pressed != self.stable
            && now_ms.wrapping_sub(self.raw_since_ms) > self.config.debounce_ms
        {
            self.stable = pressed;
            if pressed {
                self.count = self.count.saturating_add(1);
                self.last_press_ms = now_ms;
            }
        }

        if self.count > 0 && now_ms.wrapping_sub(self.last_press_ms) > self.config.click_window_ms
        {
            let count = self.count;
            self.count = 0;
            return ClickCount::from_count(count);
        }

        None
    }
}
