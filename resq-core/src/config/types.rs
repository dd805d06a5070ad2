//! Configuration type definitions

/// Crash detector thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DetectorConfig {
    /// Tilt (degrees from upright) that must be exceeded during an impact
    pub tilt_threshold_deg: u16,
    /// Per-axis raw change between consecutive samples that counts as impact
    pub impact_delta_raw: i32,
    /// Accelerometer LSBs per g
    pub full_scale_lsb_per_g: u16,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            tilt_threshold_deg: 35,
            impact_delta_raw: 20_000,
            full_scale_lsb_per_g: 16_384,
        }
    }
}

/// Button timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// A level must be stable for longer than this to count
    pub debounce_ms: u32,
    /// Silence after the last press that closes a click window
    pub click_window_ms: u32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 50,
            click_window_ms: 1_000,
        }
    }
}

/// Alert lifecycle timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlertTiming {
    /// Time the rider has to cancel before the alert goes out
    pub countdown_ms: u32,
    /// Half period of the countdown blink
    pub blink_half_period_ms: u32,
    /// Controller tick period
    pub tick_ms: u32,
}

impl Default for AlertTiming {
    fn default() -> Self {
        Self {
            countdown_ms: 10_000,
            blink_half_period_ms: 250,
            tick_ms: 100,
        }
    }
}

/// SIM800 pacing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModemTiming {
    /// UART baud rate
    pub baud_rate: u32,
    /// Longest wait for the `>` prompt after `AT+CMGS`
    pub prompt_timeout_ms: u32,
    /// Settle time after Ctrl-Z before the modem takes another command
    pub settle_ms: u32,
    /// Extra gap after each emergency-contact message
    pub contact_gap_ms: u32,
    /// Receive silence that closes an incoming SMS record
    pub rx_idle_ms: u32,
}

impl Default for ModemTiming {
    fn default() -> Self {
        Self {
            baud_rate: 9_600,
            prompt_timeout_ms: 1_000,
            settle_ms: 5_000,
            contact_gap_ms: 10_000,
            rx_idle_ms: 500,
        }
    }
}

impl ModemTiming {
    /// Time one `AT+CMGS` exchange occupies the modem
    pub fn post_send_delay_ms(&self) -> u32 {
        self.prompt_timeout_ms.saturating_add(self.settle_ms)
    }
}

/// Complete device configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlertConfig {
    pub detector: DetectorConfig,
    pub button: ButtonConfig,
    pub alert: AlertTiming,
    pub modem: ModemTiming,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AlertConfig::default();
        assert_eq!(config.detector.tilt_threshold_deg, 35);
        assert_eq!(config.detector.impact_delta_raw, 20_000);
        assert_eq!(config.button.click_window_ms, 1_000);
        assert_eq!(config.alert.countdown_ms, 10_000);
        assert_eq!(config.modem.post_send_delay_ms(), 6_000);
    }
}
