//! Indicator task
//!
//! Owns the LED/buzzer outputs and renders the blink pattern at a finer
//! resolution than the controller tick.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Instant, Ticker};

use resq_core::traits::AlertIndicator;
use resq_drivers::indicator::{GpioIndicator, IndicatorMode};
use resq_hal::Compat;

use crate::channels::INDICATOR_MODE;

/// LED and buzzer driven together
pub type IndicatorPins = (Compat<Output<'static>>, Compat<Output<'static>>);

/// Output refresh period
const REFRESH_INTERVAL_MS: u64 = 25;

/// Controller-side handle forwarding pattern changes to the indicator task
pub struct IndicatorLink {
    mode: IndicatorMode,
}

impl IndicatorLink {
    pub const fn new() -> Self {
        Self {
            mode: IndicatorMode::Off,
        }
    }

    fn request(&mut self, mode: IndicatorMode) {
        if mode != self.mode {
            self.mode = mode;
            INDICATOR_MODE.signal(mode);
        }
    }
}

impl AlertIndicator for IndicatorLink {
    fn set_blinking(&mut self, on: bool) {
        if on {
            self.request(IndicatorMode::Blinking);
        } else if self.mode == IndicatorMode::Blinking {
            self.request(IndicatorMode::Off);
        }
    }

    fn set_steady(&mut self, on: bool) {
        if on {
            self.request(IndicatorMode::Steady);
        } else if self.mode == IndicatorMode::Steady {
            self.request(IndicatorMode::Off);
        }
    }
}

/// Indicator task - applies requested modes and refreshes the blink output
#[embassy_executor::task]
pub async fn indicator_task(mut indicator: GpioIndicator<IndicatorPins>) {
    info!("Indicator task started");

    let mut ticker = Ticker::every(Duration::from_millis(REFRESH_INTERVAL_MS));
    let start = Instant::now();

    loop {
        match select(INDICATOR_MODE.wait(), ticker.next()).await {
            Either::First(mode) => {
                debug!("Indicator mode: {:?}", mode);
                indicator.set_mode(mode);
            }
            Either::Second(()) => {}
        }

        indicator.refresh(start.elapsed().as_millis() as u32);
    }
}
