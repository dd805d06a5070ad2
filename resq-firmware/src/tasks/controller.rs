//! Main controller task
//!
//! Drives the alert controller once per tick and logs what it did.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;

use resq_core::config::AlertConfig;
use resq_core::{Activity, AlertController};
use resq_drivers::imu::Mpu6050;
use resq_hal::Compat;

use crate::tasks::indicator::IndicatorLink;
use crate::tasks::tick::TICK_SIGNAL;
use crate::transport::ChannelTransport;

/// Accelerometer on the shared I2C0 bus
pub type Imu = Mpu6050<Compat<I2c<'static, I2C0, Blocking>>>;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(config: AlertConfig, mut imu: Imu, button: Input<'static>) {
    info!("Controller task started");

    let mut controller = AlertController::new(config);
    let mut transport = ChannelTransport;
    let mut indicator = IndicatorLink::new();

    let alert = controller.config().alert;
    info!(
        "Countdown {} ms, tick {} ms",
        alert.countdown_ms, alert.tick_ms
    );

    match controller.start(&mut imu, &mut indicator) {
        Ok(()) => info!("Accelerometer ready, waiting for registration"),
        Err(e) => error!("Accelerometer unavailable: {:?}, alerting disabled", e),
    }

    // Whole seconds last logged for the running countdown
    let mut reported_secs: Option<u32> = None;

    loop {
        let now_ms = TICK_SIGNAL.wait().await;

        // Button pulls the input to ground
        let pressed = button.is_low();

        let activities = controller.tick(now_ms, pressed, &mut transport, &mut imu, &mut indicator);
        for activity in activities.iter() {
            log_activity(activity);
        }

        let secs = controller
            .countdown_remaining_ms(now_ms)
            .map(|remaining| remaining.div_ceil(1000));
        if secs != reported_secs {
            if let Some(secs) = secs {
                info!("Alert goes out in {} s", secs);
            }
            reported_secs = secs;
        }
    }
}

fn log_activity(activity: &Activity) {
    match activity {
        Activity::Registered(number) => info!("Registered user {}", number.as_str()),
        Activity::RegistrationIgnored => debug!("Message ignored before registration"),
        Activity::CoordinatesUpdated => info!("Coordinates updated"),
        Activity::ContactsUpdated { count } => info!("Emergency contacts updated: {}", count),
        Activity::MessageRejected(e) => warn!("Message rejected: {:?}", e),
        Activity::Transition { from, to } => info!("State: {:?} -> {:?}", from, to),
        Activity::Dispatch(outcome) => info!("Dispatch: {:?}", outcome),
        Activity::Sent(kind) => debug!("Handed to modem: {:?}", kind),
        Activity::SendFailed { kind, error } => warn!("Send {:?} failed: {:?}", kind, error),
        Activity::SensorReadFailed(e) => warn!("Accelerometer read failed: {:?}", e),
        Activity::QueueFailed(e) => error!("Could not queue alert: {:?}", e),
    }
}
