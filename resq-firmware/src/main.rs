//! ResQ - Crash-Response Helmet Firmware
//!
//! Main firmware binary for an RP2040 helmet controller with a SIM800 GSM
//! modem, an MPU6050 accelerometer, a push button and an LED/buzzer pair.
//!
//! Board wiring:
//! - UART0 (GPIO0 TX, GPIO1 RX): SIM800
//! - I2C0 (GPIO4 SDA, GPIO5 SCL): MPU6050
//! - GPIO14: button to ground
//! - GPIO15 / GPIO16: LED / buzzer

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use resq_drivers::imu::{AccelRange, Mpu6050};
use resq_drivers::indicator::GpioIndicator;
use resq_hal::{Compat, I2cConfig};

mod channels;
mod config;
mod tasks;
mod transport;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 512]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("ResQ firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();

    // Setup UART for the SIM800
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.modem.baud_rate;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 512]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", config.modem.baud_rate);

    // Setup I2C for the MPU6050
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2cConfig::FAST.frequency;
    let bus = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);

    let mut imu = Mpu6050::new(Compat(bus));
    imu.set_range(AccelRange::G2);
    if imu.range().lsb_per_g() != config.detector.full_scale_lsb_per_g {
        warn!(
            "Configured full scale {} LSB/g does not match sensor range {} LSB/g",
            config.detector.full_scale_lsb_per_g,
            imu.range().lsb_per_g()
        );
    }

    info!("I2C initialized");

    // Button is active low with the internal pull-up
    let button = Input::new(p.PIN_14, Pull::Up);

    // LED and buzzer follow the same pattern
    let led = Output::new(p.PIN_15, Level::Low);
    let buzzer = Output::new(p.PIN_16, Level::Low);
    let indicator = GpioIndicator::new(
        (Compat(led), Compat(buzzer)),
        false,
        config.alert.blink_half_period_ms,
    );

    info!("GPIO initialized");

    // Spawn tasks
    spawner.spawn(tasks::tick_task(config.alert.tick_ms)).unwrap();
    spawner
        .spawn(tasks::modem_rx_task(rx, config.modem.rx_idle_ms))
        .unwrap();
    spawner.spawn(tasks::modem_tx_task(tx, config.modem)).unwrap();
    spawner.spawn(tasks::indicator_task(indicator)).unwrap();
    spawner
        .spawn(tasks::controller_task(config, imu, button))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
