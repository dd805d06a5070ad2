//! Inertial measurement units

pub mod mpu6050;

pub use mpu6050::{AccelRange, Mpu6050, MPU6050_ADDR};
