//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in resq-core for the helmet's hardware:
//!
//! - Accelerometer (MPU6050 over I2C)
//! - Alert indicator (LED and buzzer on GPIO)

#![no_std]
#![deny(unsafe_code)]

pub mod imu;
pub mod indicator;
