#![cfg_attr(not(feature = "std"), no_std)]
//! Async driver library for the Bosch BMP180 barometric pressure and
//! temperature sensor.
//!
//! The sensor exposes raw conversions through an I2C register file, together
//! with an EEPROM block of per-device calibration coefficients programmed at
//! manufacture time. The crate splits the work accordingly:
//!
//! * [`drivers::sensors::bmp180`] drives the register file over any bus
//!   implementing the `embedded-hal-async` I2C traits, and owns the
//!   fixed-point compensation arithmetic that turns raw conversions into
//!   calibrated readings.
//! * [`domain`] holds the calibrated reading types —
//!   [`Temperature`](domain::temperature::Temperature) and
//!   [`Pressure`](domain::pressure::Pressure) — independent of any particular
//!   sensor.
//!
//! The driver never owns the bus; every operation borrows it, so a shared bus
//! can be multiplexed between devices by whatever mutex the surrounding
//! application uses.
//!
//! # Example
//!
//! ```ignore
//! let mut sensor = Bmp180::new();
//! sensor.initialize(&mut i2c).await?;
//!
//! loop {
//!     let acquisition = sensor.read(&mut i2c).await?;
//!     info!("{:?}", acquisition);
//!     Timer::after(Duration::from_secs(1)).await;
//! }
//! ```

pub(crate) mod fmt;

pub mod domain;

pub mod drivers;

pub mod traits;

#[cfg(feature = "std")]
pub mod testutil;
