//! Driver for the Bosch BMP180 digital barometric pressure sensor.
//!
//! The device couples a piezo-resistive pressure cell and a temperature
//! sensor behind an I2C register file. Conversions are started by writing a
//! command to the control register and read back as raw codes, which are then
//! linearized with the per-device [`Calibration`] coefficients; the
//! compensation arithmetic lives with the calibration register block.
//!
//! Temperature and pressure are not independent measurements: compensating a
//! pressure conversion requires the [`B5`] intermediate of a preceding
//! temperature conversion. [`Bmp180::read`] performs the pair in order.

mod register;

use crate::domain::temperature::{Celsius, Temperature};
use crate::domain::{pressure::Pressure, SensorAcquisition};
use crate::traits::i2c::I2cAddress;
use embassy_time::{Duration, Timer};
use embedded_hal_async::i2c::*;
use register::ctrl_meas::{Command, CtrlMeas};
use register::id::ChipId;
use register::out::Out;
use register::soft_reset::SoftReset;

pub use register::calibration::{Calibration, CalibrationError, B5};
pub use register::ctrl_meas::Oversampling;
pub use register::id::CHIP_ID;

pub const ADDR: u8 = 0x77;

/// Completion polls after the nominal conversion time before giving up.
const CONVERSION_POLL_LIMIT: u8 = 5;
const CONVERSION_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Start-up time after a reset.
const STARTUP_TIME: Duration = Duration::from_millis(10);

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bmp180Error<E> {
    /// The bus operation failed; the underlying error is passed through
    /// untouched.
    I2c(E),
    /// No calibration coefficients have been loaded yet.
    NotCalibrated,
    /// The id register did not identify a BMP180.
    UnknownChipId(u8),
    /// A started conversion did not complete within the polling limit.
    ConversionTimeout,
    /// The coefficient set cannot produce a valid reading.
    Calibration(CalibrationError),
}

pub struct Bmp180 {
    address: I2cAddress,
    oversampling: Oversampling,
    calibration: Option<Calibration>,
}

impl Bmp180 {
    pub fn new() -> Self {
        Self::with_oversampling(Oversampling::UltraLowPower)
    }

    pub fn with_oversampling(oversampling: Oversampling) -> Self {
        Self {
            address: I2cAddress::new(ADDR),
            oversampling,
            calibration: None,
        }
    }

    /// Probe the device and load its calibration coefficients.
    ///
    /// Must complete before any measurement; the coefficients are read once
    /// and held for the lifetime of the driver.
    pub async fn initialize<I: I2c<SevenBitAddress>>(
        &mut self,
        i2c: &mut I,
    ) -> Result<(), Bmp180Error<I::Error>> {
        let id = ChipId::read(self.address, i2c).await?;
        if id != CHIP_ID {
            warn!("unexpected chip id {}", id);
            return Err(Bmp180Error::UnknownChipId(id));
        }

        let calibration = Calibration::read(self.address, i2c).await?;
        calibration.validate().map_err(Bmp180Error::Calibration)?;
        debug!("BMP180 calibration loaded");

        self.calibration.replace(calibration);
        Ok(())
    }

    /// Measure the temperature.
    ///
    /// Also returns the [`B5`] intermediate, which a subsequent
    /// [`pressure`](Self::pressure) measurement consumes; pressure cannot be
    /// compensated from its raw conversion alone.
    pub async fn temperature<I: I2c<SevenBitAddress>>(
        &mut self,
        i2c: &mut I,
    ) -> Result<(Temperature<Celsius>, B5), Bmp180Error<I::Error>> {
        let calibration = self.calibration.ok_or(Bmp180Error::NotCalibrated)?;

        self.convert(i2c, Command::Temperature).await?;
        let raw = Out::read_temperature(self.address, i2c).await?;
        trace!("raw temperature {}", raw);

        calibration
            .compute_temperature(raw)
            .map_err(Bmp180Error::Calibration)
    }

    /// Measure the pressure, compensated with the `b5` term of a preceding
    /// temperature measurement.
    pub async fn pressure<I: I2c<SevenBitAddress>>(
        &mut self,
        i2c: &mut I,
        b5: B5,
    ) -> Result<Pressure, Bmp180Error<I::Error>> {
        let calibration = self.calibration.ok_or(Bmp180Error::NotCalibrated)?;

        self.convert(i2c, Command::Pressure(self.oversampling)).await?;
        let raw = Out::read_pressure(self.address, i2c, self.oversampling).await?;
        trace!("raw pressure {}", raw);

        calibration
            .compute_pressure(raw, b5, self.oversampling)
            .map_err(Bmp180Error::Calibration)
    }

    /// Measure temperature and pressure as one acquisition.
    pub async fn read<I: I2c<SevenBitAddress>>(
        &mut self,
        i2c: &mut I,
    ) -> Result<SensorAcquisition<Celsius>, Bmp180Error<I::Error>> {
        let (temperature, b5) = self.temperature(i2c).await?;
        let pressure = self.pressure(i2c, b5).await?;

        Ok(SensorAcquisition {
            temperature,
            pressure,
        })
    }

    /// Soft-reset the device.
    ///
    /// The device reboots into its power-on state, so the driver drops its
    /// coefficients and requires a fresh [`initialize`](Self::initialize).
    pub async fn reset<I: I2c<SevenBitAddress>>(
        &mut self,
        i2c: &mut I,
    ) -> Result<(), Bmp180Error<I::Error>> {
        SoftReset::write(self.address, i2c).await?;
        self.calibration.take();
        Timer::after(STARTUP_TIME).await;
        Ok(())
    }

    /// Run one conversion: issue the command, wait out the nominal
    /// conversion time, then poll for completion a bounded number of times
    /// rather than spinning on a device that never finishes.
    async fn convert<I: I2c<SevenBitAddress>>(
        &mut self,
        i2c: &mut I,
        command: Command,
    ) -> Result<(), Bmp180Error<I::Error>> {
        CtrlMeas::start(self.address, i2c, command).await?;
        Timer::after(command.conversion_time()).await;

        for _ in 0..CONVERSION_POLL_LIMIT {
            if !CtrlMeas::conversion_in_progress(self.address, i2c).await? {
                return Ok(());
            }
            Timer::after(CONVERSION_POLL_INTERVAL).await;
        }

        warn!("conversion still running after {} polls", CONVERSION_POLL_LIMIT);
        Err(Bmp180Error::ConversionTimeout)
    }
}

impl Default for Bmp180 {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> From<E> for Bmp180Error<E> {
    fn from(e: E) -> Bmp180Error<E> {
        Bmp180Error::I2c(e)
    }
}
