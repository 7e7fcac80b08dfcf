use crate::domain::pressure::Pressure;
use crate::domain::temperature::{Celsius, Temperature};
use crate::traits::i2c::I2cAddress;
use embedded_hal_async::i2c::*;

use super::ctrl_meas::Oversampling;

// 22-byte coefficient block at 0xAA, read as one auto-increment burst
const CALIBRATION_22: u8 = 0xAA;

/// The eleven compensation coefficients programmed into the sensor EEPROM at
/// manufacture time, individually per silicon. Read once at initialization
/// and immutable afterwards.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    pub ac1: i16,
    pub ac2: i16,
    pub ac3: i16,
    pub ac4: u16,
    pub ac5: u16,
    pub ac6: u16,
    pub b1: i16,
    pub b2: i16,
    pub mb: i16,
    pub mc: i16,
    pub md: i16,
}

/// Intermediate of the temperature compensation, consumed by the pressure
/// compensation. Only obtainable from
/// [`Calibration::compute_temperature`], which keeps the two computations
/// sequenced on the same sample pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct B5(i32);

impl B5 {
    pub fn value(&self) -> i32 {
        self.0
    }
}

/// A compensation precondition does not hold: the coefficient set cannot
/// produce a valid reading and the sample must be discarded. Re-reading the
/// EEPROM is the only recovery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// A coefficient word read back as 0x0000 or 0xFFFF.
    CorruptCoefficient,
    /// `X1 + MD` is zero in the temperature compensation.
    TemperatureDivisorZero,
    /// `B4` is zero in the pressure compensation.
    PressureDivisorZero,
}

impl Calibration {
    pub async fn read<I: I2c>(address: I2cAddress, i2c: &mut I) -> Result<Calibration, I::Error> {
        let mut buf = [0; 22];
        i2c.write_read(address.into(), &[CALIBRATION_22], &mut buf)
            .await?;
        Ok(buf.into())
    }

    /// EEPROM sanity check from the datasheet: no coefficient word may be
    /// 0x0000 or 0xFFFF, either value indicates a failed EEPROM transfer.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        let words = [
            self.ac1 as u16,
            self.ac2 as u16,
            self.ac3 as u16,
            self.ac4,
            self.ac5,
            self.ac6,
            self.b1 as u16,
            self.b2 as u16,
            self.mb as u16,
            self.mc as u16,
            self.md as u16,
        ];
        if words.iter().any(|w| *w == 0x0000 || *w == 0xFFFF) {
            return Err(CalibrationError::CorruptCoefficient);
        }
        Ok(())
    }

    /// Compensate a raw temperature conversion.
    ///
    /// Fixed-point arithmetic from the datasheet, step by step in `i32` with
    /// arithmetic shifts. The `X2` quotient rounds toward negative infinity:
    /// plain `/` truncates and lands one LSB off the vendor's reference
    /// values on negative quotients.
    pub fn compute_temperature(
        &self,
        raw: i16,
    ) -> Result<(Temperature<Celsius>, B5), CalibrationError> {
        let x1 = ((i32::from(raw) - i32::from(self.ac6)) * i32::from(self.ac5)) >> 15;

        let divisor = x1 + i32::from(self.md);
        if divisor == 0 {
            return Err(CalibrationError::TemperatureDivisorZero);
        }
        let x2 = (i32::from(self.mc) << 11).div_euclid(divisor);

        let b5 = x1 + x2;
        let deci_celsius = (b5 + 8) >> 4;

        Ok((Temperature::new(deci_celsius as f32 / 10.0), B5(b5)))
    }

    /// Compensate a raw pressure conversion.
    ///
    /// `b5` must come from [`compute_temperature`](Self::compute_temperature)
    /// on the same sample pair. The intermediates follow the datasheet order
    /// and widths exactly: signed arithmetic shifts up to `B3`, unsigned
    /// 32-bit arithmetic for `B4`, `B7` and the quotient.
    pub fn compute_pressure(
        &self,
        raw: i32,
        b5: B5,
        oversampling: Oversampling,
    ) -> Result<Pressure, CalibrationError> {
        let oss = oversampling.shift();

        let b6 = b5.0 - 4000;
        let x1 = (i32::from(self.b2) * ((b6 * b6) >> 12)) >> 11;
        let x2 = (i32::from(self.ac2) * b6) >> 11;
        let x3 = x1 + x2;
        let b3 = (((i32::from(self.ac1) * 4 + x3) << oss) + 2) >> 2;

        let x1 = (i32::from(self.ac3) * b6) >> 13;
        let x2 = (i32::from(self.b1) * ((b6 * b6) >> 12)) >> 16;
        let x3 = (x1 + x2 + 2) >> 2;
        let b4 = (u32::from(self.ac4) * ((x3 + 32768) as u32)) >> 15;
        if b4 == 0 {
            return Err(CalibrationError::PressureDivisorZero);
        }

        let b7 = (raw - b3) as u32 * (50_000u32 >> oss);
        // Two quotient forms on either side of the unsigned carry boundary:
        // shifting first would overflow above it, and dividing first rounds
        // differently below it.
        let p = if b7 < 0x8000_0000 {
            (b7 << 1) / b4
        } else {
            (b7 / b4) << 1
        };
        let p = p as i32;

        let x1 = (p >> 8) * (p >> 8);
        let x1 = (x1 * 3038) >> 16;
        let x2 = (-7357 * p) >> 16;

        Ok(Pressure::from_pascals(p + ((x1 + x2 + 3791) >> 4)))
    }
}

impl Into<Calibration> for [u8; 22] {
    fn into(self) -> Calibration {
        let word = |i: usize| u16::from_be_bytes([self[i], self[i + 1]]);

        Calibration {
            ac1: word(0) as i16,
            ac2: word(2) as i16,
            ac3: word(4) as i16,
            ac4: word(6),
            ac5: word(8),
            ac6: word(10),
            b1: word(12) as i16,
            b2: word(14) as i16,
            mb: word(16) as i16,
            mc: word(18) as i16,
            md: word(20) as i16,
        }
    }
}
