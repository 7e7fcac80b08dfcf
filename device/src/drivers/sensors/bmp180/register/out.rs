use crate::traits::i2c::I2cAddress;
use embedded_hal_async::i2c::*;

use super::ctrl_meas::Oversampling;

// Conversion result, MSB first; pressure continues into the XLSB
const OUT: u8 = 0xF6;

pub struct Out;

impl Out {
    pub async fn read_temperature<I: I2c>(
        address: I2cAddress,
        i2c: &mut I,
    ) -> Result<i16, I::Error> {
        let mut buf = [0; 2];
        i2c.write_read(address.into(), &[OUT], &mut buf).await?;
        Ok(i16::from_be_bytes(buf))
    }

    /// Raw pressure: up to 19 significant bits depending on oversampling.
    pub async fn read_pressure<I: I2c>(
        address: I2cAddress,
        i2c: &mut I,
        oversampling: Oversampling,
    ) -> Result<i32, I::Error> {
        let mut buf = [0; 3];
        i2c.write_read(address.into(), &[OUT], &mut buf).await?;
        let raw = (u32::from(buf[0]) << 16) | (u32::from(buf[1]) << 8) | u32::from(buf[2]);
        Ok((raw >> (8 - oversampling.shift())) as i32)
    }
}
