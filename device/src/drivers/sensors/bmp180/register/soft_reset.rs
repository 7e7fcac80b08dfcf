use crate::traits::i2c::I2cAddress;
use embedded_hal_async::i2c::*;

const SOFT_RESET: u8 = 0xE0;

// Runs the same sequence as power-on reset
const RESET_SEQUENCE: u8 = 0xB6;

pub struct SoftReset;

impl SoftReset {
    pub async fn write<I: I2c>(address: I2cAddress, i2c: &mut I) -> Result<(), I::Error> {
        i2c.write(address.into(), &[SOFT_RESET, RESET_SEQUENCE]).await
    }
}
