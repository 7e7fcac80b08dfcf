use crate::traits::i2c::I2cAddress;
use embedded_hal_async::i2c::*;

const ID: u8 = 0xD0;

/// Fixed value of the id register on a BMP180.
pub const CHIP_ID: u8 = 0x55;

pub struct ChipId;

impl ChipId {
    pub async fn read<I: I2c>(address: I2cAddress, i2c: &mut I) -> Result<u8, I::Error> {
        let mut buf = [0; 1];
        i2c.write_read(address.into(), &[ID], &mut buf).await?;
        Ok(buf[0])
    }
}
