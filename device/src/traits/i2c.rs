/// A 7-bit device address on an I2C bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct I2cAddress(u8);

impl I2cAddress {
    pub const fn new(address: u8) -> Self {
        Self(address)
    }
}

impl From<I2cAddress> for u8 {
    fn from(address: I2cAddress) -> u8 {
        address.0
    }
}

impl From<u8> for I2cAddress {
    fn from(address: u8) -> I2cAddress {
        I2cAddress::new(address)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for I2cAddress {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "0x{:x}", &self.0)
    }
}
