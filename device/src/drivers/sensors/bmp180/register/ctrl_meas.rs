use crate::traits::i2c::I2cAddress;
use embassy_time::Duration;
use embedded_hal_async::i2c::*;

const CTRL_MEAS: u8 = 0xF4;

const CMD_TEMPERATURE: u8 = 0x2E;
const CMD_PRESSURE_BASE: u8 = 0x34;

// Reads back set while a conversion is running
const SCO: u8 = 1 << 5;

/// Pressure oversampling setting: internal sample count traded against
/// conversion time and supply current.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oversampling {
    /// 1 sample, max. 4.5 ms conversion
    #[default]
    UltraLowPower = 0,
    /// 2 samples, max. 7.5 ms conversion
    Standard = 1,
    /// 4 samples, max. 13.5 ms conversion
    HighResolution = 2,
    /// 8 samples, max. 25.5 ms conversion
    UltraHighResolution = 3,
}

impl Oversampling {
    pub(crate) fn shift(&self) -> u8 {
        *self as u8
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Command {
    Temperature,
    Pressure(Oversampling),
}

impl Command {
    /// Maximum conversion time for this command.
    pub fn conversion_time(&self) -> Duration {
        match self {
            Command::Temperature => Duration::from_micros(4500),
            Command::Pressure(oss) => Duration::from_micros(1500 + (3000 << oss.shift())),
        }
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> u8 {
        match command {
            Command::Temperature => CMD_TEMPERATURE,
            Command::Pressure(oss) => CMD_PRESSURE_BASE | (oss.shift() << 6),
        }
    }
}

pub struct CtrlMeas;

impl CtrlMeas {
    pub async fn start<I: I2c>(
        address: I2cAddress,
        i2c: &mut I,
        command: Command,
    ) -> Result<(), I::Error> {
        let bytes = [CTRL_MEAS, command.into()];
        i2c.write(address.into(), &bytes).await
    }

    pub async fn conversion_in_progress<I: I2c>(
        address: I2cAddress,
        i2c: &mut I,
    ) -> Result<bool, I::Error> {
        let mut buf = [0; 1];
        i2c.write_read(address.into(), &[CTRL_MEAS], &mut buf)
            .await?;
        Ok(buf[0] & SCO != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_encoding() {
        assert_eq!(u8::from(Command::Temperature), 0x2E);
        assert_eq!(u8::from(Command::Pressure(Oversampling::UltraLowPower)), 0x34);
        assert_eq!(u8::from(Command::Pressure(Oversampling::Standard)), 0x74);
        assert_eq!(u8::from(Command::Pressure(Oversampling::HighResolution)), 0xB4);
        assert_eq!(
            u8::from(Command::Pressure(Oversampling::UltraHighResolution)),
            0xF4
        );
    }

    #[test]
    fn conversion_times() {
        assert_eq!(
            Command::Temperature.conversion_time(),
            Duration::from_micros(4500)
        );
        assert_eq!(
            Command::Pressure(Oversampling::UltraLowPower).conversion_time(),
            Duration::from_micros(4500)
        );
        assert_eq!(
            Command::Pressure(Oversampling::UltraHighResolution).conversion_time(),
            Duration::from_micros(25500)
        );
    }
}
