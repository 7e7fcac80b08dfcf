//! Calibrated reading types, independent of any particular sensor.

pub mod pressure;
pub mod temperature;

use core::fmt::{Debug, Formatter};
use pressure::Pressure;
use temperature::*;

/// One barometric acquisition: a temperature and the pressure that was
/// compensated with it.
#[derive(Copy, Clone)]
pub struct SensorAcquisition<S: TemperatureScale> {
    pub temperature: Temperature<S>,
    pub pressure: Pressure,
}

impl<S: TemperatureScale> Debug for SensorAcquisition<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SensorAcquisition")
            .field("temperature", &self.temperature)
            .field("pressure", &self.pressure)
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl<S: TemperatureScale> defmt::Format for SensorAcquisition<S> {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(
            f,
            "SensorAcquisition(temperature: {}, pressure: {})",
            &self.temperature,
            &self.pressure
        );
    }
}
