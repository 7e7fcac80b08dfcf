//! Types related to barometric pressure.

use core::fmt::{Debug, Formatter};

/// Barometric pressure at the location of the sensor, in pascals.
///
/// Meteorological pressures are usually given relative to mean sea level in
/// order to be location independent; [`at_sea_level`](Self::at_sea_level)
/// performs that reduction.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Pressure {
    pascals: i32,
}

impl Pressure {
    pub const fn from_pascals(pascals: i32) -> Self {
        Self { pascals }
    }

    pub const fn pascals(&self) -> i32 {
        self.pascals
    }

    pub fn hectopascals(&self) -> f32 {
        self.pascals as f32 / 100.0
    }

    /// Reduce the station pressure to mean sea level for a station `altitude`
    /// meters up, using the international barometric formula.
    pub fn at_sea_level(&self, altitude: f32) -> Pressure {
        let reduced = self.pascals as f32 / libm::powf(1.0 - altitude / 44330.0, 5.255);
        Pressure {
            pascals: libm::roundf(reduced) as i32,
        }
    }
}

impl Debug for Pressure {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} Pa", &self.pascals)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Pressure {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "{} Pa", &self.pascals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sea_level_reduction() {
        // Station pressure at 691 m reduces to roughly 1018 hPa.
        let station = Pressure::from_pascals(93_728);
        let sea = station.at_sea_level(691.0);
        assert_eq!(libm::roundf(sea.hectopascals()), 1018.0);
    }

    #[test]
    fn unit_accessors() {
        let pressure = Pressure::from_pascals(101_325);
        assert_eq!(pressure.pascals(), 101_325);
        assert_eq!(pressure.hectopascals(), 1013.25);
    }
}
