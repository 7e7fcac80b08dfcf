//! Types and traits related to temperature.

use core::fmt::{Debug, Formatter};
use core::marker::PhantomData;

/// Trait representing a temperature scale.
pub trait TemperatureScale: Send {
    const LETTER: char;
}

/// Discriminant for the _Celsius_ temperature scale.
#[derive(Clone)]
pub struct Celsius;

impl TemperatureScale for Celsius {
    const LETTER: char = 'C';
}

impl Debug for Celsius {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("°C")
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Celsius {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "°C");
    }
}

/// Discriminant for the _Fahrenheit_ temperature scale.
#[derive(Clone)]
pub struct Fahrenheit;

impl TemperatureScale for Fahrenheit {
    const LETTER: char = 'F';
}

impl Debug for Fahrenheit {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("°F")
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Fahrenheit {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "°F");
    }
}

/// A temperature value with its associated scale.
pub struct Temperature<S: TemperatureScale> {
    value: f32,
    _marker: PhantomData<S>,
}

impl<S: TemperatureScale> Clone for Temperature<S> {
    fn clone(&self) -> Self {
        Self {
            value: self.value,
            _marker: PhantomData,
        }
    }
}

impl<S: TemperatureScale> Copy for Temperature<S> {}

impl<S: TemperatureScale> Debug for Temperature<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}°{}", &self.value, S::LETTER)
    }
}

#[cfg(feature = "defmt")]
impl<S: TemperatureScale> defmt::Format for Temperature<S> {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "{}°{}", &self.value, S::LETTER)
    }
}

impl<S: TemperatureScale> Temperature<S> {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub fn raw_value(&self) -> f32 {
        self.value
    }
}

impl Temperature<Celsius> {
    pub fn into_fahrenheit(self) -> Temperature<Fahrenheit> {
        Temperature::new((self.value * 9.0 / 5.0) + 32.0)
    }
}
