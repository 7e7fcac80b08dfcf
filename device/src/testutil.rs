//! Utilities for testing drivers on a host, without hardware.

use embedded_hal::i2c::{Error, ErrorKind, ErrorType, NoAcknowledgeSource};
use embedded_hal_async::i2c::{I2c, Operation, SevenBitAddress};

use crate::drivers::sensors::bmp180;

/// Error produced by [`SimulatedBmp180`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulatedBusError(pub ErrorKind);

impl Error for SimulatedBusError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

// Coefficient block from the datasheet's worked example
const DATASHEET_EEPROM: [u8; 22] = [
    0x01, 0x98, // AC1 = 408
    0xFF, 0xB8, // AC2 = -72
    0xC7, 0xD1, // AC3 = -14383
    0x7F, 0xE5, // AC4 = 32741
    0x7F, 0xF5, // AC5 = 32757
    0x5A, 0x71, // AC6 = 23153
    0x18, 0x2E, // B1 = 6190
    0x00, 0x04, // B2 = 4
    0x80, 0x00, // MB = -32768
    0xDD, 0xF9, // MC = -8711
    0x0B, 0x34, // MD = 2868
];

/// In-memory double of a BMP180 behind an I2C bus: a register file plus just
/// enough conversion behavior to drive the full acquisition path.
///
/// Conversions complete instantly — the busy bit reads back clear as soon as
/// a command lands, unless [`stall_conversions`](Self::stall_conversions)
/// pins it.
pub struct SimulatedBmp180 {
    eeprom: [u8; 22],
    chip_id: u8,
    ctrl_meas: u8,
    out: [u8; 3],
    pointer: u8,
    raw_temperature: i16,
    raw_pressure: u32,
    stalled: bool,
    fail_next: Option<ErrorKind>,
}

impl SimulatedBmp180 {
    /// A device programmed with the datasheet example: its coefficient set,
    /// raw temperature 27898 and raw pressure 23843.
    pub fn new() -> Self {
        Self::with_raw_sample(27898, 23843)
    }

    pub fn with_raw_sample(raw_temperature: i16, raw_pressure: u32) -> Self {
        Self {
            eeprom: DATASHEET_EEPROM,
            chip_id: bmp180::CHIP_ID,
            ctrl_meas: 0,
            out: [0; 3],
            pointer: 0,
            raw_temperature,
            raw_pressure,
            stalled: false,
            fail_next: None,
        }
    }

    pub fn set_chip_id(&mut self, id: u8) {
        self.chip_id = id;
    }

    /// Clobber one coefficient word, as a failed EEPROM transfer would.
    pub fn corrupt_eeprom(&mut self) {
        self.eeprom[0] = 0xFF;
        self.eeprom[1] = 0xFF;
    }

    /// Make every subsequent conversion hang with the busy bit set.
    pub fn stall_conversions(&mut self) {
        self.stalled = true;
    }

    /// Fail the next bus transaction with the given error kind.
    pub fn fail_next(&mut self, kind: ErrorKind) {
        self.fail_next = Some(kind);
    }

    fn register_write(&mut self, register: u8, value: u8) {
        match register {
            0xF4 => self.start_conversion(value),
            0xE0 if value == 0xB6 => {
                self.ctrl_meas = 0;
                self.out = [0; 3];
            }
            _ => {}
        }
    }

    fn start_conversion(&mut self, command: u8) {
        if self.stalled {
            self.ctrl_meas = command | 0x20;
            return;
        }
        self.ctrl_meas = command & !0x20;

        if command == 0x2E {
            let be = (self.raw_temperature as u16).to_be_bytes();
            self.out = [be[0], be[1], 0];
        } else if command & 0x3F == 0x34 {
            let oss = command >> 6;
            let raw = self.raw_pressure << (8 - oss);
            self.out = [(raw >> 16) as u8, (raw >> 8) as u8, raw as u8];
        }
    }

    fn register_read(&self, register: u8) -> u8 {
        match register {
            0xAA..=0xBF => self.eeprom[(register - 0xAA) as usize],
            0xD0 => self.chip_id,
            0xF4 => self.ctrl_meas,
            0xF6..=0xF8 => self.out[(register - 0xF6) as usize],
            _ => 0,
        }
    }
}

impl Default for SimulatedBmp180 {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorType for SimulatedBmp180 {
    type Error = SimulatedBusError;
}

impl I2c<SevenBitAddress> for SimulatedBmp180 {
    async fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != bmp180::ADDR {
            return Err(SimulatedBusError(ErrorKind::NoAcknowledge(
                NoAcknowledgeSource::Address,
            )));
        }
        if let Some(kind) = self.fail_next.take() {
            return Err(SimulatedBusError(kind));
        }

        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(bytes) => {
                    let mut bytes = bytes.iter();
                    if let Some(register) = bytes.next() {
                        self.pointer = *register;
                        for value in bytes {
                            self.register_write(self.pointer, *value);
                            self.pointer = self.pointer.wrapping_add(1);
                        }
                    }
                }
                Operation::Read(buffer) => {
                    for byte in buffer.iter_mut() {
                        *byte = self.register_read(self.pointer);
                        self.pointer = self.pointer.wrapping_add(1);
                    }
                }
            }
        }
        Ok(())
    }
}
