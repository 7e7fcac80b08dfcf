use bmp180_device::drivers::sensors::bmp180::{
    Bmp180, Bmp180Error, CalibrationError, Oversampling,
};
use bmp180_device::testutil::SimulatedBmp180;
use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
use futures::executor::block_on;
use std::sync::Once;

static INIT: Once = Once::new();

fn setup() {
    INIT.call_once(|| {
        env_logger::init();
    });
}

#[test]
fn acquires_the_reference_sample() {
    setup();
    block_on(async {
        let mut bus = SimulatedBmp180::new();
        let mut bmp180 = Bmp180::new();

        bmp180.initialize(&mut bus).await.unwrap();
        let acquisition = bmp180.read(&mut bus).await.unwrap();

        assert_eq!(acquisition.temperature.raw_value(), 15.0);
        assert_eq!(acquisition.pressure.pascals(), 69964);
    });
}

#[test]
fn acquisition_is_repeatable() {
    setup();
    block_on(async {
        let mut bus = SimulatedBmp180::new();
        let mut bmp180 = Bmp180::new();
        bmp180.initialize(&mut bus).await.unwrap();

        let first = bmp180.read(&mut bus).await.unwrap();
        let second = bmp180.read(&mut bus).await.unwrap();

        assert_eq!(
            first.temperature.raw_value(),
            second.temperature.raw_value()
        );
        assert_eq!(first.pressure, second.pressure);
    });
}

#[test]
fn rejects_unknown_chip_id() {
    setup();
    block_on(async {
        let mut bus = SimulatedBmp180::new();
        bus.set_chip_id(0x58);
        let mut bmp180 = Bmp180::new();

        assert!(matches!(
            bmp180.initialize(&mut bus).await,
            Err(Bmp180Error::UnknownChipId(0x58))
        ));
    });
}

#[test]
fn read_requires_initialization() {
    setup();
    block_on(async {
        let mut bus = SimulatedBmp180::new();
        let mut bmp180 = Bmp180::new();

        assert!(matches!(
            bmp180.read(&mut bus).await,
            Err(Bmp180Error::NotCalibrated)
        ));
    });
}

#[test]
fn propagates_bus_errors() {
    setup();
    block_on(async {
        let mut bus = SimulatedBmp180::new();
        let mut bmp180 = Bmp180::new();
        bmp180.initialize(&mut bus).await.unwrap();

        bus.fail_next(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data));
        match bmp180.read(&mut bus).await {
            Err(Bmp180Error::I2c(e)) => {
                assert_eq!(e.0, ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data));
            }
            other => panic!("expected a bus error, got {:?}", other),
        }
    });
}

#[test]
fn times_out_when_conversion_never_completes() {
    setup();
    block_on(async {
        let mut bus = SimulatedBmp180::new();
        let mut bmp180 = Bmp180::new();
        bmp180.initialize(&mut bus).await.unwrap();

        bus.stall_conversions();
        assert!(matches!(
            bmp180.read(&mut bus).await,
            Err(Bmp180Error::ConversionTimeout)
        ));
    });
}

#[test]
fn soft_reset_requires_reinitialization() {
    setup();
    block_on(async {
        let mut bus = SimulatedBmp180::new();
        let mut bmp180 = Bmp180::new();
        bmp180.initialize(&mut bus).await.unwrap();
        bmp180.read(&mut bus).await.unwrap();

        bmp180.reset(&mut bus).await.unwrap();
        assert!(matches!(
            bmp180.read(&mut bus).await,
            Err(Bmp180Error::NotCalibrated)
        ));

        bmp180.initialize(&mut bus).await.unwrap();
        assert_eq!(bmp180.read(&mut bus).await.unwrap().pressure.pascals(), 69964);
    });
}

#[test]
fn oversampling_settings_acquire() {
    setup();
    block_on(async {
        let mut bus = SimulatedBmp180::new();
        let mut bmp180 = Bmp180::with_oversampling(Oversampling::UltraHighResolution);
        bmp180.initialize(&mut bus).await.unwrap();

        // Same raw codes pushed through the full-resolution read path.
        let acquisition = bmp180.read(&mut bus).await.unwrap();
        assert_eq!(acquisition.temperature.raw_value(), 15.0);
        assert_eq!(acquisition.pressure.pascals(), 7831);
    });
}

#[test]
fn rejects_corrupt_calibration() {
    setup();
    block_on(async {
        let mut bus = SimulatedBmp180::new();
        bus.corrupt_eeprom();
        let mut bmp180 = Bmp180::new();

        assert!(matches!(
            bmp180.initialize(&mut bus).await,
            Err(Bmp180Error::Calibration(
                CalibrationError::CorruptCoefficient
            ))
        ));
    });
}
