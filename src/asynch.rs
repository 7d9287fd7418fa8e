//! Async implementation of the DS3231 driver.
//!
//! Mirrors the blocking driver over the `embedded-hal-async` I2C traits.
//! Only available with the `async` feature.
//!
//! # Example
//!
//! ```rust,ignore
//! use ds3231_core::asynch::Ds3231;
//!
//! let mut rtc = Ds3231::new(i2c, ds3231_core::DEVICE_ADDRESS);
//! rtc.configure(&config).await?;
//! let now = rtc.datetime().await?;
//! ```

use embedded_hal_async::i2c::I2c;

use crate::{
    Config, ControlState, DateTime, Date, Day, Ds3231Error, Hours, Minutes, Month, RegAddr,
    Seconds, Temperature, Year,
};

/// DS3231 async driver.
///
/// Same transaction layout and error behavior as the blocking
/// [`Ds3231`](crate::Ds3231); each method awaits one or two short I2C
/// transfers.
pub struct Ds3231<I2C: I2c> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Ds3231<I2C> {
    /// Creates a driver for the device at `address` (normally
    /// [`DEVICE_ADDRESS`](crate::DEVICE_ADDRESS)).
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Consumes the driver and hands the bus handle back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Applies `config` with two read-modify-write cycles, preserving all
    /// uninterpreted bits in both registers.
    pub async fn configure(&mut self, config: &Config) -> Result<(), Ds3231Error<I2C::Error>> {
        let mut control = self.control().await?;
        control.oscillator_enabled = config.oscillator_enabled;
        debug!("control: {:?}", control);
        self.set_control(&control).await?;

        let mut hours = self.hour().await?;
        hours.set_time_representation(config.time_representation);
        self.set_hour(hours).await?;
        Ok(())
    }

    /// Reads and decodes the control register.
    pub async fn control(&mut self) -> Result<ControlState, Ds3231Error<I2C::Error>> {
        let mut data = [0];
        self.i2c
            .write_read(self.address, &[RegAddr::Control as u8], &mut data)
            .await?;
        Ok(ControlState::from(data[0]))
    }

    /// Writes the control register.
    pub async fn set_control(
        &mut self,
        state: &ControlState,
    ) -> Result<(), Ds3231Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[RegAddr::Control as u8, u8::from(*state)])
            .await?;
        Ok(())
    }

    /// Reads the 7-byte time block in one transaction and decodes it.
    pub async fn datetime(&mut self) -> Result<DateTime, Ds3231Error<I2C::Error>> {
        let mut data = [0; 7];
        self.i2c
            .write_read(self.address, &[RegAddr::Seconds as u8], &mut data)
            .await?;
        DateTime::from_registers(data).map_err(Ds3231Error::DateTime)
    }

    /// Encodes `datetime` and writes the 7-byte time block in one
    /// transaction.
    pub async fn set_datetime(
        &mut self,
        datetime: &DateTime,
    ) -> Result<(), Ds3231Error<I2C::Error>> {
        let data = datetime.to_registers().map_err(Ds3231Error::DateTime)?;
        self.i2c
            .write(
                self.address,
                &[
                    RegAddr::Seconds as u8,
                    data[0],
                    data[1],
                    data[2],
                    data[3],
                    data[4],
                    data[5],
                    data[6],
                ],
            )
            .await?;
        Ok(())
    }

    /// Reads the 2-byte temperature block in one transaction.
    pub async fn temperature(&mut self) -> Result<Temperature, Ds3231Error<I2C::Error>> {
        let mut data = [0; 2];
        self.i2c
            .write_read(self.address, &[RegAddr::TempMsb as u8], &mut data)
            .await?;
        Ok(Temperature::from(data))
    }

    /// Reads the temperature as degrees Celsius.
    #[cfg(feature = "temperature_f32")]
    pub async fn temperature_f32(&mut self) -> Result<f32, Ds3231Error<I2C::Error>> {
        Ok(self.temperature().await?.to_celsius())
    }
}

// Raw accessors for the individual time registers.
macro_rules! register_access {
    ($(($name:ident, $regaddr:expr, $typ:ident)),+) => {
        impl<I2C: I2c> Ds3231<I2C> {
            $(
                paste::paste! {
                    #[doc = concat!("Reads the raw ", stringify!($name), " register.")]
                    pub async fn $name(&mut self) -> Result<$typ, Ds3231Error<I2C::Error>> {
                        let mut data = [0];
                        self.i2c
                            .write_read(self.address, &[$regaddr as u8], &mut data)
                            .await?;
                        Ok($typ::from(data[0]))
                    }

                    #[doc = concat!("Writes the raw ", stringify!($name), " register.")]
                    pub async fn [<set_ $name>](&mut self, value: $typ) -> Result<(), Ds3231Error<I2C::Error>> {
                        self.i2c
                            .write(self.address, &[$regaddr as u8, value.into()])
                            .await?;
                        Ok(())
                    }
                }
            )+
        }
    }
}

register_access!(
    (second, RegAddr::Seconds, Seconds),
    (minute, RegAddr::Minutes, Minutes),
    (hour, RegAddr::Hours, Hours),
    (day, RegAddr::Day, Day),
    (date, RegAddr::Date, Date),
    (month, RegAddr::Month, Month),
    (year, RegAddr::Year, Year)
);

#[cfg(test)]
mod tests {
    extern crate alloc;
    use alloc::vec;

    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};

    use super::*;
    use crate::{DateTimeError, Field, Hour, TimeRepresentation, DEVICE_ADDRESS};

    const TIME_BLOCK: [u8; 7] = [0x00, 0x30, 0x09, 0x03, 0x02, 0x10, 0x24];

    #[tokio::test]
    async fn test_async_read_datetime() {
        let mock = I2cMock::new(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::Seconds as u8],
            TIME_BLOCK.to_vec(),
        )]);
        let mut dev = Ds3231::new(mock, DEVICE_ADDRESS);

        let dt = dev.datetime().await.unwrap();
        assert_eq!(dt.hour, Hour::TwentyFourHour(9));
        assert_eq!(dt.minutes, 30);
        assert_eq!(dt.weekday, 3);
        assert_eq!(dt.day, 2);
        assert_eq!(dt.month, 10);
        assert_eq!(dt.year, 24);
        dev.i2c.done();
    }

    #[tokio::test]
    async fn test_async_set_datetime() {
        let mock = I2cMock::new(&[I2cTrans::write(
            DEVICE_ADDRESS,
            vec![
                RegAddr::Seconds as u8,
                0x00,
                0x30,
                0x09,
                0x03,
                0x02,
                0x10,
                0x24,
            ],
        )]);
        let mut dev = Ds3231::new(mock, DEVICE_ADDRESS);

        let dt = DateTime::from_registers(TIME_BLOCK).unwrap();
        dev.set_datetime(&dt).await.unwrap();
        dev.i2c.done();
    }

    #[tokio::test]
    async fn test_async_control_roundtrip() {
        let mock = I2cMock::new(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Control as u8], vec![0x9C]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Control as u8, 0x1C]),
        ]);
        let mut dev = Ds3231::new(mock, DEVICE_ADDRESS);

        let mut control = dev.control().await.unwrap();
        assert!(!control.oscillator_enabled);
        control.oscillator_enabled = true;
        dev.set_control(&control).await.unwrap();
        dev.i2c.done();
    }

    #[tokio::test]
    async fn test_async_configure() {
        let config = Config {
            time_representation: TimeRepresentation::TwentyFourHour,
            oscillator_enabled: true,
        };
        let mock = I2cMock::new(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Control as u8], vec![0x00]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Control as u8, 0x00]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Hours as u8], vec![0x00]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Hours as u8, 0x00]),
        ]);
        let mut dev = Ds3231::new(mock, DEVICE_ADDRESS);

        dev.configure(&config).await.unwrap();
        dev.i2c.done();
    }

    #[tokio::test]
    async fn test_async_read_temperature() {
        let mock = I2cMock::new(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::TempMsb as u8],
            vec![0xE7, 0x00],
        )]);
        let mut dev = Ds3231::new(mock, DEVICE_ADDRESS);

        let temp = dev.temperature().await.unwrap();
        assert_eq!(temp.degrees, -25);
        assert_eq!(temp.quarters, 0);
        dev.i2c.done();
    }

    #[tokio::test]
    async fn test_async_bus_failure_skips_decoding() {
        let mock = I2cMock::new(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::Seconds as u8],
            TIME_BLOCK.to_vec(),
        )
        .with_error(ErrorKind::Other)]);
        let mut dev = Ds3231::new(mock, DEVICE_ADDRESS);

        assert_eq!(
            dev.datetime().await,
            Err(Ds3231Error::I2c(ErrorKind::Other))
        );
        dev.i2c.done();
    }

    #[tokio::test]
    async fn test_async_decode_failure_reports_field() {
        let mut bad = TIME_BLOCK;
        bad[0] = 0x7A;
        let mock = I2cMock::new(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::Seconds as u8],
            bad.to_vec(),
        )]);
        let mut dev = Ds3231::new(mock, DEVICE_ADDRESS);

        assert_eq!(
            dev.datetime().await,
            Err(Ds3231Error::DateTime(DateTimeError::InvalidField(
                Field::Seconds
            )))
        );
        dev.i2c.done();
    }

    #[tokio::test]
    async fn test_async_register_accessors() {
        let mock = I2cMock::new(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Minutes as u8], vec![0x30]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Minutes as u8, 0x45]),
        ]);
        let mut dev = Ds3231::new(mock, DEVICE_ADDRESS);

        let minutes = dev.minute().await.unwrap();
        assert_eq!(minutes.tens(), 3);
        assert_eq!(minutes.units(), 0);
        dev.set_minute(Minutes::from(0x45)).await.unwrap();
        dev.i2c.done();
    }
}
