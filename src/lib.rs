//! Platform-agnostic driver for the DS3231 real-time clock.
//!
//! The DS3231 keeps time in battery-backed BCD registers and measures its
//! own die temperature. This crate decodes those registers into semantic
//! values ([`DateTime`], [`ControlState`], [`Temperature`]) and encodes
//! them back, moving each register group in a single bus transaction so
//! the clock is never observed mid-tick. Every bus or decode failure is
//! returned as a [`Ds3231Error`]; nothing in the driver panics, retries or
//! blocks beyond one I2C transfer, so it drops into a long-running poll
//! loop without ceremony.
//!
//! The blocking driver lives at the crate root; an equivalent async driver
//! is available in [`asynch`] with the `async` feature.
//!
//! # Example
//!
//! ```rust,ignore
//! use ds3231_core::{Config, Ds3231, TimeRepresentation, DEVICE_ADDRESS};
//!
//! let mut rtc = Ds3231::new(i2c, DEVICE_ADDRESS);
//!
//! // Start the oscillator, leaving the rest of the control register alone.
//! rtc.configure(&Config {
//!     time_representation: TimeRepresentation::TwentyFourHour,
//!     oscillator_enabled: true,
//! })?;
//!
//! loop {
//!     match rtc.datetime() {
//!         Ok(now) => info!("{:?} {:02}:{:02}", now.hour, now.minutes, now.seconds),
//!         Err(_) => info!("unable to read datetime"),
//!     }
//!     delay.delay_ms(1000);
//! }
//! ```

#![no_std]

#[macro_use]
mod macros;

mod bcd;
pub mod control;
pub mod datetime;
pub mod registers;
pub mod temperature;

#[cfg(feature = "async")]
pub mod asynch;

use embedded_hal::i2c::I2c;

pub use control::ControlState;
pub use datetime::{DateTime, DateTimeError, Field, Hour, Meridian};
pub use registers::{
    Control, Date, Day, Hours, Minutes, Month, RegAddr, Seconds, TempDegrees, TempFraction,
    TimeRepresentation, Year, DEVICE_ADDRESS,
};
pub use temperature::Temperature;

/// Device configuration applied by [`Ds3231::configure`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Config {
    /// Hour format the chip should run in.
    pub time_representation: TimeRepresentation,
    /// Whether the oscillator keeps running on battery power.
    pub oscillator_enabled: bool,
}

/// Driver errors.
#[derive(Debug, PartialEq)]
pub enum Ds3231Error<I2CE> {
    /// The bus transaction failed; the register state on the chip is
    /// whatever the partial transfer left behind, which the driver cannot
    /// distinguish from untouched.
    I2c(I2CE),
    /// The time block failed to decode or encode; no value was produced.
    DateTime(DateTimeError),
}

impl<I2CE> From<I2CE> for Ds3231Error<I2CE> {
    fn from(e: I2CE) -> Self {
        Ds3231Error::I2c(e)
    }
}

/// DS3231 blocking driver.
///
/// Owns the bus handle for its lifetime; one method call is one or two
/// short I2C transfers. Callers sharing a bus between devices arrange
/// exclusion outside the driver.
pub struct Ds3231<I2C: I2c> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Ds3231<I2C> {
    /// Creates a driver for the device at `address` (normally
    /// [`DEVICE_ADDRESS`]).
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Consumes the driver and hands the bus handle back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Applies `config` with two read-modify-write cycles: the oscillator
    /// bit through the control register and the hour-format bit through
    /// the hours register. All other bits in both registers are
    /// preserved.
    pub fn configure(&mut self, config: &Config) -> Result<(), Ds3231Error<I2C::Error>> {
        let mut control = self.control()?;
        control.oscillator_enabled = config.oscillator_enabled;
        debug!("control: {:?}", control);
        self.set_control(&control)?;

        let mut hours = self.hour()?;
        hours.set_time_representation(config.time_representation);
        self.set_hour(hours)?;
        Ok(())
    }

    /// Reads and decodes the control register.
    pub fn control(&mut self) -> Result<ControlState, Ds3231Error<I2C::Error>> {
        let mut data = [0];
        self.i2c
            .write_read(self.address, &[RegAddr::Control as u8], &mut data)?;
        Ok(ControlState::from(data[0]))
    }

    /// Writes the control register.
    pub fn set_control(&mut self, state: &ControlState) -> Result<(), Ds3231Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[RegAddr::Control as u8, u8::from(*state)])?;
        Ok(())
    }

    /// Reads the 7-byte time block in one transaction and decodes it.
    ///
    /// On any failure no value is produced, so the caller's previous
    /// reading stays intact.
    pub fn datetime(&mut self) -> Result<DateTime, Ds3231Error<I2C::Error>> {
        let mut data = [0; 7];
        self.i2c
            .write_read(self.address, &[RegAddr::Seconds as u8], &mut data)?;
        DateTime::from_registers(data).map_err(Ds3231Error::DateTime)
    }

    /// Encodes `datetime` and writes the 7-byte time block in one
    /// transaction.
    pub fn set_datetime(&mut self, datetime: &DateTime) -> Result<(), Ds3231Error<I2C::Error>> {
        let data = datetime.to_registers().map_err(Ds3231Error::DateTime)?;
        self.i2c.write(
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
        )?;
        Ok(())
    }

    /// Reads the 2-byte temperature block in one transaction.
    pub fn temperature(&mut self) -> Result<Temperature, Ds3231Error<I2C::Error>> {
        let mut data = [0; 2];
        self.i2c
            .write_read(self.address, &[RegAddr::TempMsb as u8], &mut data)?;
        Ok(Temperature::from(data))
    }

    /// Reads the temperature as degrees Celsius.
    #[cfg(feature = "temperature_f32")]
    pub fn temperature_f32(&mut self) -> Result<f32, Ds3231Error<I2C::Error>> {
        Ok(self.temperature()?.to_celsius())
    }
}

// Raw accessors for the individual time registers.
macro_rules! register_access {
    ($(($name:ident, $regaddr:expr, $typ:ident)),+) => {
        impl<I2C: I2c> Ds3231<I2C> {
            $(
                paste::paste! {
                    #[doc = concat!("Reads the raw ", stringify!($name), " register.")]
                    pub fn $name(&mut self) -> Result<$typ, Ds3231Error<I2C::Error>> {
                        let mut data = [0];
                        self.i2c
                            .write_read(self.address, &[$regaddr as u8], &mut data)?;
                        Ok($typ::from(data[0]))
                    }

                    #[doc = concat!("Writes the raw ", stringify!($name), " register.")]
                    pub fn [<set_ $name>](&mut self, value: $typ) -> Result<(), Ds3231Error<I2C::Error>> {
                        self.i2c
                            .write(self.address, &[$regaddr as u8, value.into()])?;
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
