//! Register addresses and bitfield wrappers for the DS3231.
//!
//! Each register is wrapped in an explicit bitfield type naming the hardware
//! bit ranges, so decoding never depends on an in-memory struct layout
//! matching the wire layout. The wrappers convert to and from the raw byte
//! losslessly; interpretation and validation live in the model modules.

use bitfield::bitfield;

/// Fixed 7-bit I2C address of the device.
pub const DEVICE_ADDRESS: u8 = 0x68;

/// Register addresses for the DS3231 RTC.
#[allow(unused)]
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegAddr {
    /// Seconds register (0-59), start of the 7-byte time block
    Seconds = 0x00,
    /// Minutes register (0-59)
    Minutes = 0x01,
    /// Hours register (1-12 + AM/PM or 0-23)
    Hours = 0x02,
    /// Day-of-week register (1-7)
    Day = 0x03,
    /// Date register (1-31)
    Date = 0x04,
    /// Month register (1-12) with century flag
    Month = 0x05,
    /// Year register (0-99)
    Year = 0x06,
    /// Control register
    Control = 0x0E,
    /// Temperature MSB, start of the 2-byte temperature block
    TempMsb = 0x11,
    /// Temperature LSB (quarter-degree fraction)
    TempLsb = 0x12,
}

/// Time representation format, selected by bit 6 of the hours register.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeRepresentation {
    /// 24-hour format (0-23)
    TwentyFourHour = 0,
    /// 12-hour format (1-12 + AM/PM)
    TwelveHour = 1,
}

impl From<u8> for TimeRepresentation {
    fn from(v: u8) -> Self {
        // single-bit field, any set value selects 12-hour mode
        match v {
            0 => TimeRepresentation::TwentyFourHour,
            _ => TimeRepresentation::TwelveHour,
        }
    }
}

impl From<TimeRepresentation> for u8 {
    fn from(v: TimeRepresentation) -> Self {
        v as u8
    }
}

// Generates the From<u8> and Into<u8> implementations for a register type.
macro_rules! from_register_u8 {
    ($typ:ident) => {
        impl From<u8> for $typ {
            fn from(v: u8) -> Self {
                $typ(v)
            }
        }
        impl From<$typ> for u8 {
            fn from(v: $typ) -> Self {
                v.0
            }
        }
    };
}

bitfield! {
    /// Seconds register (0-59) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Seconds(u8);
    impl Debug;
    /// Tens digit (0-5)
    pub tens, set_tens: 6, 4;
    /// Units digit (0-9)
    pub units, set_units: 3, 0;
}
from_register_u8!(Seconds);

#[cfg(feature = "defmt")]
impl defmt::Format for Seconds {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Seconds({}s)", 10 * self.tens() + self.units());
    }
}

bitfield! {
    /// Minutes register (0-59) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Minutes(u8);
    impl Debug;
    /// Tens digit (0-5)
    pub tens, set_tens: 6, 4;
    /// Units digit (0-9)
    pub units, set_units: 3, 0;
}
from_register_u8!(Minutes);

#[cfg(feature = "defmt")]
impl defmt::Format for Minutes {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Minutes({}m)", 10 * self.tens() + self.units());
    }
}

bitfield! {
    /// Hours register with format selection and BCD encoding.
    ///
    /// Bit 5 is overloaded by the chip: in 24-hour mode it is the
    /// twenty-hours digit, in 12-hour mode it is the PM flag.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Hours(u8);
    impl Debug;
    /// Time representation format (12/24 hour)
    pub from into TimeRepresentation, time_representation, set_time_representation: 6, 6;
    /// PM flag (12-hour) or twenty-hours digit (24-hour)
    pub pm_or_twenty, set_pm_or_twenty: 5, 5;
    /// Ten-hours digit
    pub tens, set_tens: 4, 4;
    /// Units digit (0-9)
    pub units, set_units: 3, 0;
}
from_register_u8!(Hours);

#[cfg(feature = "defmt")]
impl defmt::Format for Hours {
    fn format(&self, f: defmt::Formatter) {
        let hours = 10 * self.tens() + self.units();
        match self.time_representation() {
            TimeRepresentation::TwentyFourHour => {
                defmt::write!(f, "Hours({}h)", hours + 20 * self.pm_or_twenty());
            }
            TimeRepresentation::TwelveHour => {
                let meridian = if self.pm_or_twenty() != 0 { "PM" } else { "AM" };
                defmt::write!(f, "Hours({}h {})", hours, meridian);
            }
        }
    }
}

bitfield! {
    /// Day-of-week register (1-7).
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Day(u8);
    impl Debug;
    /// Day of week (1-7)
    pub weekday, set_weekday: 2, 0;
}
from_register_u8!(Day);

#[cfg(feature = "defmt")]
impl defmt::Format for Day {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Day({})", self.weekday());
    }
}

bitfield! {
    /// Date register (1-31) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Date(u8);
    impl Debug;
    /// Tens digit (0-3)
    pub tens, set_tens: 5, 4;
    /// Units digit (0-9)
    pub units, set_units: 3, 0;
}
from_register_u8!(Date);

#[cfg(feature = "defmt")]
impl defmt::Format for Date {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Date({})", 10 * self.tens() + self.units());
    }
}

bitfield! {
    /// Month register (1-12) with century flag and BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Month(u8);
    impl Debug;
    /// Century flag, toggled by the chip when the year rolls over 99
    pub century, set_century: 7;
    /// Tens digit (0-1)
    pub tens, set_tens: 4, 4;
    /// Units digit (0-9)
    pub units, set_units: 3, 0;
}
from_register_u8!(Month);

#[cfg(feature = "defmt")]
impl defmt::Format for Month {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Month({}", 10 * self.tens() + self.units());
        if self.century() {
            defmt::write!(f, ", century");
        }
        defmt::write!(f, ")");
    }
}

bitfield! {
    /// Year register (0-99) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Year(u8);
    impl Debug;
    /// Tens digit (0-9)
    pub tens, set_tens: 7, 4;
    /// Units digit (0-9)
    pub units, set_units: 3, 0;
}
from_register_u8!(Year);

#[cfg(feature = "defmt")]
impl defmt::Format for Year {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Year({})", 10 * self.tens() + self.units());
    }
}

bitfield! {
    /// Control register.
    ///
    /// Only the oscillator-enable bit is interpreted by this driver; the
    /// alarm, interrupt and rate-select bits are carried through untouched.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Control(u8);
    impl Debug;
    /// EOSC-bar: when set, the oscillator stops on battery power
    pub disable_oscillator, set_disable_oscillator: 7;
    /// Alarm, interrupt and rate-select bits, not interpreted here
    pub passthrough, set_passthrough: 6, 0;
}
from_register_u8!(Control);

#[cfg(feature = "defmt")]
impl defmt::Format for Control {
    fn format(&self, f: defmt::Formatter) {
        if self.disable_oscillator() {
            defmt::write!(f, "Control(oscillator disabled");
        } else {
            defmt::write!(f, "Control(oscillator enabled");
        }
        defmt::write!(f, ", passthrough={=u8:b})", self.passthrough());
    }
}

bitfield! {
    /// Temperature MSB: two's-complement whole degrees Celsius.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct TempDegrees(u8);
    impl Debug;
    /// Whole degrees (-128 to +127, chip-limited to about -40..125)
    pub i8, degrees, set_degrees: 7, 0;
}
from_register_u8!(TempDegrees);

#[cfg(feature = "defmt")]
impl defmt::Format for TempDegrees {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "TempDegrees({}°C)", self.degrees());
    }
}

bitfield! {
    /// Temperature LSB: quarter-degree fraction in the top two bits.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct TempFraction(u8);
    impl Debug;
    /// Quarter-degrees (0-3), remaining bits reserved
    pub quarters, set_quarters: 7, 6;
}
from_register_u8!(TempFraction);

#[cfg(feature = "defmt")]
impl defmt::Format for TempFraction {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "TempFraction({}/4°C)", self.quarters());
    }
}
