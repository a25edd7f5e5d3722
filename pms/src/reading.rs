//! Particulate-matter readings and their classification against safety thresholds.

use std::fmt;

/// One of the three mass-concentration size classes reported by the sensor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Channel {
    Pm1_0,
    Pm2_5,
    Pm10,
}

use self::Channel::*;

impl Channel {
    /// All channels in report order.
    pub const ALL: [Channel; 3] = [Pm1_0, Pm2_5, Pm10];

    pub fn label(self) -> &'static str {
        match self {
            Pm1_0 => "PM 1.0",
            Pm2_5 => "PM 2.5",
            Pm10 => "PM 10",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mass concentrations in ug/m3.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Reading {
    pub pm1_0: u16,
    pub pm2_5: u16,
    pub pm10: u16,
}

impl Reading {
    pub fn new(pm1_0: u16, pm2_5: u16, pm10: u16) -> Reading {
        Reading { pm1_0, pm2_5, pm10 }
    }

    pub fn get(&self, channel: Channel) -> u16 {
        match channel {
            Pm1_0 => self.pm1_0,
            Pm2_5 => self.pm2_5,
            Pm10 => self.pm10,
        }
    }

    pub fn classify(&self, thresholds: &Thresholds) -> Health {
        Health {
            pm1_0: thresholds.level(Pm1_0, self.pm1_0),
            pm2_5: thresholds.level(Pm2_5, self.pm2_5),
            pm10: thresholds.level(Pm10, self.pm10),
        }
    }
}

/// Formats the reading as an output log line.
impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "PM1.0: {} | PM 2.5: {} | PM 10: {} || Unit: ug/m3",
            self.pm1_0, self.pm2_5, self.pm10
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Level {
    Safe,
    Risk,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Level::Safe => f.write_str("SAFE"),
            Level::Risk => f.write_str("RISK"),
        }
    }
}

/// Per-channel risk limits.  A value strictly below its limit is safe.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Thresholds {
    pub pm1_0: u16,
    pub pm2_5: u16,
    pub pm10: u16,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            pm1_0: 10,
            pm2_5: 15,
            pm10: 45,
        }
    }
}

impl Thresholds {
    pub fn limit(&self, channel: Channel) -> u16 {
        match channel {
            Pm1_0 => self.pm1_0,
            Pm2_5 => self.pm2_5,
            Pm10 => self.pm10,
        }
    }

    pub fn level(&self, channel: Channel, value: u16) -> Level {
        if value < self.limit(channel) {
            Level::Safe
        } else {
            Level::Risk
        }
    }
}

/// The classification of a `Reading`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Health {
    pub pm1_0: Level,
    pub pm2_5: Level,
    pub pm10: Level,
}

impl Health {
    pub fn get(&self, channel: Channel) -> Level {
        match channel {
            Pm1_0 => self.pm1_0,
            Pm2_5 => self.pm2_5,
            Pm10 => self.pm10,
        }
    }

    pub fn is_safe(&self) -> bool {
        Channel::ALL.iter().all(|c| self.get(*c) == Level::Safe)
    }
}
