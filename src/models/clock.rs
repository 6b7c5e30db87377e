// Hora de reloj dentro de un día (minutos desde medianoche).
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CatalogError;

const AM_MARK: char = 'ص';
const PM_MARK: char = 'م';

/// Minutos desde medianoche, siempre en `0..=1439`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    pub const LAST_MINUTE: u16 = 24 * 60 - 1;

    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes <= Self::LAST_MINUTE).then_some(ClockTime(minutes))
    }

    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(ClockTime(hour * 60 + minute))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Acepta "HH:MM" (24h) y la forma del scraper "h:mm ص" / "h:mm م".
    pub fn parse(raw: &str) -> Result<Self, CatalogError> {
        let s = raw.trim();
        let invalid = || CatalogError::InvalidTime(raw.to_string());

        let (body, period) = if let Some(rest) = s.strip_suffix(AM_MARK) {
            (rest.trim_end(), Some(false))
        } else if let Some(rest) = s.strip_suffix(PM_MARK) {
            (rest.trim_end(), Some(true))
        } else {
            (s, None)
        };

        let t = NaiveTime::parse_from_str(body, "%H:%M").map_err(|_| invalid())?;
        let mut hour = t.hour() as u16;
        match period {
            // 12 ص es medianoche, 12 م es mediodía
            Some(false) if hour == 12 => hour = 0,
            Some(true) if hour < 12 => hour += 12,
            Some(_) if hour > 12 => return Err(invalid()),
            _ => {}
        }
        ClockTime::from_hm(hour, t.minute() as u16).ok_or_else(invalid)
    }

    /// Formato de 12 horas de la interfaz ("9:05 ص").
    pub fn to_12_hour(self) -> String {
        let (h, m) = (self.hour(), self.minute());
        match h {
            0 => format!("12:{:02} {}", m, AM_MARK),
            12 => format!("12:{:02} {}", m, PM_MARK),
            h if h < 12 => format!("{}:{:02} {}", h, m, AM_MARK),
            h => format!("{}:{:02} {}", h - 12, m, PM_MARK),
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClockTime::parse(s)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ClockTime::parse(&s).map_err(serde::de::Error::custom)
    }
}
