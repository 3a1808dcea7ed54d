use std::fmt;

use crate::dataset::Dataset;
use crate::error::ConfigurationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    r: u8,
    g: u8,
    b: u8,
}

impl HexColor {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB`, case-insensitive.
    pub fn parse(team: &str, raw: &str) -> Result<Self, ConfigurationError> {
        let invalid = || ConfigurationError::InvalidColor {
            team: team.to_string(),
            value: raw.to_string(),
        };
        let hex = raw.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel =
            |idx: usize| u8::from_str_radix(&hex[idx..idx + 2], 16).map_err(|_| invalid());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Team name to display color. Entry order is kept so chart scales list teams the same way
/// the dataset does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorMap {
    entries: Vec<(String, HexColor)>,
}

impl ColorMap {
    pub fn from_hex<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, ConfigurationError> {
        let mut map = Self::default();
        for (team, raw) in pairs {
            map.insert(team, HexColor::parse(team, raw)?);
        }
        Ok(map)
    }

    /// Franchise colors for the IPL seed table.
    pub fn ipl() -> Self {
        let pairs = [
            ("Chennai Super Kings", HexColor::from_rgb(0xF9, 0xCD, 0x05)),
            ("Delhi Capitals", HexColor::from_rgb(0x17, 0x47, 0x9E)),
            ("Gujarat Titans", HexColor::from_rgb(0x1C, 0x23, 0x41)),
            ("Kolkata Knight Riders", HexColor::from_rgb(0x3A, 0x22, 0x5D)),
            ("Lucknow Super Giants", HexColor::from_rgb(0x00, 0x5F, 0xA2)),
            ("Mumbai Indians", HexColor::from_rgb(0x00, 0x4B, 0xA0)),
            ("Punjab Kings", HexColor::from_rgb(0xD7, 0x19, 0x20)),
            ("Rajasthan Royals", HexColor::from_rgb(0x25, 0x4A, 0xA5)),
            ("Royal Challengers Bangalore", HexColor::from_rgb(0xDA, 0x21, 0x28)),
            ("Sunrisers Hyderabad", HexColor::from_rgb(0xF2, 0x65, 0x22)),
        ];
        let mut map = Self::default();
        for (team, color) in pairs {
            map.insert(team, color);
        }
        map
    }

    /// Later inserts for the same team replace the earlier color in place.
    pub fn insert(&mut self, team: &str, color: HexColor) {
        if let Some(slot) = self.entries.iter_mut().find(|(name, _)| name == team) {
            slot.1 = color;
        } else {
            self.entries.push((team.to_string(), color));
        }
    }

    pub fn get(&self, team: &str) -> Option<HexColor> {
        self.entries
            .iter()
            .find(|(name, _)| name == team)
            .map(|(_, color)| *color)
    }

    /// Scale domain (team names) in insertion order.
    pub fn domain(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Scale range (hex strings) aligned with `domain`.
    pub fn range(&self) -> Vec<String> {
        self.entries.iter().map(|(_, color)| color.to_string()).collect()
    }

    /// Startup assertion: every team in the dataset has a color.
    pub fn validate_coverage(&self, dataset: &Dataset) -> Result<(), ConfigurationError> {
        for record in dataset.records() {
            color_of(&record.name, self)?;
        }
        Ok(())
    }
}

pub fn color_of(name: &str, colors: &ColorMap) -> Result<HexColor, ConfigurationError> {
    colors.get(name).ok_or_else(|| ConfigurationError::MissingColor {
        team: name.to_string(),
    })
}
