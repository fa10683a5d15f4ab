//! Packed 3/3/2-bit color and its 24-bit expansion.

use std::fmt;
use std::str::FromStr;

use crate::error::{Channel, ScalarError, ScalarResult};
use crate::kind::ScalarKind;

/// An RGB color packed into one byte as `rrrgggbb`.
///
/// Channel ranges are enforced at construction: red and green hold 3 bits
/// (0..=7), blue holds 2 bits (0..=3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub struct Rgb332 {
    red: u8,
    green: u8,
    blue: u8,
}

impl Rgb332 {
    /// Largest red channel value.
    pub const RED_MAX: u8 = 0b111;
    /// Largest green channel value.
    pub const GREEN_MAX: u8 = 0b111;
    /// Largest blue channel value.
    pub const BLUE_MAX: u8 = 0b11;

    pub const BLACK: Self = Self::from_packed(0b000_000_00);
    pub const WHITE: Self = Self::from_packed(0b111_111_11);
    pub const RED: Self = Self::from_packed(0b111_000_00);
    pub const GREEN: Self = Self::from_packed(0b000_111_00);
    pub const BLUE: Self = Self::from_packed(0b000_000_11);
    pub const YELLOW: Self = Self::from_packed(0b111_111_00);
    pub const CYAN: Self = Self::from_packed(0b000_111_11);
    pub const MAGENTA: Self = Self::from_packed(0b111_000_11);

    /// Named palette accepted by the text form.
    pub const NAMED: [(&'static str, Self); 8] = [
        ("black", Self::BLACK),
        ("white", Self::WHITE),
        ("red", Self::RED),
        ("green", Self::GREEN),
        ("blue", Self::BLUE),
        ("yellow", Self::YELLOW),
        ("cyan", Self::CYAN),
        ("magenta", Self::MAGENTA),
    ];

    /// Creates a color from reduced-depth channels.
    ///
    /// Accepts any integer width so callers can pass unchecked input; the
    /// channel is rejected rather than masked when it does not fit.
    pub fn new(
        red: impl Into<i64>,
        green: impl Into<i64>,
        blue: impl Into<i64>,
    ) -> ScalarResult<Self> {
        Ok(Self {
            red: check_channel(Channel::Red, red.into(), Self::RED_MAX)?,
            green: check_channel(Channel::Green, green.into(), Self::GREEN_MAX)?,
            blue: check_channel(Channel::Blue, blue.into(), Self::BLUE_MAX)?,
        })
    }

    /// Unpacks a wire byte. Every byte is a valid color.
    #[must_use]
    pub const fn from_packed(byte: u8) -> Self {
        Self {
            red: (byte >> 5) & Self::RED_MAX,
            green: (byte >> 2) & Self::GREEN_MAX,
            blue: byte & Self::BLUE_MAX,
        }
    }

    /// Returns the wire byte.
    #[must_use]
    pub const fn packed(self) -> u8 {
        (self.red << 5) | (self.green << 2) | self.blue
    }

    #[must_use]
    pub const fn red(self) -> u8 {
        self.red
    }

    #[must_use]
    pub const fn green(self) -> u8 {
        self.green
    }

    #[must_use]
    pub const fn blue(self) -> u8 {
        self.blue
    }

    /// Returns the channels as a `(red, green, blue)` tuple.
    #[must_use]
    pub const fn channels(self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// Expands to 8 bits per channel by bit replication.
    ///
    /// The high bits are repeated into the low bits, so the extremes map
    /// exactly: 7 becomes 255 and 0 stays 0.
    #[must_use]
    pub const fn to_full_color(self) -> Rgb888 {
        let (r, g, b) = (self.red, self.green, self.blue);
        Rgb888 {
            red: (r << 5) | (r << 2) | (r >> 1),
            green: (g << 5) | (g << 2) | (g >> 1),
            blue: (b << 6) | (b << 4) | (b << 2) | b,
        }
    }

    /// Truncates an 8-bit-per-channel color (lossy, no rounding).
    #[must_use]
    pub const fn from_full_color(color: Rgb888) -> Self {
        Self {
            red: color.red >> 5,
            green: color.green >> 5,
            blue: color.blue >> 6,
        }
    }

    /// Looks up a palette name.
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        Self::NAMED
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, color)| *color)
    }
}

fn check_channel(channel: Channel, value: i64, max: u8) -> ScalarResult<u8> {
    match u8::try_from(value) {
        Ok(channel_value) if channel_value <= max => Ok(channel_value),
        _ => Err(ScalarError::ChannelOutOfRange {
            channel,
            value,
            max,
        }),
    }
}

/// Formats as `r,g,b`, the same form [`FromStr`] accepts.
impl fmt::Display for Rgb332 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.red, self.green, self.blue)
    }
}

impl FromStr for Rgb332 {
    type Err = ScalarError;

    fn from_str(s: &str) -> ScalarResult<Self> {
        let text = s.trim();
        if let Some(color) = Self::named(text) {
            return Ok(color);
        }
        let parse_err = || ScalarError::Parse {
            kind: ScalarKind::Rgb332,
            input: s.to_string(),
        };
        let mut parts = text.split(',').map(|part| part.trim().parse::<i64>());
        let (Some(Ok(red)), Some(Ok(green)), Some(Ok(blue)), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(parse_err());
        };
        Self::new(red, green, blue)
    }
}

impl From<Rgb332> for String {
    fn from(color: Rgb332) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for Rgb332 {
    type Error = ScalarError;

    fn try_from(text: String) -> ScalarResult<Self> {
        text.parse()
    }
}

/// A 24-bit color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb888 {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb888 {
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

impl From<Rgb332> for Rgb888 {
    fn from(color: Rgb332) -> Self {
        color.to_full_color()
    }
}

impl fmt::Display for Rgb888 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}
