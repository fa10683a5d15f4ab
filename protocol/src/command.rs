//! Drawing commands and their wire layout.
//!
//! A command payload is its one-byte id followed by its fields in declared
//! order. Required fields come first; the trailing optional fields (color
//! and stroke width) may be omitted by a sender and then decode to their
//! defaults. The encoder always writes every field.

use std::fmt;

use scalar::{ByteReader, ByteWriter, Rgb332, ScalarResult};

use crate::error::{ProtocolError, ProtocolResult};

/// Default color for omitted color fields.
pub const DEFAULT_COLOR: Rgb332 = Rgb332::BLACK;

/// Default stroke width for omitted thickness/width fields.
pub const DEFAULT_WIDTH: u16 = 1;

/// Registered command ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum CommandId {
    ClearScreen = 0x01,
    ClearLayer = 0x02,
    DrawPoint = 0x10,
    DrawLine = 0x11,
    DrawRectangle = 0x12,
    DrawCircle = 0x13,
}

impl CommandId {
    pub const ALL: [Self; 6] = [
        Self::ClearScreen,
        Self::ClearLayer,
        Self::DrawPoint,
        Self::DrawLine,
        Self::DrawRectangle,
        Self::DrawCircle,
    ];

    /// Looks up a raw id byte.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0x01 => Some(Self::ClearScreen),
            0x02 => Some(Self::ClearLayer),
            0x10 => Some(Self::DrawPoint),
            0x11 => Some(Self::DrawLine),
            0x12 => Some(Self::DrawRectangle),
            0x13 => Some(Self::DrawCircle),
            _ => None,
        }
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ClearScreen => "ClearScreen",
            Self::ClearLayer => "ClearLayer",
            Self::DrawPoint => "DrawPoint",
            Self::DrawLine => "DrawLine",
            Self::DrawRectangle => "DrawRectangle",
            Self::DrawCircle => "DrawCircle",
        }
    }

    /// Encoded body size in bytes, id excluded, with every optional field
    /// present.
    #[must_use]
    pub const fn body_len(self) -> usize {
        match self {
            Self::ClearScreen => 0,
            Self::ClearLayer => 1,
            // x, y, layer, color, thickness
            Self::DrawPoint => 2 + 2 + 1 + 1 + 2,
            // x1, y1, x2, y2, layer, color, width
            Self::DrawLine | Self::DrawRectangle => 4 * 2 + 1 + 1 + 2,
            // x, y, r, layer, color, width
            Self::DrawCircle => 3 * 2 + 1 + 1 + 2,
        }
    }
}

impl TryFrom<u8> for CommandId {
    type Error = ProtocolError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::from_raw(raw).ok_or(ProtocolError::UnknownCommandId { id: raw })
    }
}

impl From<CommandId> for u8 {
    fn from(id: CommandId) -> Self {
        id.raw()
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One drawing or control operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Command {
    ClearScreen,
    ClearLayer {
        layer: u8,
    },
    DrawPoint {
        x: u16,
        y: u16,
        layer: u8,
        color: Rgb332,
        thickness: u16,
    },
    DrawLine {
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        layer: u8,
        color: Rgb332,
        width: u16,
    },
    /// Axis-aligned rectangle spanned by two opposite corners.
    DrawRectangle {
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        layer: u8,
        color: Rgb332,
        width: u16,
    },
    DrawCircle {
        x: u16,
        y: u16,
        r: u16,
        layer: u8,
        color: Rgb332,
        width: u16,
    },
}

impl Command {
    /// A point with default color and thickness.
    #[must_use]
    pub const fn point(x: u16, y: u16, layer: u8) -> Self {
        Self::DrawPoint {
            x,
            y,
            layer,
            color: DEFAULT_COLOR,
            thickness: DEFAULT_WIDTH,
        }
    }

    /// A line with default color and width.
    #[must_use]
    pub const fn line(x1: u16, y1: u16, x2: u16, y2: u16, layer: u8) -> Self {
        Self::DrawLine {
            x1,
            y1,
            x2,
            y2,
            layer,
            color: DEFAULT_COLOR,
            width: DEFAULT_WIDTH,
        }
    }

    /// A rectangle with default color and width.
    #[must_use]
    pub const fn rectangle(x1: u16, y1: u16, x2: u16, y2: u16, layer: u8) -> Self {
        Self::DrawRectangle {
            x1,
            y1,
            x2,
            y2,
            layer,
            color: DEFAULT_COLOR,
            width: DEFAULT_WIDTH,
        }
    }

    /// A circle with default color and width.
    #[must_use]
    pub const fn circle(x: u16, y: u16, r: u16, layer: u8) -> Self {
        Self::DrawCircle {
            x,
            y,
            r,
            layer,
            color: DEFAULT_COLOR,
            width: DEFAULT_WIDTH,
        }
    }

    /// Replaces the color of a draw command. Other commands are unchanged.
    #[must_use]
    pub fn with_color(mut self, new_color: Rgb332) -> Self {
        match &mut self {
            Self::DrawPoint { color, .. }
            | Self::DrawLine { color, .. }
            | Self::DrawRectangle { color, .. }
            | Self::DrawCircle { color, .. } => *color = new_color,
            Self::ClearScreen | Self::ClearLayer { .. } => {}
        }
        self
    }

    /// Replaces the thickness or stroke width of a draw command. Other
    /// commands are unchanged.
    #[must_use]
    pub fn with_width(mut self, new_width: u16) -> Self {
        match &mut self {
            Self::DrawPoint { thickness, .. } => *thickness = new_width,
            Self::DrawLine { width, .. }
            | Self::DrawRectangle { width, .. }
            | Self::DrawCircle { width, .. } => *width = new_width,
            Self::ClearScreen | Self::ClearLayer { .. } => {}
        }
        self
    }

    #[must_use]
    pub const fn id(&self) -> CommandId {
        match self {
            Self::ClearScreen => CommandId::ClearScreen,
            Self::ClearLayer { .. } => CommandId::ClearLayer,
            Self::DrawPoint { .. } => CommandId::DrawPoint,
            Self::DrawLine { .. } => CommandId::DrawLine,
            Self::DrawRectangle { .. } => CommandId::DrawRectangle,
            Self::DrawCircle { .. } => CommandId::DrawCircle,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.id().name()
    }

    /// Layer targeted by the command, if any.
    #[must_use]
    pub const fn layer(&self) -> Option<u8> {
        match *self {
            Self::ClearScreen => None,
            Self::ClearLayer { layer }
            | Self::DrawPoint { layer, .. }
            | Self::DrawLine { layer, .. }
            | Self::DrawRectangle { layer, .. }
            | Self::DrawCircle { layer, .. } => Some(layer),
        }
    }

    /// Size of [`encode`](Self::encode) output, id included.
    #[must_use]
    pub const fn encoded_len(&self) -> usize {
        1 + self.id().body_len()
    }

    /// Writes the id and every field, optional ones included.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_u8(self.id().raw());
        match *self {
            Self::ClearScreen => {}
            Self::ClearLayer { layer } => writer.write_u8(layer),
            Self::DrawPoint {
                x,
                y,
                layer,
                color,
                thickness,
            } => {
                writer.write_u16(x);
                writer.write_u16(y);
                writer.write_u8(layer);
                writer.write_rgb332(color);
                writer.write_u16(thickness);
            }
            Self::DrawLine {
                x1,
                y1,
                x2,
                y2,
                layer,
                color,
                width,
            }
            | Self::DrawRectangle {
                x1,
                y1,
                x2,
                y2,
                layer,
                color,
                width,
            } => {
                writer.write_u16(x1);
                writer.write_u16(y1);
                writer.write_u16(x2);
                writer.write_u16(y2);
                writer.write_u8(layer);
                writer.write_rgb332(color);
                writer.write_u16(width);
            }
            Self::DrawCircle {
                x,
                y,
                r,
                layer,
                color,
                width,
            } => {
                writer.write_u16(x);
                writer.write_u16(y);
                writer.write_u16(r);
                writer.write_u8(layer);
                writer.write_rgb332(color);
                writer.write_u16(width);
            }
        }
    }

    /// Encodes the command payload (unframed).
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(self.encoded_len());
        self.write_to(&mut writer);
        writer.finish()
    }

    /// Encodes the command payload and wraps it in a COBS frame.
    #[must_use]
    pub fn encode_framed(&self) -> Vec<u8> {
        wire::cobs::encode(&self.encode())
    }

    /// Appends the framed command to `out`.
    pub fn encode_framed_into(&self, out: &mut Vec<u8>) {
        wire::cobs::encode_into(&self.encode(), out);
    }

    /// Decodes the fields of command `id` from `body`, which starts right
    /// after the id byte.
    ///
    /// Missing trailing optional fields take their defaults. Bytes left over
    /// after the last field are ignored.
    pub fn decode_body(id: CommandId, body: &[u8]) -> ScalarResult<Self> {
        let mut reader = ByteReader::new(body);
        let reader = &mut reader;
        let command = match id {
            CommandId::ClearScreen => Self::ClearScreen,
            CommandId::ClearLayer => Self::ClearLayer {
                layer: reader.read_u8()?,
            },
            CommandId::DrawPoint => {
                let x = reader.read_u16()?;
                let y = reader.read_u16()?;
                let layer = reader.read_u8()?;
                let (color, thickness) = read_style(reader)?;
                Self::DrawPoint {
                    x,
                    y,
                    layer,
                    color,
                    thickness,
                }
            }
            CommandId::DrawLine | CommandId::DrawRectangle => {
                let x1 = reader.read_u16()?;
                let y1 = reader.read_u16()?;
                let x2 = reader.read_u16()?;
                let y2 = reader.read_u16()?;
                let layer = reader.read_u8()?;
                let (color, width) = read_style(reader)?;
                if id == CommandId::DrawLine {
                    Self::DrawLine {
                        x1,
                        y1,
                        x2,
                        y2,
                        layer,
                        color,
                        width,
                    }
                } else {
                    Self::DrawRectangle {
                        x1,
                        y1,
                        x2,
                        y2,
                        layer,
                        color,
                        width,
                    }
                }
            }
            CommandId::DrawCircle => {
                let x = reader.read_u16()?;
                let y = reader.read_u16()?;
                let r = reader.read_u16()?;
                let layer = reader.read_u8()?;
                let (color, width) = read_style(reader)?;
                Self::DrawCircle {
                    x,
                    y,
                    r,
                    layer,
                    color,
                    width,
                }
            }
        };
        Ok(command)
    }
}

/// Reads the optional trailing color and stroke width.
fn read_style(reader: &mut ByteReader<'_>) -> ScalarResult<(Rgb332, u16)> {
    let color = reader.read_or(DEFAULT_COLOR, ByteReader::read_rgb332)?;
    let width = reader.read_or(DEFAULT_WIDTH, ByteReader::read_u16)?;
    Ok((color, width))
}

/// Decodes an unframed command payload.
///
/// # Errors
///
/// [`ProtocolError::EmptyInput`] for an empty payload,
/// [`ProtocolError::UnknownCommandId`] for an unregistered first byte, and
/// [`ProtocolError::Scalar`] when a required field is short.
pub fn command_from_bytes(data: &[u8]) -> ProtocolResult<Command> {
    let (&raw, body) = data.split_first().ok_or(ProtocolError::EmptyInput)?;
    let id = CommandId::try_from(raw)?;
    Ok(Command::decode_body(id, body)?)
}

/// Decodes a single COBS frame holding one command.
pub fn command_from_frame(frame: &[u8]) -> ProtocolResult<Command> {
    let payload = wire::cobs::decode(frame)?;
    command_from_bytes(&payload)
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClearScreen => write!(f, "ClearScreen()"),
            Self::ClearLayer { layer } => write!(f, "ClearLayer(layer={layer})"),
            Self::DrawPoint {
                x,
                y,
                layer,
                color,
                thickness,
            } => write!(
                f,
                "DrawPoint(x={x}, y={y}, layer={layer}, color=({color}), thickness={thickness})"
            ),
            Self::DrawLine {
                x1,
                y1,
                x2,
                y2,
                layer,
                color,
                width,
            }
            | Self::DrawRectangle {
                x1,
                y1,
                x2,
                y2,
                layer,
                color,
                width,
            } => write!(
                f,
                "{}(x1={x1}, y1={y1}, x2={x2}, y2={y2}, layer={layer}, color=({color}), width={width})",
                self.name()
            ),
            Self::DrawCircle {
                x,
                y,
                r,
                layer,
                color,
                width,
            } => write!(
                f,
                "DrawCircle(x={x}, y={y}, r={r}, layer={layer}, color=({color}), width={width})"
            ),
        }
    }
}
