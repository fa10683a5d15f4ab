//! Inspection and debugging tools for rigviz command captures.
//!
//! A capture is a raw byte dump of a command stream: back-to-back COBS
//! frames, as a receiver would read them off the link.
//!
//! - Split a capture into frames and report each one
//! - Decode every frame into structured JSON
//! - Replay a capture onto a [`Scene`]
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to see what went over the wire.

use std::fmt::Write as _;

use protocol::{
    command_from_bytes, Command, CommandReceiver, Layer, MemoryLink, ProtocolError, ReceiveStats,
    Scene,
};
use serde::Serialize;
use wire::{cobs, FramingError, Limits};

/// What one frame of a capture turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    Command(Command),
    /// Frame decoded to an empty payload.
    Empty,
    Error(ProtocolError),
}

/// One frame located in a capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameReport {
    /// Offset of the frame's first byte.
    pub offset: usize,
    /// Frame length including the terminator.
    pub framed_len: usize,
    /// Payload length, when the frame decoded.
    pub payload_len: Option<usize>,
    pub outcome: FrameOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectReport {
    pub total_bytes: usize,
    pub frames: Vec<FrameReport>,
    /// Bytes after the last terminator.
    pub trailing_bytes: usize,
}

impl InspectReport {
    pub fn command_count(&self) -> usize {
        self.frames
            .iter()
            .filter(|frame| matches!(frame.outcome, FrameOutcome::Command(_)))
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.frames
            .iter()
            .filter(|frame| matches!(frame.outcome, FrameOutcome::Error(_)))
            .count()
    }
}

/// Splits a capture at every terminator and decodes each frame on its own.
pub fn inspect_capture(bytes: &[u8], limits: &Limits) -> InspectReport {
    let mut frames = Vec::new();
    let mut start = 0;
    for (index, &byte) in bytes.iter().enumerate() {
        if byte != cobs::DELIMITER {
            continue;
        }
        let frame = &bytes[start..=index];
        frames.push(inspect_frame(start, frame, limits));
        start = index + 1;
    }
    InspectReport {
        total_bytes: bytes.len(),
        frames,
        trailing_bytes: bytes.len() - start,
    }
}

fn inspect_frame(offset: usize, frame: &[u8], limits: &Limits) -> FrameReport {
    let body_len = frame.len() - 1;
    let decoded = if body_len > limits.max_frame_bytes {
        Err(FramingError::FrameTooLarge {
            limit: limits.max_frame_bytes,
            actual: body_len,
        })
    } else {
        cobs::decode(frame)
    };
    let (payload_len, outcome) = match decoded {
        Ok(payload) if payload.is_empty() => (Some(0), FrameOutcome::Empty),
        Ok(payload) => {
            let outcome = match command_from_bytes(&payload) {
                Ok(command) => FrameOutcome::Command(command),
                Err(err) => FrameOutcome::Error(err),
            };
            (Some(payload.len()), outcome)
        }
        Err(err) => (None, FrameOutcome::Error(err.into())),
    };
    FrameReport {
        offset,
        framed_len: frame.len(),
        payload_len,
        outcome,
    }
}

/// Formats an inspect report, one line per frame.
pub fn format_inspect_report(report: &InspectReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} bytes, {} frames ({} commands, {} errors)",
        report.total_bytes,
        report.frames.len(),
        report.command_count(),
        report.error_count()
    );
    for frame in &report.frames {
        let payload = frame
            .payload_len
            .map_or_else(|| "-".to_string(), |len| len.to_string());
        let detail = match &frame.outcome {
            FrameOutcome::Command(command) => command.to_string(),
            FrameOutcome::Empty => "(empty)".to_string(),
            FrameOutcome::Error(err) => format!("error: {err}"),
        };
        let _ = writeln!(
            out,
            "  @{:<6} framed {:>4} payload {:>4}  {detail}",
            frame.offset, frame.framed_len, payload
        );
    }
    if report.trailing_bytes > 0 {
        let _ = writeln!(
            out,
            "  {} trailing bytes without terminator",
            report.trailing_bytes
        );
    }
    out
}

#[derive(Debug, Serialize)]
pub struct DecodeOutput {
    pub total_bytes: usize,
    pub commands: Vec<DecodedCommand>,
    pub errors: Vec<DecodeFailure>,
    pub empty_frames: usize,
    pub trailing_bytes: usize,
}

#[derive(Debug, Serialize)]
pub struct DecodedCommand {
    pub offset: usize,
    pub id: u8,
    pub command: Command,
}

#[derive(Debug, Serialize)]
pub struct DecodeFailure {
    pub offset: usize,
    pub error: String,
}

/// Decodes every frame of a capture into a serializable summary.
pub fn decode_capture_json(bytes: &[u8], limits: &Limits) -> DecodeOutput {
    let report = inspect_capture(bytes, limits);
    let mut output = DecodeOutput {
        total_bytes: report.total_bytes,
        commands: Vec::new(),
        errors: Vec::new(),
        empty_frames: 0,
        trailing_bytes: report.trailing_bytes,
    };
    for frame in report.frames {
        match frame.outcome {
            FrameOutcome::Command(command) => output.commands.push(DecodedCommand {
                offset: frame.offset,
                id: command.id().raw(),
                command,
            }),
            FrameOutcome::Empty => output.empty_frames += 1,
            FrameOutcome::Error(err) => output.errors.push(DecodeFailure {
                offset: frame.offset,
                error: err.to_string(),
            }),
        }
    }
    output
}

pub fn format_decode_pretty(output: &DecodeOutput) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "capture: {} bytes", output.total_bytes);
    let _ = writeln!(out, "commands: {}", output.commands.len());
    for entry in &output.commands {
        let _ = writeln!(out, "  @{} 0x{:02x} {}", entry.offset, entry.id, entry.command);
    }
    if output.empty_frames > 0 {
        let _ = writeln!(out, "empty frames: {}", output.empty_frames);
    }
    if !output.errors.is_empty() {
        let _ = writeln!(out, "errors: {}", output.errors.len());
        for failure in &output.errors {
            let _ = writeln!(out, "  @{} {}", failure.offset, failure.error);
        }
    }
    if output.trailing_bytes > 0 {
        let _ = writeln!(out, "trailing bytes: {}", output.trailing_bytes);
    }
    out.trim_end().to_string()
}

#[derive(Debug, Serialize)]
pub struct ReplayOutput {
    pub stats: ReceiveStats,
    /// Bytes of an unfinished frame left in the decoder.
    pub buffered: usize,
    pub layers: Vec<Layer>,
}

/// Feeds a capture through a receiver into a fresh scene.
pub fn replay_capture(bytes: &[u8], limits: Limits) -> std::io::Result<(Scene, ReplayOutput)> {
    let mut link = MemoryLink::with_pending(bytes);
    let mut receiver = CommandReceiver::with_limits(limits);
    let mut scene = Scene::new();
    let stats = receiver.poll(&mut link, &mut scene)?;
    let output = ReplayOutput {
        stats,
        buffered: receiver.buffered(),
        layers: scene.to_layers(),
    };
    Ok((scene, output))
}

/// Space-separated lowercase hex.
pub fn format_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (index, byte) in bytes.iter().enumerate() {
        if index > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{byte:02x}");
    }
    out
}
