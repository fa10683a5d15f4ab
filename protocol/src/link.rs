//! Transport seam and the two ends of a command connection.

use std::collections::VecDeque;
use std::io;

use scalar::Rgb332;
use wire::{Limits, StreamDecoder};

use crate::command::{command_from_bytes, Command};
use crate::dispatch::{apply, Renderer};

/// Byte transport between a sender and a receiver.
///
/// Implementations own the socket or port; framing is not their concern.
pub trait Link {
    /// Drains whatever bytes are available without blocking. Returns an
    /// empty buffer when nothing is pending.
    fn read_all(&mut self) -> io::Result<Vec<u8>>;

    /// Sends raw bytes, returning how many were accepted.
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize>;
}

impl<L: Link + ?Sized> Link for &mut L {
    fn read_all(&mut self) -> io::Result<Vec<u8>> {
        (**self).read_all()
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        (**self).write(bytes)
    }
}

/// In-process loopback: bytes written are the bytes read back.
#[derive(Debug, Default, Clone)]
pub struct MemoryLink {
    pending: VecDeque<u8>,
}

impl MemoryLink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a link with `bytes` already waiting to be read.
    #[must_use]
    pub fn with_pending(bytes: &[u8]) -> Self {
        Self {
            pending: bytes.iter().copied().collect(),
        }
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl Link for MemoryLink {
    fn read_all(&mut self) -> io::Result<Vec<u8>> {
        Ok(self.pending.drain(..).collect())
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.pending.extend(bytes);
        Ok(bytes.len())
    }
}

/// Sending end: frames commands and writes them to a link.
#[derive(Debug)]
pub struct CommandSender<L> {
    link: L,
    buffer: Vec<u8>,
}

impl<L: Link> CommandSender<L> {
    pub fn new(link: L) -> Self {
        Self {
            link,
            buffer: Vec::new(),
        }
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    pub fn into_inner(self) -> L {
        self.link
    }

    /// Frames and writes one command, returning the framed size.
    ///
    /// A link that accepts only part of the frame is reported as
    /// [`io::ErrorKind::WriteZero`].
    pub fn send(&mut self, command: &Command) -> io::Result<usize> {
        self.buffer.clear();
        command.encode_framed_into(&mut self.buffer);
        let written = self.link.write(&self.buffer)?;
        if written < self.buffer.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!(
                    "short write for {}: {written} of {} bytes",
                    command.name(),
                    self.buffer.len()
                ),
            ));
        }
        log::trace!("sent {command} ({written} bytes)");
        Ok(written)
    }

    pub fn clear_screen(&mut self) -> io::Result<usize> {
        self.send(&Command::ClearScreen)
    }

    pub fn clear_layer(&mut self, layer: u8) -> io::Result<usize> {
        self.send(&Command::ClearLayer { layer })
    }

    pub fn draw_point(
        &mut self,
        x: u16,
        y: u16,
        layer: u8,
        color: Rgb332,
        thickness: u16,
    ) -> io::Result<usize> {
        self.send(&Command::DrawPoint {
            x,
            y,
            layer,
            color,
            thickness,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_line(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        layer: u8,
        color: Rgb332,
        width: u16,
    ) -> io::Result<usize> {
        self.send(&Command::DrawLine {
            x1,
            y1,
            x2,
            y2,
            layer,
            color,
            width,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_rectangle(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        layer: u8,
        color: Rgb332,
        width: u16,
    ) -> io::Result<usize> {
        self.send(&Command::DrawRectangle {
            x1,
            y1,
            x2,
            y2,
            layer,
            color,
            width,
        })
    }

    pub fn draw_circle(
        &mut self,
        x: u16,
        y: u16,
        radius: u16,
        layer: u8,
        color: Rgb332,
        width: u16,
    ) -> io::Result<usize> {
        self.send(&Command::DrawCircle {
            x,
            y,
            r: radius,
            layer,
            color,
            width,
        })
    }
}

/// Counters for one batch of received bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReceiveStats {
    pub bytes: usize,
    /// Frames that reached a terminator, whatever their outcome. An
    /// oversized frame counts once, when the limit is hit.
    pub frames: usize,
    pub applied: usize,
    /// Frames with an empty payload.
    pub empty: usize,
    /// Malformed or oversized frames.
    pub framing_errors: usize,
    pub protocol_errors: usize,
}

impl ReceiveStats {
    /// Frames or commands that were dropped.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.framing_errors + self.protocol_errors
    }

    /// Adds another batch's counters to this one.
    pub fn merge(&mut self, other: Self) {
        self.bytes += other.bytes;
        self.frames += other.frames;
        self.applied += other.applied;
        self.empty += other.empty;
        self.framing_errors += other.framing_errors;
        self.protocol_errors += other.protocol_errors;
    }
}

/// Receiving end: reassembles frames from a byte stream and applies each
/// decoded command to a renderer.
///
/// Malformed frames and commands are logged and dropped; decoding carries on
/// with the next frame.
#[derive(Debug, Default)]
pub struct CommandReceiver {
    decoder: StreamDecoder,
}

impl CommandReceiver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            decoder: StreamDecoder::with_limits(limits),
        }
    }

    /// Bytes of an incomplete frame carried over to the next batch.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.decoder.buffered()
    }

    /// Drops any partial frame.
    pub fn reset(&mut self) {
        self.decoder.reset();
    }

    /// Drains `link` and applies every complete command to `renderer`.
    ///
    /// Only transport failures are returned as errors.
    pub fn poll<L, R>(&mut self, link: &mut L, renderer: &mut R) -> io::Result<ReceiveStats>
    where
        L: Link + ?Sized,
        R: Renderer + ?Sized,
    {
        let bytes = link.read_all()?;
        Ok(self.receive(&bytes, renderer))
    }

    /// Applies every command completed by `bytes` to `renderer`.
    pub fn receive<R: Renderer + ?Sized>(&mut self, bytes: &[u8], renderer: &mut R) -> ReceiveStats {
        let mut stats = ReceiveStats {
            bytes: bytes.len(),
            ..ReceiveStats::default()
        };
        self.decoder.feed(bytes, |frame| {
            stats.frames += 1;
            let payload = match frame {
                Ok(payload) => payload,
                Err(err) => {
                    stats.framing_errors += 1;
                    log::warn!("dropping malformed frame: {err}");
                    return;
                }
            };
            if payload.is_empty() {
                stats.empty += 1;
                log::trace!("skipping empty frame");
                return;
            }
            match command_from_bytes(&payload) {
                Ok(command) => {
                    log::debug!("applying {command}");
                    apply(&command, renderer);
                    stats.applied += 1;
                }
                Err(err) => {
                    stats.protocol_errors += 1;
                    log::warn!("dropping command ({} bytes): {err}", payload.len());
                }
            }
        });
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;

    struct HalfLink;

    impl Link for HalfLink {
        fn read_all(&mut self) -> io::Result<Vec<u8>> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "gone"))
        }

        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            Ok(bytes.len() / 2)
        }
    }

    #[test]
    fn memory_link_loopback() {
        let mut link = MemoryLink::new();
        assert_eq!(link.write(&[1, 2, 3]).unwrap(), 3);
        assert_eq!(link.pending(), 3);
        assert_eq!(link.read_all().unwrap(), vec![1, 2, 3]);
        assert!(link.read_all().unwrap().is_empty());
    }

    #[test]
    fn sender_writes_framed_command() {
        let mut sender = CommandSender::new(MemoryLink::new());
        let written = sender.clear_screen().unwrap();
        assert_eq!(written, 3);
        assert_eq!(sender.link_mut().read_all().unwrap(), vec![0x02, 0x01, 0x00]);
    }

    #[test]
    fn sender_rectangle_is_rectangle() {
        let mut sender = CommandSender::new(MemoryLink::new());
        sender
            .draw_rectangle(1, 2, 3, 4, 0, Rgb332::WHITE, 2)
            .unwrap();
        let bytes = sender.into_inner().read_all().unwrap();
        assert_eq!(bytes[1], 0x12);
    }

    #[test]
    fn short_write_is_error() {
        let mut sender = CommandSender::new(HalfLink);
        let err = sender.clear_layer(1).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WriteZero);
    }

    #[test]
    fn poll_propagates_transport_error() {
        let mut receiver = CommandReceiver::new();
        let mut scene = Scene::new();
        let err = receiver.poll(&mut HalfLink, &mut scene).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
    }

    #[test]
    fn receive_counts_outcomes() {
        let mut bytes = Command::point(1, 1, 0).encode_framed();
        bytes.push(0x00); // empty frame
        bytes.extend_from_slice(&[0x02, 0xFF, 0x00]); // unknown id
        bytes.extend_from_slice(&[0x05, 0x11, 0x00]); // run past terminator
        bytes.extend(Command::ClearLayer { layer: 0 }.encode_framed());

        let mut receiver = CommandReceiver::new();
        let mut scene = Scene::new();
        let stats = receiver.receive(&bytes, &mut scene);
        assert_eq!(
            stats,
            ReceiveStats {
                bytes: bytes.len(),
                frames: 5,
                applied: 2,
                empty: 1,
                framing_errors: 1,
                protocol_errors: 1,
            }
        );
        assert_eq!(stats.dropped(), 2);
        assert!(scene.is_empty());
    }

    #[test]
    fn oversized_frame_counts_once() {
        let mut bytes = vec![0x09; 8];
        bytes.push(0x00);
        bytes.extend(Command::ClearScreen.encode_framed());

        let mut receiver = CommandReceiver::with_limits(Limits { max_frame_bytes: 4 });
        let mut scene = Scene::new();
        let stats = receiver.receive(&bytes, &mut scene);
        assert_eq!(stats.frames, 2);
        assert_eq!(stats.framing_errors, 1);
        assert_eq!(stats.applied, 1);
        assert_eq!(receiver.buffered(), 0);
    }

    #[test]
    fn partial_frame_carries_over() {
        let frame = Command::circle(9, 9, 3, 1).encode_framed();
        let (head, tail) = frame.split_at(4);

        let mut receiver = CommandReceiver::new();
        let mut scene = Scene::new();
        let first = receiver.receive(head, &mut scene);
        assert_eq!(first.frames, 0);
        assert_eq!(receiver.buffered(), 4);

        let second = receiver.receive(tail, &mut scene);
        assert_eq!(second.applied, 1);
        assert_eq!(scene.shape_count(), 1);
    }

    #[test]
    fn stats_merge() {
        let mut total = ReceiveStats::default();
        total.merge(ReceiveStats {
            bytes: 4,
            frames: 1,
            applied: 1,
            ..ReceiveStats::default()
        });
        total.merge(ReceiveStats {
            bytes: 2,
            frames: 1,
            framing_errors: 1,
            ..ReceiveStats::default()
        });
        assert_eq!(total.bytes, 6);
        assert_eq!(total.frames, 2);
        assert_eq!(total.dropped(), 1);
    }
}
