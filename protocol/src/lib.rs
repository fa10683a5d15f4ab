//! Drawing command protocol for the rigviz visualizer.
//!
//! This crate ties together the scalar codec and COBS framing to move
//! drawing commands from a robot (or simulator) to a display.
//!
//! # Features
//!
//! - Closed [`Command`] set with a fixed one-byte id table
//! - Optional trailing fields that decode to defaults when omitted
//! - Dispatch of commands onto any [`Renderer`]
//! - A headless layered [`Scene`]
//! - [`CommandSender`] and [`CommandReceiver`] over any byte [`Link`]
//!
//! # Example
//!
//! ```
//! use protocol::{Command, CommandReceiver, CommandSender, MemoryLink, Scene};
//! use scalar::Rgb332;
//!
//! let mut sender = CommandSender::new(MemoryLink::new());
//! sender.send(&Command::circle(320, 240, 50, 1).with_color(Rgb332::RED)).unwrap();
//!
//! let mut link = sender.into_inner();
//! let mut scene = Scene::new();
//! let stats = CommandReceiver::new().poll(&mut link, &mut scene).unwrap();
//! assert_eq!(stats.applied, 1);
//! assert_eq!(scene.shape_count(), 1);
//! ```

mod command;
mod dispatch;
mod error;
mod link;
mod scene;

pub use command::{
    command_from_bytes, command_from_frame, Command, CommandId, DEFAULT_COLOR, DEFAULT_WIDTH,
};
pub use dispatch::{apply, Point, Renderer};
pub use error::{ProtocolError, ProtocolResult};
pub use link::{CommandReceiver, CommandSender, Link, MemoryLink, ReceiveStats};
pub use scene::{Layer, Scene, Shape};
pub use wire::Limits as WireLimits;
