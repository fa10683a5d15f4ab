use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use glob::Pattern;
use protocol::Command;
use rigviz_tools::{
    decode_capture_json, format_decode_pretty, format_hex, format_inspect_report, inspect_capture,
    replay_capture,
};
use scalar::Rgb332;
use wire::Limits;

#[derive(Parser)]
#[command(
    name = "rigviz-tools",
    version,
    about = "rigviz capture inspection and encoding tools"
)]
struct Cli {
    #[command(subcommand)]
    command: ToolCommand,
}

#[derive(Subcommand)]
enum ToolCommand {
    /// Split a capture into frames and report each one.
    Inspect {
        /// Capture file, or a directory of captures.
        capture_path: PathBuf,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Sort inspected captures.
        #[arg(long, value_enum)]
        sort: Option<InspectSort>,
        /// Limit the number of inspected captures (after sorting).
        #[arg(long)]
        limit: Option<usize>,
        #[command(flatten)]
        limits: LimitArgs,
    },
    /// Decode every command in a capture.
    Decode {
        capture_file: PathBuf,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
        #[command(flatten)]
        limits: LimitArgs,
    },
    /// Encode one command as a framed byte sequence.
    Encode {
        #[command(subcommand)]
        command: EncodeCommand,
        /// Write raw bytes to this file instead of printing hex.
        #[arg(long, global = true)]
        out: Option<PathBuf>,
    },
    /// Apply a capture to an empty scene and print the layers as JSON.
    Replay {
        capture_file: PathBuf,
        #[command(flatten)]
        limits: LimitArgs,
    },
}

#[derive(Args)]
struct LimitArgs {
    /// Largest accepted frame, terminator excluded.
    #[arg(long, default_value_t = Limits::default().max_frame_bytes)]
    max_frame_bytes: usize,
}

impl LimitArgs {
    fn limits(&self) -> Limits {
        Limits {
            max_frame_bytes: self.max_frame_bytes,
        }
    }
}

#[derive(Args)]
struct Style {
    /// Color as `r,g,b` (3/3/2 bits) or a name like `red`.
    #[arg(long, default_value = "black")]
    color: Rgb332,
    /// Stroke width (point thickness for `point`).
    #[arg(long, default_value_t = 1)]
    width: u16,
}

#[derive(Subcommand)]
enum EncodeCommand {
    ClearScreen,
    ClearLayer {
        layer: u8,
    },
    Point {
        x: u16,
        y: u16,
        layer: u8,
        #[command(flatten)]
        style: Style,
    },
    Line {
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        layer: u8,
        #[command(flatten)]
        style: Style,
    },
    Rect {
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        layer: u8,
        #[command(flatten)]
        style: Style,
    },
    Circle {
        x: u16,
        y: u16,
        r: u16,
        layer: u8,
        #[command(flatten)]
        style: Style,
    },
}

impl EncodeCommand {
    fn to_command(&self) -> Command {
        let (command, style) = match *self {
            Self::ClearScreen => return Command::ClearScreen,
            Self::ClearLayer { layer } => return Command::ClearLayer { layer },
            Self::Point {
                x,
                y,
                layer,
                ref style,
            } => (Command::point(x, y, layer), style),
            Self::Line {
                x1,
                y1,
                x2,
                y2,
                layer,
                ref style,
            } => (Command::line(x1, y1, x2, y2, layer), style),
            Self::Rect {
                x1,
                y1,
                x2,
                y2,
                layer,
                ref style,
            } => (Command::rectangle(x1, y1, x2, y2, layer), style),
            Self::Circle {
                x,
                y,
                r,
                layer,
                ref style,
            } => (Command::circle(x, y, r, layer), style),
        };
        command.with_color(style.color).with_width(style.width)
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InspectSort {
    Size,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        ToolCommand::Inspect {
            capture_path,
            glob,
            sort,
            limit,
            limits,
        } => {
            let limits = limits.limits();
            if capture_path.is_dir() {
                let entries = collect_capture_entries(&capture_path, glob.as_deref())?;
                let mut entries = maybe_sort_entries(entries, sort);
                let limit = limit.or(sort.map(|InspectSort::Size| 10));
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                log::info!(
                    "inspecting {} capture(s) in {}",
                    entries.len(),
                    capture_path.display()
                );
                for entry in entries {
                    let bytes = read_capture(&entry.path)?;
                    println!("== {} ({} bytes) ==", entry.path.display(), entry.size);
                    print!("{}", format_inspect_report(&inspect_capture(&bytes, &limits)));
                }
            } else {
                let bytes = read_capture(&capture_path)?;
                print!("{}", format_inspect_report(&inspect_capture(&bytes, &limits)));
            }
        }
        ToolCommand::Decode {
            capture_file,
            format,
            limits,
        } => {
            let bytes = read_capture(&capture_file)?;
            let output = decode_capture_json(&bytes, &limits.limits());
            if !output.errors.is_empty() {
                log::warn!(
                    "{} frame(s) in {} failed to decode",
                    output.errors.len(),
                    capture_file.display()
                );
            }
            match format {
                DecodeFormat::Json => {
                    let json = serde_json::to_string_pretty(&output).context("serialize json")?;
                    println!("{json}");
                }
                DecodeFormat::Pretty => {
                    println!("{}", format_decode_pretty(&output));
                }
            }
        }
        ToolCommand::Encode { command, out } => {
            let command = command.to_command();
            let frame = command.encode_framed();
            log::info!("{command}: {} payload bytes, {} framed", command.encoded_len(), frame.len());
            match out {
                Some(path) => {
                    fs::write(&path, &frame)
                        .with_context(|| format!("write frame {}", path.display()))?;
                    log::info!("wrote {}", path.display());
                }
                None => println!("{}", format_hex(&frame)),
            }
        }
        ToolCommand::Replay {
            capture_file,
            limits,
        } => {
            let bytes = read_capture(&capture_file)?;
            let (scene, output) = replay_capture(&bytes, limits.limits())
                .with_context(|| format!("replay {}", capture_file.display()))?;
            log::info!(
                "applied {} command(s) to {} layer(s), dropped {}",
                output.stats.applied,
                scene.layer_count(),
                output.stats.dropped()
            );
            let json = serde_json::to_string_pretty(&output).context("serialize json")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn read_capture(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path).with_context(|| format!("read capture {}", path.display()))?;
    log::info!("read {} ({} bytes)", path.display(), bytes.len());
    Ok(bytes)
}

struct CaptureEntry {
    path: PathBuf,
    size: u64,
}

fn collect_capture_entries(dir: &Path, glob: Option<&str>) -> Result<Vec<CaptureEntry>> {
    let mut entries = Vec::new();
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                log::debug!("skipping {} (no match)", path.display());
                continue;
            }
        }
        let size = entry.metadata()?.len();
        entries.push(CaptureEntry { path, size });
    }
    Ok(entries)
}

fn maybe_sort_entries(
    mut entries: Vec<CaptureEntry>,
    sort: Option<InspectSort>,
) -> Vec<CaptureEntry> {
    match sort {
        Some(InspectSort::Size) => {
            entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
        }
        None => entries.sort_by(|a, b| a.path.cmp(&b.path)),
    }
    entries
}
