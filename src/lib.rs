//! # mediagate
//!
//! Gate untrusted media uploads: validate container files against a
//! strict ingestion policy and extract single thumbnail frames at
//! exact rational timestamps, powered by FFmpeg via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate.
//!
//! The policy is a closed allowlist over container/codec combinations,
//! pixel and sample formats, resolution, and total duration. Rejections
//! carry a specific, rule-naming reason suitable for showing to the
//! uploader; infrastructure failures deliberately collapse to a single
//! generic diagnostic.
//!
//! All timestamp arithmetic uses exact [`RationalTime`] fractions —
//! floating point enters only when parsing a human-entered timestamp.
//!
//! ## Validate and inspect
//!
//! ```no_run
//! use mediagate::{IngestPolicy, probe};
//!
//! let summary = probe("upload.webm", &IngestPolicy::default())?;
//! println!("{}", summary.stat_line());
//! # Ok::<(), mediagate::MediaGateError>(())
//! ```
//!
//! ## Extract a thumbnail frame
//!
//! ```no_run
//! use mediagate::{IngestPolicy, RationalTime, render_thumbnail};
//!
//! let target = RationalTime::approximate(12.5, i32::MAX as i64).unwrap();
//! render_thumbnail("upload.webm", target, "thumb.png", &IngestPolicy::default())?;
//! # Ok::<(), mediagate::MediaGateError>(())
//! ```
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

pub mod classify;
pub mod duration;
pub mod error;
pub mod metadata;
pub mod png;
pub mod policy;
pub mod probe;
pub mod rational;
pub mod select;
pub mod source;
pub mod thumbnail;

pub use classify::{Classification, StreamKind, classify, pixel_format_allowed, sample_format_allowed};
pub use duration::{DurationAccumulator, PacketTiming, StreamTiming};
pub use error::MediaGateError;
pub use metadata::{MediaSummary, StreamDescriptor};
pub use policy::{CodecSet, ContainerRule, DurationBounds, IngestPolicy, ResolutionBounds, Verdict};
pub use probe::{probe, probe_with_progress};
pub use rational::RationalTime;
pub use select::{FrameWindow, select_first};
pub use source::MediaSource;
pub use thumbnail::render_thumbnail;
