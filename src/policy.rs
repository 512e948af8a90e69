//! The ingestion policy and its verdicts.
//!
//! An [`IngestPolicy`] is configuration data: a container→codec table,
//! inclusive resolution bounds, and inclusive duration bounds. It is
//! read-only after construction and may be shared freely across
//! validation calls. Two built-in tables exist because upstream policy
//! deployments diverged; see [`IngestPolicy::default`] and
//! [`IngestPolicy::conservative`].
//!
//! # Example
//!
//! ```
//! use mediagate::{IngestPolicy, RationalTime};
//!
//! let policy = IngestPolicy::default();
//! assert!(policy.validate_duration(RationalTime::new(30, 1)).is_accepted());
//! assert!(!policy.validate_duration(RationalTime::new(3601, 1)).is_accepted());
//! ```

use ffmpeg_next::{codec, media};

use crate::classify::{self, StreamKind};
use crate::error::MediaGateError;
use crate::metadata::StreamDescriptor;
use crate::rational::RationalTime;

/// Outcome of a validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Verdict {
    Accepted,
    /// Rejected, with a human-readable reason naming the rule that
    /// failed and the offending value. The reason is user-facing
    /// diagnostic output, not just an internal flag.
    Rejected(String),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    /// The rejection reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Verdict::Accepted => None,
            Verdict::Rejected(reason) => Some(reason),
        }
    }

    /// Convert into a `Result`, turning a rejection into
    /// [`MediaGateError::Rejected`].
    pub fn into_result(self) -> Result<(), MediaGateError> {
        match self {
            Verdict::Accepted => Ok(()),
            Verdict::Rejected(reason) => Err(MediaGateError::Rejected { reason }),
        }
    }
}

/// A set of accepted codecs plus the phrase used when naming them in a
/// rejection.
#[derive(Debug, Clone)]
pub struct CodecSet {
    pub ids: Vec<codec::Id>,
    /// E.g. `"VP8 or VP9"`, spliced into `"must be {hint}"`.
    pub hint: String,
}

impl CodecSet {
    pub fn new(ids: impl Into<Vec<codec::Id>>, hint: impl Into<String>) -> Self {
        Self {
            ids: ids.into(),
            hint: hint.into(),
        }
    }

    fn contains(&self, id: codec::Id) -> bool {
        self.ids.contains(&id)
    }
}

/// Codec rules for one container family.
#[derive(Debug, Clone)]
pub struct ContainerRule {
    /// Label used in rejection wording, e.g. `"WebM"`.
    pub label: String,
    /// Demuxer name components this rule covers. FFmpeg demuxer names
    /// are comma-separated lists (`"matroska,webm"`), so a rule matches
    /// when any component of the container's name equals any entry
    /// here.
    pub demuxers: Vec<String>,
    /// Accepted video codecs.
    pub video: CodecSet,
    /// Accepted audio codecs. `None` means the container carries no
    /// audio rule and audio codecs are not checked.
    pub audio: Option<CodecSet>,
}

impl ContainerRule {
    fn matches(&self, container_name: &str) -> bool {
        container_name
            .split(',')
            .any(|component| self.demuxers.iter().any(|demuxer| demuxer == component))
    }
}

/// Inclusive bounds applied to both the width and the height of the
/// video stream.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionBounds {
    pub min: i32,
    pub max: i32,
}

impl ResolutionBounds {
    fn contains(&self, value: i32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Inclusive bounds on total presentation duration, in seconds.
#[derive(Debug, Clone, Copy)]
pub struct DurationBounds {
    pub min: RationalTime,
    pub max: RationalTime,
}

/// The complete ingestion policy.
///
/// Deliberately a closed allowlist: everything not named here is
/// rejected.
#[derive(Debug, Clone)]
pub struct IngestPolicy {
    pub containers: Vec<ContainerRule>,
    pub resolution: ResolutionBounds,
    pub duration: DurationBounds,
}

impl Default for IngestPolicy {
    /// The full production table: WebM (VP8/VP9 with optional
    /// Opus/Vorbis audio), GIF, JPEG, PNG/APNG, and SVG, with
    /// resolution bounds of 1..=32767 on each axis and duration bounds
    /// of 0..=3600 seconds.
    fn default() -> Self {
        Self {
            containers: vec![
                webm_rule(),
                ContainerRule {
                    label: "GIF".to_string(),
                    demuxers: vec!["gif".to_string()],
                    video: CodecSet::new([codec::Id::GIF], "GIF"),
                    audio: None,
                },
                ContainerRule {
                    label: "JPEG".to_string(),
                    demuxers: vec!["image2".to_string(), "jpeg_pipe".to_string()],
                    video: CodecSet::new([codec::Id::MJPEG], "JPEG"),
                    audio: None,
                },
                ContainerRule {
                    label: "PNG".to_string(),
                    demuxers: vec!["png_pipe".to_string(), "apng".to_string()],
                    video: CodecSet::new([codec::Id::PNG, codec::Id::APNG], "PNG"),
                    audio: None,
                },
                ContainerRule {
                    label: "SVG".to_string(),
                    demuxers: vec!["svg_pipe".to_string()],
                    video: CodecSet::new([codec::Id::SVG], "SVG"),
                    audio: None,
                },
            ],
            resolution: ResolutionBounds { min: 1, max: 32767 },
            duration: one_hour_bounds(),
        }
    }
}

impl IngestPolicy {
    /// The conservative table observed in stricter deployments: WebM
    /// only, resolution bounds of 2..=4096 on each axis, same duration
    /// bounds.
    pub fn conservative() -> Self {
        Self {
            containers: vec![webm_rule()],
            resolution: ResolutionBounds { min: 2, max: 4096 },
            duration: one_hour_bounds(),
        }
    }

    /// Validate the ordered stream list of a container against this
    /// policy.
    ///
    /// `container_name` is the demuxer name reported by the container
    /// layer (e.g. `"matroska,webm"`). Checks run in a fixed order and
    /// the first failure wins; see the crate documentation for the
    /// full rule list.
    pub fn validate_streams(
        &self,
        streams: &[StreamDescriptor],
        container_name: &str,
    ) -> Verdict {
        let mut video_count = 0_u64;
        let mut audio_count = 0_u64;
        let mut video: Option<&StreamDescriptor> = None;
        let mut audio: Option<&StreamDescriptor> = None;

        for stream in streams {
            let classification = classify::classify(stream);
            match classification.kind {
                StreamKind::Video => {
                    video_count += 1;
                    video = Some(stream);
                    if !classification.format_accepted {
                        let name = stream
                            .pixel_format
                            .map(classify::pixel_format_name)
                            .unwrap_or_else(|| "none".to_string());
                        return Verdict::Rejected(format!(
                            "Found unsupported pixel format {name}"
                        ));
                    }
                }
                StreamKind::Audio => {
                    audio_count += 1;
                    audio = Some(stream);
                    if !classification.format_accepted {
                        let name = stream
                            .sample_format
                            .map(classify::sample_format_name)
                            .unwrap_or_else(|| "none".to_string());
                        return Verdict::Rejected(format!(
                            "Found unsupported audio sample format {name}"
                        ));
                    }
                }
                StreamKind::Subtitle => {}
                StreamKind::Unknown => {
                    return Verdict::Rejected(format!(
                        "Unknown codec type {}",
                        media_type_name(stream.medium)
                    ));
                }
            }
        }

        if video_count != 1 {
            return Verdict::Rejected(format!(
                "Found {video_count} video streams (must be 1)"
            ));
        }

        if audio_count > 1 {
            return Verdict::Rejected(format!(
                "Found {audio_count} audio streams (must be 0 or 1)"
            ));
        }

        let Some(video) = video else {
            return Verdict::Rejected("Found 0 video streams (must be 1)".to_string());
        };

        let Some(rule) = self
            .containers
            .iter()
            .find(|rule| rule.matches(container_name))
        else {
            return Verdict::Rejected("Unknown input format".to_string());
        };

        if !rule.video.contains(video.codec) {
            return Verdict::Rejected(format!(
                "Bad video codec for {} container (must be {})",
                rule.label, rule.video.hint
            ));
        }

        if let (Some(audio), Some(allowed)) = (audio, &rule.audio)
            && !allowed.contains(audio.codec)
        {
            return Verdict::Rejected(format!(
                "Bad audio codec for {} container (must be {})",
                rule.label, allowed.hint
            ));
        }

        if !self.resolution.contains(video.width) {
            return Verdict::Rejected(format!("Invalid width {}", video.width));
        }

        if !self.resolution.contains(video.height) {
            return Verdict::Rejected(format!("Invalid height {}", video.height));
        }

        Verdict::Accepted
    }

    /// Validate a total presentation duration, in seconds.
    pub fn validate_duration(&self, duration: RationalTime) -> Verdict {
        if duration < self.duration.min || duration > self.duration.max {
            return Verdict::Rejected(format!(
                "Invalid duration {duration} (must be 0..1 hour)"
            ));
        }
        Verdict::Accepted
    }
}

fn webm_rule() -> ContainerRule {
    ContainerRule {
        label: "WebM".to_string(),
        demuxers: vec!["matroska".to_string(), "webm".to_string()],
        video: CodecSet::new([codec::Id::VP8, codec::Id::VP9], "VP8 or VP9"),
        audio: Some(CodecSet::new(
            [codec::Id::VORBIS, codec::Id::OPUS],
            "Opus or Vorbis",
        )),
    }
}

fn one_hour_bounds() -> DurationBounds {
    DurationBounds {
        min: RationalTime::ZERO,
        max: RationalTime::new(3600, 1),
    }
}

fn media_type_name(medium: media::Type) -> &'static str {
    match medium {
        media::Type::Video => "video",
        media::Type::Audio => "audio",
        media::Type::Subtitle => "subtitle",
        media::Type::Data => "data",
        media::Type::Attachment => "attachment",
        _ => "unknown",
    }
}
