//! PNG output for selected frames.
//!
//! The frame handed over here is already RGBA; this module strips the
//! per-row padding FFmpeg frames carry, wraps the pixels as an
//! [`image::RgbaImage`], and writes the PNG atomically: the bytes go to
//! a temporary file in the destination directory which is only renamed
//! into place on success, so no truncated output file survives an
//! error path.

use std::path::Path;

use ffmpeg_next::frame::Video as VideoFrame;
use image::{DynamicImage, ImageFormat, RgbaImage};
use tempfile::NamedTempFile;

use crate::error::MediaGateError;

/// Write an RGBA frame to `path` as a PNG.
///
/// # Errors
///
/// [`MediaGateError::PngEncode`] when the frame's pixel buffer does not
/// match its declared dimensions, [`MediaGateError::Image`] when
/// encoding fails, or [`MediaGateError::Io`] when the temporary file
/// cannot be created or persisted.
pub fn write_rgba_frame(frame: &VideoFrame, path: &Path) -> Result<(), MediaGateError> {
    let width = frame.width();
    let height = frame.height();
    let pixels = frame_to_rgba_buffer(frame, width, height);

    let image = RgbaImage::from_raw(width, height, pixels).ok_or_else(|| {
        MediaGateError::PngEncode(format!(
            "frame buffer does not match declared dimensions {width}x{height}"
        ))
    })?;

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(directory)?;
    DynamicImage::ImageRgba8(image).write_to(staged.as_file_mut(), ImageFormat::Png)?;
    staged
        .persist(path)
        .map_err(|error| MediaGateError::Io(error.error))?;

    log::debug!("Wrote PNG to {}", path.display());
    Ok(())
}

/// Copy pixel data from an FFmpeg video frame into a tightly-packed
/// RGBA buffer.
///
/// FFmpeg frames frequently carry per-row padding (stride > width × 4);
/// this strips it so the result can be passed to
/// [`image::RgbaImage::from_raw`].
fn frame_to_rgba_buffer(frame: &VideoFrame, width: u32, height: u32) -> Vec<u8> {
    let stride = frame.stride(0);
    let packed_stride = (width as usize) * 4;
    let data = frame.data(0);

    if stride == packed_stride {
        // No padding — copy the entire plane at once.
        data[..packed_stride * (height as usize)].to_vec()
    } else {
        let mut buffer = Vec::with_capacity(packed_stride * (height as usize));
        for row in 0..(height as usize) {
            let row_start = row * stride;
            buffer.extend_from_slice(&data[row_start..row_start + packed_stride]);
        }
        buffer
    }
}
