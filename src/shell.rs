//! Presentation-side helpers
//!
//! Everything here is state the caller owns: an open update form, a signature
//! being drawn, or the decoded view of a record for display. None of it is
//! global; dropping the value closes the form or discards the drawing.

use std::path::Path;
use chrono::NaiveDate;
use image::{Rgba, RgbaImage};
use serde::Serialize;
use crate::codec;
use crate::record::{Record, RecordFields, RecordSummary};
use crate::storage::SqliteStore;
use crate::{Error, Result};

/// Date format used for record dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ========== Update Form ==========

/// An update form opened on an existing record.
///
/// Opening the form requires the record to exist; submitting consumes it.
#[derive(Debug, Clone)]
pub struct UpdateForm {
    record: Record,
}

/// Values entered into an update form.
///
/// Unset text, number and date keep the fetched values. Image and signature
/// are replaced as given: leaving them unset clears them.
#[derive(Debug, Clone, Default)]
pub struct UpdateInput {
    pub text: Option<String>,
    pub number: Option<i64>,
    pub date: Option<String>,
    pub image: Option<Vec<u8>>,
    pub signature: Option<Vec<u8>>,
}

impl UpdateForm {
    /// Fetch the record and open the form, or `Error::RecordNotFound`
    pub fn fetch(store: &SqliteStore, id: i64) -> Result<Self> {
        let record = store.read(id)?;
        Ok(Self { record })
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    /// The stored date parsed for a date picker, if it is a valid ISO date
    pub fn prefilled_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.record.fields.date, DATE_FORMAT).ok()
    }

    /// Build the replacement fields without writing them
    pub fn fields(&self, input: UpdateInput) -> RecordFields {
        let current = &self.record.fields;
        RecordFields {
            text: input.text.unwrap_or_else(|| current.text.clone()),
            number: input.number.unwrap_or(current.number),
            date: input.date.unwrap_or_else(|| current.date.clone()),
            image: input.image,
            signature: input.signature,
        }
    }

    /// Write the full replacement and close the form.
    ///
    /// Returns `false` if the record disappeared after the form was opened.
    pub fn submit(self, store: &SqliteStore, input: UpdateInput) -> Result<bool> {
        let fields = self.fields(input);
        store.update(self.record.id, &fields)
    }
}

// ========== Signature Canvas ==========

pub const CANVAS_WIDTH: u32 = 400;
pub const CANVAS_HEIGHT: u32 = 150;
pub const STROKE_WIDTH: u32 = 2;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// A freehand drawing surface: black strokes on a white background.
#[derive(Debug, Clone)]
pub struct SignatureCanvas {
    pixels: RgbaImage,
    stroke_width: u32,
}

impl Default for SignatureCanvas {
    fn default() -> Self {
        Self::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}

impl SignatureCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, BACKGROUND),
            stroke_width: STROKE_WIDTH,
        }
    }

    /// Use an existing picture as the canvas contents
    pub fn from_image(image: &image::DynamicImage) -> Self {
        Self {
            pixels: image.to_rgba8(),
            stroke_width: STROKE_WIDTH,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Draw one continuous stroke through the given points
    pub fn draw_stroke(&mut self, points: &[(u32, u32)]) {
        match points {
            [] => {}
            [p] => self.dab(p.0 as i64, p.1 as i64),
            _ => {
                for pair in points.windows(2) {
                    if let Some((from, to)) = self.clip(pair[0], pair[1]) {
                        self.line(from, to);
                    }
                }
            }
        }
    }

    /// True if nothing has been drawn
    pub fn is_blank(&self) -> bool {
        self.pixels.pixels().all(|p| *p == BACKGROUND)
    }

    /// Raw RGBA8 pixel data, row-major
    pub fn rgba(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Encode the drawing as a PNG blob
    pub fn to_png(&self) -> Result<Vec<u8>> {
        codec::rgba_to_png(self.width(), self.height(), self.rgba().to_vec())
    }

    /// Cut a segment down to the part that can touch the canvas.
    ///
    /// Liang-Barsky against the canvas grown by one pixel so the brush still
    /// reaches the edges. `None` when the segment misses entirely.
    fn clip(&self, from: (u32, u32), to: (u32, u32)) -> Option<((i64, i64), (i64, i64))> {
        let (x0, y0) = (from.0 as f64, from.1 as f64);
        let (dx, dy) = (to.0 as f64 - x0, to.1 as f64 - y0);
        let (max_x, max_y) = (self.width() as f64, self.height() as f64);

        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;
        for (p, q) in [(-dx, x0 + 1.0), (dx, max_x - x0), (-dy, y0 + 1.0), (dy, max_y - y0)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }

        let at = |t: f64| ((x0 + t * dx).round() as i64, (y0 + t * dy).round() as i64);
        Some((at(t0), at(t1)))
    }

    // Bresenham, stamping a square brush at each step
    fn line(&mut self, from: (i64, i64), to: (i64, i64)) {
        let (mut x0, mut y0) = from;
        let (x1, y1) = to;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.dab(x0, y0);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn dab(&mut self, cx: i64, cy: i64) {
        let w = self.stroke_width as i64;
        let start = -(w / 2);
        for oy in start..start + w {
            for ox in start..start + w {
                let (x, y) = (cx + ox, cy + oy);
                if x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height() {
                    self.pixels.put_pixel(x as u32, y as u32, INK);
                }
            }
        }
    }
}

/// Parse strokes written as `x,y x,y ...`, strokes separated by `;`
pub fn parse_strokes(input: &str) -> Result<Vec<Vec<(u32, u32)>>> {
    input
        .split(';')
        .map(str::trim)
        .filter(|stroke| !stroke.is_empty())
        .map(|stroke| {
            stroke
                .split_whitespace()
                .map(|point| -> Result<(u32, u32)> {
                    let (x, y) = point
                        .split_once(',')
                        .ok_or_else(|| Error::InvalidCanvas(format!("bad point '{}'", point)))?;
                    let parse = |v: &str| {
                        v.trim()
                            .parse::<u32>()
                            .map_err(|_| Error::InvalidCanvas(format!("bad coordinate '{}'", v)))
                    };
                    Ok((parse(x)?, parse(y)?))
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect()
}

/// Picture blobs resolved from the form's upload and drawing inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attachments {
    pub image: Option<Vec<u8>>,
    pub signature: Option<Vec<u8>>,
}

/// Turn upload and signature inputs into PNG blobs.
///
/// A signature picture becomes the canvas; `draw` strokes go on top of it, or
/// onto a blank canvas when no picture is given. With neither, the signature
/// stays absent.
pub fn attachments_from(
    image: Option<&Path>,
    signature: Option<&Path>,
    draw: Option<&str>,
) -> Result<Attachments> {
    let image = image.map(codec::load_upload).transpose()?;

    let mut canvas = match signature {
        Some(path) => Some(SignatureCanvas::from_image(&codec::decode(&std::fs::read(path)?)?)),
        None => None,
    };
    if let Some(draw) = draw {
        let canvas = canvas.get_or_insert_with(SignatureCanvas::default);
        for stroke in parse_strokes(draw)? {
            canvas.draw_stroke(&stroke);
        }
    }
    let signature = canvas.map(|c| c.to_png()).transpose()?;

    Ok(Attachments { image, signature })
}

// ========== Record View ==========

/// What a stored blob turned out to be when decoded for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Attachment {
    Absent,
    Image { width: u32, height: u32 },
    Malformed { reason: String },
}

impl Attachment {
    pub fn inspect(blob: Option<&[u8]>) -> Self {
        match blob {
            None => Attachment::Absent,
            Some(bytes) => match codec::decode(bytes) {
                Ok(image) => Attachment::Image {
                    width: image.width(),
                    height: image.height(),
                },
                Err(e) => {
                    tracing::warn!("Could not decode stored image: {}", e);
                    Attachment::Malformed { reason: e.to_string() }
                }
            },
        }
    }
}

impl std::fmt::Display for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Attachment::Absent => write!(f, "-"),
            Attachment::Image { width, height } => write!(f, "{}x{}", width, height),
            Attachment::Malformed { .. } => write!(f, "malformed image"),
        }
    }
}

/// A record prepared for display. Decoding failures stay local to the record.
#[derive(Debug, Clone, Serialize)]
pub struct RecordView {
    #[serde(flatten)]
    pub summary: RecordSummary,
    pub image: Attachment,
    pub signature: Attachment,
}

impl RecordView {
    pub fn new(record: &Record) -> Self {
        Self {
            summary: record.summary(),
            image: Attachment::inspect(record.fields.image.as_deref()),
            signature: Attachment::inspect(record.fields.signature.as_deref()),
        }
    }
}
