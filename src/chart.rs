//! Pareto chart rendering
//!
//! Two charts share one layout: occurrence bars on the primary axis, the
//! cumulative share as a line on a secondary 0-105% axis, a dashed threshold
//! line and a shaded band over the top causes. Charts are drawn into an
//! in-memory RGB buffer with `plotters` and encoded as PNG.
//!
//! Captions and axis labels need a TrueType font. If none can be loaded the
//! chart is still produced, just without text.

use crate::analysis::{ParetoAnalysis, ParetoRow};
use crate::config::ChartConfig;
use crate::error::{ParetoError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontStyle;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Upper bound of the cumulative-share axis
const CUMULATIVE_AXIS_MAX: f64 = 1.05;

const FONT_FAMILY: &str = "sans-serif";

const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);
const LINE_COLOR: RGBColor = RGBColor(255, 127, 14);
const HIGHLIGHT_COLOR: RGBColor = RGBColor(255, 165, 0);
const THRESHOLD_COLOR: RGBColor = RGBColor(214, 39, 40);

/// Fonts tried when no `font_path` is configured
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Font registered for the process, set by the first render; `None` when no
/// font could be loaded
static FONT_LOADED: OnceLock<Option<PathBuf>> = OnceLock::new();

/// A PNG-encoded chart
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

struct ChartData<'a> {
    title: String,
    rows: &'a [ParetoRow],
    highlight: usize,
    threshold: f64,
}

/// Full chart: every cause, top causes shaded
pub fn render_pareto_chart(
    analysis: &ParetoAnalysis,
    title: &str,
    config: &ChartConfig,
) -> Result<RenderedChart> {
    let data = ChartData {
        title: title.to_string(),
        rows: analysis.rows(),
        highlight: analysis.top_count(),
        threshold: analysis.threshold(),
    };
    render(&data, config.width, config.height, config.font_path.as_deref())
}

/// Top causes only, cumulative share still relative to the global total
pub fn render_top_chart(
    analysis: &ParetoAnalysis,
    title: &str,
    config: &ChartConfig,
) -> Result<RenderedChart> {
    let rows = analysis.top_rows();
    let data = ChartData {
        title: format!("{} – Top causes", title),
        rows,
        highlight: rows.len(),
        threshold: analysis.threshold(),
    };
    render(
        &data,
        config.top_width,
        config.top_height,
        config.font_path.as_deref(),
    )
}

fn render(
    data: &ChartData<'_>,
    width: u32,
    height: u32,
    font_path: Option<&Path>,
) -> Result<RenderedChart> {
    let labelled = ensure_font(font_path);
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw(&root, data, labelled).map_err(|e| ParetoError::Chart(e.to_string()))?;
        root.present()
            .map_err(|e| ParetoError::Chart(e.to_string()))?;
    }

    tracing::debug!(
        title = %data.title,
        bars = data.rows.len(),
        width,
        height,
        labelled,
        "rendered chart"
    );
    let png = encode_png(buffer, width, height)?;
    Ok(RenderedChart { png, width, height })
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    data: &ChartData<'_>,
    labelled: bool,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let n = data.rows.len();
    let x_end = n as f64 - 0.5;
    let y_max = data.rows.iter().map(|r| r.occurrence).fold(0.0, f64::max);
    let y_top = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

    let mut builder = ChartBuilder::on(root);
    builder.margin(15);
    if labelled {
        builder
            .caption(&data.title, (FONT_FAMILY, 22))
            .x_label_area_size(60)
            .y_label_area_size(60)
            .right_y_label_area_size(60);
    }
    let mut chart = builder
        .build_cartesian_2d(-0.5f64..x_end, 0f64..y_top)?
        .set_secondary_coord(-0.5f64..x_end, 0f64..CUMULATIVE_AXIS_MAX);

    if labelled {
        let names: Vec<&str> = data.rows.iter().map(|r| r.name.as_str()).collect();
        let cause_label = |x: &f64| {
            let index = x.round();
            if (x - index).abs() > 1e-6 || index < 0.0 {
                return String::new();
            }
            names
                .get(index as usize)
                .map(|s| s.to_string())
                .unwrap_or_default()
        };
        let percent_label = |v: &f64| format!("{:.0}%", v * 100.0);

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&cause_label)
            .x_label_style((FONT_FAMILY, 12))
            .y_desc("Occurrence")
            .draw()?;

        chart
            .configure_secondary_axes()
            .y_labels(6)
            .y_label_formatter(&percent_label)
            .y_desc("Cumulative share (%)")
            .draw()?;
    }

    chart.draw_secondary_series(std::iter::once(Rectangle::new(
        [(-0.5, 0.0), (data.highlight as f64 - 0.5, CUMULATIVE_AXIS_MAX)],
        HIGHLIGHT_COLOR.mix(0.15).filled(),
    )))?;

    chart.draw_series(data.rows.iter().enumerate().map(|(i, r)| {
        let x = i as f64;
        Rectangle::new([(x - 0.4, 0.0), (x + 0.4, r.occurrence)], BAR_COLOR.filled())
    }))?;

    chart.draw_secondary_series(dashes(-0.5, x_end).map(|(from, to)| {
        PathElement::new(
            vec![(from, data.threshold), (to, data.threshold)],
            THRESHOLD_COLOR.stroke_width(2),
        )
    }))?;

    let points: Vec<(f64, f64)> = data
        .rows
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, r.cumulative_share))
        .collect();
    chart.draw_secondary_series(LineSeries::new(
        points.iter().copied(),
        LINE_COLOR.stroke_width(2),
    ))?;
    chart.draw_secondary_series(
        points
            .iter()
            .map(|&p| Circle::new(p, 4, LINE_COLOR.filled())),
    )?;

    Ok(())
}

/// Segment endpoints for a horizontal dashed line
fn dashes(start: f64, end: f64) -> impl Iterator<Item = (f64, f64)> {
    let span = end - start;
    let period = span / 40.0;
    let dash = period * 0.6;
    (0..40).map(move |i| {
        let from = start + i as f64 * period;
        (from, (from + dash).min(end))
    })
}

fn encode_png(buffer: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>> {
    let image = image::RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| ParetoError::Chart("pixel buffer does not match chart size".into()))?;
    let mut png = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| ParetoError::Chart(e.to_string()))?;
    Ok(png)
}

fn ensure_font(configured: Option<&Path>) -> bool {
    let loaded = FONT_LOADED.get_or_init(|| load_font(configured));
    if font_ignored(loaded.as_deref(), configured) {
        tracing::warn!(
            font = ?configured,
            "font_path not used; the chart font is fixed by the first render in this process"
        );
    }
    loaded.is_some()
}

fn load_font(configured: Option<&Path>) -> Option<PathBuf> {
    let candidates: Vec<PathBuf> = configured
        .map(|p| vec![p.to_path_buf()])
        .unwrap_or_else(|| SYSTEM_FONTS.iter().map(PathBuf::from).collect());

    for path in candidates {
        let Ok(bytes) = std::fs::read(&path) else {
            continue;
        };
        // plotters keeps a 'static reference to registered font data
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        match plotters::style::register_font(FONT_FAMILY, FontStyle::Normal, bytes) {
            Ok(()) => {
                tracing::debug!(font = %path.display(), "registered chart font");
                return Some(path);
            }
            Err(_) => {
                tracing::warn!(font = %path.display(), "not a usable TrueType font");
            }
        }
    }
    tracing::warn!("no chart font found, rendering charts without text");
    None
}

/// True when a configured font differs from the one already registered
fn font_ignored(loaded: Option<&Path>, configured: Option<&Path>) -> bool {
    match configured {
        Some(wanted) => loaded != Some(wanted),
        None => false,
    }
}
