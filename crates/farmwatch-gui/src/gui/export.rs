//! PDF export of the chart grid and analysis report.
//!
//! The export is drawn directly with printpdf: page one holds a grid of
//! vector-drawn chart miniatures, page two (and overflow pages) the
//! sanitized report as wrapped prose. Charts follow the on-screen rule: a
//! single-point series gets a marker with no connecting line.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb,
};
use thiserror::Error;
use tracing::{debug, info};

/// One chart stream prepared for export.
#[derive(Debug, Clone)]
pub struct ChartSeries {
    /// Chart title.
    pub title: String,
    /// (hours-ago, value) pairs, oldest first.
    pub points: Vec<(f64, f64)>,
}

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    /// No completed analysis to export.
    #[error("No analysis report to export")]
    NothingToExport,

    /// Filesystem failure.
    #[error("Failed to write PDF: {0}")]
    Io(#[from] std::io::Error),

    /// PDF generation failure.
    #[error("Failed to build PDF: {0}")]
    Pdf(#[from] printpdf::Error),
}

// Page geometry in millimeters. Charts go on a landscape A4 page, the
// report on portrait pages.
const CHARTS_PAGE_W: f64 = 297.0;
const CHARTS_PAGE_H: f64 = 210.0;
const REPORT_PAGE_W: f64 = 210.0;
const REPORT_PAGE_H: f64 = 297.0;
const REPORT_MARGIN: f64 = 20.0;
const REPORT_LINE_STEP: f64 = 6.0;

/// Characters per wrapped report line.
const REPORT_LINE_CHARS: usize = 90;

/// The chart page fits a 3x2 grid.
const MAX_EXPORT_CHARTS: usize = 6;

/// Generate an export path from configuration.
///
/// Uses the configured export directory if set, otherwise falls back to
/// downloads or documents directory.
pub fn generate_export_path(export_directory: &str, label: &str, ext: &str) -> (PathBuf, String) {
    // Generate filename with timestamp
    let timestamp = time::OffsetDateTime::now_utc()
        .format(
            &time::format_description::parse("[year][month][day]_[hour][minute][second]").unwrap(),
        )
        .unwrap_or_else(|_| "export".to_string());
    let filename = format!("farmwatch_{}_{}.{}", label, timestamp, ext);

    let export_dir = if !export_directory.is_empty() {
        PathBuf::from(export_directory)
    } else {
        dirs::download_dir()
            .or_else(dirs::document_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    };
    let export_path = export_dir.join(&filename);

    (export_path, filename)
}

/// Export the chart grid and report to `path`.
///
/// Refuses, creating no file, when `report` is empty: there is nothing to
/// export before the first analysis completes.
pub fn export_pdf(charts: &[ChartSeries], report: &str, path: &Path) -> Result<(), ExportError> {
    if report.trim().is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let (doc, charts_page, charts_layer) = PdfDocument::new(
        "Farmwatch Analysis",
        Mm(CHARTS_PAGE_W as f32),
        Mm(CHARTS_PAGE_H as f32),
        "charts",
    );
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let font_bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let layer = doc.get_page(charts_page).get_layer(charts_layer);
    layer.use_text(
        "Sensor Charts",
        16.0,
        Mm(15.0),
        Mm((CHARTS_PAGE_H - 15.0) as f32),
        &font_bold,
    );
    if charts.len() > MAX_EXPORT_CHARTS {
        debug!(
            dropped = charts.len() - MAX_EXPORT_CHARTS,
            "Chart page holds {} charts; extra streams are not exported", MAX_EXPORT_CHARTS
        );
    }
    draw_chart_grid(&layer, &font, charts);

    // Report page(s)
    let (report_page, report_layer) =
        doc.add_page(Mm(REPORT_PAGE_W as f32), Mm(REPORT_PAGE_H as f32), "report");
    let mut layer = doc.get_page(report_page).get_layer(report_layer);
    layer.use_text(
        "Analysis Report",
        18.0,
        Mm(REPORT_MARGIN as f32),
        Mm((REPORT_PAGE_H - REPORT_MARGIN) as f32),
        &font_bold,
    );

    let mut y = REPORT_PAGE_H - REPORT_MARGIN - 12.0;
    for line in wrap_text(report, REPORT_LINE_CHARS) {
        if y < REPORT_MARGIN {
            let (page, layer_idx) =
                doc.add_page(Mm(REPORT_PAGE_W as f32), Mm(REPORT_PAGE_H as f32), "report continued");
            layer = doc.get_page(page).get_layer(layer_idx);
            y = REPORT_PAGE_H - REPORT_MARGIN;
        }
        if !line.is_empty() {
            layer.use_text(line, 11.0, Mm(REPORT_MARGIN as f32), Mm(y as f32), &font);
        }
        y -= REPORT_LINE_STEP;
    }

    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file))?;
    info!("Analysis exported to {:?}", path);
    Ok(())
}

fn draw_chart_grid(layer: &PdfLayerReference, font: &IndirectFontRef, charts: &[ChartSeries]) {
    const COLS: usize = 2;
    const LEFT: f64 = 15.0;
    const TOP: f64 = CHARTS_PAGE_H - 25.0;
    const CELL_W: f64 = 130.0;
    const CELL_H: f64 = 53.0;
    const GAP_X: f64 = 7.0;
    const GAP_Y: f64 = 6.0;

    for (idx, chart) in charts.iter().take(MAX_EXPORT_CHARTS).enumerate() {
        let col = idx % COLS;
        let row = idx / COLS;
        let x0 = LEFT + col as f64 * (CELL_W + GAP_X);
        let y0 = TOP - row as f64 * (CELL_H + GAP_Y) - CELL_H;
        draw_chart_cell(layer, font, chart, x0, y0, CELL_W, CELL_H);
    }
}

fn draw_chart_cell(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    chart: &ChartSeries,
    x0: f64,
    y0: f64,
    w: f64,
    h: f64,
) {
    // Frame
    layer.set_outline_thickness(0.4);
    layer.set_outline_color(Color::Rgb(Rgb::new(0.6, 0.6, 0.6, None)));
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x0 as f32), Mm(y0 as f32)), false),
            (Point::new(Mm((x0 + w) as f32), Mm(y0 as f32)), false),
            (Point::new(Mm((x0 + w) as f32), Mm((y0 + h) as f32)), false),
            (Point::new(Mm(x0 as f32), Mm((y0 + h) as f32)), false),
        ],
        is_closed: true,
    });

    layer.use_text(&chart.title, 9.0, Mm((x0 + 2.0) as f32), Mm((y0 + h - 5.0) as f32), font);

    if chart.points.is_empty() {
        return;
    }

    // Plot area inside the frame, below the title
    let (px0, py0, pw, ph) = (x0 + 5.0, y0 + 5.0, w - 10.0, h - 16.0);
    let (min_x, max_x) = bounds(chart.points.iter().map(|p| p.0));
    let (min_y, max_y) = bounds(chart.points.iter().map(|p| p.1));

    let mapped: Vec<(f64, f64)> = chart
        .points
        .iter()
        .map(|&(x, y)| {
            (
                map_coord(x, min_x, max_x, px0, pw),
                map_coord(y, min_y, max_y, py0, ph),
            )
        })
        .collect();

    layer.set_outline_thickness(0.8);
    layer.set_outline_color(Color::Rgb(Rgb::new(0.13, 0.55, 0.25, None)));

    // Single-point series get a marker with no connecting line
    if mapped.len() >= 2 {
        layer.add_line(Line {
            points: mapped
                .iter()
                .map(|&(x, y)| (Point::new(Mm(x as f32), Mm(y as f32)), false))
                .collect(),
            is_closed: false,
        });
    }
    for &(x, y) in &mapped {
        layer.add_line(marker(x, y));
    }
}

/// Small diamond marker around a point.
fn marker(x: f64, y: f64) -> Line {
    const R: f64 = 0.7;
    Line {
        points: vec![
            (Point::new(Mm((x - R) as f32), Mm(y as f32)), false),
            (Point::new(Mm(x as f32), Mm((y + R) as f32)), false),
            (Point::new(Mm((x + R) as f32), Mm(y as f32)), false),
            (Point::new(Mm(x as f32), Mm((y - R) as f32)), false),
        ],
        is_closed: true,
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Map a data coordinate into the plot area. Degenerate spans (single
/// point, flat series) land in the middle of the extent.
fn map_coord(v: f64, min: f64, max: f64, origin: f64, extent: f64) -> f64 {
    let span = max - min;
    if span.abs() < 1e-12 {
        origin + extent / 2.0
    } else {
        origin + (v - min) / span * extent
    }
}

/// Greedy word wrap at `width` characters per line. Paragraph breaks in
/// the input are preserved as empty lines.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if !current.is_empty()
                && current.chars().count() + 1 + word.chars().count() > width
            {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_charts() -> Vec<ChartSeries> {
        vec![
            ChartSeries {
                title: "Greenhouse temperature".to_string(),
                points: (0..20).map(|i| (-(20 - i) as f64 * 0.25, 20.0 + i as f64 * 0.1)).collect(),
            },
            ChartSeries {
                title: "Lone reading".to_string(),
                points: vec![(-1.0, 42.0)],
            },
            ChartSeries {
                title: "Empty stream".to_string(),
                points: Vec::new(),
            },
        ]
    }

    #[test]
    fn test_export_refuses_without_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");

        let result = export_pdf(&sample_charts(), "   ", &path);

        assert!(matches!(result, Err(ExportError::NothingToExport)));
        assert!(!path.exists());
    }

    #[test]
    fn test_export_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");

        let report = "Plan: water more.\n\nSensor 3 drifted overnight and should be recalibrated.";
        export_pdf(&sample_charts(), report, &path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_generate_export_path_uses_directory_and_extension() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap();

        let (path, filename) = generate_export_path(dir_str, "analysis", "pdf");

        assert!(path.starts_with(dir.path()));
        assert!(filename.starts_with("farmwatch_analysis_"));
        assert!(filename.ends_with(".pdf"));
    }

    #[test]
    fn test_wrap_text_respects_width() {
        let text = "one two three four five six seven eight nine ten";
        let lines = wrap_text(text, 12);

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.chars().count() <= 12, "line too long: {:?}", line);
        }
    }

    #[test]
    fn test_wrap_text_preserves_paragraph_breaks() {
        let lines = wrap_text("first paragraph\n\nsecond paragraph", 80);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].is_empty());
    }

    #[test]
    fn test_map_coord_centers_degenerate_span() {
        let mapped = map_coord(5.0, 5.0, 5.0, 10.0, 40.0);
        assert!((mapped - 30.0).abs() < 1e-9);
    }
}
