//! Result tabulation, CSV export and chart rendering.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::{const_mutex, Mutex};
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::BenchConfig;
use crate::distance::Implementation;
use crate::driver::BenchmarkSeries;
use crate::error::{Error, Result};

/// Header row of the results CSV.
pub const CSV_HEADER: &str =
    "n,Baseline Time (s),Optimized Time (s),Baseline Mem (MB),Optimized Mem (MB),Speedup (x)";

const CHART_SIZE: (u32, u32) = (800, 500);
const CHART_TITLE: &str = "Baseline vs Optimized Performance";
const FONT_FAMILY: &str = "sans-serif";

const BASELINE_COLOR: RGBColor = RGBColor(214, 39, 40);
const OPTIMIZED_COLOR: RGBColor = RGBColor(44, 160, 44);

/// Fonts tried, in order, when no font is configured.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Path of the font currently registered with the chart backend.
static REGISTERED_FONT: Mutex<Option<PathBuf>> = const_mutex(None);

/// One row of the results table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResultRow {
    /// Number of points.
    pub n: usize,
    /// Baseline elapsed seconds.
    pub baseline_time_s: f64,
    /// Optimized elapsed seconds.
    pub optimized_time_s: f64,
    /// Baseline peak memory in MiB.
    pub baseline_mem_mb: f64,
    /// Optimized peak memory in MiB.
    pub optimized_mem_mb: f64,
    /// `baseline_time_s / optimized_time_s`, or `None` when the optimized
    /// time is exactly zero.
    pub speedup: Option<f64>,
}

/// Ratio of baseline to optimized time. `None` if `optimized` is zero.
#[inline]
pub fn speedup(baseline: f64, optimized: f64) -> Option<f64> {
    if optimized == 0.0 {
        None
    } else {
        Some(baseline / optimized)
    }
}

/// The full results table, one row per measured size.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultsTable {
    pub rows: Vec<ResultRow>,
}

impl ResultsTable {
    /// Builds the table from collected series, deriving speedup per row.
    pub fn from_series(series: &BenchmarkSeries) -> Self {
        // Rows stop at the shortest series.
        let rows = series
            .sizes
            .iter()
            .zip(&series.baseline_times)
            .zip(&series.optimized_times)
            .zip(&series.baseline_mem)
            .zip(&series.optimized_mem)
            .map(
                |((((&n, &baseline_time_s), &optimized_time_s), &baseline_mem_mb), &optimized_mem_mb)| {
                    ResultRow {
                        n,
                        baseline_time_s,
                        optimized_time_s,
                        baseline_mem_mb,
                        optimized_mem_mb,
                        speedup: speedup(baseline_time_s, optimized_time_s),
                    }
                },
            )
            .collect();
        Self { rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serializes the rows as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Writes the JSON form of the table, creating parent directories.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        ensure_parent_dir(path)?;
        fs::write(path, self.to_json()?)
            .map_err(|e| Error::IoError(format!("write {} failed: {}", path.display(), e)))
    }

    /// Writes the table as CSV. An undefined speedup is an empty cell.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        ensure_parent_dir(path)?;
        let file = File::create(path)
            .map_err(|e| Error::IoError(format!("create {} failed: {}", path.display(), e)))?;
        let mut writer = BufWriter::new(file);
        self.write_csv_to(&mut writer)
            .and_then(|_| writer.flush())
            .map_err(|e| Error::IoError(format!("write {} failed: {}", path.display(), e)))
    }

    fn write_csv_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{}", CSV_HEADER)?;
        for row in &self.rows {
            let speedup = row.speedup.map(|s| s.to_string()).unwrap_or_default();
            writeln!(
                out,
                "{},{},{},{},{},{}",
                row.n,
                row.baseline_time_s,
                row.optimized_time_s,
                row.baseline_mem_mb,
                row.optimized_mem_mb,
                speedup
            )?;
        }
        Ok(())
    }

    /// Renders the time-vs-size line chart as a PNG.
    ///
    /// Chart text needs a TrueType font: `font_path` if given, otherwise the
    /// first readable system font from a fixed candidate list. Without one,
    /// the lines, markers and grid are drawn with no text.
    pub fn render_plot<P: AsRef<Path>>(&self, path: P, font_path: Option<&Path>) -> Result<()> {
        let path = path.as_ref();
        ensure_parent_dir(path)?;

        let with_text = ensure_chart_font(font_path)?;
        if !with_text {
            warn!("no TrueType font found, drawing chart without text");
        }

        self.draw_chart(path, with_text)
            .map_err(|e| Error::PlotError(format!("{}: {}", path.display(), e)))
    }

    fn draw_chart(
        &self,
        path: &Path,
        with_text: bool,
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let (x_range, y_range) = self.axis_ranges();
        let mut builder = ChartBuilder::on(&root);
        builder.margin(15);
        if with_text {
            builder
                .caption(CHART_TITLE, (FONT_FAMILY, 24))
                .x_label_area_size(40)
                .y_label_area_size(60);
        }
        let mut chart = builder.build_cartesian_2d(x_range, y_range)?;

        let mut mesh = chart.configure_mesh();
        if with_text {
            mesh.x_desc("Number of Points (n)")
                .y_desc("Execution Time (seconds)");
        } else {
            mesh.x_labels(0).y_labels(0);
        }
        mesh.draw()?;

        for (implementation, color) in [
            (Implementation::Baseline, BASELINE_COLOR),
            (Implementation::Optimized, OPTIMIZED_COLOR),
        ] {
            let points = self.time_series(implementation);

            let anno =
                chart.draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?;
            if with_text {
                anno.label(implementation.label()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            }
            chart.draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
            )?;
        }

        if with_text {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }

        root.present()?;
        Ok(())
    }

    /// `(n, seconds)` points for one implementation.
    fn time_series(&self, implementation: Implementation) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .map(|r| {
                let t = match implementation {
                    Implementation::Baseline => r.baseline_time_s,
                    Implementation::Optimized => r.optimized_time_s,
                };
                (r.n as f64, t)
            })
            .collect()
    }

    fn axis_ranges(&self) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
        let min_n = self.rows.iter().map(|r| r.n).min().unwrap_or(0) as f64;
        let max_n = self.rows.iter().map(|r| r.n).max().unwrap_or(1) as f64;
        let pad = ((max_n - min_n) * 0.05).max(1.0);

        let max_t = self
            .rows
            .iter()
            .map(|r| r.baseline_time_s.max(r.optimized_time_s))
            .fold(0.0f64, f64::max);
        let y_max = if max_t > 0.0 { max_t * 1.1 } else { 1.0 };

        ((min_n - pad)..(max_n + pad), 0.0..y_max)
    }
}

impl fmt::Display for ResultsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\tBenchmark Summary")?;
        writeln!(
            f,
            "{:>6}  {:>17}  {:>18}  {:>17}  {:>18}  {:>11}",
            "n",
            "Baseline Time (s)",
            "Optimized Time (s)",
            "Baseline Mem (MB)",
            "Optimized Mem (MB)",
            "Speedup (x)"
        )?;
        for row in &self.rows {
            let speedup = match row.speedup {
                Some(s) => format!("{:.2}", s),
                None => "n/a".to_string(),
            };
            writeln!(
                f,
                "{:>6}  {:>17.6}  {:>18.6}  {:>17.6}  {:>18.6}  {:>11}",
                row.n,
                row.baseline_time_s,
                row.optimized_time_s,
                row.baseline_mem_mb,
                row.optimized_mem_mb,
                speedup
            )?;
        }
        Ok(())
    }
}

/// Writes the CSV table and the chart to the configured paths.
pub fn report(table: &ResultsTable, config: &BenchConfig) -> Result<()> {
    table.write_csv(&config.table_path)?;
    info!("Saved results table as {}", config.table_path.display());

    table.render_plot(&config.plot_path, config.font_path.as_deref())?;
    info!("Saved performance plot as {}", config.plot_path.display());
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent).map_err(|e| {
                Error::IoError(format!("create dir {} failed: {}", parent.display(), e))
            })
        }
        _ => Ok(()),
    }
}

/// Makes sure a font is registered for chart text.
///
/// Returns `Ok(false)` if no font could be found. An explicitly configured
/// font that cannot be read or parsed is an error.
fn ensure_chart_font(font_path: Option<&Path>) -> Result<bool> {
    let mut registered = REGISTERED_FONT.lock();

    if let Some(path) = font_path {
        if registered.as_deref() != Some(path) {
            let bytes = fs::read(path)
                .map_err(|e| Error::IoError(format!("read font {} failed: {}", path.display(), e)))?;
            install_font(bytes)
                .map_err(|e| Error::PlotError(format!("font {}: {}", path.display(), e)))?;
            *registered = Some(path.to_path_buf());
        }
        return Ok(true);
    }

    if registered.is_some() {
        return Ok(true);
    }
    for candidate in FONT_CANDIDATES.iter().map(Path::new) {
        if let Ok(bytes) = fs::read(candidate) {
            if install_font(bytes).is_ok() {
                *registered = Some(candidate.to_path_buf());
                return Ok(true);
            }
        }
    }
    Ok(false)
}

fn install_font(bytes: Vec<u8>) -> std::result::Result<(), String> {
    // The backend keeps fonts for the process lifetime.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font(FONT_FAMILY, FontStyle::Normal, bytes)
        .map_err(|_| "invalid TrueType font data".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_series() -> BenchmarkSeries {
        BenchmarkSeries {
            sizes: vec![200, 400],
            baseline_times: vec![0.5, 2.0],
            optimized_times: vec![0.125, 0.0],
            baseline_mem: vec![3.0, 12.0],
            optimized_mem: vec![0.5, 2.0],
        }
    }

    #[test]
    fn test_speedup() {
        assert_eq!(speedup(1.0, 0.25), Some(4.0));
        assert_eq!(speedup(1.0, 0.0), None);
        assert_eq!(speedup(0.0, 0.0), None);
    }

    #[test]
    fn test_table_rows_follow_series() {
        let table = ResultsTable::from_series(&sample_series());
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].n, 200);
        assert_eq!(table.rows[1].n, 400);
        assert_eq!(table.rows[0].speedup, Some(4.0));
        assert_eq!(table.rows[1].speedup, None);
        assert_eq!(table.rows[1].baseline_mem_mb, 12.0);
    }

    #[test]
    fn test_csv_layout() {
        let table = ResultsTable::from_series(&sample_series());
        let mut out = Vec::new();
        table.write_csv_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "200,0.5,0.125,3,0.5,4");
        assert_eq!(lines[2], "400,2,0,12,2,");
    }

    #[test]
    fn test_display_marks_undefined_speedup() {
        let table = ResultsTable::from_series(&sample_series());
        let text = table.to_string();
        assert!(text.starts_with("\tBenchmark Summary"));
        assert!(text.contains("Speedup (x)"));
        assert!(text.contains("4.00"));
        assert!(text.contains("n/a"));
    }

    #[test]
    fn test_axis_ranges_single_row() {
        let series = BenchmarkSeries {
            sizes: vec![4],
            baseline_times: vec![0.0],
            optimized_times: vec![0.0],
            baseline_mem: vec![0.0],
            optimized_mem: vec![0.0],
        };
        let (x, y) = ResultsTable::from_series(&series).axis_ranges();
        assert!(x.start < 4.0 && x.end > 4.0);
        assert_eq!(y, 0.0..1.0);
    }

    #[test]
    fn test_json_keeps_undefined_speedup_as_null() {
        let table = ResultsTable::from_series(&sample_series());
        let value: serde_json::Value = serde_json::from_str(&table.to_json().unwrap()).unwrap();
        assert_eq!(value["rows"][0]["n"], 200);
        assert_eq!(value["rows"][0]["speedup"], 4.0);
        assert!(value["rows"][1]["speedup"].is_null());
    }

    #[test]
    fn test_mismatched_series_truncate_to_shortest() {
        let mut series = sample_series();
        series.optimized_mem.pop();
        let table = ResultsTable::from_series(&series);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].n, 200);
    }

    #[test]
    fn test_write_json_creates_parent_dir() {
        let dir = std::env::temp_dir().join(format!("pairbench_json_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("nested/results.json");

        let table = ResultsTable::from_series(&sample_series());
        table.write_json(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["rows"][1]["n"], 400);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_invalid_explicit_font_is_plot_error() {
        let dir = std::env::temp_dir().join(format!("pairbench_badfont_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let font = dir.join("not_a_font.ttf");
        fs::write(&font, b"definitely not a font").unwrap();

        let table = ResultsTable::from_series(&sample_series());
        let err = table.render_plot(dir.join("chart.png"), Some(&font)).unwrap_err();
        match err {
            Error::PlotError(msg) => {
                assert!(msg.contains("not_a_font.ttf"));
                assert!(msg.contains("invalid TrueType font data"));
            }
            other => panic!("unexpected error: {other}"),
        }
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_time_series() {
        let table = ResultsTable::from_series(&sample_series());
        assert_eq!(
            table.time_series(Implementation::Baseline),
            vec![(200.0, 0.5), (400.0, 2.0)]
        );
        assert_eq!(
            table.time_series(Implementation::Optimized),
            vec![(200.0, 0.125), (400.0, 0.0)]
        );
    }

    #[test]
    fn test_missing_explicit_font_is_error() {
        let table = ResultsTable::from_series(&sample_series());
        let out = std::env::temp_dir().join(format!("pairbench_font_{}.png", std::process::id()));
        let err = table
            .render_plot(&out, Some(Path::new("/nonexistent/font.ttf")))
            .unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
        let _ = fs::remove_file(&out);
    }
}
