//! PNG rendering with plotters' bitmap backend.

use crate::chart::{parse_hex_color, ChartRenderer, ChartSeries, LineStyle, TrendChart};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use brandcast_common::{BrandcastError, Result};
use brandcast_config::ChartConfig;
use image::{codecs::png::PngEncoder, ColorType, ImageEncoder};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontStyle;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

const FONT_FAMILY: &str = "sans-serif";
const GRID_COLOR: RGBColor = RGBColor(200, 200, 200);

static FONT_READY: OnceLock<bool> = OnceLock::new();

/// Registers the chart font once per process. Returns whether text can be
/// drawn; the first path wins.
fn ensure_font(path: Option<&Path>) -> bool {
    *FONT_READY.get_or_init(|| {
        let Some(path) = path else {
            return false;
        };
        match std::fs::read(path) {
            Ok(bytes) => {
                let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
                match plotters::style::register_font(FONT_FAMILY, FontStyle::Normal, bytes) {
                    Ok(()) => {
                        debug!("Registered chart font {}", path.display());
                        true
                    }
                    Err(_) => {
                        warn!("Font {} is not a usable TrueType font", path.display());
                        false
                    }
                }
            }
            Err(err) => {
                warn!("Chart font {} unavailable, drawing without text: {}", path.display(), err);
                false
            }
        }
    })
}

fn rgb(color: &str) -> RGBColor {
    let (r, g, b) = parse_hex_color(color);
    RGBColor(r, g, b)
}

/// Five-pointed star in pixel offsets around the anchor.
fn star(outer: f64, inner: f64) -> Vec<(i32, i32)> {
    (0..10)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            let angle = std::f64::consts::PI * (i as f64) / 5.0 - std::f64::consts::FRAC_PI_2;
            (
                (radius * angle.cos()).round() as i32,
                (radius * angle.sin()).round() as i32,
            )
        })
        .collect()
}

/// Draws a [`TrendChart`] into PNG bytes.
#[derive(Debug, Clone)]
pub struct PngRenderer {
    config: ChartConfig,
}

impl PngRenderer {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    fn text_enabled(&self) -> bool {
        self.config.show_labels && ensure_font(self.config.font_path.as_deref())
    }

    fn draw(&self, root: &DrawingArea<BitMapBackend<'_>, Shift>, chart: &TrendChart) -> Result<()> {
        root.fill(&rgb(&self.config.background_color))?;

        let text = self.text_enabled();
        let (x_min, x_max) = chart.x_bounds();
        let (y_min, y_max) = chart.y_bounds();
        let x_max = x_max + 0.5;

        let mut builder = ChartBuilder::on(root);
        builder.margin(20);
        if text {
            builder
                .caption(&chart.title, (FONT_FAMILY, 24.0))
                .x_label_area_size(35)
                .y_label_area_size(60);
        }
        let mut ctx = builder.build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        if text {
            ctx.configure_mesh()
                .disable_mesh()
                .x_desc("Day")
                .y_desc("Engagement Rate")
                .label_style((FONT_FAMILY, 14.0))
                .draw()?;
        }

        if self.config.show_grid {
            let grid = GRID_COLOR.stroke_width(1);
            for i in 0..=10 {
                let x = x_min + (x_max - x_min) * f64::from(i) / 10.0;
                ctx.draw_series(DashedLineSeries::new(vec![(x, y_min), (x, y_max)], 4, 4, grid))?;
            }
            for i in 0..=6 {
                let y = y_min + (y_max - y_min) * f64::from(i) / 6.0;
                ctx.draw_series(DashedLineSeries::new(vec![(x_min, y), (x_max, y)], 4, 4, grid))?;
            }
        }

        for series in chart.series() {
            self.draw_series(&mut ctx, series)?;
        }

        if let Some(marker) = &chart.forecast {
            let color = rgb(&marker.color);
            let shape = star(14.0, 6.0);
            ctx.draw_series(std::iter::once(
                EmptyElement::at((marker.x, marker.y)) + Polygon::new(shape, color.filled()),
            ))?
            .label(marker.label.as_str())
            .legend(move |(x, y)| Circle::new((x + 10, y), 5, color.filled()));
        }

        if text {
            ctx.configure_series_labels()
                .label_font((FONT_FAMILY, 14.0))
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }

        Ok(())
    }

    fn draw_series(
        &self,
        ctx: &mut ChartContext<'_, BitMapBackend<'_>, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
        series: &ChartSeries,
    ) -> Result<()> {
        let color = rgb(&series.color);
        let points = series.points.iter().copied();
        let legend = move |(x, y): (i32, i32)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2));

        match series.style {
            LineStyle::Solid => {
                ctx.draw_series(LineSeries::new(points, color.stroke_width(3)))?
                    .label(series.label.as_str())
                    .legend(legend);
            }
            LineStyle::Dashed => {
                ctx.draw_series(DashedLineSeries::new(points, 8, 6, color.stroke_width(2)))?
                    .label(series.label.as_str())
                    .legend(legend);
            }
        }
        Ok(())
    }
}

impl ChartRenderer for PngRenderer {
    type Output = Vec<u8>;

    fn render(&self, chart: &TrendChart) -> Result<Vec<u8>> {
        let (width, height) = (self.config.width, self.config.height);
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            self.draw(&root, chart)?;
            root.present()?;
        }

        let mut png = Vec::new();
        PngEncoder::new(&mut png)
            .write_image(&buffer, width, height, ColorType::Rgb8)
            .map_err(|e| BrandcastError::graph_with_source("PNG encoding failed", e))?;

        debug!("Rendered {} ({} bytes)", chart.title, png.len());
        Ok(png)
    }

    fn name(&self) -> &'static str {
        "png"
    }
}

/// Base64 of the PNG bytes, as embedded in an `<img>` data URI.
pub fn encode_base64(png: &[u8]) -> String {
    STANDARD.encode(png)
}

pub fn data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", encode_base64(png))
}
