//! Host-neutral trend chart model.

use brandcast_common::{Brand, Result};
use brandcast_config::ChartConfig;
use serde::Serialize;

pub const FORECAST_LABEL: &str = "AI Forecast";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// One plotted line. `x` is the index within the trailing window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub color: String,
    pub style: LineStyle,
}

impl ChartSeries {
    fn from_tail(label: String, values: &[f64], window: usize, color: &str, style: LineStyle) -> Self {
        let start = values.len().saturating_sub(window);
        let points = values[start..]
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect();
        Self {
            label,
            points,
            color: color.to_string(),
            style,
        }
    }
}

/// The single forecast point, one step past the primary line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastMarker {
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub color: String,
}

/// Everything a renderer needs to draw the engagement trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendChart {
    pub title: String,
    pub primary: ChartSeries,
    pub forecast: Option<ForecastMarker>,
    pub competitor: Option<ChartSeries>,
}

impl TrendChart {
    /// Builds the chart from full daily columns; each line keeps its last
    /// `config.window` values.
    pub fn build(
        config: &ChartConfig,
        brand: &Brand,
        primary: &[f64],
        predicted: Option<f64>,
        competitor: Option<(&Brand, &[f64])>,
    ) -> Self {
        let primary = ChartSeries::from_tail(
            brand.to_string(),
            primary,
            config.window,
            &config.primary_color,
            LineStyle::Solid,
        );
        let forecast = predicted.map(|y| ForecastMarker {
            x: primary.points.len() as f64,
            y,
            label: FORECAST_LABEL.to_string(),
            color: config.forecast_color.clone(),
        });
        let competitor = competitor.map(|(name, values)| {
            ChartSeries::from_tail(
                format!("{name} (Comp)"),
                values,
                config.window,
                &config.competitor_color,
                LineStyle::Dashed,
            )
        });

        Self {
            title: format!("Engagement Trend: {brand}"),
            primary,
            forecast,
            competitor,
        }
    }

    /// Lines in drawing order.
    pub fn series(&self) -> impl Iterator<Item = &ChartSeries> {
        std::iter::once(&self.primary).chain(self.competitor.as_ref())
    }

    /// X range covering every line and the marker.
    pub fn x_bounds(&self) -> (f64, f64) {
        let max_x = self
            .series()
            .flat_map(|s| s.points.last().map(|p| p.0))
            .chain(self.forecast.as_ref().map(|m| m.x))
            .fold(0.0, f64::max);
        (0.0, max_x.max(1.0))
    }

    /// Y range with 5% padding; a flat chart gets a unit span.
    pub fn y_bounds(&self) -> (f64, f64) {
        let ys = self
            .series()
            .flat_map(|s| s.points.iter().map(|p| p.1))
            .chain(self.forecast.as_ref().map(|m| m.y))
            .filter(|y| y.is_finite());

        let (min, max) = ys.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
        if !min.is_finite() {
            return (0.0, 1.0);
        }
        if (max - min).abs() < f64::EPSILON {
            return (min - 0.5, max + 0.5);
        }
        let pad = (max - min) * 0.05;
        (min - pad, max + pad)
    }
}

/// Turns a [`TrendChart`] into a host-specific output.
pub trait ChartRenderer {
    type Output;

    fn render(&self, chart: &TrendChart) -> Result<Self::Output>;

    fn name(&self) -> &'static str;
}

/// Parses `#rrggbb`; anything else falls back to black.
pub fn parse_hex_color(color: &str) -> (u8, u8, u8) {
    let parse = |hex: &str| -> Option<(u8, u8, u8)> {
        if hex.len() != 6 {
            return None;
        }
        Some((
            u8::from_str_radix(hex.get(0..2)?, 16).ok()?,
            u8::from_str_radix(hex.get(2..4)?, 16).ok()?,
            u8::from_str_radix(hex.get(4..6)?, 16).ok()?,
        ))
    };
    color
        .strip_prefix('#')
        .and_then(parse)
        .unwrap_or((0, 0, 0))
}
