//! # Brandcast Graphs
//!
//! The engagement trend chart: a host-neutral model (primary trailing
//! window, forecast marker, dashed competitor line) and a PNG renderer for
//! the web dashboard. The terminal dashboard draws the same model itself.

pub mod chart;
pub mod png;

pub use chart::{
    parse_hex_color, ChartRenderer, ChartSeries, ForecastMarker, LineStyle, TrendChart,
    FORECAST_LABEL,
};
pub use png::{data_uri, encode_base64, PngRenderer};
