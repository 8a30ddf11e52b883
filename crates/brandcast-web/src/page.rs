//! Data handed to the page template.

use crate::error::WebError;
use brandcast_analytics::SentimentMix;
use brandcast_config::Config;
use brandcast_engine::{BrandReport, InsightsStatus};
use brandcast_forecast::ForecastOutcome;
use handlebars::Handlebars;
use serde::Serialize;

pub const PREDICTION_DECIMALS: usize = 4;
const INDEX_TEMPLATE: &str = "index";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandOption {
    pub name: String,
    pub selected: bool,
}

fn options(brands: &[String], selected: Option<&str>) -> Vec<BrandOption> {
    brands
        .iter()
        .map(|name| BrandOption {
            name: name.clone(),
            selected: Some(name.as_str()) == selected,
        })
        .collect()
}

/// Everything `index.hbs` reads. Absent values render as placeholders.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageContext {
    pub brands: Vec<BrandOption>,
    pub competitors: Vec<BrandOption>,
    pub selected: Option<String>,
    pub prediction: Option<String>,
    pub trend_txt: Option<String>,
    pub trend_col: Option<String>,
    pub best_day: Option<String>,
    pub sentiment: Option<SentimentMix>,
    pub events_considered: usize,
    pub plot_url: Option<String>,
    pub notices: Vec<String>,
    pub scroll_to_result: bool,
}

impl PageContext {
    /// The empty form shown on `GET /`.
    pub fn form(config: &Config) -> Self {
        Self {
            brands: options(&config.brands, None),
            competitors: options(&config.brands, None),
            ..Self::default()
        }
    }

    /// The page after a submitted analysis.
    pub fn from_report(config: &Config, report: &BrandReport, plot_url: Option<String>) -> Self {
        let competitor = report.competitor.as_ref().map(|c| c.as_str());
        let mut page = Self {
            brands: options(&config.brands, Some(report.brand.as_str())),
            competitors: options(&config.brands, competitor),
            selected: Some(report.brand.to_string()),
            plot_url,
            scroll_to_result: true,
            ..Self::default()
        };

        match &report.forecast {
            Some(ForecastOutcome::Predicted(forecast)) => {
                page.prediction = Some(forecast.formatted(PREDICTION_DECIMALS));
                page.trend_txt = Some(forecast.trend.label().to_string());
                page.trend_col = Some(forecast.trend.color().to_string());
            }
            Some(ForecastOutcome::NotAvailable { .. }) => {
                page.notices
                    .push(format!("No trained model or daily data for {}.", report.brand));
            }
            None => {}
        }

        match &report.insights {
            InsightsStatus::Ready(insights) => {
                page.best_day = insights.best_day.clone();
                page.sentiment = Some(insights.sentiment);
                page.events_considered = insights.events_considered;
            }
            InsightsStatus::Unavailable { reason } => {
                page.notices.push(format!("Insights unavailable: {reason}."));
            }
        }

        page
    }
}

/// Compiled page templates.
#[derive(Debug)]
pub struct Templates {
    handlebars: Handlebars<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, WebError> {
        let mut handlebars = Handlebars::new();
        handlebars
            .register_template_string(INDEX_TEMPLATE, include_str!("../templates/index.hbs"))
            .map_err(|e| WebError::Startup(format!("index template: {e}")))?;
        Ok(Self { handlebars })
    }

    pub fn render(&self, page: &PageContext) -> Result<String, WebError> {
        Ok(self.handlebars.render(INDEX_TEMPLATE, page)?)
    }
}
