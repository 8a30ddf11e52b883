//! Dashboard state and the commands it asks the engine to run.

use brandcast_common::{Brand, BrandcastError, Result, TrendDirection};
use brandcast_engine::{BrandEngine, BrandReport};
use brandcast_forecast::{Forecast, ForecastOutcome};
use tracing::{debug, error, info};

pub const FORECAST_DECIMALS: usize = 3;

/// Which selector the arrow keys move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Brand,
    Competitor,
}

/// Work the event loop should hand to the engine after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Target brand changed: reset the forecast card and reload the overview.
    Reload,
    /// Compare mode or competitor changed: rebuild the chart only.
    Redraw,
    /// Run analyze & predict for the target brand.
    Predict,
}

#[derive(Debug)]
pub struct App {
    brands: Vec<Brand>,
    brand_index: usize,
    competitor_index: usize,
    compare: bool,
    focus: Focus,
    forecast: Option<Forecast>,
    report: Option<BrandReport>,
    notice: Option<String>,
    error: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(brands: Vec<Brand>) -> Result<Self> {
        if brands.is_empty() {
            return Err(BrandcastError::config("no brands configured"));
        }
        // Competitor selector starts on the second brand.
        let competitor_index = 1.min(brands.len() - 1);
        Ok(Self {
            brands,
            brand_index: 0,
            competitor_index,
            compare: false,
            focus: Focus::Brand,
            forecast: None,
            report: None,
            notice: None,
            error: None,
            should_quit: false,
        })
    }

    pub fn brand(&self) -> &Brand {
        &self.brands[self.brand_index]
    }

    /// Competitor shown in the selector, whether or not compare mode is on.
    pub fn competitor_choice(&self) -> &Brand {
        &self.brands[self.competitor_index]
    }

    /// Competitor to plot; only set in compare mode.
    pub fn competitor(&self) -> Option<&Brand> {
        self.compare.then(|| self.competitor_choice())
    }

    pub fn compare(&self) -> bool {
        self.compare
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn forecast(&self) -> Option<&Forecast> {
        self.forecast.as_ref()
    }

    pub fn report(&self) -> Option<&BrandReport> {
        self.report.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Forecast card text: value and trend line.
    pub fn forecast_card(&self) -> (String, String) {
        match &self.forecast {
            Some(forecast) => (
                forecast.formatted(FORECAST_DECIMALS),
                trend_text(forecast).to_string(),
            ),
            None => ("--".to_string(), "Wait...".to_string()),
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Brand => Focus::Competitor,
            Focus::Competitor => Focus::Brand,
        };
    }

    pub fn toggle_compare(&mut self) -> Command {
        self.compare = !self.compare;
        debug!("Compare mode {}", if self.compare { "on" } else { "off" });
        Command::Redraw
    }

    /// Moves the focused selector by `step`, wrapping around. The competitor
    /// selector is disabled outside compare mode.
    pub fn shift_selection(&mut self, step: isize) -> Option<Command> {
        let len = self.brands.len() as isize;
        let shift = |index: usize| (index as isize + step).rem_euclid(len) as usize;
        match self.focus {
            Focus::Brand => {
                self.brand_index = shift(self.brand_index);
                self.forecast = None;
                self.notice = None;
                Some(Command::Reload)
            }
            Focus::Competitor if self.compare => {
                self.competitor_index = shift(self.competitor_index);
                Some(Command::Redraw)
            }
            Focus::Competitor => None,
        }
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Runs `command` against the engine. Failures open the error dialog.
    pub fn execute(&mut self, command: Command, engine: &BrandEngine) {
        if let Err(err) = self.try_execute(command, engine) {
            error!("{:?} for {} failed: {}", command, self.brand(), err);
            self.show_error(err.to_string());
        }
    }

    fn try_execute(&mut self, command: Command, engine: &BrandEngine) -> Result<()> {
        let brand = self.brand().clone();
        let competitor = self.competitor().cloned();
        match command {
            Command::Reload => {
                self.report = Some(engine.overview(&brand, competitor.as_ref())?);
            }
            Command::Redraw => {
                let predicted = self.forecast.as_ref().map(|f| f.predicted);
                if self.report.is_none() {
                    self.report = Some(engine.overview(&brand, competitor.as_ref())?);
                }
                let chart = engine.chart(&brand, predicted, competitor.as_ref())?;
                if let Some(report) = self.report.as_mut() {
                    report.chart = chart;
                    report.competitor = competitor;
                }
            }
            Command::Predict => {
                let report = engine.analyze(&brand, competitor.as_ref())?;
                match &report.forecast {
                    Some(ForecastOutcome::Predicted(forecast)) => {
                        info!("Predicted {:.3} for {}", forecast.predicted, brand);
                        self.forecast = Some(forecast.clone());
                        self.notice = None;
                    }
                    Some(ForecastOutcome::NotAvailable { .. }) | None => {
                        self.forecast = None;
                        self.notice = Some(format!("No trained model or daily data for {brand}"));
                    }
                }
                self.report = Some(report);
            }
        }
        Ok(())
    }
}

pub fn trend_text(forecast: &Forecast) -> &'static str {
    match forecast.trend {
        TrendDirection::Up => "📈 TRENDING UP",
        TrendDirection::Down => "📉 TRENDING DOWN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandcast_common::test_utils::{create_temp_dir, write_daily_csv};
    use brandcast_config::Config;
    use brandcast_forecast::Forecaster;

    struct FixedForecaster;

    impl Forecaster for FixedForecaster {
        fn predict(&self, brand: &Brand) -> Result<ForecastOutcome> {
            Ok(ForecastOutcome::Predicted(Forecast::new(brand.clone(), 2.5, 2.0)))
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn app() -> App {
        App::new(Config::default().brand_list().unwrap()).unwrap()
    }

    fn engine(dir: &std::path::Path) -> BrandEngine {
        let mut config = Config::default();
        config.artifacts.dir = dir.to_path_buf();
        BrandEngine::new(config, Box::new(FixedForecaster), None)
    }

    #[test]
    fn test_initial_card_is_placeholder() {
        let app = app();
        assert_eq!(app.brand().as_str(), "Nike");
        assert_eq!(app.forecast_card(), ("--".to_string(), "Wait...".to_string()));
        assert!(app.competitor().is_none());
    }

    #[test]
    fn test_brand_selector_wraps() {
        let mut app = app();
        assert_eq!(app.shift_selection(-1), Some(Command::Reload));
        assert_eq!(app.brand().as_str(), "Adidas");
        app.shift_selection(1);
        app.shift_selection(1);
        assert_eq!(app.brand().as_str(), "Google");
    }

    #[test]
    fn test_competitor_selector_needs_compare_mode() {
        let mut app = app();
        app.toggle_focus();
        assert_eq!(app.focus(), Focus::Competitor);
        assert_eq!(app.shift_selection(1), None);
        assert_eq!(app.competitor_choice().as_str(), "Google");

        assert_eq!(app.toggle_compare(), Command::Redraw);
        assert_eq!(app.shift_selection(1), Some(Command::Redraw));
        assert_eq!(app.competitor().map(Brand::as_str), Some("Apple"));
    }

    #[test]
    fn test_competitor_defaults_to_second_brand() {
        let mut app = app();
        app.toggle_compare();
        assert_eq!(app.brand().as_str(), "Nike");
        assert_eq!(app.competitor().map(Brand::as_str), Some("Google"));

        let single = App::new(vec![Brand::new("Nike").unwrap()]).unwrap();
        assert_eq!(single.competitor_choice().as_str(), "Nike");
    }

    #[test]
    fn test_predict_then_brand_change_resets_card() {
        let dir = create_temp_dir();
        write_daily_csv(dir.path(), "Nike", &[1.0, 2.0]);
        write_daily_csv(dir.path(), "Google", &[1.0, 2.0]);
        let engine = engine(dir.path());
        let mut app = app();

        app.execute(Command::Predict, &engine);
        assert_eq!(app.forecast_card().0, "2.500");
        assert_eq!(app.forecast_card().1, "📈 TRENDING UP");
        let marker = app.report().and_then(|r| r.chart.as_ref()).and_then(|c| c.forecast.as_ref());
        assert_eq!(marker.map(|m| m.x), Some(2.0));

        let command = app.shift_selection(1).unwrap();
        app.execute(command, &engine);
        assert_eq!(app.forecast_card().0, "--");
        assert_eq!(app.report().map(|r| r.brand.as_str()), Some("Google"));
        assert!(app.error().is_none());
    }

    #[test]
    fn test_redraw_keeps_prediction_marker() {
        let dir = create_temp_dir();
        write_daily_csv(dir.path(), "Nike", &[1.0, 2.0, 3.0]);
        write_daily_csv(dir.path(), "Apple", &[4.0, 5.0]);
        let engine = engine(dir.path());
        let mut app = app();

        app.execute(Command::Predict, &engine);
        app.toggle_focus();
        let command = app.toggle_compare();
        app.shift_selection(1);
        app.execute(command, &engine);

        let chart = app.report().and_then(|r| r.chart.clone()).unwrap();
        assert_eq!(chart.forecast.map(|m| m.x), Some(3.0));
        assert_eq!(chart.competitor.map(|c| c.label), Some("Apple (Comp)".to_string()));
    }

    #[test]
    fn test_engine_failure_opens_dialog() {
        let dir = create_temp_dir();
        std::fs::write(dir.path().join("Nike_data.csv"), "likes\n1\n").unwrap();
        let engine = engine(dir.path());
        let mut app = app();

        app.execute(Command::Reload, &engine);
        assert!(app.error().is_some());
        app.dismiss_error();
        assert!(app.error().is_none());
    }
}
