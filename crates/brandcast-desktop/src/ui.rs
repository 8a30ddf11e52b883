//! Dashboard layout and widgets.

use crate::app::{App, Focus};
use brandcast_common::TrendDirection;
use brandcast_engine::InsightsStatus;
use brandcast_graphs::{parse_hex_color, ChartSeries, LineStyle, TrendChart};
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, Gauge, GraphType, Paragraph, Wrap},
};

const CARD_BG: Color = Color::Rgb(72, 84, 96);
const UP_COLOR: Color = Color::Rgb(11, 232, 129);
const DOWN_COLOR: Color = Color::Rgb(255, 94, 87);
const ACCENT: Color = Color::Rgb(255, 211, 42);

fn hex(color: &str) -> Color {
    let (r, g, b) = parse_hex_color(color);
    Color::Rgb(r, g, b)
}

/// Draw the whole dashboard.
pub fn draw_ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Controls
            Constraint::Min(12),   // Cards and chart
            Constraint::Length(1), // Key help
        ])
        .split(frame.area());

    draw_header(frame, chunks[0]);
    draw_controls(frame, chunks[1], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(32), Constraint::Percentage(68)])
        .split(chunks[2]);
    draw_cards(frame, body[0], app);
    draw_chart(frame, body[1], app);
    draw_help(frame, chunks[3]);

    if let Some(message) = app.error() {
        draw_error(frame, message);
    }
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("📈 AI Brand Analytics & Forecasting Hub")
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, area);
}

fn selector<'a>(label: &'a str, value: &'a str, focused: bool, enabled: bool) -> Vec<Span<'a>> {
    let value_style = match (focused, enabled) {
        (_, false) => Style::default().fg(Color::DarkGray),
        (true, true) => Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD),
        (false, true) => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    };
    vec![
        Span::styled(label, Style::default().fg(Color::Gray)),
        Span::styled(format!(" ◀ {value} ▶ "), value_style),
        Span::raw("   "),
    ]
}

fn draw_controls(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = selector(
        "Target Brand:",
        app.brand().as_str(),
        app.focus() == Focus::Brand,
        true,
    );
    let checkbox = if app.compare() { "[x]" } else { "[ ]" };
    spans.push(Span::styled(
        format!("{checkbox} Compare Mode   "),
        Style::default().fg(Color::White),
    ));
    spans.extend(selector(
        "vs:",
        app.competitor_choice().as_str(),
        app.focus() == Focus::Competitor,
        app.compare(),
    ));
    spans.push(Span::styled(
        "🔮 ANALYZE & PREDICT (Enter)",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));

    let controls = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(controls, area);
}

fn card(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .style(Style::default().bg(CARD_BG))
}

fn draw_cards(frame: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Min(6),
        ])
        .split(area);

    let (value, trend) = app.forecast_card();
    let trend_color = match app.forecast().map(|f| f.trend) {
        Some(TrendDirection::Up) => UP_COLOR,
        Some(TrendDirection::Down) => DOWN_COLOR,
        None => Color::White,
    };
    let mut lines = vec![
        Line::from(Span::styled(
            value,
            Style::default().fg(UP_COLOR).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(trend, Style::default().fg(trend_color))),
    ];
    if let Some(notice) = app.notice() {
        lines.push(Line::from(Span::styled(notice, Style::default().fg(Color::Gray))));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(card("AI Forecast (Next Day)")),
        cards[0],
    );

    let insights = app.report().map(|r| &r.insights);
    let best_day = insights
        .and_then(InsightsStatus::insights)
        .and_then(|i| i.best_day.clone())
        .unwrap_or_else(|| "--".to_string());
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                best_day,
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Based on historical avg",
                Style::default().fg(Color::Gray),
            )),
        ])
        .alignment(Alignment::Center)
        .block(card("⏰ Best Day to Post")),
        cards[1],
    );

    draw_sentiment(frame, cards[2], insights);
}

fn draw_sentiment(frame: &mut Frame, area: Rect, insights: Option<&InsightsStatus>) {
    let block = card("🧠 Sentiment Analysis");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let (text, positive) = match insights {
        Some(InsightsStatus::Ready(i)) => (
            format!("Pos: {}%  |  Neg: {}%", i.sentiment.positive, i.sentiment.negative),
            i.sentiment.positive,
        ),
        Some(InsightsStatus::Unavailable { reason }) => (reason.clone(), 0),
        None => ("Pos: 0% | Neg: 0%".to_string(), 0),
    };
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), rows[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(UP_COLOR).bg(Color::DarkGray))
        .percent(positive.min(100) as u16)
        .label(format!("{positive}% positive"));
    frame.render_widget(gauge, rows[1]);
}

fn dataset<'a>(series: &'a ChartSeries) -> Dataset<'a> {
    let (marker, graph_type) = match series.style {
        LineStyle::Solid => (Marker::Braille, GraphType::Line),
        LineStyle::Dashed => (Marker::Dot, GraphType::Scatter),
    };
    Dataset::default()
        .name(series.label.as_str())
        .marker(marker)
        .graph_type(graph_type)
        .style(Style::default().fg(hex(&series.color)))
        .data(&series.points)
}

fn axis_labels(min: f64, max: f64, decimals: usize) -> Vec<String> {
    vec![
        format!("{min:.decimals$}"),
        format!("{:.decimals$}", (min + max) / 2.0),
        format!("{max:.decimals$}"),
    ]
}

fn draw_chart(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Engagement Trend Analysis ");
    let Some(chart) = app.report().and_then(|r| r.chart.as_ref()) else {
        let empty = Paragraph::new(format!("No daily data for {}", app.brand()))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    };
    render_trend(frame, area, chart, block);
}

fn render_trend(frame: &mut Frame, area: Rect, chart: &TrendChart, block: Block<'_>) {
    let marker_point = chart.forecast.as_ref().map(|m| [(m.x, m.y)]);
    let mut datasets: Vec<Dataset> = chart.series().map(dataset).collect();
    if let (Some(marker), Some(point)) = (&chart.forecast, &marker_point) {
        datasets.push(
            Dataset::default()
                .name(marker.label.as_str())
                .marker(Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(hex(&marker.color)).add_modifier(Modifier::BOLD))
                .data(point),
        );
    }

    let (x_min, x_max) = chart.x_bounds();
    let (y_min, y_max) = chart.y_bounds();
    let widget = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Day")
                .style(Style::default().fg(Color::Gray))
                .bounds([x_min, x_max + 1.0])
                .labels(axis_labels(x_min, x_max + 1.0, 0)),
        )
        .y_axis(
            Axis::default()
                .title("Engagement")
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels(axis_labels(y_min, y_max, 3)),
        );
    frame.render_widget(widget, area);
}

fn draw_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(
        "←/→ change selection  Tab switch selector  c compare  Enter/p predict  q quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(help, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_error(frame: &mut Frame, message: &str) {
    let area = centered(frame.area(), 60, 8);
    frame.render_widget(Clear, area);
    let dialog = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled("Esc / Enter to close", Style::default().fg(Color::Gray))),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Error ")
            .style(Style::default().fg(DOWN_COLOR)),
    );
    frame.render_widget(dialog, area);
}
