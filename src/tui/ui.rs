//! Layout and rendering for the replay dashboard.
//!
//! The screen is a vertical stack: one title row, one line chart per
//! product band (first band at the bottom, per the stack order in
//! [`ChartSpec`]), and a status bar. Only the bottom band carries the
//! shared time axis labels; the bands above inherit its bounds silently.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::replay::chart::{AxisBand, ChartSpec, AXIS_STACK_MARGIN};
use crate::types::time_range::TimeRange;

use super::chart::{BandState, ChartState};

/// Colors for the dashboard, dark-theme friendly.
pub(crate) mod theme {
    use ratatui::style::Color;

    /// One line color per stacked band, cycling the Tableau 10 palette.
    pub const SERIES: [Color; 6] = [
        Color::Rgb(31, 119, 180),
        Color::Rgb(255, 127, 14),
        Color::Rgb(44, 160, 44),
        Color::Rgb(214, 39, 40),
        Color::Rgb(148, 103, 189),
        Color::Rgb(140, 86, 75),
    ];

    pub const AXIS: Color = Color::DarkGray;
    pub const TEXT: Color = Color::Gray;

    pub fn series_color(index: usize) -> Color {
        SERIES[index % SERIES.len()]
    }
}

/// Top-level rendering function: title row, the band stack, status bar.
pub fn draw(f: &mut Frame, state: &ChartState) {
    let spec = state.spec();

    // Bands are stacked bottom-up, terminal rows run top-down, so the
    // stack renders in reverse band order.
    let stack: Vec<(usize, &AxisBand)> = spec.bands.iter().enumerate().rev().collect();

    let mut constraints = Vec::with_capacity(stack.len() * 2 + 2);
    constraints.push(Constraint::Length(1));
    for (position, (_, band)) in stack.iter().copied().enumerate() {
        if position > 0 {
            let above = stack[position - 1].1;
            constraints.push(Constraint::Length(gap_rows(above, band)));
        }
        constraints.push(Constraint::Fill(1));
    }
    constraints.push(Constraint::Length(1));

    let areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    draw_title(f, spec, areas[0]);

    let mut cursor = 1;
    for (position, (index, band)) in stack.iter().copied().enumerate() {
        if position > 0 {
            cursor += 1;
        }
        let bottom = position == stack.len() - 1;
        draw_band(f, state, index, band, areas[cursor], bottom);
        cursor += 1;
    }

    draw_status_bar(f, state, areas[cursor]);
}

fn draw_title(f: &mut Frame, spec: &ChartSpec, area: Rect) {
    let title = Paragraph::new(Span::styled(
        spec.title.clone(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(title, area);
}

fn draw_band(
    f: &mut Frame,
    state: &ChartState,
    index: usize,
    band: &AxisBand,
    area: Rect,
    bottom: bool,
) {
    let band_state = state.band(index);
    let color = theme::series_color(index);
    let y_bounds = band_state.y_bounds(band.initial_range);

    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(band_state.points());

    let y_axis = Axis::default()
        .title(Span::styled(
            band_title(band, band_state),
            Style::default().fg(color),
        ))
        .style(Style::default().fg(theme::AXIS))
        .bounds(y_bounds)
        .labels(
            y_bounds
                .iter()
                .map(|bound| Span::styled(value_label(*bound), Style::default().fg(theme::TEXT)))
                .collect::<Vec<_>>(),
        );

    let mut x_axis = Axis::default()
        .style(Style::default().fg(theme::AXIS))
        .bounds(state.x_bounds());
    if bottom {
        x_axis = x_axis
            .title(Span::styled("Time (GMT)", Style::default().fg(theme::TEXT)))
            .labels(
                x_axis_labels(&state.spec().window)
                    .into_iter()
                    .map(|label| Span::styled(label, Style::default().fg(theme::TEXT)))
                    .collect::<Vec<_>>(),
            );
    }

    let chart = Chart::new(vec![dataset]).x_axis(x_axis).y_axis(y_axis);
    f.render_widget(chart, area);
}

fn draw_status_bar(f: &mut Frame, state: &ChartState, area: Rect) {
    let phase = if state.finished() {
        Span::styled(
            " COMPLETE ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            " REPLAYING ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    };

    let status = Line::from(vec![
        phase,
        Span::raw(format!("  {} points", state.point_count())),
        Span::styled("  q:quit", Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(status), area);
}

/// Value-axis title: the product label, plus a gap counter once any
/// instant went by without a value.
fn band_title(band: &AxisBand, band_state: &BandState) -> String {
    if band_state.skipped() > 0 {
        format!("{} ({} missing)", band.label, band_state.skipped())
    } else {
        band.label.to_string()
    }
}

/// Blank rows between two adjacent bands, scaled down from the margins on
/// their facing edges to character-cell resolution.
fn gap_rows(upper: &AxisBand, lower: &AxisBand) -> u16 {
    (upper.margin_start + lower.margin_end) / (2 * AXIS_STACK_MARGIN)
}

/// Start, midpoint, and end of the window for the shared time axis.
fn x_axis_labels(window: &TimeRange) -> Vec<String> {
    let mid = window.start + (window.end - window.start) / 2;
    vec![
        time_label(window.start),
        time_label(mid),
        time_label(window.end),
    ]
}

fn time_label(instant: DateTime<Utc>) -> String {
    instant.format("%m-%d %H:%M").to_string()
}

fn value_label(value: f64) -> String {
    if value.abs() >= 100.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
