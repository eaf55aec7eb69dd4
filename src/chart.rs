use std::f64::consts::TAU;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Clear, Paragraph,
    },
    Frame,
};

use crate::fmt;
use crate::reports::CategorySummary;
use crate::tui::{centered_rect, FOOTER_STYLE, HEADER_STYLE};

const PALETTE: &[Color] = &[
    Color::Rgb(255, 179, 186),
    Color::Rgb(255, 200, 162),
    Color::Rgb(255, 224, 163),
    Color::Rgb(201, 255, 203),
    Color::Rgb(186, 225, 255),
    Color::Rgb(196, 183, 255),
    Color::Rgb(255, 179, 222),
    Color::Rgb(150, 150, 150),
];

pub fn slice_color(idx: usize) -> Color {
    PALETTE[idx % PALETTE.len()]
}

/// Cumulative end of each slice as a fraction of the full turn.
pub fn slice_ends(summary: &CategorySummary) -> Vec<f64> {
    let mut acc = 0.0;
    summary
        .categories
        .iter()
        .map(|c| {
            acc += if summary.total > 0.0 { c.total / summary.total } else { 0.0 };
            acc
        })
        .collect()
}

/// Which slice covers the point (x, y) of the unit disc. Angles start at
/// 3 o'clock and run counter-clockwise.
pub fn slice_at(ends: &[f64], x: f64, y: f64) -> Option<usize> {
    let turn = y.atan2(x).rem_euclid(TAU) / TAU;
    ends.iter()
        .position(|end| turn < *end)
        .or_else(|| ends.len().checked_sub(1))
}

/// Sample the unit disc on a `cols` x `rows` grid and bucket points by slice.
pub fn pie_points(
    ends: &[f64],
    x_extent: f64,
    cols: usize,
    rows: usize,
) -> Vec<Vec<(f64, f64)>> {
    let mut buckets = vec![Vec::new(); ends.len()];
    if cols == 0 || rows == 0 {
        return buckets;
    }
    for r in 0..rows {
        let y = 1.0 - 2.0 * (r as f64 + 0.5) / rows as f64;
        for c in 0..cols {
            let x = x_extent * (2.0 * (c as f64 + 0.5) / cols as f64 - 1.0);
            if x * x + y * y > 1.0 {
                continue;
            }
            if let Some(idx) = slice_at(ends, x, y) {
                buckets[idx].push((x, y));
            }
        }
    }
    buckets
}

/// Legend column width in chars, capped so long names get truncated.
pub fn legend_name_width(summary: &CategorySummary) -> usize {
    summary
        .categories
        .iter()
        .map(|c| c.category.chars().count())
        .max()
        .unwrap_or(10)
        .min(16)
}

/// Pie chart overlay for a non-empty category summary.
pub struct ChartView {
    summary: CategorySummary,
    ends: Vec<f64>,
}

impl ChartView {
    pub fn new(summary: CategorySummary) -> Self {
        let ends = slice_ends(&summary);
        Self { summary, ends }
    }

    pub fn summary(&self) -> &CategorySummary {
        &self.summary
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(
            area.width.saturating_sub(6).min(90),
            area.height.saturating_sub(2).min(30),
            area,
        );
        frame.render_widget(Clear, popup);
        let summary = self.summary();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Spending by Category ")
            .title_style(HEADER_STYLE);
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let [body, keys_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);
        let [pie_area, legend_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(38)]).areas(body);

        // Braille gives 2x4 dots per cell; widen x so the disc stays round.
        let dots_w = pie_area.width as f64 * 2.0;
        let dots_h = pie_area.height as f64 * 4.0;
        let x_extent = if dots_h > 0.0 { (dots_w / dots_h).max(1.0) } else { 1.0 };
        let y_extent = if dots_w > 0.0 { (dots_h / dots_w).max(1.0) } else { 1.0 };
        let buckets = pie_points(&self.ends, x_extent, dots_w as usize, dots_h as usize);
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-x_extent, x_extent])
            .y_bounds([-y_extent, y_extent])
            .paint(|ctx| {
                for (idx, coords) in buckets.iter().enumerate() {
                    ctx.draw(&Points {
                        coords: coords.as_slice(),
                        color: slice_color(idx),
                    });
                }
            });
        frame.render_widget(canvas, pie_area);

        let name_width = legend_name_width(summary);
        let mut lines = vec![Line::from("")];
        for (idx, item) in summary.categories.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(" \u{25a0} ", Style::new().fg(slice_color(idx))),
                Span::raw(format!(
                    "{:<width$.width$} {:>10} {:>6}",
                    item.category,
                    fmt::amount(item.total),
                    fmt::percent(item.pct),
                    width = name_width
                )),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "   {:<width$.width$} {:>10}",
                "Total",
                fmt::amount(summary.total),
                width = name_width
            ),
            HEADER_STYLE,
        )));
        frame.render_widget(Paragraph::new(lines), legend_area);

        frame.render_widget(
            Paragraph::new("Esc/q/c:close").style(FOOTER_STYLE),
            keys_area,
        );
    }
}
