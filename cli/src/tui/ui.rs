use chrono::Datelike;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use gymreport_core::model::report::{DocumentRow, RenderedChart};
use gymreport_core::ChartKind;

use crate::tui::app::App;

// --- THEME ---
const PRIMARY: Color = Color::Cyan;
const MUTED: Color = Color::DarkGray;
const TEXT: Color = Color::White;
const SERIES: Color = Color::Green;

pub fn draw(f: &mut Frame, app: &App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Rows of charts
            Constraint::Length(1), // Footer
        ])
        .split(size);

    let Some(page) = app.page() else {
        f.render_widget(
            Paragraph::new("No pages in report").alignment(Alignment::Center),
            main_chunks[1],
        );
        return;
    };

    // --- Header ---
    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(24)])
        .split(main_chunks[0]);

    let title = Paragraph::new(Span::styled(
        page.title.to_uppercase(),
        Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(MUTED)));
    f.render_widget(title, header_layout[0]);

    let nav_text = Line::from(vec![
        Span::styled(" < ", Style::default().fg(if app.has_previous() { TEXT } else { MUTED })),
        Span::styled(
            format!("Page {}/{}", app.current_page + 1, app.document.pages.len()),
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" > ", Style::default().fg(if app.has_next() { TEXT } else { MUTED })),
    ]);
    let nav = Paragraph::new(nav_text)
        .alignment(Alignment::Right)
        .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(MUTED)));
    f.render_widget(nav, header_layout[1]);

    // --- Rows ---
    if !page.rows.is_empty() {
        let row_constraints: Vec<Constraint> = page
            .rows
            .iter()
            .map(|_| Constraint::Ratio(1, page.rows.len() as u32))
            .collect();
        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(row_constraints)
            .split(main_chunks[1]);

        for (row, area) in page.rows.iter().zip(row_areas.iter()) {
            draw_row(f, row, *area);
        }
    }

    // --- Footer ---
    let help = Line::from(vec![
        Span::styled(format!("{}  ", app.document.generated_at), Style::default().fg(MUTED)),
        Span::styled("NAV: ", Style::default().fg(MUTED)),
        Span::styled("←/→ ", Style::default().fg(TEXT)),
        Span::raw("  "),
        Span::styled("QUIT: ", Style::default().fg(MUTED)),
        Span::styled("q", Style::default().fg(TEXT)),
    ]);
    let footer = Paragraph::new(help).alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[2]);
}

fn draw_row(f: &mut Frame, row: &DocumentRow, area: Rect) {
    if row.charts.is_empty() {
        return;
    }
    let y_top = if row.y_max > 0.0 { row.y_max * 1.1 } else { 1.0 };

    let constraints: Vec<Constraint> = row
        .charts
        .iter()
        .map(|_| Constraint::Ratio(1, row.charts.len() as u32))
        .collect();
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (chart, cell) in row.charts.iter().zip(cells.iter()) {
        match chart.spec.kind {
            ChartKind::Line => draw_line(f, chart, y_top, *cell),
            ChartKind::Bar => draw_bars(f, chart, y_top, *cell),
        }
    }
}

fn chart_block(chart: &RenderedChart, area: Rect) -> Block<'static> {
    let title = fit(&chart.spec.title, area.width.saturating_sub(4) as usize);
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(MUTED))
        .title(format!(" {} ", title))
}

fn draw_line(f: &mut Frame, chart: &RenderedChart, y_top: f64, area: Rect) {
    let points: Vec<(f64, f64)> = chart
        .series
        .points()
        .iter()
        .map(|p| (p.label.num_days_from_ce() as f64, p.value))
        .collect();

    let (x0, x1) = match (chart.series.first_label(), chart.series.last_label()) {
        (Some(first), Some(last)) if first < last => (first, last),
        (Some(only), _) => (only, only),
        _ => {
            let empty = Paragraph::new("no data")
                .alignment(Alignment::Center)
                .style(Style::default().fg(MUTED))
                .block(chart_block(chart, area));
            f.render_widget(empty, area);
            return;
        }
    };
    let x_bounds = if x0 == x1 {
        [x0.num_days_from_ce() as f64 - 7.0, x1.num_days_from_ce() as f64 + 7.0]
    } else {
        [x0.num_days_from_ce() as f64, x1.num_days_from_ce() as f64]
    };

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(SERIES))
        .data(&points);

    let widget = Chart::new(vec![dataset])
        .block(chart_block(chart, area))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(MUTED))
                .bounds(x_bounds)
                .labels(vec![
                    Span::raw(x0.format("%b %d").to_string()),
                    Span::raw(x1.format("%b %d").to_string()),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(MUTED))
                .bounds([0.0, y_top])
                .labels(vec![Span::raw("0"), Span::raw(format!("{:.0}", y_top))]),
        );
    f.render_widget(widget, area);
}

fn draw_bars(f: &mut Frame, chart: &RenderedChart, y_top: f64, area: Rect) {
    let labels: Vec<String> = chart
        .series
        .points()
        .iter()
        .map(|p| p.label.format("%b").to_string())
        .collect();

    let bar_items: Vec<Bar> = chart
        .series
        .points()
        .iter()
        .zip(labels.iter())
        .map(|(p, label)| {
            Bar::default()
                .label(label.as_str())
                .value(p.value.round() as u64)
                .style(Style::default().fg(SERIES))
                .text_value(format!("{:.0}", p.value))
        })
        .collect();

    let widget = BarChart::default()
        .block(chart_block(chart, area))
        .bar_width(5)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bar_items))
        .max(y_top.round() as u64);
    f.render_widget(widget, area);
}

/// Truncates to `width` display columns, marking the cut with an ellipsis.
fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit() {
        assert_eq!(fit("Legs", 10), "Legs");
        assert_eq!(fit("Flat Barbell Bench Press", 8), "Flat Ba…");
        assert_eq!(fit("Squat", 0), "…");
    }
}
