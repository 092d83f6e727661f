use std::path::PathBuf;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::info;

use gymreport_core::model::report::{DocumentPage, DocumentRow, RenderedChart};
use gymreport_core::{ChartKind, Document, Renderer, Series};

const DPI: f64 = 96.0;
const TITLE_FONT: u32 = 28;
const CAPTION_FONT: u32 = 18;
const FOOTER_HEIGHT: u32 = 30;

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;

/// Draws the whole document into one SVG, pages stacked top to bottom.
pub struct SvgRenderer {
    path: PathBuf,
    page_inches: (f64, f64),
}

impl SvgRenderer {
    pub fn new(path: impl Into<PathBuf>, page_inches: (f64, f64)) -> Self {
        Self {
            path: path.into(),
            page_inches,
        }
    }

    pub fn page_pixels(&self) -> (u32, u32) {
        (
            (self.page_inches.0 * DPI).round() as u32,
            (self.page_inches.1 * DPI).round() as u32,
        )
    }
}

impl Renderer for SvgRenderer {
    fn render(&self, document: &Document) -> Result<()> {
        let (width, height) = self.page_pixels();
        let page_count = document.pages.len().max(1);

        let root = SVGBackend::new(&self.path, (width, height * page_count as u32)).into_drawing_area();
        root.fill(&WHITE)?;

        let pages = root.split_evenly((page_count, 1));
        for (page, area) in document.pages.iter().zip(pages.iter()) {
            draw_page(area, page, &document.generated_at)?;
        }
        root.present()?;

        info!(path = %self.path.display(), pages = document.pages.len(), "wrote svg report");
        Ok(())
    }
}

fn draw_page(area: &Area, page: &DocumentPage, generated_at: &str) -> Result<()> {
    let body = area.titled(
        &page.title,
        ("sans-serif", TITLE_FONT).into_font().style(FontStyle::Bold),
    )?;

    let (width, height) = body.dim_in_pixel();
    let (grid, footer) = body.split_vertically(height.saturating_sub(FOOTER_HEIGHT));
    footer.draw_text(
        generated_at,
        &TextStyle::from(("sans-serif", 14).into_font()).pos(Pos::new(HPos::Center, VPos::Center)),
        ((width / 2) as i32, (FOOTER_HEIGHT / 2) as i32),
    )?;

    if page.rows.is_empty() {
        return Ok(());
    }
    let rows = grid.split_evenly((page.rows.len(), 1));
    for (row, row_area) in page.rows.iter().zip(rows.iter()) {
        draw_row(row_area, row)?;
    }
    Ok(())
}

fn draw_row(area: &Area, row: &DocumentRow) -> Result<()> {
    if row.charts.is_empty() {
        return Ok(());
    }
    // Pad the shared ceiling so the top point is not glued to the frame.
    let y_top = if row.y_max > 0.0 { row.y_max * 1.1 } else { 1.0 };

    let cells = area.split_evenly((1, row.charts.len()));
    for (idx, (chart, cell)) in row.charts.iter().zip(cells.iter()).enumerate() {
        match chart.spec.kind {
            ChartKind::Line => draw_line_chart(cell, chart, y_top, idx == 0)?,
            ChartKind::Bar => draw_bar_chart(cell, chart, y_top, idx == 0)?,
        }
    }
    Ok(())
}

fn day_number(date: NaiveDate) -> i32 {
    date.num_days_from_ce()
}

fn day_label(day: i32) -> String {
    NaiveDate::from_num_days_from_ce_opt(day)
        .map(|d| d.format("%b %d").to_string())
        .unwrap_or_default()
}

fn x_bounds(series: &Series) -> (i32, i32) {
    match (series.first_label(), series.last_label()) {
        (Some(first), Some(last)) if first < last => (day_number(first), day_number(last)),
        (Some(only), _) => (day_number(only) - 7, day_number(only) + 7),
        _ => (0, 1),
    }
}

/// First day of every month inside [from, to].
fn month_ticks(from: i32, to: i32) -> Vec<i32> {
    let (Some(start), Some(end)) = (
        NaiveDate::from_num_days_from_ce_opt(from),
        NaiveDate::from_num_days_from_ce_opt(to),
    ) else {
        return Vec::new();
    };

    let mut ticks = Vec::new();
    let mut month = start.with_day(1).unwrap_or(start);
    if month < start {
        month = next_month(month);
    }
    while month <= end {
        ticks.push(day_number(month));
        month = next_month(month);
    }
    ticks
}

fn next_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(chrono::Months::new(1)).unwrap_or(date)
}

fn draw_line_chart(area: &Area, chart: &RenderedChart, y_top: f64, show_y_desc: bool) -> Result<()> {
    let (x0, x1) = x_bounds(&chart.series);

    let mut ctx = ChartBuilder::on(area)
        .caption(&chart.spec.title, ("sans-serif", CAPTION_FONT))
        .margin(8)
        .x_label_area_size(30)
        .y_label_area_size(55)
        .build_cartesian_2d(x0..x1, 0f64..y_top)?;

    let x_fmt = |x: &i32| day_label(*x);
    let mut mesh = ctx.configure_mesh();
    mesh.disable_x_mesh()
        .x_labels(4)
        .x_label_formatter(&x_fmt)
        .y_labels(6);
    if show_y_desc {
        mesh.y_desc(chart.metric.axis_label());
    }
    mesh.draw()?;

    // Month gridlines.
    ctx.draw_series(
        month_ticks(x0, x1)
            .into_iter()
            .map(|m| PathElement::new(vec![(m, 0.0), (m, y_top)], &BLACK.mix(0.15))),
    )?;

    let points: Vec<(i32, f64)> = chart
        .series
        .points()
        .iter()
        .map(|p| (day_number(p.label), p.value))
        .collect();
    ctx.draw_series(LineSeries::new(points.iter().copied(), &BLACK))?;
    ctx.draw_series(points.iter().map(|&(x, y)| Circle::new((x, y), 2, BLACK.filled())))?;
    Ok(())
}

fn draw_bar_chart(area: &Area, chart: &RenderedChart, y_top: f64, show_y_desc: bool) -> Result<()> {
    let labels: Vec<String> = chart
        .series
        .points()
        .iter()
        .map(|p| p.label.format("%b").to_string())
        .collect();
    let n = labels.len().max(1) as f64;

    let mut ctx = ChartBuilder::on(area)
        .caption(&chart.spec.title, ("sans-serif", CAPTION_FONT))
        .margin(8)
        .x_label_area_size(30)
        .y_label_area_size(55)
        .build_cartesian_2d(-0.5f64..(n - 0.5), 0f64..y_top)?;

    let label_at = |x: &f64| {
        let idx = x.round();
        if (x - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    };

    let mut mesh = ctx.configure_mesh();
    mesh.disable_x_mesh()
        .x_labels(labels.len().max(1))
        .x_label_formatter(&label_at)
        .y_labels(6);
    if show_y_desc {
        mesh.y_desc(chart.metric.axis_label());
    }
    mesh.draw()?;

    ctx.draw_series(chart.series.points().iter().enumerate().map(|(i, p)| {
        let x = i as f64;
        Rectangle::new([(x - 0.35, 0.0), (x + 0.35, p.value)], BLACK.mix(0.7).filled())
    }))?;
    Ok(())
}
