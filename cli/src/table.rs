use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

use gymreport_core::{Dimension, Metric, Period, RecordStore, Series};

#[derive(Tabled)]
struct SeriesRow {
    #[tabled(rename = "Bucket")]
    bucket: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct NameRow {
    #[tabled(rename = "Dimension")]
    dimension: String,
    #[tabled(rename = "Name")]
    name: String,
}

fn bucket_label(label: chrono::NaiveDate, period: Period) -> String {
    match period {
        Period::Week => label.format("%Y-%m-%d").to_string(),
        Period::Month => label.format("%Y-%m").to_string(),
    }
}

pub fn render_series(series: &Series, period: Period) -> String {
    let rows: Vec<SeriesRow> = series
        .points()
        .iter()
        .map(|p| SeriesRow {
            bucket: bucket_label(p.label, period),
            value: format!("{:.1}", p.value),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table.to_string()
}

pub fn show_series(series: &Series, dimension: Dimension, target: &str, period: Period, metric: Metric) {
    println!("\n{} '{}' per {} ({})", dimension, target, period, metric.axis_label());
    if series.is_empty() {
        println!("No entries found.");
        return;
    }
    println!("{}", render_series(series, period));
    match metric {
        Metric::Sum => println!("Total: {:.1}", series.total()),
        Metric::Max => {
            if let Some(max) = series.max_value() {
                println!("Best: {:.1}", max);
            }
        }
    }
}

pub fn show_names(store: &RecordStore) {
    if store.is_empty() {
        println!("No entries found.");
        return;
    }
    if let Some((first, last)) = store.date_range() {
        println!("{} entries from {} to {}", store.len(), first, last);
    }

    let categories = store.categories().into_iter().map(|name| NameRow {
        dimension: Dimension::Category.to_string(),
        name,
    });
    let exercises = store.exercises().into_iter().map(|name| NameRow {
        dimension: Dimension::Exercise.to_string(),
        name,
    });
    let rows: Vec<NameRow> = categories.chain(exercises).collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);
}
