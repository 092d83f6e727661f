use std::cell::RefCell;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{ReportError, ReportResult};
use crate::model::period::{ChartKind, Dimension, Metric, Period};
use crate::model::record_store::RecordStore;
use crate::model::report::{ChartSpec, Document, PageKind, PlanPage, PlanRow, ReportPlan};
use crate::model::workout::{RawRow, WorkoutEntry};
use crate::repository::{Renderer, WorkoutSource};
use crate::usecase::report::{ReportBuilder, ReportUseCase};

struct MockSource {
    rows: Vec<RawRow>,
}

impl WorkoutSource for MockSource {
    fn rows(&self) -> ReportResult<Vec<RawRow>> {
        Ok(self.rows.clone())
    }
}

#[derive(Default)]
struct MockRenderer {
    rendered: RefCell<Vec<Document>>,
}

impl Renderer for MockRenderer {
    fn render(&self, document: &Document) -> Result<()> {
        self.rendered.borrow_mut().push(document.clone());
        Ok(())
    }
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn at() -> NaiveDateTime {
    d("2022-12-11").and_hms_opt(14, 34, 0).unwrap()
}

fn store() -> RecordStore {
    RecordStore::new(vec![
        WorkoutEntry::new(d("2022-10-03"), "Barbell Squat", "Legs", Some(100.0), Some(5)),
        WorkoutEntry::new(d("2022-10-10"), "Barbell Squat", "Legs", Some(120.0), Some(5)),
        WorkoutEntry::new(d("2022-10-04"), "Deadlift", "Back", Some(150.0), Some(3)),
        WorkoutEntry::new(d("2022-10-04"), "Flat Barbell Bench Press", "Chest", Some(80.0), Some(10)),
    ])
}

fn line(dimension: Dimension, target: &str) -> ChartSpec {
    ChartSpec::new(dimension, target, Period::Week, ChartKind::Line)
}

fn two_page_plan() -> ReportPlan {
    ReportPlan {
        pages: vec![
            PlanPage {
                title: "Volume".to_string(),
                kind: PageKind::Volume,
                rows: vec![
                    PlanRow {
                        charts: vec![line(Dimension::Category, "Back"), line(Dimension::Category, "Chest")],
                    },
                    PlanRow {
                        charts: vec![line(Dimension::Category, "Legs")],
                    },
                ],
            },
            PlanPage {
                title: "Max".to_string(),
                kind: PageKind::MaxWeight,
                rows: vec![PlanRow {
                    charts: vec![
                        ChartSpec::new(Dimension::Exercise, "Barbell Squat", Period::Week, ChartKind::Bar),
                        line(Dimension::Exercise, "Overhead Press"),
                    ],
                }],
            },
        ],
    }
}

#[test]
fn test_build_follows_plan_order() {
    let plan = two_page_plan();
    let doc = ReportBuilder::new(&plan).build_at(&store(), at());

    assert_eq!(doc.generated_at, "11/12/2022 14:34");
    let titles: Vec<&str> = doc.pages.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Volume", "Max"]);

    let targets: Vec<&str> = doc
        .pages
        .iter()
        .flat_map(|p| &p.rows)
        .flat_map(|r| &r.charts)
        .map(|c| c.spec.target.as_str())
        .collect();
    assert_eq!(targets, vec!["Back", "Chest", "Legs", "Barbell Squat", "Overhead Press"]);
}

#[test]
fn test_row_shares_value_scale() {
    let plan = two_page_plan();
    let doc = ReportBuilder::new(&plan).build_at(&store(), at());

    // Back = 450, Chest = 800 in the same row.
    assert_eq!(doc.pages[0].rows[0].y_max, 800.0);
    // Legs alone: weeks of 500 and 600.
    assert_eq!(doc.pages[0].rows[1].y_max, 600.0);
}

#[test]
fn test_max_weight_page_uses_max_regardless_of_kind() {
    let plan = two_page_plan();
    let doc = ReportBuilder::new(&plan).build_at(&store(), at());

    let squat = &doc.pages[1].rows[0].charts[0];
    assert_eq!(squat.spec.kind, ChartKind::Bar);
    assert_eq!(squat.metric, Metric::Max);
    let values: Vec<f64> = squat.series.points().iter().map(|p| p.value).collect();
    assert_eq!(values, vec![100.0, 120.0]);

    assert!(doc.pages[0].rows.iter().flat_map(|r| &r.charts).all(|c| c.metric == Metric::Sum));
}

#[test]
fn test_empty_chart_passes_through() {
    let plan = two_page_plan();
    let doc = ReportBuilder::new(&plan).build_at(&store(), at());

    let press = &doc.pages[1].rows[0].charts[1];
    assert_eq!(press.spec.target, "Overhead Press");
    assert!(press.series.is_empty());
}

#[test]
fn test_empty_store_builds_empty_charts() {
    let plan = ReportPlan::standard();
    let doc = ReportBuilder::new(&plan).build_at(&RecordStore::default(), at());
    assert_eq!(doc.pages.len(), 4);
    assert!(doc
        .pages
        .iter()
        .flat_map(|p| &p.rows)
        .all(|r| r.y_max == 0.0 && r.charts.iter().all(|c| c.series.is_empty())));
}

#[test]
fn test_use_case_filters_and_renders() {
    let source = MockSource {
        rows: vec![
            RawRow::new("2022-08-29", "Barbell Squat", "Legs", "300", "5"),
            RawRow::new("2022-09-01", "Barbell Squat", "Legs", "300", "5"),
            RawRow::new("2022-10-03", "Barbell Squat", "Legs", "100", "5"),
        ],
    };
    let renderer = MockRenderer::default();
    let usecase = ReportUseCase::new(&source, &renderer);

    let plan = two_page_plan();
    let doc = usecase.run(&plan, d("2022-09-01")).unwrap();

    let rendered = renderer.rendered.borrow();
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered[0], doc);

    let legs = &doc.pages[0].rows[1].charts[0];
    assert_eq!(legs.series.len(), 1);
    assert_eq!(legs.series.points()[0].value, 500.0);
}

#[test]
fn test_use_case_aborts_on_bad_data() {
    let source = MockSource {
        rows: vec![RawRow::new("not a date", "Barbell Squat", "Legs", "100", "5")],
    };
    let renderer = MockRenderer::default();
    let usecase = ReportUseCase::new(&source, &renderer);

    let err = usecase.run(&two_page_plan(), d("2022-09-01")).unwrap_err();
    let report_err = err.downcast_ref::<ReportError>().unwrap();
    assert!(report_err.is_data_format());
    assert!(renderer.rendered.borrow().is_empty());
}
