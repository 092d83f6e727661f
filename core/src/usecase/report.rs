use chrono::{Local, NaiveDate, NaiveDateTime};
use tracing::{info, warn};

use crate::error::ReportResult;
use crate::model::record_store::RecordStore;
use crate::model::report::{Document, DocumentPage, DocumentRow, RenderedChart, ReportPlan};
use crate::repository::{Renderer, WorkoutSource};
use crate::service::aggregator::aggregate;

pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Walks a plan and computes one series per chart, in plan order.
pub struct ReportBuilder<'a> {
    plan: &'a ReportPlan,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(plan: &'a ReportPlan) -> Self {
        Self { plan }
    }

    pub fn build(&self, store: &RecordStore) -> Document {
        self.build_at(store, Local::now().naive_local())
    }

    pub fn build_at(&self, store: &RecordStore, generated_at: NaiveDateTime) -> Document {
        let pages = self
            .plan
            .pages
            .iter()
            .map(|page| {
                let metric = page.kind.metric();
                let rows = page
                    .rows
                    .iter()
                    .map(|row| {
                        let charts: Vec<RenderedChart> = row
                            .charts
                            .iter()
                            .map(|spec| {
                                let series =
                                    aggregate(store, spec.dimension, &spec.target, spec.period, metric);
                                if series.is_empty() {
                                    warn!(
                                        page = %page.title,
                                        chart = %spec.title,
                                        "no data for chart"
                                    );
                                }
                                RenderedChart {
                                    spec: spec.clone(),
                                    metric,
                                    series,
                                }
                            })
                            .collect();
                        let y_max = charts
                            .iter()
                            .filter_map(|c| c.series.max_value())
                            .fold(0.0, f64::max);
                        DocumentRow { y_max, charts }
                    })
                    .collect();
                DocumentPage {
                    title: page.title.clone(),
                    kind: page.kind,
                    rows,
                }
            })
            .collect();

        Document {
            generated_at: generated_at.format(TIMESTAMP_FORMAT).to_string(),
            pages,
        }
    }
}

/// Full pipeline: load, filter, build, render.
pub struct ReportUseCase<'a, S: WorkoutSource, R: Renderer> {
    source: &'a S,
    renderer: &'a R,
}

impl<'a, S: WorkoutSource, R: Renderer> ReportUseCase<'a, S, R> {
    pub fn new(source: &'a S, renderer: &'a R) -> Self {
        Self { source, renderer }
    }

    pub fn load_store(&self, since: NaiveDate) -> ReportResult<RecordStore> {
        let store = RecordStore::load(self.source.rows()?)?;
        let filtered = store.filter_since(since);
        info!(
            loaded = store.len(),
            kept = filtered.len(),
            %since,
            "workout log ready"
        );
        Ok(filtered)
    }

    pub fn run(&self, plan: &ReportPlan, since: NaiveDate) -> anyhow::Result<Document> {
        let store = self.load_store(since)?;
        let document = ReportBuilder::new(plan).build(&store);
        info!(
            pages = document.pages.len(),
            charts = plan.chart_count(),
            "report built"
        );
        self.renderer.render(&document)?;
        Ok(document)
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod report_test;
