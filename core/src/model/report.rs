use serde::{Deserialize, Serialize};

use crate::error::ReportResult;
use crate::model::period::{ChartKind, Dimension, Metric, Period};
use crate::model::series::Series;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub dimension: Dimension,
    pub target: String,
    pub period: Period,
    pub kind: ChartKind,
}

impl ChartSpec {
    pub fn new(dimension: Dimension, target: &str, period: Period, kind: ChartKind) -> Self {
        Self {
            title: target.to_string(),
            dimension,
            target: target.to_string(),
            period,
            kind,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Volume,
    MaxWeight,
}

impl Default for PageKind {
    fn default() -> Self {
        PageKind::Volume
    }
}

impl PageKind {
    pub fn metric(&self) -> Metric {
        match self {
            PageKind::Volume => Metric::Sum,
            PageKind::MaxWeight => Metric::Max,
        }
    }
}

/// Charts in one row share a value axis.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlanRow {
    pub charts: Vec<ChartSpec>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlanPage {
    pub title: String,
    pub kind: PageKind,
    pub rows: Vec<PlanRow>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReportPlan {
    pub pages: Vec<PlanPage>,
}

const CATEGORY_ROWS: [&[&str]; 2] = [&["Back", "Chest", "Shoulders"], &["Legs", "Biceps", "Triceps"]];
const CORE_LIFT_ROWS: [&[&str]; 2] = [
    &["Barbell Squat", "Flat Barbell Bench Press"],
    &["Deadlift", "Overhead Press"],
];

fn page(
    title: &str,
    kind: PageKind,
    rows: &[&[&str]],
    dimension: Dimension,
    period: Period,
    chart: ChartKind,
) -> PlanPage {
    PlanPage {
        title: title.to_string(),
        kind,
        rows: rows
            .iter()
            .map(|targets| PlanRow {
                charts: targets
                    .iter()
                    .map(|t| ChartSpec::new(dimension, t, period, chart))
                    .collect(),
            })
            .collect(),
    }
}

impl ReportPlan {
    /// The standard four-page gym report.
    pub fn standard() -> Self {
        Self {
            pages: vec![
                page(
                    "Gym volume per week",
                    PageKind::Volume,
                    &CATEGORY_ROWS,
                    Dimension::Category,
                    Period::Week,
                    ChartKind::Line,
                ),
                page(
                    "Gym volume per month",
                    PageKind::Volume,
                    &CATEGORY_ROWS,
                    Dimension::Category,
                    Period::Month,
                    ChartKind::Bar,
                ),
                page(
                    "Volume per exercise",
                    PageKind::Volume,
                    &CORE_LIFT_ROWS,
                    Dimension::Exercise,
                    Period::Week,
                    ChartKind::Line,
                ),
                page(
                    "Max weight lifted",
                    PageKind::MaxWeight,
                    &CORE_LIFT_ROWS,
                    Dimension::Exercise,
                    Period::Week,
                    ChartKind::Line,
                ),
            ],
        }
    }

    /// Reads a plan definition; fields are plain text so bad values surface as typed errors.
    pub fn from_json(json: &str) -> ReportResult<Self> {
        let def: PlanDef = serde_json::from_str(json)?;
        def.into_plan()
    }

    /// Inverse of `from_json`.
    pub fn to_json(&self) -> ReportResult<String> {
        Ok(serde_json::to_string_pretty(&PlanDef::from(self))?)
    }

    pub fn chart_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|p| &p.rows)
            .map(|r| r.charts.len())
            .sum()
    }
}

#[derive(Serialize, Deserialize)]
struct PlanDef {
    pages: Vec<PageDef>,
}

#[derive(Serialize, Deserialize)]
struct PageDef {
    title: String,
    #[serde(default)]
    max_weight: bool,
    rows: Vec<Vec<ChartDef>>,
}

#[derive(Serialize, Deserialize)]
struct ChartDef {
    title: Option<String>,
    dimension: String,
    target: String,
    period: String,
    #[serde(default)]
    kind: Option<String>,
}

impl From<&ReportPlan> for PlanDef {
    fn from(plan: &ReportPlan) -> Self {
        PlanDef {
            pages: plan
                .pages
                .iter()
                .map(|p| PageDef {
                    title: p.title.clone(),
                    max_weight: p.kind == PageKind::MaxWeight,
                    rows: p
                        .rows
                        .iter()
                        .map(|r| {
                            r.charts
                                .iter()
                                .map(|c| ChartDef {
                                    title: Some(c.title.clone()),
                                    dimension: c.dimension.to_string(),
                                    target: c.target.clone(),
                                    period: c.period.to_string(),
                                    kind: Some(c.kind.to_string()),
                                })
                                .collect()
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl PlanDef {
    fn into_plan(self) -> ReportResult<ReportPlan> {
        let mut pages = Vec::with_capacity(self.pages.len());
        for p in self.pages {
            let mut rows = Vec::with_capacity(p.rows.len());
            for row in p.rows {
                let mut charts = Vec::with_capacity(row.len());
                for c in row {
                    let kind = match c.kind {
                        Some(k) => k.parse()?,
                        None => ChartKind::default(),
                    };
                    charts.push(ChartSpec {
                        title: c.title.unwrap_or_else(|| c.target.clone()),
                        dimension: c.dimension.parse()?,
                        period: c.period.parse()?,
                        target: c.target,
                        kind,
                    });
                }
                rows.push(PlanRow { charts });
            }
            pages.push(PlanPage {
                title: p.title,
                kind: if p.max_weight {
                    PageKind::MaxWeight
                } else {
                    PageKind::Volume
                },
                rows,
            });
        }
        Ok(ReportPlan { pages })
    }
}

/// A chart with its computed data, ready for a renderer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub spec: ChartSpec,
    pub metric: Metric,
    pub series: Series,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DocumentRow {
    /// Shared value-axis ceiling for every chart in the row; 0.0 when the row is empty.
    pub y_max: f64,
    pub charts: Vec<RenderedChart>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DocumentPage {
    pub title: String,
    pub kind: PageKind,
    pub rows: Vec<DocumentRow>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Document {
    /// Formatted as `%d/%m/%Y %H:%M`.
    pub generated_at: String,
    pub pages: Vec<DocumentPage>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;

    #[test]
    fn test_standard_plan_layout() {
        let plan = ReportPlan::standard();
        assert_eq!(plan.pages.len(), 4);
        assert_eq!(plan.pages[0].rows[0].charts[0].target, "Back");
        assert_eq!(plan.pages[1].rows[0].charts[0].kind, ChartKind::Bar);
        assert_eq!(plan.pages[1].rows[0].charts[0].period, Period::Month);
        assert_eq!(plan.pages[3].kind, PageKind::MaxWeight);
        assert_eq!(plan.chart_count(), 6 + 6 + 4 + 4);
    }

    #[test]
    fn test_plan_from_json() {
        let json = r#"{
            "pages": [
                {
                    "title": "Lifts",
                    "max_weight": true,
                    "rows": [[
                        {"dimension": "exercise", "target": "Deadlift", "period": "week"},
                        {"title": "Bench", "dimension": "exercise", "target": "Flat Barbell Bench Press", "period": "month", "kind": "bar"}
                    ]]
                }
            ]
        }"#;
        let plan = ReportPlan::from_json(json).unwrap();
        let page = &plan.pages[0];
        assert_eq!(page.kind, PageKind::MaxWeight);
        assert_eq!(page.rows[0].charts[0].title, "Deadlift");
        assert_eq!(page.rows[0].charts[0].kind, ChartKind::Line);
        assert_eq!(page.rows[0].charts[1].title, "Bench");
        assert_eq!(page.rows[0].charts[1].period, Period::Month);
    }

    #[test]
    fn test_plan_with_unknown_period_fails_fast() {
        let json = r#"{"pages": [{"title": "x", "rows": [[
            {"dimension": "category", "target": "Legs", "period": "fortnight"}
        ]]}]}"#;
        let err = ReportPlan::from_json(json).unwrap_err();
        assert!(matches!(err, ReportError::UnknownPeriod(ref p) if p == "fortnight"));
    }

    #[test]
    fn test_standard_plan_survives_json() {
        let plan = ReportPlan::standard();
        let json = plan.to_json().unwrap();
        assert!(json.contains("\"period\": \"month\""));
        assert_eq!(ReportPlan::from_json(&json).unwrap(), plan);
    }

    #[test]
    fn test_page_kind_metric() {
        assert_eq!(PageKind::Volume.metric(), Metric::Sum);
        assert_eq!(PageKind::MaxWeight.metric(), Metric::Max);
    }
}
