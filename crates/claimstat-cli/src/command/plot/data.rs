//! Plot data computed once before the TUI starts.

use std::collections::BTreeMap;

use claimstat_frame::{
    FrameError,
    correlation::{self, CorrelationMatrix},
    table::{Column, DataTable},
};
use claimstat_stats::{
    boxplot::BoxSummary,
    comprehensive::{ComprehensiveStats, DEFAULT_PERCENTILES},
    correlation::LinearFit,
    histogram::DEFAULT_NUM_BINS,
    kde::GaussianKde,
};

/// Number of points sampled along a density curve.
const KDE_POINTS: usize = 100;
/// Categories shown in a count chart, most frequent first.
const MAX_CATEGORIES: usize = 30;

#[derive(Debug)]
pub struct PlotData {
    pub univariate: Vec<UnivariatePlot>,
    pub scatter: ScatterPlot,
    pub boxplot: BoxPlot,
    pub heatmap: CorrelationMatrix,
}

#[derive(Debug)]
pub struct UnivariatePlot {
    pub column: String,
    pub kind: UnivariateKind,
}

#[derive(Debug)]
pub enum UnivariateKind {
    Numeric {
        stats: Box<ComprehensiveStats>,
        /// Density scaled to histogram counts, empty for constant data.
        density: Vec<(f64, f64)>,
    },
    Categorical {
        counts: Vec<(String, u64)>,
        /// Distinct values not shown.
        hidden: usize,
    },
    Empty,
}

#[derive(Debug)]
pub struct ScatterPlot {
    pub x_column: String,
    pub y_column: String,
    pub hue_column: String,
    pub groups: Vec<ScatterGroup>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

#[derive(Debug)]
pub struct ScatterGroup {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub fit: Option<LinearFit>,
}

#[derive(Debug)]
pub struct BoxPlot {
    pub category_column: String,
    pub value_column: String,
    pub groups: Vec<(String, BoxSummary)>,
}

impl PlotData {
    pub fn new(
        data: &DataTable,
        x_column: &str,
        y_column: &str,
        hue_column: &str,
        box_category: &str,
        box_value: &str,
        heatmap_columns: &[String],
    ) -> Result<Self, FrameError> {
        let univariate = data.columns().iter().map(UnivariatePlot::new).collect();
        let scatter = ScatterPlot::new(data, x_column, y_column, hue_column)?;
        let boxplot = BoxPlot::new(data, box_category, box_value)?;
        let heatmap = if heatmap_columns.is_empty() {
            correlation::correlation_matrix(data, &data.numeric_column_names())?
        } else {
            correlation::correlation_matrix(data, heatmap_columns)?
        };
        Ok(Self {
            univariate,
            scatter,
            boxplot,
            heatmap,
        })
    }
}

impl UnivariatePlot {
    #[expect(clippy::cast_precision_loss)]
    fn new(column: &Column) -> Self {
        let kind = if let Some(values) = column.present_values() {
            let stats = ComprehensiveStats::new(
                values.iter().copied(),
                &DEFAULT_PERCENTILES,
                DEFAULT_NUM_BINS,
            );
            match stats {
                Some(stats) => {
                    let density = match (GaussianKde::new(&values), stats.histogram.bin_width()) {
                        (Some(kde), Some(bin_width)) => kde.sample_grid(
                            stats.stats.min,
                            stats.stats.max,
                            KDE_POINTS,
                            values.len() as f64 * bin_width,
                        ),
                        _ => vec![],
                    };
                    UnivariateKind::Numeric {
                        stats: Box::new(stats),
                        density,
                    }
                }
                None => UnivariateKind::Empty,
            }
        } else {
            let mut counts = BTreeMap::<String, u64>::new();
            for row in 0..column.len() {
                if let Some(value) = column.display_value(row) {
                    *counts.entry(value.into_owned()).or_default() += 1;
                }
            }
            if counts.is_empty() {
                UnivariateKind::Empty
            } else {
                let mut counts = counts.into_iter().collect::<Vec<_>>();
                counts.sort_by(|a, b| b.1.cmp(&a.1));
                let hidden = counts.len().saturating_sub(MAX_CATEGORIES);
                counts.truncate(MAX_CATEGORIES);
                UnivariateKind::Categorical { counts, hidden }
            }
        };
        Self {
            column: column.name().to_owned(),
            kind,
        }
    }
}

impl ScatterPlot {
    fn new(
        data: &DataTable,
        x_column: &str,
        y_column: &str,
        hue_column: &str,
    ) -> Result<Self, FrameError> {
        let xs = data.numeric(x_column)?;
        let ys = data.numeric(y_column)?;
        let hue = data.column(hue_column)?;

        let mut grouped = BTreeMap::<String, Vec<(f64, f64)>>::new();
        for (row, (&x, &y)) in xs.iter().zip(ys).enumerate() {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            let Some(label) = hue.display_value(row) else {
                continue;
            };
            grouped.entry(label.into_owned()).or_default().push((x, y));
        }

        let groups = grouped
            .into_iter()
            .map(|(label, points)| {
                let (px, py): (Vec<f64>, Vec<f64>) = points.iter().copied().unzip();
                ScatterGroup {
                    label,
                    fit: LinearFit::new(&px, &py),
                    points,
                }
            })
            .collect::<Vec<_>>();

        let all_points = groups.iter().flat_map(|g| g.points.iter().copied());
        let x_bounds = bounds(all_points.clone().map(|(x, _)| x));
        let y_bounds = bounds(all_points.map(|(_, y)| y));

        Ok(Self {
            x_column: x_column.to_owned(),
            y_column: y_column.to_owned(),
            hue_column: hue_column.to_owned(),
            groups,
            x_bounds,
            y_bounds,
        })
    }
}

impl BoxPlot {
    fn new(
        data: &DataTable,
        category_column: &str,
        value_column: &str,
    ) -> Result<Self, FrameError> {
        let categories = data.column(category_column)?;
        let values = data.numeric(value_column)?;

        let mut grouped = BTreeMap::<String, Vec<f64>>::new();
        for (row, &value) in values.iter().enumerate() {
            if !value.is_finite() {
                continue;
            }
            if let Some(label) = categories.display_value(row) {
                grouped.entry(label.into_owned()).or_default().push(value);
            }
        }
        let groups = grouped
            .into_iter()
            .filter_map(|(label, values)| BoxSummary::new(values).map(|summary| (label, summary)))
            .collect();

        Ok(Self {
            category_column: category_column.to_owned(),
            value_column: value_column.to_owned(),
            groups,
        })
    }

    /// Range covering every whisker and outlier.
    pub fn value_bounds(&self) -> [f64; 2] {
        bounds(self.groups.iter().flat_map(|(_, summary)| {
            [summary.lower_whisker, summary.upper_whisker]
                .into_iter()
                .chain(summary.outliers.iter().copied())
        }))
    }
}

/// Min and max of `values`, widened when degenerate.
#[expect(clippy::float_cmp)]
fn bounds<I>(values: I) -> [f64; 2]
where
    I: Iterator<Item = f64>,
{
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
        (min.min(v), max.max(v))
    });
    if min > max {
        [0.0, 1.0]
    } else if min == max {
        [min - 0.5, max + 0.5]
    } else {
        [min, max]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> DataTable {
        DataTable::new(vec![
            Column::categorical(
                "VehicleType",
                [
                    Some("Passenger Vehicle"),
                    Some("Passenger Vehicle"),
                    Some("Bus"),
                    Some("Bus"),
                    None,
                ],
            ),
            Column::numeric("TotalPremium", vec![1.0, 2.0, 3.0, 4.0, 5.0]),
            Column::numeric("TotalClaims", vec![2.0, 4.0, 3.0, f64::NAN, 1.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_univariate_kinds() {
        let data = PlotData::new(
            &sample_table(),
            "TotalPremium",
            "TotalClaims",
            "VehicleType",
            "VehicleType",
            "TotalPremium",
            &[],
        )
        .unwrap();
        assert_eq!(data.univariate.len(), 3);
        let UnivariateKind::Categorical { counts, hidden } = &data.univariate[0].kind else {
            panic!("expected categorical plot");
        };
        assert_eq!(counts.len(), 2);
        assert_eq!(*hidden, 0);
        assert_eq!(counts.iter().map(|(_, c)| c).sum::<u64>(), 4);

        let UnivariateKind::Numeric { stats, density } = &data.univariate[1].kind else {
            panic!("expected numeric plot");
        };
        assert_eq!(stats.histogram.total(), 5);
        assert_eq!(density.len(), KDE_POINTS);
        assert_eq!(
            data.heatmap.columns,
            vec!["TotalPremium".to_owned(), "TotalClaims".to_owned()]
        );
    }

    #[test]
    fn test_scatter_groups_by_hue() {
        let data = PlotData::new(
            &sample_table(),
            "TotalPremium",
            "TotalClaims",
            "VehicleType",
            "VehicleType",
            "TotalClaims",
            &["TotalPremium".to_owned()],
        )
        .unwrap();
        let scatter = &data.scatter;
        assert_eq!(scatter.groups.len(), 2);
        assert_eq!(scatter.groups[0].label, "Bus");
        // Missing claims and missing hue rows are dropped
        assert_eq!(scatter.groups[0].points, vec![(3.0, 3.0)]);
        assert!(scatter.groups[0].fit.is_none());
        let fit = scatter.groups[1].fit.unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert_eq!(scatter.x_bounds, [1.0, 3.0]);

        assert_eq!(data.boxplot.groups.len(), 2);
        assert_eq!(data.boxplot.value_bounds(), [2.0, 4.0]);
    }

    #[test]
    fn test_missing_columns_are_errors() {
        let result = PlotData::new(
            &sample_table(),
            "TotalPremium",
            "TotalClaims",
            "Province",
            "VehicleType",
            "TotalClaims",
            &[],
        );
        assert!(matches!(result, Err(FrameError::MissingColumn { .. })));
    }

    #[test]
    fn test_bounds() {
        assert_eq!(bounds([3.0, -1.0, 2.0].into_iter()), [-1.0, 3.0]);
        assert_eq!(bounds([2.0].into_iter()), [1.5, 2.5]);
        assert_eq!(bounds(std::iter::empty()), [0.0, 1.0]);
    }
}
