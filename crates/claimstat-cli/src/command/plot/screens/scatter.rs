use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols::{Marker, merge::MergeStrategy},
    widgets::{Axis, Block, Chart, Dataset, GraphType, LegendPosition, Widget},
};

use crate::{
    command::plot::data::ScatterPlot,
    ui::{self, color},
};

#[derive(Debug)]
pub struct ScatterScreen {
    show_fit: bool,
}

impl Default for ScatterScreen {
    fn default() -> Self {
        Self { show_fit: true }
    }
}

impl ScatterScreen {
    pub const HELP: &str = "l: Toggle Regression Lines";

    pub fn draw(&self, frame: &mut Frame, area: Rect, plot: &ScatterPlot) {
        frame.render_widget(
            ScatterChart {
                plot,
                show_fit: self.show_fit,
            },
            area,
        );
    }

    pub fn handle_input(&mut self, key_event: KeyEvent, _plot: &ScatterPlot) {
        if key_event.code == KeyCode::Char('l') {
            self.show_fit = !self.show_fit;
        }
    }
}

struct ScatterChart<'a> {
    plot: &'a ScatterPlot,
    show_fit: bool,
}

impl ScatterChart<'_> {
    /// Endpoints of each group's regression line across the x range.
    fn fit_lines(&self) -> Vec<Vec<(f64, f64)>> {
        let [x0, x1] = self.plot.x_bounds;
        self.plot
            .groups
            .iter()
            .map(|group| {
                group
                    .fit
                    .map(|fit| vec![(x0, fit.predict(x0)), (x1, fit.predict(x1))])
                    .unwrap_or_default()
            })
            .collect()
    }
}

impl Widget for ScatterChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let plot = self.plot;
        let fit_lines = if self.show_fit {
            self.fit_lines()
        } else {
            vec![]
        };

        let mut datasets = plot
            .groups
            .iter()
            .enumerate()
            .map(|(i, group)| {
                Dataset::default()
                    .name(format!("{} (n={})", group.label, group.points.len()))
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(color::series(i)))
                    .data(&group.points)
            })
            .collect::<Vec<_>>();
        for (i, line) in fit_lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            // unnamed so the legend lists each group once
            datasets.push(
                Dataset::default()
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(color::series(i)))
                    .data(line),
            );
        }

        let chart = Chart::new(datasets)
            .block(
                Block::bordered()
                    .merge_borders(MergeStrategy::Exact)
                    .title(format!(
                        "{} vs {} by {}",
                        plot.y_column, plot.x_column, plot.hue_column
                    )),
            )
            .x_axis(
                Axis::default()
                    .title(plot.x_column.as_str())
                    .bounds(plot.x_bounds)
                    .labels(ui::axis_labels(plot.x_bounds)),
            )
            .y_axis(
                Axis::default()
                    .title(plot.y_column.as_str())
                    .bounds(plot.y_bounds)
                    .labels(ui::axis_labels(plot.y_bounds)),
            )
            .legend_position(Some(LegendPosition::TopLeft));
        Widget::render(chart, area, buf);
    }
}

#[cfg(test)]
mod tests {
    use claimstat_stats::correlation::LinearFit;

    use super::*;
    use crate::command::plot::data::ScatterGroup;

    #[test]
    fn test_fit_lines_span_x_bounds() {
        let plot = ScatterPlot {
            x_column: "TotalPremium".into(),
            y_column: "TotalClaims".into(),
            hue_column: "VehicleType".into(),
            groups: vec![
                ScatterGroup {
                    label: "Bus".into(),
                    points: vec![(0.0, 1.0), (2.0, 5.0)],
                    fit: LinearFit::new(&[0.0, 2.0], &[1.0, 5.0]),
                },
                ScatterGroup {
                    label: "Taxi".into(),
                    points: vec![(1.0, 1.0)],
                    fit: None,
                },
            ],
            x_bounds: [0.0, 4.0],
            y_bounds: [1.0, 5.0],
        };
        let chart = ScatterChart {
            plot: &plot,
            show_fit: true,
        };
        let lines = chart.fit_lines();
        assert_eq!(lines[0], vec![(0.0, 1.0), (4.0, 9.0)]);
        assert!(lines[1].is_empty());
    }

    #[test]
    fn test_toggle_fit() {
        let mut screen = ScatterScreen::default();
        let plot = ScatterPlot {
            x_column: String::new(),
            y_column: String::new(),
            hue_column: String::new(),
            groups: vec![],
            x_bounds: [0.0, 1.0],
            y_bounds: [0.0, 1.0],
        };
        screen.handle_input(KeyEvent::from(KeyCode::Char('l')), &plot);
        assert!(!screen.show_fit);
    }
}
