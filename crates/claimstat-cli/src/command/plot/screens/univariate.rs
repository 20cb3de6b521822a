use claimstat_stats::{comprehensive::ComprehensiveStats, histogram::Histogram};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect, Spacing},
    style::{Color, Modifier, Style},
    symbols::{Marker, merge::MergeStrategy},
    text::Line,
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Chart, Dataset, GraphType, List, ListItem,
        ListState, Paragraph, StatefulWidget, Widget,
    },
};

use super::step_selection;
use crate::{
    command::plot::data::{UnivariateKind, UnivariatePlot},
    ui::{self, color},
};

/// Histogram with density overlay for numeric columns, counts for categorical ones.
#[derive(Default, Debug)]
pub struct UnivariateScreen {
    selected: usize,
}

impl UnivariateScreen {
    pub const HELP: &str = "↑/↓: Select Column";

    pub fn draw(&self, frame: &mut Frame, area: Rect, plots: &[UnivariatePlot]) {
        let [list_area, plot_area] =
            Layout::horizontal([Constraint::Percentage(25), Constraint::Percentage(75)])
                .spacing(Spacing::Overlap(1))
                .areas(area);

        frame.render_widget(
            ColumnSelector {
                plots,
                selected: self.selected,
            },
            list_area,
        );

        let Some(plot) = plots.get(self.selected) else {
            frame.render_widget(Block::bordered().title("No columns"), plot_area);
            return;
        };
        match &plot.kind {
            UnivariateKind::Numeric { stats, density } => {
                let [stats_area, chart_area] =
                    Layout::horizontal([Constraint::Length(30), Constraint::Fill(1)])
                        .spacing(Spacing::Overlap(1))
                        .areas(plot_area);
                frame.render_widget(StatsPanel { stats }, stats_area);
                frame.render_widget(
                    DistributionChart {
                        column: &plot.column,
                        histogram: &stats.histogram,
                        density,
                    },
                    chart_area,
                );
            }
            UnivariateKind::Categorical { counts, hidden } => {
                frame.render_widget(
                    CountChart {
                        column: &plot.column,
                        counts,
                        hidden: *hidden,
                    },
                    plot_area,
                );
            }
            UnivariateKind::Empty => {
                let block = Block::bordered()
                    .merge_borders(MergeStrategy::Exact)
                    .title(plot.column.as_str());
                frame.render_widget(Paragraph::new("  No values").block(block), plot_area);
            }
        }
    }

    pub fn handle_input(&mut self, key_event: KeyEvent, plots: &[UnivariatePlot]) {
        match key_event.code {
            KeyCode::Up => self.selected = step_selection(self.selected, plots.len(), false),
            KeyCode::Down => self.selected = step_selection(self.selected, plots.len(), true),
            _ => {}
        }
    }
}

struct ColumnSelector<'a> {
    plots: &'a [UnivariatePlot],
    selected: usize,
}

impl Widget for ColumnSelector<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let items = self
            .plots
            .iter()
            .map(|plot| {
                let marker = match plot.kind {
                    UnivariateKind::Numeric { .. } => "#",
                    UnivariateKind::Categorical { .. } => "A",
                    UnivariateKind::Empty => "-",
                };
                ListItem::new(format!("{marker} {}", plot.column))
            })
            .collect::<Vec<_>>();

        let list = List::new(items)
            .block(
                Block::bordered()
                    .title("Columns")
                    .merge_borders(MergeStrategy::Exact),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.selected));

        StatefulWidget::render(list, area, buf, &mut list_state);
    }
}

struct StatsPanel<'a> {
    stats: &'a ComprehensiveStats,
}

impl Widget for StatsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let stats = &self.stats.stats;
        let mut text = vec![
            Line::raw(format!("  Count:  {:>12}", stats.count)),
            Line::raw(format!("  Mean:   {:>12.2}", stats.mean)),
            Line::raw(format!("  StdDev: {:>12.2}", stats.std_dev)),
            Line::raw(format!("  Min:    {:>12.2}", stats.min)),
        ];
        for (p, value) in self.stats.percentiles.iter() {
            text.push(Line::raw(format!("  P{p:02}:    {value:>12.2}")));
        }
        text.push(Line::raw(format!("  Max:    {:>12.2}", stats.max)));

        let paragraph = Paragraph::new(text).block(
            Block::bordered()
                .title("Statistics")
                .merge_borders(MergeStrategy::Exact),
        );
        Widget::render(paragraph, area, buf);
    }
}

struct DistributionChart<'a> {
    column: &'a str,
    histogram: &'a Histogram,
    density: &'a [(f64, f64)],
}

impl DistributionChart<'_> {
    /// Outline of the histogram bars as a polyline.
    #[expect(clippy::cast_precision_loss)]
    fn outline(&self) -> Vec<(f64, f64)> {
        let mut points = Vec::with_capacity(self.histogram.bins.len() * 4);
        for bin in &self.histogram.bins {
            let count = bin.count as f64;
            points.extend([
                (bin.range.start, 0.0),
                (bin.range.start, count),
                (bin.range.end, count),
                (bin.range.end, 0.0),
            ]);
        }
        points
    }
}

impl Widget for DistributionChart<'_> {
    #[expect(clippy::cast_precision_loss)]
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let outline = self.outline();
        let x_bounds = [
            self.histogram.bins.first().map_or(0.0, |b| b.range.start),
            self.histogram.bins.last().map_or(1.0, |b| b.range.end),
        ];
        let max_count = self
            .histogram
            .bins
            .iter()
            .map(|b| b.count as f64)
            .chain(self.density.iter().map(|&(_, y)| y))
            .fold(1.0, f64::max);
        let y_bounds = [0.0, max_count];

        let mut datasets = vec![
            Dataset::default()
                .name("Histogram")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(color::CYAN))
                .data(&outline),
        ];
        if !self.density.is_empty() {
            datasets.push(
                Dataset::default()
                    .name("KDE")
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(color::ORANGE))
                    .data(self.density),
            );
        }

        let chart = Chart::new(datasets)
            .block(
                Block::bordered()
                    .merge_borders(MergeStrategy::Exact)
                    .title(format!("Distribution of {}", self.column)),
            )
            .x_axis(
                Axis::default()
                    .title(self.column)
                    .bounds(x_bounds)
                    .labels(ui::axis_labels(x_bounds)),
            )
            .y_axis(
                Axis::default()
                    .title("Count")
                    .bounds(y_bounds)
                    .labels(ui::axis_labels(y_bounds)),
            );
        Widget::render(chart, area, buf);
    }
}

struct CountChart<'a> {
    column: &'a str,
    counts: &'a [(String, u64)],
    hidden: usize,
}

impl Widget for CountChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let title = if self.hidden > 0 {
            format!("Counts of {} ({} more hidden)", self.column, self.hidden)
        } else {
            format!("Counts of {}", self.column)
        };
        let bars = self
            .counts
            .iter()
            .map(|(label, count)| {
                Bar::with_label(label.as_str(), *count).text_value(count.to_string())
            })
            .collect::<Vec<_>>();

        let chart = BarChart::default()
            .block(
                Block::bordered()
                    .merge_borders(MergeStrategy::Exact)
                    .title(title),
            )
            .data(BarGroup::default().bars(&bars))
            .bar_width(8)
            .bar_gap(1)
            .bar_style(Style::default().fg(color::CYAN));
        Widget::render(chart, area, buf);
    }
}
