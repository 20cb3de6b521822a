use claimstat_stats::boxplot::BoxSummary;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect, Spacing},
    style::{Color, Style},
    symbols::{Marker, merge::MergeStrategy},
    text::Line as TextLine,
    widgets::{
        Block, Paragraph, Widget,
        canvas::{Canvas, Context, Line, Points, Rectangle},
    },
};

use super::step_selection;
use crate::{
    command::plot::data::BoxPlot,
    ui::{self, color},
};

/// Groups drawn side by side at once.
const VISIBLE_GROUPS: usize = 8;
/// Box width in category slots.
const BOX_WIDTH: f64 = 0.5;
const LABEL_WIDTH: usize = 10;

#[derive(Default, Debug)]
pub struct BoxPlotScreen {
    selected: usize,
    offset: usize,
}

impl BoxPlotScreen {
    pub const HELP: &str = "←/→: Select Category";

    pub fn draw(&self, frame: &mut Frame, area: Rect, plot: &BoxPlot) {
        let [chart_area, detail_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(30)])
                .spacing(Spacing::Overlap(1))
                .areas(area);
        frame.render_widget(
            BoxChart {
                plot,
                selected: self.selected,
                offset: self.offset,
            },
            chart_area,
        );
        frame.render_widget(
            SummaryPanel {
                group: plot.groups.get(self.selected),
            },
            detail_area,
        );
    }

    pub fn handle_input(&mut self, key_event: KeyEvent, plot: &BoxPlot) {
        let len = plot.groups.len();
        match key_event.code {
            KeyCode::Left => self.selected = step_selection(self.selected, len, false),
            KeyCode::Right => self.selected = step_selection(self.selected, len, true),
            _ => return,
        }
        self.scroll_to_selected();
    }

    fn scroll_to_selected(&mut self) {
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + VISIBLE_GROUPS {
            self.offset = self.selected + 1 - VISIBLE_GROUPS;
        }
    }
}

struct BoxChart<'a> {
    plot: &'a BoxPlot,
    selected: usize,
    offset: usize,
}

impl BoxChart<'_> {
    #[expect(clippy::cast_precision_loss)]
    fn paint(&self, ctx: &mut Context<'_>, label_y: f64) {
        let visible = self
            .plot
            .groups
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(VISIBLE_GROUPS);
        for (slot, (index, (label, summary))) in visible.enumerate() {
            let center = slot as f64 + 0.5;
            let color = if index == self.selected {
                color::YELLOW
            } else {
                color::CYAN
            };
            draw_box(ctx, center, summary, color);
            let label = label.chars().take(LABEL_WIDTH).collect::<String>();
            ctx.print(center - BOX_WIDTH / 2.0, label_y, label);
        }
    }
}

fn draw_box(ctx: &mut Context<'_>, center: f64, summary: &BoxSummary, color: Color) {
    let left = center - BOX_WIDTH / 2.0;
    let right = center + BOX_WIDTH / 2.0;
    ctx.draw(&Rectangle {
        x: left,
        y: summary.q1,
        width: BOX_WIDTH,
        height: summary.q3 - summary.q1,
        color,
    });
    ctx.draw(&Line::new(left, summary.median, right, summary.median, color::WHITE));
    for (end, hinge) in [
        (summary.lower_whisker, summary.q1),
        (summary.upper_whisker, summary.q3),
    ] {
        ctx.draw(&Line::new(center, end, center, hinge, color));
        ctx.draw(&Line::new(
            center - BOX_WIDTH / 4.0,
            end,
            center + BOX_WIDTH / 4.0,
            end,
            color,
        ));
    }
    let outliers = summary
        .outliers
        .iter()
        .map(|&y| (center, y))
        .collect::<Vec<_>>();
    ctx.draw(&Points {
        coords: &outliers,
        color: color::RED,
    });
}

impl Widget for BoxChart<'_> {
    #[expect(clippy::cast_precision_loss)]
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let plot = self.plot;
        let [min, max] = plot.value_bounds();
        // room below the whiskers for category labels
        let label_y = min - (max - min) * 0.08;
        let slots = plot.groups.len().clamp(1, VISIBLE_GROUPS) as f64;

        let title = format!(
            "{} by {} ({}-{} of {})",
            plot.value_column,
            plot.category_column,
            (self.offset + 1).min(plot.groups.len()),
            (self.offset + VISIBLE_GROUPS).min(plot.groups.len()),
            plot.groups.len()
        );
        let [y_low, _, y_high] = ui::axis_labels([min, max]);
        let canvas = Canvas::default()
            .block(
                Block::bordered()
                    .merge_borders(MergeStrategy::Exact)
                    .title(title)
                    .title_bottom(format!("{y_low} .. {y_high}")),
            )
            .marker(Marker::Braille)
            .x_bounds([0.0, slots])
            .y_bounds([label_y, max])
            .paint(|ctx| self.paint(ctx, label_y));
        Widget::render(canvas, area, buf);
    }
}

struct SummaryPanel<'a> {
    group: Option<&'a (String, BoxSummary)>,
}

impl Widget for SummaryPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = Block::bordered()
            .merge_borders(MergeStrategy::Exact)
            .title("Summary");
        let Some((label, summary)) = self.group else {
            Widget::render(Paragraph::new("  No groups").block(block), area, buf);
            return;
        };
        let text = vec![
            TextLine::raw(format!("  {label}")),
            TextLine::raw(""),
            TextLine::raw(format!("  Count:    {:>12}", summary.count)),
            TextLine::raw(format!("  Lower:    {:>12.2}", summary.lower_whisker)),
            TextLine::raw(format!("  Q1:       {:>12.2}", summary.q1)),
            TextLine::raw(format!("  Median:   {:>12.2}", summary.median)),
            TextLine::raw(format!("  Q3:       {:>12.2}", summary.q3)),
            TextLine::raw(format!("  Upper:    {:>12.2}", summary.upper_whisker)),
            TextLine::raw(format!("  Outliers: {:>12}", summary.outliers.len())),
        ];
        Widget::render(Paragraph::new(text).block(block), area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plot(groups: usize) -> BoxPlot {
        BoxPlot {
            category_column: "Province".into(),
            value_column: "TotalClaims".into(),
            groups: (0..groups)
                .map(|i| {
                    let summary = BoxSummary::new([1.0, 2.0, 3.0]).unwrap();
                    (format!("P{i}"), summary)
                })
                .collect(),
        }
    }

    #[test]
    fn test_selection_scrolls_window() {
        let plot = plot(VISIBLE_GROUPS + 2);
        let mut screen = BoxPlotScreen::default();
        for _ in 0..VISIBLE_GROUPS {
            screen.handle_input(KeyEvent::from(KeyCode::Right), &plot);
        }
        assert_eq!(screen.selected, VISIBLE_GROUPS);
        assert_eq!(screen.offset, 1);

        screen.handle_input(KeyEvent::from(KeyCode::Right), &plot);
        screen.handle_input(KeyEvent::from(KeyCode::Right), &plot);
        assert_eq!(screen.selected, 0);
        assert_eq!(screen.offset, 0);

        screen.handle_input(KeyEvent::from(KeyCode::Left), &plot);
        assert_eq!(screen.selected, VISIBLE_GROUPS + 1);
        assert_eq!(screen.offset, 2);
    }
}
