use claimstat_frame::correlation::CorrelationMatrix;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    symbols::merge::MergeStrategy,
    widgets::{Block, Cell, Row, Table, Widget},
};

use crate::{ui::color, util::format_value};

const CELL_WIDTH: u16 = 8;
const LABEL_WIDTH: u16 = 18;

/// Stateless view of the correlation matrix.
pub struct HeatmapScreen;

impl HeatmapScreen {
    pub const HELP: &str = "Pearson coefficients";

    pub fn draw(frame: &mut Frame, area: Rect, matrix: &CorrelationMatrix) {
        frame.render_widget(HeatmapTable { matrix }, area);
    }
}

struct HeatmapTable<'a> {
    matrix: &'a CorrelationMatrix,
}

fn truncate(name: &str, width: u16) -> String {
    name.chars().take(usize::from(width)).collect()
}

fn coefficient_cell(value: f64) -> Cell<'static> {
    Cell::from(format!("{:>7}", format_value(value, 2)))
        .style(Style::default().fg(Color::Black).bg(color::diverging(value)))
}

impl Widget for HeatmapTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let columns = &self.matrix.columns;
        let header = Row::new(
            std::iter::once(Cell::from(""))
                .chain(columns.iter().map(|c| Cell::from(truncate(c, CELL_WIDTH - 1)))),
        )
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows = self.matrix.values.iter().zip(columns).map(|(values, name)| {
            Row::new(
                std::iter::once(Cell::from(truncate(name, LABEL_WIDTH)))
                    .chain(values.iter().map(|&v| coefficient_cell(v))),
            )
        });

        let widths = std::iter::once(Constraint::Length(LABEL_WIDTH))
            .chain(columns.iter().map(|_| Constraint::Length(CELL_WIDTH)));

        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(0)
            .block(
                Block::bordered()
                    .merge_borders(MergeStrategy::Exact)
                    .title("Correlation Matrix"),
            );
        Widget::render(table, area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("TotalPremium", 7), "TotalPr");
        assert_eq!(truncate("Age", 7), "Age");
    }
}
