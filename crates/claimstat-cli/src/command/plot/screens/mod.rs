use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use self::{
    boxplot::BoxPlotScreen, heatmap::HeatmapScreen, scatter::ScatterScreen,
    univariate::UnivariateScreen,
};
use super::data::PlotData;

mod boxplot;
mod heatmap;
mod scatter;
mod univariate;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    #[default]
    Univariate,
    Scatter,
    BoxPlot,
    Heatmap,
}

impl View {
    const ALL: [View; 4] = [View::Univariate, View::Scatter, View::BoxPlot, View::Heatmap];
}

/// The tabbed views and their selection state.
#[derive(Default, Debug)]
pub struct Screen {
    view: View,
    univariate: UnivariateScreen,
    scatter: ScatterScreen,
    boxplot: BoxPlotScreen,
}

impl Screen {
    pub const TITLES: [&str; 4] = ["Univariate", "Scatter", "Box Plot", "Correlation"];

    pub fn index(&self) -> usize {
        self.view as usize
    }

    pub fn next(&mut self) {
        self.view = View::ALL[(self.index() + 1) % View::ALL.len()];
    }

    pub fn previous(&mut self) {
        self.view = View::ALL[(self.index() + View::ALL.len() - 1) % View::ALL.len()];
    }

    pub fn help(&self) -> &'static str {
        match self.view {
            View::Univariate => UnivariateScreen::HELP,
            View::Scatter => ScatterScreen::HELP,
            View::BoxPlot => BoxPlotScreen::HELP,
            View::Heatmap => HeatmapScreen::HELP,
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, data: &PlotData) {
        match self.view {
            View::Univariate => self.univariate.draw(frame, area, &data.univariate),
            View::Scatter => self.scatter.draw(frame, area, &data.scatter),
            View::BoxPlot => self.boxplot.draw(frame, area, &data.boxplot),
            View::Heatmap => HeatmapScreen::draw(frame, area, &data.heatmap),
        }
    }

    pub fn handle_input(&mut self, key_event: KeyEvent, data: &PlotData) {
        match self.view {
            View::Univariate => self.univariate.handle_input(key_event, &data.univariate),
            View::Scatter => self.scatter.handle_input(key_event, &data.scatter),
            View::BoxPlot => self.boxplot.handle_input(key_event, &data.boxplot),
            View::Heatmap => {}
        }
    }
}

/// Moves a selection up or down a list of `len` items, wrapping around.
fn step_selection(selected: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        0
    } else if forward {
        (selected + 1) % len
    } else {
        selected.checked_sub(1).unwrap_or(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_cycles() {
        let mut screen = Screen::default();
        assert_eq!(screen.index(), 0);
        screen.previous();
        assert_eq!(screen.view, View::Heatmap);
        screen.next();
        screen.next();
        assert_eq!(screen.view, View::Scatter);
        assert_eq!(Screen::TITLES[screen.index()], "Scatter");
    }

    #[test]
    fn test_step_selection_wraps() {
        assert_eq!(step_selection(0, 3, false), 2);
        assert_eq!(step_selection(2, 3, true), 0);
        assert_eq!(step_selection(1, 3, true), 2);
        assert_eq!(step_selection(0, 0, true), 0);
    }
}
