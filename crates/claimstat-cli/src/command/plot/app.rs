use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    widgets::Tabs,
};

use super::{data::PlotData, screens::Screen};
use crate::ui;

#[derive(Debug)]
pub struct App {
    data: PlotData,
    screen: Screen,
    should_exit: bool,
}

impl App {
    pub fn new(data: PlotData) -> Self {
        Self {
            data,
            screen: Screen::default(),
            should_exit: false,
        }
    }

    pub(crate) fn run(&mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        while !self.should_exit {
            terminal.draw(|f| self.draw(f))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        let [tabs_area, main_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let tabs = Tabs::new(Screen::TITLES)
            .select(self.screen.index())
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, tabs_area);

        self.screen.draw(frame, main_area, &self.data);

        let help = ui::help_line(format!(
            "Tab/Shift+Tab: Switch View | {} | q/Esc: Quit",
            self.screen.help()
        ));
        frame.render_widget(help, help_area);
    }

    fn handle_events(&mut self) -> anyhow::Result<()> {
        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key_event: event::KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_exit = true,
            KeyCode::Tab => self.screen.next(),
            KeyCode::BackTab => self.screen.previous(),
            _ => self.screen.handle_input(key_event, &self.data),
        }
    }
}
