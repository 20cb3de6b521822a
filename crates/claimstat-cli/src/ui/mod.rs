use ratatui::{
    style::{Color, Style},
    text::Text,
};

pub mod color {
    use ratatui::style::Color;

    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const BLUE: Color = Color::Rgb(80, 120, 255);
    pub const ORANGE: Color = Color::Rgb(255, 127, 0);
    pub const MAGENTA: Color = Color::Rgb(255, 0, 255);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);

    /// Colors assigned to hue groups in order.
    pub const SERIES: [Color; 8] = [CYAN, ORANGE, GREEN, MAGENTA, YELLOW, BLUE, RED, WHITE];

    const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
    const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
    const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

    #[must_use]
    pub fn series(index: usize) -> Color {
        SERIES[index % SERIES.len()]
    }

    /// Cool-to-warm color of a coefficient in `[-1, 1]`, gray for `NaN`.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn diverging(value: f64) -> Color {
        if value.is_nan() {
            return Color::DarkGray;
        }
        let t = value.clamp(-1.0, 1.0);
        let (from, to, t) = if t < 0.0 {
            (NEUTRAL, COOL, -t)
        } else {
            (NEUTRAL, WARM, t)
        };
        let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
        Color::Rgb(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
    }
}

/// Three evenly spaced tick labels spanning `bounds`.
#[must_use]
pub fn axis_labels(bounds: [f64; 2]) -> [String; 3] {
    [
        format!("{:.2}", bounds[0]),
        format!("{:.2}", f64::midpoint(bounds[0], bounds[1])),
        format!("{:.2}", bounds[1]),
    ]
}

#[must_use]
pub fn help_line(text: String) -> Text<'static> {
    Text::from(text)
        .style(Style::default().fg(Color::DarkGray))
        .centered()
}
