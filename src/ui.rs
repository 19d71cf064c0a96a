use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::{timer::TimerState, util::format_clock};

pub const DEFAULT_MAX_BAR_WIDTH: u16 = 80;
pub const DEFAULT_BAR_MARGIN: u16 = 20;

pub const QUIT_HINT: &str = "Press q to quit";
pub const CANCELLED_MESSAGE: &str = "Stay Active!";

const FILLED: char = '█';
const EMPTY: char = '░';

const GRADIENT_START: (u8, u8, u8) = (0xFF, 0x7C, 0xCB);
const GRADIENT_END: (u8, u8, u8) = (0xFD, 0xFF, 0x8C);
const EMPTY_COLOR: Color = Color::Rgb(0x60, 0x60, 0x60);

/// Sizing rule for the progress bar: shrink with the terminal, never grow past `max_width`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarLayout {
    pub max_width: u16,
    pub margin: u16,
}

impl BarLayout {
    pub fn new(max_width: u16, margin: u16) -> Self {
        Self { max_width, margin }
    }

    pub fn width_for(&self, available: u16) -> u16 {
        available.saturating_sub(self.margin).min(self.max_width)
    }
}

impl Default for BarLayout {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BAR_WIDTH, DEFAULT_BAR_MARGIN)
    }
}

/// Colour of filled cell `idx` when `filled` cells are lit. The gradient is
/// stretched over the filled part, so the leading cell is always the end colour.
pub fn gradient_color(idx: usize, filled: usize) -> Color {
    let t = if filled <= 1 {
        0.0
    } else {
        idx.min(filled - 1) as f64 / (filled - 1) as f64
    };
    let mix = |from: u8, to: u8| (from as f64 + (to as f64 - from as f64) * t).round() as u8;

    Color::Rgb(
        mix(GRADIENT_START.0, GRADIENT_END.0),
        mix(GRADIENT_START.1, GRADIENT_END.1),
        mix(GRADIENT_START.2, GRADIENT_END.2),
    )
}

/// `width` cells of bar followed by the percentage, one span per filled cell
pub fn bar_spans(fraction: f64, width: u16) -> Vec<Span<'static>> {
    let fraction = fraction.clamp(0.0, 1.0);
    let width = width as usize;
    let filled = ((fraction * width as f64).round() as usize).min(width);

    let mut spans: Vec<Span<'static>> = (0..filled)
        .map(|idx| {
            Span::styled(
                FILLED.to_string(),
                Style::default().fg(gradient_color(idx, filled)),
            )
        })
        .collect();
    if filled < width {
        spans.push(Span::styled(
            EMPTY.to_string().repeat(width - filled),
            Style::default().fg(EMPTY_COLOR),
        ));
    }
    spans.push(Span::raw(format!(" {:>3}%", (fraction * 100.0).floor() as u32)));
    spans
}

/// Styled lines for one frame of a phase
pub fn lines(state: &TimerState, bar_width: u16) -> Vec<Line<'static>> {
    if state.is_cancelled() {
        return vec![
            Line::default(),
            Line::from(Span::styled(
                format!(" {}", CANCELLED_MESSAGE),
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];
    }

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let exercise_style = Style::default().fg(Color::Indexed(205));
    let dim_style = Style::default().add_modifier(Modifier::DIM);

    let mut lines = vec![
        Line::default(),
        Line::from(vec![
            Span::styled(format!(" {}", state.phase), bold_style),
            Span::raw(format!(" - {} remaining", format_clock(state.remaining()))),
        ]),
        Line::default(),
        Line::from(
            std::iter::once(Span::raw(" "))
                .chain(bar_spans(state.fraction(), bar_width))
                .collect::<Vec<_>>(),
        ),
        Line::default(),
    ];

    if let Some(exercise) = state.exercise {
        lines.push(Line::from(Span::styled(
            format!(" Exercise: {}", exercise.name),
            exercise_style,
        )));
        lines.push(Line::from(format!(" {}", exercise.description)));
        lines.push(Line::from(format!(" {}", exercise.duration_hint)));
        lines.push(Line::default());
    }

    lines.push(Line::from(Span::styled(format!(" {}", QUIT_HINT), dim_style)));
    lines
}

/// Plain-text frame, same content as the widget without styling
pub fn view(state: &TimerState, bar_width: u16) -> String {
    lines(state, bar_width)
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct PhaseView<'a> {
    state: &'a TimerState,
    bar_width: u16,
}

impl<'a> PhaseView<'a> {
    pub fn new(state: &'a TimerState, bar_width: u16) -> Self {
        Self { state, bar_width }
    }
}

impl Widget for PhaseView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(lines(self.state, self.bar_width))
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
