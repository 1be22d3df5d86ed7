use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::session::{Mode, Session, Status};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

/// Render the whole screen from engine state. Purely derived; nothing in
/// here feeds back into the session.
pub fn draw(f: &mut Frame, session: &Session) {
    if session.has_finished() {
        draw_results(f, session);
    } else {
        draw_typing(f, session);
    }
}

fn draw_typing(f: &mut Frame, session: &Session) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
    let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);
    let underlined_dim_bold_style = Style::default()
        .patch(dim_bold_style)
        .add_modifier(Modifier::UNDERLINED);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let area = f.area();
    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let prompt_width = session.reference().width();
    let prompt_occupied_lines = if prompt_width <= max_chars_per_line as usize {
        1
    } else {
        ((prompt_width as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // status line
            Constraint::Length(
                ((area.height.saturating_sub(prompt_occupied_lines) as f64) / 2.0) as u16,
            ),
            Constraint::Length(prompt_occupied_lines),
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(area);

    let status_line = Paragraph::new(Span::styled(status_text(session), bold_style))
        .alignment(Alignment::Center);
    f.render_widget(status_line, chunks[0]);

    let typed: Vec<char> = session.typed().chars().collect();
    let reference: Vec<char> = session.reference().chars().collect();

    let mut spans = Vec::with_capacity(reference.len() + 1);
    for (idx, &expected) in reference.iter().take(typed.len()).enumerate() {
        if typed[idx] == expected {
            spans.push(Span::styled(expected.to_string(), green_bold_style));
        } else {
            // Show what was actually typed; a missed space gets a
            // visible dot.
            let shown = match typed[idx] {
                ' ' => "·".to_owned(),
                c => c.to_string(),
            };
            spans.push(Span::styled(shown, red_bold_style));
        }
    }

    let cursor = typed.len();
    if cursor < reference.len() {
        spans.push(Span::styled(
            reference[cursor].to_string(),
            underlined_dim_bold_style,
        ));
        let rest: String = reference[cursor + 1..].iter().collect();
        spans.push(Span::styled(rest, dim_bold_style));
    }

    let prompt = Paragraph::new(Line::from(spans))
        .alignment(if prompt_occupied_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true });
    f.render_widget(prompt, chunks[2]);

    let legend = Paragraph::new(Span::styled(
        "(tab) restart / (↑↓) mode / (←→) length / (esc) quit",
        italic_style,
    ))
    .alignment(Alignment::Center);
    f.render_widget(legend, chunks[4]);
}

fn draw_results(f: &mut Frame, session: &Session) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let magenta_style = Style::default().fg(Color::Magenta);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),    // wpm chart
            Constraint::Length(1), // summary figures
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
        ])
        .split(f.area());

    let (overall_duration, highest_wpm) = chart_bounds(session.wpm_series());

    let datasets = vec![Dataset::default()
        .marker(ratatui::symbols::Marker::Braille)
        .style(magenta_style)
        .graph_type(GraphType::Line)
        .data(session.wpm_series())];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("seconds")
                .bounds([1.0, overall_duration])
                .labels(vec![
                    Span::styled("1", bold_style),
                    Span::styled(format_label(overall_duration), bold_style),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("wpm")
                .bounds([0.0, highest_wpm])
                .labels(vec![
                    Span::styled("0", bold_style),
                    Span::styled(format_label(highest_wpm), bold_style),
                ]),
        );
    f.render_widget(chart, chunks[0]);

    let summary = Paragraph::new(Span::styled(
        format!(
            "{} wpm   {}% acc   {:.2} sd   {}s",
            session.wpm(),
            session.accuracy(),
            session.consistency(),
            session.elapsed_secs(),
        ),
        bold_style,
    ))
    .alignment(Alignment::Center);
    f.render_widget(summary, chunks[1]);

    let legend = Paragraph::new(Span::styled(
        "(tab) restart / (↑↓) mode / (←→) length / (esc) quit",
        italic_style,
    ))
    .alignment(Alignment::Center);
    f.render_widget(legend, chunks[3]);
}

fn status_text(session: &Session) -> String {
    let target = match session.mode() {
        Mode::TimeLimited => format!("time {}s", session.config().seconds),
        Mode::WordLimited => format!("words {}", session.config().words),
    };
    match session.status() {
        Status::Idle => format!("{target}   start typing to begin"),
        _ => {
            let clock = match session.mode() {
                Mode::TimeLimited => session.remaining_secs(),
                Mode::WordLimited => session.elapsed_secs(),
            };
            format!(
                "{target}   {clock}s   {} wpm   {}% acc",
                session.wpm(),
                session.accuracy()
            )
        }
    }
}

/// X (seconds) and Y (WPM) upper bounds for the results chart.
pub fn chart_bounds(wpm_series: &[(f64, f64)]) -> (f64, f64) {
    let overall_duration = wpm_series.last().map_or(1.0, |&(secs, _)| secs.max(1.0));
    let highest_wpm = wpm_series
        .iter()
        .fold(0.0_f64, |acc, &(_, wpm)| acc.max(wpm))
        .round();
    (overall_duration, highest_wpm)
}

/// Format a numeric axis label without trailing noise.
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionConfig;
    use crate::word_generator::FixedTextProvider;

    #[test]
    fn test_chart_bounds_empty_series() {
        let (x, y) = chart_bounds(&[]);
        assert_eq!(x, 1.0);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn test_chart_bounds_track_the_series() {
        let series = [(1.0, 40.0), (2.0, 55.0), (3.0, 48.0)];
        let (x, y) = chart_bounds(&series);
        assert_eq!(x, 3.0);
        assert_eq!(y, 55.0);
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label(1.0), "1");
        assert_eq!(format_label(1.2345), "1.23");
    }

    #[test]
    fn test_status_text_idle_shows_target() {
        let session = Session::new(
            SessionConfig {
                mode: Mode::TimeLimited,
                seconds: 30,
                words: 25,
            },
            &FixedTextProvider::new("the cat sat"),
        );

        let text = status_text(&session);
        assert!(text.contains("time 30s"));
        assert!(text.contains("start typing"));
    }

    #[test]
    fn test_status_text_running_shows_clock_and_stats() {
        let mut session = Session::new(
            SessionConfig {
                mode: Mode::WordLimited,
                seconds: 60,
                words: 3,
            },
            &FixedTextProvider::new("the cat sat"),
        );
        session.apply_input("the");
        session.tick(0, 6);

        let text = status_text(&session);
        assert!(text.contains("words 3"));
        assert!(text.contains("6s"));
        assert!(text.contains("wpm"));
    }
}
