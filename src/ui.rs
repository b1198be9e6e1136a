pub mod wheel;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::board::LetterState;
use crate::player::PlayerState;
use crate::timer::{format_mmss, TimerState};
use crate::ui::wheel::Wheel;
use crate::{App, InputMode};

const WARN_SECS: u64 = 30;
const DANGER_SECS: u64 = 10;

/// Terminal color for a letter state. The third marking renders yellow, not
/// the DIM modifier, so it stays legible on dark terminals.
pub(crate) fn letter_color(state: LetterState) -> Option<Color> {
    match state {
        LetterState::Default => None,
        LetterState::Green => Some(Color::Green),
        LetterState::Red => Some(Color::Red),
        LetterState::Dim => Some(Color::Yellow),
    }
}

/// Truncates a label to at most `max_width` terminal columns.
pub(crate) fn fit_label(label: &str, max_width: usize) -> String {
    let mut out = String::new();
    for c in label.chars() {
        if out.width() + c.width().unwrap_or(0) > max_width {
            break;
        }
        out.push(c);
    }
    out
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Min(1),    // player panels
                Constraint::Length(1), // footer
            ])
            .split(area);

        let title = Paragraph::new(Span::styled(
            "harf · لوحة الحروف العربية",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        title.render(chunks[0], buf);

        let count = self.session.player_count();
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, count as u32); count])
            .split(chunks[1]);

        for ((slot, player), column) in self.session.slots().zip(columns.iter()) {
            render_player_panel(self, slot, player, *column, buf);
        }

        render_footer(self, chunks[2], buf);
    }
}

fn render_player_panel(app: &App, slot: usize, player: &PlayerState, area: Rect, buf: &mut Buffer) {
    let focused = slot == app.focus;
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let name = fit_label(&player.name, area.width.saturating_sub(4) as usize);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(format!(" {name} "), title_style));
    let inner = block.inner(area);
    block.render(area, buf);

    if inner.width < 3 || inner.height < 5 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // score
            Constraint::Length(1), // timer
            Constraint::Length(1), // timer length
            Constraint::Min(3),    // letter wheel
            Constraint::Length(1), // selected letter
        ])
        .split(inner);

    let score = Paragraph::new(Span::styled(
        format!("score {}", player.score),
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    score.render(rows[0], buf);

    let expired_flash = app.expired.get(slot - 1).copied().unwrap_or(false);
    let timer_span = match player.timer {
        TimerState::Running { .. } => {
            let secs = player.remaining_secs(app.observed_at).unwrap_or(0);
            let color = if secs <= DANGER_SECS {
                Color::Red
            } else if secs <= WARN_SECS {
                Color::Yellow
            } else {
                Color::Green
            };
            Span::styled(
                format!("⏳ {}", format_mmss(secs)),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )
        }
        TimerState::Paused { remaining } => Span::styled(
            format!("⏸ {}", format_mmss(remaining)),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
        TimerState::Idle => {
            if expired_flash {
                Span::styled(
                    "⏰ TIME'S UP!",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(
                    "timer stopped",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )
            }
        }
    };
    Paragraph::new(timer_span)
        .alignment(Alignment::Center)
        .render(rows[1], buf);

    let length = Paragraph::new(Span::styled(
        format!("length {} min", player.timer_minutes()),
        Style::default().fg(Color::DarkGray),
    ))
    .alignment(Alignment::Center);
    length.render(rows[2], buf);

    Wheel::new(&player.board, player.selected_letter()).render(rows[3], buf);

    let selected_style = match letter_color(player.selected_state()) {
        Some(color) => Style::default().fg(color).add_modifier(Modifier::BOLD),
        None => Style::default().add_modifier(Modifier::BOLD),
    };
    let selected = Paragraph::new(Span::styled(
        format!("⟨ {} ⟩", player.selected_letter().glyph()),
        selected_style,
    ))
    .alignment(Alignment::Center);
    selected.render(rows[4], buf);
}

fn render_footer(app: &App, area: Rect, buf: &mut Buffer) {
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let footer = match app.input_mode {
        InputMode::Normal => Paragraph::new(Span::styled(
            "(tab) player  (←/→) letter  (space) mark  (+/-) score  (s) timer  ([/]) minutes  (r)ename  (R)eset  (1-4) players  (esc)ape",
            italic_style,
        )),
        InputMode::Rename => Paragraph::new(Line::from(vec![
            Span::styled(
                format!("{} player {}: ", app.input_mode, app.focus),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(app.name_input.clone()),
            Span::styled("▏", Style::default().fg(Color::Cyan)),
            Span::styled("  (enter) save  (esc) cancel", italic_style),
        ])),
    };

    footer.render(area, buf);
}
