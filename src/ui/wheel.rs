use std::f64::consts::{FRAC_PI_2, TAU};

use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::letter_color;
use crate::board::{Letter, LetterBoard, LetterState, LETTER_COUNT};

// below this the ring degenerates into overlapping cells, so the letters
// fall back to plain rows
const MIN_RING_WIDTH: u16 = 25;
const MIN_RING_HEIGHT: u16 = 11;
const ROW_LENGTH: usize = 7;

/// The alphabet laid out on an ellipse, alif at twelve o'clock, clockwise.
/// Each letter is colored by its marking state and the cursor letter is
/// drawn reversed.
pub struct Wheel<'a> {
    board: &'a LetterBoard,
    selected: Letter,
}

impl<'a> Wheel<'a> {
    pub fn new(board: &'a LetterBoard, selected: Letter) -> Self {
        Self { board, selected }
    }

    fn letter_style(&self, letter: Letter, state: LetterState) -> Style {
        let mut style = match letter_color(state) {
            Some(color) => Style::default().fg(color).add_modifier(Modifier::BOLD),
            None => Style::default(),
        };
        if letter == self.selected {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        style
    }

    fn render_ring(&self, area: Rect, buf: &mut Buffer) {
        let cx = f64::from(area.x) + (f64::from(area.width) - 1.0) / 2.0;
        let cy = f64::from(area.y) + (f64::from(area.height) - 1.0) / 2.0;
        // cells are roughly twice as tall as wide, so the horizontal radius
        // doubles to keep the ring looking round
        let ry = (f64::from(area.height) - 1.0) / 2.0;
        let rx = (ry * 2.0).min((f64::from(area.width) - 1.0) / 2.0);

        for (i, (letter, state)) in self.board.iter().enumerate() {
            let angle = TAU * (i as f64) / (LETTER_COUNT as f64) - FRAC_PI_2;
            let x = ((cx + rx * angle.cos()).round() as u16)
                .clamp(area.left(), area.right().saturating_sub(1));
            let y = ((cy + ry * angle.sin()).round() as u16)
                .clamp(area.top(), area.bottom().saturating_sub(1));
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(&letter.glyph().to_string());
                cell.set_style(self.letter_style(letter, state));
            }
        }
    }

    fn render_rows(&self, area: Rect, buf: &mut Buffer) {
        let chunks = self.board.iter().chunks(ROW_LENGTH);
        let lines: Vec<Line> = (&chunks)
            .into_iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .map(|(letter, state)| {
                        Span::styled(
                            format!(" {} ", letter.glyph()),
                            self.letter_style(letter, state),
                        )
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

impl Widget for Wheel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        if area.width < MIN_RING_WIDTH || area.height < MIN_RING_HEIGHT {
            self.render_rows(area, buf);
        } else {
            self.render_ring(area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ARABIC_LETTERS;

    fn render_into(width: u16, height: u16, board: &LetterBoard, selected: Letter) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        Wheel::new(board, selected).render(area, &mut buffer);
        buffer
    }

    fn style_of(buffer: &Buffer, glyph: char) -> Option<Style> {
        let wanted = glyph.to_string();
        buffer
            .content()
            .iter()
            .find(|cell| cell.symbol() == wanted)
            .map(|cell| cell.style())
    }

    #[test]
    fn test_ring_places_every_letter() {
        let board = LetterBoard::new();
        let buffer = render_into(48, 15, &board, Letter::FIRST);
        let content: String = buffer.content().iter().map(|c| c.symbol()).collect();

        for glyph in ARABIC_LETTERS {
            assert!(content.contains(glyph), "missing {glyph}");
        }
    }

    #[test]
    fn test_ring_starts_at_twelve_o_clock() {
        let board = LetterBoard::new();
        let buffer = render_into(48, 15, &board, Letter::FIRST);

        let top_row: String = buffer.content()[..48].iter().map(|c| c.symbol()).collect();
        assert!(top_row.contains('ا'));
    }

    #[test]
    fn test_cramped_area_falls_back_to_rows() {
        let board = LetterBoard::new();
        let buffer = render_into(23, 6, &board, Letter::FIRST);
        let content: String = buffer.content().iter().map(|c| c.symbol()).collect();

        for glyph in ARABIC_LETTERS {
            assert!(content.contains(glyph), "missing {glyph}");
        }
    }

    #[test]
    fn test_selected_letter_renders_reversed() {
        let board = LetterBoard::new();
        let selected = Letter::from_index(3);
        let buffer = render_into(48, 15, &board, selected);

        let style = style_of(&buffer, selected.glyph()).unwrap();
        assert!(style.add_modifier.contains(Modifier::REVERSED));

        let other = style_of(&buffer, Letter::FIRST.glyph()).unwrap();
        assert!(!other.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_marked_letters_take_their_state_color() {
        use ratatui::style::Color;

        let mut board = LetterBoard::new();
        let green = Letter::from_index(0);
        let red = Letter::from_index(1);
        let dim = Letter::from_index(2);
        board.cycle(green);
        board.cycle(red);
        board.cycle(red);
        for _ in 0..3 {
            board.cycle(dim);
        }

        let buffer = render_into(48, 15, &board, Letter::from_index(5));
        assert_eq!(style_of(&buffer, green.glyph()).unwrap().fg, Some(Color::Green));
        assert_eq!(style_of(&buffer, red.glyph()).unwrap().fg, Some(Color::Red));
        assert_eq!(style_of(&buffer, dim.glyph()).unwrap().fg, Some(Color::Yellow));
        assert_eq!(style_of(&buffer, Letter::from_index(4).glyph()).unwrap().fg, None);
    }

    #[test]
    fn test_zero_sized_area_is_a_no_op() {
        let board = LetterBoard::new();
        let area = Rect::new(0, 0, 0, 0);
        let mut buffer = Buffer::empty(area);
        Wheel::new(&board, Letter::FIRST).render(area, &mut buffer);
        assert!(buffer.content().is_empty());
    }
}
