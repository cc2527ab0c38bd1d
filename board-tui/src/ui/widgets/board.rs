use chess::{PieceColor, RulesOracle, Square};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Widget},
};

use crate::board::orientation::{file_label, rank_label};
use crate::board::{square_at, BoardController, Orientation, SquareHighlight};
use crate::ui::layout::BoardLayout;
use crate::ui::theme::Theme;

/// Marker drawn on empty legal destinations.
const DESTINATION_MARKER: &str = "•";

pub struct BoardWidget<'a, O: RulesOracle> {
    pub controller: &'a BoardController<O>,
    pub orientation: Orientation,
    pub theme: &'a Theme,
    pub locked: bool,
}

impl<'a, O: RulesOracle> BoardWidget<'a, O> {
    pub fn new(controller: &'a BoardController<O>, orientation: Orientation, theme: &'a Theme) -> Self {
        Self {
            controller,
            orientation,
            theme,
            locked: false,
        }
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// The block drawn around the board. [`BoardLayout::compute`] on its inner
    /// area gives the grid used for rendering.
    pub fn block(&self) -> Block<'static> {
        let title = if self.locked {
            " ♟ Board (locked) ♟ "
        } else {
            " ♟ Board ♟ "
        };
        let mut block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.board_border));
        if let Some(notice) = self.controller.notice() {
            block = block.title_bottom(
                Line::styled(format!(" {notice} "), Style::default().fg(self.theme.negative))
                    .centered(),
            );
        }
        block
    }

    fn render_labels(&self, layout: &BoardLayout, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(self.theme.board_label);
        for row in 0..8 {
            let (x, y) = layout.rank_label_position(row);
            if y < area.bottom() {
                buf.set_string(x, y, rank_label(row, self.orientation).to_string(), style);
            }
        }
        for col in 0..8 {
            let (x, y) = layout.file_label_position(col);
            if x < area.right() && y < area.bottom() {
                buf.set_string(x, y, file_label(col, self.orientation).to_string(), style);
            }
        }
    }

    fn render_square(&self, square: Square, rect: Rect, area: Rect, buf: &mut Buffer) {
        let rect = rect.intersection(area);
        if rect.is_empty() {
            return;
        }
        let highlight = self.controller.highlight(square);
        let is_light_square = (square.file() + square.rank()) % 2 == 1;
        let bg = self.theme.square_bg(highlight, is_light_square);
        buf.set_style(rect, Style::default().bg(bg));

        let centre_x = rect.x + rect.width / 2;
        let centre_y = rect.y + rect.height / 2;
        match self.controller.position().piece_at(square) {
            Some(piece) => {
                let fg = match piece.color {
                    PieceColor::White => self.theme.white_piece,
                    PieceColor::Black => self.theme.black_piece,
                };
                let glyph = piece.kind.glyph();
                buf.set_string(
                    centre_x,
                    centre_y,
                    glyph.to_string(),
                    Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
                );
            }
            None if matches!(
                highlight,
                SquareHighlight::LegalMove | SquareHighlight::LegalMoveHovered
            ) =>
            {
                buf.set_string(
                    centre_x,
                    centre_y,
                    DESTINATION_MARKER,
                    Style::default().fg(self.theme.muted).bg(bg),
                );
            }
            None => {}
        }
    }
}

impl<O: RulesOracle> Widget for BoardWidget<'_, O> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = BoardLayout::compute(inner);
        self.render_labels(&layout, inner, buf);
        for row in 0..8 {
            for col in 0..8 {
                let square = square_at(row, col, self.orientation);
                self.render_square(square, layout.cell_rect(row, col), inner, buf);
            }
        }
    }
}
