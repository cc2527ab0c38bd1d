use chess::{PieceColor, PieceKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::board::{InteractionPhase, Orientation};
use crate::context::{Notification, NotificationLevel};
use crate::ui::theme::Theme;

/// Status shown next to the board.
pub struct SidePanel<'a> {
    pub side_to_move: PieceColor,
    pub phase: InteractionPhase,
    pub orientation: Orientation,
    pub locked: bool,
    pub promotion: Option<PieceKind>,
    /// Connection label of the real-time channel, if one is attached.
    pub connection: Option<&'a str>,
    /// Moves played locally this session, in notation.
    pub moves: &'a [String],
    pub notifications: &'a [&'a Notification],
    pub theme: &'a Theme,
}

impl SidePanel<'_> {
    fn label<'s>(&self, text: &'s str) -> Span<'s> {
        Span::styled(
            text,
            Style::default()
                .fg(self.theme.warning)
                .add_modifier(Modifier::BOLD),
        )
    }

    fn value<'s>(&self, text: impl Into<std::borrow::Cow<'s, str>>) -> Span<'s> {
        Span::styled(text, Style::default().fg(self.theme.text_primary))
    }

    fn move_lines(&self) -> Vec<Line<'static>> {
        self.moves
            .chunks(2)
            .enumerate()
            .map(|(i, pair)| {
                let mut text = format!("{:>3}. {:<8}", i + 1, pair[0]);
                if let Some(second) = pair.get(1) {
                    text.push_str(second);
                }
                Line::styled(text, Style::default().fg(self.theme.text_secondary))
            })
            .collect()
    }
}

impl Widget for SidePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Info ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.panel_border));
        let inner = block.inner(area);
        block.render(area, buf);

        let turn = match self.side_to_move {
            PieceColor::White => "White to move",
            PieceColor::Black => "Black to move",
        };
        let phase = match self.phase {
            InteractionPhase::Idle => "Select piece",
            InteractionPhase::PieceSelected => "Select destination",
        };
        let bottom = match self.orientation {
            Orientation::WhiteAtBottom => "white",
            Orientation::BlackAtBottom => "black",
        };
        let input = if self.locked {
            Span::styled("locked", Style::default().fg(self.theme.negative))
        } else {
            Span::styled("enabled", Style::default().fg(self.theme.positive))
        };
        let promotion = match self.promotion.unwrap_or(PieceKind::Queen) {
            PieceKind::Rook => "rook",
            PieceKind::Bishop => "bishop",
            PieceKind::Knight => "knight",
            _ => "queen",
        };

        let mut lines = vec![
            Line::from(vec![self.label("Turn: "), self.value(turn)]),
            Line::from(vec![self.label("Phase: "), self.value(phase)]),
            Line::from(vec![self.label("Bottom: "), self.value(bottom)]),
            Line::from(vec![self.label("Input: "), input]),
            Line::from(vec![self.label("Promote to: "), self.value(promotion)]),
        ];
        if let Some(connection) = self.connection {
            lines.push(Line::from(vec![self.label("Channel: "), self.value(connection)]));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(self.label("Moves")));
        if self.moves.is_empty() {
            lines.push(Line::styled("  none yet", Style::default().fg(self.theme.muted)));
        } else {
            lines.extend(self.move_lines());
        }

        if !self.notifications.is_empty() {
            lines.push(Line::raw(""));
            for note in self.notifications {
                let color = match note.level {
                    NotificationLevel::Info => self.theme.text_secondary,
                    NotificationLevel::Warning => self.theme.warning,
                    NotificationLevel::Error => self.theme.negative,
                };
                lines.push(Line::styled(note.message.clone(), Style::default().fg(color)));
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "f flip · l lock · p promotion · q quit",
            Style::default().fg(self.theme.muted),
        ));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
