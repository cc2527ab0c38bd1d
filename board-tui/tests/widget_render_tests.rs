use board_tui::board::{
    visual_position_of, BoardConfig, BoardController, Orientation, PositionState, STARTING_FEN,
};
use board_tui::ui::widgets::BoardWidget;
use board_tui::ui::{BoardLayout, Theme};
use chess::{CozyOracle, RulesOracle};
use common::{sq, RefusingOracle};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

mod common;

/// Outer area whose inner area is exactly the compact board plus labels.
const AREA: Rect = Rect {
    x: 0,
    y: 0,
    width: 45,
    height: 27,
};

fn controller() -> BoardController<CozyOracle> {
    BoardController::new(
        PositionState::new(CozyOracle::new(), STARTING_FEN).unwrap(),
        BoardConfig::default(),
    )
}

fn render<O: RulesOracle>(board: &BoardController<O>, orientation: Orientation) -> Buffer {
    let theme = Theme::dark();
    let mut buf = Buffer::empty(AREA);
    BoardWidget::new(board, orientation, &theme).render(AREA, &mut buf);
    buf
}

fn layout() -> BoardLayout {
    BoardLayout::compute(Rect::new(1, 1, 43, 25))
}

/// Centre of the cell that shows `square`.
fn centre_of(square: &str, orientation: Orientation) -> (u16, u16) {
    let (row, col) = visual_position_of(sq(square), orientation);
    let rect = layout().cell_rect(row, col);
    (rect.x + rect.width / 2, rect.y + rect.height / 2)
}

fn symbol(buf: &Buffer, (x, y): (u16, u16)) -> &str {
    buf[(x, y)].symbol()
}

#[test]
fn test_pieces_drawn_where_the_mapper_puts_them() {
    let board = controller();
    for orientation in [Orientation::WhiteAtBottom, Orientation::BlackAtBottom] {
        let buf = render(&board, orientation);
        assert_eq!(symbol(&buf, centre_of("a8", orientation)), "♜");
        assert_eq!(symbol(&buf, centre_of("e1", orientation)), "♚");
        assert_eq!(symbol(&buf, centre_of("d8", orientation)), "♛");
        assert_eq!(symbol(&buf, centre_of("e4", orientation)), " ");
    }
}

#[test]
fn test_piece_colour_distinguishes_sides() {
    let theme = Theme::dark();
    let buf = render(&controller(), Orientation::WhiteAtBottom);
    assert_eq!(buf[centre_of("e1", Orientation::WhiteAtBottom)].fg, theme.white_piece);
    assert_eq!(buf[centre_of("e8", Orientation::WhiteAtBottom)].fg, theme.black_piece);
}

#[test]
fn test_top_left_cell_under_each_orientation() {
    let board = controller();
    let top_left = layout().cell_rect(0, 0);
    let centre = (top_left.x + top_left.width / 2, top_left.y + top_left.height / 2);

    let white = render(&board, Orientation::WhiteAtBottom);
    assert_eq!(symbol(&white, centre), "♜");
    assert_eq!(white[centre].fg, Theme::dark().black_piece);

    // h1 sits top-left with black at the bottom.
    let black = render(&board, Orientation::BlackAtBottom);
    assert_eq!(symbol(&black, centre), "♜");
    assert_eq!(black[centre].fg, Theme::dark().white_piece);
}

#[test]
fn test_labels_follow_orientation() {
    let board = controller();
    let layout = layout();

    let white = render(&board, Orientation::WhiteAtBottom);
    assert_eq!(symbol(&white, layout.rank_label_position(0)), "8");
    assert_eq!(symbol(&white, layout.file_label_position(0)), "a");

    let black = render(&board, Orientation::BlackAtBottom);
    assert_eq!(symbol(&black, layout.rank_label_position(0)), "1");
    assert_eq!(symbol(&black, layout.file_label_position(0)), "h");
}

#[test]
fn test_selection_and_destinations_are_highlighted() {
    let theme = Theme::dark();
    let mut board = controller();
    board.click(sq("e2"), true);
    board.hover(sq("e3"));
    let o = Orientation::WhiteAtBottom;
    let buf = render(&board, o);

    // e2 and e4 are light squares, e3 is dark.
    assert_eq!(buf[centre_of("e2", o)].bg, theme.overlay_selected.0);
    assert_eq!(buf[centre_of("e3", o)].bg, theme.overlay_legal_move_hovered.1);
    assert_eq!(buf[centre_of("e4", o)].bg, theme.overlay_legal_move.0);
    assert_eq!(symbol(&buf, centre_of("e4", o)), "•");

    // d4 is dark and untouched.
    assert_eq!(buf[centre_of("d4", o)].bg, theme.dark_square);
}

#[test]
fn test_notice_shown_in_bottom_border() {
    let mut board = BoardController::new(
        PositionState::new(RefusingOracle::default(), STARTING_FEN).unwrap(),
        BoardConfig::default(),
    );
    board.click(sq("e2"), true);
    board.click(sq("e4"), true);

    let buf = render(&board, Orientation::WhiteAtBottom);
    let bottom: String = (0..AREA.width)
        .map(|x| buf[(x, AREA.height - 1)].symbol().to_string())
        .collect();
    assert!(bottom.contains("Illegal move e2e4"), "bottom border: {bottom}");
}

#[test]
fn test_hit_testing_agrees_with_rendering() {
    let layout = layout();
    for orientation in [Orientation::WhiteAtBottom, Orientation::BlackAtBottom] {
        let (x, y) = centre_of("g1", orientation);
        let (row, col) = layout.cell_at(x, y).unwrap();
        assert_eq!(board_tui::board::square_at(row, col, orientation), sq("g1"));
    }
}
