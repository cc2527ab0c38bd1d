//! The app loop driven with synthetic terminal events and a scripted channel.

use std::time::{Duration, Instant};

use board_tui::board::{
    visual_position_of, BoardConfig, BoardController, InteractionPhase, Orientation, PositionState,
    STARTING_FEN,
};
use board_tui::context::{AppContext, NotificationLevel};
use board_tui::ui::{App, AppOptions};
use chess::{CozyOracle, PieceColor, PieceKind};
use chess_client::{BackoffSchedule, Channel, ChannelEvent, ConnectionState, MockTransport};
use common::sq;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{backend::TestBackend, Terminal};

mod common;

type TestApp = App<CozyOracle, MockTransport>;

fn app(options: AppOptions, channel: Option<Channel<MockTransport>>) -> TestApp {
    let position = PositionState::new(CozyOracle::new(), STARTING_FEN).unwrap();
    App::new(
        BoardController::new(position, BoardConfig::default()),
        options,
        channel,
    )
}

fn draw(app: &mut TestApp, ctx: &AppContext, now: Instant) {
    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    terminal.draw(|frame| app.draw(frame, ctx, now)).unwrap();
}

fn mouse(kind: MouseEventKind, (column, row): (u16, u16)) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn key(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

/// Terminal position of `square` in the last drawn frame.
fn screen_pos(app: &TestApp, square: &str) -> (u16, u16) {
    let layout = app.board_layout().unwrap();
    let (row, col) = visual_position_of(sq(square), app.orientation());
    let rect = layout.cell_rect(row, col);
    (rect.x + 1, rect.y + 1)
}

fn click(app: &mut TestApp, ctx: &mut AppContext, square: &str, now: Instant) {
    let pos = screen_pos(app, square);
    app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), pos), ctx, now);
}

#[test]
fn test_mouse_clicks_play_a_move() {
    let now = Instant::now();
    let mut ctx = AppContext::default();
    let mut app = app(AppOptions::default(), None);
    draw(&mut app, &ctx, now);

    click(&mut app, &mut ctx, "g1", now);
    assert_eq!(app.controller().phase(), InteractionPhase::PieceSelected);
    click(&mut app, &mut ctx, "f3", now);
    app.tick(&mut ctx, now);

    assert_eq!(app.moves(), ["Nf3".to_string()]);
    assert_eq!(app.controller().position().side_to_move(), PieceColor::Black);
}

#[test]
fn test_clicks_hit_the_right_square_when_flipped() {
    let now = Instant::now();
    let mut ctx = AppContext::default();
    let mut app = app(AppOptions::default(), None);

    app.handle_event(key('f'), &mut ctx, now);
    assert_eq!(app.orientation(), Orientation::BlackAtBottom);
    draw(&mut app, &ctx, now);

    click(&mut app, &mut ctx, "e2", now);
    assert_eq!(app.controller().selection().selected(), Some(sq("e2")));
}

#[test]
fn test_hover_follows_the_pointer() {
    let now = Instant::now();
    let mut ctx = AppContext::default();
    let mut app = app(AppOptions::default(), None);
    draw(&mut app, &ctx, now);

    let e4 = screen_pos(&app, "e4");
    app.handle_event(mouse(MouseEventKind::Moved, e4), &mut ctx, now);
    assert_eq!(app.controller().selection().hovered(), Some(sq("e4")));

    app.handle_event(mouse(MouseEventKind::Moved, (0, 0)), &mut ctx, now);
    assert_eq!(app.controller().selection().hovered(), None);
}

#[test]
fn test_lock_key_disables_board_input() {
    let now = Instant::now();
    let mut ctx = AppContext::default();
    let mut app = app(AppOptions::default(), None);
    draw(&mut app, &ctx, now);

    app.handle_event(key('l'), &mut ctx, now);
    assert!(app.is_locked());
    click(&mut app, &mut ctx, "e2", now);
    assert_eq!(app.controller().phase(), InteractionPhase::Idle);

    app.handle_event(key('l'), &mut ctx, now);
    click(&mut app, &mut ctx, "e2", now);
    assert_eq!(app.controller().phase(), InteractionPhase::PieceSelected);
}

#[test]
fn test_promotion_key_cycles_choices() {
    let now = Instant::now();
    let mut ctx = AppContext::default();
    let mut app = app(AppOptions::default(), None);
    let mut seen = Vec::new();
    for _ in 0..4 {
        app.handle_event(key('p'), &mut ctx, now);
        seen.push(app.controller().promotion_choice());
    }
    assert_eq!(
        seen,
        vec![
            Some(PieceKind::Rook),
            Some(PieceKind::Bishop),
            Some(PieceKind::Knight),
            None
        ]
    );
}

#[test]
fn test_quit_keys() {
    let now = Instant::now();
    let mut ctx = AppContext::default();
    for event in [
        key('q'),
        Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
        Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
    ] {
        let mut app = app(AppOptions::default(), None);
        assert!(!app.should_quit());
        app.handle_event(event, &mut ctx, now);
        assert!(app.should_quit());
    }
}

#[test]
fn test_channel_position_replaces_board_and_drops_selection() {
    let now = Instant::now();
    let mut ctx = AppContext::default();
    let transport = MockTransport::new();
    let channel = Channel::new(transport.clone(), BackoffSchedule::default());
    let mut app = app(AppOptions::default(), Some(channel));
    draw(&mut app, &ctx, now);

    app.start(now);
    assert_eq!(app.channel_state(), Some(&ConnectionState::Connected));
    click(&mut app, &mut ctx, "e2", now);
    assert_eq!(app.controller().phase(), InteractionPhase::PieceSelected);

    transport.push_event(ChannelEvent::PositionChanged {
        fen: "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1".to_string(),
    });
    app.tick(&mut ctx, now);

    assert_eq!(app.controller().phase(), InteractionPhase::Idle);
    assert_eq!(app.controller().position().side_to_move(), PieceColor::Black);
}

#[test]
fn test_later_channel_position_wins_within_one_tick() {
    let now = Instant::now();
    let mut ctx = AppContext::default();
    let transport = MockTransport::new();
    let channel = Channel::new(transport.clone(), BackoffSchedule::default());
    let mut app = app(AppOptions::default(), Some(channel));
    draw(&mut app, &ctx, now);
    app.start(now);

    click(&mut app, &mut ctx, "g1", now);
    assert_eq!(app.controller().phase(), InteractionPhase::PieceSelected);

    let after_e4 = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
    let after_e5 = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2";
    transport.push_event(ChannelEvent::PositionChanged {
        fen: after_e4.to_string(),
    });
    transport.push_event(ChannelEvent::PositionChanged {
        fen: after_e5.to_string(),
    });
    app.tick(&mut ctx, now);

    assert_eq!(app.controller().position().fen(), after_e5);
    assert_eq!(app.controller().phase(), InteractionPhase::Idle);
    assert!(app.controller().selection().legal_destinations().is_empty());
    assert_eq!(app.controller().position().side_to_move(), PieceColor::White);
}

#[test]
fn test_bad_channel_position_becomes_an_error_notification() {
    let now = Instant::now();
    let mut ctx = AppContext::default();
    let transport = MockTransport::new();
    let channel = Channel::new(transport.clone(), BackoffSchedule::default());
    let mut app = app(AppOptions::default(), Some(channel));
    app.start(now);

    transport.push_event(ChannelEvent::PositionChanged {
        fen: "garbage".to_string(),
    });
    transport.push_event(ChannelEvent::Notice("opponent is thinking".to_string()));
    app.tick(&mut ctx, now);

    assert_eq!(app.controller().position().fen(), STARTING_FEN);
    let levels: Vec<_> = ctx.notifications.active(now).map(|n| n.level).collect();
    assert!(levels.contains(&NotificationLevel::Error));
    assert!(ctx
        .notifications
        .active(now)
        .any(|n| n.message == "opponent is thinking"));

    // Notifications expire on later ticks.
    app.tick(&mut ctx, now + Duration::from_secs(60));
    assert!(ctx.notifications.is_empty());
}

#[test]
fn test_shutdown_disconnects_channel() {
    let now = Instant::now();
    let transport = MockTransport::new();
    let channel = Channel::new(transport.clone(), BackoffSchedule::default());
    let mut app = app(AppOptions::default(), Some(channel));
    app.start(now);
    app.shutdown();
    assert_eq!(app.channel_state(), Some(&ConnectionState::Disconnected));
}
