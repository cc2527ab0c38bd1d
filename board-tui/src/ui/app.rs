//! The board's owner: routes terminal input into the controller, feeds it
//! positions from the real-time channel and draws everything.

use std::io;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use anyhow::Context;
use chess::{PieceKind, RulesOracle};
use chess_client::{Channel, ChannelEvent, ConnectionState, Transport};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::board::{square_at, BoardController, ClickOutcome, Orientation};
use crate::context::{AppContext, Notification, NotificationLevel};
use crate::ui::layout::BoardLayout;
use crate::ui::theme::{Theme, ThemeName};
use crate::ui::widgets::{BoardWidget, SidePanel};

/// How long to wait for terminal input before ticking again.
const TICK: Duration = Duration::from_millis(50);
const SIDE_PANEL_WIDTH: u16 = 36;

#[derive(Debug, Clone, Copy, Default)]
pub struct AppOptions {
    pub orientation: Orientation,
    pub locked: bool,
    pub theme: ThemeName,
}

pub struct App<O: RulesOracle, T: Transport> {
    controller: BoardController<O>,
    orientation: Orientation,
    locked: bool,
    theme: Theme,
    moves: Vec<String>,
    played: Receiver<String>,
    channel: Option<Channel<T>>,
    channel_events: Receiver<ChannelEvent>,
    /// Grid of the last drawn frame, used to hit-test the mouse.
    board_layout: Option<BoardLayout>,
    should_quit: bool,
}

impl<O: RulesOracle, T: Transport> App<O, T> {
    /// Take ownership of `controller` and, if given, `channel`. The app
    /// installs its own move callback on the controller.
    pub fn new(controller: BoardController<O>, options: AppOptions, channel: Option<Channel<T>>) -> Self {
        let (played_tx, played) = mpsc::channel();
        let controller = controller.with_on_move(move |notation| {
            let _ = played_tx.send(notation.to_string());
        });

        let (event_tx, channel_events) = mpsc::channel();
        let mut channel = channel;
        if let Some(channel) = channel.as_mut() {
            channel.subscribe(move |event| {
                let _ = event_tx.send(event.clone());
            });
        }

        Self {
            controller,
            orientation: options.orientation,
            locked: options.locked,
            theme: Theme::from_name(options.theme),
            moves: Vec::new(),
            played,
            channel,
            channel_events,
            board_layout: None,
            should_quit: false,
        }
    }

    pub fn controller(&self) -> &BoardController<O> {
        &self.controller
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Moves played locally, in notation.
    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Board grid of the last drawn frame.
    pub fn board_layout(&self) -> Option<BoardLayout> {
        self.board_layout
    }

    pub fn channel_state(&self) -> Option<&ConnectionState> {
        self.channel.as_ref().map(Channel::state)
    }

    pub fn start(&mut self, now: Instant) {
        if let Some(channel) = self.channel.as_mut() {
            channel.connect(now);
        }
    }

    pub fn shutdown(&mut self) {
        if let Some(channel) = self.channel.as_mut() {
            channel.disconnect();
        }
    }

    pub fn handle_event(&mut self, event: Event, ctx: &mut AppContext, now: Instant) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse, ctx, now),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Char('f') => {
                self.orientation = self.orientation.flipped();
                self.controller.leave();
                tracing::debug!(orientation = ?self.orientation, "Board flipped");
            }
            KeyCode::Char('l') => {
                self.locked = !self.locked;
                tracing::debug!(locked = self.locked, "Board input lock toggled");
            }
            KeyCode::Char('p') => {
                let next = match self.controller.promotion_choice() {
                    None | Some(PieceKind::Queen) => Some(PieceKind::Rook),
                    Some(PieceKind::Rook) => Some(PieceKind::Bishop),
                    Some(PieceKind::Bishop) => Some(PieceKind::Knight),
                    Some(_) => None,
                };
                self.controller.set_promotion_choice(next);
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, ctx: &mut AppContext, now: Instant) {
        let Some(layout) = self.board_layout else {
            return;
        };
        let square = layout
            .cell_at(mouse.column, mouse.row)
            .map(|(row, col)| square_at(row, col, self.orientation));

        match (mouse.kind, square) {
            (MouseEventKind::Down(MouseButton::Left), Some(square)) => {
                if let ClickOutcome::Rejected(e) = self.controller.click(square, !self.locked) {
                    ctx.notifications
                        .push(NotificationLevel::Warning, e.to_string(), now);
                }
            }
            (MouseEventKind::Moved | MouseEventKind::Drag(_), Some(square)) => {
                self.controller.hover(square)
            }
            (MouseEventKind::Moved | MouseEventKind::Drag(_), None) => self.controller.leave(),
            _ => {}
        }
    }

    /// Drive the channel, apply what it delivered and collect played moves.
    pub fn tick(&mut self, ctx: &mut AppContext, now: Instant) {
        if let Some(channel) = self.channel.as_mut() {
            channel.poll(now);
        }
        while let Ok(event) = self.channel_events.try_recv() {
            self.apply_channel_event(event, ctx, now);
        }
        while let Ok(notation) = self.played.try_recv() {
            self.moves.push(notation);
        }
        ctx.notifications.prune(now);
    }

    fn apply_channel_event(&mut self, event: ChannelEvent, ctx: &mut AppContext, now: Instant) {
        match event {
            ChannelEvent::PositionChanged { fen } => {
                if let Err(e) = self.controller.set_position(&fen) {
                    ctx.notifications
                        .push(NotificationLevel::Error, e.to_string(), now);
                }
            }
            ChannelEvent::Notice(message) => {
                ctx.notifications.push(NotificationLevel::Info, message, now)
            }
            ChannelEvent::StateChanged(state) => {
                let level = match state {
                    ConnectionState::Connected => NotificationLevel::Info,
                    _ => NotificationLevel::Warning,
                };
                ctx.notifications
                    .push(level, format!("Channel {}", state.label()), now);
            }
        }
    }

    pub fn draw(&mut self, frame: &mut Frame, ctx: &AppContext, now: Instant) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(SIDE_PANEL_WIDTH)])
            .split(frame.area());

        let board = BoardWidget::new(&self.controller, self.orientation, &self.theme)
            .locked(self.locked);
        let layout = BoardLayout::compute(board.block().inner(chunks[0]));
        frame.render_widget(board, chunks[0]);
        self.board_layout = Some(layout);

        let notifications: Vec<&Notification> = ctx.notifications.active(now).collect();
        let position = self.controller.position();
        let panel = SidePanel {
            side_to_move: position.side_to_move(),
            phase: self.controller.phase(),
            orientation: self.orientation,
            locked: self.locked,
            promotion: self.controller.promotion_choice(),
            connection: self.channel.as_ref().map(|c| c.state().label()),
            moves: &self.moves,
            notifications: &notifications,
            theme: &self.theme,
        };
        frame.render_widget(panel, chunks[1]);
    }
}

/// Take over the terminal and run `app` until the user quits.
pub fn run_app<O: RulesOracle, T: Transport>(
    app: &mut App<O, T>,
    ctx: &mut AppContext,
) -> anyhow::Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, app, ctx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop<B: Backend, O: RulesOracle, T: Transport>(
    terminal: &mut Terminal<B>,
    app: &mut App<O, T>,
    ctx: &mut AppContext,
) -> anyhow::Result<()> {
    app.start(Instant::now());
    while !app.should_quit() {
        let now = Instant::now();
        app.tick(ctx, now);
        terminal.draw(|frame| app.draw(frame, ctx, now))?;

        if event::poll(TICK)? {
            let event = event::read()?;
            app.handle_event(event, ctx, Instant::now());
        }
    }
    app.shutdown();
    Ok(())
}
