use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::TodoApi;
use crate::auth::Authenticator;
use crate::input::TextField;
use crate::models::{Field, Focus};
use crate::view::{ApiEvent, TodoView};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct App {
    api: Arc<dyn TodoApi>,
    session: Box<dyn Authenticator>,
    runtime: Handle,
    events_tx: UnboundedSender<ApiEvent>,
    events_rx: UnboundedReceiver<ApiEvent>,
    pub view: TodoView,
    pub focus: Focus,
    pub list_state: ListState,
    pub in_flight: usize,
    pub should_quit: bool,
}

impl App {
    /// Builds the view and starts the initial load.
    pub fn new(api: Arc<dyn TodoApi>, session: Box<dyn Authenticator>, runtime: Handle) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let mut app = App {
            api,
            session,
            runtime,
            events_tx,
            events_rx,
            view: TodoView::new(),
            focus: Focus::default(),
            list_state: ListState::default(),
            in_flight: 0,
            should_quit: false,
        };
        app.request_load();
        app
    }

    pub fn request_load(&mut self) {
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        self.in_flight += 1;
        self.runtime.spawn(async move {
            let result = api.list_todos().await;
            let _ = tx.send(ApiEvent::Loaded(result));
        });
    }

    /// Optimistically appends the form contents, then persists them in the background.
    pub fn submit(&mut self) {
        let Some(input) = self.view.submit() else {
            return;
        };
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        self.in_flight += 1;
        self.runtime.spawn(async move {
            let result = api.create_todo(input).await;
            let _ = tx.send(ApiEvent::Created(result));
        });
    }

    pub fn sign_out(&mut self) {
        self.session.sign_out();
        self.should_quit = true;
    }

    pub fn username(&self) -> &str {
        self.session.username()
    }

    /// Applies every completed request without blocking.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: ApiEvent) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.view.apply(event);
        if let Some(i) = self.list_state.selected() {
            if i >= self.view.todos.len() {
                self.list_state.select(self.view.todos.len().checked_sub(1));
            }
        }
    }

    pub fn next_item(&mut self) {
        if self.view.todos.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.view.todos.len() => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous_item(&mut self) {
        if self.view.todos.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.view.todos.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('r') if ctrl => self.request_load(),
            KeyCode::Char(_) if ctrl => {}
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.previous(),
            KeyCode::Down => self.next_item(),
            KeyCode::Up => self.previous_item(),
            KeyCode::Enter => match self.focus {
                Focus::SignOutButton => self.sign_out(),
                _ => self.submit(),
            },
            code => {
                if let Some(field) = self.focus.field() {
                    self.view.edit(field, |input| edit_text(input, code));
                }
            }
        }
    }
}

fn edit_text(input: &mut TextField, code: KeyCode) {
    match code {
        KeyCode::Char(c) => input.insert_char(c),
        KeyCode::Backspace => input.delete_char(),
        KeyCode::Delete => input.delete_forward(),
        KeyCode::Left => input.move_cursor_left(),
        KeyCode::Right => input.move_cursor_right(),
        KeyCode::Home => input.move_to_start(),
        KeyCode::End => input.move_to_end(),
        _ => {}
    }
}

pub fn run_tui(api: Arc<dyn TodoApi>, session: Box<dyn Authenticator>, runtime: Handle) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(api, session, runtime);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    loop_outcome(res)
}

/// Called once the terminal is restored, so the error reaches the shell intact.
fn loop_outcome(res: io::Result<()>) -> Result<()> {
    if let Err(err) = &res {
        log::error!("terminal loop failed: {err}");
    }
    res.context("terminal loop failed")
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }
        app.drain_events();

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    render_nav_bar(f, app, chunks[0]);
    render_todos(f, app, chunks[1]);

    let mut help = String::from("Tab: next • Enter: create • ↑/↓: scroll • Ctrl+R: reload • Esc: quit");
    if app.in_flight > 0 {
        help.push_str(&format!("  [syncing {}]", app.in_flight));
    }
    f.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}

fn button_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White).bg(Color::Black)
    }
}

fn render_nav_bar(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(12)].as_ref())
        .split(inner);

    let greeting = Paragraph::new(Line::from(Span::styled(
        format!("Hello {}", app.username()),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    f.render_widget(greeting, chunks[0]);

    let sign_out = Paragraph::new(" Sign out ")
        .alignment(Alignment::Center)
        .style(button_style(app.focus == Focus::SignOutButton));
    f.render_widget(sign_out, chunks[1]);
}

fn render_input(f: &mut Frame, input: &TextField, placeholder: &str, focused: bool, area: Rect) {
    let border_color = if focused { Color::Cyan } else { Color::Gray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);

    let text = if input.is_empty() && !focused {
        Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(input.value().to_string())
    };

    let cursor_col = u16::try_from(Span::raw(input.before_cursor()).width()).unwrap_or(u16::MAX);
    let offset = scroll_offset(cursor_col, inner.width);
    f.render_widget(Paragraph::new(text).block(block).scroll((0, offset)), area);

    if focused {
        f.set_cursor_position((inner.x + cursor_col - offset, inner.y));
    }
}

/// Columns to skip so the cursor stays inside a field `width` columns wide.
fn scroll_offset(cursor_col: u16, width: u16) -> u16 {
    cursor_col.saturating_sub(width.saturating_sub(1))
}

fn render_todos(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Amplify Todos");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(inner);

    render_input(
        f,
        app.view.form.field(Field::Name),
        "Name",
        app.focus == Focus::Name,
        chunks[0],
    );
    render_input(
        f,
        app.view.form.field(Field::Description),
        "Description",
        app.focus == Focus::Description,
        chunks[1],
    );

    let create = Paragraph::new("Create Todo")
        .alignment(Alignment::Center)
        .style(button_style(app.focus == Focus::CreateButton));
    f.render_widget(create, chunks[2]);

    let todos: Vec<ListItem> = app
        .view
        .todos
        .iter()
        .map(|todo| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", todo.name),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("- {}", todo.description)),
            ]))
        })
        .collect();

    let todos_list = List::new(todos)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(todos_list, chunks[4], &mut app.list_state);
}
