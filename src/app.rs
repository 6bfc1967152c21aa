mod egg;
mod input;
mod ticker;
mod timer;

use std::{
    io::{self, Write},
    sync::mpsc,
    time::Duration,
};

use chrono::{Local, TimeDelta};
use egg::Egg;
use input::DurationInput;
use ratatui::{
    DefaultTerminal, Frame,
    buffer::Buffer,
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind},
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Style, Styled, Stylize},
    symbols::border,
    text::Span,
    widgets::{Block, Gauge, Paragraph, Widget},
};
use ticker::Event;
use timer::{Mode, TickOutcome, Timer, Transition, format_remaining};

use crate::config::Config;

const MIN_WIDTH: u16 = 30;
const MIN_HEIGHT: u16 = 20;
const FIELD_WIDTH: u16 = 16;
const BUTTON_WIDTH: u16 = 20;
// light grey, like a desktop text box
const FIELD_BORDER: Color = Color::Rgb(204, 204, 204);

pub struct EggTimer {
    exit: bool,
    config: Config,
    timer: Timer,
    input: DurationInput,
}

struct Areas {
    title: Rect,
    body: Rect,
    egg: Rect,
    field: Rect,
    status: Rect,
    gauge: Rect,
    button: Rect,
    hint: Rect,
}

impl EggTimer {
    pub fn new(config: Config) -> Self {
        Self {
            exit: false,
            timer: Timer::new(config.tick_rate),
            input: DurationInput::new(config.initial_input()),
            config,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        let (tx, rx) = mpsc::channel();
        let interval = Duration::from_secs_f64(1.0 / f64::from(self.config.tick_rate.max(1)));
        ticker::spawn_ticker(tx.clone(), interval);
        ticker::spawn_input(tx);

        terminal.draw(|frame| self.draw(frame))?;
        while !self.exit {
            let Ok(event) = rx.recv() else {
                break;
            };
            let area = terminal.get_frame().area();
            if self.handle_event(event, area)? {
                terminal.draw(|frame| self.draw(frame))?;
            }
        }

        tracing::info!(
            mode = ?self.timer.mode(),
            progress = self.timer.progress(),
            "egg timer closed"
        );
        Ok(())
    }

    /// Applies one event. Returns whether the screen needs a redraw.
    fn handle_event(&mut self, event: Event, area: Rect) -> io::Result<bool> {
        match event {
            Event::Tick(step) => Ok(self.on_tick(step)),
            Event::Key(key) => {
                self.handle_key(key);
                Ok(true)
            }
            Event::Mouse(mouse) => Ok(self.mouse_input(mouse, area)),
            Event::Resize => Ok(true),
            Event::Failed(e) => Err(e),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.exit = true,
            KeyCode::Esc | KeyCode::Char('q') => self.exit = true,
            KeyCode::Enter | KeyCode::Char(' ') => self.press(),
            KeyCode::Char(ch) if self.editable() => self.input.add_ch(ch),
            KeyCode::Backspace if self.editable() => {
                let _ = self.input.pop();
            }
            _ => (),
        }
    }

    fn mouse_input(&mut self, mouse: MouseEvent, area: Rect) -> bool {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || too_small(area) {
            return false;
        }

        let mouse_rect = Rect::new(mouse.column, mouse.row, 1, 1);
        if mouse_rect.intersects(layout(area).button) {
            self.press();
            return true;
        }
        false
    }

    fn on_tick(&mut self, step: f32) -> bool {
        match self.timer.tick() {
            TickOutcome::Ignored => false,
            TickOutcome::Advanced => {
                tracing::trace!(step, progress = self.timer.progress(), "tick");
                true
            }
            TickOutcome::Finished => {
                tracing::info!(
                    duration = self.timer.boil_duration(),
                    at = %Local::now().format("%H:%M:%S"),
                    "egg is done"
                );
                if self.config.bell {
                    ring_bell();
                }
                true
            }
        }
    }

    fn press(&mut self) {
        match self.timer.toggle(&self.input) {
            Transition::Started => tracing::info!(
                input = %self.input,
                duration = self.timer.boil_duration(),
                progress = self.timer.progress(),
                "boil started"
            ),
            Transition::Paused => {
                // keep what is left so the next start resumes from here
                self.input.set_text(&format_remaining(self.timer.remaining()));
                tracing::info!(
                    remaining = %self.input,
                    progress = self.timer.progress(),
                    "boil paused"
                );
            }
            Transition::Reset => tracing::info!(
                duration = self.timer.boil_duration(),
                "timer reset"
            ),
        }
    }

    fn editable(&self) -> bool {
        self.timer.mode() != Mode::Boiling
    }

    fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }

    fn body_title(&self) -> &'static str {
        match self.timer.mode() {
            Mode::Idle if self.timer.progress() > 0.0 => "╡ Paused ╞",
            Mode::Idle => "╡ Ready ╞",
            Mode::Boiling => "╡ Boiling ╞",
            Mode::Finished => "╡ Done ╞",
        }
    }

    fn ready_at(&self) -> Option<String> {
        let delta = TimeDelta::try_milliseconds((self.timer.remaining() * 1000.0) as i64)?;
        let at = Local::now().checked_add_signed(delta)?;
        Some(format!("ready at {}", at.format("%H:%M:%S")))
    }
}

impl Widget for &EggTimer {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        if too_small(area) {
            let area = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(0),
                    Constraint::Length(1),
                    Constraint::Min(0),
                ])
                .split(area);
            Paragraph::new("Please make the window bigger.")
                .centered()
                .render(area[1], buf);
            return;
        }

        let areas = layout(area);
        let mode = self.timer.mode();

        Paragraph::new(Span::from("Egg Timer").fg(Color::Yellow))
            .centered()
            .block(Block::bordered().border_set(border::DOUBLE))
            .render(areas.title, buf);

        Block::bordered()
            .border_set(border::DOUBLE)
            .title(self.body_title())
            .render(areas.body, buf);

        Egg {
            shape: &self.config.egg,
            progress: self.timer.progress(),
        }
        .render(areas.egg, buf);

        if mode == Mode::Boiling {
            Paragraph::new(format_remaining(self.timer.remaining()))
                .bold()
                .centered()
                .block(Block::bordered().title("left"))
                .render(areas.field, buf);
        } else {
            let block = Block::bordered()
                .border_style(Style::default().fg(FIELD_BORDER))
                .title("duration");
            if self.input.is_empty() {
                Paragraph::new("sec")
                    .set_style(Color::DarkGray)
                    .italic()
                    .centered()
                    .block(block)
                    .render(areas.field, buf);
            } else {
                Paragraph::new(self.input.to_string())
                    .centered()
                    .block(block)
                    .render(areas.field, buf);
            }
        }

        match mode {
            Mode::Boiling => {
                if let Some(text) = self.ready_at() {
                    Paragraph::new(text)
                        .set_style(Color::DarkGray)
                        .centered()
                        .render(areas.status, buf);
                }
            }
            Mode::Finished => Paragraph::new("done!")
                .set_style(Color::Yellow)
                .centered()
                .render(areas.status, buf),
            Mode::Idle => (),
        }

        Gauge::default()
            .gauge_style(Style::default().fg(Color::Yellow).bg(Color::DarkGray))
            .ratio(f64::from(self.timer.progress()).clamp(0.0, 1.0))
            .render(areas.gauge, buf);

        let color = match mode {
            Mode::Idle => Color::Green,
            Mode::Boiling => Color::LightRed,
            Mode::Finished => Color::Yellow,
        };
        button(self.timer.label(), color, areas.button, buf);

        Paragraph::new("Enter/click to start or stop, Esc/'q' to quit")
            .set_style(Color::DarkGray)
            .italic()
            .centered()
            .render(areas.hint, buf);
    }
}

fn too_small(area: Rect) -> bool {
    area.width < MIN_WIDTH || area.height < MIN_HEIGHT
}

fn layout(area: Rect) -> Areas {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Body
        ])
        .split(area);

    let main = vert[1].inner(Margin {
        horizontal: 1,
        vertical: 1,
    });

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Egg
            Constraint::Length(3), // Input / countdown
            Constraint::Length(1), // Status
            Constraint::Length(1), // Progress
            Constraint::Length(1), // ---
            Constraint::Length(3), // Button
            Constraint::Length(1), // Hint
        ])
        .split(main);

    Areas {
        title: vert[0],
        body: vert[1],
        egg: rows[0],
        field: centered(FIELD_WIDTH, rows[1]),
        status: rows[2],
        gauge: rows[3].inner(Margin {
            horizontal: 2,
            vertical: 0,
        }),
        button: centered(BUTTON_WIDTH, rows[5]),
        hint: rows[6],
    }
}

fn centered(width: u16, area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(area)[1]
}

fn button(text: &str, color: Color, area: Rect, buf: &mut Buffer) {
    Paragraph::new(text)
        .set_style(color)
        .bold()
        .centered()
        .block(Block::bordered().border_set(border::THICK))
        .render(area, buf);
}

fn ring_bell() {
    let mut stdout = io::stdout();
    let _ = stdout.write_all(b"\x07").and_then(|()| stdout.flush());
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend, crossterm::event::KeyEventState};

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 60,
        height: 40,
    };

    fn app() -> EggTimer {
        EggTimer::new(Config {
            bell: false,
            ..Default::default()
        })
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: ratatui::crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn type_text(app: &mut EggTimer, text: &str) {
        for ch in text.chars() {
            app.handle_event(key(KeyCode::Char(ch)), AREA).expect("key");
        }
    }

    fn ticks(app: &mut EggTimer, n: usize) {
        for _ in 0..n {
            app.handle_event(Event::Tick(ticker::TICK_INCREMENT), AREA)
                .expect("tick");
        }
    }

    fn screen(app: &EggTimer) -> String {
        let mut terminal = Terminal::new(TestBackend::new(AREA.width, AREA.height)).expect("terminal");
        terminal.draw(|frame| app.draw(frame)).expect("draw");
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn typing_then_enter_starts_boiling() {
        let mut app = app();
        type_text(&mut app, "60");
        app.handle_event(key(KeyCode::Enter), AREA).expect("enter");

        assert_eq!(app.timer.mode(), Mode::Boiling);
        assert_eq!(app.timer.boil_duration(), 60.0);
    }

    #[test]
    fn input_is_locked_while_boiling() {
        let mut app = app();
        type_text(&mut app, "60 9");
        assert_eq!(app.input.as_str(), "60");
        assert_eq!(app.timer.mode(), Mode::Boiling);

        app.handle_event(key(KeyCode::Backspace), AREA).expect("backspace");
        assert_eq!(app.input.as_str(), "60");
    }

    #[test]
    fn idle_ticks_skip_redraw() {
        let mut app = app();
        let redraw = app
            .handle_event(Event::Tick(ticker::TICK_INCREMENT), AREA)
            .expect("tick");
        assert!(!redraw);
    }

    #[test]
    fn pause_keeps_remaining_time_in_input() {
        let mut app = app();
        type_text(&mut app, "60 ");
        ticks(&mut app, 25);
        app.handle_event(key(KeyCode::Char(' ')), AREA).expect("pause");

        assert_eq!(app.timer.mode(), Mode::Idle);
        assert_eq!(app.input.as_str(), "59.0");

        // resuming keeps the same total
        app.handle_event(key(KeyCode::Enter), AREA).expect("resume");
        assert!((app.timer.boil_duration() - 60.0).abs() < 1e-2);
    }

    #[test]
    fn click_on_button_toggles() {
        let mut app = app();
        type_text(&mut app, "5");
        let button = layout(AREA).button;

        assert!(!app.handle_event(click(0, 0), AREA).expect("click"));
        assert_eq!(app.timer.mode(), Mode::Idle);

        assert!(
            app.handle_event(click(button.x + button.width / 2, button.y + 1), AREA)
                .expect("click")
        );
        assert_eq!(app.timer.mode(), Mode::Boiling);
    }

    #[test]
    fn quits_on_q_and_ctrl_c() {
        let mut app = app();
        app.handle_event(key(KeyCode::Char('q')), AREA).expect("q");
        assert!(app.exit);

        let mut app = self::app();
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        app.handle_event(ctrl_c, AREA).expect("ctrl-c");
        assert!(app.exit);
    }

    #[test]
    fn input_failure_ends_the_loop() {
        let mut app = app();
        let failed = Event::Failed(io::Error::other("terminal gone"));
        assert!(app.handle_event(failed, AREA).is_err());
    }

    #[test]
    fn renders_each_phase() {
        let mut app = app();
        let idle = screen(&app);
        assert!(idle.contains("Egg Timer"));
        assert!(idle.contains("Start"));
        assert!(idle.contains("Ready"));

        type_text(&mut app, "60 ");
        ticks(&mut app, 25);
        let boiling = screen(&app);
        assert!(boiling.contains("Stop"));
        assert!(boiling.contains("59.0"));
        assert!(boiling.contains("ready at"));

        ticks(&mut app, 1600);
        let finished = screen(&app);
        assert!(finished.contains("Finished"));
        assert!(finished.contains("done!"));
    }

    #[test]
    fn minimum_size_renders_the_timer() {
        let area = Rect::new(0, 0, MIN_WIDTH, MIN_HEIGHT);
        let mut buf = Buffer::empty(area);
        (&app()).render(area, &mut buf);

        let text: String = buf.content.iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Start"));
        assert!(!text.contains("Please make the window bigger."));
    }

    #[test]
    fn small_terminal_asks_for_more_room() {
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        (&app()).render(area, &mut buf);

        let text: String = buf.content.iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Please make the window bigger."));
    }
}
