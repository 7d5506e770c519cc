//! Tank Blitz entry point
//!
//! Terminal frontend around the simulation: a blocking input thread feeds
//! key events over a channel, the main loop snapshots them into a
//! `TickInput` at 60 Hz, and a cell-scaled canvas maps the 800x600
//! playfield onto terminal cells. No game rules live here.

use std::collections::HashMap;
use std::io::{self, BufWriter, Write, stdout};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Print},
    terminal,
};

use tank_blitz::HighScores;
use tank_blitz::consts::{DEFAULT_SEED, FPS, SCREEN_HEIGHT, SCREEN_WIDTH};
use tank_blitz::sim::{GameEvent, GamePhase, GameState, Rect, TickInput, tick};
use tank_blitz::ui::{self, RenderSink, draw_frame};

/// Frame budget at the fixed simulation rate
const FRAME: Duration = Duration::from_micros(1_000_000 / FPS as u64);

/// Playfield pixels per terminal cell: 800x600 -> 40x30 cells
const CELL_PX: i32 = 20;

/// A key counts as "held" if its last press/repeat arrived within this many
/// frames. Covers terminals that never emit key-release events: OS
/// key-repeat refreshes the timestamp faster than the window expires.
const HOLD_WINDOW: u64 = 8;

// ── Input ─────────────────────────────────────────────────────────────────

/// Maps each held key to the frame it was last seen (press or repeat)
#[derive(Default)]
struct InputTracker {
    key_frame: HashMap<KeyCode, u64>,
}

impl InputTracker {
    fn held(&self, key: KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn held_any(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|&k| self.held(k, frame))
    }

    /// Drain pending key events into a `TickInput` snapshot for this frame.
    /// Returns None when the user asked to quit.
    fn poll(
        &mut self,
        rx: &mpsc::Receiver<Event>,
        phase: GamePhase,
        frame: u64,
    ) -> Option<TickInput> {
        let mut input = TickInput::default();
        let name_entry = phase == GamePhase::EnterName;

        while let Ok(Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        })) = rx.try_recv()
        {
            match kind {
                KeyEventKind::Press => {
                    self.key_frame.insert(code, frame);
                    input.any_key = true;

                    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                        return None;
                    }

                    if name_entry {
                        // Text capture takes over the keyboard
                        match code {
                            KeyCode::Enter => input.confirm = true,
                            KeyCode::Backspace => input.backspace = true,
                            KeyCode::Esc => input.cancel = true,
                            KeyCode::Char('r') | KeyCode::Char('R') => input.restart = true,
                            KeyCode::Char(c) => input.text.push(c),
                            _ => {}
                        }
                    } else {
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return None,
                            KeyCode::Char('p') | KeyCode::Char('P') => input.pause = true,
                            KeyCode::Char('r') | KeyCode::Char('R') => input.restart = true,
                            KeyCode::Char('h') | KeyCode::Char('H') => {
                                input.show_highscores = true;
                            }
                            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Enter => {
                                input.confirm = true;
                            }
                            _ => {}
                        }
                    }
                }
                // Repeat refreshes the hold window; release ends it early
                // (keyboard-enhancement terminals only)
                KeyEventKind::Repeat => {
                    self.key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    self.key_frame.remove(&code);
                }
            }
        }

        input.up = self.held_any(
            &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
            frame,
        );
        input.down = self.held_any(
            &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')],
            frame,
        );
        input.left = self.held_any(
            &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            frame,
        );
        input.right = self.held_any(
            &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
            frame,
        );
        input.fire = self.held(KeyCode::Char(' '), frame);

        Some(input)
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────

/// Cell buffer the sim draws into; flushed to the terminal once per frame
struct Canvas {
    cols: i32,
    rows: i32,
    cells: Vec<(char, ui::Color)>,
}

impl Canvas {
    fn new() -> Self {
        let cols = SCREEN_WIDTH / CELL_PX;
        let rows = SCREEN_HEIGHT / CELL_PX;
        Self {
            cols,
            rows,
            cells: vec![(' ', (0, 0, 0)); (cols * rows) as usize],
        }
    }

    fn clear(&mut self) {
        self.cells.fill((' ', (0, 0, 0)));
    }

    fn put(&mut self, col: i32, row: i32, ch: char, color: ui::Color) {
        if (0..self.cols).contains(&col) && (0..self.rows).contains(&row) {
            self.cells[(row * self.cols + col) as usize] = (ch, color);
        }
    }

    fn flush<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut last_color = None;
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row as u16))?;
            for col in 0..self.cols {
                let (ch, color) = self.cells[(row * self.cols + col) as usize];
                if last_color != Some(color) {
                    let (r, g, b) = color;
                    out.queue(style::SetForegroundColor(style::Color::Rgb { r, g, b }))?;
                    last_color = Some(color);
                }
                out.queue(Print(ch))?;
            }
        }
        out.queue(style::ResetColor)?;
        out.flush()
    }
}

impl RenderSink for Canvas {
    fn draw_rect(&mut self, rect: Rect, color: ui::Color) {
        let c0 = rect.x / CELL_PX;
        let c1 = (rect.right() - 1) / CELL_PX;
        let r0 = rect.y / CELL_PX;
        let r1 = (rect.bottom() - 1) / CELL_PX;
        for row in r0..=r1 {
            for col in c0..=c1 {
                self.put(col, row, '█', color);
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, _size: u32, color: ui::Color) {
        let row = y / CELL_PX;
        let mut col = x / CELL_PX;
        for ch in text.chars() {
            self.put(col, row, ch, color);
            col += 1;
        }
    }
}

// ── Event application ─────────────────────────────────────────────────────

fn apply_event(event: GameEvent, scores: &mut HighScores, path: &Path) {
    match event {
        GameEvent::SubmitScore { name, score } => {
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            match scores.add_entry(&name, score, timestamp) {
                Some(rank) => log::info!("{name} enters the table at #{rank} with {score}"),
                None => log::info!("{name} scored {score}, below the table"),
            }
            scores.save(path);
        }
        GameEvent::LevelStarted { index } => log::info!("level {} underway", index + 1),
        GameEvent::LevelCleared { index } => log::info!("level {} cleared", index + 1),
        GameEvent::EnemyDestroyed { score } => log::debug!("enemy down, score {score}"),
        GameEvent::PlayerHit { lives_left } => log::info!("player hit, {lives_left} lives left"),
        GameEvent::CampaignComplete { score } => {
            log::info!("campaign complete, final score {score}")
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> io::Result<()> {
    let mut state = GameState::new(DEFAULT_SEED);
    let scores_path = HighScores::default_path();
    let mut scores = HighScores::load(&scores_path);
    let mut canvas = Canvas::new();
    let mut tracker = InputTracker::default();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let Some(input) = tracker.poll(rx, state.phase, frame) else {
            return Ok(());
        };

        for event in tick(&mut state, &input) {
            apply_event(event, &mut scores, &scores_path);
        }

        canvas.clear();
        draw_frame(&state, &scores, &mut canvas);
        canvas.flush(out)?;

        // Frame-rate governor: the only blocking wait in the loop
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

fn main() -> io::Result<()> {
    env_logger::init();
    log::info!("tank blitz starting (seed {DEFAULT_SEED})");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for key-release events where the terminal supports them; others
    // fall back to the hold-window heuristic.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicated blocking reader so the game loop never waits on input
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
