//! Main Application
//!
//! The App drives a row of step status visuals:
//! - Event loop (keyboard, resize) on a crossterm `EventStream`
//! - Frame ticks at the configured frame rate
//! - Optional auto-play that flips random steps to a new status
//!
//! All animation state lives in the `StatusVisual` instances; the App only
//! forwards input, advances time and paints frames.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;
use ratatui::{Frame, Terminal};
use unicode_width::UnicodeWidthStr;

use status_visual_core::{Rgb, Status, StatusVisual, StatusVisualProps, StatusVisualSettings};

use crate::theme::{to_color, Theme};
use crate::widgets::{StatusVisualWidget, BADGE_HEIGHT, BADGE_WIDTH};

/// Horizontal space per step: badge plus connector
const SLOT_WIDTH: u16 = BADGE_WIDTH + 4;

/// Time between auto-play status flips
pub const AUTOPLAY_INTERVAL: Duration = Duration::from_millis(1200);

const TITLE: &str = "Setup";

const HELP: &str = "←/→ select  w p k s e status  space next  r reset  a autoplay  m motion  q quit";

/// Auto-play state
struct Autoplay {
    rng: StdRng,
    until_next: Duration,
}

/// Main application state
pub struct App {
    /// Is the app still running?
    running: bool,
    /// One visual per step, numbered from 1
    steps: Vec<StatusVisual>,
    /// Index of the selected step
    selected: usize,
    /// Random status flips, when enabled
    autoplay: Option<Autoplay>,
    /// Resolved settings (reduced motion is toggled at runtime)
    settings: StatusVisualSettings,
    theme: Theme,
    /// Instance color, resolved once from the color token
    step_color: Rgb,
    /// Most recent transition event, for the status line
    last_event: Option<String>,
    /// Last frame time (for animations)
    last_frame: Instant,
}

/// Pad `given` with `Waiting` up to `count` steps
#[must_use]
pub fn initial_statuses(count: usize, given: &[Status]) -> Vec<Status> {
    let mut statuses = given.to_vec();
    if statuses.len() < count {
        statuses.resize(count, Status::Waiting);
    }
    statuses
}

impl App {
    /// Create an App with one step per status
    pub fn new(statuses: &[Status], color: &str, settings: StatusVisualSettings) -> Self {
        let theme = Theme::dark();
        let step_color = theme.step_color(color);
        let steps = statuses
            .iter()
            .zip(1u32..)
            .map(|(status, number)| {
                StatusVisual::mount(StatusVisualProps::new(*status, color, number), &settings)
            })
            .collect();

        Self {
            running: true,
            steps,
            selected: 0,
            autoplay: None,
            settings,
            theme,
            step_color,
            last_event: None,
            last_frame: Instant::now(),
        }
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();
        let mut ticker = tokio::time::interval(self.settings.frame_interval());
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // Render initial frame immediately so user sees UI
        terminal.draw(|frame| self.draw(frame))?;

        while self.running {
            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.handle_key(key);
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => return Err(e.into()),
                        None => self.running = false,
                    }
                }

                _ = ticker.tick() => {}
            }

            let now = Instant::now();
            let delta = now - self.last_frame;
            self.last_frame = now;
            self.update(delta);

            terminal.draw(|frame| self.draw(frame))?;
        }

        Ok(())
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            // Quit
            KeyCode::Esc | KeyCode::Char('q') => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }

            // Selection
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.selected = (self.selected + 1).min(self.steps.len().saturating_sub(1));
            }

            // Status of the selected step
            KeyCode::Char('w') => self.set_selected_status(Status::Waiting),
            KeyCode::Char('p') => self.set_selected_status(Status::Prompting),
            KeyCode::Char('k') => self.set_selected_status(Status::Working),
            KeyCode::Char('s') => self.set_selected_status(Status::Success),
            KeyCode::Char('e') => self.set_selected_status(Status::Error),
            KeyCode::Char(' ') => {
                if let Some(step) = self.steps.get(self.selected) {
                    let next = step.status().next();
                    self.set_selected_status(next);
                }
            }

            KeyCode::Char('r') => {
                if let Some(step) = self.steps.get_mut(self.selected) {
                    step.reset();
                }
            }
            KeyCode::Char('a') => self.toggle_autoplay(),
            KeyCode::Char('m') => self.toggle_reduced_motion(),

            _ => {}
        }
    }

    fn set_selected_status(&mut self, status: Status) {
        if let Some(step) = self.steps.get_mut(self.selected) {
            step.set_status(status);
        }
    }

    /// Toggle auto-play with an entropy-seeded generator
    pub fn toggle_autoplay(&mut self) {
        if self.autoplay.take().is_some() {
            tracing::info!("Auto-play stopped");
        } else {
            self.start_autoplay(StdRng::from_entropy());
        }
    }

    /// Start auto-play with the given generator
    pub fn start_autoplay(&mut self, rng: StdRng) {
        tracing::info!("Auto-play started");
        self.autoplay = Some(Autoplay {
            rng,
            until_next: AUTOPLAY_INTERVAL,
        });
    }

    /// Toggle reduced motion on every step
    pub fn toggle_reduced_motion(&mut self) {
        self.settings.reduced_motion = !self.settings.reduced_motion;
        tracing::info!(reduced_motion = self.settings.reduced_motion, "Reduced motion toggled");
        for step in &mut self.steps {
            step.set_reduced_motion(self.settings.reduced_motion);
        }
    }

    /// Advance auto-play and animations by `delta`
    pub fn update(&mut self, delta: Duration) {
        let Self {
            autoplay, steps, ..
        } = self;

        if let Some(auto) = autoplay {
            if auto.until_next <= delta {
                auto.until_next = AUTOPLAY_INTERVAL;
                flip_random_step(&mut auto.rng, steps);
            } else {
                auto.until_next -= delta;
            }
        }

        for (i, step) in self.steps.iter_mut().enumerate() {
            step.tick(delta);
            for event in step.drain_events() {
                tracing::debug!(step = i + 1, ?event, "Transition event");
                self.last_event = Some(format!("step {}: {:?}", i + 1, event));
            }
        }
    }

    /// Paint the whole UI into a frame
    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        self.render(area, frame.buffer_mut());
    }

    /// Paint the whole UI into a buffer
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(to_color(self.theme.background)));
        if area.height == 0 {
            return;
        }

        let title = Style::default()
            .fg(to_color(self.theme.content))
            .add_modifier(Modifier::BOLD);
        buf.set_stringn(area.x + 2, area.y, TITLE, area.width.saturating_sub(2) as usize, title);

        let row_y = area.y + 2;
        let label_y = row_y + BADGE_HEIGHT;
        if label_y >= area.bottom() {
            return;
        }

        for (i, step) in self.steps.iter().enumerate() {
            let Some(x) = slot_x(area, i) else {
                break;
            };
            let frame = step.frame();
            StatusVisualWidget::new(&frame, &self.theme)
                .color(self.step_color)
                .render(Rect::new(x, row_y, BADGE_WIDTH, BADGE_HEIGHT), buf);

            if i + 1 < self.steps.len() && slot_x(area, i + 1).is_some() {
                self.render_connector(x + BADGE_WIDTH + 1, row_y + BADGE_HEIGHT / 2, buf);
            }
            self.render_label(step, x, label_y, i == self.selected, buf);
        }

        let muted = Style::default().fg(to_color(self.theme.content_muted));
        let info_y = label_y + 2;
        if info_y < area.bottom() {
            let info = format!(
                "step {}/{}  motion: {}  autoplay: {}",
                self.selected + 1,
                self.steps.len(),
                if self.settings.reduced_motion { "reduced" } else { "full" },
                if self.autoplay.is_some() { "on" } else { "off" },
            );
            buf.set_stringn(area.x + 2, info_y, &info, area.width.saturating_sub(2) as usize, muted);
        }
        if let Some(event) = &self.last_event {
            if info_y + 1 < area.bottom() {
                buf.set_stringn(area.x + 2, info_y + 1, event, area.width.saturating_sub(2) as usize, muted);
            }
        }
        if info_y + 2 < area.bottom() {
            buf.set_stringn(area.x + 2, area.bottom() - 1, HELP, area.width.saturating_sub(2) as usize, muted);
        }
    }

    fn render_connector(&self, x: u16, y: u16, buf: &mut Buffer) {
        let fg = to_color(self.theme.content_muted);
        for cx in x..x + SLOT_WIDTH - BADGE_WIDTH - 2 {
            if let Some(cell) = buf.cell_mut(Position::new(cx, y)) {
                cell.set_symbol("─").set_fg(fg);
            }
        }
    }

    fn render_label(&self, step: &StatusVisual, x: u16, y: u16, selected: bool, buf: &mut Buffer) {
        let label = format!("{} {}", step.props().number, step.status());
        let width = (label.width() as u16).min(BADGE_WIDTH);
        let style = if selected {
            Style::default()
                .fg(to_color(self.step_color))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(to_color(self.theme.content_muted))
        };
        buf.set_stringn(
            x + (BADGE_WIDTH - width) / 2,
            y,
            &label,
            BADGE_WIDTH as usize,
            style,
        );
    }

    /// Is the app still running?
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Index of the selected step
    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The step visuals
    #[must_use]
    pub fn steps(&self) -> &[StatusVisual] {
        &self.steps
    }

    /// Whether auto-play is on
    #[must_use]
    pub fn autoplay_enabled(&self) -> bool {
        self.autoplay.is_some()
    }

    /// Whether reduced motion is on
    #[must_use]
    pub fn reduced_motion(&self) -> bool {
        self.settings.reduced_motion
    }
}

/// Left edge of slot `index`, if it fits in `area`
fn slot_x(area: Rect, index: usize) -> Option<u16> {
    let offset = u16::try_from(index).ok()?.checked_mul(SLOT_WIDTH)?;
    let x = area.x.checked_add(2)?.checked_add(offset)?;
    (x.checked_add(BADGE_WIDTH)? <= area.right()).then_some(x)
}

/// Move one random step to a different random status
fn flip_random_step(rng: &mut StdRng, steps: &mut [StatusVisual]) {
    if steps.is_empty() {
        return;
    }
    let index = rng.gen_range(0..steps.len());
    let current = steps[index].status();
    let choices: Vec<Status> = Status::ALL
        .into_iter()
        .filter(|s| *s != current)
        .collect();
    if let Some(status) = choices.choose(rng) {
        tracing::debug!(step = index + 1, %status, "Auto-play flip");
        steps[index].set_status(*status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(statuses: &[Status]) -> App {
        App::new(statuses, "#818cf8", StatusVisualSettings::default())
    }

    #[test]
    fn test_initial_statuses_pads_with_waiting() {
        assert_eq!(
            initial_statuses(3, &[Status::Success]),
            vec![Status::Success, Status::Waiting, Status::Waiting]
        );
        assert_eq!(
            initial_statuses(1, &[Status::Error, Status::Working]),
            vec![Status::Error, Status::Working]
        );
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut app = app(&[Status::Waiting, Status::Waiting]);
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.selected(), 0);
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.selected(), 1);
    }

    #[test]
    fn test_status_keys_target_selected_step() {
        let mut app = app(&[Status::Waiting, Status::Waiting]);
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Char('k')));
        assert_eq!(app.steps()[0].status(), Status::Waiting);
        assert_eq!(app.steps()[1].status(), Status::Working);

        app.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(app.steps()[1].status(), Status::Success);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app(&[Status::Waiting]);
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.is_running());

        let mut app = self::app(&[Status::Waiting]);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.is_running());
    }

    #[test]
    fn test_reduced_motion_toggle_stops_animation() {
        let mut app = app(&[Status::Waiting]);
        app.handle_key(key(KeyCode::Char('s')));
        assert!(app.steps()[0].is_animating());

        app.handle_key(key(KeyCode::Char('m')));
        assert!(app.reduced_motion());
        assert!(!app.steps()[0].is_animating());
    }

    #[test]
    fn test_autoplay_flips_a_step_each_interval() {
        let mut app = app(&[Status::Waiting; 3]);
        app.start_autoplay(StdRng::seed_from_u64(7));

        let before: Vec<Status> = app.steps().iter().map(StatusVisual::status).collect();
        app.update(AUTOPLAY_INTERVAL / 2);
        let halfway: Vec<Status> = app.steps().iter().map(StatusVisual::status).collect();
        assert_eq!(before, halfway);

        app.update(AUTOPLAY_INTERVAL);
        let after: Vec<Status> = app.steps().iter().map(StatusVisual::status).collect();
        assert_ne!(before, after);
    }

    #[test]
    fn test_autoplay_key_toggles() {
        let mut app = app(&[Status::Waiting]);
        app.handle_key(key(KeyCode::Char('a')));
        assert!(app.autoplay_enabled());
        app.handle_key(key(KeyCode::Char('a')));
        assert!(!app.autoplay_enabled());
    }

    #[test]
    fn test_bad_color_token_resolves_once_to_accent() {
        let app = App::new(&[Status::Success], "not-a-color", StatusVisualSettings::default());
        assert_eq!(app.step_color, Theme::dark().accent);

        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);
        app.render(area, &mut buf);
        assert_eq!(app.step_color, Theme::dark().accent);
    }

    #[test]
    fn test_slot_x_stops_at_edge() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(slot_x(area, 0), Some(2));
        assert_eq!(slot_x(area, 1), Some(2 + SLOT_WIDTH));
        assert_eq!(slot_x(area, 2), None);
    }
}
