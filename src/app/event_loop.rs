use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, ToastLevel, update};
use crate::list::{Debouncer, FaqList};
use crate::watcher::FileWatcher;

const RESIZE_DEBOUNCE_MS: u64 = 100;
const IDLE_POLL_MS: u64 = 250;

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - faqview requires an interactive terminal")?;
        let size = terminal.size()?;

        let mut list = FaqList::with_options(std::mem::take(&mut self.faq), self.options.clone());
        let mut unknown_category = None;
        if let Some(category) = &self.initial_category
            && !list.select_category(category)
        {
            unknown_category = Some(category.clone());
        }

        let mut model = Model::new(self.file_path.clone(), list, (size.width, size.height));
        model.watch_enabled = self.watch_enabled;
        model.mouse_enabled = self.mouse_enabled;
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        if let Some(category) = unknown_category {
            model.show_toast(
                ToastLevel::Warning,
                format!("Unknown category '{category}', showing all"),
            );
        }

        let result = Self::event_loop(&mut terminal, &mut model);

        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = Debouncer::new(RESIZE_DEBOUNCE_MS);
        let mut file_watcher = if model.watch_enabled {
            match Self::make_file_watcher(&model.file_path) {
                Ok(watcher) => Some(watcher),
                Err(err) => {
                    model.watch_enabled = false;
                    model.show_toast(ToastLevel::Warning, format!("Watch unavailable: {err}"));
                    tracing::warn!(
                        path = %model.file_path.display(),
                        error = %err,
                        "failed to start watcher"
                    );
                    None
                }
            }
        } else {
            None
        };
        let mut needs_render = true;
        let mut mouse_capture_enabled = false;

        loop {
            if model.mouse_enabled != mouse_capture_enabled {
                if model.mouse_enabled {
                    execute!(stdout(), EnableMouseCapture)?;
                } else {
                    execute!(stdout(), DisableMouseCapture)?;
                }
                mouse_capture_enabled = model.mouse_enabled;
            }

            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let now_ms = elapsed_ms(start);
            model.clock_ms = now_ms;

            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                Self::dispatch(model, &mut file_watcher, Message::Resize(width, height));
                needs_render = true;
            }

            if model
                .list
                .next_deadline()
                .is_some_and(|deadline| deadline <= now_ms)
            {
                Self::dispatch(model, &mut file_watcher, Message::Tick(now_ms));
                needs_render = true;
            }

            if model.watch_enabled
                && file_watcher
                    .as_mut()
                    .is_some_and(FileWatcher::take_change_ready)
            {
                Self::dispatch(model, &mut file_watcher, Message::FileChanged);
                needs_render = true;
            }

            let poll_ms = if needs_render {
                0
            } else {
                next_poll_ms(model, &resize_debouncer, file_watcher.as_ref(), now_ms)
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                // Refresh timestamp after poll wait so debouncers use accurate times.
                let event_ms = elapsed_ms(start);
                model.clock_ms = event_ms;
                if let Some(msg) =
                    Self::handle_event(&event::read()?, model, event_ms, &mut resize_debouncer)
                {
                    Self::dispatch(model, &mut file_watcher, msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    let drain_ms = elapsed_ms(start);
                    model.clock_ms = drain_ms;
                    if let Some(msg) =
                        Self::handle_event(&event::read()?, model, drain_ms, &mut resize_debouncer)
                    {
                        Self::dispatch(model, &mut file_watcher, msg);
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        if mouse_capture_enabled {
            let _ = execute!(stdout(), DisableMouseCapture);
        }
        Ok(())
    }

    fn dispatch(model: &mut Model, file_watcher: &mut Option<FileWatcher>, msg: Message) {
        tracing::debug!(?msg, "message");
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        Self::handle_message_side_effects(model, file_watcher, &side_msg);
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// How long the loop may block waiting for input before a timer is due.
fn next_poll_ms(
    model: &Model,
    resize_debouncer: &Debouncer<(u16, u16)>,
    file_watcher: Option<&FileWatcher>,
    now_ms: u64,
) -> u64 {
    let mut wait = IDLE_POLL_MS;
    if let Some(deadline) = model.list.next_deadline() {
        wait = wait.min(deadline.saturating_sub(now_ms));
    }
    if let Some(deadline) = resize_debouncer.deadline() {
        wait = wait.min(deadline.saturating_sub(now_ms));
    }
    if let Some(remaining) = file_watcher.and_then(FileWatcher::time_until_ready) {
        wait = wait.min(duration_ms(remaining));
    }
    if let Some(remaining) = model.toast_remaining(Instant::now()) {
        wait = wait.min(duration_ms(remaining));
    }
    wait
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
