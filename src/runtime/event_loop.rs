use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{Action, App, Prompt};
use crate::config;
use crate::controller::{ControllerEvent, PlaybackController};
use crate::mpris::ControlCmd;
use crate::runtime::import_worker::{ImportWorker, expand_home};
use crate::ui;

/// Longest wait for terminal input while no progress poll is due, so MPRIS
/// commands and finished imports are still picked up promptly.
const IDLE_WAIT: Duration = Duration::from_millis(100);

/// Everything the loop reads from besides the terminal.
pub struct Inputs<'a> {
    pub control_rx: &'a mpsc::Receiver<ControlCmd>,
    pub events: &'a mpsc::Receiver<ControllerEvent>,
    pub imports: &'a ImportWorker,
}

/// Main terminal event loop: handles input, UI drawing, remote commands,
/// finished imports and the controller's progress poll. Returns `Ok(())`
/// when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut PlaybackController,
    inputs: Inputs<'_>,
) -> Result<(), Box<dyn std::error::Error>> {
    let home = std::env::var_os("HOME").map(PathBuf::from);

    loop {
        while let Ok(cmd) = inputs.control_rx.try_recv() {
            if handle_control_cmd(cmd, controller) {
                return Ok(());
            }
        }

        for result in inputs.imports.finished() {
            controller.accept_import(result);
        }

        controller.tick(Instant::now());

        for ev in inputs.events.try_iter() {
            match ev {
                ControllerEvent::TrackChanged(_) => app.follow(controller.current_index()),
                ControllerEvent::PlaylistChanged => app.clamp(controller.playlist().len()),
                ControllerEvent::Error(msg) => log::debug!("shown in status: {msg}"),
                ControllerEvent::PlaybackChanged { .. } | ControllerEvent::Progress(_) => {}
            }
        }

        terminal.draw(|f| ui::draw(f, app, controller, &settings.ui, &settings.controls))?;

        let wait = controller
            .next_tick_in(Instant::now())
            .map_or(IDLE_WAIT, |d| d.min(IDLE_WAIT));
        if event::poll(wait)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let Some(action) = app.on_key(key, controller.playlist().len()) else {
                    continue;
                };
                let quit = apply_action(action, settings, app, controller, inputs.imports, home.as_deref());
                if quit {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply a remote command. Returns true when the app should exit.
fn handle_control_cmd(cmd: ControlCmd, controller: &mut PlaybackController) -> bool {
    log::debug!("remote command {cmd:?}");
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => {
            if !controller.is_playing() {
                controller.toggle_play_pause();
            }
        }
        ControlCmd::Pause | ControlCmd::Stop => controller.pause(),
        ControlCmd::PlayPause => controller.toggle_play_pause(),
        ControlCmd::Next => controller.advance_next(),
        ControlCmd::Prev => controller.advance_previous(),
        ControlCmd::Seek(offset) => controller.seek(offset_by_micros(controller.current_time(), offset)),
        ControlCmd::SetPosition(position) => {
            // Negative positions are invalid and get ignored.
            if let Ok(micros) = u64::try_from(position) {
                controller.seek(Duration::from_micros(micros));
            }
        }
        ControlCmd::System(event) => controller.handle_system_event(event),
    }
    false
}

fn apply_action(
    action: Action,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut PlaybackController,
    imports: &ImportWorker,
    home: Option<&std::path::Path>,
) -> bool {
    let id_at = |controller: &PlaybackController, index: usize| {
        controller.playlist().get(index).map(|t| t.id())
    };
    let step = i64::try_from(settings.controls.seek_seconds).unwrap_or(i64::MAX);

    match action {
        Action::Quit => return true,
        Action::PlaySelected => {
            if let Some(id) = id_at(controller, app.selected) {
                controller.play_track(id);
            }
        }
        Action::PlayPause => controller.toggle_play_pause(),
        Action::Next => controller.advance_next(),
        Action::Prev => controller.advance_previous(),
        Action::SeekForward => controller.seek_by(step),
        Action::SeekBack => controller.seek_by(-step),
        Action::Reorder { from, to } => controller.reorder(&[from], to),
        Action::Delete(index) => {
            if let Some(id) = id_at(controller, index) {
                controller.delete_track(id);
            }
            app.clamp(controller.playlist().len());
        }
        Action::BeginRename(index) => {
            if let Some(track) = controller.playlist().get(index) {
                app.open_prompt(Prompt::Rename(track.id()), &track.title);
            }
        }
        Action::Import(input) => imports.submit(expand_home(&input, home)),
        Action::Rename { id, title } => controller.rename_track(id, &title),
        Action::CyclePlayMode => controller.cycle_play_mode(),
        Action::ClearError => controller.clear_error(),
    }
    false
}

/// `current` moved by a signed microsecond offset, floored at zero.
fn offset_by_micros(current: Duration, offset: i64) -> Duration {
    let delta = Duration::from_micros(offset.unsigned_abs());
    if offset >= 0 {
        current.saturating_add(delta)
    } else {
        current.saturating_sub(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_by_micros_moves_both_ways_and_floors_at_zero() {
        let now = Duration::from_secs(10);
        assert_eq!(offset_by_micros(now, 5_000_000), Duration::from_secs(15));
        assert_eq!(offset_by_micros(now, -4_000_000), Duration::from_secs(6));
        assert_eq!(offset_by_micros(now, -60_000_000), Duration::ZERO);
        assert_eq!(offset_by_micros(now, i64::MIN), Duration::ZERO);
    }
}
