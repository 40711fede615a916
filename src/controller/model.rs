//! `PlaybackController`: the owner of the playlist and of playback state.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;

use crate::audio::{AudioEngine, AudioHandle, SystemEvent};
use crate::error::PlayerError;
use crate::library::{self, Track};
use crate::store::PlaylistStore;

use super::events::{ControllerEvent, NowPlaying, NowPlayingSink};
use super::poll::ProgressPoll;
use super::reorder::move_items;
use super::sequencing::{PlayMode, next_index, previous_index};

/// Construction-time knobs for a `PlaybackController`.
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Where imported files are copied to.
    pub music_dir: PathBuf,
    /// Extensions accepted on import.
    pub extensions: Vec<String>,
    pub poll_interval: Duration,
    pub play_mode: PlayMode,
}

pub struct PlaybackController {
    playlist: Vec<Track>,
    store: PlaylistStore,
    engine: Box<dyn AudioEngine>,
    now_playing: Box<dyn NowPlayingSink>,

    handle: Option<Box<dyn AudioHandle>>,
    current: Option<Uuid>,
    is_playing: bool,
    current_time: Duration,
    duration: Duration,
    play_mode: PlayMode,
    last_error: Option<PlayerError>,

    poll: ProgressPoll,
    music_dir: PathBuf,
    extensions: Vec<String>,
    rng: StdRng,
    subscribers: Vec<Sender<ControllerEvent>>,
}

impl PlaybackController {
    /// Build a controller and restore the saved playlist from `store`.
    pub fn new(
        store: PlaylistStore,
        engine: Box<dyn AudioEngine>,
        now_playing: Box<dyn NowPlayingSink>,
        options: ControllerOptions,
    ) -> Self {
        let playlist = store.load();
        log::info!("restored playlist with {} tracks", playlist.len());

        Self {
            playlist,
            store,
            engine,
            now_playing,
            handle: None,
            current: None,
            is_playing: false,
            current_time: Duration::ZERO,
            duration: Duration::ZERO,
            play_mode: options.play_mode,
            last_error: None,
            poll: ProgressPoll::new(options.poll_interval),
            music_dir: options.music_dir,
            extensions: options.extensions,
            rng: StdRng::from_entropy(),
            subscribers: Vec::new(),
        }
    }

    // ----- observation -----

    pub fn playlist(&self) -> &[Track] {
        &self.playlist
    }

    pub fn track(&self, id: Uuid) -> Option<&Track> {
        self.playlist.iter().find(|t| t.id() == id)
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|id| self.track(id))
    }

    pub fn current_index(&self) -> Option<usize> {
        let id = self.current?;
        self.index_of(id)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn current_time(&self) -> Duration {
        self.current_time
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn play_mode(&self) -> PlayMode {
        self.play_mode
    }

    pub fn last_error(&self) -> Option<&PlayerError> {
        self.last_error.as_ref()
    }

    pub fn music_dir(&self) -> &Path {
        &self.music_dir
    }

    /// Register for change notifications. Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<ControllerEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// What the now-playing surface should currently show.
    pub fn now_playing(&self) -> Option<NowPlaying> {
        self.current_track().map(|track| NowPlaying {
            title: track.title.clone(),
            elapsed: self.current_time,
            duration: self.duration,
            playback_rate: if self.is_playing { 1.0 } else { 0.0 },
        })
    }

    // ----- transport -----

    /// Open the track with `id`, paused at zero.
    ///
    /// A missing file leaves everything as it was. A file the engine cannot
    /// decode stops playback and leaves no track loaded.
    pub fn load_track(&mut self, id: Uuid) {
        if let Err(e) = self.load(id) {
            self.report(e);
        }
    }

    fn load(&mut self, id: Uuid) -> Result<(), PlayerError> {
        let Some(track) = self.track(id).cloned() else {
            log::debug!("load of unknown track {id} ignored");
            return Ok(());
        };

        if !track.exists() {
            return Err(PlayerError::FileMissing {
                path: track.location().to_path_buf(),
                title: track.title,
            });
        }

        self.release_handle();

        match self.engine.open(track.location()) {
            Ok(handle) => {
                self.duration = handle.duration();
                self.current_time = Duration::ZERO;
                self.handle = Some(handle);
                self.current = Some(id);
                self.last_error = None;
                log::info!("loaded {} ({:?})", track.title, self.duration);
                self.emit(ControllerEvent::TrackChanged(Some(id)));
                self.publish();
                Ok(())
            }
            Err(source) => {
                self.clear_current();
                Err(PlayerError::DecodeFailure {
                    title: track.title,
                    source,
                })
            }
        }
    }

    pub fn play(&mut self) {
        let Some(handle) = self.handle.as_mut() else {
            self.report(PlayerError::NoTrackLoaded);
            return;
        };
        handle.play();
        self.is_playing = true;
        self.poll.start(Instant::now());
        self.emit(ControllerEvent::PlaybackChanged { playing: true });
        self.publish();
    }

    pub fn pause(&mut self) {
        if let Some(handle) = self.handle.as_mut() {
            handle.pause();
        }
        self.poll.stop();
        if self.is_playing {
            self.is_playing = false;
            self.emit(ControllerEvent::PlaybackChanged { playing: false });
        }
        self.publish();
    }

    /// Play/pause key: pauses while playing, resumes a loaded track, and
    /// starts the playlist from the top when nothing is loaded yet.
    pub fn toggle_play_pause(&mut self) {
        if self.is_playing {
            self.pause();
        } else if self.handle.is_some() || self.playlist.is_empty() {
            self.play();
        } else {
            self.advance_next();
        }
    }

    /// Select-to-play. Picking the track that is already loaded resumes it
    /// rather than starting it over.
    pub fn play_track(&mut self, id: Uuid) {
        if self.current == Some(id) && self.handle.is_some() {
            if !self.is_playing {
                self.play();
            }
            return;
        }
        match self.load(id) {
            Ok(()) if self.current == Some(id) => self.play(),
            Ok(()) => {}
            Err(e) => self.report(e),
        }
    }

    /// Move the playhead to `to`, clamped to the track length.
    pub fn seek(&mut self, to: Duration) {
        let duration = self.duration;
        if let Some(handle) = self.handle.as_mut() {
            let target = if duration.is_zero() { to } else { to.min(duration) };
            match handle.seek(target) {
                Ok(()) => self.current_time = target,
                Err(e) => {
                    log::warn!("{e}");
                    self.current_time = handle.position();
                }
            }
            self.emit(ControllerEvent::Progress(self.current_time));
        }
        self.publish();
    }

    /// Seek relative to the current position; negative values go back.
    pub fn seek_by(&mut self, delta_secs: i64) {
        let target = (self.current_time.as_secs_f64() + delta_secs as f64).max(0.0);
        self.seek(Duration::from_secs_f64(target));
    }

    pub fn advance_next(&mut self) {
        if self.playlist.is_empty() {
            return;
        }
        let Some(current) = self.current_index() else {
            self.start_at(0);
            return;
        };

        match next_index(self.play_mode, current, self.playlist.len(), &mut self.rng) {
            Some(next) => self.start_at(next),
            None => {
                log::debug!("end of playlist");
                self.pause();
            }
        }
    }

    pub fn advance_previous(&mut self) {
        if self.playlist.is_empty() {
            return;
        }
        let Some(current) = self.current_index() else {
            return;
        };
        let previous = previous_index(self.play_mode, current, self.playlist.len(), &mut self.rng);
        self.start_at(previous);
    }

    /// Load and play the track at `index`. If it cannot be loaded nothing
    /// new is playing, so playback pauses and the poll stops; otherwise a
    /// played-out track would be advanced from again on every tick.
    fn start_at(&mut self, index: usize) {
        let id = self.playlist[index].id();
        match self.load(id) {
            Ok(()) => self.play(),
            Err(e) => {
                self.pause();
                self.report(e);
            }
        }
    }

    pub fn set_play_mode(&mut self, mode: PlayMode) {
        self.play_mode = mode;
    }

    pub fn cycle_play_mode(&mut self) {
        self.play_mode = self.play_mode.cycle();
    }

    /// The system took the audio away (interruption, device unplugged).
    pub fn handle_system_event(&mut self, event: SystemEvent) {
        log::info!("pausing on {event:?}");
        self.pause();
    }

    /// Run the progress poll if it is due: refresh the elapsed time and move
    /// on to the next track once the current one has played out.
    pub fn tick(&mut self, now: Instant) {
        if !self.poll.due(now) {
            return;
        }
        let Some(handle) = self.handle.as_ref() else {
            self.poll.stop();
            return;
        };

        let position = handle.position();
        let done = handle.finished() || (!self.duration.is_zero() && position >= self.duration);

        self.current_time = position;
        self.emit(ControllerEvent::Progress(position));
        self.publish();

        if done {
            self.advance_next();
        }
    }

    /// How long the owner may sleep before the next `tick` is due.
    pub fn next_tick_in(&self, now: Instant) -> Option<Duration> {
        self.poll.time_until_due(now)
    }

    // ----- playlist -----

    /// Copy `source` into the music directory and append it.
    pub fn import_track(&mut self, source: &Path) {
        let result = library::copy_into(&self.music_dir, source, &self.extensions);
        self.accept_import(result);
    }

    /// Apply the outcome of a copy done elsewhere (see `import_track`).
    pub fn accept_import(&mut self, result: Result<Track, PlayerError>) {
        match result {
            Ok(track) => {
                log::info!("added {}", track.title);
                self.playlist.push(track);
                self.persist();
            }
            Err(e) => self.report(e),
        }
    }

    /// Remove a track and its file. The entry goes away even when the file
    /// cannot be deleted.
    pub fn delete_track(&mut self, id: Uuid) {
        let Some(index) = self.index_of(id) else {
            return;
        };

        if self.current == Some(id) {
            self.pause();
            self.release_handle();
            self.clear_current();
        }

        let track = self.playlist.remove(index);
        match fs::remove_file(track.location()) {
            Ok(()) => log::info!("deleted {}", track.location().display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => self.report(PlayerError::DeleteFailure {
                path: track.location().to_path_buf(),
                source,
            }),
        }
        self.persist();
    }

    /// Move the tracks at `from` before the track currently at `to`.
    pub fn reorder(&mut self, from: &[usize], to: usize) {
        move_items(&mut self.playlist, from, to);
        self.persist();
    }

    pub fn rename_track(&mut self, id: Uuid, title: &str) {
        let title = title.trim();
        if title.is_empty() {
            return;
        }
        let Some(track) = self.playlist.iter_mut().find(|t| t.id() == id) else {
            return;
        };
        track.title = title.to_string();
        self.persist();
        if self.current == Some(id) {
            self.publish();
        }
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    // ----- internals -----

    fn index_of(&self, id: Uuid) -> Option<usize> {
        self.playlist.iter().position(|t| t.id() == id)
    }

    /// Stop and drop the engine handle along with the poll that reads it.
    fn release_handle(&mut self) {
        self.poll.stop();
        if let Some(mut handle) = self.handle.take() {
            handle.stop();
        }
        if self.is_playing {
            self.is_playing = false;
            self.emit(ControllerEvent::PlaybackChanged { playing: false });
        }
    }

    fn clear_current(&mut self) {
        self.current = None;
        self.current_time = Duration::ZERO;
        self.duration = Duration::ZERO;
        self.emit(ControllerEvent::TrackChanged(None));
        self.publish();
    }

    fn persist(&mut self) {
        self.store.save(&self.playlist);
        self.emit(ControllerEvent::PlaylistChanged);
    }

    fn publish(&self) {
        self.now_playing.publish(self.now_playing().as_ref());
    }

    fn emit(&mut self, event: ControllerEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn report(&mut self, error: PlayerError) {
        log::warn!("{error}");
        self.emit(ControllerEvent::Error(error.to_string()));
        self.last_error = Some(error);
    }
}
