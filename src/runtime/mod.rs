use std::env;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::RodioEngine;
use crate::controller::PlaybackController;
use crate::mpris::ControlCmd;
use crate::store::{JsonFileStore, PlaylistStore};

mod event_loop;
mod import_worker;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    startup::init_logging(&settings);
    log::info!("starting encore {}", env!("CARGO_PKG_VERSION"));

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();

    let system_tx = control_tx.clone();
    let engine = RodioEngine::open_default(move |event| {
        let _ = system_tx.send(ControlCmd::System(event));
    })?;

    let mpris = crate::mpris::spawn_mpris(control_tx);

    let kv = JsonFileStore::open(settings.state_path());
    log::info!("playlist state in {}", kv.path().display());
    let store = PlaylistStore::new(Box::new(kv));
    let mut controller = PlaybackController::new(
        store,
        Box::new(engine),
        Box::new(mpris),
        startup::controller_options(&settings),
    );
    let events = controller.subscribe();

    startup::import_args(&mut controller, &settings, env::args().skip(1));

    let imports =
        import_worker::ImportWorker::spawn(controller.music_dir().to_path_buf(), settings.library.clone());
    let mut app = App::new();

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &mut controller,
        event_loop::Inputs {
            control_rx: &control_rx,
            events: &events,
            imports: &imports,
        },
    );

    controller.pause();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::info!("bye");
    run_result
}
