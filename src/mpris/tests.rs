use super::*;
use std::sync::mpsc;
use std::time::Duration;

fn now_playing(rate: f64) -> NowPlaying {
    NowPlaying {
        title: "Test Title".to_string(),
        elapsed: Duration::from_micros(2_500_000),
        duration: Duration::from_micros(1_234_567_000),
        playback_rate: rate,
    }
}

fn iface(state: &Arc<Mutex<SharedState>>) -> (PlayerIface, mpsc::Receiver<ControlCmd>) {
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    (
        PlayerIface {
            tx,
            state: state.clone(),
        },
        rx,
    )
}

#[test]
fn publish_sets_and_clears_shared_state() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };

    handle.publish(Some(&now_playing(1.0)));
    assert_eq!(
        state.lock().unwrap().now_playing.as_ref().map(|np| np.title.as_str()),
        Some("Test Title")
    );

    handle.publish(None);
    assert!(state.lock().unwrap().now_playing.is_none());
}

#[test]
fn playback_status_follows_published_rate() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (iface, _rx) = iface(&state);
    let handle = MprisHandle {
        state: state.clone(),
    };

    assert_eq!(iface.playback_status(), "Stopped");

    handle.publish(Some(&now_playing(1.0)));
    assert_eq!(iface.playback_status(), "Playing");

    handle.publish(Some(&now_playing(0.0)));
    assert_eq!(iface.playback_status(), "Paused");
}

#[test]
fn position_reports_elapsed_micros() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (iface, _rx) = iface(&state);
    assert_eq!(iface.position(), 0);

    state.lock().unwrap().now_playing = Some(now_playing(1.0));
    assert_eq!(iface.position(), 2_500_000);
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (iface, _rx) = iface(&state);
    assert!(iface.metadata().is_empty());

    state.lock().unwrap().now_playing = Some(now_playing(1.0));
    let map = iface.metadata();
    for k in ["mpris:trackid", "xesam:title", "mpris:length"] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
}

#[test]
fn metadata_omits_length_when_unknown() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (iface, _rx) = iface(&state);
    let mut np = now_playing(1.0);
    np.duration = Duration::ZERO;
    state.lock().unwrap().now_playing = Some(np);

    let map = iface.metadata();
    assert!(map.contains_key("xesam:title"));
    assert!(!map.contains_key("mpris:length"));
}

#[test]
fn player_methods_forward_commands() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (iface, rx) = iface(&state);

    iface.play();
    iface.pause();
    iface.play_pause();
    iface.stop();
    iface.next();
    iface.previous();
    iface.seek(-5_000_000);
    iface.set_position(
        ObjectPath::try_from(TRACK_ID).unwrap().into(),
        42_000_000,
    );

    let got: Vec<ControlCmd> = rx.try_iter().collect();
    assert_eq!(
        got,
        vec![
            ControlCmd::Play,
            ControlCmd::Pause,
            ControlCmd::PlayPause,
            ControlCmd::Stop,
            ControlCmd::Next,
            ControlCmd::Prev,
            ControlCmd::Seek(-5_000_000),
            ControlCmd::SetPosition(42_000_000),
        ]
    );
}

#[test]
fn root_quit_forwards_quit() {
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let root = RootIface { tx };
    root.raise();
    root.quit();
    assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![ControlCmd::Quit]);
}
