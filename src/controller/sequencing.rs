//! Which track comes next.

use rand::Rng;

/// How `advance_next` / `advance_previous` pick the following track.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PlayMode {
    /// Play through the list once; stop after the last track.
    #[default]
    Sequential,
    /// Wrap around at both ends.
    Cyclic,
    /// Jump to a random other track.
    Shuffled,
}

impl PlayMode {
    /// `Sequential -> Cyclic -> Shuffled -> Sequential`.
    pub fn cycle(self) -> Self {
        match self {
            Self::Sequential => Self::Cyclic,
            Self::Cyclic => Self::Shuffled,
            Self::Shuffled => Self::Sequential,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Sequential => "In order",
            Self::Cyclic => "Repeat list",
            Self::Shuffled => "Shuffle",
        }
    }
}

/// Index after `current` in a playlist of `len` tracks, or `None` when
/// playback should stop instead (end of list in `Sequential`).
///
/// `current` must be a valid index.
pub fn next_index<R: Rng + ?Sized>(
    mode: PlayMode,
    current: usize,
    len: usize,
    rng: &mut R,
) -> Option<usize> {
    debug_assert!(current < len);
    match mode {
        PlayMode::Sequential => (current + 1 < len).then_some(current + 1),
        PlayMode::Cyclic => Some((current + 1) % len),
        PlayMode::Shuffled => Some(random_other(current, len, rng)),
    }
}

/// Index before `current`. Unlike `next_index` this wraps to the last track
/// in `Sequential` mode too.
pub fn previous_index<R: Rng + ?Sized>(
    mode: PlayMode,
    current: usize,
    len: usize,
    rng: &mut R,
) -> usize {
    debug_assert!(current < len);
    match mode {
        PlayMode::Sequential | PlayMode::Cyclic => (current + len - 1) % len,
        PlayMode::Shuffled => random_other(current, len, rng),
    }
}

/// Uniform pick from `[0, len)` minus `current`; `current` itself when there
/// is nothing else to pick.
fn random_other<R: Rng + ?Sized>(current: usize, len: usize, rng: &mut R) -> usize {
    if len <= 1 {
        return current;
    }
    let pick = rng.gen_range(0..len - 1);
    if pick >= current { pick + 1 } else { pick }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn sequential_next_stops_at_end_but_previous_wraps() {
        let mut r = rng();
        assert_eq!(next_index(PlayMode::Sequential, 0, 3, &mut r), Some(1));
        assert_eq!(next_index(PlayMode::Sequential, 2, 3, &mut r), None);
        assert_eq!(previous_index(PlayMode::Sequential, 0, 3, &mut r), 2);
        assert_eq!(previous_index(PlayMode::Sequential, 2, 3, &mut r), 1);
    }

    #[test]
    fn cyclic_wraps_both_ways() {
        let mut r = rng();
        assert_eq!(next_index(PlayMode::Cyclic, 2, 3, &mut r), Some(0));
        assert_eq!(previous_index(PlayMode::Cyclic, 0, 3, &mut r), 2);
        assert_eq!(next_index(PlayMode::Cyclic, 0, 1, &mut r), Some(0));
        assert_eq!(previous_index(PlayMode::Cyclic, 0, 1, &mut r), 0);
    }

    #[test]
    fn shuffled_single_track_repeats_itself() {
        let mut r = rng();
        assert_eq!(next_index(PlayMode::Shuffled, 0, 1, &mut r), Some(0));
        assert_eq!(previous_index(PlayMode::Shuffled, 0, 1, &mut r), 0);
    }

    #[test]
    fn shuffled_reaches_every_other_index() {
        let mut r = rng();
        let mut seen = [false; 5];
        for _ in 0..500 {
            seen[next_index(PlayMode::Shuffled, 2, 5, &mut r).unwrap()] = true;
        }
        assert_eq!(seen, [true, true, false, true, true]);
    }

    #[test]
    fn cycle_visits_all_modes() {
        let m = PlayMode::default();
        assert_eq!(m, PlayMode::Sequential);
        assert_eq!(m.cycle(), PlayMode::Cyclic);
        assert_eq!(m.cycle().cycle(), PlayMode::Shuffled);
        assert_eq!(m.cycle().cycle().cycle(), PlayMode::Sequential);
    }

    proptest! {
        #[test]
        fn shuffled_pick_is_in_range_and_never_current(
            (len, current) in (2usize..64).prop_flat_map(|len| (Just(len), 0..len)),
            seed in any::<u64>(),
        ) {
            let mut r = StdRng::seed_from_u64(seed);
            let next = next_index(PlayMode::Shuffled, current, len, &mut r).unwrap();
            let prev = previous_index(PlayMode::Shuffled, current, len, &mut r);
            prop_assert!(next < len && next != current);
            prop_assert!(prev < len && prev != current);
        }
    }
}
