use std::collections::BTreeSet;

/// Move the entries at `from` so they sit right before the entry that is
/// currently at `to` (or at the end when `to >= items.len()`).
///
/// Moved entries keep their relative order, and so does everything else.
/// Indices past the end are ignored and duplicates count once.
pub fn move_items<T>(items: &mut Vec<T>, from: &[usize], to: usize) {
    let len = items.len();
    let selected: BTreeSet<usize> = from.iter().copied().filter(|&i| i < len).collect();
    if selected.is_empty() {
        return;
    }

    let to = to.min(len);
    let insert_at = to - selected.range(..to).count();

    let mut moved = Vec::with_capacity(selected.len());
    let mut rest = Vec::with_capacity(len - selected.len());
    for (i, item) in items.drain(..).enumerate() {
        if selected.contains(&i) {
            moved.push(item);
        } else {
            rest.push(item);
        }
    }

    rest.splice(insert_at..insert_at, moved);
    *items = rest;
}
