//! Circular item window
//!
//! Maps a logical item list onto the slots the carousel renders: `size`
//! consecutive items starting at the active index (wrapping around the end
//! of the list), framed by two hidden sentinels that are the neighbours about
//! to slide into view.
//!
//! ```text
//! items:   a b c d e f      active = 4, size = 3
//! window:  [d] e f a [b]    (sentinels in brackets)
//! ```

use rustc_hash::FxHashMap;

use crate::item::{DisplayKey, Item, SliderItem};
use crate::style::VisualParams;

/// Minimum window size when the window is smaller than the list
pub const MIN_WINDOW_SIZE: usize = 2;

/// Normalize a possibly negative index into `0..len` (0 for an empty list)
pub fn normalize_index(index: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    index.rem_euclid(len as isize) as usize
}

/// Resolve the number of visible items for a list of `len` items
///
/// Defaults to the whole list; a smaller request is raised to
/// [`MIN_WINDOW_SIZE`]; the result never exceeds the list.
pub fn effective_window_size(requested: Option<usize>, len: usize) -> usize {
    let size = requested.unwrap_or(len);
    if size < len {
        size.max(MIN_WINDOW_SIZE).min(len)
    } else {
        len
    }
}

/// Build the rendered window `[leading, ...visible, trailing]`
///
/// Returns an empty window for an empty list or a zero size. Styles are left
/// at their defaults; see [`crate::style::apply_styles`].
pub fn build_window<T: Item>(items: &[T], active: isize, size: usize) -> Vec<SliderItem<T>> {
    try_build_window(items, active, size).unwrap_or_default()
}

fn try_build_window<T: Item>(
    items: &[T],
    active: isize,
    size: usize,
) -> Option<Vec<SliderItem<T>>> {
    let len = items.len();
    let size = size.min(len);
    if size == 0 {
        return None;
    }

    let start = normalize_index(active, len);
    let last_visible = (start + size - 1) % len;

    // When the whole list is visible the sentinels mirror the extremes
    let (leading_index, trailing_index) = if len > size {
        (normalize_index(start as isize - 1, len), (start + size) % len)
    } else {
        (last_visible, start)
    };
    let leading = items.get(leading_index)?;
    let trailing = items.get(trailing_index)?;

    let mut window = Vec::with_capacity(size + 2);
    window.push(SliderItem {
        item: leading.clone(),
        key: DisplayKey::Leading(leading.id()),
        logical_index: leading_index,
        style: VisualParams::default(),
    });

    let mut occurrences: FxHashMap<T::Id, u32> = FxHashMap::default();
    for offset in 0..size {
        let logical_index = (start + offset) % len;
        let item = items.get(logical_index)?;
        let id = item.id();
        let seen = occurrences.entry(id.clone()).or_insert(0);
        let occurrence = *seen;
        *seen += 1;

        window.push(SliderItem {
            item: item.clone(),
            key: DisplayKey::Item { id, occurrence },
            logical_index,
            style: VisualParams::default(),
        });
    }

    window.push(SliderItem {
        item: trailing.clone(),
        key: DisplayKey::Trailing(trailing.id()),
        logical_index: trailing_index,
        style: VisualParams::default(),
    });

    Some(window)
}
