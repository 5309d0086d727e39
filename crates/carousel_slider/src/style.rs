//! Slot style interpolation
//!
//! Maps a continuous slot position to the visual parameters of a card in a
//! stacked, receding carousel. Position `0` is the front slot and
//! `size - 1` the deepest visible one; positions in `(-1, 0)` and
//! `(size - 1, size)` blend a card in or out of one of two hidden styles.
//!
//! Everything here is pure and total: any window size and any position
//! (including non-finite ones) produce a defined style.

use serde::Serialize;

use crate::item::{Item, SliderItem};

/// Rotation added per visible slot, in degrees
const ROTATION_PER_SLOT: f32 = 8.0;
/// Rotation cap, in degrees
const ROTATION_CAP: f32 = 40.0;
/// Depth added per visible slot, in pixels
const DEPTH_PER_SLOT: f32 = 60.0;
/// Depth cap, in pixels
const DEPTH_CAP: f32 = 300.0;
/// Scale lost per visible slot
const SCALE_PER_SLOT: f32 = 0.08;
/// Scale floor for the deepest slot
const SCALE_FLOOR: f32 = 0.6;
/// Blur of the deepest visible slot, in pixels
const MAX_BLUR: f32 = 4.0;
/// Blur of the hidden styles, in pixels
const HIDDEN_BLUR: f32 = 8.0;
/// Horizontal shift of the front slot, in percent of the slot width
const FRONT_SHIFT: f32 = -20.0;
/// Horizontal shift of every other slot
const SLOT_SHIFT: f32 = -10.0;
/// Horizontal shift of a card leaving past the front
const LEADING_SHIFT: f32 = -40.0;

/// Visual parameters for one rendered slot
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct VisualParams {
    /// 0.0 (transparent) to 1.0
    pub opacity: f32,
    /// Rotation around the vertical axis, in degrees
    pub rotate_y: f32,
    /// Percent of the slot width
    pub translate_x: f32,
    /// Pixels
    pub translate_y: f32,
    /// Pixels (negative = further away)
    pub translate_z: f32,
    pub scale: f32,
    /// Blur radius in pixels
    pub blur: f32,
    /// Stacking order before rounding
    pub z_index: f32,
}

impl VisualParams {
    /// Component-wise linear interpolation
    pub fn lerp(a: &VisualParams, b: &VisualParams, t: f32) -> VisualParams {
        let mix = |from: f32, to: f32| from + (to - from) * t;
        VisualParams {
            opacity: mix(a.opacity, b.opacity),
            rotate_y: mix(a.rotate_y, b.rotate_y),
            translate_x: mix(a.translate_x, b.translate_x),
            translate_y: mix(a.translate_y, b.translate_y),
            translate_z: mix(a.translate_z, b.translate_z),
            scale: mix(a.scale, b.scale),
            blur: mix(a.blur, b.blur),
            z_index: mix(a.z_index, b.z_index),
        }
    }

    /// Integer stacking order
    pub fn z_order(&self) -> i32 {
        self.z_index.round() as i32
    }

    /// Largest absolute component difference to `other`
    pub fn max_difference(&self, other: &VisualParams) -> f32 {
        [
            self.opacity - other.opacity,
            self.rotate_y - other.rotate_y,
            self.translate_x - other.translate_x,
            self.translate_y - other.translate_y,
            self.translate_z - other.translate_z,
            self.scale - other.scale,
            self.blur - other.blur,
            self.z_index - other.z_index,
        ]
        .into_iter()
        .fold(0.0, |acc, d| acc.max(d.abs()))
    }
}

/// Size-dependent shape of the stack
#[derive(Clone, Copy, Debug)]
struct Shape {
    size: f32,
    last: f32,
    rotation: f32,
    depth: f32,
    min_scale: f32,
}

impl Shape {
    fn new(window_size: usize) -> Self {
        let size = window_size as f32;
        Self {
            size,
            last: window_size.saturating_sub(1).max(1) as f32,
            rotation: (ROTATION_PER_SLOT * size).min(ROTATION_CAP),
            depth: (DEPTH_PER_SLOT * size).min(DEPTH_CAP),
            min_scale: (1.0 - SCALE_PER_SLOT * size).max(SCALE_FLOOR),
        }
    }

    fn slot(&self, index: usize) -> VisualParams {
        let t = index as f32 / self.last;
        VisualParams {
            opacity: 1.0,
            rotate_y: -self.rotation * t,
            translate_x: if index == 0 { FRONT_SHIFT } else { SLOT_SHIFT },
            translate_y: 0.0,
            translate_z: -self.depth * t,
            scale: 1.0 - (1.0 - self.min_scale) * t,
            blur: MAX_BLUR * t,
            z_index: self.size - index as f32,
        }
    }

    fn leading(&self) -> VisualParams {
        VisualParams {
            opacity: 0.0,
            rotate_y: self.rotation,
            translate_x: LEADING_SHIFT,
            translate_y: 0.0,
            translate_z: -self.depth,
            scale: self.min_scale,
            blur: HIDDEN_BLUR,
            z_index: self.size + 1.0,
        }
    }

    fn trailing(&self) -> VisualParams {
        VisualParams {
            opacity: 0.0,
            rotate_y: -self.rotation,
            translate_x: SLOT_SHIFT,
            translate_y: 0.0,
            translate_z: -self.depth,
            scale: self.min_scale,
            blur: HIDDEN_BLUR,
            z_index: 0.0,
        }
    }
}

/// Style of the visible slot `index` (0 = front)
pub fn slot_style(window_size: usize, index: usize) -> VisualParams {
    Shape::new(window_size).slot(index)
}

/// Hidden style for a card before the front slot
pub fn leading_style(window_size: usize) -> VisualParams {
    Shape::new(window_size).leading()
}

/// Hidden style for a card behind the deepest slot
pub fn trailing_style(window_size: usize) -> VisualParams {
    Shape::new(window_size).trailing()
}

/// Style at a continuous slot position
pub fn style_at(window_size: usize, position: f32) -> VisualParams {
    let shape = Shape::new(window_size);
    if window_size == 0 || position.is_nan() {
        return shape.leading();
    }

    let size = shape.size;
    if position <= -1.0 {
        return shape.leading();
    }
    if position >= size {
        return shape.trailing();
    }
    if position < 0.0 {
        return VisualParams::lerp(&shape.leading(), &shape.slot(0), position + 1.0);
    }
    if position > size - 1.0 {
        return VisualParams::lerp(
            &shape.slot(window_size - 1),
            &shape.trailing(),
            position - (size - 1.0),
        );
    }

    let lower = position.floor();
    let fraction = position - lower;
    let index = lower as usize;
    if fraction == 0.0 {
        shape.slot(index)
    } else {
        VisualParams::lerp(&shape.slot(index), &shape.slot(index + 1), fraction)
    }
}

/// Resolve styles for a rendered window shifted by `progress`
///
/// Render index `0` is the leading sentinel, so slot `i` sits at position
/// `i - progress - 1`.
pub fn apply_styles<T: Item>(items: &mut [SliderItem<T>], window_size: usize, progress: f32) {
    for (render_index, slot) in items.iter_mut().enumerate() {
        let position = render_index as f32 - progress - 1.0;
        slot.style = style_at(window_size, position);
    }
}
