//! Item model
//!
//! The slider only needs a stable identity from the items it shows. Everything
//! else on an item is opaque and carried through untouched.

use std::fmt;
use std::hash::Hash;

use crate::style::VisualParams;

/// An externally owned list entry with a stable identity
pub trait Item: Clone {
    /// Identity type, stable across list mutations
    type Id: Clone + Eq + Hash + fmt::Debug;

    fn id(&self) -> Self::Id;
}

macro_rules! impl_item_for_id {
    ($($ty:ty),*) => {
        $(
            impl Item for $ty {
                type Id = $ty;

                fn id(&self) -> Self::Id {
                    self.clone()
                }
            }
        )*
    };
}

impl_item_for_id!(u32, u64, usize, i32, i64, String);

/// Identity of a rendered slot, unique within one window build
///
/// Sentinels live in their own variants so they can never collide with a
/// visible item, even when they mirror one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DisplayKey<Id> {
    /// Sentinel before the first visible item
    Leading(Id),
    /// Visible item; `occurrence` distinguishes repeated identities
    Item { id: Id, occurrence: u32 },
    /// Sentinel after the last visible item
    Trailing(Id),
}

impl<Id> DisplayKey<Id> {
    /// Identity of the underlying item
    pub fn id(&self) -> &Id {
        match self {
            DisplayKey::Leading(id) | DisplayKey::Trailing(id) => id,
            DisplayKey::Item { id, .. } => id,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        !matches!(self, DisplayKey::Item { .. })
    }
}

impl<Id: fmt::Display> fmt::Display for DisplayKey<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayKey::Leading(id) => write!(f, "leading:{id}"),
            DisplayKey::Item { id, occurrence: 0 } => write!(f, "{id}"),
            DisplayKey::Item { id, occurrence } => write!(f, "{id}#{occurrence}"),
            DisplayKey::Trailing(id) => write!(f, "trailing:{id}"),
        }
    }
}

/// An item placed in the rendered window
#[derive(Clone, Debug, PartialEq)]
pub struct SliderItem<T: Item> {
    /// The source item
    pub item: T,
    /// Display identity within the current window
    pub key: DisplayKey<T::Id>,
    /// Index of the item in the logical list
    pub logical_index: usize,
    /// Visual parameters resolved for the current progress
    pub style: VisualParams,
}

impl<T: Item> SliderItem<T> {
    pub fn is_sentinel(&self) -> bool {
        self.key.is_sentinel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_keys_never_equal_item_keys() {
        let item: DisplayKey<u32> = DisplayKey::Item {
            id: 7,
            occurrence: 0,
        };
        assert_ne!(DisplayKey::Leading(7), item);
        assert_ne!(DisplayKey::Trailing(7), item);
        assert_ne!(DisplayKey::Leading(7), DisplayKey::Trailing(7));
    }

    #[test]
    fn test_display_key_format() {
        assert_eq!(DisplayKey::Leading(3u32).to_string(), "leading:3");
        assert_eq!(DisplayKey::Trailing(3u32).to_string(), "trailing:3");
        assert_eq!(
            DisplayKey::Item {
                id: 3u32,
                occurrence: 0
            }
            .to_string(),
            "3"
        );
        assert_eq!(
            DisplayKey::Item {
                id: 3u32,
                occurrence: 1
            }
            .to_string(),
            "3#1"
        );
    }

    #[test]
    fn test_primitive_items() {
        assert_eq!(42u32.id(), 42);
        assert_eq!("card".to_string().id(), "card");
    }
}
