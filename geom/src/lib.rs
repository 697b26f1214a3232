//! Unit-tagged geometry aliases shared by the dlgkit crates.
//!
//! Areas and insets are unsigned: it makes little sense for either to
//! go negative. Positions are signed, since a window centered on a
//! screen smaller than itself legitimately starts left of the origin.

/// The tag for the device unit system to prevent mixing values from
/// different systems.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceUnit;

pub type Size<T = u32> = euclid::Size2D<T, DeviceUnit>;
pub type Point<T = i32> = euclid::Point2D<T, DeviceUnit>;
pub type Rect<T = i32> = euclid::Rect<T, DeviceUnit>;
pub type Vector<T = i32> = euclid::Vector2D<T, DeviceUnit>;

/// Insets around a widget: top/right/bottom/left.
pub type Padding<T = u32> = euclid::SideOffsets2D<T, DeviceUnit>;

/// Sentinel meaning "consume all space the parent can offer on this
/// axis". It must be resolved to a concrete value before a size ever
/// reaches the host windowing call.
pub const FILL: u32 = u32::MAX;

pub const FILL_SIZE: Size = Size::new(FILL, FILL);
pub const ZERO_SIZE: Size = Size::new(0, 0);

pub use euclid::{point2, rect, size2};

/// A padding with the same inset on all four sides.
pub fn uniform_padding(inset: u32) -> Padding { Padding::new_all_same(inset) }

/// True if either axis of `size` still holds the fill sentinel.
pub fn has_fill(size: Size) -> bool { size.width == FILL || size.height == FILL }

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fill_detection() {
    assert!(has_fill(Size::new(FILL, 10)));
    assert!(has_fill(Size::new(10, FILL)));
    assert!(!has_fill(Size::new(10, 10)));
  }

  #[test]
  fn uniform_padding_sides() {
    let pad = uniform_padding(7);
    assert_eq!(pad.top, 7);
    assert_eq!(pad.left, 7);
    assert_eq!(pad.right, 7);
    assert_eq!(pad.bottom, 7);
    assert_eq!(pad.horizontal(), 14);
    assert_eq!(pad.vertical(), 14);
  }
}
