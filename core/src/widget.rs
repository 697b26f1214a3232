//! The widget node: the polymorphic unit of the hierarchy.
//!
//! The original deep class hierarchy is re-architected as a closed set
//! of tagged variants dispatched by the tree's layout accessors; the
//! node itself only carries the tag, the style flags handed through to
//! the host, and the three cached layout properties.

use bitflags::bitflags;
use dlgkit_geom::{Padding, Point, Size};

use crate::{cached::Cached, font::Font, shell::NativeHandle};

bitflags! {
  /// Style flags passed through to the host on creation. The engine
  /// only interprets `OVERLAPPED`/`CAPTION` (root chrome) and sets
  /// `CHILD | VISIBLE` on every node created under a parent handle.
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
  pub struct WidgetStyle: u32 {
    const OVERLAPPED = 1 << 0;
    const CAPTION    = 1 << 1;
    const CHILD      = 1 << 2;
    const VISIBLE    = 1 << 3;
  }
}

bitflags! {
  /// Extended style flags, also host-interpreted.
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
  pub struct WidgetStyleEx: u32 {
    const NO_PARENT_NOTIFY = 1 << 0;
  }
}

/// Horizontal alignment of children within a group's resolved width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
  #[default]
  Left,
  Center,
  Right,
}

/// The closed set of widget variants.
#[derive(Debug)]
pub enum WidgetKind {
  /// Static text; sized by host text measurement.
  Label { text: String },
  /// Width-filling bar, two line heights tall.
  ProgressBar,
  /// Vertical stack of children with a horizontal alignment. Groups
  /// never materialize; they pass the parent handle through.
  Group { halign: HAlign },
  /// The single top-level container. Owns the font, pads by zero and
  /// centers itself on the work area.
  Root { font: Font, title: Option<String> },
}

impl WidgetKind {
  pub fn is_group(&self) -> bool { matches!(self, WidgetKind::Group { .. }) }

  /// The font owned by this node, if any (only the root carries one).
  pub fn font(&self) -> Option<&Font> {
    match self {
      WidgetKind::Root { font, .. } => Some(font),
      _ => None,
    }
  }
}

/// One node of the hierarchy: variant tag, host style flags, the three
/// lazily cached layout properties and the native handle once the node
/// is materialized.
#[derive(Debug)]
pub struct WidgetNode {
  pub kind: WidgetKind,
  pub style: WidgetStyle,
  pub style_ex: WidgetStyleEx,
  pub area: Cached<Size>,
  pub padding: Cached<Padding>,
  pub pos: Cached<Point>,
  pub handle: Option<NativeHandle>,
}

impl WidgetNode {
  pub fn new(kind: WidgetKind) -> Self {
    let style = match kind {
      WidgetKind::Root { .. } => WidgetStyle::OVERLAPPED,
      _ => WidgetStyle::default(),
    };
    WidgetNode {
      kind,
      style,
      style_ex: WidgetStyleEx::default(),
      area: Cached::default(),
      padding: Cached::default(),
      pos: Cached::default(),
      handle: None,
    }
  }

  /// The text the host should create the native widget with.
  pub fn text(&self) -> Option<&str> {
    match &self.kind {
      WidgetKind::Label { text } => Some(text),
      WidgetKind::Root { title, .. } => title.as_deref(),
      _ => None,
    }
  }
}
