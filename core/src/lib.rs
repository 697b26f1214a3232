//! # dlgkit_core
//!
//! A pixel-less dialog layout engine: callers describe a widget
//! hierarchy (labels, progress bars, vertical groups under a single
//! root) and the engine derives every size, padding and position from
//! the font metrics and the children, lazily and cached.
//!
//! The native windowing system is an external collaborator behind the
//! [`shell::Shell`] trait; the engine only asks it to measure text,
//! report chrome and screen extents, and materialize resolved nodes.

pub mod cached;
pub mod font;
pub mod layout;
pub mod shell;
pub mod test_helper;
pub mod widget;
pub mod widget_tree;
pub mod window;

pub mod prelude {
  pub use dlgkit_geom::{
    has_fill, point2, rect, size2, uniform_padding, Padding, Point, Rect, Size, Vector, FILL,
    FILL_SIZE, ZERO_SIZE,
  };

  pub use crate::{
    cached::Cached,
    font::Font,
    shell::{
      CreateWidget, FontHandle, FontInfo, NativeHandle, Shell, ShellProxy, WidgetClass,
    },
    widget::{HAlign, WidgetKind, WidgetNode, WidgetStyle, WidgetStyleEx},
    widget_tree::{WidgetId, WidgetTree},
    window::{Dialog, DialogHandle},
  };
}
