//! The capability boundary between the layout engine and the native
//! windowing system.
//!
//! The engine never talks to a real window API directly; everything it
//! needs — text measurement, font metrics, chrome extents, the work
//! area, window creation and the blocking message loop — comes through
//! [`Shell`]. A deterministic in-memory implementation lives in
//! [`crate::test_helper`].

use std::sync::Arc;

use dlgkit_geom::{Point, Rect, Size};

use crate::{
  font::Font,
  widget::{WidgetStyle, WidgetStyleEx},
};

/// Opaque identifier of a materialized native widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeHandle(pub u64);

/// Opaque identifier of a host font resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle(pub u64);

/// What the host reports about its default message font.
///
/// `handle` is `None` when the host failed to create the font; the
/// engine then leaves the host's own default in effect.
#[derive(Debug, Clone, Copy)]
pub struct FontInfo {
  pub height: u32,
  pub handle: Option<FontHandle>,
}

/// The host-side class of a widget to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetClass {
  /// Top-level dialog frame.
  Dialog,
  /// Static text control.
  Static,
  /// Progress indicator control.
  ProgressBar,
}

/// Everything the host needs to materialize one node.
///
/// `pos` is the padded position, `size` the raw (unpadded) area; both
/// must be fully resolved — the fill sentinel never reaches the host.
#[derive(Debug, Clone)]
pub struct CreateWidget {
  pub class: WidgetClass,
  pub text: Option<String>,
  pub style: WidgetStyle,
  pub style_ex: WidgetStyleEx,
  pub pos: Point,
  pub size: Size,
  pub parent: Option<NativeHandle>,
}

/// Sendable half of the shell, for the one cross-thread interaction
/// the design supports: posting a close request at a live dialog.
pub trait ShellProxy: Send + Sync {
  /// Ask the widget to close; unwinds the message loop asynchronously.
  fn post_close(&self, handle: NativeHandle);
}

/// The native windowing collaborator.
///
/// Creation, layout and [`Shell::run_loop`] must all happen on the
/// same thread — a hard requirement of the window APIs this models,
/// not a choice of this layer.
pub trait Shell {
  /// Metrics of the platform's default UI font.
  fn default_font(&self) -> FontInfo;

  /// Bounding box required to render `text` with `font`, no wrapping.
  fn measure_text(&self, font: &Font, text: &str) -> Size;

  /// Extra non-client extent (borders, title bar) the host adds around
  /// the given content rectangle for the given style flags.
  fn chrome_size(&self, style: WidgetStyle, style_ex: WidgetStyleEx, content: Size) -> Size;

  /// The available screen/work area.
  fn work_area(&self) -> Rect;

  /// Create a native widget. `None` means the host failed; the engine
  /// degrades gracefully and keeps walking the tree.
  fn create_widget(&mut self, req: &CreateWidget) -> Option<NativeHandle>;

  /// Assign a font resource to a materialized widget.
  fn set_font(&mut self, handle: NativeHandle, font: FontHandle);

  /// Make a materialized widget visible.
  fn show(&mut self, handle: NativeHandle);

  /// Pump the message queue until a quit signal; returns the quit code.
  fn run_loop(&mut self) -> i32;

  /// A sendable proxy for cross-thread close requests.
  fn proxy(&self) -> Arc<dyn ShellProxy>;
}
