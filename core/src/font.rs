//! Font metrics provider.
//!
//! One [`Font`] lives on the root node; every descendant resolves its
//! padding and text measurement against it by walking up the tree.

use dlgkit_geom::{uniform_padding, Padding};
use log::warn;

use crate::shell::{FontHandle, Shell};

/// Line metrics of the dialog font plus the derived padding amount.
#[derive(Debug, Clone, Copy)]
pub struct Font {
  /// Line height in device units.
  pub height: u32,
  /// Derived padding: half the line height.
  pub pad: u32,
  /// Host font resource, if the host managed to create one.
  pub handle: Option<FontHandle>,
}

impl Font {
  /// Resolve the host's default UI font. A host that could not create
  /// the font resource degrades to `handle: None`; the host default
  /// then stays in effect for materialized widgets.
  pub fn system_default(shell: &dyn Shell) -> Self {
    let info = shell.default_font();
    if info.handle.is_none() {
      warn!("host failed to create the default dialog font; keeping the system font");
    }
    Font { height: info.height, pad: info.height / 2, handle: info.handle }
  }

  /// The default widget padding: the font pad on all four sides.
  pub fn padding(&self) -> Padding { uniform_padding(self.pad) }
}
