//! The widget hierarchy: an arena of nodes addressed by [`WidgetId`].
//!
//! The arena owns every node's lifetime; parent and child links are
//! arena edges used for lookup only. Nodes register themselves under
//! their parent at construction time — at most one child for plain
//! widgets, arbitrarily many for groups.

use indextree::Arena;
use log::warn;

use crate::{
  font::Font,
  shell::{CreateWidget, NativeHandle, Shell, WidgetClass},
  widget::{HAlign, WidgetKind, WidgetNode, WidgetStyle, WidgetStyleEx},
};

pub mod widget_id;
pub(crate) use widget_id::TreeArena;
pub use widget_id::WidgetId;

pub struct WidgetTree {
  pub(crate) arena: TreeArena,
  root: WidgetId,
}

impl WidgetTree {
  /// Create a tree holding only the root container. The root owns the
  /// dialog font; every descendant resolves metrics against it.
  pub fn new(font: Font, title: Option<String>) -> WidgetTree {
    let mut arena = Arena::new();
    let root = WidgetId(arena.new_node(WidgetNode::new(WidgetKind::Root { font, title })));
    WidgetTree { arena, root }
  }

  pub fn root(&self) -> WidgetId { self.root }

  pub fn node(&self, id: WidgetId) -> &WidgetNode { id.assert_get(&self.arena) }

  pub fn node_mut(&mut self, id: WidgetId) -> &mut WidgetNode { id.assert_get_mut(&mut self.arena) }

  pub fn parent(&self, id: WidgetId) -> Option<WidgetId> { id.parent(&self.arena) }

  pub fn children(&self, id: WidgetId) -> impl Iterator<Item = WidgetId> + '_ {
    id.children(&self.arena)
  }

  /// Append a label under `parent`.
  pub fn new_label(&mut self, parent: WidgetId, text: impl Into<String>) -> WidgetId {
    self.new_node(parent, WidgetKind::Label { text: text.into() })
  }

  /// Append a progress bar under `parent`. Its width resolves to the
  /// fill sentinel, so the parent must be a sizing group.
  pub fn new_progress_bar(&mut self, parent: WidgetId) -> WidgetId {
    self.new_node(parent, WidgetKind::ProgressBar)
  }

  /// Append a vertical group under `parent`.
  pub fn new_group(&mut self, parent: WidgetId, halign: HAlign) -> WidgetId {
    self.new_node(parent, WidgetKind::Group { halign })
  }

  fn new_node(&mut self, parent: WidgetId, kind: WidgetKind) -> WidgetId {
    let parent_node = self.node(parent);
    assert!(
      parent_node.kind.is_group() || parent.first_child(&self.arena).is_none(),
      "widget already has a child; only groups take more than one"
    );
    let id = WidgetId(self.arena.new_node(WidgetNode::new(kind)));
    parent.append(id, &mut self.arena);
    id
  }

  /// The font governing `id`: the nearest ancestor that carries one.
  pub fn font(&self, id: WidgetId) -> &Font {
    id.ancestors(&self.arena)
      .find_map(|a| a.assert_get(&self.arena).kind.font())
      .expect("no font in the ancestry")
  }

  /// Push the resolved font down to every materialized descendant.
  /// Idempotent; visits each node exactly once per call.
  pub fn apply_font_recursive(&mut self, id: WidgetId, shell: &mut dyn Shell) {
    let Some(font_handle) = self.font(id).handle else {
      // Host font creation failed earlier; its default stays in effect.
      return;
    };
    let targets: Vec<NativeHandle> = id
      .descendants(&self.arena)
      .filter_map(|w| w.assert_get(&self.arena).handle)
      .collect();
    for handle in targets {
      shell.set_font(handle, font_handle);
    }
  }

  /// Materialize `id` and its descendants against the host, passing
  /// the resolved padded position and the raw (unpadded) area.
  ///
  /// Fatal if either axis of the area still holds the fill sentinel:
  /// a fill-reporting node must sit inside a sizing group that
  /// resolved it before this point.
  pub fn create_recursive(
    &mut self, id: WidgetId, parent: Option<NativeHandle>, shell: &mut dyn Shell,
  ) {
    if self.node(id).kind.is_group() {
      // Groups have no native counterpart; children attach to the
      // group's own host parent.
      let children: Vec<WidgetId> = id.children(&self.arena).collect();
      for child in children {
        self.create_recursive(child, parent, shell);
      }
      return;
    }

    let area = self.area(id, shell);
    assert!(
      area.width != dlgkit_geom::FILL,
      "width is still the fill sentinel; host this widget inside a sizing group"
    );
    assert!(
      area.height != dlgkit_geom::FILL,
      "height is still the fill sentinel; host this widget inside a sizing group"
    );
    let pos = self.pos_padded(id, shell);

    let node = self.node_mut(id);
    if parent.is_some() {
      node.style |= WidgetStyle::CHILD | WidgetStyle::VISIBLE;
      node.style_ex |= WidgetStyleEx::NO_PARENT_NOTIFY;
    }
    let req = CreateWidget {
      class: widget_class(&node.kind),
      text: node.text().map(str::to_owned),
      style: node.style,
      style_ex: node.style_ex,
      pos,
      size: area,
      parent,
    };
    let handle = shell.create_widget(&req);
    if handle.is_none() {
      warn!("host failed to create a {:?} widget; continuing without it", req.class);
    }
    self.node_mut(id).handle = handle;

    if let Some(child) = id.single_child(&self.arena) {
      self.create_recursive(child, handle, shell);
    }
  }
}

fn widget_class(kind: &WidgetKind) -> WidgetClass {
  match kind {
    WidgetKind::Label { .. } => WidgetClass::Static,
    WidgetKind::ProgressBar => WidgetClass::ProgressBar,
    WidgetKind::Root { .. } => WidgetClass::Dialog,
    WidgetKind::Group { .. } => unreachable!("groups never materialize"),
  }
}
