//! The root container's lifecycle: materialize the tree, show the
//! dialog, pump the host message loop, and let one other thread wait
//! for creation and ask the dialog to close.

use std::sync::{Arc, Condvar, Mutex};

use crate::{
  font::Font,
  shell::{NativeHandle, Shell, ShellProxy},
  widget::WidgetStyle,
  widget_tree::{WidgetId, WidgetTree},
};

/// Set once the native root handle exists (or creation definitively
/// failed), unblocking any thread that waits to interact with the
/// dialog. Replaces the original's manual-reset event handle.
#[derive(Default)]
struct CreatedEvent {
  slot: Mutex<Option<Option<NativeHandle>>>,
  cond: Condvar,
}

impl CreatedEvent {
  fn set(&self, handle: Option<NativeHandle>) {
    *self.slot.lock().unwrap() = Some(handle);
    self.cond.notify_all();
  }

  fn wait(&self) -> Option<NativeHandle> {
    let mut slot = self.slot.lock().unwrap();
    while slot.is_none() {
      slot = self.cond.wait(slot).unwrap();
    }
    slot.unwrap()
  }

  /// The handle if already signaled, without blocking.
  fn peek(&self) -> Option<NativeHandle> { self.slot.lock().unwrap().flatten() }
}

/// A single top-level dialog: the widget tree plus the host shell that
/// materializes and drives it.
///
/// Construction, layout and [`Dialog::create_and_run`] must stay on
/// one thread; [`Dialog::handle`] is the only cross-thread surface.
pub struct Dialog {
  tree: WidgetTree,
  shell: Box<dyn Shell>,
  created: Arc<CreatedEvent>,
}

/// Cloneable, sendable remote for a dialog owned by another thread.
#[derive(Clone)]
pub struct DialogHandle {
  created: Arc<CreatedEvent>,
  proxy: Arc<dyn ShellProxy>,
}

impl Dialog {
  pub fn new(shell: Box<dyn Shell>, title: Option<String>) -> Self {
    let font = Font::system_default(&*shell);
    Dialog { tree: WidgetTree::new(font, title), shell, created: Arc::default() }
  }

  pub fn root(&self) -> WidgetId { self.tree.root() }

  pub fn tree(&mut self) -> &mut WidgetTree { &mut self.tree }

  pub fn handle(&self) -> DialogHandle {
    DialogHandle { created: self.created.clone(), proxy: self.shell.proxy() }
  }

  /// Materialize the whole tree, apply the font, show the window and
  /// pump the host message queue until a quit signal; returns the
  /// quit code. Blocking: window creation and its message loop must
  /// share one thread.
  pub fn create_and_run(&mut self) -> i32 {
    let root = self.tree.root();
    // The host creates an overlapped window with a caption whether or
    // not the flag is set, but its chrome query takes the flags
    // literally; align them so the size math matches reality.
    let node = self.tree.node_mut(root);
    if node.style == WidgetStyle::OVERLAPPED {
      node.style |= WidgetStyle::CAPTION;
    }

    self.tree.create_recursive(root, None, &mut *self.shell);
    self.tree.apply_font_recursive(root, &mut *self.shell);

    let handle = self.tree.node(root).handle;
    if let Some(handle) = handle {
      self.shell.show(handle);
    }
    self.created.set(handle);

    self.shell.run_loop()
  }
}

impl DialogHandle {
  /// Block until the dialog's native handle exists; `None` means the
  /// host failed to create it.
  pub fn wait_created(&self) -> Option<NativeHandle> { self.created.wait() }

  /// Post a close request at the dialog if it has been created;
  /// otherwise a no-op. The request unwinds the message loop
  /// asynchronously.
  pub fn close(&self) {
    if let Some(handle) = self.created.peek() {
      self.proxy.post_close(handle);
    }
  }
}

#[cfg(test)]
mod tests {
  use std::thread;

  use dlgkit_geom::{rect, size2, Point};

  use super::*;
  use crate::{
    test_helper::TestShell,
    widget::{HAlign, WidgetStyle},
  };

  fn scenario_shell() -> TestShell {
    TestShell::new()
      .with_font_height(10)
      .with_chrome(size2(8, 34))
      .with_work_area(rect(0, 0, 1600, 1200))
      .with_measurer(|text| match text {
        "alpha" => size2(90, 20),
        "beta" => size2(50, 30),
        other => size2(8 * other.len() as u32, 10),
      })
  }

  fn build_dialog(shell: TestShell) -> Dialog {
    let mut dialog = Dialog::new(Box::new(shell), Some("setup".into()));
    let root = dialog.root();
    let group = dialog.tree().new_group(root, HAlign::Left);
    dialog.tree().new_label(group, "alpha");
    dialog.tree().new_label(group, "beta");
    dialog
  }

  #[test]
  fn close_from_a_second_thread_returns_the_quit_code() {
    let mut dialog = build_dialog(scenario_shell());
    let handle = dialog.handle();
    let closer = thread::spawn(move || {
      assert!(handle.wait_created().is_some());
      handle.close();
    });
    assert_eq!(dialog.create_and_run(), 0);
    closer.join().unwrap();
  }

  #[test]
  fn close_before_creation_is_a_no_op() {
    let dialog = build_dialog(scenario_shell());
    let handle = dialog.handle();
    handle.close();
    drop(dialog);
  }

  #[test]
  fn root_is_materialized_centered_with_chrome() {
    let shell = scenario_shell();
    let record = shell.record();
    let mut dialog = build_dialog(shell);
    let handle = dialog.handle();
    let closer = thread::spawn(move || {
      handle.wait_created();
      handle.close();
    });
    dialog.create_and_run();
    closer.join().unwrap();

    let record = record.borrow();
    let root = &record.created[0].req;
    // Group padded (110, 80) plus chrome (8, 34).
    assert_eq!(root.size, size2(118, 114));
    assert_eq!(root.pos, Point::new((1600 - 118) / 2, (1200 - 114) / 2));
    assert!(root.style.contains(WidgetStyle::CAPTION), "overlapped root gains a caption");
    assert_eq!(record.shown, vec![record.created[0].handle]);
  }

  #[test]
  fn overlapped_root_keeps_extra_styles_untouched() {
    let shell = scenario_shell();
    let record = shell.record();
    let mut dialog = build_dialog(shell);
    let root = dialog.root();
    dialog.tree().node_mut(root).style |= WidgetStyle::VISIBLE;
    let handle = dialog.handle();
    let closer = thread::spawn(move || {
      handle.wait_created();
      handle.close();
    });
    dialog.create_and_run();
    closer.join().unwrap();

    // Not the bare OVERLAPPED style, so no caption normalization.
    let record = record.borrow();
    assert!(!record.created[0].req.style.contains(WidgetStyle::CAPTION));
  }
}
