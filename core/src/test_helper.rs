//! A deterministic in-memory [`Shell`] for tests.
//!
//! Fixed font metrics, fixed chrome and work area, a pluggable text
//! measurer, and a recording of every host call so tests can assert
//! exactly what the engine asked for. The message loop is an mpsc
//! channel: [`Shell::run_loop`] drains it, the proxy posts into it —
//! the same shape as a native get/post message pump.

use std::{
  cell::{Cell, RefCell},
  rc::Rc,
  sync::{
    mpsc::{channel, Receiver, Sender},
    Arc, Mutex,
  },
};

use dlgkit_geom::{rect, Rect, Size};

use crate::{
  font::Font,
  shell::{CreateWidget, FontHandle, FontInfo, NativeHandle, Shell, ShellProxy},
  widget::{WidgetStyle, WidgetStyleEx},
};

/// One materialized widget: the handle the host handed back plus the
/// full creation request.
#[derive(Debug, Clone)]
pub struct CreatedWidget {
  pub handle: NativeHandle,
  pub req: CreateWidget,
}

/// Everything the engine asked the host to do, in call order.
#[derive(Default)]
pub struct ShellRecord {
  pub created: Vec<CreatedWidget>,
  pub fonts_set: Vec<(NativeHandle, FontHandle)>,
  pub shown: Vec<NativeHandle>,
  pub closed: Vec<NativeHandle>,
}

enum ShellMsg {
  Close(NativeHandle),
}

struct TestShellProxy {
  tx: Mutex<Sender<ShellMsg>>,
}

impl ShellProxy for TestShellProxy {
  fn post_close(&self, handle: NativeHandle) {
    // The loop may already be gone; a close at a dead queue is fine.
    let _ = self.tx.lock().unwrap().send(ShellMsg::Close(handle));
  }
}

pub struct TestShell {
  font_height: u32,
  font_handle: Option<FontHandle>,
  chrome: Size,
  work_area: Rect,
  fail_creation: bool,
  measurer: Option<Box<dyn Fn(&str) -> Size>>,
  record: Rc<RefCell<ShellRecord>>,
  next_handle: Cell<u64>,
  tx: Sender<ShellMsg>,
  rx: Receiver<ShellMsg>,
}

impl TestShell {
  pub fn new() -> Self {
    let (tx, rx) = channel();
    TestShell {
      font_height: 16,
      font_handle: Some(FontHandle(1)),
      chrome: Size::new(8, 34),
      work_area: rect(0, 0, 1600, 1200),
      fail_creation: false,
      measurer: None,
      record: Rc::default(),
      next_handle: Cell::new(1),
      tx,
      rx,
    }
  }

  pub fn with_font_height(mut self, height: u32) -> Self {
    self.font_height = height;
    self
  }

  /// Simulate a host that could not create the dialog font.
  pub fn with_no_font(mut self) -> Self {
    self.font_handle = None;
    self
  }

  pub fn with_chrome(mut self, chrome: Size) -> Self {
    self.chrome = chrome;
    self
  }

  pub fn with_work_area(mut self, work_area: Rect) -> Self {
    self.work_area = work_area;
    self
  }

  /// Replace the default character-grid measurer.
  pub fn with_measurer(mut self, measurer: impl Fn(&str) -> Size + 'static) -> Self {
    self.measurer = Some(Box::new(measurer));
    self
  }

  /// Simulate a host whose widget creation fails.
  pub fn with_create_failure(mut self) -> Self {
    self.fail_creation = true;
    self
  }

  /// Shared view of the call recording; clone it out before boxing
  /// the shell into a dialog.
  pub fn record(&self) -> Rc<RefCell<ShellRecord>> { self.record.clone() }
}

impl Default for TestShell {
  fn default() -> Self { Self::new() }
}

impl Shell for TestShell {
  fn default_font(&self) -> FontInfo {
    FontInfo { height: self.font_height, handle: self.font_handle }
  }

  fn measure_text(&self, font: &Font, text: &str) -> Size {
    match &self.measurer {
      Some(measurer) => measurer(text),
      // Character grid: half-height advance per char, one line tall.
      None => Size::new(text.chars().count() as u32 * (font.height / 2).max(1), font.height),
    }
  }

  fn chrome_size(&self, _style: WidgetStyle, _style_ex: WidgetStyleEx, _content: Size) -> Size {
    self.chrome
  }

  fn work_area(&self) -> Rect { self.work_area }

  fn create_widget(&mut self, req: &CreateWidget) -> Option<NativeHandle> {
    if self.fail_creation {
      return None;
    }
    let handle = NativeHandle(self.next_handle.get());
    self.next_handle.set(handle.0 + 1);
    self
      .record
      .borrow_mut()
      .created
      .push(CreatedWidget { handle, req: req.clone() });
    Some(handle)
  }

  fn set_font(&mut self, handle: NativeHandle, font: FontHandle) {
    self.record.borrow_mut().fonts_set.push((handle, font));
  }

  fn show(&mut self, handle: NativeHandle) { self.record.borrow_mut().shown.push(handle); }

  fn run_loop(&mut self) -> i32 {
    while let Ok(msg) = self.rx.recv() {
      match msg {
        ShellMsg::Close(handle) => {
          self.record.borrow_mut().closed.push(handle);
          return 0;
        }
      }
    }
    -1
  }

  fn proxy(&self) -> Arc<dyn ShellProxy> {
    Arc::new(TestShellProxy { tx: Mutex::new(self.tx.clone()) })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_measurer_is_a_character_grid() {
    let shell = TestShell::new();
    let font = Font { height: 16, pad: 8, handle: None };
    assert_eq!(shell.measure_text(&font, "abcd"), Size::new(32, 16));
    assert_eq!(shell.measure_text(&font, ""), Size::new(0, 16));
  }

  #[test]
  fn proxy_close_unwinds_the_loop() {
    let mut shell = TestShell::new();
    let proxy = shell.proxy();
    proxy.post_close(NativeHandle(7));
    assert_eq!(shell.run_loop(), 0);
    assert_eq!(shell.record().borrow().closed, vec![NativeHandle(7)]);
  }
}
