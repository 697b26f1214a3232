//! Demand-driven layout resolution.
//!
//! Sizes flow bottom-up (leaf → root), positions flow top-down
//! (root → children); both are pulled through the per-node caches
//! rather than pushed eagerly. Invalidation never cascades: a parent
//! that already resolved keeps its cached value until the caller
//! invalidates it explicitly.

use dlgkit_geom::{Padding, Point, Size, FILL, ZERO_SIZE};
use smallvec::SmallVec;

use crate::{
  shell::Shell,
  widget::{HAlign, WidgetKind},
  widget_tree::{WidgetId, WidgetTree},
};

impl WidgetTree {
  /// The node's own size, computed on first read by its sizing rule.
  pub fn area(&mut self, id: WidgetId, shell: &dyn Shell) -> Size {
    if let Some(area) = self.node(id).area.get() {
      return *area;
    }
    let area = self.compute_area(id, shell);
    *self.node_mut(id).area.fill(area)
  }

  /// The node's insets, derived from the font's half line height; the
  /// root overrides them to zero (native chrome pads itself).
  pub fn padding(&mut self, id: WidgetId) -> Padding {
    if let Some(pad) = self.node(id).padding.get() {
      return *pad;
    }
    let pad = match self.node(id).kind {
      WidgetKind::Root { .. } => Padding::zero(),
      _ => self.font(id).padding(),
    };
    *self.node_mut(id).padding.fill(pad)
  }

  /// Area inflated by the insets on both axes — except that a fill
  /// axis passes through untouched, so the parent still recognizes it.
  pub fn area_padded(&mut self, id: WidgetId, shell: &dyn Shell) -> Size {
    let area = self.area(id, shell);
    let pad = self.padding(id);
    Size::new(
      if area.width == FILL { FILL } else { area.width + pad.horizontal() },
      if area.height == FILL { FILL } else { area.height + pad.vertical() },
    )
  }

  /// Absolute position, computed on first read by the placement rule
  /// of the node's parent: group children are stacked and aligned by
  /// the group, the root centers itself on the work area, and any
  /// other node sits at its parent's origin.
  pub fn pos(&mut self, id: WidgetId, shell: &dyn Shell) -> Point {
    if let Some(pos) = self.node(id).pos.get() {
      return *pos;
    }
    let pos = self.compute_pos(id, shell);
    *self.node_mut(id).pos.fill(pos)
  }

  /// Position offset by the top-left insets.
  pub fn pos_padded(&mut self, id: WidgetId, shell: &dyn Shell) -> Point {
    let pos = self.pos(id, shell);
    let pad = self.padding(id);
    Point::new(pos.x + pad.left as i32, pos.y + pad.top as i32)
  }

  /// Force-resolve the width of a node that reported the fill
  /// sentinel, from a width handed down by its sizing parent. The
  /// node keeps the raw width: `w` minus its own horizontal insets.
  pub fn override_width(&mut self, id: WidgetId, w: u32) {
    let pad = self.padding(id);
    self
      .node_mut(id)
      .area
      .update(|area| area.width = w - pad.horizontal());
  }

  /// Height counterpart of [`WidgetTree::override_width`].
  pub fn override_height(&mut self, id: WidgetId, h: u32) {
    let pad = self.padding(id);
    self
      .node_mut(id)
      .area
      .update(|area| area.height = h - pad.vertical());
  }

  pub fn invalidate_area(&mut self, id: WidgetId) { self.node_mut(id).area.invalidate(); }

  pub fn invalidate_padding(&mut self, id: WidgetId) { self.node_mut(id).padding.invalidate(); }

  pub fn invalidate_pos(&mut self, id: WidgetId) { self.node_mut(id).pos.invalidate(); }

  fn compute_area(&mut self, id: WidgetId, shell: &dyn Shell) -> Size {
    // Split the borrow: peek the rule immutably, then run it with full
    // tree access.
    enum Rule {
      Measure(String),
      Progress,
      Group,
      Root,
    }
    let rule = match &self.node(id).kind {
      WidgetKind::Label { text } => Rule::Measure(text.clone()),
      WidgetKind::ProgressBar => Rule::Progress,
      WidgetKind::Group { .. } => Rule::Group,
      WidgetKind::Root { .. } => Rule::Root,
    };
    match rule {
      Rule::Measure(text) => shell.measure_text(self.font(id), &text),
      Rule::Progress => Size::new(FILL, self.font(id).height * 2),
      Rule::Group => self.group_area(id, shell),
      Rule::Root => self.root_area(id, shell),
    }
  }

  /// Vertical stacking: width is the max over non-fill padded child
  /// widths, height the sum of padded child heights. Children that
  /// reported fill width are then resolved to the group width.
  fn group_area(&mut self, id: WidgetId, shell: &dyn Shell) -> Size {
    let children: SmallVec<[WidgetId; 8]> = self.children(id).collect();
    let mut fixup: SmallVec<[WidgetId; 4]> = SmallVec::new();
    let mut area = ZERO_SIZE;
    for child in children {
      let child_area = self.area_padded(child, shell);
      assert!(
        child_area.height != FILL,
        "a vertical group cannot host a height-filling child"
      );
      if child_area.width == FILL {
        fixup.push(child);
      } else {
        area.width = area.width.max(child_area.width);
      }
      area.height += child_area.height;
    }
    for child in fixup {
      self.override_width(child, area.width);
    }
    area
  }

  /// Root sizing: the single child's padded area plus whatever chrome
  /// the host adds for the root's style flags.
  fn root_area(&mut self, id: WidgetId, shell: &dyn Shell) -> Size {
    let child = self
      .children(id)
      .next()
      .expect("the root container requires a child");
    let child_area = self.area_padded(child, shell);
    assert!(
      !dlgkit_geom::has_fill(child_area),
      "the root child is still the fill sentinel; wrap it in a sizing group"
    );
    let node = self.node(id);
    let chrome = shell.chrome_size(node.style, node.style_ex, child_area);
    Size::new(child_area.width + chrome.width, child_area.height + chrome.height)
  }

  fn compute_pos(&mut self, id: WidgetId, shell: &dyn Shell) -> Point {
    if matches!(self.node(id).kind, WidgetKind::Root { .. }) {
      return self.root_pos(id, shell);
    }
    match self.parent(id) {
      Some(parent) if self.node(parent).kind.is_group() => self.pos_in_group(parent, id, shell),
      _ => Point::zero(),
    }
  }

  /// Center the root within the host's work area on both axes. Signed
  /// math: a dialog larger than the screen goes negative rather than
  /// wrapping.
  fn root_pos(&mut self, id: WidgetId, shell: &dyn Shell) -> Point {
    let area = self.area(id, shell);
    let work = shell.work_area();
    Point::new(
      work.origin.x + (work.size.width - area.width as i32) / 2,
      work.origin.y + (work.size.height - area.height as i32) / 2,
    )
  }

  /// Walk the group's children accumulating padded heights; at the
  /// target child apply the horizontal alignment within the group's
  /// resolved width. Fatal if `child` is not a member of `group`.
  fn pos_in_group(&mut self, group: WidgetId, child: WidgetId, shell: &dyn Shell) -> Point {
    let group_area = self.area(group, shell);
    let halign = match self.node(group).kind {
      WidgetKind::Group { halign } => halign,
      _ => unreachable!(),
    };
    let mut pos = self.pos_padded(group, shell);
    let members: SmallVec<[WidgetId; 8]> = self.children(group).collect();
    for member in members {
      let member_area = self.area_padded(member, shell);
      if member == child {
        match halign {
          HAlign::Left => {}
          HAlign::Center => pos.x += (group_area.width as i32 - member_area.width as i32) / 2,
          HAlign::Right => pos.x += group_area.width as i32 - member_area.width as i32,
        }
        return pos;
      }
      pos.y += member_area.height as i32;
    }
    panic!("not a child of this group");
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::Cell, rc::Rc};

  use dlgkit_geom::{rect, size2, uniform_padding};

  use super::*;
  use crate::{font::Font, test_helper::TestShell, widget_tree::WidgetTree};

  fn new_tree(shell: &TestShell) -> WidgetTree {
    WidgetTree::new(Font::system_default(shell), None)
  }

  /// Font height 10 → pad 5 on every side.
  fn scenario_shell() -> TestShell {
    TestShell::new()
      .with_font_height(10)
      .with_measurer(|text| match text {
        "alpha" => size2(90, 20),
        "beta" => size2(50, 30),
        other => size2(8 * other.len() as u32, 10),
      })
  }

  #[test]
  fn label_area_is_the_measured_text() {
    let shell = scenario_shell();
    let mut tree = new_tree(&shell);
    let label = tree.new_label(tree.root(), "alpha");
    assert_eq!(tree.area(label, &shell), size2(90, 20));
    assert_eq!(tree.area_padded(label, &shell), size2(100, 30));
  }

  #[test]
  fn area_is_computed_once() {
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let shell = TestShell::new().with_measurer(move |_| {
      counter.set(counter.get() + 1);
      size2(40, 12)
    });
    let mut tree = new_tree(&shell);
    let label = tree.new_label(tree.root(), "once");
    let first = tree.area(label, &shell);
    let second = tree.area(label, &shell);
    assert_eq!(first, second);
    assert_eq!(calls.get(), 1);
  }

  #[test]
  fn invalidation_never_cascades_upward() {
    let shell = scenario_shell();
    let mut tree = new_tree(&shell);
    let group = tree.new_group(tree.root(), HAlign::Left);
    let a = tree.new_label(group, "alpha");
    tree.new_label(group, "beta");

    let resolved = tree.area(group, &shell);
    tree.invalidate_area(a);
    // The group keeps its cached answer until explicitly invalidated.
    assert_eq!(tree.area(group, &shell), resolved);
    assert!(tree.node(a).area.is_stale());
  }

  #[test]
  fn progress_bar_fills_width_two_lines_high() {
    let shell = scenario_shell();
    let mut tree = new_tree(&shell);
    let group = tree.new_group(tree.root(), HAlign::Left);
    let bar = tree.new_progress_bar(group);
    assert_eq!(tree.area(bar, &shell), size2(FILL, 20));
  }

  #[test]
  fn padded_area_keeps_the_fill_sentinel() {
    let shell = scenario_shell();
    let mut tree = new_tree(&shell);
    let group = tree.new_group(tree.root(), HAlign::Left);
    let bar = tree.new_progress_bar(group);
    let padded = tree.area_padded(bar, &shell);
    assert_eq!(padded.width, FILL, "padding must not inflate a fill axis");
    assert_eq!(padded.height, 30);
  }

  #[test]
  fn group_is_max_width_and_summed_height() {
    let shell = scenario_shell();
    let mut tree = new_tree(&shell);
    let group = tree.new_group(tree.root(), HAlign::Left);
    tree.new_label(group, "alpha"); // padded (100, 30)
    tree.new_label(group, "beta"); // padded (60, 40)
    assert_eq!(tree.area(group, &shell), size2(100, 70));
  }

  #[test]
  fn fill_width_resolves_to_group_width_minus_own_insets() {
    let shell = scenario_shell();
    let mut tree = new_tree(&shell);
    let group = tree.new_group(tree.root(), HAlign::Left);
    tree.new_label(group, "alpha");
    let bar = tree.new_progress_bar(group);

    let group_area = tree.area(group, &shell);
    assert_eq!(group_area, size2(100, 60));
    // Raw width: 100 minus the bar's own 5+5 horizontal insets.
    assert_eq!(tree.area(bar, &shell), size2(90, 20));
    assert_eq!(tree.area_padded(bar, &shell), size2(100, 30));
  }

  #[test]
  fn stacked_children_left_aligned() {
    let shell = scenario_shell();
    let mut tree = new_tree(&shell);
    let group = tree.new_group(tree.root(), HAlign::Left);
    let a = tree.new_label(group, "alpha");
    let b = tree.new_label(group, "beta");

    assert_eq!(tree.area(group, &shell), size2(100, 70));
    let base = tree.pos_padded(group, &shell);
    let pos_a = tree.pos(a, &shell);
    let pos_b = tree.pos(b, &shell);
    assert_eq!(pos_a.x - base.x, 0);
    assert_eq!(pos_a.y - base.y, 0);
    assert_eq!(pos_b.x - base.x, 0);
    assert_eq!(pos_b.y - base.y, 30);
  }

  #[test]
  fn center_and_right_alignment_offsets() {
    for (halign, expect_x) in [(HAlign::Center, 20), (HAlign::Right, 40)] {
      let shell = scenario_shell();
      let mut tree = new_tree(&shell);
      let group = tree.new_group(tree.root(), halign);
      tree.new_label(group, "alpha"); // fixes group width at 100
      let b = tree.new_label(group, "beta"); // padded width 60

      let base = tree.pos_padded(group, &shell);
      let pos_b = tree.pos(b, &shell);
      assert_eq!(pos_b.x - base.x, expect_x);
      assert_eq!(pos_b.y - base.y, 30);
    }
  }

  #[test]
  #[should_panic(expected = "not a child of this group")]
  fn placement_for_a_non_member_is_fatal() {
    let shell = scenario_shell();
    let mut tree = new_tree(&shell);
    let outer = tree.new_group(tree.root(), HAlign::Left);
    tree.new_label(outer, "alpha");
    let inner = tree.new_group(outer, HAlign::Left);
    let grandchild = tree.new_label(inner, "beta");
    // A grandchild is not a direct member of the outer group.
    let _ = tree.pos_in_group(outer, grandchild, &shell);
  }

  #[test]
  fn override_width_subtracts_own_insets() {
    let shell = scenario_shell();
    let mut tree = new_tree(&shell);
    let group = tree.new_group(tree.root(), HAlign::Left);
    let label = tree.new_label(group, "beta"); // raw (50, 30)
    let _ = tree.area(label, &shell);
    tree.override_width(label, 120);
    assert_eq!(tree.area(label, &shell), size2(110, 30));
    tree.override_height(label, 50);
    assert_eq!(tree.area(label, &shell), size2(110, 40));
  }

  #[test]
  fn default_padding_is_font_derived_root_is_zero() {
    let shell = scenario_shell();
    let mut tree = new_tree(&shell);
    let label = tree.new_label(tree.root(), "alpha");
    assert_eq!(tree.padding(label), uniform_padding(5));
    let root = tree.root();
    assert_eq!(tree.padding(root), Padding::zero());
  }

  #[test]
  fn root_centers_on_the_work_area() {
    let shell = scenario_shell()
      .with_chrome(size2(8, 34))
      .with_work_area(rect(0, 0, 1600, 1200));
    let mut tree = new_tree(&shell);
    let group = tree.new_group(tree.root(), HAlign::Left);
    tree.new_label(group, "alpha");
    tree.new_label(group, "beta");

    let root = tree.root();
    // Group padded (110, 80); chrome adds (8, 34).
    assert_eq!(tree.area(root, &shell), size2(118, 114));
    let pos = tree.pos(root, &shell);
    assert_eq!(pos, Point::new((1600 - 118) / 2, (1200 - 114) / 2));
  }

  #[test]
  fn bare_node_sits_at_its_parents_origin() {
    let shell = scenario_shell();
    let mut tree = new_tree(&shell);
    let group = tree.new_group(tree.root(), HAlign::Left);
    tree.new_label(group, "alpha");
    tree.new_label(group, "beta");
    // The group itself has no distribution parent: origin position,
    // shifted by its own insets for the padded variant.
    assert_eq!(tree.pos(group, &shell), Point::zero());
    assert_eq!(tree.pos_padded(group, &shell), Point::new(5, 5));
  }

  #[test]
  #[should_panic(expected = "height-filling child")]
  fn height_fill_inside_a_vertical_group_is_fatal() {
    let shell = scenario_shell().with_measurer(|_| size2(10, FILL));
    let mut tree = new_tree(&shell);
    let group = tree.new_group(tree.root(), HAlign::Left);
    tree.new_label(group, "tall");
    let _ = tree.area(group, &shell);
  }
}
