use indextree::{Arena, Node, NodeId};

use crate::widget::WidgetNode;

/// Index of a widget node inside the tree's arena. The arena owns the
/// node; ids are cheap copies used for lookup only.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash)]
pub struct WidgetId(pub(crate) NodeId);

pub(crate) type TreeArena = Arena<WidgetNode>;

impl WidgetId {
  /// Returns a reference to the node data.
  pub(crate) fn get(self, tree: &TreeArena) -> Option<&WidgetNode> {
    tree.get(self.0).map(Node::get)
  }

  /// Returns a mutable reference to the node data.
  pub(crate) fn get_mut(self, tree: &mut TreeArena) -> Option<&mut WidgetNode> {
    tree.get_mut(self.0).map(Node::get_mut)
  }

  pub(crate) fn parent(self, tree: &TreeArena) -> Option<WidgetId> {
    self.node_feature(tree, Node::parent)
  }

  pub(crate) fn first_child(self, tree: &TreeArena) -> Option<WidgetId> {
    self.node_feature(tree, Node::first_child)
  }

  pub(crate) fn last_child(self, tree: &TreeArena) -> Option<WidgetId> {
    self.node_feature(tree, Node::last_child)
  }

  pub(crate) fn children(self, tree: &TreeArena) -> impl Iterator<Item = WidgetId> + '_ {
    self.0.children(tree).map(WidgetId)
  }

  pub(crate) fn descendants(self, tree: &TreeArena) -> impl Iterator<Item = WidgetId> + '_ {
    self.0.descendants(tree).map(WidgetId)
  }

  pub(crate) fn ancestors(self, tree: &TreeArena) -> impl Iterator<Item = WidgetId> + '_ {
    self.0.ancestors(tree).map(WidgetId)
  }

  pub(crate) fn append(self, child: WidgetId, tree: &mut TreeArena) {
    self.0.append(child.0, tree);
  }

  /// Return the single child of this widget, panic if it has more.
  pub(crate) fn single_child(self, tree: &TreeArena) -> Option<WidgetId> {
    assert_eq!(self.first_child(tree), self.last_child(tree));
    self.first_child(tree)
  }

  fn node_feature(
    self, tree: &TreeArena, method: impl Fn(&Node<WidgetNode>) -> Option<NodeId>,
  ) -> Option<WidgetId> {
    tree.get(self.0).and_then(method).map(WidgetId)
  }

  pub(crate) fn assert_get(self, tree: &TreeArena) -> &WidgetNode {
    self.get(tree).expect("widget not exists in the tree")
  }

  pub(crate) fn assert_get_mut(self, tree: &mut TreeArena) -> &mut WidgetNode {
    self.get_mut(tree).expect("widget not exists in the tree")
  }
}
