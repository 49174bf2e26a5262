//! Ordered record of the nodes a lookup visited.

use std::fmt::{self, Display, Formatter};

use crate::common::{Id, Node};

#[derive(Debug, Clone, Default)]
/// Caller owned trace of a lookup, appended to in visiting order.
pub struct Path {
    nodes: Vec<Node>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    // === Getters ===

    /// Visited nodes, in visiting order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn ids(&self) -> Vec<Id> {
        self.nodes.iter().map(|node| *node.id()).collect()
    }

    /// Labels of the visited nodes, for display.
    pub fn labels(&self) -> Vec<&str> {
        self.nodes.iter().map(|node| node.label()).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The last visited node.
    pub fn last(&self) -> Option<&Node> {
        self.nodes.last()
    }

    // === Public Methods ===

    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.labels().join(" -> "))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn keeps_order() {
        let a = Node::new("a");
        let b = Node::new("b");

        let mut path = Path::new();
        assert!(path.is_empty());

        path.add_node(a.clone());
        path.add_node(b.clone());
        path.add_node(a.clone());

        assert_eq!(path.len(), 3);
        assert_eq!(path.ids(), vec![*a.id(), *b.id(), *a.id()]);
        assert_eq!(path.labels(), vec!["a", "b", "a"]);
        assert_eq!(path.last(), Some(&a));
        assert_eq!(path.to_string(), "a -> b -> a");

        path.clear();
        assert!(path.is_empty());
    }
}
