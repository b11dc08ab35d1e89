//! Pre-order flattening of index structures

use crate::types::{Node, Structure};

/// Lazy pre-order walk over a structure.
///
/// Nested lists at the root are unwrapped without being yielded themselves;
/// every node is yielded before its children, children left to right.
pub struct Flatten<'a> {
    stack: Vec<Entry<'a>>,
}

enum Entry<'a> {
    Structure(&'a Structure),
    Node(&'a Node),
}

impl<'a> Iterator for Flatten<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(entry) = self.stack.pop() {
            match entry {
                Entry::Structure(Structure::Many(items)) => {
                    self.stack.extend(items.iter().rev().map(Entry::Structure));
                }
                Entry::Structure(Structure::Single(node)) | Entry::Node(node) => {
                    self.stack.extend(node.nodes.iter().rev().map(Entry::Node));
                    return Some(node);
                }
            }
        }
        None
    }
}

impl Structure {
    /// Fresh pre-order iterator; call again to restart
    pub fn iter_nodes(&self) -> Flatten<'_> {
        Flatten {
            stack: vec![Entry::Structure(self)],
        }
    }
}
