// src/formatting/output_tree.rs
//! The rendered node tree and its linearization into text.

use crate::constants::{CHARS_PER_NODE_ESTIMATE, NESTED_INDENT};
use std::fmt::Write;

/// Rendered output of one block.
///
/// Only list blocks produce a `Container`. Whether a node is a container,
/// not whether it has children yet, decides its blank-line handling while
/// crawling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockContent {
    Leaf {
        lines: Vec<String>,
    },
    Container {
        lines: Vec<String>,
        children: Vec<BlockContent>,
    },
}

impl BlockContent {
    pub fn leaf<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        BlockContent::Leaf {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// A container whose children are filled in later by the crawler.
    pub fn container<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        BlockContent::Container {
            lines: lines.into_iter().map(Into::into).collect(),
            children: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[String] {
        match self {
            BlockContent::Leaf { lines } | BlockContent::Container { lines, .. } => lines,
        }
    }

    pub fn lines_mut(&mut self) -> &mut Vec<String> {
        match self {
            BlockContent::Leaf { lines } | BlockContent::Container { lines, .. } => lines,
        }
    }

    pub fn children(&self) -> Option<&[BlockContent]> {
        match self {
            BlockContent::Leaf { .. } => None,
            BlockContent::Container { children, .. } => Some(children),
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, BlockContent::Container { .. })
    }

    /// Replaces a container's children; leaves are returned unchanged.
    pub fn with_children(self, new_children: Vec<BlockContent>) -> Self {
        match self {
            BlockContent::Container { lines, .. } => BlockContent::Container {
                lines,
                children: new_children,
            },
            leaf @ BlockContent::Leaf { .. } => {
                if !new_children.is_empty() {
                    log::warn!("Dropping {} children attached to a leaf node", new_children.len());
                }
                leaf
            }
        }
    }

    /// Appends an empty line, separating this node from the next one.
    pub fn with_trailing_blank(mut self) -> Self {
        self.lines_mut().push(String::new());
        self
    }
}

/// Linearizes nodes: every line gets `indent` and a newline, and a
/// container's children follow its lines one tab deeper.
pub fn serialize(nodes: &[BlockContent], indent: &str) -> String {
    let mut output = String::with_capacity(nodes.len() * CHARS_PER_NODE_ESTIMATE);
    write_nodes(&mut output, nodes, indent);
    output
}

fn write_nodes(output: &mut String, nodes: &[BlockContent], indent: &str) {
    for node in nodes {
        for line in node.lines() {
            // Writing to a String cannot fail.
            let _ = writeln!(output, "{}{}", indent, line);
        }
        if let Some(children) = node.children() {
            let nested = format!("{}{}", indent, NESTED_INDENT);
            write_nodes(output, children, &nested);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nested_list_serialization() {
        let tree = vec![
            BlockContent::leaf(["Hello World"]),
            BlockContent::Container {
                lines: vec!["1. list item 1".into()],
                children: vec![BlockContent::Container {
                    lines: vec!["1. child of list item 1".into()],
                    children: vec![
                        BlockContent::leaf(["1. child of child of list item 1"]),
                        BlockContent::leaf(["2. child of child of list item 2"]),
                    ],
                }],
            },
            BlockContent::leaf(["2. list item 2"]),
        ];

        assert_eq!(
            serialize(&tree, ""),
            "Hello World
1. list item 1
\t1. child of list item 1
\t\t1. child of child of list item 1
\t\t2. child of child of list item 2
2. list item 2
"
        );
    }

    #[test]
    fn test_empty_container_matches_leaf_output() {
        let leaf = vec![BlockContent::leaf(["- item"])];
        let empty_container = vec![BlockContent::container(["- item"])];
        assert_eq!(serialize(&leaf, "  "), "  - item\n");
        assert_eq!(serialize(&empty_container, "  "), "  - item\n");
    }

    #[test]
    fn test_trailing_blank_is_indented_like_other_lines() {
        let tree = vec![BlockContent::Container {
            lines: vec!["- a".into()],
            children: vec![BlockContent::leaf(["- b"]).with_trailing_blank()],
        }];
        assert_eq!(serialize(&tree, ""), "- a\n\t- b\n\t\n");
    }

    #[test]
    fn test_with_children_only_affects_containers() {
        let child = BlockContent::leaf(["x"]);
        let container = BlockContent::container(["- a"]).with_children(vec![child.clone()]);
        assert_eq!(container.children(), Some(&[child.clone()][..]));

        let leaf = BlockContent::leaf(["a"]).with_children(vec![child]);
        assert_eq!(leaf.children(), None);
    }
}
