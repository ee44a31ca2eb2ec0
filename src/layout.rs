//! Node-level layout helpers.
//!
//! Utilities for composing two columns of nodes side by side, bottom
//! aligned, before the tree ever reaches the renderer. Useful for panels
//! where a short column of labels sits next to a taller column of content
//! and both should end on the same row.

use crate::dom::node::{text, hdiv, Node, NodeKind};
use crate::measure::visual_width;

/// Approximate rendered width of a node without a full render pass.
///
/// Text leaves measure their payload ANSI-aware; vertical groupings sum
/// their children. Other kinds report zero, same as an unmeasured box.
pub fn node_width(node: &Node) -> usize {
    match node.kind {
        NodeKind::Text | NodeKind::Span => visual_width(&node.text),
        NodeKind::Div | NodeKind::Fragment => node.children.iter().map(node_width).sum(),
        _ => 0,
    }
}

/// Widest node in a list, by [`node_width`].
pub fn max_node_width(nodes: &[Node]) -> usize {
    nodes.iter().map(node_width).max().unwrap_or(0)
}

/// Approximate rendered height of a node without a full render pass.
///
/// Fragments render their children inline and take the tallest. Block
/// containers whose children are all inline collapse to a single row;
/// otherwise children stack and heights sum. Everything else is one row.
pub fn node_height(node: &Node) -> usize {
    match node.kind {
        NodeKind::Text | NodeKind::LineBreak => 1,
        NodeKind::Fragment => node.children.iter().map(node_height).max().unwrap_or(0),
        NodeKind::Div
        | NodeKind::Span
        | NodeKind::Heading1
        | NodeKind::Heading2
        | NodeKind::Paragraph
        | NodeKind::List
        | NodeKind::ListItem
        | NodeKind::Button => {
            let all_inline = node.children.iter().all(|child| {
                !matches!(
                    child.kind,
                    NodeKind::Div
                        | NodeKind::LineBreak
                        | NodeKind::Heading1
                        | NodeKind::Heading2
                        | NodeKind::Paragraph
                        | NodeKind::List
                        | NodeKind::ListItem
                )
            });
            if all_inline && !node.children.is_empty() {
                return 1;
            }
            node.children.iter().map(node_height).sum::<usize>().max(1)
        }
        _ => 1,
    }
}

/// Total stacked height of a list of nodes, by [`node_height`].
pub fn total_node_height(nodes: &[Node]) -> usize {
    nodes.iter().map(node_height).sum()
}

/// Merge two node columns side by side, aligned at the bottom.
///
/// The shorter column is padded at the top with empty rows. Rows with both
/// sides present get `space` columns of separation. Each returned node is
/// one horizontal row.
pub fn merge_align_bottom(a: Vec<Node>, b: Vec<Node>, space: usize) -> Vec<Node> {
    merge_rows(a, b, space, false)
}

/// Like [`merge_align_bottom`], additionally padding the left column to
/// its widest member so the right column starts at one x position.
pub fn merge_align_bottom_aligned(a: Vec<Node>, b: Vec<Node>, space: usize) -> Vec<Node> {
    merge_rows(a, b, space, true)
}

fn merge_rows(a: Vec<Node>, b: Vec<Node>, space: usize, align_widths: bool) -> Vec<Node> {
    if a.is_empty() {
        return b;
    }
    if b.is_empty() {
        return a;
    }

    let left_width = if align_widths { max_node_width(&a) } else { 0 };
    let rows = a.len().max(b.len());
    let a_pad = rows - a.len();
    let b_pad = rows - b.len();

    let mut a = a.into_iter();
    let mut b = b.into_iter();
    let mut out = Vec::with_capacity(rows);

    for row in 0..rows {
        let left = (row >= a_pad).then(|| a.next()).flatten();
        let right = (row >= b_pad).then(|| b.next()).flatten();
        let node = match (left, right) {
            (Some(left), Some(right)) => {
                let gap = if align_widths {
                    (left_width - node_width(&left)) + space
                } else {
                    space
                };
                hdiv(vec![left, text(" ".repeat(gap)), right])
            }
            (Some(left), None) => left,
            (None, Some(right)) => {
                if align_widths {
                    hdiv(vec![text(" ".repeat(left_width + space)), right])
                } else {
                    right
                }
            }
            (None, None) => unreachable!("row without a node on either side"),
        };
        out.push(node);
    }
    out
}
