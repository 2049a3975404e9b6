//! Routing tree builder
//!
//! Inserts URL segment paths into a tree of [`ServiceNode`]s, one node per
//! distinct segment under a given parent.

use crate::errors::{Result, SwaggenError};
use crate::models::ServiceNode;

/// Insert `segments` under `nodes` and return the node for the full path
///
/// Missing nodes are appended in insertion order; existing nodes are reused,
/// so inserting the same path twice returns the same node.
pub fn add_node<'a, S: AsRef<str>>(nodes: &'a mut Vec<ServiceNode>, segments: &[S]) -> Result<&'a mut ServiceNode> {
    let (first, rest) = segments.split_first().ok_or(SwaggenError::EmptyUrlParts)?;
    let segment = first.as_ref();

    let index = match nodes.iter().position(|n| n.id == segment) {
        Some(index) => index,
        None => {
            nodes.push(ServiceNode::new(segment));
            nodes.len() - 1
        }
    };

    let node = &mut nodes[index];
    if rest.is_empty() {
        return Ok(node);
    }
    add_node(&mut node.nodes, rest)
}

/// Split a path template into its non-empty segments
pub fn url_segments(url: &str) -> Vec<&str> {
    url.split('/').filter(|part| !part.is_empty()).collect()
}
