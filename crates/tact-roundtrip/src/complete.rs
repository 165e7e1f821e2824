//! Wrapping generated payloads in their metadata envelope.

use tact_syntax::{Node, NodeMeta};

/// Wrap a bare payload as a node carrying the generated sentinel metadata.
pub fn complete<T>(node: T) -> Node<T> {
    Node::new(node, NodeMeta::generated())
}
