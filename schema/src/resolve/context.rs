//! Per-resolution state for recursive tree building
//!
//! A `ResolutionContext` lives for one top-level `resolve` call. It keeps the stack of field
//! sets currently being expanded, which turns cycles into `Recursive` markers and bounds the
//! nesting depth, and it decides which finished subtrees may be cached. The top-level tree is
//! always cached; nested subtrees only when they are closed.

use std::sync::Arc;

use tracing::{debug, warn};

use super::SerializationTreeResolver;
use crate::factory::{FieldSchemaBuilder, NestedResolver};
use crate::model::{FieldSet, FieldSetId};
use crate::tree::{NestedSchema, SerializationTree};

/// One field set being expanded
#[derive(Debug)]
struct Frame {
    id:              FieldSetId,
    /// Lowest stack index a `Recursive` marker in this subtree points at
    lowest_back_ref: Option<usize>,
    /// Depth bound was hit somewhere in this subtree
    truncated:       bool,
}

impl Frame {
    const fn new(id: FieldSetId) -> Self {
        Self {
            id,
            lowest_back_ref: None,
            truncated: false,
        }
    }

    /// A subtree is closed when it was fully expanded and only refers back to itself or below
    fn is_closed(&self, index: usize) -> bool {
        !self.truncated && self.lowest_back_ref.is_none_or(|lowest| lowest >= index)
    }

    fn refer_back(&mut self, index: usize) {
        self.lowest_back_ref = Some(self.lowest_back_ref.map_or(index, |lowest| lowest.min(index)));
    }

    fn absorb(&mut self, child: &Self) {
        self.truncated |= child.truncated;
        if let Some(index) = child.lowest_back_ref {
            self.refer_back(index);
        }
    }
}

/// Context for one resolution
pub(super) struct ResolutionContext<'r, B> {
    resolver: &'r SerializationTreeResolver<B>,
    stack:    Vec<Frame>,
}

impl<'r, B: FieldSchemaBuilder> ResolutionContext<'r, B> {
    /// Create a context with an empty stack
    pub(super) const fn new(resolver: &'r SerializationTreeResolver<B>) -> Self {
        Self {
            resolver,
            stack: Vec::new(),
        }
    }

    /// Resolve `field_set`, consulting and filling the resolver's cache
    pub(super) fn resolve(&mut self, field_set: &Arc<FieldSet>) -> Arc<SerializationTree> {
        let resolver = self.resolver;

        if let Some(tree) = resolver.cache().get(field_set) {
            debug!(field_set = field_set.name(), "Tree cache hit");
            return tree;
        }
        debug!(
            field_set = field_set.name(),
            depth = self.stack.len(),
            "Tree cache miss - resolving fields"
        );

        self.stack.push(Frame::new(FieldSetId::of(field_set)));
        let mut fields = Vec::with_capacity(field_set.len());
        for field in field_set.fields() {
            if !resolver.filter().accept(field) {
                continue;
            }
            if let Some(schema) = resolver.builder().build(field, self) {
                fields.push(schema);
            }
        }
        let tree = Arc::new(SerializationTree::new(
            field_set.name().map(str::to_string),
            fields,
        ));

        let Some(frame) = self.stack.pop() else {
            return tree;
        };
        let index = self.stack.len();
        // the entry point's own tree is the same on every resolve, truncated or not
        if index == 0 || frame.is_closed(index) {
            resolver.cache().insert(field_set, Arc::clone(&tree));
        } else {
            debug!(
                field_set = field_set.name(),
                truncated = frame.truncated,
                "Subtree depends on its entry point - not cached"
            );
        }
        if let Some(parent) = self.stack.last_mut() {
            parent.absorb(&frame);
        }

        tree
    }

    fn position(&self, id: FieldSetId) -> Option<usize> {
        self.stack.iter().position(|frame| frame.id == id)
    }
}

impl<B: FieldSchemaBuilder> NestedResolver for ResolutionContext<'_, B> {
    fn resolve_nested(&mut self, field_set: &Arc<FieldSet>) -> NestedSchema {
        if let Some(index) = self.position(FieldSetId::of(field_set)) {
            if let Some(current) = self.stack.last_mut() {
                current.refer_back(index);
            }
            return NestedSchema::Recursive {
                name: field_set.name().map(str::to_string),
            };
        }

        let max_depth = self.resolver.config().max_depth;
        if self.stack.len() >= max_depth {
            warn!(
                field_set = field_set.name(),
                max_depth, "Nesting depth exceeded - truncating nested record"
            );
            if let Some(current) = self.stack.last_mut() {
                current.truncated = true;
            }
            return NestedSchema::Truncated;
        }

        NestedSchema::Tree(self.resolve(field_set))
    }
}
