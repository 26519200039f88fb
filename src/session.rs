//! Validation session.
//!
//! A [`ModelSession`] owns everything whose lifetime is one document
//! validation: the object graph cache and the options. Concurrent validations
//! use independent sessions; nothing mutable is shared between them.
//!
//! The resolvers are implemented as methods on the session, spread over the
//! modules that own the corresponding types:
//! - color spaces: [`crate::colors`]
//! - patterns: [`crate::pattern`]
//! - structure tree: [`crate::structure`]

use crate::cache::ObjectGraphCache;
use crate::config::ModelOptions;
use crate::document::ObjectResolver;
use crate::error::Result;
use crate::object::ObjectRef;
use crate::structure::{parse_structure_tree, StructTreeRoot};

/// Per-document resolution context.
pub struct ModelSession<'d, D: ObjectResolver + ?Sized> {
    pub(crate) document: &'d D,
    pub(crate) cache: ObjectGraphCache,
    pub(crate) options: ModelOptions,
    /// Color space objects currently being resolved (outermost first).
    pub(crate) resolving: Vec<ObjectRef>,
    /// Number of nested resolutions cut by the depth limit or a cycle.
    pub(crate) truncations: usize,
}

impl<'d, D: ObjectResolver + ?Sized> ModelSession<'d, D> {
    /// Session with default options.
    pub fn new(document: &'d D) -> Self {
        Self::with_options(document, ModelOptions::default())
    }

    /// Session with explicit options.
    pub fn with_options(document: &'d D, options: ModelOptions) -> Self {
        Self {
            document,
            cache: ObjectGraphCache::new(),
            options,
            resolving: Vec::new(),
            truncations: 0,
        }
    }

    /// The underlying document.
    pub fn document(&self) -> &'d D {
        self.document
    }

    /// Session options.
    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    /// The session cache.
    pub fn cache(&self) -> &ObjectGraphCache {
        &self.cache
    }

    /// Typed structure tree of the document, `None` when it is not tagged.
    pub fn structure_tree(&self) -> Result<Option<StructTreeRoot>> {
        parse_structure_tree(self.document, &self.options)
    }
}

impl<'d, D: ObjectResolver + ?Sized> std::fmt::Debug for ModelSession<'d, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSession")
            .field("cache", &self.cache.stats())
            .field("options", &self.options)
            .finish()
    }
}
