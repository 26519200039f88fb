//! Inheritable resource scopes.
//!
//! Content nested inside a page (tiling patterns, form XObjects, annotation
//! appearances) resolves named resources against its own resource dictionary
//! first and then against every enclosing one. [`InheritableResources`] models
//! that as a persistent parent-linked chain: extending a scope allocates a new
//! head node pointing at the old one, so a scope observed by one consumer never
//! changes underneath it and the chain cannot contain a cycle.

use crate::document::ObjectResolver;
use crate::object::{Object, ObjectRef};
use std::sync::Arc;

/// Handle to a raw descriptor (color space, pattern, shading, ...).
///
/// The object is kept exactly as found, so an indirect descriptor still
/// carries its [`ObjectRef`], which is its identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    object: Object,
    inherited: bool,
}

impl Descriptor {
    /// Descriptor that was not inherited from an enclosing scope.
    pub fn new(object: Object) -> Self {
        Self {
            object,
            inherited: false,
        }
    }

    /// Descriptor found in an enclosing scope.
    pub fn inherited(object: Object) -> Self {
        Self {
            object,
            inherited: true,
        }
    }

    /// The raw object.
    pub fn object(&self) -> &Object {
        &self.object
    }

    /// Identity of the descriptor: its object reference when it is indirect.
    pub fn key(&self) -> Option<ObjectRef> {
        self.object.as_reference()
    }

    /// Whether the descriptor came from an enclosing scope.
    pub fn is_inherited(&self) -> bool {
        self.inherited
    }
}

#[derive(Debug)]
struct ResourceLayer {
    resources: Object,
    parent: InheritableResources,
    depth: usize,
}

/// Persistent chain of resource dictionaries, innermost first.
#[derive(Debug, Clone, Default)]
pub struct InheritableResources {
    head: Option<Arc<ResourceLayer>>,
}

impl InheritableResources {
    /// The root scope: no resources available.
    pub const EMPTY: InheritableResources = InheritableResources { head: None };

    /// New scope with `layer` on top of `self`.
    ///
    /// `self` is left untouched; both scopes share the common tail.
    pub fn extend(&self, layer: Object) -> InheritableResources {
        InheritableResources {
            head: Some(Arc::new(ResourceLayer {
                resources: layer,
                parent: self.clone(),
                depth: self.depth() + 1,
            })),
        }
    }

    /// Number of layers in the chain.
    pub fn depth(&self) -> usize {
        self.head.as_ref().map_or(0, |layer| layer.depth)
    }

    /// True for the root scope.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Iterate the resource dictionaries, innermost first.
    pub fn layers(&self) -> Layers<'_> {
        Layers {
            next: self.head.as_deref(),
        }
    }

    /// True when both handles point at the same chain node.
    pub fn ptr_eq(&self, other: &InheritableResources) -> bool {
        match (&self.head, &other.head) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Look up `name` in the `category` subdictionary (`ColorSpace`, `Font`, ...).
    ///
    /// The innermost layer defining the key wins. The returned descriptor is
    /// flagged as inherited when that layer is not the innermost one.
    pub fn lookup<D: ObjectResolver + ?Sized>(
        &self,
        document: &D,
        category: &str,
        name: &str,
    ) -> Option<Descriptor> {
        for (index, layer) in self.layers().enumerate() {
            let entry = document
                .resolve_dict(layer)
                .and_then(|resources| resources.get(category))
                .and_then(|sub| document.resolve_dict(sub))
                .and_then(|sub| sub.get(name))
                .filter(|entry| !entry.is_null());
            if let Some(entry) = entry {
                return Some(if index == 0 {
                    Descriptor::new(entry.clone())
                } else {
                    Descriptor::inherited(entry.clone())
                });
            }
        }
        None
    }

    /// Look up a named color space.
    pub fn color_space<D: ObjectResolver + ?Sized>(&self, document: &D, name: &str) -> Option<Descriptor> {
        self.lookup(document, "ColorSpace", name)
    }

    /// Look up a named pattern.
    pub fn pattern<D: ObjectResolver + ?Sized>(&self, document: &D, name: &str) -> Option<Descriptor> {
        self.lookup(document, "Pattern", name)
    }

    /// Look up a named shading.
    pub fn shading<D: ObjectResolver + ?Sized>(&self, document: &D, name: &str) -> Option<Descriptor> {
        self.lookup(document, "Shading", name)
    }

    /// Look up a named graphics state parameter dictionary.
    pub fn ext_g_state<D: ObjectResolver + ?Sized>(&self, document: &D, name: &str) -> Option<Descriptor> {
        self.lookup(document, "ExtGState", name)
    }

    /// Look up a named XObject.
    pub fn x_object<D: ObjectResolver + ?Sized>(&self, document: &D, name: &str) -> Option<Descriptor> {
        self.lookup(document, "XObject", name)
    }

    /// Look up a named font.
    pub fn font<D: ObjectResolver + ?Sized>(&self, document: &D, name: &str) -> Option<Descriptor> {
        self.lookup(document, "Font", name)
    }
}

/// Iterator over the layers of an [`InheritableResources`] chain.
pub struct Layers<'a> {
    next: Option<&'a ResourceLayer>,
}

impl<'a> Iterator for Layers<'a> {
    type Item = &'a Object;

    fn next(&mut self) -> Option<Self::Item> {
        let layer = self.next?;
        self.next = layer.parent.head.as_deref();
        Some(&layer.resources)
    }
}
