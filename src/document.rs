//! Raw document access.
//!
//! The tokenizer and cross-reference machinery live outside this crate. All
//! the model layer needs from a parsed document is the ability to look up an
//! indirect object by reference, which is what [`ObjectResolver`] captures.
//! The provided methods build the descriptor queries the resolvers rely on on
//! top of that single lookup.

use crate::error::{Error, Result};
use crate::object::{Dictionary, Object, ObjectRef};
use crate::resources::Descriptor;
use std::collections::HashMap;

/// Maximum length of a reference-to-reference chain followed by [`ObjectResolver::resolve`].
const MAX_REFERENCE_HOPS: usize = 16;

/// Kind of a pattern dictionary (`PatternType` entry).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// `PatternType 1`
    Tiling,
    /// `PatternType 2`
    Shading,
}

/// Read access to the objects of a parsed document.
pub trait ObjectResolver {
    /// Look up an indirect object.
    fn get(&self, obj_ref: ObjectRef) -> Option<&Object>;

    /// The document catalog, if known.
    fn catalog(&self) -> Option<&Object> {
        None
    }

    /// Follow references until a direct object is reached.
    ///
    /// `Null` and dangling references are reported as absent.
    fn resolve<'a>(&'a self, obj: &'a Object) -> Option<&'a Object> {
        let mut current = obj;
        for _ in 0..MAX_REFERENCE_HOPS {
            match current {
                Object::Reference(r) => current = self.get(*r)?,
                Object::Null => return None,
                _ => return Some(current),
            }
        }
        log::debug!("Reference chain longer than {} hops, treating as absent", MAX_REFERENCE_HOPS);
        None
    }

    /// Resolve `obj` and read it as a dictionary (streams included).
    fn resolve_dict<'a>(&'a self, obj: &'a Object) -> Option<&'a Dictionary> {
        self.resolve(obj)?.as_dict()
    }

    /// Resolved value of `key` in the dictionary `node`.
    fn dictionary_value<'a>(&'a self, node: &'a Object, key: &str) -> Option<&'a Object> {
        let dict = self.resolve_dict(node)?;
        self.resolve(dict.get(key)?)
    }

    /// Declared color space family of a descriptor.
    ///
    /// A name is its own family; an array declares its family in its first
    /// element. Inline image abbreviations are expanded.
    fn declared_family<'a>(&'a self, descriptor: &'a Descriptor) -> Option<&'a str> {
        let name = match self.resolve(descriptor.object())? {
            Object::Name(name) => name.as_str(),
            Object::Array(items) => self.resolve(items.first()?)?.as_name()?,
            _ => return None,
        };
        Some(match name {
            "G" => "DeviceGray",
            "RGB" => "DeviceRGB",
            "CMYK" => "DeviceCMYK",
            "I" => "Indexed",
            other => other,
        })
    }

    /// Operand of a color space array (`index` counts the family name as 0).
    fn color_space_operand<'a>(&'a self, descriptor: &'a Descriptor, index: usize) -> Option<&'a Object> {
        let items = self.resolve(descriptor.object())?.as_array()?;
        self.resolve(items.get(index)?)
    }

    /// Unresolved operand of a color space array.
    ///
    /// Nested color spaces must keep their reference so that their identity
    /// survives into the cache.
    fn raw_color_space_operand<'a>(
        &'a self,
        descriptor: &'a Descriptor,
        index: usize,
    ) -> Option<&'a Object> {
        let items = self.resolve(descriptor.object())?.as_array()?;
        items.get(index).filter(|obj| !obj.is_null())
    }

    /// Number of color components of a descriptor.
    fn component_count(&self, descriptor: &Descriptor) -> Option<usize> {
        match self.declared_family(descriptor)? {
            "DeviceGray" | "CalGray" | "Separation" | "Indexed" | "Pattern" => Some(1),
            "DeviceRGB" | "CalRGB" | "Lab" => Some(3),
            "DeviceCMYK" => Some(4),
            "DeviceN" => self
                .color_space_operand(descriptor, 1)
                .and_then(|names| names.as_array())
                .map(|names| names.len()),
            "ICCBased" => self
                .color_space_operand(descriptor, 1)
                .and_then(|stream| stream.as_dict())
                .and_then(|dict| dict.get("N"))
                .and_then(|n| self.resolve(n))
                .and_then(|n| n.as_integer())
                .and_then(|n| usize::try_from(n).ok()),
            _ => None,
        }
    }

    /// Whether the descriptor was inherited from an enclosing resource scope.
    fn is_inherited_default(&self, descriptor: &Descriptor) -> bool {
        descriptor.is_inherited()
    }

    /// Declared kind of a pattern descriptor.
    fn pattern_kind(&self, descriptor: &Descriptor) -> Option<PatternKind> {
        match self
            .dictionary_value(descriptor.object(), "PatternType")?
            .as_integer()?
        {
            1 => Some(PatternKind::Tiling),
            2 => Some(PatternKind::Shading),
            _ => None,
        }
    }

    /// Resource dictionary embedded in a tiling pattern.
    fn embedded_resources<'a>(&'a self, descriptor: &'a Descriptor) -> Option<&'a Object> {
        self.dictionary_value(descriptor.object(), "Resources")
            .filter(|resources| resources.as_dict().is_some())
    }
}

/// In-memory object table.
///
/// Used by hosts that already parsed a file into [`Object`]s, and by tests
/// that assemble documents by hand.
#[derive(Debug, Clone, Default)]
pub struct CosDocument {
    objects: HashMap<ObjectRef, Object>,
    catalog: Option<ObjectRef>,
    next_id: u32,
}

impl CosDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
            catalog: None,
            next_id: 1,
        }
    }

    /// Store an object under an explicit reference, replacing any previous one.
    pub fn insert(&mut self, obj_ref: ObjectRef, object: Object) {
        self.next_id = self.next_id.max(obj_ref.id.saturating_add(1));
        self.objects.insert(obj_ref, object);
    }

    /// Store an object under the next free object number.
    pub fn add(&mut self, object: Object) -> ObjectRef {
        let obj_ref = ObjectRef::new(self.next_id, 0);
        self.insert(obj_ref, object);
        obj_ref
    }

    /// Mark an object as the document catalog.
    pub fn set_catalog(&mut self, obj_ref: ObjectRef) {
        self.catalog = Some(obj_ref);
    }

    /// Look up an object, failing when it does not exist.
    pub fn get_required(&self, obj_ref: ObjectRef) -> Result<&Object> {
        self.objects
            .get(&obj_ref)
            .ok_or(Error::ObjectNotFound(obj_ref.id, obj_ref.gen))
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when no object is stored.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl ObjectResolver for CosDocument {
    fn get(&self, obj_ref: ObjectRef) -> Option<&Object> {
        self.objects.get(&obj_ref)
    }

    fn catalog(&self) -> Option<&Object> {
        self.catalog.and_then(|r| self.objects.get(&r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(entries: Vec<(&str, Object)>) -> Object {
        Object::Dictionary(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    #[test]
    fn test_resolve_follows_reference_chain() {
        let mut doc = CosDocument::new();
        let target = doc.add(Object::Integer(7));
        let middle = doc.add(Object::Reference(target));

        let obj = Object::Reference(middle);
        assert_eq!(doc.resolve(&obj), Some(&Object::Integer(7)));
    }

    #[test]
    fn test_resolve_dangling_and_null() {
        let doc = CosDocument::new();
        assert!(doc.resolve(&Object::reference(99, 0)).is_none());
        assert!(doc.resolve(&Object::Null).is_none());
    }

    #[test]
    fn test_resolve_self_reference_terminates() {
        let mut doc = CosDocument::new();
        doc.insert(ObjectRef::new(1, 0), Object::reference(1, 0));
        assert!(doc.resolve(&Object::reference(1, 0)).is_none());
    }

    #[test]
    fn test_get_required() {
        let mut doc = CosDocument::new();
        let r = doc.add(Object::Boolean(true));
        assert!(doc.get_required(r).is_ok());
        match doc.get_required(ObjectRef::new(42, 0)) {
            Err(Error::ObjectNotFound(42, 0)) => {},
            other => panic!("Expected ObjectNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_declared_family() {
        let mut doc = CosDocument::new();
        let name = doc.add(Object::name("Lab"));

        let direct = Descriptor::new(Object::name("RGB"));
        assert_eq!(doc.declared_family(&direct), Some("DeviceRGB"));

        let array = Descriptor::new(Object::Array(vec![Object::Reference(name), dict(vec![])]));
        assert_eq!(doc.declared_family(&array), Some("Lab"));

        let number = Descriptor::new(Object::Integer(3));
        assert_eq!(doc.declared_family(&number), None);
    }

    #[test]
    fn test_component_count() {
        let mut doc = CosDocument::new();
        let icc = doc.add(Object::Stream {
            dict: [("N".to_string(), Object::Integer(4))].into_iter().collect(),
            data: bytes::Bytes::new(),
        });

        let icc_cs = Descriptor::new(Object::Array(vec![Object::name("ICCBased"), Object::Reference(icc)]));
        assert_eq!(doc.component_count(&icc_cs), Some(4));

        let device_n = Descriptor::new(Object::Array(vec![
            Object::name("DeviceN"),
            Object::Array(vec![Object::name("Cyan"), Object::name("Spot")]),
            Object::name("DeviceCMYK"),
        ]));
        assert_eq!(doc.component_count(&device_n), Some(2));
        assert_eq!(doc.component_count(&Descriptor::new(Object::name("DeviceGray"))), Some(1));
    }

    #[test]
    fn test_pattern_kind() {
        let mut doc = CosDocument::new();
        let tiling = doc.add(dict(vec![("PatternType", Object::Integer(1))]));
        let shading = doc.add(dict(vec![("PatternType", Object::Integer(2))]));
        let bogus = doc.add(dict(vec![("PatternType", Object::Integer(3))]));

        assert_eq!(doc.pattern_kind(&Descriptor::new(Object::Reference(tiling))), Some(PatternKind::Tiling));
        assert_eq!(doc.pattern_kind(&Descriptor::new(Object::Reference(shading))), Some(PatternKind::Shading));
        assert_eq!(doc.pattern_kind(&Descriptor::new(Object::Reference(bogus))), None);
    }

    #[test]
    fn test_dictionary_value_resolves_references() {
        let mut doc = CosDocument::new();
        let value = doc.add(Object::name("StructElem"));
        let node = dict(vec![("Type", Object::Reference(value))]);
        assert_eq!(doc.dictionary_value(&node, "Type").and_then(|o| o.as_name()), Some("StructElem"));
        assert!(doc.dictionary_value(&node, "S").is_none());
    }
}
