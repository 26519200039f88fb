//! Builder for typed structure trees.
//!
//! Reads the StructTreeRoot and StructElem dictionaries according to PDF spec
//! Section 14.7 into [`StructElem`] nodes.
//!
//! Elements reachable from several parents are built once per parent. Cycles
//! in `/K` are cut using the chain of element references from the root to the
//! node being built.

use super::role_map::RoleMap;
use super::types::{StructElem, StructTreeRoot};
use crate::config::ModelOptions;
use crate::document::ObjectResolver;
use crate::error::{Error, Result};
use crate::object::{Dictionary, Object, ObjectRef};

/// Parse the structure tree of a document.
///
/// Reads the StructTreeRoot from the document catalog and recursively builds
/// all structure elements.
///
/// # Arguments
/// * `document` - The document
/// * `options` - Session options (structure depth limit)
///
/// # Returns
/// * `Ok(Some(StructTreeRoot))` - If the document has a structure tree
/// * `Ok(None)` - If the document is not tagged (no StructTreeRoot, or one
///   that is not a dictionary)
/// * `Err(Error)` - If the document has no catalog dictionary
pub fn parse_structure_tree<D: ObjectResolver + ?Sized>(
    document: &D,
    options: &ModelOptions,
) -> Result<Option<StructTreeRoot>> {
    let catalog = document
        .catalog()
        .ok_or_else(|| Error::InvalidPdf("Document has no catalog".into()))?;
    let catalog_dict = document.resolve_dict(catalog).ok_or_else(|| Error::InvalidObjectType {
        expected: "Dictionary".into(),
        found: catalog.type_name().into(),
    })?;

    let Some(root) = catalog_dict.get("StructTreeRoot").and_then(|r| document.resolve(r)) else {
        if options.flavour.requires_structure() {
            log::debug!("Document is not tagged, {} requires a structure tree", options.flavour);
        }
        return Ok(None); // Not a tagged PDF
    };
    let Some(root_dict) = root.as_dict() else {
        log::debug!("StructTreeRoot is a {}, not a dictionary, treating document as untagged", root.type_name());
        return Ok(None);
    };

    let role_map = root_dict
        .get("RoleMap")
        .map(|obj| RoleMap::from_object(document, obj))
        .unwrap_or_default();

    let kids = {
        let mut builder = TreeBuilder {
            document,
            role_map: &role_map,
            max_depth: options.max_structure_depth,
            path: Vec::new(),
            depth: 0,
        };
        builder.children(root_dict)
    };

    log::debug!("Built structure tree with {} top-level elements", kids.len());
    Ok(Some(StructTreeRoot { kids, role_map }))
}

struct TreeBuilder<'a, D: ObjectResolver + ?Sized> {
    document: &'a D,
    role_map: &'a RoleMap,
    max_depth: u32,
    /// Element references from the root to the node being built
    path: Vec<ObjectRef>,
    depth: u32,
}

impl<'a, D: ObjectResolver + ?Sized> TreeBuilder<'a, D> {
    /// Build the element children listed in the `/K` entry of `dict`.
    ///
    /// `/K` can be:
    /// 1. A single integer (MCID)
    /// 2. A dictionary (StructElem, marked content reference or object reference)
    /// 3. An array of any of the above
    fn children(&mut self, dict: &Dictionary) -> Vec<StructElem> {
        let Some(k) = dict.get("K") else {
            return Vec::new();
        };

        match self.document.resolve(k) {
            Some(Object::Array(items)) => items.iter().filter_map(|item| self.element(item)).collect(),
            Some(_) => self.element(k).into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// Build one `/K` entry, `None` when it is not a structure element.
    fn element(&mut self, obj: &Object) -> Option<StructElem> {
        let object_ref = obj.as_reference();
        if let Some(r) = object_ref {
            if self.path.contains(&r) {
                log::debug!("Structure element {} is its own ancestor, skipping it", r);
                return None;
            }
        }

        // MCIDs, dangling references and other non-dictionaries
        let dict = self.document.resolve(obj)?.as_dict()?;

        let dict_type = match dict.get("Type").map(|t| self.document.resolve(t)) {
            None | Some(None) => None,
            Some(Some(Object::Name(name))) => Some(name.clone()),
            Some(Some(other)) => {
                log::debug!("StructElem /Type is a {}, expected a name", other.type_name());
                None
            },
        };
        match dict_type.as_deref() {
            None | Some("StructElem") => {},
            Some("MCR") | Some("OBJR") => return None,
            Some(other) => {
                log::debug!("Skipping /K entry of type /{}", other);
                return None;
            },
        }

        if self.depth >= self.max_depth {
            log::warn!("Structure tree deeper than {} levels, truncating", self.max_depth);
            return None;
        }

        let declared_type = match dict.get("S").and_then(|s| self.document.resolve(s)) {
            Some(Object::Name(name)) => Some(name.clone()),
            Some(other) => {
                log::debug!("StructElem /S is a {}, expected a name", other.type_name());
                None
            },
            None => None,
        };
        let standard_type = declared_type
            .as_deref()
            .and_then(|t| self.role_map.standard_type(t));

        if let Some(r) = object_ref {
            self.path.push(r);
        }
        self.depth += 1;
        let kids = self.children(dict);
        self.depth -= 1;
        if object_ref.is_some() {
            self.path.pop();
        }

        Some(StructElem {
            object_ref,
            id: dict
                .get("ID")
                .and_then(|id| self.document.resolve(id))
                .and_then(|id| id.as_string())
                .map(|id| String::from_utf8_lossy(id).into_owned()),
            declared_type,
            dict_type,
            standard_type,
            lang: self.text_attribute(dict, "Lang"),
            alt: self.text_attribute(dict, "Alt"),
            actual_text: self.text_attribute(dict, "ActualText"),
            kids,
        })
    }

    /// Text string attribute; anything other than a string is dropped.
    fn text_attribute(&self, dict: &Dictionary, key: &str) -> Option<String> {
        let value = self.document.resolve(dict.get(key)?)?;
        let text = value.as_text_string();
        if text.is_none() {
            log::debug!("StructElem /{} is a {}, expected a text string", key, value.type_name());
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::CosDocument;
    use crate::structure::StructType;

    fn dict(entries: Vec<(&str, Object)>) -> Object {
        Object::Dictionary(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    fn tagged(doc: &mut CosDocument, root: Object) {
        let root = doc.add(root);
        let catalog = doc.add(dict(vec![
            ("Type", Object::name("Catalog")),
            ("StructTreeRoot", Object::Reference(root)),
        ]));
        doc.set_catalog(catalog);
    }

    #[test]
    fn test_untagged_document() {
        let mut doc = CosDocument::new();
        let catalog = doc.add(dict(vec![("Type", Object::name("Catalog"))]));
        doc.set_catalog(catalog);
        assert!(parse_structure_tree(&doc, &ModelOptions::default()).unwrap().is_none());
    }

    #[test]
    fn test_missing_catalog_is_error() {
        let doc = CosDocument::new();
        assert!(parse_structure_tree(&doc, &ModelOptions::default()).is_err());
    }

    #[test]
    fn test_root_not_dictionary_is_untagged() {
        let mut doc = CosDocument::new();
        tagged(&mut doc, Object::Integer(5));
        match parse_structure_tree(&doc, &ModelOptions::default()) {
            Ok(None) => {},
            other => panic!("Expected no structure tree, got {:?}", other),
        }
    }

    #[test]
    fn test_catalog_not_dictionary_is_error() {
        let mut doc = CosDocument::new();
        let catalog = doc.add(Object::Array(vec![]));
        doc.set_catalog(catalog);
        match parse_structure_tree(&doc, &ModelOptions::default()) {
            Err(Error::InvalidObjectType { found, .. }) => assert_eq!(found, "Array"),
            other => panic!("Expected InvalidObjectType, got {:?}", other),
        }
    }

    #[test]
    fn test_content_items_are_skipped() {
        let mut doc = CosDocument::new();
        let p = dict(vec![
            ("S", Object::name("P")),
            (
                "K",
                Object::Array(vec![
                    Object::Integer(0),
                    dict(vec![("Type", Object::name("MCR")), ("MCID", Object::Integer(1))]),
                    dict(vec![("Type", Object::name("OBJR")), ("Obj", Object::reference(99, 0))]),
                    dict(vec![("S", Object::name("Span"))]),
                ]),
            ),
        ]);
        tagged(&mut doc, dict(vec![("K", p)]));

        let tree = parse_structure_tree(&doc, &ModelOptions::default()).unwrap().unwrap();
        assert_eq!(tree.kids.len(), 1);
        let p = &tree.kids[0];
        assert_eq!(p.role(), Some(&StructType::P));
        assert_eq!(p.children().len(), 1);
        assert_eq!(p.children()[0].role(), Some(&StructType::Span));
    }

    #[test]
    fn test_malformed_attributes() {
        let mut doc = CosDocument::new();
        let elem = dict(vec![
            ("Type", Object::Integer(1)),
            ("S", Object::Integer(2)),
            ("Lang", Object::name("en")),
            ("Alt", Object::String(b"A chart".to_vec())),
            ("ID", Object::String(b"node-1".to_vec())),
        ]);
        tagged(&mut doc, dict(vec![("K", Object::Array(vec![elem]))]));

        let tree = parse_structure_tree(&doc, &ModelOptions::default()).unwrap().unwrap();
        let elem = &tree.kids[0];
        assert!(elem.dict_type.is_none());
        assert!(elem.declared_type.is_none());
        assert!(elem.role().is_none());
        assert!(elem.lang().is_none());
        assert_eq!(elem.alt.as_deref(), Some("A chart"));
        assert_eq!(elem.id.as_deref(), Some("node-1"));
    }

    #[test]
    fn test_depth_limit_truncates() {
        let mut doc = CosDocument::new();
        let mut node = dict(vec![("S", Object::name("Span"))]);
        for _ in 0..4 {
            node = dict(vec![("S", Object::name("Div")), ("K", node)]);
        }
        tagged(&mut doc, dict(vec![("K", node)]));

        let options = ModelOptions::new().with_max_structure_depth(2);
        let tree = parse_structure_tree(&doc, &options).unwrap().unwrap();
        assert_eq!(tree.descendants().count(), 2);
    }
}
