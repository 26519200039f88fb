//! Role mapping of custom structure types (PDF spec Section 14.8.3).

use super::types::StructType;
use crate::document::ObjectResolver;
use crate::object::Object;
use std::collections::HashMap;

/// The `/RoleMap` dictionary of a structure tree root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleMap {
    map: HashMap<String, String>,
}

impl RoleMap {
    /// Create an empty role map
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a `/RoleMap` dictionary. Entries whose value is not a name are dropped.
    pub fn from_object<D: ObjectResolver + ?Sized>(document: &D, obj: &Object) -> Self {
        let Some(dict) = document.resolve_dict(obj) else {
            log::debug!("RoleMap is not a dictionary, ignoring it");
            return Self::new();
        };

        let mut map = HashMap::with_capacity(dict.len());
        for (key, value) in dict {
            match document.resolve(value).and_then(|v| v.as_name()) {
                Some(name) => {
                    map.insert(key.clone(), name.to_string());
                },
                None => log::debug!("RoleMap entry /{} is not a name", key),
            }
        }
        Self { map }
    }

    /// Add a mapping.
    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.map.insert(from.into(), to.into());
    }

    /// Single hop: the type `type_name` is mapped to, if any.
    pub fn resolve_once(&self, type_name: &str) -> Option<&str> {
        self.map.get(type_name).map(String::as_str)
    }

    /// Standard type of `type_name`.
    ///
    /// A standard type maps to itself. Otherwise the map is followed for at
    /// most [`len`](Self::len) hops, so cyclic maps terminate with `None`.
    pub fn standard_type(&self, type_name: &str) -> Option<StructType> {
        let mut current = type_name;
        for _ in 0..=self.map.len() {
            let struct_type = StructType::from_str(current);
            if struct_type.is_standard() {
                return Some(struct_type);
            }
            current = self.resolve_once(current)?;
        }
        log::debug!("RoleMap does not resolve /{} to a standard type", type_name);
        None
    }

    /// Number of mappings.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True when nothing is mapped.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
