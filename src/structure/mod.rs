//! PDF Logical Structure (Tagged PDF) support.
//!
//! This module builds typed structure trees according to ISO 32000-1:2008
//! Section 14.7.
//!
//! ## Structure Tree
//!
//! A structure tree consists of:
//! - **StructTreeRoot**: The root of the structure hierarchy
//! - **StructElem**: Structure elements (paragraphs, headings, sections, etc.)
//! - **RoleMap**: Maps custom structure types to standard ones
//!
//! ## Example
//!
//! ```
//! use pdf_validation_model::structure::StructType;
//! use pdf_validation_model::{CosDocument, ModelSession, Object};
//!
//! # fn main() -> pdf_validation_model::Result<()> {
//! let mut doc = CosDocument::new();
//! let elem = Object::Dictionary([("S".to_string(), Object::name("H1"))].into_iter().collect());
//! let root = doc.add(Object::Dictionary([("K".to_string(), elem)].into_iter().collect()));
//! let catalog = doc.add(Object::Dictionary(
//!     [("StructTreeRoot".to_string(), Object::Reference(root))].into_iter().collect(),
//! ));
//! doc.set_catalog(catalog);
//!
//! let session = ModelSession::new(&doc);
//! if let Some(tree) = session.structure_tree()? {
//!     for (depth, elem) in tree.descendants() {
//!         assert_eq!((depth, elem.role()), (0, Some(&StructType::H1)));
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
mod role_map;
pub mod traversal;
mod types;

pub use builder::parse_structure_tree;
pub use role_map::RoleMap;
pub use traversal::Descendants;
pub use types::{StructElem, StructTreeRoot, StructType};
