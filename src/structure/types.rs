//! Types for PDF logical structure trees.
//!
//! Implements structure element types according to ISO 32000-1:2008 Section 14.7.2.

use super::role_map::RoleMap;
use super::traversal::Descendants;
use crate::object::ObjectRef;

/// The root of a PDF structure tree (StructTreeRoot dictionary).
///
/// According to PDF spec Section 14.7.2, the StructTreeRoot contains:
/// - `/Type` - Must be `/StructTreeRoot`
/// - `/K` - The immediate child or children of the structure tree root
/// - `/RoleMap` - Maps non-standard structure types to standard ones
#[derive(Debug, Clone, Default)]
pub struct StructTreeRoot {
    /// Top-level structure elements, in `/K` order
    pub kids: Vec<StructElem>,

    /// Role map for custom structure types
    pub role_map: RoleMap,
}

impl StructTreeRoot {
    /// Top-level structure elements.
    pub fn children(&self) -> &[StructElem] {
        &self.kids
    }

    /// Pre-order walk over every element of the tree.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(&self.kids)
    }
}

/// A structure element (StructElem) in the structure tree.
///
/// According to PDF spec Section 14.7.2, each StructElem has:
/// - `/S` - Structure type (e.g., /Document, /P, /H1, /Sect)
/// - `/K` - Children (structure elements or marked content references)
/// - `/Lang`, `/Alt`, `/ActualText` - Optional text attributes
///
/// Only nested structure elements are kept as children; marked content and
/// object references are not part of this model.
#[derive(Debug, Clone, Default)]
pub struct StructElem {
    /// Reference of the element dictionary, when it is indirect
    pub object_ref: Option<ObjectRef>,

    /// `/ID`
    pub id: Option<String>,

    /// `/S` as declared in the document
    pub declared_type: Option<String>,

    /// `/Type` when it is a name (`StructElem` or absent in well-formed files)
    pub dict_type: Option<String>,

    /// Standard type after role mapping; `None` when `/S` maps to nothing standard
    pub standard_type: Option<StructType>,

    /// `/Lang`
    pub lang: Option<String>,

    /// `/Alt`
    pub alt: Option<String>,

    /// `/ActualText`
    pub actual_text: Option<String>,

    /// Child elements, in `/K` order
    pub kids: Vec<StructElem>,
}

impl StructElem {
    /// Create an element with the given declared type and no attributes
    pub fn new(declared_type: impl Into<String>) -> Self {
        Self {
            declared_type: Some(declared_type.into()),
            ..Self::default()
        }
    }

    /// Child elements.
    pub fn children(&self) -> &[StructElem] {
        &self.kids
    }

    /// Standard role of this element.
    pub fn role(&self) -> Option<&StructType> {
        self.standard_type.as_ref()
    }

    /// Language tag.
    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    /// Pre-order walk over this element's subtree, excluding the element itself.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(&self.kids)
    }
}

/// Standard structure types from PDF spec Section 14.8.4.
///
/// Custom types can be mapped to standard types via the RoleMap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StructType {
    // Grouping elements (14.8.4.2)
    /// Document root
    Document,
    /// Part (major division)
    Part,
    /// Article
    Art,
    /// Section
    Sect,
    /// Division
    Div,
    /// Block quotation
    BlockQuote,
    /// Caption
    Caption,
    /// Table of contents
    TOC,
    /// Table of contents item
    TOCI,
    /// Index
    Index,
    /// Non-structural grouping
    NonStruct,
    /// Private (producer-specific) content
    Private,

    // Paragraph-like elements (14.8.4.3.2)
    /// Paragraph
    P,
    /// Heading (unnumbered)
    H,
    /// Heading level 1
    H1,
    /// Heading level 2
    H2,
    /// Heading level 3
    H3,
    /// Heading level 4
    H4,
    /// Heading level 5
    H5,
    /// Heading level 6
    H6,

    // List elements (14.8.4.3.3)
    /// List
    L,
    /// List item
    LI,
    /// Label (list item marker)
    Lbl,
    /// List body (list item content)
    LBody,

    // Table elements (14.8.4.3.4)
    /// Table
    Table,
    /// Table row
    TR,
    /// Table header cell
    TH,
    /// Table data cell
    TD,
    /// Table header group
    THead,
    /// Table body group
    TBody,
    /// Table footer group
    TFoot,

    // Inline elements (14.8.4.4)
    /// Span (inline generic)
    Span,
    /// Quote
    Quote,
    /// Note
    Note,
    /// Reference
    Reference,
    /// Bibliographic entry
    BibEntry,
    /// Code
    Code,
    /// Link
    Link,
    /// Annotation
    Annot,
    /// Ruby annotation
    Ruby,
    /// Ruby base text
    RB,
    /// Ruby annotation text
    RT,
    /// Ruby punctuation
    RP,
    /// Warichu annotation
    Warichu,
    /// Warichu text
    WT,
    /// Warichu punctuation
    WP,

    // Illustration elements (14.8.4.5)
    /// Figure
    Figure,
    /// Formula
    Formula,
    /// Form (input field)
    Form,

    /// Custom structure type not defined in the PDF specification
    Custom(String),
}

impl StructType {
    /// Parse structure type from string (e.g., "P" -> StructType::P)
    pub fn from_str(s: &str) -> Self {
        match s {
            "Document" => Self::Document,
            "Part" => Self::Part,
            "Art" => Self::Art,
            "Sect" => Self::Sect,
            "Div" => Self::Div,
            "BlockQuote" => Self::BlockQuote,
            "Caption" => Self::Caption,
            "TOC" => Self::TOC,
            "TOCI" => Self::TOCI,
            "Index" => Self::Index,
            "NonStruct" => Self::NonStruct,
            "Private" => Self::Private,
            "P" => Self::P,
            "H" => Self::H,
            "H1" => Self::H1,
            "H2" => Self::H2,
            "H3" => Self::H3,
            "H4" => Self::H4,
            "H5" => Self::H5,
            "H6" => Self::H6,
            "L" => Self::L,
            "LI" => Self::LI,
            "Lbl" => Self::Lbl,
            "LBody" => Self::LBody,
            "Table" => Self::Table,
            "TR" => Self::TR,
            "TH" => Self::TH,
            "TD" => Self::TD,
            "THead" => Self::THead,
            "TBody" => Self::TBody,
            "TFoot" => Self::TFoot,
            "Span" => Self::Span,
            "Quote" => Self::Quote,
            "Note" => Self::Note,
            "Reference" => Self::Reference,
            "BibEntry" => Self::BibEntry,
            "Code" => Self::Code,
            "Link" => Self::Link,
            "Annot" => Self::Annot,
            "Ruby" => Self::Ruby,
            "RB" => Self::RB,
            "RT" => Self::RT,
            "RP" => Self::RP,
            "Warichu" => Self::Warichu,
            "WT" => Self::WT,
            "WP" => Self::WP,
            "Figure" => Self::Figure,
            "Formula" => Self::Formula,
            "Form" => Self::Form,
            _ => Self::Custom(s.to_string()),
        }
    }

    /// The structure type name as written in `/S`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Document => "Document",
            Self::Part => "Part",
            Self::Art => "Art",
            Self::Sect => "Sect",
            Self::Div => "Div",
            Self::BlockQuote => "BlockQuote",
            Self::Caption => "Caption",
            Self::TOC => "TOC",
            Self::TOCI => "TOCI",
            Self::Index => "Index",
            Self::NonStruct => "NonStruct",
            Self::Private => "Private",
            Self::P => "P",
            Self::H => "H",
            Self::H1 => "H1",
            Self::H2 => "H2",
            Self::H3 => "H3",
            Self::H4 => "H4",
            Self::H5 => "H5",
            Self::H6 => "H6",
            Self::L => "L",
            Self::LI => "LI",
            Self::Lbl => "Lbl",
            Self::LBody => "LBody",
            Self::Table => "Table",
            Self::TR => "TR",
            Self::TH => "TH",
            Self::TD => "TD",
            Self::THead => "THead",
            Self::TBody => "TBody",
            Self::TFoot => "TFoot",
            Self::Span => "Span",
            Self::Quote => "Quote",
            Self::Note => "Note",
            Self::Reference => "Reference",
            Self::BibEntry => "BibEntry",
            Self::Code => "Code",
            Self::Link => "Link",
            Self::Annot => "Annot",
            Self::Ruby => "Ruby",
            Self::RB => "RB",
            Self::RT => "RT",
            Self::RP => "RP",
            Self::Warichu => "Warichu",
            Self::WT => "WT",
            Self::WP => "WP",
            Self::Figure => "Figure",
            Self::Formula => "Formula",
            Self::Form => "Form",
            Self::Custom(s) => s,
        }
    }

    /// Check if this is one of the standard structure types
    pub fn is_standard(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// Check if this is a heading type (H, H1-H6)
    pub fn is_heading(&self) -> bool {
        matches!(self, Self::H | Self::H1 | Self::H2 | Self::H3 | Self::H4 | Self::H5 | Self::H6)
    }

    /// Check if this is a block-level element
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            Self::Document
                | Self::Part
                | Self::Art
                | Self::Sect
                | Self::Div
                | Self::BlockQuote
                | Self::Caption
                | Self::TOC
                | Self::TOCI
                | Self::Index
                | Self::P
                | Self::H
                | Self::H1
                | Self::H2
                | Self::H3
                | Self::H4
                | Self::H5
                | Self::H6
                | Self::L
                | Self::LI
                | Self::Lbl
                | Self::LBody
                | Self::Table
                | Self::TR
                | Self::TH
                | Self::TD
                | Self::THead
                | Self::TBody
                | Self::TFoot
                | Self::Figure
                | Self::Formula
        )
    }
}

impl std::fmt::Display for StructType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
