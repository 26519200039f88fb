//! Configuration for a validation model session.

use crate::flavour::PdfAFlavour;
use serde::{Deserialize, Serialize};

/// Options controlling how the object graph is materialized.
///
/// # Example
///
/// ```
/// use pdf_validation_model::config::ModelOptions;
/// use pdf_validation_model::flavour::PdfAFlavour;
///
/// let options = ModelOptions::new()
///     .with_flavour(PdfAFlavour::A1b)
///     .with_max_color_space_depth(16);
/// assert_eq!(options.max_color_space_depth, 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelOptions {
    /// PDF/A flavour the session validates against.
    pub flavour: PdfAFlavour,

    /// Maximum nesting of base/alternate/colorant color spaces. Deeper
    /// spaces resolve to absent.
    pub max_color_space_depth: u32,

    /// Maximum depth of the structure tree below the root.
    pub max_structure_depth: u32,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self {
            flavour: PdfAFlavour::default(),
            max_color_space_depth: 32,
            max_structure_depth: 256,
        }
    }

    /// Target a PDF/A flavour.
    pub fn with_flavour(mut self, flavour: PdfAFlavour) -> Self {
        self.flavour = flavour;
        self
    }

    /// Cap color space nesting.
    pub fn with_max_color_space_depth(mut self, depth: u32) -> Self {
        self.max_color_space_depth = depth;
        self
    }

    /// Cap structure tree depth.
    pub fn with_max_structure_depth(mut self, depth: u32) -> Self {
        self.max_structure_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ModelOptions::default();
        assert_eq!(options.flavour, PdfAFlavour::A2b);
        assert_eq!(options.max_color_space_depth, 32);
        assert_eq!(options.max_structure_depth, 256);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options: ModelOptions = serde_json::from_str(r#"{"flavour":"A1a"}"#).unwrap();
        assert_eq!(options.flavour, PdfAFlavour::A1a);
        assert_eq!(options.max_structure_depth, 256);
    }
}
