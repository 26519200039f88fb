//! PDF/A flavour a validation session targets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// PDF/A conformance level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PdfAFlavour {
    /// PDF/A-1a: Full conformance with logical structure
    A1a,
    /// PDF/A-1b: Basic conformance (visual preservation)
    A1b,
    /// PDF/A-2a: PDF 1.7 based, full conformance
    A2a,
    /// PDF/A-2b: PDF 1.7 based, basic conformance
    #[default]
    A2b,
    /// PDF/A-2u: PDF/A-2b plus Unicode mapping
    A2u,
    /// PDF/A-3a: PDF/A-2a plus embedded files
    A3a,
    /// PDF/A-3b: PDF/A-2b plus embedded files
    A3b,
    /// PDF/A-3u: PDF/A-3b plus Unicode mapping
    A3u,
}

impl PdfAFlavour {
    /// PDF/A part number (1, 2 or 3).
    pub fn part(&self) -> u8 {
        match self {
            PdfAFlavour::A1a | PdfAFlavour::A1b => 1,
            PdfAFlavour::A2a | PdfAFlavour::A2b | PdfAFlavour::A2u => 2,
            PdfAFlavour::A3a | PdfAFlavour::A3b | PdfAFlavour::A3u => 3,
        }
    }

    /// Conformance level letter.
    pub fn conformance(&self) -> char {
        match self {
            PdfAFlavour::A1a | PdfAFlavour::A2a | PdfAFlavour::A3a => 'A',
            PdfAFlavour::A1b | PdfAFlavour::A2b | PdfAFlavour::A3b => 'B',
            PdfAFlavour::A2u | PdfAFlavour::A3u => 'U',
        }
    }

    /// Check if this level requires logical structure (Tagged PDF).
    pub fn requires_structure(&self) -> bool {
        self.conformance() == 'A'
    }

    /// Whether DeviceN `Colorants` dictionaries are part of the model.
    ///
    /// PDF/A-1 predates the colorant consistency requirements.
    pub fn checks_device_n_colorants(&self) -> bool {
        self.part() >= 2
    }

    /// Parse from XMP pdfaid:part and pdfaid:conformance values.
    pub fn from_xmp(part: &str, conformance: &str) -> Option<Self> {
        match (part, conformance.to_uppercase().as_str()) {
            ("1", "A") => Some(PdfAFlavour::A1a),
            ("1", "B") => Some(PdfAFlavour::A1b),
            ("2", "A") => Some(PdfAFlavour::A2a),
            ("2", "B") => Some(PdfAFlavour::A2b),
            ("2", "U") => Some(PdfAFlavour::A2u),
            ("3", "A") => Some(PdfAFlavour::A3a),
            ("3", "B") => Some(PdfAFlavour::A3b),
            ("3", "U") => Some(PdfAFlavour::A3u),
            _ => None,
        }
    }
}

impl fmt::Display for PdfAFlavour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PDF/A-{}{}", self.part(), self.conformance().to_ascii_lowercase())
    }
}
