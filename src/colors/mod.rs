//! Color space model.
//!
//! Typed color spaces and their resolution from raw descriptors. Resolution
//! is exposed as methods on [`crate::session::ModelSession`]:
//!
//! ```
//! use pdf_validation_model::colors::ColorSpaceFamily;
//! use pdf_validation_model::{CosDocument, Descriptor, ModelSession, Object};
//!
//! let doc = CosDocument::new();
//! let mut session = ModelSession::new(&doc);
//! let cs = session.color_space(Some(&Descriptor::new(Object::name("DeviceRGB"))));
//! assert_eq!(cs.map(|cs| cs.family()), Some(ColorSpaceFamily::DeviceRGB));
//! ```

mod factory;
pub mod icc;
mod types;

pub use icc::IccProfile;
pub use types::{
    CalGray, CalRgb, ColorSpace, ColorSpaceFamily, Colorant, DeviceN, DeviceSpace, IccBased, IccBasedCmyk,
    Indexed, Lab, Separation,
};
