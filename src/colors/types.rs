//! Typed color space objects.

use super::icc::IccProfile;
use crate::object::ObjectRef;
use crate::pattern::Pattern;
use lazy_static::lazy_static;
use std::fmt;
use std::sync::Arc;

/// Declared family of a color space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpaceFamily {
    /// CIE-based single component
    CalGray,
    /// CIE-based three components
    CalRGB,
    /// Device gray
    DeviceGray,
    /// Device RGB
    DeviceRGB,
    /// Device CMYK
    DeviceCMYK,
    /// Multiple named colorants
    DeviceN,
    /// ICC profile based
    ICCBased,
    /// CIE L*a*b*
    Lab,
    /// Single named colorant
    Separation,
    /// Palette over a base space
    Indexed,
    /// Pattern color space
    Pattern,
}

impl ColorSpaceFamily {
    /// Parse a family name; unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "CalGray" => Self::CalGray,
            "CalRGB" => Self::CalRGB,
            "DeviceGray" => Self::DeviceGray,
            "DeviceRGB" => Self::DeviceRGB,
            "DeviceCMYK" => Self::DeviceCMYK,
            "DeviceN" => Self::DeviceN,
            "ICCBased" => Self::ICCBased,
            "Lab" => Self::Lab,
            "Separation" => Self::Separation,
            "Indexed" => Self::Indexed,
            "Pattern" => Self::Pattern,
            _ => return None,
        })
    }

    /// The PDF name of the family.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CalGray => "CalGray",
            Self::CalRGB => "CalRGB",
            Self::DeviceGray => "DeviceGray",
            Self::DeviceRGB => "DeviceRGB",
            Self::DeviceCMYK => "DeviceCMYK",
            Self::DeviceN => "DeviceN",
            Self::ICCBased => "ICCBased",
            Self::Lab => "Lab",
            Self::Separation => "Separation",
            Self::Indexed => "Indexed",
            Self::Pattern => "Pattern",
        }
    }
}

impl fmt::Display for ColorSpaceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved color space.
#[derive(Debug, Clone)]
pub enum ColorSpace {
    /// `CalGray`
    CalGray(CalGray),
    /// `CalRGB`
    CalRgb(CalRgb),
    /// `DeviceGray` (shared singleton)
    DeviceGray(DeviceSpace),
    /// `DeviceRGB` (shared singleton)
    DeviceRgb(DeviceSpace),
    /// `DeviceCMYK` (shared singleton)
    DeviceCmyk(DeviceSpace),
    /// `DeviceN`
    DeviceN(DeviceN),
    /// `Lab`
    Lab(Lab),
    /// `Indexed`
    Indexed(Indexed),
    /// `Separation`
    Separation(Separation),
    /// `ICCBased` with a component count other than 4
    IccBased(IccBased),
    /// `ICCBased` with 4 components, bound to the overprint state at its point of use
    IccBasedCmyk(IccBasedCmyk),
    /// `Pattern`
    Pattern(Pattern),
}

lazy_static! {
    static ref DEVICE_GRAY: Arc<ColorSpace> = Arc::new(ColorSpace::DeviceGray(DeviceSpace { inherited: false }));
    static ref DEVICE_GRAY_INHERITED: Arc<ColorSpace> = Arc::new(ColorSpace::DeviceGray(DeviceSpace { inherited: true }));
    static ref DEVICE_RGB: Arc<ColorSpace> = Arc::new(ColorSpace::DeviceRgb(DeviceSpace { inherited: false }));
    static ref DEVICE_RGB_INHERITED: Arc<ColorSpace> = Arc::new(ColorSpace::DeviceRgb(DeviceSpace { inherited: true }));
    static ref DEVICE_CMYK: Arc<ColorSpace> = Arc::new(ColorSpace::DeviceCmyk(DeviceSpace { inherited: false }));
    static ref DEVICE_CMYK_INHERITED: Arc<ColorSpace> = Arc::new(ColorSpace::DeviceCmyk(DeviceSpace { inherited: true }));
}

impl ColorSpace {
    /// The shared `DeviceGray` instance.
    pub fn device_gray(inherited: bool) -> Arc<ColorSpace> {
        if inherited {
            Arc::clone(&DEVICE_GRAY_INHERITED)
        } else {
            Arc::clone(&DEVICE_GRAY)
        }
    }

    /// The shared `DeviceRGB` instance.
    pub fn device_rgb(inherited: bool) -> Arc<ColorSpace> {
        if inherited {
            Arc::clone(&DEVICE_RGB_INHERITED)
        } else {
            Arc::clone(&DEVICE_RGB)
        }
    }

    /// The shared `DeviceCMYK` instance.
    pub fn device_cmyk(inherited: bool) -> Arc<ColorSpace> {
        if inherited {
            Arc::clone(&DEVICE_CMYK_INHERITED)
        } else {
            Arc::clone(&DEVICE_CMYK)
        }
    }

    /// Declared family.
    pub fn family(&self) -> ColorSpaceFamily {
        match self {
            ColorSpace::CalGray(_) => ColorSpaceFamily::CalGray,
            ColorSpace::CalRgb(_) => ColorSpaceFamily::CalRGB,
            ColorSpace::DeviceGray(_) => ColorSpaceFamily::DeviceGray,
            ColorSpace::DeviceRgb(_) => ColorSpaceFamily::DeviceRGB,
            ColorSpace::DeviceCmyk(_) => ColorSpaceFamily::DeviceCMYK,
            ColorSpace::DeviceN(_) => ColorSpaceFamily::DeviceN,
            ColorSpace::Lab(_) => ColorSpaceFamily::Lab,
            ColorSpace::Indexed(_) => ColorSpaceFamily::Indexed,
            ColorSpace::Separation(_) => ColorSpaceFamily::Separation,
            ColorSpace::IccBased(_) | ColorSpace::IccBasedCmyk(_) => ColorSpaceFamily::ICCBased,
            ColorSpace::Pattern(_) => ColorSpaceFamily::Pattern,
        }
    }

    /// Number of color components, when known.
    pub fn n_components(&self) -> Option<usize> {
        match self {
            ColorSpace::CalGray(_) | ColorSpace::DeviceGray(_) => Some(1),
            ColorSpace::Indexed(_) | ColorSpace::Separation(_) => Some(1),
            ColorSpace::CalRgb(_) | ColorSpace::DeviceRgb(_) | ColorSpace::Lab(_) => Some(3),
            ColorSpace::DeviceCmyk(_) | ColorSpace::IccBasedCmyk(_) => Some(4),
            ColorSpace::DeviceN(device_n) => Some(device_n.colorant_names.len()),
            ColorSpace::IccBased(icc) => icc.n_components,
            ColorSpace::Pattern(_) => None,
        }
    }

    /// Whether this is one of the inherited Device singletons.
    pub fn is_inherited(&self) -> bool {
        match self {
            ColorSpace::DeviceGray(d) | ColorSpace::DeviceRgb(d) | ColorSpace::DeviceCmyk(d) => d.inherited,
            _ => false,
        }
    }
}

/// Payload of the Device singletons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceSpace {
    /// Selected from an enclosing resource scope rather than the local one.
    pub inherited: bool,
}

/// `[/CalGray dict]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalGray {
    /// `WhitePoint`
    pub white_point: Option<[f64; 3]>,
    /// `BlackPoint`
    pub black_point: Option<[f64; 3]>,
    /// `Gamma`
    pub gamma: Option<f64>,
}

/// `[/CalRGB dict]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalRgb {
    /// `WhitePoint`
    pub white_point: Option<[f64; 3]>,
    /// `BlackPoint`
    pub black_point: Option<[f64; 3]>,
    /// `Gamma`
    pub gamma: Option<[f64; 3]>,
    /// `Matrix`
    pub matrix: Option<[f64; 9]>,
}

/// `[/Lab dict]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lab {
    /// `WhitePoint`
    pub white_point: Option<[f64; 3]>,
    /// `BlackPoint`
    pub black_point: Option<[f64; 3]>,
    /// `Range` (a*, b* bounds)
    pub range: Option<[f64; 4]>,
}

/// `[/ICCBased stream]`
#[derive(Debug, Clone, PartialEq)]
pub struct IccBased {
    /// Reference of the profile stream, when indirect.
    pub stream: Option<ObjectRef>,
    /// `N` entry.
    pub n_components: Option<usize>,
    /// Whether an `Alternate` entry is present.
    pub has_alternate: bool,
    /// Parsed profile header; absent when the stream could not be decoded.
    pub profile: Option<IccProfile>,
}

/// 4-component `ICCBased` space as used under a given overprint state.
#[derive(Debug, Clone, PartialEq)]
pub struct IccBasedCmyk {
    /// Profile data.
    pub icc: IccBased,
    /// `OPM` in effect where the color space is used.
    pub overprint_mode: i32,
    /// `OP`/`op` in effect where the color space is used.
    pub overprint_flag: bool,
}

/// `[/Indexed base hival lookup]`
#[derive(Debug, Clone)]
pub struct Indexed {
    /// Resolved base color space.
    pub base: Option<Arc<ColorSpace>>,
    /// `hival`
    pub hival: Option<i64>,
    /// Length in bytes of the lookup table.
    pub lookup_len: Option<usize>,
}

/// `[/Separation name alternate tintTransform]`
#[derive(Debug, Clone)]
pub struct Separation {
    /// Colorant name.
    pub colorant_name: Option<String>,
    /// Resolved alternate color space.
    pub alternate: Option<Arc<ColorSpace>>,
    /// Whether a tint transform function is present.
    pub has_tint_transform: bool,
}

/// Entry of a DeviceN `Colorants` dictionary.
#[derive(Debug, Clone)]
pub struct Colorant {
    /// Colorant name (dictionary key).
    pub name: String,
    /// Resolved color space of the colorant.
    pub color_space: Option<Arc<ColorSpace>>,
}

/// `[/DeviceN names alternate tintTransform attributes]`
#[derive(Debug, Clone)]
pub struct DeviceN {
    /// Colorant names, in component order.
    pub colorant_names: Vec<String>,
    /// Resolved alternate color space.
    pub alternate: Option<Arc<ColorSpace>>,
    /// Whether a tint transform function is present.
    pub has_tint_transform: bool,
    /// `Colorants` of the attributes dictionary. `None` when the session
    /// flavour does not model them.
    pub colorants: Option<Vec<Colorant>>,
}

impl DeviceN {
    /// Whether every colorant name other than `None` has a `Colorants` entry.
    ///
    /// `None` when colorants were not resolved for this session.
    pub fn are_colorants_present(&self) -> Option<bool> {
        let colorants = self.colorants.as_ref()?;
        Some(
            self.colorant_names
                .iter()
                .filter(|name| name.as_str() != "None")
                .all(|name| colorants.iter().any(|c| &c.name == name)),
        )
    }
}
