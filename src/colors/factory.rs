//! Color space resolution.
//!
//! Maps raw color space descriptors to typed [`ColorSpace`] objects:
//! - cached by descriptor identity (object reference), except
//! - Device spaces, which resolve to process-wide singletons, and
//! - 4-component ICCBased spaces, which are bound to the overprint state of
//!   the caller and rebuilt on every call.

use super::icc::IccProfile;
use super::types::{
    CalGray, CalRgb, ColorSpace, ColorSpaceFamily, Colorant, DeviceN, IccBased, IccBasedCmyk,
    Indexed, Lab, Separation,
};
use crate::document::ObjectResolver;
use crate::object::{Dictionary, Object};
use crate::resources::{Descriptor, InheritableResources};
use crate::session::ModelSession;
use std::sync::Arc;

impl<'d, D: ObjectResolver + ?Sized> ModelSession<'d, D> {
    /// Resolve a color space outside of any pattern or overprint context.
    pub fn color_space(&mut self, descriptor: Option<&Descriptor>) -> Option<Arc<ColorSpace>> {
        self.color_space_with_context(descriptor, None, &InheritableResources::EMPTY, 0, false)
    }

    /// Resolve a color space at its point of use.
    ///
    /// `pattern` and `resources` are only consulted for the Pattern family;
    /// `overprint_mode` and `overprint_flag` only for 4-component ICCBased
    /// spaces. Returns `None` for an absent descriptor or an unknown family.
    pub fn color_space_with_context(
        &mut self,
        descriptor: Option<&Descriptor>,
        pattern: Option<&Descriptor>,
        resources: &InheritableResources,
        overprint_mode: i32,
        overprint_flag: bool,
    ) -> Option<Arc<ColorSpace>> {
        self.resolve_color_space(descriptor?, pattern, resources, overprint_mode, overprint_flag, 0)
    }

    /// Look up a named color space in `resources` and resolve it.
    pub fn named_color_space(
        &mut self,
        resources: &InheritableResources,
        name: &str,
    ) -> Option<Arc<ColorSpace>> {
        let document = self.document;
        let descriptor = match resources.color_space(document, name) {
            Some(descriptor) => descriptor,
            // Device family names may be used without a resource entry
            None if is_device_name(name) => Descriptor::new(Object::name(name)),
            None => return None,
        };
        self.color_space(Some(&descriptor))
    }

    pub(crate) fn resolve_color_space(
        &mut self,
        descriptor: &Descriptor,
        pattern: Option<&Descriptor>,
        resources: &InheritableResources,
        overprint_mode: i32,
        overprint_flag: bool,
        depth: u32,
    ) -> Option<Arc<ColorSpace>> {
        if depth > self.options.max_color_space_depth {
            log::warn!(
                "Color space nesting exceeds {} levels, treating as absent",
                self.options.max_color_space_depth
            );
            self.truncations += 1;
            return None;
        }

        let key = descriptor.key();
        if let Some(key) = key {
            if let Some(cached) = self.cache.get(key) {
                return Some(cached);
            }
            if self.resolving.contains(&key) {
                log::debug!("Color space {} refers to itself, treating as absent", key);
                self.truncations += 1;
                return None;
            }
        }

        let document = self.document;
        let family_name = document.declared_family(descriptor)?;
        let Some(family) = ColorSpaceFamily::from_name(family_name) else {
            log::debug!("Unsupported color space family '{}'", family_name);
            return None;
        };
        let inherited = document.is_inherited_default(descriptor);

        if let Some(key) = key {
            self.resolving.push(key);
        }
        let truncations = self.truncations;
        let resolved = match family {
            ColorSpaceFamily::DeviceGray => Resolved::Shared(ColorSpace::device_gray(inherited)),
            ColorSpaceFamily::DeviceRGB => Resolved::Shared(ColorSpace::device_rgb(inherited)),
            ColorSpaceFamily::DeviceCMYK => Resolved::Shared(ColorSpace::device_cmyk(inherited)),
            ColorSpaceFamily::CalGray => Resolved::Cacheable(ColorSpace::CalGray(self.cal_gray(descriptor))),
            ColorSpaceFamily::CalRGB => Resolved::Cacheable(ColorSpace::CalRgb(self.cal_rgb(descriptor))),
            ColorSpaceFamily::Lab => Resolved::Cacheable(ColorSpace::Lab(self.lab(descriptor))),
            ColorSpaceFamily::ICCBased => {
                let icc = self.icc_based(descriptor);
                if document.component_count(descriptor) != Some(4) {
                    Resolved::Cacheable(ColorSpace::IccBased(icc))
                } else {
                    // Bound to the overprint state of this use: never cached.
                    Resolved::Fresh(ColorSpace::IccBasedCmyk(IccBasedCmyk {
                        icc,
                        overprint_mode,
                        overprint_flag,
                    }))
                }
            },
            ColorSpaceFamily::Indexed => Resolved::Cacheable(ColorSpace::Indexed(self.indexed(descriptor, depth))),
            ColorSpaceFamily::Separation => {
                Resolved::Cacheable(ColorSpace::Separation(self.separation(descriptor, depth)))
            },
            ColorSpaceFamily::DeviceN => Resolved::Cacheable(ColorSpace::DeviceN(self.device_n(descriptor, depth))),
            ColorSpaceFamily::Pattern => match self.resolve_pattern(pattern, resources, depth) {
                Some(pattern) => Resolved::Fresh(ColorSpace::Pattern(pattern)),
                None => Resolved::Absent,
            },
        };
        if key.is_some() {
            self.resolving.pop();
        }
        // A space with a cut-off subtree depends on where resolution started
        let truncated = self.truncations != truncations;

        match resolved {
            Resolved::Shared(color_space) => Some(color_space),
            Resolved::Fresh(color_space) => Some(Arc::new(color_space)),
            Resolved::Cacheable(color_space) => {
                let color_space = Arc::new(color_space);
                match key {
                    Some(key) if !truncated => self.cache.insert(key, Arc::clone(&color_space)),
                    Some(key) => log::debug!("Not caching truncated color space {}", key),
                    None => {},
                }
                Some(color_space)
            },
            Resolved::Absent => None,
        }
    }

    /// Resolve a nested base/alternate/colorant space in the default context.
    fn nested_color_space(&mut self, raw: Option<&Object>, depth: u32) -> Option<Arc<ColorSpace>> {
        let descriptor = Descriptor::new(raw?.clone());
        self.resolve_color_space(&descriptor, None, &InheritableResources::EMPTY, 0, false, depth + 1)
    }

    fn cal_gray(&self, descriptor: &Descriptor) -> CalGray {
        let dict = self.parameters(descriptor);
        CalGray {
            white_point: dict.and_then(|d| self.numbers::<3>(d, "WhitePoint")),
            black_point: dict.and_then(|d| self.numbers::<3>(d, "BlackPoint")),
            gamma: dict
                .and_then(|d| d.get("Gamma"))
                .and_then(|gamma| self.document.resolve(gamma))
                .and_then(|gamma| gamma.as_number()),
        }
    }

    fn cal_rgb(&self, descriptor: &Descriptor) -> CalRgb {
        let dict = self.parameters(descriptor);
        CalRgb {
            white_point: dict.and_then(|d| self.numbers::<3>(d, "WhitePoint")),
            black_point: dict.and_then(|d| self.numbers::<3>(d, "BlackPoint")),
            gamma: dict.and_then(|d| self.numbers::<3>(d, "Gamma")),
            matrix: dict.and_then(|d| self.numbers::<9>(d, "Matrix")),
        }
    }

    fn lab(&self, descriptor: &Descriptor) -> Lab {
        let dict = self.parameters(descriptor);
        Lab {
            white_point: dict.and_then(|d| self.numbers::<3>(d, "WhitePoint")),
            black_point: dict.and_then(|d| self.numbers::<3>(d, "BlackPoint")),
            range: dict.and_then(|d| self.numbers::<4>(d, "Range")),
        }
    }

    fn icc_based(&self, descriptor: &Descriptor) -> IccBased {
        let document = self.document;
        let stream_ref = document
            .raw_color_space_operand(descriptor, 1)
            .and_then(|operand| operand.as_reference());
        let stream = document.color_space_operand(descriptor, 1);

        let profile = stream.and_then(|stream| match IccProfile::from_stream(stream) {
            Ok(profile) => Some(profile),
            Err(e) => {
                log::warn!("Unreadable ICC profile in {}: {}", descriptor_label(descriptor), e);
                None
            },
        });

        IccBased {
            stream: stream_ref,
            n_components: document.component_count(descriptor),
            has_alternate: stream
                .and_then(|stream| stream.as_dict())
                .is_some_and(|dict| dict.contains_key("Alternate")),
            profile,
        }
    }

    fn indexed(&mut self, descriptor: &Descriptor, depth: u32) -> Indexed {
        let document = self.document;
        let base = self.nested_color_space(document.raw_color_space_operand(descriptor, 1), depth);
        let hival = document
            .color_space_operand(descriptor, 2)
            .and_then(|hival| hival.as_integer());
        let lookup_len = document
            .color_space_operand(descriptor, 3)
            .and_then(|lookup| match lookup {
                Object::String(bytes) => Some(bytes.len()),
                Object::Stream { .. } => lookup.decode_stream_data().ok().map(|data| data.len()),
                _ => None,
            });

        Indexed {
            base,
            hival,
            lookup_len,
        }
    }

    fn separation(&mut self, descriptor: &Descriptor, depth: u32) -> Separation {
        let document = self.document;
        let alternate = self.nested_color_space(document.raw_color_space_operand(descriptor, 2), depth);
        if alternate.is_none() {
            log::debug!("Separation {} has no usable alternate space", descriptor_label(descriptor));
        }

        Separation {
            colorant_name: document
                .color_space_operand(descriptor, 1)
                .and_then(|name| name.as_name())
                .map(str::to_string),
            alternate,
            has_tint_transform: document.color_space_operand(descriptor, 3).is_some(),
        }
    }

    fn device_n(&mut self, descriptor: &Descriptor, depth: u32) -> DeviceN {
        let document = self.document;
        let colorant_names = document
            .color_space_operand(descriptor, 1)
            .and_then(|names| names.as_array())
            .map(|names| {
                names
                    .iter()
                    .filter_map(|name| document.resolve(name)?.as_name().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();
        let alternate = self.nested_color_space(document.raw_color_space_operand(descriptor, 2), depth);

        let colorants = if self.options.flavour.checks_device_n_colorants() {
            let entries: Vec<(String, Object)> = document
                .color_space_operand(descriptor, 4)
                .and_then(|attributes| document.dictionary_value(attributes, "Colorants"))
                .and_then(|colorants| colorants.as_dict())
                .map(|colorants| {
                    let mut entries: Vec<_> = colorants
                        .iter()
                        .map(|(name, cs)| (name.clone(), cs.clone()))
                        .collect();
                    entries.sort_by(|a, b| a.0.cmp(&b.0));
                    entries
                })
                .unwrap_or_default();
            Some(
                entries
                    .into_iter()
                    .map(|(name, raw)| Colorant {
                        color_space: self.nested_color_space(Some(&raw), depth),
                        name,
                    })
                    .collect(),
            )
        } else {
            None
        };

        DeviceN {
            colorant_names,
            alternate,
            has_tint_transform: document.color_space_operand(descriptor, 3).is_some(),
            colorants,
        }
    }

    /// Parameter dictionary of a CIE-based space (`[/Family dict]`).
    fn parameters<'a>(&'a self, descriptor: &'a Descriptor) -> Option<&'a Dictionary> {
        let items = self.document.resolve(descriptor.object())?.as_array()?;
        let params = self.document.resolve_dict(items.get(1)?);
        if params.is_none() {
            log::debug!("{} has no parameter dictionary", descriptor_label(descriptor));
        }
        params
    }

    /// Fixed-length numeric array entry of a parameter dictionary.
    fn numbers<const N: usize>(&self, dict: &Dictionary, key: &str) -> Option<[f64; N]> {
        let items = self.document.resolve(dict.get(key)?)?.as_array()?;
        if items.len() != N {
            log::debug!("Expected {} numbers in /{}, found {}", N, key, items.len());
            return None;
        }
        let mut values = [0.0; N];
        for (value, item) in values.iter_mut().zip(items) {
            *value = self.document.resolve(item)?.as_number()?;
        }
        Some(values)
    }
}

/// Outcome of one dispatch, deciding what happens with the cache.
enum Resolved {
    Shared(Arc<ColorSpace>),
    Cacheable(ColorSpace),
    Fresh(ColorSpace),
    Absent,
}

fn is_device_name(name: &str) -> bool {
    matches!(name, "DeviceGray" | "DeviceRGB" | "DeviceCMYK" | "G" | "RGB" | "CMYK")
}

fn descriptor_label(descriptor: &Descriptor) -> String {
    match descriptor.key() {
        Some(key) => key.to_string(),
        None => "inline color space".to_string(),
    }
}
