//! Pattern model.
//!
//! Shading patterns resolve their shading color space; tiling patterns carry
//! the resource scope their content is drawn in. Patterns are not cached:
//! the same pattern object used under two different scopes yields two
//! differently scoped results.

use crate::colors::ColorSpace;
use crate::document::{ObjectResolver, PatternKind};
use crate::object::Object;
use crate::resources::{Descriptor, InheritableResources};
use crate::session::ModelSession;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;

/// A resolved pattern.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// `PatternType 2`
    Shading(ShadingPattern),
    /// `PatternType 1`
    Tiling(TilingPattern),
}

impl Pattern {
    /// Declared kind.
    pub fn kind(&self) -> PatternKind {
        match self {
            Pattern::Shading(_) => PatternKind::Shading,
            Pattern::Tiling(_) => PatternKind::Tiling,
        }
    }
}

/// Shading pattern.
#[derive(Debug, Clone)]
pub struct ShadingPattern {
    /// The `Shading` entry, when it is a dictionary or stream.
    pub shading: Option<Shading>,
    /// Whether an `ExtGState` entry is present.
    pub has_ext_g_state: bool,
}

/// Shading dictionary.
#[derive(Debug, Clone)]
pub struct Shading {
    /// `ShadingType`
    pub shading_type: Option<i64>,
    /// Resolved `ColorSpace`.
    pub color_space: Option<Arc<ColorSpace>>,
}

/// Tiling pattern.
#[derive(Debug, Clone)]
pub struct TilingPattern {
    /// `PaintType` (1 colored, 2 uncolored)
    pub paint_type: Option<i64>,
    /// `TilingType`
    pub tiling_type: Option<i64>,
    /// `BBox`
    pub bbox: Option<[f64; 4]>,
    /// `XStep`
    pub x_step: Option<f64>,
    /// `YStep`
    pub y_step: Option<f64>,
    /// Scope of the tile content: the pattern's own resources over the
    /// scope it was used in.
    pub resources: InheritableResources,
    /// Undecoded content stream of the tile.
    pub content: Bytes,
}

impl TilingPattern {
    /// Resolve a named color space used inside the tile.
    pub fn color_space<D: ObjectResolver + ?Sized>(
        &self,
        session: &mut ModelSession<'_, D>,
        name: &str,
    ) -> Option<Arc<ColorSpace>> {
        session.named_color_space(&self.resources, name)
    }
}

impl<'d, D: ObjectResolver + ?Sized> ModelSession<'d, D> {
    /// Resolve a pattern descriptor against the scope it is used in.
    pub fn pattern(
        &mut self,
        descriptor: Option<&Descriptor>,
        resources: &InheritableResources,
    ) -> Option<Pattern> {
        self.resolve_pattern(descriptor, resources, 0)
    }

    pub(crate) fn resolve_pattern(
        &mut self,
        descriptor: Option<&Descriptor>,
        resources: &InheritableResources,
        depth: u32,
    ) -> Option<Pattern> {
        let descriptor = descriptor?;
        let document = self.document;
        let Some(kind) = document.pattern_kind(descriptor) else {
            log::debug!("Pattern without a supported PatternType");
            return None;
        };

        match kind {
            PatternKind::Shading => {
                Some(Pattern::Shading(ShadingPattern {
                    shading: self.shading(descriptor, depth),
                    has_ext_g_state: document
                        .dictionary_value(descriptor.object(), "ExtGState")
                        .is_some(),
                }))
            },
            PatternKind::Tiling => {
                let layer = match document.embedded_resources(descriptor) {
                    Some(own) => own.clone(),
                    None => Object::Dictionary(HashMap::new()),
                };
                let content = match document.resolve(descriptor.object()) {
                    Some(Object::Stream { data, .. }) => data.clone(),
                    _ => Bytes::new(),
                };
                let number = |key: &str| {
                    document
                        .dictionary_value(descriptor.object(), key)
                        .and_then(|value| value.as_number())
                };
                let integer = |key: &str| {
                    document
                        .dictionary_value(descriptor.object(), key)
                        .and_then(|value| value.as_integer())
                };

                Some(Pattern::Tiling(TilingPattern {
                    paint_type: integer("PaintType"),
                    tiling_type: integer("TilingType"),
                    bbox: self.bbox(descriptor),
                    x_step: number("XStep"),
                    y_step: number("YStep"),
                    resources: resources.extend(layer),
                    content,
                }))
            },
        }
    }

    fn shading(&mut self, descriptor: &Descriptor, depth: u32) -> Option<Shading> {
        let document = self.document;
        let shading = document.dictionary_value(descriptor.object(), "Shading")?;
        let Some(dict) = shading.as_dict() else {
            log::debug!("Shading entry is a {}, expected a dictionary", shading.type_name());
            return None;
        };

        // Shadings cannot be pattern colored: no pattern context.
        let color_space = dict.get("ColorSpace").and_then(|raw| {
            let cs = Descriptor::new(raw.clone());
            self.resolve_color_space(&cs, None, &InheritableResources::EMPTY, 0, false, depth + 1)
        });

        Some(Shading {
            shading_type: dict
                .get("ShadingType")
                .and_then(|t| document.resolve(t))
                .and_then(|t| t.as_integer()),
            color_space,
        })
    }

    fn bbox(&self, descriptor: &Descriptor) -> Option<[f64; 4]> {
        let items = self
            .document
            .dictionary_value(descriptor.object(), "BBox")?
            .as_array()?;
        if items.len() != 4 {
            return None;
        }
        let mut bbox = [0.0; 4];
        for (value, item) in bbox.iter_mut().zip(items) {
            *value = self.document.resolve(item)?.as_number()?;
        }
        Some(bbox)
    }
}
