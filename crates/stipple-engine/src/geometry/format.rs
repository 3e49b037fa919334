use std::fmt;

use crate::error::GeometryError;
use crate::shader::{InterfaceType, ScalarType};

/// Element type of one attribute component as stored in the vertex buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ElementType {
    Float32,
    Uint8,
    Sint8,
    Uint16,
    Sint16,
    Uint32,
    Sint32,
}

/// Buffer-side description of one vertex attribute: component count, element
/// type and whether integer data is normalized to `[0, 1]` / `[-1, 1]`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct AttributeFormat {
    pub components: u8,
    pub element: ElementType,
    pub normalized: bool,
}

impl AttributeFormat {
    pub const fn new(components: u8, element: ElementType, normalized: bool) -> Self {
        Self {
            components,
            element,
            normalized,
        }
    }

    /// `components` tightly packed 32-bit floats.
    pub const fn float32(components: u8) -> Self {
        Self::new(components, ElementType::Float32, false)
    }

    /// Matching wgpu vertex format.
    ///
    /// Normalization is ignored for float elements. 8- and 16-bit elements only
    /// come in pairs and quads; 32-bit integers cannot be normalized.
    pub fn vertex_format(&self) -> Result<wgpu::VertexFormat, GeometryError> {
        use wgpu::VertexFormat as F;
        use ElementType as E;

        let format = match (self.element, self.normalized, self.components) {
            (E::Float32, _, 1) => F::Float32,
            (E::Float32, _, 2) => F::Float32x2,
            (E::Float32, _, 3) => F::Float32x3,
            (E::Float32, _, 4) => F::Float32x4,

            (E::Uint8, false, 2) => F::Uint8x2,
            (E::Uint8, false, 4) => F::Uint8x4,
            (E::Uint8, true, 2) => F::Unorm8x2,
            (E::Uint8, true, 4) => F::Unorm8x4,

            (E::Sint8, false, 2) => F::Sint8x2,
            (E::Sint8, false, 4) => F::Sint8x4,
            (E::Sint8, true, 2) => F::Snorm8x2,
            (E::Sint8, true, 4) => F::Snorm8x4,

            (E::Uint16, false, 2) => F::Uint16x2,
            (E::Uint16, false, 4) => F::Uint16x4,
            (E::Uint16, true, 2) => F::Unorm16x2,
            (E::Uint16, true, 4) => F::Unorm16x4,

            (E::Sint16, false, 2) => F::Sint16x2,
            (E::Sint16, false, 4) => F::Sint16x4,
            (E::Sint16, true, 2) => F::Snorm16x2,
            (E::Sint16, true, 4) => F::Snorm16x4,

            (E::Uint32, false, 1) => F::Uint32,
            (E::Uint32, false, 2) => F::Uint32x2,
            (E::Uint32, false, 3) => F::Uint32x3,
            (E::Uint32, false, 4) => F::Uint32x4,

            (E::Sint32, false, 1) => F::Sint32,
            (E::Sint32, false, 2) => F::Sint32x2,
            (E::Sint32, false, 3) => F::Sint32x3,
            (E::Sint32, false, 4) => F::Sint32x4,

            _ => return Err(GeometryError::UnsupportedFormat(self.to_string())),
        };

        Ok(format)
    }

    /// Type the vertex shader receives for this attribute.
    pub fn shader_type(&self) -> InterfaceType {
        let scalar = match (self.element, self.normalized) {
            (ElementType::Float32, _) | (_, true) => ScalarType::Float32,
            (ElementType::Uint8 | ElementType::Uint16 | ElementType::Uint32, false) => {
                ScalarType::Uint32
            }
            (ElementType::Sint8 | ElementType::Sint16 | ElementType::Sint32, false) => {
                ScalarType::Sint32
            }
        };
        InterfaceType::new(scalar, self.components)
    }
}

impl fmt::Display for AttributeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{:?}", self.components, self.element)?;
        if self.normalized {
            f.write_str(" (normalized)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_pairs_map_directly() {
        let f = AttributeFormat::float32(2);
        assert_eq!(f.vertex_format().unwrap(), wgpu::VertexFormat::Float32x2);
        assert_eq!(f.shader_type(), InterfaceType::new(ScalarType::Float32, 2));
    }

    #[test]
    fn normalized_bytes_become_unorm_floats() {
        let f = AttributeFormat::new(4, ElementType::Uint8, true);
        assert_eq!(f.vertex_format().unwrap(), wgpu::VertexFormat::Unorm8x4);
        assert_eq!(f.shader_type().scalar, ScalarType::Float32);
    }

    #[test]
    fn plain_shorts_stay_integers() {
        let f = AttributeFormat::new(2, ElementType::Sint16, false);
        assert_eq!(f.vertex_format().unwrap(), wgpu::VertexFormat::Sint16x2);
        assert_eq!(f.shader_type().scalar, ScalarType::Sint32);
    }

    #[test]
    fn normalization_is_ignored_for_floats() {
        let f = AttributeFormat::new(3, ElementType::Float32, true);
        assert_eq!(f.vertex_format().unwrap(), wgpu::VertexFormat::Float32x3);
    }

    #[test]
    fn unsupported_combinations_are_rejected() {
        for f in [
            AttributeFormat::new(3, ElementType::Uint8, false),
            AttributeFormat::new(2, ElementType::Uint32, true),
            AttributeFormat::float32(0),
            AttributeFormat::float32(5),
        ] {
            assert!(
                matches!(f.vertex_format(), Err(GeometryError::UnsupportedFormat(_))),
                "{f} should be rejected"
            );
        }
    }
}
