use super::AttributeFormat;
use crate::error::GeometryError;
use crate::shader::LinkedProgram;

/// Attribute layout for one interleaved vertex buffer.
///
/// Plays the role of a vertex array object: it records where each shader input
/// reads from inside a vertex, and is baked into the render pipeline.
#[derive(Debug)]
pub struct VertexArray {
    label: String,
    attributes: Vec<wgpu::VertexAttribute>,
    /// Explicit stride in bytes; 0 means tightly packed.
    stride: u64,
}

impl VertexArray {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        log::debug!("vertex array `{label}` created");
        Self {
            label,
            attributes: Vec::new(),
            stride: 0,
        }
    }

    /// Describes the vertex input `name` of `program`.
    ///
    /// `stride` is the distance between consecutive vertices in bytes, with 0
    /// meaning tightly packed; `offset` is the attribute's position inside a
    /// vertex. Setting an already described location replaces it.
    ///
    /// Returns the attribute's shader location.
    pub fn set_vertex_attribute(
        &mut self,
        program: &LinkedProgram,
        name: &str,
        format: AttributeFormat,
        stride: u64,
        offset: u64,
    ) -> Result<u32, GeometryError> {
        let input = program.attribute(name)?;
        let vertex_format = format.vertex_format()?;

        let described = format.shader_type();
        if described != input.ty {
            return Err(GeometryError::AttributeMismatch {
                name: name.to_string(),
                location: input.location,
                declared: input.ty.to_string(),
                described: described.to_string(),
            });
        }

        if stride != 0 {
            if self.stride != 0 && self.stride != stride {
                return Err(GeometryError::InvalidStride(format!(
                    "`{name}` uses stride {stride} but the layout already uses {}",
                    self.stride
                )));
            }
            if offset + vertex_format.size() > stride {
                return Err(GeometryError::InvalidStride(format!(
                    "`{name}` at offset {offset} does not fit in stride {stride}"
                )));
            }
            self.stride = stride;
        }

        let attribute = wgpu::VertexAttribute {
            format: vertex_format,
            offset,
            shader_location: input.location,
        };

        match self
            .attributes
            .iter_mut()
            .find(|a| a.shader_location == input.location)
        {
            Some(existing) => *existing = attribute,
            None => self.attributes.push(attribute),
        }

        log::debug!(
            "vertex array `{}`: `{name}` -> location {} as {vertex_format:?} at offset {offset}",
            self.label,
            input.location
        );

        Ok(input.location)
    }

    pub fn attributes(&self) -> &[wgpu::VertexAttribute] {
        &self.attributes
    }

    /// Effective stride: the explicit one, or the packed size of all attributes.
    pub fn stride(&self) -> u64 {
        if self.stride != 0 {
            return self.stride;
        }
        self.attributes
            .iter()
            .map(|a| a.offset + a.format.size())
            .max()
            .unwrap_or(0)
    }

    /// Buffer layout for pipeline creation.
    pub fn layout(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride(),
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &self.attributes,
        }
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        log::debug!("vertex array `{}` released", self.label);
    }
}
