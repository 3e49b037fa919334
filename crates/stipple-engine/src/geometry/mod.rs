//! Vertex layout and vertex storage.

mod format;
mod vertex_array;
mod vertex_buffer;

pub use format::{AttributeFormat, ElementType};
pub use vertex_array::VertexArray;
pub use vertex_buffer::VertexBuffer;
