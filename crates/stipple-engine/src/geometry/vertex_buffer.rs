/// Smallest non-empty allocation, in bytes.
const MIN_CAPACITY: u64 = 512;

/// GPU buffer holding vertex data that is replaced wholesale on every upload.
///
/// Starts with a zero-sized allocation. Uploads always write the complete
/// contents from offset 0; the allocation only grows.
pub struct VertexBuffer {
    label: String,
    buffer: wgpu::Buffer,
    capacity: u64,
    len: u64,
    vertex_count: u32,
}

impl VertexBuffer {
    pub fn new(device: &wgpu::Device, label: impl Into<String>) -> Self {
        let label = label.into();
        let buffer = create(device, &label, 0);
        log::debug!("vertex buffer `{label}` created");

        Self {
            label,
            buffer,
            capacity: 0,
            len: 0,
            vertex_count: 0,
        }
    }

    /// Replaces the buffer contents with `contents`, which holds `vertex_count`
    /// vertices. Reallocates when the current allocation is too small.
    ///
    /// `contents.len()` must be a multiple of [`wgpu::COPY_BUFFER_ALIGNMENT`].
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        contents: &[u8],
        vertex_count: u32,
    ) {
        let required = contents.len() as u64;
        debug_assert_eq!(required % wgpu::COPY_BUFFER_ALIGNMENT, 0);

        if required > self.capacity {
            let capacity = grown_capacity(required);
            self.buffer = create(device, &self.label, capacity);
            self.capacity = capacity;
            log::debug!("vertex buffer `{}` grown to {capacity} bytes", self.label);
        }

        if required > 0 {
            queue.write_buffer(&self.buffer, 0, contents);
        }

        self.len = required;
        self.vertex_count = vertex_count;
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Number of vertices written by the last upload.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Bytes written by the last upload.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slice covering the uploaded contents, or `None` before the first
    /// non-empty upload.
    pub fn slice(&self) -> Option<wgpu::BufferSlice<'_>> {
        (!self.is_empty()).then(|| self.buffer.slice(..self.len))
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        log::debug!("vertex buffer `{}` released", self.label);
    }
}

fn create(device: &wgpu::Device, label: &str, size: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn grown_capacity(required: u64) -> u64 {
    required.next_power_of_two().max(MIN_CAPACITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_uploads_get_the_minimum() {
        assert_eq!(grown_capacity(8), MIN_CAPACITY);
        assert_eq!(grown_capacity(MIN_CAPACITY), MIN_CAPACITY);
    }

    #[test]
    fn growth_is_power_of_two() {
        assert_eq!(grown_capacity(MIN_CAPACITY + 8), MIN_CAPACITY * 2);
        assert_eq!(grown_capacity(5000), 8192);
    }
}
