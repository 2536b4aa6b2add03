use wgpu::{Buffer, BufferUsages, Device, Queue};

/// Line vertex: NDC position plus RGBA color (24 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlotVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl PlotVertex {
    pub fn new(position: [f32; 2], color: [f32; 4]) -> Self {
        Self { position, color }
    }

    /// Vertex buffer layout for the plot pipeline
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PlotVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // Color
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Vertex storage for the line list, rewritten whenever the scene changes
pub struct LineBuffers {
    pub vertex_buffer: Buffer,
    /// Capacity in vertices
    capacity: usize,
    /// Vertices written by the last upload
    vertex_count: u32,
}

impl LineBuffers {
    /// Create a vertex buffer able to hold `capacity` vertices
    pub fn new(device: &Device, capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            vertex_buffer: create_vertex_buffer(device, capacity),
            capacity,
            vertex_count: 0,
        }
    }

    /// Upload a new scene, growing the buffer when it no longer fits
    pub fn upload(&mut self, device: &Device, queue: &Queue, vertices: &[PlotVertex]) {
        if vertices.len() > self.capacity {
            let capacity = grown_capacity(self.capacity, vertices.len());
            log::debug!(
                "Growing vertex buffer: {} -> {} vertices",
                self.capacity,
                capacity
            );
            self.vertex_buffer = create_vertex_buffer(device, capacity);
            self.capacity = capacity;
        }

        if !vertices.is_empty() {
            queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(vertices));
        }
        self.vertex_count = vertices.len() as u32;
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

fn create_vertex_buffer(device: &Device, capacity: usize) -> Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("plot-vertex-buffer"),
        size: (capacity * std::mem::size_of::<PlotVertex>()) as u64,
        usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Next power of two that holds `needed`, never shrinking
fn grown_capacity(current: usize, needed: usize) -> usize {
    needed.max(current).next_power_of_two()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_size() {
        assert_eq!(std::mem::size_of::<PlotVertex>(), 24);
        // write_buffer requires 4-byte aligned sizes
        assert_eq!(std::mem::size_of::<PlotVertex>() % wgpu::COPY_BUFFER_ALIGNMENT as usize, 0);
    }

    #[test]
    fn test_layout_matches_struct() {
        let layout = PlotVertex::desc();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[1].offset, 8);
    }

    #[test]
    fn test_grown_capacity() {
        assert_eq!(grown_capacity(16, 17), 32);
        assert_eq!(grown_capacity(16, 1000), 1024);
        assert_eq!(grown_capacity(4096, 5000), 8192);
    }

    #[test]
    fn test_cast_roundtrip_bytes() {
        let v = PlotVertex::new([0.5, -0.25], [1.0, 0.0, 0.0, 1.0]);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 24);
        let back: &PlotVertex = bytemuck::from_bytes(bytes);
        assert_eq!(*back, v);
    }
}
