use lyon::math::{point, Point};
use lyon::path::PathBuffer;
use lyon::path::builder::PathBuilder;
use lyon::tessellation::{FillOptions, FillTessellator, VertexBuffers};
pub use lyon::tessellation::TessellationError;
use lyon::tessellation::geometry_builder::simple_builder;
use crate::rendering::deformed_rendering::Vertex;

/// Turns closed polygons into triangle lists for [`crate::rendering::deformed_rendering::TriangleRasterizer`].
pub struct PathTessellator {
    path_buffer: PathBuffer,
    buffers: VertexBuffers<Point, u16>
}

impl PathTessellator {
    pub fn new() -> Self {
        Self {
            path_buffer: PathBuffer::new(),
            buffers: VertexBuffers::new()
        }
    }

    pub fn tessellate_polyline_fill(
        &mut self,
        vertices_to_extend: &mut Vec<Vertex>,
        indices_to_extend: &mut Vec<u16>,
        positions: &[(f32, f32)]
    ) -> Result<(), TessellationError> {
        if positions.len() <= 2 {
            return Ok(());
        }

        self.path_buffer.clear();

        let mut builder = self.path_buffer.builder();

        builder.begin(point(positions[0].0, positions[0].1));
        for pos in positions.iter().skip(1) {
            builder.line_to(point(pos.0, pos.1));
        }
        builder.close();
        let path_id = builder.build();

        self.buffers.vertices.clear();
        self.buffers.indices.clear();

        let mut tessellator = FillTessellator::new();
        {
            let mut geometry_builder = simple_builder(&mut self.buffers);
            tessellator.tessellate_path(
                self.path_buffer.get(path_id),
                &FillOptions::default(),
                &mut geometry_builder
            )?;
        }

        // indices are local to this polygon, shift them past what the caller already holds
        let base = vertices_to_extend.len() as u16;
        for vertex in self.buffers.vertices.iter() {
            vertices_to_extend.push(Vertex { position: (vertex.x, vertex.y) })
        }
        indices_to_extend.extend(self.buffers.indices.iter().map(|it| it + base));
        Ok(())
    }
}

impl Default for PathTessellator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_becomes_two_triangles() {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        PathTessellator::new()
            .tessellate_polyline_fill(
                &mut vertices,
                &mut indices,
                &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]
            )
            .unwrap();
        assert_eq!(indices.len(), 6);
        assert_eq!(vertices.len(), 4);
    }

    #[test]
    fn second_polygon_indices_are_offset() {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let mut tessellator = PathTessellator::new();
        let tri = [(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)];
        tessellator.tessellate_polyline_fill(&mut vertices, &mut indices, &tri).unwrap();
        tessellator.tessellate_polyline_fill(&mut vertices, &mut indices, &tri).unwrap();
        assert!(indices[3..].iter().all(|&it| it >= 3));
        assert!(indices.iter().all(|&it| (it as usize) < vertices.len()));
    }

    #[test]
    fn degenerate_input_is_skipped() {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        PathTessellator::new()
            .tessellate_polyline_fill(&mut vertices, &mut indices, &[(0.0, 0.0), (1.0, 1.0)])
            .unwrap();
        assert!(indices.is_empty());
    }
}
