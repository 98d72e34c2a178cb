use thiserror::Error;

use crate::vertex::{ColoredVertex, Triangle};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("索引数量 {0} 不是 3 的倍数")]
    IncompleteTriangle(usize),
    #[error("索引 {index} 超出顶点范围（共 {vertex_count} 个顶点）")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

/// 顶点 + 索引，对应一次 draw call 的全部数据
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<ColoredVertex>,
    indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<ColoredVertex>, indices: Vec<u32>) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangle(indices.len()));
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count: vertices.len(),
            });
        }
        Ok(Self { vertices, indices })
    }

    /// 以原点为中心的立方体，8 个顶点 12 个三角形
    #[rustfmt::skip]
    pub fn cube(half_extent: f32) -> Result<Self, MeshError> {
        let h = half_extent;
        let red = [1.0, 0.0, 0.0];
        let green = [0.0, 1.0, 0.0];
        let blue = [0.0, 0.0, 1.0];
        let vertices = vec![
            ColoredVertex::new([ h,  h,  h], red),   // 0
            ColoredVertex::new([-h,  h,  h], green), // 1
            ColoredVertex::new([-h,  h, -h], blue),  // 2
            ColoredVertex::new([ h,  h, -h], red),   // 3
            ColoredVertex::new([ h, -h,  h], green), // 4
            ColoredVertex::new([-h, -h,  h], blue),  // 5
            ColoredVertex::new([-h, -h, -h], red),   // 6
            ColoredVertex::new([ h, -h, -h], green), // 7
        ];
        let indices = vec![
            0, 3, 2,  2, 1, 0, // 上
            4, 5, 6,  6, 7, 4, // 下
            0, 1, 5,  5, 4, 0, // 前
            3, 7, 6,  6, 2, 3, // 后
            0, 4, 7,  7, 3, 0, // 右
            1, 2, 6,  6, 5, 1, // 左
        ];
        Self::new(vertices, indices)
    }

    pub fn vertices(&self) -> &[ColoredVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// 按索引组装三角形。索引已在构造时检查过，不会越界
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            Triangle::new(
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            )
        })
    }
}
