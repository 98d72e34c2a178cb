use cgmath::{Vector2 as Vec2, Vector3 as Vec3, Vector4 as Vec4};

/// 带颜色信息的顶点（模型空间）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColoredVertex {
    pub pos: Vec3<f32>,
    pub color: Vec3<f32>,
}

impl ColoredVertex {
    pub fn new(pos: [f32; 3], color: [f32; 3]) -> Self {
        Self {
            pos: pos.into(),
            color: color.into(),
        }
    }
}

/// 顶点着色之后的裁剪空间顶点
#[derive(Debug, Clone, Copy)]
pub struct ClipSpaceVertex {
    pub position: Vec4<f32>,
    pub color: Vec3<f32>,
}

/// 光栅化阶段的 2D 点（带颜色和深度）
#[derive(Debug, Clone, Copy)]
pub struct RasterPoint {
    pub pos: Vec2<f32>,
    pub color: Vec3<f32>,
    pub z: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [ColoredVertex; 3],
}

impl Triangle {
    pub fn new(v0: ColoredVertex, v1: ColoredVertex, v2: ColoredVertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    pub fn get_center(&self) -> Vec3<f32> {
        (self.vertices[0].pos + self.vertices[1].pos + self.vertices[2].pos) / 3.0
    }
}
