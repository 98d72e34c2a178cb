use cgmath::{Deg, Matrix4 as Mat4};
use serde::Deserialize;

// 正交模式下用这个距离处的视锥截面作为可视范围，这样滚轮缩放对两种模式都有效
const ORTHO_REFERENCE_DISTANCE: f32 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMode {
    #[default]
    Perspective,
    Orthographic,
}

impl ProjectionMode {
    pub fn toggled(self) -> Self {
        match self {
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ProjectionMode::Perspective => "透视",
            ProjectionMode::Orthographic => "正交",
        }
    }
}

/// 投影参数。视野角由相机提供，这里只保存与相机无关的部分
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub mode: ProjectionMode,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
}

impl Projection {
    pub fn new(mode: ProjectionMode, near: f32, far: f32, aspect: f32) -> Self {
        Self {
            mode,
            near,
            far,
            aspect,
        }
    }

    pub fn set_aspect(&mut self, width: usize, height: usize) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// fov 为垂直视野角（角度制）
    pub fn matrix(&self, fov: f32) -> Mat4<f32> {
        let fovy = Deg(fov);
        match self.mode {
            ProjectionMode::Perspective => perspective(fovy, self.aspect, self.near, self.far),
            ProjectionMode::Orthographic => {
                let half_h = ORTHO_REFERENCE_DISTANCE * (fovy.0.to_radians() / 2.0).tan();
                let half_w = half_h * self.aspect;
                cgmath::ortho(-half_w, half_w, -half_h, half_h, self.near, self.far)
            }
        }
    }
}

#[rustfmt::skip]
fn perspective(fovy: Deg<f32>, aspect: f32, near: f32, far: f32) -> Mat4<f32> {
    let tan_half_fovy = (fovy.0.to_radians() / 2.0).tan();
    let a = 1.0 / (aspect * tan_half_fovy);
    let b = 1.0 / tan_half_fovy;
    let c = -(far + near) / (far - near);
    let d = -2.0 * far * near / (far - near);

    // 按列传入
    Mat4::new(
        a,    0.0,   0.0,   0.0,
        0.0,  b,     0.0,   0.0,
        0.0,  0.0,   c,    -1.0,
        0.0,  0.0,   d,     0.0,
    )
}
