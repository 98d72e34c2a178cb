use cgmath::Vector3 as Vec3;

#[derive(Debug, Clone, Copy)]
pub struct FragmentData {
    pub color: Vec3<f32>, // 顶点颜色插值结果
    pub depth: f32,
}

// 定义 Shader 的通用行为
pub trait FragmentShader {
    // 输入插值后的片元数据，输出最终的颜色 (0.0 ~ 1.0 范围的 Vec3)
    fn shade(&self, data: FragmentData) -> Vec3<f32>;
}

/// 直接输出顶点颜色
pub struct VertexColorShader;

impl FragmentShader for VertexColorShader {
    fn shade(&self, data: FragmentData) -> Vec3<f32> {
        data.color
    }
}

/// 深度可视化：近→亮，远→暗
pub struct DepthShader;

impl FragmentShader for DepthShader {
    fn shade(&self, data: FragmentData) -> Vec3<f32> {
        // 透视下深度非线性集中在 1 附近，开方拉开层次
        let brightness = (1.0 - data.depth.clamp(0.0, 1.0)).sqrt();
        Vec3::new(brightness, brightness, brightness)
    }
}

pub fn shader_by_name(name: &str) -> Box<dyn FragmentShader> {
    match name {
        "vertex_color" => Box::new(VertexColorShader),
        "depth" => Box::new(DepthShader),
        _ => {
            log::warn!("无此着色器 {name:?}，将默认使用顶点颜色");
            Box::new(VertexColorShader)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_color_passes_through() {
        let data = FragmentData {
            color: Vec3::new(0.2, 0.4, 0.6),
            depth: 0.3,
        };
        assert_eq!(VertexColorShader.shade(data), data.color);
    }

    #[test]
    fn depth_shader_brightens_near_fragments() {
        let near = DepthShader.shade(FragmentData {
            color: Vec3::new(0.0, 0.0, 0.0),
            depth: 0.1,
        });
        let far = DepthShader.shade(FragmentData {
            color: Vec3::new(0.0, 0.0, 0.0),
            depth: 0.9,
        });
        assert!(near.x > far.x);
        assert_eq!(DepthShader.shade(FragmentData { color: near, depth: 1.0 }).x, 0.0);
    }

    #[test]
    fn unknown_shader_falls_back_to_vertex_color() {
        let data = FragmentData {
            color: Vec3::new(0.7, 0.1, 0.2),
            depth: 0.5,
        };
        assert_eq!(shader_by_name("toon").shade(data), data.color);
        assert_ne!(shader_by_name("depth").shade(data), data.color);
    }
}
