use crate::vertex::ClipSpaceVertex;

pub trait Clipper {
    // 接收一个裁剪空间的三角形
    // 返回一个 Vec，其中包含裁剪后产生的零个、一个或多个三角形
    fn clip_triangle(&self, triangle: &[ClipSpaceVertex; 3]) -> Vec<[ClipSpaceVertex; 3]>;
}

// 整体剔除视锥外的三角形，再按近平面切割
pub struct SimpleClipper;

impl Clipper for SimpleClipper {
    fn clip_triangle(&self, triangle: &[ClipSpaceVertex; 3]) -> Vec<[ClipSpaceVertex; 3]> {
        // 全部落在同一个裁剪面外侧
        for axis in 0..3 {
            for sign in [1.0, -1.0] {
                if triangle.iter().all(|v| sign * v.position[axis] > v.position.w) {
                    return vec![];
                }
            }
        }

        if triangle.iter().all(|v| near_distance(v) >= 0.0) {
            return vec![*triangle];
        }
        clip_near(triangle)
    }
}

// 到近平面 z = -w 的有向距离，非负表示在近平面之内
fn near_distance(v: &ClipSpaceVertex) -> f32 {
    v.position.z + v.position.w
}

fn lerp_vertex(a: &ClipSpaceVertex, b: &ClipSpaceVertex, t: f32) -> ClipSpaceVertex {
    ClipSpaceVertex {
        position: a.position + (b.position - a.position) * t,
        color: a.color + (b.color - a.color) * t,
    }
}

/// Sutherland-Hodgman，只切近平面。输出顶点都满足 w >= near，
/// 透视除法后坐标有界
fn clip_near(triangle: &[ClipSpaceVertex; 3]) -> Vec<[ClipSpaceVertex; 3]> {
    let mut polygon: Vec<ClipSpaceVertex> = Vec::with_capacity(4);
    for i in 0..3 {
        let current = &triangle[i];
        let next = &triangle[(i + 1) % 3];
        let (d_current, d_next) = (near_distance(current), near_distance(next));

        if d_current >= 0.0 {
            polygon.push(*current);
        }
        if (d_current >= 0.0) != (d_next >= 0.0) {
            let t = d_current / (d_current - d_next);
            polygon.push(lerp_vertex(current, next, t));
        }
    }

    // 扇形三角化，三角形得到 1 个，四边形得到 2 个
    (1..polygon.len().saturating_sub(1))
        .map(|i| [polygon[0], polygon[i], polygon[i + 1]])
        .collect()
}
