use crate::vertex::RasterPoint;
use cgmath::{Vector2 as Vec2, Vector3 as Vec3, dot};

/// 返回 (u, v, w)，分别是顶点 0、1、2 的权重
pub fn get_barycentric_coords(vertices: &[Vec2<f32>; 3], p: &Vec2<f32>) -> Option<(f32, f32, f32)> {
    let v0 = vertices[1] - vertices[0];
    let v1 = vertices[2] - vertices[0];
    let v2 = *p - vertices[0];

    let d00 = dot(v0, v0);
    let d01 = dot(v0, v1);
    let d11 = dot(v1, v1);
    let d20 = dot(v2, v0);
    let d21 = dot(v2, v1);

    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < 1e-6 {
        return None; // 三角形面积为零，无法计算重心坐标
    }

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    let u = 1.0 - v - w;

    Some((u, v, w))
}

pub fn interpolate_depth(points: &[RasterPoint; 3], bary: (f32, f32, f32)) -> f32 {
    let (u, v, w) = bary;
    points[0].z * u + points[1].z * v + points[2].z * w
}

pub fn interpolate_color(points: &[RasterPoint; 3], bary: (f32, f32, f32)) -> Vec3<f32> {
    let (u, v, w) = bary;
    points[0].color * u + points[1].color * v + points[2].color * w
}

/// 包围盒，裁到 [0, width) x [0, height) 内；完全在屏幕外时返回 None
pub fn get_box(
    vertices: &[Vec2<f32>; 3],
    width: usize,
    height: usize,
) -> Option<(usize, usize, usize, usize)> {
    let min_x = vertices.iter().map(|v| v.x).fold(f32::INFINITY, f32::min).floor();
    let max_x = vertices.iter().map(|v| v.x).fold(f32::NEG_INFINITY, f32::max).ceil();
    let min_y = vertices.iter().map(|v| v.y).fold(f32::INFINITY, f32::min).floor();
    let max_y = vertices.iter().map(|v| v.y).fold(f32::NEG_INFINITY, f32::max).ceil();

    if width == 0
        || height == 0
        || max_x < 0.0
        || max_y < 0.0
        || min_x >= width as f32
        || min_y >= height as f32
    {
        return None;
    }

    Some((
        min_x.max(0.0) as usize,
        min_y.max(0.0) as usize,
        (max_x as usize).min(width - 1),
        (max_y as usize).min(height - 1),
    ))
}

pub fn is_inside_triangle(vertices: &[Vec2<f32>; 3], p: &Vec2<f32>) -> bool {
    let v0 = vertices[1] - vertices[0];
    let v1 = vertices[2] - vertices[1];
    let v2 = vertices[0] - vertices[2];

    let p0 = *p - vertices[0];
    let p1 = *p - vertices[1];
    let p2 = *p - vertices[2];

    let cross0 = v0.x * p0.y - v0.y * p0.x;
    let cross1 = v1.x * p1.y - v1.y * p1.x;
    let cross2 = v2.x * p2.y - v2.y * p2.x;

    (cross0 >= 0.0 && cross1 >= 0.0 && cross2 >= 0.0)
        || (cross0 <= 0.0 && cross1 <= 0.0 && cross2 <= 0.0)
}

/// Liang-Barsky：把线段裁到 [0, width-1] x [0, height-1]，返回保留部分的参数区间 (t0, t1)。
/// 完全在屏幕外或坐标非有限值时返回 None
pub fn clip_segment(
    from: Vec2<f32>,
    to: Vec2<f32>,
    width: usize,
    height: usize,
) -> Option<(f32, f32)> {
    let finite = [from.x, from.y, to.x, to.y].iter().all(|c| c.is_finite());
    if width == 0 || height == 0 || !finite {
        return None;
    }
    let (max_x, max_y) = ((width - 1) as f32, (height - 1) as f32);
    let d = to - from;

    let (mut t0, mut t1) = (0.0f32, 1.0f32);
    for (p, q) in [
        (-d.x, from.x),
        (d.x, max_x - from.x),
        (-d.y, from.y),
        (d.y, max_y - from.y),
    ] {
        if p == 0.0 {
            // 与这条边平行
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((t0, t1))
}

/// 布雷森汉姆算法，返回线段经过的像素及其插值参数 t ∈ [0, 1]
pub fn line_pixels(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32, f32)> {
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let steps = dx.max(dy).max(1) as f32;

    let mut pixels = Vec::with_capacity(dx.max(dy) as usize + 1);
    let (mut x, mut y) = (x0, y0);
    let mut err = dx - dy;
    let mut step = 0;
    loop {
        pixels.push((x, y, step as f32 / steps));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
        step += 1;
    }
    pixels
}
