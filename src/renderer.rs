pub mod clip;
pub mod fragment_shader;
pub mod vertex_shader;

use cgmath::{Matrix4 as Mat4, Vector2 as Vec2, Vector3 as Vec3};

use crate::camera::Camera;
use crate::framebuffer::{FrameBuffer, pack_color};
use crate::mesh::Mesh;
use crate::projection::{Projection, ProjectionMode};
use crate::rasterizer;
use crate::vertex::{ClipSpaceVertex, RasterPoint};

use self::clip::{Clipper, SimpleClipper};
use self::fragment_shader::{FragmentData, FragmentShader, shader_by_name};
use self::vertex_shader::{DefaultVertexShader, VertexShader, VertexShaderUniforms};

pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Viewport {
    fn full(width: usize, height: usize) -> Self {
        Self {
            x: 0,
            y: 0,
            w: width as i32,
            h: height as i32,
        }
    }
}

pub struct Renderer {
    pub(crate) framebuffer: FrameBuffer,
    pub(crate) viewport: Viewport,
    pub(crate) projection: Projection,
    clear_color: u32,
    wireframe: bool,
    fragment_shader: Box<dyn FragmentShader>,
}

impl Renderer {
    pub fn new(w: usize, h: usize, projection: Projection, shader_name: &str) -> Self {
        let mut projection = projection;
        projection.set_aspect(w, h);
        Self {
            framebuffer: FrameBuffer::new(w, h),
            viewport: Viewport::full(w, h),
            projection,
            clear_color: 0xFF000000,
            wireframe: false,
            fragment_shader: shader_by_name(shader_name),
        }
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn set_clear_color(&mut self, color: [f32; 3]) {
        self.clear_color = pack_color(color.into());
    }

    pub fn clear(&mut self) {
        self.framebuffer.clear(self.clear_color);
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        if w == 0 || h == 0 {
            return;
        }
        self.framebuffer.resize(w, h);
        self.viewport = Viewport::full(w, h);
        self.projection.set_aspect(w, h);
    }

    pub fn is_wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn set_wireframe(&mut self, enable: bool) {
        self.wireframe = enable;
    }

    pub fn projection_mode(&self) -> ProjectionMode {
        self.projection.mode
    }

    pub fn set_projection_mode(&mut self, mode: ProjectionMode) {
        self.projection.mode = mode;
    }

    /// 相机只提供视图矩阵和视野角，投影矩阵在这里构建
    pub fn draw(&mut self, mesh: &Mesh, model: &Mat4<f32>, camera: &Camera) {
        let view_matrix = camera.view_matrix();
        let proj_matrix = self.projection.matrix(camera.fov());
        let mvp_matrix = proj_matrix * view_matrix * model;

        let vertex_shader = DefaultVertexShader;
        let clipper = SimpleClipper;
        let uniforms = VertexShaderUniforms {
            mvp_matrix: &mvp_matrix,
        };

        for triangle in mesh.triangles() {
            //管线阶段 1: 顶点着色
            let clip_space_triangle = vertex_shader.shade_triangle(&triangle, &uniforms);

            //管线阶段 2: 裁剪
            for clipped in clipper.clip_triangle(&clip_space_triangle) {
                //管线阶段 3: 屏幕映射
                let raster_triangle = self.viewport_transform(&clipped);

                //管线阶段 4: 光栅化
                if self.wireframe {
                    self.draw_triangle_edges(&raster_triangle);
                } else {
                    self.rasterize_triangle(&raster_triangle);
                }
            }
        }
    }

    //视口变换
    fn viewport_transform(&self, clip_triangle: &[ClipSpaceVertex; 3]) -> [RasterPoint; 3] {
        clip_triangle.map(|clip_v| {
            // 透视除法
            let ndc_pos = clip_v.position / clip_v.position.w;

            // 转换到屏幕空间，y 轴向下
            let screen_x =
                (ndc_pos.x + 1.0) * 0.5 * self.viewport.w as f32 + self.viewport.x as f32;
            let screen_y = self.viewport.h as f32
                - (ndc_pos.y + 1.0) * 0.5 * self.viewport.h as f32
                + self.viewport.y as f32;

            RasterPoint {
                pos: Vec2::new(screen_x, screen_y),
                z: (ndc_pos.z + 1.0) * 0.5,
                color: clip_v.color,
            }
        })
    }

    fn rasterize_triangle(&mut self, points: &[RasterPoint; 3]) {
        let corners = [points[0].pos, points[1].pos, points[2].pos];
        let Some((min_x, min_y, max_x, max_y)) =
            rasterizer::get_box(&corners, self.framebuffer.width, self.framebuffer.height)
        else {
            return;
        };

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if !rasterizer::is_inside_triangle(&corners, &p) {
                    continue;
                }
                let Some(bary) = rasterizer::get_barycentric_coords(&corners, &p) else {
                    continue;
                };

                let depth = rasterizer::interpolate_depth(points, bary);
                if !(0.0..=1.0).contains(&depth) {
                    continue;
                }
                let color = self.fragment_shader.shade(FragmentData {
                    color: rasterizer::interpolate_color(points, bary),
                    depth,
                });
                self.framebuffer.put_pixel(x, y, pack_color(color), depth);
            }
        }
    }

    fn draw_triangle_edges(&mut self, points: &[RasterPoint; 3]) {
        for (a, b) in [(0, 1), (1, 2), (2, 0)] {
            self.draw_line(&points[a], &points[b]);
        }
    }

    // 先裁到屏幕内再走布雷森汉姆，深度和颜色按整条线段的参数插值
    fn draw_line(&mut self, from: &RasterPoint, to: &RasterPoint) {
        let (width, height) = (self.framebuffer.width, self.framebuffer.height);
        let Some((t0, t1)) = rasterizer::clip_segment(from.pos, to.pos, width, height) else {
            return;
        };
        let (max_x, max_y) = ((width - 1) as f32, (height - 1) as f32);
        let endpoint = |t: f32| {
            let p = from.pos + (to.pos - from.pos) * t;
            (
                p.x.clamp(0.0, max_x).round() as i32,
                p.y.clamp(0.0, max_y).round() as i32,
            )
        };
        let (x0, y0) = endpoint(t0);
        let (x1, y1) = endpoint(t1);

        for (x, y, local_t) in rasterizer::line_pixels(x0, y0, x1, y1) {
            let t = t0 + (t1 - t0) * local_t;
            let depth = from.z + (to.z - from.z) * t;
            if !(0.0..=1.0).contains(&depth) {
                continue;
            }
            let color: Vec3<f32> = from.color + (to.color - from.color) * t;
            let color = self.fragment_shader.shade(FragmentData { color, depth });
            self.framebuffer.put_pixel(x as usize, y as usize, pack_color(color), depth);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Point3, SquareMatrix};

    const W: usize = 64;
    const H: usize = 48;

    fn renderer(mode: ProjectionMode) -> Renderer {
        let mut r = Renderer::new(W, H, Projection::new(mode, 0.1, 5000.0, 1.0), "vertex_color");
        r.set_clear_color([0.0, 0.0, 0.0]);
        r.clear();
        r
    }

    // 正对原点的相机
    fn centered_camera() -> Camera {
        Camera::new(Point3::new(0.0, 0.0, 400.0), Vec3::unit_y(), -90.0, 0.0)
    }

    fn lit_pixels(r: &Renderer) -> usize {
        r.framebuffer().data.iter().filter(|&&c| c != 0xFF000000).count()
    }

    #[test]
    fn cube_in_front_of_camera_covers_center() {
        let mut r = renderer(ProjectionMode::Perspective);
        let cube = Mesh::cube(100.0).unwrap();
        r.draw(&cube, &Mat4::identity(), &centered_camera());

        assert_ne!(r.framebuffer().get_pixel(W / 2, H / 2), Some(0xFF000000));
        assert!(r.framebuffer().depth[(H / 2) * W + W / 2] < 1.0);
    }

    #[test]
    fn cube_behind_camera_is_not_drawn() {
        let mut r = renderer(ProjectionMode::Perspective);
        let cube = Mesh::cube(100.0).unwrap();
        let mut camera = centered_camera();
        camera.set_pose(Point3::new(0.0, 0.0, 400.0), Vec3::new(0.0, 0.0, 1.0));
        r.draw(&cube, &Mat4::identity(), &camera);
        assert_eq!(lit_pixels(&r), 0);
    }

    #[test]
    fn wireframe_draws_fewer_pixels_than_fill() {
        let cube = Mesh::cube(100.0).unwrap();
        let camera = centered_camera();

        let mut filled = renderer(ProjectionMode::Perspective);
        filled.draw(&cube, &Mat4::identity(), &camera);

        let mut wire = renderer(ProjectionMode::Perspective);
        wire.set_wireframe(true);
        wire.draw(&cube, &Mat4::identity(), &camera);

        let wire_count = lit_pixels(&wire);
        assert!(wire_count > 0);
        assert!(wire_count < lit_pixels(&filled));
    }

    #[test]
    fn orthographic_mode_renders_cube() {
        let mut r = renderer(ProjectionMode::Orthographic);
        let cube = Mesh::cube(100.0).unwrap();
        r.draw(&cube, &Mat4::identity(), &centered_camera());
        assert!(lit_pixels(&r) > 0);
        assert_eq!(r.projection_mode(), ProjectionMode::Orthographic);
    }

    #[test]
    fn nearer_surface_wins_depth_test() {
        let mut r = renderer(ProjectionMode::Perspective);
        let camera = Camera::new(Point3::new(0.0, 0.0, 10.0), Vec3::unit_y(), -90.0, 0.0);
        let cube = Mesh::cube(1.0).unwrap();
        r.draw(&cube, &Mat4::identity(), &camera);
        let center = r.framebuffer().get_pixel(W / 2, H / 2);

        // 再画一个更远的立方体，中心像素不应被覆盖
        let far_model = Mat4::from_translation(Vec3::new(0.0, 0.0, -20.0)) * Mat4::from_scale(5.0);
        r.draw(&cube, &far_model, &camera);
        assert_eq!(r.framebuffer().get_pixel(W / 2, H / 2), center);
    }

    #[test]
    fn camera_touching_a_face_stays_bounded() {
        // 眼睛离前表面不到近平面距离，前表面被整个切掉，侧面被近平面切开
        let camera = Camera::new(Point3::new(0.0, 0.0, 100.00002), Vec3::unit_y(), -90.0, 0.0);
        let cube = Mesh::cube(100.0).unwrap();
        let projection = Projection::new(ProjectionMode::Perspective, 0.1, 5000.0, 1.0);

        for wireframe in [true, false] {
            let mut r = Renderer::new(1024, 720, projection, "vertex_color");
            r.set_clear_color([0.0, 0.0, 0.0]);
            r.clear();
            r.set_wireframe(wireframe);
            r.draw(&cube, &Mat4::identity(), &camera);

            assert!(lit_pixels(&r) > 0, "wireframe={wireframe}");
            assert!(r.framebuffer().depth.iter().all(|d| (0.0..=1.0).contains(d)));
        }
    }

    #[test]
    fn resize_updates_viewport_and_aspect() {
        let mut r = renderer(ProjectionMode::Perspective);
        r.resize(200, 100);
        assert_eq!(r.framebuffer().width, 200);
        assert_eq!(r.viewport.w, 200);
        assert_eq!(r.projection.aspect, 2.0);
        r.resize(0, 100);
        assert_eq!(r.framebuffer().width, 200);
    }
}
