use cgmath::{Matrix4 as Mat4, SquareMatrix};
use minifb::{Key, Window, WindowOptions};

use crate::camera::Camera;
use crate::config::JsonConfig;
use crate::controls::DebugControls;
use crate::error::AppError;
use crate::input::{InputState, apply_frame_input};
use crate::mesh::Mesh;
use crate::projection::Projection;
use crate::renderer::Renderer;
use crate::timing::FrameClock;

const CUBE_HALF_EXTENT: f32 = 100.0;

pub struct App {
    config: JsonConfig,
    window: Window,
    camera: Camera,
    renderer: Renderer,
    cube: Mesh,
    input: InputState,
    controls: DebugControls,
    clock: FrameClock,
}

impl App {
    pub fn new(config: JsonConfig) -> Result<Self, AppError> {
        let (width, height) = (config.window.width, config.window.height);
        let mut window = Window::new(
            &config.window.title,
            width,
            height,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )?;
        window.set_target_fps(config.window.target_fps);

        let projection = Projection::new(
            config.render.projection,
            config.camera.near,
            config.camera.far,
            width as f32 / height as f32,
        );
        let mut renderer = Renderer::new(width, height, projection, &config.render.shader);
        renderer.set_wireframe(config.render.wireframe);
        renderer.set_clear_color(config.render.clear_color);

        let camera = Camera::from_config(&config.camera);
        let cube = Mesh::cube(CUBE_HALF_EXTENT)?;
        let input = InputState::new(config.input.invert_y);
        let controls = DebugControls::from_config(&config.controls, &config.screenshot_dir)?;

        log::info!(
            "窗口 {}x{}，立方体 {} 个三角形，按住右键飞行",
            width,
            height,
            cube.triangle_count()
        );

        Ok(Self {
            config,
            window,
            camera,
            renderer,
            cube,
            input,
            controls,
            clock: FrameClock::new(),
        })
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        while self.window.is_open() && !self.window.is_key_down(Key::Escape) {
            self.frame()?;
        }
        log::info!("窗口已关闭，相机停在 {:?}", self.camera.position());
        Ok(())
    }

    fn frame(&mut self) -> Result<(), AppError> {
        // 整帧共用一个 delta
        let delta_time = self.clock.tick();

        // 调试操作失败只记录，不中断渲染
        for action in self.controls.poll(&self.window) {
            if let Err(err) = self.controls.apply(action, &mut self.camera, &mut self.renderer) {
                log::error!("调试操作 {action:?} 失败: {err}");
            }
        }

        let frame_input = self.input.poll(&self.window);
        apply_frame_input(&mut self.camera, &frame_input, delta_time);
        self.window.set_cursor_visibility(self.camera.is_locked());

        let (width, height) = self.window.get_size();
        self.renderer.resize(width, height);

        self.renderer.clear();
        self.renderer.draw(&self.cube, &Mat4::identity(), &self.camera);

        let framebuffer = self.renderer.framebuffer();
        self.window
            .update_with_buffer(&framebuffer.data, framebuffer.width, framebuffer.height)?;
        self.window.set_title(&self.status_line());

        log::trace!(
            "dt={:.4} pos={:?} yaw={:.1} pitch={:.1} fov={:.1}",
            delta_time,
            self.camera.position(),
            self.camera.yaw(),
            self.camera.pitch(),
            self.camera.fov()
        );
        Ok(())
    }

    fn status_line(&self) -> String {
        let pos = self.camera.position();
        format!(
            "{} | {:.0} FPS | 位置 ({:.0}, {:.0}, {:.0}) | 偏航 {:.1} 俯仰 {:.1} | 视野 {:.0} | {}{}",
            self.config.window.title,
            self.clock.fps(),
            pos.x,
            pos.y,
            pos.z,
            self.camera.yaw(),
            self.camera.pitch(),
            self.camera.fov(),
            self.renderer.projection_mode().name(),
            if self.renderer.is_wireframe() { " | 线框" } else { "" }
        )
    }
}
