use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::from_reader;

use crate::camera::{
    DEFAULT_FOV, DEFAULT_PITCH, DEFAULT_SENSITIVITY, DEFAULT_SPEED, DEFAULT_YAW, MAX_FOV, MIN_FOV,
};
use crate::controls::parse_key;
use crate::error::AppError;
use crate::projection::ProjectionMode;

/// 程序的完整配置。所有字段都有默认值，json 里只写需要覆盖的部分即可
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub render: RenderConfig,
    pub input: InputConfig,
    pub controls: ControlsConfig,
    pub screenshot_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: usize,
    pub height: usize,
    pub title: String,
    pub target_fps: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 720,
            title: "cube-renderer".to_string(),
            target_fps: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub world_up: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    pub speed: f32,
    pub sensitivity: f32,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [200.0, 200.0, 400.0],
            world_up: [0.0, 1.0, 0.0],
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            speed: DEFAULT_SPEED,
            sensitivity: DEFAULT_SENSITIVITY,
            fov: DEFAULT_FOV,
            near: 0.1,
            far: 5000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub wireframe: bool,
    pub projection: ProjectionMode,
    pub shader: String,
    pub clear_color: [f32; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            wireframe: false,
            projection: ProjectionMode::Perspective,
            shader: "vertex_color".to_string(),
            clear_color: [0.1, 0.1, 0.12],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub invert_y: bool,
}

/// 调试按键，值为按键名（如 "R"、"F12"）
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub reset_camera: String,
    pub toggle_wireframe: String,
    pub toggle_projection: String,
    pub screenshot: String,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            reset_camera: "R".to_string(),
            toggle_wireframe: "F".to_string(),
            toggle_projection: "P".to_string(),
            screenshot: "F12".to_string(),
        }
    }
}

impl JsonConfig {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path)?;
        let config: JsonConfig = from_reader(BufReader::new(file))?;
        config.validate()?;
        log::info!("成功读取配置 {}", path.display());
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        let config: JsonConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let invalid = |msg: String| Err(AppError::InvalidConfig(msg));

        if self.window.width == 0 || self.window.height == 0 {
            return invalid(format!(
                "窗口尺寸必须大于0，当前为 {}x{}",
                self.window.width, self.window.height
            ));
        }

        let camera = &self.camera;
        if !(camera.speed > 0.0) {
            return invalid(format!("camera.speed 必须为正数，当前为 {}", camera.speed));
        }
        if !(camera.sensitivity > 0.0) {
            return invalid(format!(
                "camera.sensitivity 必须为正数，当前为 {}",
                camera.sensitivity
            ));
        }
        if !(camera.near > 0.0) || !(camera.far > camera.near) {
            return invalid(format!(
                "需要满足 0 < near < far，当前 near={} far={}",
                camera.near, camera.far
            ));
        }
        if !(MIN_FOV..=MAX_FOV).contains(&camera.fov) {
            return invalid(format!(
                "camera.fov 必须在 [{MIN_FOV}, {MAX_FOV}] 之间，当前为 {}",
                camera.fov
            ));
        }
        if camera.world_up.iter().all(|c| *c == 0.0) {
            return invalid("camera.world_up 不能是零向量".to_string());
        }

        let controls = &self.controls;
        for name in [
            &controls.reset_camera,
            &controls.toggle_wireframe,
            &controls.toggle_projection,
            &controls.screenshot,
        ] {
            if parse_key(name).is_none() {
                return invalid(format!("未知的按键名 {name:?}"));
            }
        }
        Ok(())
    }
}
