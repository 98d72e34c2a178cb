use std::path::{Path, PathBuf};

use minifb::Key;

use crate::camera::Camera;
use crate::config::ControlsConfig;
use crate::error::AppError;
use crate::input::InputSource;
use crate::renderer::Renderer;

/// 运行时调试操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    ResetCamera,
    ToggleWireframe,
    ToggleProjection,
    Screenshot,
}

/// 按键名转 minifb 的 Key，大小写不敏感
#[rustfmt::skip]
pub fn parse_key(name: &str) -> Option<Key> {
    let upper = name.trim().to_ascii_uppercase();
    let key = match upper.as_str() {
        "A" => Key::A, "B" => Key::B, "C" => Key::C, "D" => Key::D, "E" => Key::E,
        "F" => Key::F, "G" => Key::G, "H" => Key::H, "I" => Key::I, "J" => Key::J,
        "K" => Key::K, "L" => Key::L, "M" => Key::M, "N" => Key::N, "O" => Key::O,
        "P" => Key::P, "Q" => Key::Q, "R" => Key::R, "S" => Key::S, "T" => Key::T,
        "U" => Key::U, "V" => Key::V, "W" => Key::W, "X" => Key::X, "Y" => Key::Y,
        "Z" => Key::Z,
        "0" => Key::Key0, "1" => Key::Key1, "2" => Key::Key2, "3" => Key::Key3, "4" => Key::Key4,
        "5" => Key::Key5, "6" => Key::Key6, "7" => Key::Key7, "8" => Key::Key8, "9" => Key::Key9,
        "F1" => Key::F1, "F2" => Key::F2, "F3" => Key::F3, "F4" => Key::F4,
        "F5" => Key::F5, "F6" => Key::F6, "F7" => Key::F7, "F8" => Key::F8,
        "F9" => Key::F9, "F10" => Key::F10, "F11" => Key::F11, "F12" => Key::F12,
        "SPACE" => Key::Space,
        "TAB" => Key::Tab,
        "ENTER" => Key::Enter,
        "BACKSPACE" => Key::Backspace,
        "HOME" => Key::Home,
        "END" => Key::End,
        "INSERT" => Key::Insert,
        "DELETE" => Key::Delete,
        "PAGEUP" => Key::PageUp,
        "PAGEDOWN" => Key::PageDown,
        "UP" => Key::Up,
        "DOWN" => Key::Down,
        "LEFT" => Key::Left,
        "RIGHT" => Key::Right,
        _ => return None,
    };
    Some(key)
}

pub struct DebugControls {
    bindings: Vec<(ControlAction, Key)>,
    screenshot_dir: PathBuf,
    screenshot_count: usize,
}

impl DebugControls {
    pub fn from_config(config: &ControlsConfig, screenshot_dir: &Path) -> Result<Self, AppError> {
        let bind = |action: ControlAction, name: &str| {
            parse_key(name)
                .map(|key| (action, key))
                .ok_or_else(|| AppError::InvalidConfig(format!("未知的按键名 {name:?}")))
        };
        Ok(Self {
            bindings: vec![
                bind(ControlAction::ResetCamera, &config.reset_camera)?,
                bind(ControlAction::ToggleWireframe, &config.toggle_wireframe)?,
                bind(ControlAction::ToggleProjection, &config.toggle_projection)?,
                bind(ControlAction::Screenshot, &config.screenshot)?,
            ],
            screenshot_dir: screenshot_dir.to_path_buf(),
            screenshot_count: 0,
        })
    }

    pub fn key_for(&self, action: ControlAction) -> Option<Key> {
        self.bindings.iter().find(|(a, _)| *a == action).map(|(_, key)| *key)
    }

    /// 本帧触发的操作，按绑定顺序返回
    pub fn poll(&self, source: &impl InputSource) -> Vec<ControlAction> {
        self.bindings
            .iter()
            .filter(|(_, key)| source.is_key_pressed(*key))
            .map(|(action, _)| *action)
            .collect()
    }

    pub fn apply(
        &mut self,
        action: ControlAction,
        camera: &mut Camera,
        renderer: &mut Renderer,
    ) -> Result<(), AppError> {
        match action {
            ControlAction::ResetCamera => {
                camera.reset();
                log::info!("相机已重置到 {:?}", camera.position());
            }
            ControlAction::ToggleWireframe => {
                renderer.set_wireframe(!renderer.is_wireframe());
                log::info!("线框模式: {}", if renderer.is_wireframe() { "开" } else { "关" });
            }
            ControlAction::ToggleProjection => {
                let mode = renderer.projection_mode().toggled();
                renderer.set_projection_mode(mode);
                log::info!("投影模式: {}", mode.name());
            }
            ControlAction::Screenshot => {
                let path = self.next_screenshot_path();
                if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                    std::fs::create_dir_all(dir)?;
                }
                renderer.framebuffer().save_to_image(&path)?;
                self.screenshot_count += 1;
                log::info!("截图已保存到 {}", path.display());
            }
        }
        Ok(())
    }

    fn next_screenshot_path(&self) -> PathBuf {
        self.screenshot_dir.join(format!("screenshot_{:03}.png", self.screenshot_count))
    }
}
