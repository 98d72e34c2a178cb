use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window};

use crate::camera::{Camera, CameraMovement};

/// 移动键位，与原型保持一致：WASD 平移，E/Q 升降
pub const MOVEMENT_KEYS: [(Key, CameraMovement); 6] = [
    (Key::W, CameraMovement::Forward),
    (Key::S, CameraMovement::Backward),
    (Key::A, CameraMovement::Left),
    (Key::D, CameraMovement::Right),
    (Key::E, CameraMovement::Up),
    (Key::Q, CameraMovement::Down),
];

/// 窗口输入的抽象，方便在测试里替换掉真实窗口
pub trait InputSource {
    fn is_key_down(&self, key: Key) -> bool;
    // 本帧刚按下，不含长按重复
    fn is_key_pressed(&self, key: Key) -> bool;
    fn mouse_pos(&self) -> Option<(f32, f32)>;
    // 按住右键时才允许飞行
    fn is_flight_button_down(&self) -> bool;
    fn scroll_delta(&self) -> f32;
}

impl InputSource for Window {
    fn is_key_down(&self, key: Key) -> bool {
        Window::is_key_down(self, key)
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        Window::is_key_pressed(self, key, KeyRepeat::No)
    }

    fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.get_mouse_pos(MouseMode::Pass)
    }

    fn is_flight_button_down(&self) -> bool {
        self.get_mouse_down(MouseButton::Right)
    }

    fn scroll_delta(&self) -> f32 {
        self.get_scroll_wheel().map_or(0.0, |(_, y)| y)
    }
}

/// 一帧内收集到的全部相机输入
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    pub movements: Vec<CameraMovement>,
    pub mouse_delta: (f32, f32),
    pub scroll: f32,
    pub locked: bool,
}

#[derive(Debug, Default)]
pub struct InputState {
    last_mouse: Option<(f32, f32)>,
    was_flying: bool,
    invert_y: bool,
}

impl InputState {
    pub fn new(invert_y: bool) -> Self {
        Self {
            invert_y,
            ..Self::default()
        }
    }

    pub fn poll(&mut self, source: &impl InputSource) -> FrameInput {
        let flying = source.is_flight_button_down();
        let mouse = source.mouse_pos();

        // 刚按下右键的第一帧只记录位置，否则视角会跳一下
        let mouse_delta = match (mouse, self.last_mouse) {
            (Some((x, y)), Some((last_x, last_y))) if flying && self.was_flying => {
                let dy = y - last_y;
                (x - last_x, if self.invert_y { -dy } else { dy })
            }
            _ => (0.0, 0.0),
        };
        self.last_mouse = mouse;
        self.was_flying = flying;

        let movements = MOVEMENT_KEYS
            .iter()
            .filter(|(key, _)| source.is_key_down(*key))
            .map(|(_, movement)| *movement)
            .collect();

        FrameInput {
            movements,
            mouse_delta,
            scroll: source.scroll_delta(),
            locked: !flying,
        }
    }
}

/// 按固定顺序交给相机：锁定状态、移动、旋转、缩放
pub fn apply_frame_input(camera: &mut Camera, input: &FrameInput, delta_time: f32) {
    camera.set_locked(input.locked);
    for movement in &input.movements {
        camera.move_camera(*movement, delta_time);
    }
    let (dx, dy) = input.mouse_delta;
    if dx != 0.0 || dy != 0.0 {
        camera.rotate(dx, dy);
    }
    if input.scroll != 0.0 {
        camera.zoom(input.scroll);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use cgmath::InnerSpace;

    /// 脚本化的输入源
    #[derive(Default)]
    pub(crate) struct ScriptedInput {
        pub down: Vec<Key>,
        pub pressed: Vec<Key>,
        pub mouse: Option<(f32, f32)>,
        pub right_button: bool,
        pub scroll: f32,
    }

    impl InputSource for ScriptedInput {
        fn is_key_down(&self, key: Key) -> bool {
            self.down.contains(&key)
        }

        fn is_key_pressed(&self, key: Key) -> bool {
            self.pressed.contains(&key)
        }

        fn mouse_pos(&self) -> Option<(f32, f32)> {
            self.mouse
        }

        fn is_flight_button_down(&self) -> bool {
            self.right_button
        }

        fn scroll_delta(&self) -> f32 {
            self.scroll
        }
    }

    #[test]
    fn released_button_locks_camera() {
        let mut state = InputState::new(false);
        let source = ScriptedInput {
            down: vec![Key::W],
            mouse: Some((10.0, 10.0)),
            ..Default::default()
        };
        let input = state.poll(&source);
        assert!(input.locked);
        assert_eq!(input.movements, vec![CameraMovement::Forward]);
        assert_eq!(input.mouse_delta, (0.0, 0.0));
    }

    #[test]
    fn first_sample_after_press_is_swallowed() {
        let mut state = InputState::new(false);
        let mut source = ScriptedInput {
            mouse: Some((100.0, 100.0)),
            ..Default::default()
        };
        state.poll(&source);

        source.right_button = true;
        source.mouse = Some((150.0, 120.0));
        let input = state.poll(&source);
        assert!(!input.locked);
        assert_eq!(input.mouse_delta, (0.0, 0.0));

        source.mouse = Some((160.0, 115.0));
        let input = state.poll(&source);
        assert_eq!(input.mouse_delta, (10.0, -5.0));
    }

    #[test]
    fn invert_y_flips_vertical_delta() {
        let mut state = InputState::new(true);
        let mut source = ScriptedInput {
            mouse: Some((0.0, 0.0)),
            right_button: true,
            ..Default::default()
        };
        state.poll(&source);
        source.mouse = Some((3.0, 4.0));
        assert_eq!(state.poll(&source).mouse_delta, (3.0, -4.0));
    }

    #[test]
    fn collects_all_held_movement_keys() {
        let mut state = InputState::new(false);
        let source = ScriptedInput {
            down: vec![Key::Q, Key::D, Key::W, Key::Space],
            right_button: true,
            scroll: 2.0,
            ..Default::default()
        };
        let input = state.poll(&source);
        assert_eq!(
            input.movements,
            vec![CameraMovement::Forward, CameraMovement::Right, CameraMovement::Down]
        );
        assert_eq!(input.scroll, 2.0);
    }

    #[test]
    fn frame_input_drives_camera() {
        let mut camera = Camera::default();
        camera.set_speed(10.0);
        let start = camera.position();
        let input = FrameInput {
            movements: vec![CameraMovement::Forward],
            mouse_delta: (0.0, 0.0),
            scroll: 5.0,
            locked: false,
        };
        apply_frame_input(&mut camera, &input, 0.5);
        assert!(((camera.position() - start).magnitude() - 5.0).abs() < 1e-3);
        assert_eq!(camera.fov(), 85.0);
    }

    #[test]
    fn locked_frame_only_zooms() {
        let mut camera = Camera::default();
        let start = camera.position();
        let input = FrameInput {
            movements: vec![CameraMovement::Left, CameraMovement::Up],
            mouse_delta: (40.0, 40.0),
            scroll: -5.0,
            locked: true,
        };
        apply_frame_input(&mut camera, &input, 1.0);
        assert!(camera.is_locked());
        assert_eq!(camera.position(), start);
        assert_eq!(camera.yaw(), -90.0);
        assert_eq!(camera.fov(), 90.0);
    }
}
