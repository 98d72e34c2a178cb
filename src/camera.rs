use cgmath::{Angle, Deg, InnerSpace, Matrix4 as Mat4, Point3, Vector3 as Vec3};

use crate::config::CameraConfig;

pub const PITCH_LIMIT: f32 = 89.0;
pub const MIN_FOV: f32 = 1.0;
pub const MAX_FOV: f32 = 90.0;

pub const DEFAULT_YAW: f32 = -90.0;
pub const DEFAULT_PITCH: f32 = 0.0;
pub const DEFAULT_SPEED: f32 = 1000.0;
pub const DEFAULT_SENSITIVITY: f32 = 0.25;
pub const DEFAULT_FOV: f32 = 90.0;

/// 相机可执行的离散移动指令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl CameraMovement {
    pub const ALL: [CameraMovement; 6] = [
        CameraMovement::Forward,
        CameraMovement::Backward,
        CameraMovement::Left,
        CameraMovement::Right,
        CameraMovement::Up,
        CameraMovement::Down,
    ];
}

/// 相机的局部坐标系，三个向量始终单位长度且两两正交
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    pub front: Vec3<f32>,
    pub right: Vec3<f32>,
    pub up: Vec3<f32>,
}

impl Basis {
    /// 由欧拉角（角度制）推导正交基
    pub fn from_euler(yaw: f32, pitch: f32, world_up: Vec3<f32>) -> Self {
        let (yaw, pitch) = (Deg(yaw), Deg(pitch));
        let front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        let mut right = front.cross(world_up);
        if right.magnitude2() < 1e-10 {
            // world_up 与视线平行时叉积为零，换一根不共线的轴
            let axis = if front.x.abs() < 0.9 { Vec3::unit_x() } else { Vec3::unit_z() };
            right = front.cross(axis);
        }
        let right = right.normalize();
        let up = right.cross(front).normalize();
        Self { front, right, up }
    }
}

/// 单个移动指令对应的位移。只依赖传入的参数，不读写相机状态
pub fn displacement(movement: CameraMovement, basis: &Basis, distance: f32) -> Vec3<f32> {
    match movement {
        CameraMovement::Forward => basis.front * distance,
        CameraMovement::Backward => -basis.front * distance,
        CameraMovement::Right => basis.right * distance,
        CameraMovement::Left => -basis.right * distance,
        CameraMovement::Up => basis.up * distance,
        CameraMovement::Down => -basis.up * distance,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pose {
    position: Point3<f32>,
    yaw: f32,
    pitch: f32,
}

/// 自由飞行相机
#[derive(Debug, Clone)]
pub struct Camera {
    position: Point3<f32>,
    world_up: Vec3<f32>,
    basis: Basis,
    yaw: f32,
    pitch: f32,
    speed: f32,
    sensitivity: f32,
    fov: f32,
    movement_locked: bool,
    // reset() 回到的位置
    home: Pose,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Point3::new(200.0, 200.0, 400.0),
            Vec3::unit_y(),
            DEFAULT_YAW,
            DEFAULT_PITCH,
        )
    }
}

impl Camera {
    pub fn new(position: Point3<f32>, world_up: Vec3<f32>, yaw: f32, pitch: f32) -> Self {
        let world_up = if world_up.magnitude2() > 0.0 {
            world_up.normalize()
        } else {
            Vec3::unit_y()
        };
        let pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        Self {
            position,
            world_up,
            basis: Basis::from_euler(yaw, pitch, world_up),
            yaw,
            pitch,
            speed: DEFAULT_SPEED,
            sensitivity: DEFAULT_SENSITIVITY,
            fov: DEFAULT_FOV,
            movement_locked: false,
            home: Pose { position, yaw, pitch },
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self::new(
            config.position.into(),
            config.world_up.into(),
            config.yaw,
            config.pitch,
        );
        camera.set_speed(config.speed);
        camera.set_sensitivity(config.sensitivity);
        camera.fov = config.fov.clamp(MIN_FOV, MAX_FOV);
        camera
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn front(&self) -> Vec3<f32> {
        self.basis.front
    }

    pub fn right(&self) -> Vec3<f32> {
        self.basis.right
    }

    pub fn up(&self) -> Vec3<f32> {
        self.basis.up
    }

    pub fn basis(&self) -> &Basis {
        &self.basis
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn is_locked(&self) -> bool {
        self.movement_locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.movement_locked = locked;
    }

    /// 非正数会被拒绝，返回是否生效
    pub fn set_speed(&mut self, speed: f32) -> bool {
        if speed > 0.0 && speed.is_finite() {
            self.speed = speed;
            true
        } else {
            log::warn!("忽略无效的相机速度 {speed}");
            false
        }
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) -> bool {
        if sensitivity > 0.0 && sensitivity.is_finite() {
            self.sensitivity = sensitivity;
            true
        } else {
            log::warn!("忽略无效的鼠标灵敏度 {sensitivity}");
            false
        }
    }

    /// 按 speed * delta_time 平移，锁定时什么都不做并返回 false
    pub fn move_camera(&mut self, movement: CameraMovement, delta_time: f32) -> bool {
        if self.movement_locked {
            log::trace!("相机已锁定，忽略移动 {movement:?}");
            return false;
        }
        self.position += displacement(movement, &self.basis, self.speed * delta_time);
        true
    }

    /// 鼠标位移转成偏航/俯仰。锁定时不累加角度，但俯仰限制照常执行
    pub fn rotate(&mut self, x_offset: f32, y_offset: f32) -> bool {
        let x_offset = x_offset * self.sensitivity;
        let y_offset = y_offset * self.sensitivity;

        let applied = !self.movement_locked;
        if applied {
            self.yaw += x_offset;
            self.pitch += y_offset;
        }

        // 俯仰到 90 度时 look_at 会翻转
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_camera_vectors();
        applied
    }

    /// 滚轮调整视野，限制在 [1, 90] 度
    pub fn zoom(&mut self, scroll_offset: f32) {
        self.fov = (self.fov - scroll_offset).clamp(MIN_FOV, MAX_FOV);
    }

    pub fn view_matrix(&self) -> Mat4<f32> {
        Mat4::look_at_rh(self.position, self.position + self.basis.front, self.basis.up)
    }

    /// 同时设置位置和朝向。朝向换算回欧拉角后重建整个基，up/right 不会过期
    pub fn set_pose(&mut self, position: Point3<f32>, front: Vec3<f32>) {
        self.position = position;
        let finite = front.x.is_finite() && front.y.is_finite() && front.z.is_finite();
        if finite && front.magnitude2() > 0.0 {
            let front = front.normalize();
            let pitch = Deg::asin(front.y.clamp(-1.0, 1.0)).0;
            self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
            // 正对上下方时偏航角没有定义，保留原值
            if front.x.abs() > f32::EPSILON || front.z.abs() > f32::EPSILON {
                self.yaw = Deg::atan2(front.z, front.x).0;
            }
        }
        self.update_camera_vectors();
    }

    pub fn reset(&mut self) {
        let Pose { position, yaw, pitch } = self.home;
        self.position = position;
        self.yaw = yaw;
        self.pitch = pitch;
        self.update_camera_vectors();
    }

    // front/right/up 只在这里写入
    fn update_camera_vectors(&mut self) {
        self.basis = Basis::from_euler(self.yaw, self.pitch, self.world_up);
    }
}
