use std::path::Path;

use cgmath::Vector3 as Vec3;

// NDC 深度映射到 [0, 1]，1.0 即远平面
pub const CLEAR_DEPTH: f32 = 1.0;

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u32>,
    pub depth: Vec<f32>,
}

/// 0.0~1.0 的 RGB 转成 minifb 使用的 0RGB
pub fn pack_color(color: Vec3<f32>) -> u32 {
    let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
    0xFF000000 | to_byte(color.x) << 16 | to_byte(color.y) << 8 | to_byte(color.z)
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        FrameBuffer {
            width,
            height,
            data: vec![0; width * height],
            depth: vec![CLEAR_DEPTH; width * height],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.data = vec![0; width * height];
        self.depth = vec![CLEAR_DEPTH; width * height];
    }

    pub fn clear(&mut self, color: u32) {
        self.data.fill(color);
        self.depth.fill(CLEAR_DEPTH);
    }

    /// 深度测试通过才写入，返回是否写入
    pub fn put_pixel(&mut self, x: usize, y: usize, color: u32, depth: f32) -> bool {
        if x < self.width && y < self.height {
            let idx = y * self.width + x;
            if depth < self.depth[idx] {
                self.data[idx] = color;
                self.depth[idx] = depth;
                return true;
            }
        }
        false
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.data[y * self.width + x])
    }

    pub fn save_to_image(&self, filepath: &Path) -> Result<(), image::ImageError> {
        use image::{ImageBuffer, Rgba};

        let mut img = ImageBuffer::new(self.width as u32, self.height as u32);

        for y in 0..self.height {
            for x in 0..self.width {
                let color = self.data[y * self.width + x];
                let r = ((color >> 16) & 0xFF) as u8;
                let g = ((color >> 8) & 0xFF) as u8;
                let b = (color & 0xFF) as u8;

                img.put_pixel(x as u32, y as u32, Rgba([r, g, b, 255]));
            }
        }

        img.save(filepath)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_test_keeps_nearest() {
        let mut fb = FrameBuffer::new(4, 4);
        assert!(fb.put_pixel(1, 1, 0xFF112233, 0.5));
        assert!(!fb.put_pixel(1, 1, 0xFF445566, 0.7));
        assert_eq!(fb.get_pixel(1, 1), Some(0xFF112233));
        assert!(fb.put_pixel(1, 1, 0xFF778899, 0.2));
        assert_eq!(fb.get_pixel(1, 1), Some(0xFF778899));
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut fb = FrameBuffer::new(2, 2);
        assert!(!fb.put_pixel(2, 0, 0xFFFFFFFF, 0.0));
        assert_eq!(fb.get_pixel(5, 5), None);
    }

    #[test]
    fn clear_resets_color_and_depth() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.put_pixel(0, 0, 0xFFFFFFFF, 0.1);
        fb.clear(0xFF000000);
        assert!(fb.data.iter().all(|&c| c == 0xFF000000));
        assert!(fb.depth.iter().all(|&d| d == CLEAR_DEPTH));
    }

    #[test]
    fn pack_color_clamps_channels() {
        assert_eq!(pack_color(Vec3::new(1.0, 0.0, 0.0)), 0xFFFF0000);
        assert_eq!(pack_color(Vec3::new(2.0, -1.0, 1.0)), 0xFFFF00FF);
        assert_eq!(pack_color(Vec3::new(0.5, 0.5, 0.5)), 0xFF808080);
    }

    #[test]
    fn resize_reallocates_buffers() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.resize(3, 5);
        assert_eq!(fb.data.len(), 15);
        assert_eq!(fb.depth.len(), 15);
    }

    #[test]
    fn saves_png() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.clear(0xFF00FF00);
        let name = format!("cube-renderer-test-{}.png", std::process::id());
        let path = std::env::temp_dir().join(name);
        fb.save_to_image(&path).unwrap();
        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(0, 0).0, [0, 255, 0, 255]);
        std::fs::remove_file(&path).unwrap();
    }
}
