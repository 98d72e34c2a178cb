pub mod app;
pub mod camera;
pub mod config;
pub mod controls;
pub mod error;
pub mod framebuffer;
pub mod input;
pub mod mesh;
pub mod projection;
pub mod rasterizer;
pub mod renderer;
pub mod timing;
pub mod vertex;
