use thiserror::Error;

use crate::mesh::MeshError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("配置解析失败: {0}")]
    Json(#[from] serde_json::Error),

    #[error("配置无效: {0}")]
    InvalidConfig(String),

    #[error("窗口错误: {0}")]
    Window(#[from] minifb::Error),

    #[error("图片保存失败: {0}")]
    Image(#[from] image::ImageError),

    #[error("网格数据错误: {0}")]
    Mesh(#[from] MeshError),
}
