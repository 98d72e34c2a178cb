use std::path::PathBuf;

use cube_renderer::app::App;
use cube_renderer::config::JsonConfig;
use cube_renderer::error::AppError;

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 第一个参数是配置文件路径，不给就用默认配置
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => JsonConfig::load(&path)?,
        None => {
            log::info!("未指定配置文件，使用默认配置");
            JsonConfig::default()
        }
    };

    let mut app = App::new(config)?;
    app.run()
}
