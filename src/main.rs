//! tri_mesh - 加载 OBJ 模型并输出模型信息
//!
//! # 使用方法
//!
//! ```bash
//! # 使用配置文件 (tri_mesh.toml) 中的模型
//! cargo run
//!
//! # 命令行指定模型，保留原始坐标
//! cargo run -- assets/cube/cube.obj --no-normalize
//! ```
//!
//! # 命令行参数
//!
//! - `<model.obj>`: 模型路径
//! - `--asset-root <dir>`: 材质文件查找目录
//! - `--no-normalize`: 不做归一化
//! - `--lenient-materials`: 未声明的材质使用默认值
//! - `--no-textures`: 不解码贴图

use anyhow::{Context, Result};
use tracing::{debug, info};

use tri_mesh::core::{log, Config};
use tri_mesh::geometry::loaders::load_mesh;
use tri_mesh::geometry::texture::{DeferredTextures, ImageTextureLoader, TextureLoader};

fn main() -> Result<()> {
    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default("tri_mesh.toml");

    // 2. 应用命令行参数（跳过程序名）
    config.apply_args(std::env::args().skip(1));

    // 3. 验证配置
    config.validate().context("invalid configuration")?;

    // 4. 初始化日志系统
    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.as_str())
    } else {
        None
    };
    log::init_logger(config.logging.level, config.logging.file_output, log_file);
    info!(version = env!("CARGO_PKG_VERSION"), "tri_mesh starting");

    let model = config
        .loader
        .model
        .clone()
        .context("no model given: pass a path or set loader.model in tri_mesh.toml")?;

    info!(
        model = %model.display(),
        normalize = config.loader.normalize,
        load_textures = config.loader.load_textures,
        "Loader configuration"
    );

    // 5. 加载模型
    let mut decoded = ImageTextureLoader::new();
    let mut deferred = DeferredTextures;
    let textures: &mut dyn TextureLoader = if config.loader.load_textures {
        &mut decoded
    } else {
        &mut deferred
    };

    let options = config.loader.load_options();
    let mesh = load_mesh(&model, &options, textures)
        .with_context(|| format!("failed to load '{}'", model.display()))?;

    // 6. 输出模型信息
    for line in mesh.summary().to_string().lines() {
        info!("{}", line);
    }
    for material in mesh.materials.iter() {
        debug!(
            name = %material.name,
            diffuse_map = material.diffuse_map.is_some(),
            textured = material.diffuse_texture().is_some(),
            "Material"
        );
    }
    if !decoded.is_empty() {
        info!(textures = decoded.len(), "Diffuse textures decoded");
    }

    Ok(())
}
