//! 配置管理模块
//!
//! 提供加载器配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (tri_mesh.toml)
//!
//! ```toml
//! [loader]
//! model = "assets/cube/cube.obj"
//! asset_root = "assets/cube"   # mtllib 的查找目录，缺省为模型所在目录
//! normalize = true
//! allow_undeclared_materials = false
//! load_textures = true
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::{ConfigError, Result};
use crate::geometry::loaders::LoadOptions;

/// 配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 加载器配置
    #[serde(default)]
    pub loader: LoaderConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 加载器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// 要加载的模型路径
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<PathBuf>,

    /// 材质文件的查找目录
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_root: Option<PathBuf>,

    /// 是否归一化到单位包围盒
    #[serde(default = "default_normalize")]
    pub normalize: bool,

    /// `usemtl` 引用未声明材质时是否以默认材质代替
    #[serde(default)]
    pub allow_undeclared_materials: bool,

    /// 是否解码 `map_Kd` 贴图
    #[serde(default = "default_load_textures")]
    pub load_textures: bool,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_normalize() -> bool { true }
fn default_load_textures() -> bool { true }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { super::log::DEFAULT_LOG_FILE.to_string() }

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            model: None,
            asset_root: None,
            normalize: default_normalize(),
            allow_undeclared_materials: false,
            load_textures: default_load_textures(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl LoaderConfig {
    /// 转换为加载器使用的选项
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            asset_root: self.asset_root.clone(),
            normalize: self.normalize,
            allow_undeclared_materials: self.allow_undeclared_materials,
        }
    }
}

impl Config {
    /// 从配置文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 文本解析
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                if path.exists() {
                    tracing::warn!("Failed to load config: {}, using defaults", e);
                }
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--no-normalize`: 保留文件中的原始坐标
    /// - `--asset-root <dir>`: 设置材质文件查找目录
    /// - `--lenient-materials`: 未声明的材质以默认值代替
    /// - `--no-textures`: 只记录贴图路径，不解码
    /// - 第一个不以 `--` 开头的独立参数视为模型路径
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--no-normalize" => self.loader.normalize = false,
                "--lenient-materials" => self.loader.allow_undeclared_materials = true,
                "--no-textures" => self.loader.load_textures = false,
                "--asset-root" => {
                    if let Some(dir) = args.get(i + 1) {
                        self.loader.asset_root = Some(PathBuf::from(dir));
                        i += 1;
                    }
                }
                arg if !arg.starts_with("--") && self.loader.model.is_none() => {
                    self.loader.model = Some(PathBuf::from(arg));
                }
                _ => {}
            }
            i += 1;
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if let Some(root) = &self.loader.asset_root {
            if !root.is_dir() {
                return Err(ConfigError::InvalidValue {
                    field: "loader.asset_root".to_string(),
                    reason: format!("'{}' is not a directory", root.display()),
                }.into());
            }
        }

        if self.logging.file_output && self.logging.log_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.log_file".to_string(),
                reason: "File output requires a log file path".to_string(),
            }.into());
        }

        Ok(())
    }
}
