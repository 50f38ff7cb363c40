//! 错误处理模块
//!
//! 定义了加载器中使用的统一错误类型。
//!
//! # 设计原则
//!
//! - 为每种错误类型提供清晰的上下文信息（文件路径、行号、记录内容）
//! - 支持错误链（error source）
//! - 易于模式匹配：调用方可以区分 I/O 失败和输入格式错误
//! - 加载器从不终止进程，是否退出由调用方决定

use std::fmt;
use std::path::PathBuf;

use crate::geometry::attributes::AttributeKind;

/// 统一的 Result 类型
///
/// 所有可能返回错误的函数都应该使用这个类型。
pub type Result<T> = std::result::Result<T, TriMeshError>;

/// TriMesh 的错误类型
#[derive(Debug)]
pub enum TriMeshError {
    /// 配置错误
    Config(ConfigError),

    /// 网格加载错误
    MeshLoading(MeshLoadError),

    /// IO 错误
    Io(std::io::Error),

    /// 贴图加载错误
    Texture(String),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 网格加载相关的错误
///
/// 行号从 1 开始，指向出错记录所在的文件行。
#[derive(Debug)]
pub enum MeshLoadError {
    /// 几何文件或材质文件无法打开/读取
    Io { path: PathBuf, source: std::io::Error },

    /// 不支持的文件格式
    UnsupportedFormat(String),

    /// `v`/`vt`/`vn`/`Ka`/`Kd`/`Ks`/`Ns` 等记录的操作数缺失或无法解析
    MalformedRecord { line: usize, reason: String },

    /// 面记录中的顶点不是 `p/t/n` 形式的三个正整数
    MalformedFaceToken { line: usize, token: String },

    /// 面记录少于 3 个顶点
    DegenerateFace { line: usize, count: usize },

    /// 面记录引用了不存在的属性
    IndexOutOfRange {
        line: usize,
        kind: AttributeKind,
        index: u32,
        len: usize,
    },

    /// `usemtl` 引用了未声明的材质
    UnknownMaterial { line: usize, name: String },

    /// 在第一个 `usemtl` 之前出现了面记录
    MissingActiveSubmesh { line: usize },

    /// 数据验证失败
    ValidationError(String),
}

impl fmt::Display for TriMeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriMeshError::Config(e) => write!(f, "Configuration error: {}", e),
            TriMeshError::MeshLoading(e) => write!(f, "Mesh loading error: {}", e),
            TriMeshError::Io(e) => write!(f, "IO error: {}", e),
            TriMeshError::Texture(msg) => write!(f, "Texture error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for MeshLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshLoadError::Io { path, source } => {
                write!(f, "Cannot read '{}': {}", path.display(), source)
            }
            MeshLoadError::UnsupportedFormat(msg) => write!(f, "Unsupported mesh format: {}", msg),
            MeshLoadError::MalformedRecord { line, reason } => {
                write!(f, "Line {}: malformed record: {}", line, reason)
            }
            MeshLoadError::MalformedFaceToken { line, token } => {
                write!(f, "Line {}: face token '{}' is not of the form p/t/n", line, token)
            }
            MeshLoadError::DegenerateFace { line, count } => {
                write!(f, "Line {}: face has {} vertices, at least 3 required", line, count)
            }
            MeshLoadError::IndexOutOfRange { line, kind, index, len } => write!(
                f,
                "Line {}: {} index {} out of range (1-{})",
                line, kind, index, len
            ),
            MeshLoadError::UnknownMaterial { line, name } => {
                write!(f, "Line {}: material '{}' was never declared", line, name)
            }
            MeshLoadError::MissingActiveSubmesh { line } => {
                write!(f, "Line {}: face record before any usemtl", line)
            }
            MeshLoadError::ValidationError(msg) => write!(f, "Mesh validation failed: {}", msg),
        }
    }
}

impl std::error::Error for TriMeshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TriMeshError::Io(e) => Some(e),
            TriMeshError::MeshLoading(e) => Some(e),
            TriMeshError::Config(e) => Some(e),
            TriMeshError::Texture(_) => None,
        }
    }
}

impl std::error::Error for ConfigError {}

impl std::error::Error for MeshLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MeshLoadError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for TriMeshError {
    fn from(err: std::io::Error) -> Self {
        TriMeshError::Io(err)
    }
}

impl From<ConfigError> for TriMeshError {
    fn from(err: ConfigError) -> Self {
        TriMeshError::Config(err)
    }
}

impl From<MeshLoadError> for TriMeshError {
    fn from(err: MeshLoadError) -> Self {
        TriMeshError::MeshLoading(err)
    }
}

impl TriMeshError {
    /// 如果是网格加载错误，返回内部的 `MeshLoadError`
    pub fn as_mesh_error(&self) -> Option<&MeshLoadError> {
        match self {
            TriMeshError::MeshLoading(e) => Some(e),
            _ => None,
        }
    }
}
