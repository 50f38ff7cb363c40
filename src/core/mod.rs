//! 核心功能模块
//!
//! 本模块提供了加载器的基础功能，包括数学类型、日志系统、配置管理和错误处理。
//! 这些模块独立于具体的文件格式，可以被任何加载器使用。
//!
//! # 模块组织
//!
//! - `math`：数学类型别名（基于 nalgebra）
//! - `log`：日志系统，提供结构化的日志记录功能
//! - `config`：配置管理，支持从 TOML 文件加载加载器设置
//! - `error`：错误处理，定义统一的错误类型

pub mod math;
pub mod log;
pub mod config;
pub mod error;

// 重新导出常用类型，方便使用
pub use math::{Vector2, Vector3};
pub use error::{Result, TriMeshError};
pub use config::Config;
