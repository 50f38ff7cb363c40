/// 模型加载器模块
///
/// 提供统一的模型加载接口和具体格式的实现。
///
/// # 支持的格式
///
/// - **OBJ**: Wavefront OBJ 格式（附带 MTL 材质文件）
///
/// # 使用示例
///
/// ```rust,no_run
/// use tri_mesh::geometry::loaders::{load_mesh, LoadOptions};
/// use tri_mesh::geometry::texture::DeferredTextures;
/// use std::path::Path;
///
/// let mesh = load_mesh(Path::new("model.obj"), &LoadOptions::default(), &mut DeferredTextures)?;
/// println!("{}", mesh.summary());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
use crate::core::error::{MeshLoadError, Result};
use crate::geometry::mesh::MeshData;
use crate::geometry::texture::TextureLoader;
use std::path::{Path, PathBuf};

mod record;
pub mod mtl_loader;
pub mod obj_loader;

// 重新导出加载器
pub use obj_loader::ObjLoader;

/// 加载选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// `mtllib` 的查找目录；`None` 时使用几何文件所在目录
    pub asset_root: Option<PathBuf>,

    /// 加载完成后归一化到单位包围盒
    pub normalize: bool,

    /// `usemtl` 引用未声明的材质时登记一个全零材质并继续，而不是报错
    pub allow_undeclared_materials: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            asset_root: None,
            normalize: true,
            allow_undeclared_materials: false,
        }
    }
}

impl LoadOptions {
    /// 材质文件的查找目录
    ///
    /// 优先使用配置的 `asset_root`，否则使用几何文件所在目录。
    pub fn material_root(&self, geometry_path: Option<&Path>) -> PathBuf {
        if let Some(root) = &self.asset_root {
            return root.clone();
        }
        geometry_path
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// 网格加载器 trait
///
/// 所有格式的加载器都实现此 trait。
///
/// # 实现要求
///
/// - 加载器是无状态的（使用静态方法）
/// - 返回 CPU 侧的 `MeshData`，不涉及 GPU 资源
/// - 任何失败都以错误返回，不产生部分结果
pub trait MeshLoader {
    /// 从文件路径加载网格
    fn load_from_file(
        path: &Path,
        options: &LoadOptions,
        textures: &mut dyn TextureLoader,
    ) -> Result<MeshData>;

    /// 从内存数据加载网格
    fn load_from_memory(
        data: &[u8],
        options: &LoadOptions,
        textures: &mut dyn TextureLoader,
    ) -> Result<MeshData>;

    /// 获取支持的文件扩展名列表（小写，不含点号）
    fn supported_extensions() -> &'static [&'static str];
}

/// 根据文件扩展名选择合适的加载器
pub fn load_mesh(
    path: &Path,
    options: &LoadOptions,
    textures: &mut dyn TextureLoader,
) -> Result<MeshData> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| {
            MeshLoadError::UnsupportedFormat(format!(
                "cannot determine file extension of '{}'",
                path.display()
            ))
        })?;

    if ObjLoader::supported_extensions().contains(&extension.as_str()) {
        ObjLoader::load_from_file(path, options, textures)
    } else {
        Err(MeshLoadError::UnsupportedFormat(format!("unsupported extension: .{}", extension)).into())
    }
}
