/// 材质与材质表
///
/// 材质按名字唯一，存放在一个只增不减的数组里；
/// 子网格通过 `MaterialId`（数组下标）引用材质，而不是持有引用。

use std::collections::HashMap;
use std::path::PathBuf;

use crate::core::math::Vector3;
use super::texture::TextureHandle;

/// 材质在材质表中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(u32);

impl MaterialId {
    #[inline]
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// 漫反射贴图引用
#[derive(Debug, Clone, PartialEq)]
pub struct DiffuseMap {
    /// 相对材质文件目录解析后的路径
    pub path: PathBuf,

    /// 贴图加载器返回的句柄，延迟加载时为 `None`
    pub handle: Option<TextureHandle>,
}

/// Phong 材质
///
/// 所有颜色和指数默认为 0，`usemtl` 宽松模式下未声明的材质就是这个默认值。
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,

    /// 环境光颜色 (Ka)
    pub ambient: Vector3,

    /// 漫反射颜色 (Kd)
    pub diffuse: Vector3,

    /// 高光颜色 (Ks)
    pub specular: Vector3,

    /// 高光指数 (Ns)
    pub shininess: f32,

    /// 漫反射贴图 (map_Kd)
    pub diffuse_map: Option<DiffuseMap>,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ambient: Vector3::zeros(),
            diffuse: Vector3::zeros(),
            specular: Vector3::zeros(),
            shininess: 0.0,
            diffuse_map: None,
        }
    }

    /// 贴图句柄（如果已加载）
    pub fn diffuse_texture(&self) -> Option<TextureHandle> {
        self.diffuse_map.as_ref().and_then(|map| map.handle)
    }
}

/// 材质表
#[derive(Debug, Clone, Default)]
pub struct MaterialTable {
    materials: Vec<Material>,
    by_name: HashMap<String, MaterialId>,
}

impl MaterialTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按名字登记材质
    ///
    /// 同名材质再次登记时覆盖原有属性，但保留原来的 `MaterialId`。
    pub fn insert(&mut self, material: Material) -> MaterialId {
        if let Some(&id) = self.by_name.get(&material.name) {
            tracing::warn!(name = %material.name, "Material redefined, replacing previous definition");
            self.materials[id.index()] = material;
            return id;
        }

        let id = MaterialId::new(self.materials.len() as u32);
        self.by_name.insert(material.name.clone(), id);
        self.materials.push(material);
        id
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.index())
    }

    pub fn id_of(&self, name: &str) -> Option<MaterialId> {
        self.by_name.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&Material> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// 按 `MaterialId` 顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }
}
