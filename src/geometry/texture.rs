/// 贴图加载接口
///
/// 贴图解码属于渲染层的协作者：加载器只负责把 `map_Kd` 解析成完整路径，
/// 然后交给 `TextureLoader`，拿回一个不透明的句柄。

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::error::{Result, TriMeshError};

/// 不透明的贴图句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(u32);

impl TextureHandle {
    #[inline]
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

/// 贴图加载器 trait
///
/// 返回 `Ok(None)` 表示只记录路径，稍后再由调用方加载。
pub trait TextureLoader {
    fn load_texture(&mut self, path: &Path) -> Result<Option<TextureHandle>>;
}

/// 不解码贴图，只保留路径
#[derive(Debug, Default, Clone, Copy)]
pub struct DeferredTextures;

impl TextureLoader for DeferredTextures {
    fn load_texture(&mut self, _path: &Path) -> Result<Option<TextureHandle>> {
        Ok(None)
    }
}

/// 解码后的 RGBA8 图像
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// 使用 `image` crate 解码贴图并保存像素
///
/// 同一路径只解码一次，重复引用返回同一个句柄。
#[derive(Debug, Default)]
pub struct ImageTextureLoader {
    images: Vec<LoadedImage>,
    by_path: HashMap<PathBuf, TextureHandle>,
}

impl ImageTextureLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: TextureHandle) -> Option<&LoadedImage> {
        self.images.get(handle.index() as usize)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl TextureLoader for ImageTextureLoader {
    fn load_texture(&mut self, path: &Path) -> Result<Option<TextureHandle>> {
        if let Some(&handle) = self.by_path.get(path) {
            return Ok(Some(handle));
        }

        let image = image::open(path)
            .map_err(|e| TriMeshError::Texture(format!("{}: {}", path.display(), e)))?
            .to_rgba8();

        let handle = TextureHandle::new(self.images.len() as u32);
        self.images.push(LoadedImage {
            path: path.to_path_buf(),
            width: image.width(),
            height: image.height(),
            pixels: image.into_raw(),
        });
        self.by_path.insert(path.to_path_buf(), handle);

        tracing::debug!(path = %path.display(), handle = handle.index(), "Texture decoded");
        Ok(Some(handle))
    }
}
