/// MTL 材质文件加载器
///
/// 解析 `newmtl`/`Ka`/`Kd`/`Ks`/`Ns`/`map_Kd`，把材质登记到材质表。
/// `map_Kd` 的路径相对材质文件所在目录解析，并同步交给贴图加载器。
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::record::{for_each_line, parse_floats, required_operand};
use crate::core::error::{MeshLoadError, Result};
use crate::core::math::Vector3;
use crate::geometry::material::{DiffuseMap, Material, MaterialTable};
use crate::geometry::texture::TextureLoader;

/// 打开并解析材质文件，返回登记的材质数量
pub fn load_mtl_file(
    path: &Path,
    materials: &mut MaterialTable,
    textures: &mut dyn TextureLoader,
) -> Result<usize> {
    let file = File::open(path).map_err(|e| MeshLoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let base_dir = path.parent().unwrap_or(Path::new("."));
    let count = parse_mtl(BufReader::new(file), path, base_dir, materials, textures)?;

    tracing::info!(path = %path.display(), materials = count, "Material library loaded");
    Ok(count)
}

/// 从任意 `BufRead` 解析材质
///
/// `source` 只用于错误信息，`base_dir` 用于解析贴图路径。
pub fn parse_mtl<R: BufRead>(
    reader: R,
    source: &Path,
    base_dir: &Path,
    materials: &mut MaterialTable,
    textures: &mut dyn TextureLoader,
) -> Result<usize> {
    let mut current: Option<Material> = None;
    let mut count = 0;

    for_each_line(reader, source, |line_no, line| {
        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else {
            return Ok(());
        };

        if keyword == "newmtl" {
            let name = required_operand(&mut tokens, line_no, keyword)?;
            if let Some(done) = current.replace(Material::new(name)) {
                materials.insert(done);
                count += 1;
            }
            return Ok(());
        }

        let Some(material) = current.as_mut() else {
            if matches!(keyword, "Ka" | "Kd" | "Ks" | "Ns" | "map_Kd") {
                tracing::warn!(line = line_no, keyword, "Material property before any newmtl, ignored");
            }
            return Ok(());
        };

        match keyword {
            "Ka" => material.ambient = Vector3::from(parse_floats::<3>(&mut tokens, line_no, keyword)?),
            "Kd" => material.diffuse = Vector3::from(parse_floats::<3>(&mut tokens, line_no, keyword)?),
            "Ks" => material.specular = Vector3::from(parse_floats::<3>(&mut tokens, line_no, keyword)?),
            "Ns" => material.shininess = parse_floats::<1>(&mut tokens, line_no, keyword)?[0],
            "map_Kd" => {
                let relative = required_operand(&mut tokens, line_no, keyword)?;
                let path = base_dir.join(relative);
                let handle = match textures.load_texture(&path) {
                    Ok(handle) => handle,
                    Err(e) => {
                        tracing::warn!(material = %material.name, "Diffuse texture not loaded: {}", e);
                        None
                    }
                };
                material.diffuse_map = Some(DiffuseMap { path, handle });
            }
            _ => {}
        }
        Ok(())
    })?;

    if let Some(done) = current {
        materials.insert(done);
        count += 1;
    }

    Ok(count)
}
