//! OBJ/MTL 共用的行记录解析工具

use std::io::BufRead;
use std::path::Path;
use std::str::SplitWhitespace;

use crate::core::error::{MeshLoadError, Result};

/// 去掉注释
///
/// 只有出现在行首或空白之后的 `#` 才开始注释，`Mat#1` 这样的名字保持完整。
pub(crate) fn strip_comment(line: &str) -> &str {
    let mut previous_is_space = true;
    for (pos, c) in line.char_indices() {
        if c == '#' && previous_is_space {
            return &line[..pos];
        }
        previous_is_space = c.is_whitespace();
    }
    line
}

/// 关键字之后的整行内容，用于可能含空格的文件名
pub(crate) fn rest_of_line<'a>(line: &'a str, keyword: &str) -> &'a str {
    line.trim_start()
        .strip_prefix(keyword)
        .unwrap_or_default()
        .trim()
}

/// 读取 `N` 个浮点操作数，多余的操作数忽略
pub(crate) fn parse_floats<const N: usize>(
    tokens: &mut SplitWhitespace<'_>,
    line: usize,
    keyword: &str,
) -> std::result::Result<[f32; N], MeshLoadError> {
    let mut values = [0.0f32; N];
    for (i, value) in values.iter_mut().enumerate() {
        let token = tokens.next().ok_or_else(|| MeshLoadError::MalformedRecord {
            line,
            reason: format!("'{}' expects {} numbers, found {}", keyword, N, i),
        })?;
        *value = token.parse().map_err(|_| MeshLoadError::MalformedRecord {
            line,
            reason: format!("'{}' operand '{}' is not a number", keyword, token),
        })?;
    }
    Ok(values)
}

/// 读取一个可省略的浮点操作数
pub(crate) fn optional_float(
    tokens: &mut SplitWhitespace<'_>,
    line: usize,
    keyword: &str,
    default: f32,
) -> std::result::Result<f32, MeshLoadError> {
    match tokens.next() {
        Some(token) => token.parse().map_err(|_| MeshLoadError::MalformedRecord {
            line,
            reason: format!("'{}' operand '{}' is not a number", keyword, token),
        }),
        None => Ok(default),
    }
}

/// 读取一个必需的名字/路径操作数
pub(crate) fn required_operand<'a>(
    tokens: &mut SplitWhitespace<'a>,
    line: usize,
    keyword: &str,
) -> std::result::Result<&'a str, MeshLoadError> {
    tokens.next().ok_or_else(|| MeshLoadError::MalformedRecord {
        line,
        reason: format!("'{}' requires an operand", keyword),
    })
}

/// 逐行读取，把 I/O 错误映射为带路径的加载错误
///
/// 回调收到的行号从 1 开始，行内容已去掉注释。
/// 非 UTF-8 字节按替换字符解码，不会中断加载。
pub(crate) fn for_each_line<R, F>(mut reader: R, source: &Path, mut f: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(usize, &str) -> Result<()>,
{
    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf).map_err(|e| MeshLoadError::Io {
            path: source.to_path_buf(),
            source: e,
        })?;
        if read == 0 {
            return Ok(());
        }
        line_no += 1;

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        f(line_no, strip_comment(line))?;
    }
}
