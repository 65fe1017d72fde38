//! Paper styles offered to callers.
//!
//! The catalog is built once at startup and shared read-only between
//! request handlers.

use crate::{Error, Result};
use std::collections::HashMap;

pub const DEFAULT_MODEL: &str = "qwen-image-edit-max";

/// Style used by the debug endpoint when the caller names none.
pub const DEFAULT_STYLE: &str = "徽州生宣";

const COMMON_NEGATIVE: &str =
    "低质量，模糊，变形，不自然，现代风格，西方绘画，油画，水彩画，彩色照片，3D渲染";

const KEEP_CONTENT: &str = "保持原图的主体、构图和内容完全不变，只改变绘画风格和纸张纹理。";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEntry {
    pub name: String,
    pub model: String,
    pub positive_prompt: String,
    pub negative_prompt: String,
}

#[derive(Debug, Clone)]
pub struct StyleCatalog {
    entries: Vec<StyleEntry>,
    index: HashMap<String, usize>,
}

impl StyleCatalog {
    pub fn new(entries: Vec<StyleEntry>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.name.clone(), i))
            .collect();
        Self { entries, index }
    }

    /// The four rice-paper styles served by default.
    pub fn builtin() -> Self {
        let paper = |name: &str, material: &str, texture: &str, extra_negative: &str| {
            let negative_prompt = if extra_negative.is_empty() {
                COMMON_NEGATIVE.to_string()
            } else {
                format!("{}，{}", COMMON_NEGATIVE, extra_negative)
            };
            StyleEntry {
                name: name.to_string(),
                model: DEFAULT_MODEL.to_string(),
                positive_prompt: format!(
                    "将图片转换为中国传统水墨画风格，使用{}质感。{}{}",
                    material, texture, KEEP_CONTENT
                ),
                negative_prompt,
            }
        };

        Self::new(vec![
            paper("徽州生宣", "徽州生宣纸", "墨色自然晕染，宣纸纹理清晰可见。", ""),
            paper("贵州皮纸", "贵州皮纸", "体现粗犷纤维纹理和枯笔飞白效果。", "光滑表面"),
            paper("棠岙竹纸", "棠岙竹纸", "体现细腻竹纤维和温润米黄色纸面。", "粗糙纹理"),
            paper("西北毛边", "西北毛边纸", "体现纸质松软和边缘自然毛糙感。", "整齐边缘"),
        ])
    }

    pub fn lookup(&self, name: &str) -> Result<&StyleEntry> {
        self.get(name).ok_or_else(|| Error::UnknownStyle {
            style: name.to_string(),
            available: self.names(),
        })
    }

    pub fn get(&self, name: &str) -> Option<&StyleEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Style names in declaration order.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for StyleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
