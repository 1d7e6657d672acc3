// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Saved prompt templates for AI renaming

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{FileRenamingError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub name: String,
    pub content: String,
}

/// Ordered template list, stored as `{"templates": [...]}`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PromptTemplates {
    #[serde(default)]
    pub templates: Vec<PromptTemplate>,
}

fn template(name: &str, content: &str) -> PromptTemplate {
    PromptTemplate {
        name: name.to_string(),
        content: content.to_string(),
    }
}

impl PromptTemplates {
    /// Built-in set used when nothing has been saved yet
    pub fn builtin() -> Self {
        Self {
            templates: vec![
                template("日期+文件名+序号", "按照今天日期+源文件名称+序号命名，格式：YYYYMMDD_原文件名_序号"),
                template("文件名+序号", "在文件名后添加序号，格式：原文件名_序号"),
                template("日期+序号", "使用今天日期和序号命名，格式：YYYYMMDD_序号"),
                template("序号+文件名", "在文件名前添加序号，格式：序号_原文件名"),
                template("清理文件名", "清理文件名中的特殊字符和多余空格，保留中文、英文、数字和基本标点"),
                template("统一小写", "将文件名转换为小写，并保持文件扩展名不变"),
                template("统一大写", "将文件名转换为大写，并保持文件扩展名不变"),
                template("首字母大写", "将文件名首字母大写，其余小写，并保持文件扩展名不变"),
            ],
        }
    }

    /// Load templates from a JSON file, falling back to [`Self::builtin`]
    /// when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No template file at {:?}, using built-in templates", path);
            return Ok(Self::builtin());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| FileRenamingError::Config(format!("Failed to parse templates: {}", e)))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&PromptTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Add a template, replacing one with the same name in place
    pub fn upsert(&mut self, name: &str, content: &str) -> Result<()> {
        if name.trim().is_empty() || content.trim().is_empty() {
            return Err(FileRenamingError::Validation(
                "Template name and content must not be empty".to_string(),
            ));
        }
        match self.templates.iter_mut().find(|t| t.name == name) {
            Some(existing) => existing.content = content.to_string(),
            None => self.templates.push(template(name, content)),
        }
        Ok(())
    }

    /// Returns whether a template was removed
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.templates.len();
        self.templates.retain(|t| t.name != name);
        self.templates.len() != before
    }
}
