//! 匹配数组与扫描模式

/*
 * Copyright (c) 2025 fltLi
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use regex::Regex;

use crate::error::*;
use crate::utils::parse_int_prefix;

/// 扫描方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    /// 收集每一处不重叠匹配的第 1 组 (无分组时取整个匹配)
    All,
    /// 只取第一处匹配: 整个匹配, 随后依次为各分组
    Captures,
}

/// 扫描模式: 把页面文本转换为匹配数组
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    scan: Scan,
}

impl Pattern {
    pub fn new(regex: Regex, scan: Scan) -> Self {
        Self { regex, scan }
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn scan(&self) -> Scan {
        self.scan
    }

    /// 扫描文本; 无匹配时返回空数组
    pub fn apply(&self, content: &str) -> MatchArray {
        let tokens: Vec<String> = match self.scan {
            Scan::All => {
                let grouped = self.regex.captures_len() > 1;
                self.regex
                    .captures_iter(content)
                    .filter_map(|caps| if grouped { caps.get(1) } else { caps.get(0) })
                    .map(|m| m.as_str().to_string())
                    .collect()
            }
            // 未参与匹配的分组记为空串
            Scan::Captures => self
                .regex
                .captures(content)
                .map(|caps| {
                    caps.iter()
                        .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                        .collect()
                })
                .unwrap_or_default(),
        };
        MatchArray::new(tokens)
    }
}

/// 匹配数组: 扫描得到的有序子串.
///
/// 所有访问都做边界检查, 越界或找不到目标时返回 `ExtractionError`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchArray {
    tokens: Vec<String>,
}

impl MatchArray {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn at(&self, index: usize) -> Result<&str> {
        self.tokens.get(index).map(String::as_str).ok_or_else(|| {
            ExtractError::extraction(format!(
                "index {index} out of range for {} tokens",
                self.tokens.len()
            ))
        })
    }

    /// 以 `base` 为基准的相对位置
    pub fn at_offset(&self, base: usize, delta: isize) -> Result<&str> {
        let index = base.checked_add_signed(delta).ok_or_else(|| {
            ExtractError::extraction(format!("offset {delta} from {base} is before the start"))
        })?;
        self.at(index)
    }

    pub fn last(&self) -> Result<&str> {
        self.tokens
            .last()
            .map(String::as_str)
            .ok_or_else(|| ExtractError::extraction("empty match array"))
    }

    /// 关键字首次出现的位置
    pub fn position(&self, keyword: &str) -> Result<usize> {
        self.tokens
            .iter()
            .position(|t| t == keyword)
            .ok_or_else(|| ExtractError::extraction(format!("keyword '{keyword}' not found")))
    }

    /// 最长的串, 等长时取最先出现者
    pub fn longest(&self) -> Result<&str> {
        self.sorted_by_len_desc()
            .first()
            .copied()
            .ok_or_else(|| ExtractError::extraction("empty match array"))
    }

    /// 按长度降序排列后的第二个
    pub fn second_longest(&self) -> Result<&str> {
        self.sorted_by_len_desc().get(1).copied().ok_or_else(|| {
            ExtractError::extraction(format!("need 2 tokens, got {}", self.tokens.len()))
        })
    }

    /// 按长度降序稳定排序
    pub fn sorted_by_len_desc(&self) -> Vec<&str> {
        let mut sorted: Vec<&str> = self.iter().collect();
        sorted.sort_by(|a, b| b.len().cmp(&a.len()));
        sorted
    }

    /// 满足条件的最长串
    pub fn longest_where(&self, what: &str, pred: impl Fn(&str) -> bool) -> Result<&str> {
        self.sorted_by_len_desc()
            .into_iter()
            .find(|&t| pred(t))
            .ok_or_else(|| ExtractError::extraction(format!("no {what} token")))
    }

    /// 第一个以数字开头的 10 位串 (Unix 秒级时间戳)
    pub fn find_epoch(&self) -> Result<&str> {
        self.iter()
            .find(|t| t.len() == 10 && parse_int_prefix(t).is_some())
            .ok_or_else(|| ExtractError::extraction("no 10-digit timestamp token"))
    }

    /// 第一个属于集合的串
    pub fn find_in(&self, set: &[&str]) -> Result<&str> {
        self.iter()
            .find(|t| set.contains(t))
            .ok_or_else(|| ExtractError::extraction(format!("no token among {set:?}")))
    }
}

impl From<Vec<String>> for MatchArray {
    fn from(tokens: Vec<String>) -> Self {
        Self::new(tokens)
    }
}

impl From<Vec<&str>> for MatchArray {
    fn from(tokens: Vec<&str>) -> Self {
        Self::new(tokens.into_iter().map(str::to_string).collect())
    }
}
