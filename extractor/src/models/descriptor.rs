//! 匹配器描述

/*
 * Copyright (c) 2025 fltLi
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::traits::MatcherDescriptor;

/// 可靠性: 解析规则仍然有效的把握程度, 仅作维护提示
#[derive(
    Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum Reliability {
    High,
    #[default]
    Normal,
    Low,
}

impl fmt::Display for Reliability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Reliability::High => "high",
            Reliability::Normal => "normal",
            Reliability::Low => "low",
        })
    }
}

impl FromStr for Reliability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Reliability::High),
            "normal" => Ok(Reliability::Normal),
            "low" => Ok(Reliability::Low),
            other => Err(format!("unknown reliability: {other}")),
        }
    }
}

/// 匹配器元数据快照, 供界面列表使用
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatcherInfo {
    pub name: String,
    pub id: String,
    pub reliability: Reliability,
    pub domains: Vec<String>,
    #[serde(default)]
    pub replace: bool,
}

impl<T: MatcherDescriptor + ?Sized> From<&T> for MatcherInfo {
    fn from(m: &T) -> Self {
        MatcherInfo {
            name: m.name().to_string(),
            id: m.id().to_string(),
            reliability: m.reliability(),
            domains: m.domains().iter().map(|d| d.to_string()).collect(),
            replace: m.replace(),
        }
    }
}

/// 一次成功提取的结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Extraction {
    /// 产出结果的匹配器 id
    pub matcher: String,
    /// 直链, `replace` 为真时为待调用方代入模板的片段
    pub url: String,
    #[serde(default)]
    pub replace: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reliability_order() {
        assert!(Reliability::High < Reliability::Normal);
        assert!(Reliability::Normal < Reliability::Low);
        assert_eq!("HIGH".parse(), Ok(Reliability::High));
        assert_eq!(" low ".parse(), Ok(Reliability::Low));
        assert!("flaky".parse::<Reliability>().is_err());
    }

    #[test]
    fn test_reliability_serde() {
        assert_eq!(
            serde_json::to_string(&Reliability::Normal).unwrap(),
            "\"normal\""
        );
        assert_eq!(
            serde_json::from_str::<Reliability>("\"low\"").unwrap(),
            Reliability::Low
        );
    }
}
