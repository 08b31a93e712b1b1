//! Mixdrop 匹配器

/*
 * Copyright (c) 2025 fltLi
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use registry::Matchable;

use crate::error::*;
use crate::models::*;
use crate::net::Fetcher;
use crate::traits::Matcher;

static PATTERN: Lazy<Pattern> = Lazy::new(super::pipe_tokens);

// 页面中 CDN 链接的单字母前缀, 如 //s-delivery
static PREFIX_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"//([a|s])-").unwrap());

const TLDS: &[&str] = &["net", "io", "to", "sx", "com"];

/// Mixdrop: 词元顺序随加载变化, 按长度, 字符集和顶级域名集合定位
#[derive(Matchable)]
#[matcher(
    name = "Mixdrop",
    id = "mixdrop",
    reliability = "normal",
    domains = ["mixdrop.co"]
)]
pub struct Mixdrop;

impl Mixdrop {
    fn build(m: &MatchArray, body: &str) -> Result<String> {
        let prefix = PREFIX_REGEX
            .captures(body)
            .and_then(|c| c.get(1))
            .map(|p| p.as_str())
            .ok_or_else(|| ExtractError::extraction("cdn prefix not found in page body"))?;

        let (first, second) = (m.at(1)?, m.at(2)?);
        // 等长时两者都取第二个
        let subdomain = if first.len() < second.len() { first } else { second };
        let id = if first.len() > second.len() { first } else { second };

        let domain = m.longest_where("lowercase domain", |t| {
            !t.is_empty() && t.bytes().all(|b| b.is_ascii_lowercase())
        })?;
        let tld = m.find_in(TLDS)?;
        let signature = m.second_longest()?;
        let expires = m.find_epoch()?;

        Ok(format!(
            "https://{prefix}-{subdomain}.{domain}.{tld}/v/{id}.mp4?s={signature}&e={expires}&_t={expires}"
        ))
    }
}

#[async_trait(?Send)]
impl Matcher for Mixdrop {
    fn pattern(&self) -> &Pattern {
        &PATTERN
    }

    async fn extract(
        &self,
        matches: &MatchArray,
        ctx: &PageContext,
        _fetcher: &dyn Fetcher,
    ) -> Result<String> {
        Self::build(matches, &ctx.body_html())
    }
}
