//! Streamtape 匹配器

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

// 同一行内直到最后一个单引号
static PATTERN: Lazy<Pattern> =
    Lazy::new(|| Pattern::new(Regex::new(r"(id=.*)'").unwrap(), Scan::All));

/// Streamtape: 最后一处 `id=...` 查询串即 get_video 参数
#[derive(Matchable)]
#[matcher(
    name = "Streamtape",
    id = "streamtape",
    reliability = "normal",
    domains = ["streamtape.com"]
)]
pub struct Streamtape;

#[async_trait(?Send)]
impl Matcher for Streamtape {
    fn pattern(&self) -> &Pattern {
        &PATTERN
    }

    async fn extract(
        &self,
        matches: &MatchArray,
        _ctx: &PageContext,
        _fetcher: &dyn Fetcher,
    ) -> Result<String> {
        Ok(format!("https://streamtape.com/get_video?{}", matches.last()?))
    }
}
