//! Upstream 匹配器

/*
 * Copyright (c) 2025 fltLi
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use async_trait::async_trait;
use once_cell::sync::Lazy;
use registry::Matchable;

use crate::error::*;
use crate::models::*;
use crate::net::Fetcher;
use crate::traits::Matcher;

static PATTERN: Lazy<Pattern> = Lazy::new(super::pipe_tokens);

// revalidate: 打包词元表中的固定下标
const CDN_LABEL: usize = 49;
const STREAM_ID: usize = 148;

/// Upstream: 按固定下标取 CDN 节点和流 id
#[derive(Matchable)]
#[matcher(
    name = "Upstream",
    id = "upstream",
    reliability = "normal",
    domains = ["upstream.to"]
)]
pub struct Upstream;

#[async_trait(?Send)]
impl Matcher for Upstream {
    fn pattern(&self) -> &Pattern {
        &PATTERN
    }

    async fn extract(
        &self,
        matches: &MatchArray,
        _ctx: &PageContext,
        _fetcher: &dyn Fetcher,
    ) -> Result<String> {
        Ok(format!(
            "https://{}.upstreamcdn.co/hls/{}/master.m3u8",
            matches.at(CDN_LABEL)?,
            matches.at(STREAM_ID)?
        ))
    }
}
