//! Voe 匹配器

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

// HLS 地址, 同一行内直到最后一个单引号
static PATTERN: Lazy<Pattern> = Lazy::new(|| {
    Pattern::new(
        Regex::new(r"(https?://\S*m3u8.+)'").unwrap(),
        Scan::All,
    )
});

/// Voe: 第一处 m3u8 地址即直链
#[derive(Matchable)]
#[matcher(
    name = "Voe",
    id = "voe",
    reliability = "high",
    domains = ["voe.sx"]
)]
pub struct Voe;

#[async_trait(?Send)]
impl Matcher for Voe {
    fn pattern(&self) -> &Pattern {
        &PATTERN
    }

    async fn extract(
        &self,
        matches: &MatchArray,
        _ctx: &PageContext,
        _fetcher: &dyn Fetcher,
    ) -> Result<String> {
        Ok(matches.at(0)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::testing::StubFetcher;

    #[tokio::test]
    async fn test_extract() -> Result<()> {
        let page = "var sources = {\n 'hls': 'https://delivery-node-3.voe-network.net/engine/hls2/01/0123/abc_,n,.urlset/master.m3u8?t=Xy1&s=1700000000&e=14400',\n 'video_height': 1080,\n};";
        let ctx = PageContext::new("https://voe.sx/e/abc", page)?;
        let matches = Voe.pattern().apply(page);

        let url = Voe.extract(&matches, &ctx, &StubFetcher::new()).await?;
        assert_eq!(
            url,
            "https://delivery-node-3.voe-network.net/engine/hls2/01/0123/abc_,n,.urlset/master.m3u8?t=Xy1&s=1700000000&e=14400"
        );
        Ok(())
    }
}
