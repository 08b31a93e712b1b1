//! Streamzz 匹配器

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

/// Streamzz: 最长词元为链接 id, 跳转域名取自当前主机的首个标签
#[derive(Matchable)]
#[matcher(
    name = "Streamzz",
    id = "streamzz",
    reliability = "low",
    domains = ["streamzz.to", "streamz.ws"]
)]
pub struct Streamzz;

#[async_trait(?Send)]
impl Matcher for Streamzz {
    fn pattern(&self) -> &Pattern {
        &PATTERN
    }

    async fn extract(
        &self,
        matches: &MatchArray,
        ctx: &PageContext,
        _fetcher: &dyn Fetcher,
    ) -> Result<String> {
        let label = ctx.host().split('.').next().unwrap_or_default();
        let id = matches.longest()?;
        Ok(format!("https://get.{label}.tw/getlink-{id}.dll"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::testing::StubFetcher;

    #[tokio::test]
    async fn test_extract() -> Result<()> {
        let matches = MatchArray::from(vec!["video", "a6f3c9e1b2d4f7a8c0e5", "getlink", "dll"]);
        let fetcher = StubFetcher::new();

        let ctx = PageContext::new("https://streamz.ws/x", "")?;
        assert_eq!(
            Streamzz.extract(&matches, &ctx, &fetcher).await?,
            "https://get.streamz.tw/getlink-a6f3c9e1b2d4f7a8c0e5.dll"
        );

        let ctx = PageContext::new("https://streamzz.to/x", "")?;
        assert_eq!(
            Streamzz.extract(&matches, &ctx, &fetcher).await?,
            "https://get.streamzz.tw/getlink-a6f3c9e1b2d4f7a8c0e5.dll"
        );
        Ok(())
    }
}
