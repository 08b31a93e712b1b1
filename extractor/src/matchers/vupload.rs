//! Vupload 匹配器

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

static PATTERN: Lazy<Pattern> = Lazy::new(super::player_source);

/// Vupload
#[derive(Matchable)]
#[matcher(
    name = "Vupload",
    id = "vupload",
    reliability = "high",
    domains = ["vupload.com"]
)]
pub struct Vupload;

#[async_trait(?Send)]
impl Matcher for Vupload {
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
    async fn test_extract_first_source() -> Result<()> {
        let page = r#"sources: [{src:"https://s1.vupload.com/hls/abc/index-v1-a1.m3u8", type: "application/x-mpegURL"},
                       {src: "https://s1.vupload.com/abc/v.mp4", type: "video/mp4"}]"#;
        let ctx = PageContext::new("https://vupload.com/e/abc", page)?;
        let matches = Vupload.pattern().apply(page);
        assert_eq!(matches.len(), 2);

        let url = Vupload.extract(&matches, &ctx, &StubFetcher::new()).await?;
        assert_eq!(url, "https://s1.vupload.com/hls/abc/index-v1-a1.m3u8");
        Ok(())
    }
}
