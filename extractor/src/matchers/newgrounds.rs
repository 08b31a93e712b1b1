//! Newgrounds 匹配器

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
use serde_json::Value;

use crate::error::*;
use crate::models::*;
use crate::net::{FetchRequest, Fetcher};
use crate::traits::Matcher;
use crate::utils::{decode_uri, is_canonical_int};

// 仅用于判断适用性, 提取时不读取匹配数组
static PATTERN: Lazy<Pattern> =
    Lazy::new(|| Pattern::new(Regex::new(r"(?m).*").unwrap(), Scan::All));

/// Newgrounds: 由页面路径取得作品 id, 直接请求视频接口
#[derive(Matchable)]
#[matcher(
    name = "Newgrounds",
    id = "newgrounds",
    reliability = "high",
    domains = ["newgrounds.com"]
)]
pub struct Newgrounds;

impl Newgrounds {
    /// `sources` 中第一项画质的第一个地址
    fn first_source(manifest: &Value) -> Result<String> {
        let sources = manifest
            .get("sources")
            .and_then(Value::as_object)
            .ok_or_else(|| ExtractError::format("manifest has no sources object"))?;

        // 与浏览器一致: 整数键按数值升序排在前面, 其余保持插入顺序
        let key = sources
            .keys()
            .filter(|k| is_canonical_int(k))
            .min_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
            .or_else(|| sources.keys().next())
            .ok_or_else(|| ExtractError::format("sources is empty"))?;

        let src = sources[key]
            .get(0)
            .and_then(|entry| entry.get("src"))
            .and_then(Value::as_str)
            .ok_or_else(|| ExtractError::format(format!("sources.{key}[0].src missing")))?;

        decode_uri(src).ok_or_else(|| ExtractError::format(format!("malformed uri: {src}")))
    }
}

#[async_trait(?Send)]
impl Matcher for Newgrounds {
    fn pattern(&self) -> &Pattern {
        &PATTERN
    }

    async fn extract(
        &self,
        _matches: &MatchArray,
        ctx: &PageContext,
        fetcher: &dyn Fetcher,
    ) -> Result<String> {
        let id = ctx.last_path_segment();
        if id.is_empty() {
            return Err(ExtractError::extraction(format!(
                "no video id in page path {}",
                ctx.url().path()
            )));
        }

        let request = FetchRequest::get(format!("https://www.newgrounds.com/portal/video/{id}"))
            .header("X-Requested-With", "XMLHttpRequest");
        let manifest: Value = fetcher.fetch(request).await?.error_for_status()?.json()?;

        Self::first_source(&manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::testing::StubFetcher;

    const MANIFEST: &str = r#"{
        "id": 859463,
        "title": "Clip",
        "sources": {
            "720p": [{"src": "https://uploads.ungrounded.net/alternate/1/859463_720p.mp4?f1=2%20x", "type": "video/mp4"}],
            "360p": [{"src": "https://uploads.ungrounded.net/alternate/1/859463_360p.mp4", "type": "video/mp4"}]
        }
    }"#;

    #[tokio::test]
    async fn test_extract_ignores_matches() -> Result<()> {
        let ctx = PageContext::new("https://www.newgrounds.com/portal/view/859463", "")?;
        let fetcher = StubFetcher::new().respond(200, MANIFEST);

        let url = Newgrounds
            .extract(&MatchArray::default(), &ctx, &fetcher)
            .await?;

        assert_eq!(
            url,
            "https://uploads.ungrounded.net/alternate/1/859463_720p.mp4?f1=2 x"
        );
        let requests = fetcher.requests.borrow();
        assert_eq!(requests[0].url, "https://www.newgrounds.com/portal/video/859463");
        assert_eq!(
            requests[0].headers,
            vec![("X-Requested-With".to_string(), "XMLHttpRequest".to_string())]
        );
        Ok(())
    }

    #[test]
    fn test_integer_keys_first() -> Result<()> {
        let manifest: Value = serde_json::from_str(
            r#"{"sources": {"hd": [{"src": "a"}], "480": [{"src": "b"}], "360": [{"src": "c"}]}}"#,
        )
        .unwrap();
        assert_eq!(Newgrounds::first_source(&manifest)?, "c");
        Ok(())
    }

    #[test]
    fn test_bad_manifest() {
        for body in [r#"{}"#, r#"{"sources": {}}"#, r#"{"sources": {"360p": []}}"#] {
            let manifest: Value = serde_json::from_str(body).unwrap();
            let err = Newgrounds::first_source(&manifest).unwrap_err();
            assert_eq!(err.kind_name(), "format");
        }
    }

    #[tokio::test]
    async fn test_not_json() -> Result<()> {
        let ctx = PageContext::new("https://www.newgrounds.com/portal/view/859463", "")?;
        let fetcher = StubFetcher::new().respond(200, "<html>login</html>");
        let err = Newgrounds
            .extract(&MatchArray::default(), &ctx, &fetcher)
            .await
            .unwrap_err();
        assert_eq!(err.kind_name(), "format");
        Ok(())
    }

    #[tokio::test]
    async fn test_no_id() -> Result<()> {
        let ctx = PageContext::new("https://www.newgrounds.com/portal/view/", "")?;
        let fetcher = StubFetcher::new();
        let err = Newgrounds
            .extract(&MatchArray::default(), &ctx, &fetcher)
            .await
            .unwrap_err();
        assert_eq!(err.kind_name(), "extraction");
        assert!(fetcher.requests.borrow().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_transport_failure() -> Result<()> {
        let ctx = PageContext::new("https://www.newgrounds.com/portal/view/1", "")?;
        let fetcher = StubFetcher::new().fail("connection reset");
        let err = Newgrounds
            .extract(&MatchArray::default(), &ctx, &fetcher)
            .await
            .unwrap_err();
        assert_eq!(err.kind_name(), "network");
        Ok(())
    }
}
