//! 匹配器注册表

/*
 * Copyright (c) 2025 fltLi
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use once_cell::sync::Lazy;
use std::collections::HashMap;
use url::Url;

use crate::error::*;
use crate::models::*;
use crate::net::Fetcher;
use crate::traits::{Matcher, MatcherDescriptor};
use crate::utils::{domain_matches, normalize_host};

/// 匹配器注册表, 构建后只读
pub(crate) struct MatcherFactory {
    matchers: Vec<Box<dyn Matcher>>,
}

impl MatcherFactory {
    /// 创建新的注册表实例
    pub fn new() -> Self {
        Self {
            matchers: crate::matchers::registry_items(),
        }
    }

    pub fn matchers(&self) -> &[Box<dyn Matcher>] {
        &self.matchers
    }

    /// 第一个声明了该主机的匹配器
    pub fn find(&self, hostname: &str) -> Option<&dyn Matcher> {
        let host = normalize_host(hostname);
        if host.is_empty() {
            return None;
        }
        self.matchers
            .iter()
            .find(|m| m.claims(&host))
            .map(AsRef::as_ref)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&dyn Matcher> {
        self.matchers
            .iter()
            .find(|m| m.id() == id)
            .map(AsRef::as_ref)
    }
}

static FACTORY: Lazy<MatcherFactory> = Lazy::new(MatcherFactory::new);

/// 全部匹配器, 保持注册顺序
pub fn list_matchers() -> &'static [Box<dyn Matcher>] {
    FACTORY.matchers()
}

/// 按主机名 (可带端口) 查找匹配器, 支持子域
pub fn find_matcher(hostname: &str) -> Option<&'static dyn Matcher> {
    FACTORY.find(hostname)
}

/// 按 id 查找匹配器
pub fn find_matcher_by_id(id: &str) -> Option<&'static dyn Matcher> {
    FACTORY.find_by_id(id)
}

/// 按页面地址查找匹配器
pub fn find_matcher_for_url(url: &str) -> Option<&'static dyn Matcher> {
    let url = Url::parse(url).ok()?;
    FACTORY.find(url.host_str()?)
}

/// 检查注册表: id 唯一, 域名非空且互不重叠
pub fn validate_registry(matchers: &[Box<dyn Matcher>]) -> Result<()> {
    let mut ids = HashMap::new();
    let mut domains: HashMap<String, &str> = HashMap::new();

    for m in matchers {
        if let Some(prev) = ids.insert(m.id(), m.name()) {
            return Err(ExtractError::extraction(format!(
                "duplicate id '{}' ({prev} and {})",
                m.id(),
                m.name()
            )));
        }
        if m.domains().is_empty() {
            return Err(ExtractError::extraction(format!("{} has no domains", m.id())));
        }
        for d in m.domains() {
            let d = normalize_host(d);
            if d.is_empty() {
                return Err(ExtractError::extraction(format!("{} has an empty domain", m.id())));
            }
            // 同名或互为子域都算重叠
            if let Some((other, owner)) = domains
                .iter()
                .find(|(other, _)| domain_matches(&d, other) || domain_matches(other, &d))
            {
                return Err(ExtractError::extraction(format!(
                    "domain '{d}' of {} overlaps '{other}' of {owner}",
                    m.id()
                )));
            }
            domains.insert(d, m.id());
        }
    }

    Ok(())
}

/// 直接提取: 选择匹配器, 扫描页面, 还原直链
pub async fn extract(
    ctx: &PageContext,
    content: &str,
    fetcher: &dyn Fetcher,
) -> Result<Extraction> {
    let matcher =
        find_matcher(ctx.host()).ok_or_else(|| Error::NoMatcher(ctx.host().to_string()))?;
    tracing::debug!("matched {} for {}", matcher.id(), ctx.host());

    let matches = matcher.pattern().apply(content);
    tracing::trace!("{} scanned {} tokens", matcher.id(), matches.len());
    if matches.is_empty() {
        return Err(
            ExtractError::extraction("pattern found nothing in page").in_matcher(matcher.id()),
        );
    }

    let url = matcher
        .extract(&matches, ctx, fetcher)
        .await
        .map_err(|e| e.in_matcher(matcher.id()))?;

    Ok(Extraction {
        matcher: matcher.id().to_string(),
        url,
        replace: matcher.replace(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::testing::StubFetcher;

    const ORDER: [&str; 11] = [
        "doodstream",
        "filemoon",
        "mixdrop",
        "mp4upload",
        "newgrounds",
        "streamtape",
        "streamzz",
        "upstream",
        "vidoza",
        "voe",
        "vupload",
    ];

    #[test]
    fn test_registry_valid() -> Result<()> {
        validate_registry(list_matchers())
    }

    #[test]
    fn test_registration_order() {
        let ids: Vec<_> = list_matchers().iter().map(|m| m.id()).collect();
        assert_eq!(ids, ORDER);
    }

    #[test]
    fn test_descriptors() {
        let dood = find_matcher_by_id("doodstream").unwrap();
        assert_eq!(dood.name(), "Doodstream");
        assert_eq!(dood.reliability(), Reliability::Normal);
        assert_eq!(dood.domains(), &["doodstream.com", "dood.pm", "dood.ws", "dood.wf"]);
        assert!(dood.replace());

        assert_eq!(find_matcher_by_id("streamzz").unwrap().reliability(), Reliability::Low);
        assert_eq!(find_matcher_by_id("voe").unwrap().reliability(), Reliability::High);
        assert!(!find_matcher_by_id("vidoza").unwrap().replace());
        assert!(find_matcher_by_id("mp4upload").unwrap().replace());
        assert!(find_matcher_by_id("nope").is_none());
    }

    #[test]
    fn test_find_matcher() {
        assert_eq!(find_matcher("vidoza.net").map(|m| m.id()), Some("vidoza"));
        assert_eq!(find_matcher("foo.vidoza.net").map(|m| m.id()), Some("vidoza"));
        assert_eq!(find_matcher("DOOD.WF").map(|m| m.id()), Some("doodstream"));
        assert_eq!(find_matcher("www.newgrounds.com").map(|m| m.id()), Some("newgrounds"));
        assert_eq!(find_matcher("streamz.ws:443").map(|m| m.id()), Some("streamzz"));
        assert!(find_matcher("example.com").is_none());
        assert!(find_matcher("evilvidoza.net").is_none());
        assert!(find_matcher("").is_none());
    }

    #[test]
    fn test_find_matcher_for_url() {
        assert_eq!(
            find_matcher_for_url("https://filemoon.sx/e/ed0p89ndlpl6").map(|m| m.id()),
            Some("filemoon")
        );
        assert!(find_matcher_for_url("https://example.com/").is_none());
        assert!(find_matcher_for_url("not a url").is_none());
    }

    #[test]
    fn test_validate_rejects_overlap() {
        let mut matchers = crate::matchers::registry_items();
        matchers.push(crate::matchers::vidoza::__MATCHER_REGISTRY_VIDOZA());
        assert!(validate_registry(&matchers).is_err());
    }

    #[tokio::test]
    async fn test_extract_vidoza() -> Result<()> {
        let page = r#"sourcesCode: [{ src: "https://foo.vidoza.net/stream.mp4", type: "video/mp4"}]"#;
        let ctx = PageContext::new("https://vidoza.net/embed-x.html", page)?;
        let fetcher = StubFetcher::new();

        let out = extract(&ctx, page, &fetcher).await?;
        assert_eq!(
            out,
            Extraction {
                matcher: "vidoza".to_string(),
                url: "https://foo.vidoza.net/stream.mp4".to_string(),
                replace: false,
            }
        );
        assert!(fetcher.requests.borrow().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_extract_keeps_fragment() -> Result<()> {
        let page = "'|abc|6t2ab7uyuaqdx7fyvy|mp4'";
        let ctx = PageContext::new("https://www.mp4upload.com/embed-x.html", page)?;

        let out = extract(&ctx, page, &StubFetcher::new()).await?;
        assert!(out.replace);
        assert_eq!(out.url, "https://www4.mp4upload.com:282/d/6t2ab7uyuaqdx7fyvy/video.mp4");
        Ok(())
    }

    #[tokio::test]
    async fn test_extract_unsupported() -> Result<()> {
        let ctx = PageContext::new("https://example.com/watch", "")?;
        let err = extract(&ctx, "", &StubFetcher::new()).await.unwrap_err();
        assert!(matches!(err, Error::NoMatcher(ref h) if h == "example.com"));
        assert_eq!(err.kind_name(), "no-matcher");
        Ok(())
    }

    #[tokio::test]
    async fn test_extract_nothing_matched() -> Result<()> {
        let ctx = PageContext::new("https://vidoza.net/embed-x.html", "")?;
        let err = extract(&ctx, "<html></html>", &StubFetcher::new())
            .await
            .unwrap_err();
        match err {
            Error::Extract(ee) => assert_eq!(ee.matcher, Some("vidoza")),
            other => panic!("unexpected {other}"),
        }
        Ok(())
    }
}
