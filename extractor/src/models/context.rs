//! 页面上下文

/*
 * Copyright (c) 2025 fltLi
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use scraper::{Html, Selector};
use url::Url;

use crate::error::*;

/// 提取时可见的页面信息: 当前地址, 主机, 路径段, 文档文本与当前时间.
///
/// 匹配器只通过它读取导航状态, 不接触任何全局环境.
#[derive(Debug, Clone)]
pub struct PageContext {
    url: Url,
    host: String,
    path_segments: Vec<String>,
    document: String,
    now_ms: i64,
}

impl PageContext {
    /// 由页面地址和文档文本创建, 时间取当前 Unix 毫秒
    pub fn new(href: &str, document: impl Into<String>) -> Result<Self> {
        let url = Url::parse(href)
            .map_err(|e| ExtractError::extraction(format!("invalid page url {href}: {e}")))?;
        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| ExtractError::extraction(format!("page url has no host: {href}")))?
            .to_lowercase();
        let path_segments = url
            .path_segments()
            .map(|segs| segs.map(str::to_string).collect())
            .unwrap_or_default();

        Ok(Self {
            url,
            host,
            path_segments,
            document: document.into(),
            now_ms: chrono::Utc::now().timestamp_millis(),
        })
    }

    /// 固定当前时间
    pub fn with_now(mut self, now_ms: i64) -> Self {
        self.now_ms = now_ms;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// 小写主机名, 不含端口
    pub fn host(&self) -> &str {
        &self.host
    }

    /// 主机名加端口 (若有)
    pub fn authority(&self) -> String {
        match self.url.port() {
            Some(port) => format!("{}:{port}", self.host),
            None => self.host.clone(),
        }
    }

    pub fn path_segments(&self) -> &[String] {
        &self.path_segments
    }

    /// 路径最后一段, 以 `/` 结尾时为空串
    pub fn last_path_segment(&self) -> &str {
        self.path_segments.last().map(String::as_str).unwrap_or("")
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }

    /// `<body>` 的内部 HTML; 文档没有 body 时退回原文
    pub fn body_html(&self) -> String {
        let document = Html::parse_document(&self.document);
        if let Ok(sel) = Selector::parse("body")
            && let Some(body) = document.select(&sel).next()
        {
            return body.inner_html();
        }
        self.document.clone()
    }
}
