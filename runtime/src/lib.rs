//! 扩展后台运行环境支持

/*
 * Copyright (c) 2025 fltLi
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use extractor::error;
use extractor::{Extraction, Fetcher, HttpFetcher, MatcherInfo, PageContext};
use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

/// 宿主传入的客户端配置
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// 辅助请求使用的 User-Agent, 缺省时由环境决定
    #[serde(default, rename = "userAgent")]
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// 按配置构建 HTTP 客户端
    pub fn fetcher(&self) -> error::Result<HttpFetcher> {
        match &self.user_agent {
            Some(ua) => HttpFetcher::with_user_agent(ua),
            None => Ok(HttpFetcher::new()),
        }
    }
}

/// 调用 `Runtime::extract` 后返回给JS的输出
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractOutput {
    pub success: bool,
    pub error: Option<String>,
    /// 错误类别: no-matcher / extraction / network / format
    pub kind: Option<String>,
    pub matcher: Option<String>,
    pub url: Option<String>,
    /// 为真时 `url` 是片段, 由调用方代入模板
    #[serde(default)]
    pub replace: bool,
}

impl From<error::Result<Extraction>> for ExtractOutput {
    fn from(res: error::Result<Extraction>) -> Self {
        match res {
            Ok(ex) => ExtractOutput {
                success: true,
                error: None,
                kind: None,
                matcher: Some(ex.matcher),
                url: Some(ex.url),
                replace: ex.replace,
            },
            Err(e) => {
                let kind = Some(e.kind_name().to_string());
                match e {
                    error::Error::Extract(ee) => ExtractOutput {
                        success: false,
                        error: Some(format!("{ee}")),
                        kind,
                        matcher: ee.matcher.map(str::to_string),
                        ..Default::default()
                    },
                    error::Error::NoMatcher(host) => ExtractOutput {
                        success: false,
                        error: Some(format!("unsupported site: {host}")),
                        kind,
                        ..Default::default()
                    },
                }
            }
        }
    }
}

/// 在 (href, html) 上运行匹配器
pub async fn extract_page(href: &str, html: &str, fetcher: &dyn Fetcher) -> ExtractOutput {
    let res = match PageContext::new(href, html) {
        Ok(ctx) => extractor::extract(&ctx, html, fetcher).await,
        Err(e) => Err(e),
    };
    if let Err(e) = &res {
        tracing::debug!("extraction for {href} failed: {e}");
    }
    res.into()
}

/// 全部匹配器的元数据, 按注册顺序
pub fn matcher_listing() -> Vec<MatcherInfo> {
    extractor::list_matchers()
        .iter()
        .map(|m| MatcherInfo::from(&**m))
        .collect()
}

/// 主机名或完整地址对应的匹配器元数据
pub fn matcher_info(host_or_url: &str) -> Option<MatcherInfo> {
    let matcher = if host_or_url.contains("://") {
        extractor::find_matcher_for_url(host_or_url)
    } else {
        extractor::find_matcher(host_or_url)
    }?;
    Some(MatcherInfo::from(matcher))
}

/// 导出到WASM的运行时。保存客户端配置并执行提取。
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct Runtime {
    fetcher: HttpFetcher,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl Runtime {
    /// 从配置对象创建运行时, 允许传入 undefined
    #[wasm_bindgen(constructor)]
    pub fn new(js_config: JsValue) -> Result<Runtime, JsValue> {
        let config: ClientConfig = if js_config.is_undefined() || js_config.is_null() {
            ClientConfig::default()
        } else {
            serde_wasm_bindgen::from_value(js_config)
                .map_err(|e| JsValue::from_str(&format!("invalid config: {e}")))?
        };
        let fetcher = config
            .fetcher()
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
        Ok(Runtime { fetcher })
    }

    /// 提取直链, 返回 Promise<ExtractOutput>
    #[wasm_bindgen]
    pub fn extract(&self, href: String, html: String) -> js_sys::Promise {
        let fetcher = self.fetcher.clone();
        wasm_bindgen_futures::future_to_promise(async move {
            let out = extract_page(&href, &html, &fetcher).await;
            serde_wasm_bindgen::to_value(&out)
                .map_err(|e| JsValue::from_str(&format!("serialize error: {e}")))
        })
    }
}

/// 导出匹配器列表
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = listMatchers)]
pub fn list_matchers() -> JsValue {
    serde_wasm_bindgen::to_value(&matcher_listing())
        .unwrap_or_else(|e| JsValue::from_str(&format!("serialize error: {e}")))
}

/// 导出匹配器查找, 不支持的站点返回 null
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = findMatcher)]
pub fn find_matcher(host_or_url: &str) -> JsValue {
    match matcher_info(host_or_url) {
        Some(info) => serde_wasm_bindgen::to_value(&info)
            .unwrap_or_else(|e| JsValue::from_str(&format!("serialize error: {e}"))),
        None => JsValue::NULL,
    }
}
