//! 辅助请求

/*
 * Copyright (c) 2025 fltLi
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::*;

/// 一次同源辅助请求 (GET)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub referrer: Option<String>,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }
}

/// 响应状态码与正文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 非 2xx 视为网络错误
    pub fn error_for_status(self) -> Result<Self> {
        if (200..300).contains(&self.status) {
            Ok(self)
        } else {
            Err(ExtractError::network(format!(
                "unexpected status {}",
                self.status
            )))
        }
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body)
            .map_err(|e| ExtractError::format(format!("invalid json: {e}")))
    }
}

/// HTTP 客户端接缝, 由宿主提供
#[async_trait(?Send)]
pub trait Fetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse>;
}

/// 基于 reqwest 的默认实现, 原生与 wasm32 目标均可用
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定 User-Agent
    pub fn with_user_agent(user_agent: &str) -> Result<Self> {
        #[cfg(not(target_arch = "wasm32"))]
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| ExtractError::network(format!("client build failed: {e}")))?;

        // 浏览器环境由宿主决定 User-Agent
        #[cfg(target_arch = "wasm32")]
        let client = {
            let _ = user_agent;
            reqwest::Client::new()
        };

        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse> {
        tracing::debug!("fetching {}", request.url);

        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(referrer) = &request.referrer {
            builder = builder.header(reqwest::header::REFERER, referrer.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ExtractError::network(format!("request to {} failed: {e}", request.url)))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ExtractError::network(format!("reading body failed: {e}")))?;

        Ok(FetchResponse { status, body })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! 测试用的内存客户端

    use super::*;
    use std::cell::RefCell;

    /// 按顺序返回预设响应, 并记录收到的请求
    #[derive(Default)]
    pub struct StubFetcher {
        responses: RefCell<Vec<Result<FetchResponse>>>,
        pub requests: RefCell<Vec<FetchRequest>>,
    }

    impl StubFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, status: u16, body: &str) -> Self {
            self.responses
                .borrow_mut()
                .push(Ok(FetchResponse::new(status, body)));
            self
        }

        pub fn fail(self, msg: &str) -> Self {
            self.responses
                .borrow_mut()
                .push(Err(ExtractError::network(msg)));
            self
        }
    }

    #[async_trait(?Send)]
    impl Fetcher for StubFetcher {
        async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse> {
            self.requests.borrow_mut().push(request);
            let mut responses = self.responses.borrow_mut();
            if responses.is_empty() {
                return Err(ExtractError::network("no stubbed response"));
            }
            responses.remove(0)
        }
    }
}
