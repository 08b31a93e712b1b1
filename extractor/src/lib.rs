//! 视频直链解析逻辑

/*
 * Copyright (c) 2025 fltLi
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

mod factory;
pub mod matchers;
pub mod models;
pub mod net;
mod traits;
mod utils;

pub use factory::{
    extract, find_matcher, find_matcher_by_id, find_matcher_for_url, list_matchers,
    validate_registry,
};
pub use models::{Extraction, MatchArray, MatcherInfo, PageContext, Pattern, Reliability, Scan};
pub use net::{FetchRequest, FetchResponse, Fetcher, HttpFetcher};
pub use traits::{Matcher, MatcherDescriptor};

pub mod error {
    //! 错误类型

    pub type Result<T> = std::result::Result<T, Error>;

    /// 通用错误
    #[derive(Debug, thiserror::Error)]
    pub enum Error {
        #[error("no matcher found for host: {0}")]
        NoMatcher(String),
        #[error("extract error: {0}")]
        Extract(ExtractError),
    }

    impl Error {
        /// 供宿主展示的错误类别
        pub fn kind_name(&self) -> &'static str {
            match self {
                Error::NoMatcher(_) => "no-matcher",
                Error::Extract(ee) => match ee.kind {
                    ExtractErrorKind::Extraction(_) => "extraction",
                    ExtractErrorKind::Network(_) => "network",
                    ExtractErrorKind::Format(_) => "format",
                },
            }
        }

        /// 附加出错的匹配器 id
        pub fn in_matcher(self, id: &'static str) -> Self {
            match self {
                Error::Extract(ee) => Error::Extract(ExtractError {
                    matcher: ee.matcher.or(Some(id)),
                    ..ee
                }),
                other => other,
            }
        }
    }

    impl From<ExtractError> for Error {
        fn from(e: ExtractError) -> Self {
            Error::Extract(e)
        }
    }

    /// 提取错误
    #[derive(Debug, thiserror::Error)]
    #[error("Extract failed: {kind}")]
    pub struct ExtractError {
        #[source]
        pub kind: ExtractErrorKind,
        pub matcher: Option<&'static str>,
    }

    impl ExtractError {
        pub fn new(kind: ExtractErrorKind) -> Self {
            Self {
                kind,
                matcher: None,
            }
        }

        /// 匹配数组缺少预期内容
        pub fn extraction(msg: impl Into<String>) -> Error {
            Error::Extract(Self::new(ExtractErrorKind::Extraction(msg.into())))
        }

        /// 辅助请求失败
        pub fn network(msg: impl Into<String>) -> Error {
            Error::Extract(Self::new(ExtractErrorKind::Network(msg.into())))
        }

        /// 辅助响应格式不符
        pub fn format(msg: impl Into<String>) -> Error {
            Error::Extract(Self::new(ExtractErrorKind::Format(msg.into())))
        }
    }

    /// 提取错误类型
    #[derive(Debug, thiserror::Error)]
    pub enum ExtractErrorKind {
        #[error("extraction error: {0}")]
        Extraction(String),
        #[error("network error: {0}")]
        Network(String),
        #[error("format error: {0}")]
        Format(String),
    }
}
