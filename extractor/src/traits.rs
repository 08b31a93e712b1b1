//! 匹配器特型

/*
 * Copyright (c) 2025 fltLi
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use async_trait::async_trait;

use crate::error::*;
use crate::models::*;
use crate::net::Fetcher;
use crate::utils::domain_matches;

/// 匹配器元数据, 由 `#[derive(Matchable)]` 生成
pub trait MatcherDescriptor {
    /// 显示名称
    fn name(&self) -> &'static str;

    /// 注册表内唯一的短标识
    fn id(&self) -> &'static str;

    fn reliability(&self) -> Reliability;

    /// 声明的域名后缀
    fn domains(&self) -> &'static [&'static str];

    /// 产出是否为需要调用方代入模板的片段
    fn replace(&self) -> bool;

    /// 主机名是否属于本匹配器
    fn claims(&self, host: &str) -> bool {
        self.domains().iter().any(|d| domain_matches(host, d))
    }
}

/// 匹配器
#[async_trait(?Send)]
pub trait Matcher: MatcherDescriptor + Sync + Send {
    /// 扫描页面文本所用的模式
    fn pattern(&self) -> &Pattern;

    /// 由匹配数组和页面上下文还原直链
    async fn extract(
        &self,
        matches: &MatchArray,
        ctx: &PageContext,
        fetcher: &dyn Fetcher,
    ) -> Result<String>;
}
