//! Filemoon 匹配器

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
use crate::utils::is_canonical_int;

static PATTERN: Lazy<Pattern> = Lazy::new(super::pipe_tokens);

// revalidate: 以 "moon" 词元为基准向前数的偏移, 取自 2023-10 的打包脚本
const KEYWORD: &str = "moon";
const HOST_LABELS: [isize; 4] = [0, -1, -2, -3];
const TLD: isize = -4;
const PATH: [isize; 4] = [-5, -6, -7, -8];
const TOKEN: isize = -11;
const TOKEN_TAIL: isize = -12;
const EXPIRES: isize = -12;
const SPEED: isize = -18;

/// Filemoon: 在打包脚本的词元表中按相对位置还原 HLS 主清单地址
#[derive(Matchable)]
#[matcher(
    name = "Filemoon",
    id = "filemoon",
    reliability = "high",
    domains = ["filemoon.sx"]
)]
pub struct Filemoon;

impl Filemoon {
    fn build(m: &MatchArray) -> Result<String> {
        let s = m.position(KEYWORD)?;
        let at = |delta: isize| m.at_offset(s, delta);

        let host = HOST_LABELS
            .iter()
            .map(|&d| at(d))
            .collect::<Result<Vec<_>>>()?
            .join("-");
        let path = PATH
            .iter()
            .map(|&d| at(d))
            .collect::<Result<Vec<_>>>()?
            .join("/");
        let time = m.find_epoch()?;

        // token 被拆成两段时, 之后的词元整体后移一位
        let tail = at(TOKEN_TAIL)?;
        let shift: isize = if is_canonical_int(tail) { 0 } else { -1 };
        let token = if shift == 0 {
            at(TOKEN)?.to_string()
        } else {
            format!("{}-{tail}", at(TOKEN)?)
        };

        Ok(format!(
            "https://{host}.filemoon.{}/{path}/master.m3u8?t={token}&s={time}&e={}&sp={}",
            at(TLD)?,
            at(EXPIRES + shift)?,
            at(SPEED + shift)?,
        ))
    }
}

#[async_trait(?Send)]
impl Matcher for Filemoon {
    fn pattern(&self) -> &Pattern {
        &PATTERN
    }

    async fn extract(
        &self,
        matches: &MatchArray,
        _ctx: &PageContext,
        _fetcher: &dyn Fetcher,
    ) -> Result<String> {
        Self::build(matches)
    }
}
