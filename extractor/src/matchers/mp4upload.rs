//! Mp4Upload 匹配器

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

/// Mp4Upload: 最长的词元即文件 id
#[derive(Matchable)]
#[matcher(
    name = "Mp4Upload",
    id = "mp4upload",
    reliability = "normal",
    domains = ["mp4upload.com"],
    replace = true
)]
pub struct Mp4Upload;

#[async_trait(?Send)]
impl Matcher for Mp4Upload {
    fn pattern(&self) -> &Pattern {
        &PATTERN
    }

    async fn extract(
        &self,
        matches: &MatchArray,
        _ctx: &PageContext,
        _fetcher: &dyn Fetcher,
    ) -> Result<String> {
        let id = matches.longest()?;
        Ok(format!("https://www4.mp4upload.com:282/d/{id}/video.mp4"))
    }
}
