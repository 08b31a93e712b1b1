//! Vidoza 匹配器

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

/// Vidoza: 播放器配置中的 `src` 即直链
#[derive(Matchable)]
#[matcher(
    name = "Vidoza",
    id = "vidoza",
    reliability = "high",
    domains = ["vidoza.net"]
)]
pub struct Vidoza;

#[async_trait(?Send)]
impl Matcher for Vidoza {
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
