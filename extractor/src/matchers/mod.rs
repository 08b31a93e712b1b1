//! 匹配器实现

pub mod doodstream;
pub mod filemoon;
pub mod mixdrop;
pub mod mp4upload;
pub mod newgrounds;
pub mod streamtape;
pub mod streamzz;
pub mod upstream;
pub mod vidoza;
pub mod voe;
pub mod vupload;

use regex::Regex;

use crate::models::{Pattern, Scan};
use crate::traits::Matcher;

/// 收集注册的匹配器, 顺序即注册顺序
///
/// 与提取器一样使用手动注册表, 避免分布式切片在 wasm 下的链接问题.
pub(crate) fn registry_items() -> Vec<Box<dyn Matcher>> {
    vec![
        doodstream::__MATCHER_REGISTRY_DOODSTREAM(),
        filemoon::__MATCHER_REGISTRY_FILEMOON(),
        mixdrop::__MATCHER_REGISTRY_MIXDROP(),
        mp4upload::__MATCHER_REGISTRY_MP4UPLOAD(),
        newgrounds::__MATCHER_REGISTRY_NEWGROUNDS(),
        streamtape::__MATCHER_REGISTRY_STREAMTAPE(),
        streamzz::__MATCHER_REGISTRY_STREAMZZ(),
        upstream::__MATCHER_REGISTRY_UPSTREAM(),
        vidoza::__MATCHER_REGISTRY_VIDOZA(),
        voe::__MATCHER_REGISTRY_VOE(),
        vupload::__MATCHER_REGISTRY_VUPLOAD(),
    ]
}

/// 打包脚本 `'a|b|c'.split('|')` 中竖线后的词元 (至少两个字符)
fn pipe_tokens() -> Pattern {
    Pattern::new(Regex::new(r"\|([0-9A-Za-z_]{2,})").unwrap(), Scan::All)
}

/// 播放器配置中的 `src: "..."`
fn player_source() -> Pattern {
    Pattern::new(Regex::new(r#"src:\s?"(.+?)""#).unwrap(), Scan::All)
}
