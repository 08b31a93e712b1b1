/*
 * Copyright (c) 2025 fltLi
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

extern crate proc_macro;

use once_cell::sync::Lazy;
use proc_macro::TokenStream;
use quote::ToTokens;
use quote::{format_ident, quote};
use regex::Regex;
use syn::{Attribute, DeriveInput, parse_macro_input};

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\bname\s*=\s*"([^"]+)""#).unwrap());
static ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\bid\s*=\s*"([^"]+)""#).unwrap());
static RELIABILITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\breliability\s*=\s*"([^"]+)""#).unwrap());
static DOMAINS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bdomains\s*=\s*\[(?P<inner>[^\]]*)\]").unwrap());
static REPLACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\breplace\s*(?:=\s*(?P<value>true|false))?").unwrap());

/// 匹配器属性
///
/// # 使用示例
///
/// 在匹配器类型上添加 `#[derive(Matchable)]` 并使用 `#[matcher(...)]` 属性指定元数据:
///
/// ```rust,ignore
/// #[derive(Matchable)]
/// #[matcher(
///     name = "Doodstream",
///     id = "doodstream",
///     reliability = "normal",
///     domains = ["doodstream.com", "dood.pm"],
///     replace = true
/// )]
/// pub struct Doodstream;
/// ```
///
/// 支持的属性:
/// - `name = "..."`: 显示名称 (必须)
/// - `id = "..."`: 注册表内唯一的短标识 (必须)
/// - `reliability = "high" | "normal" | "low"`: 可靠性 (默认 `normal`)
/// - `domains = ["d1", "d2"]`: 声明的域名后缀 (必须, 非空)
/// - `replace` / `replace = true`: 产出为模板片段 (可选)
///
/// 该宏会为类型生成 `MatcherDescriptor` 的实现, 以及一个返回注册项的函数
/// `__MATCHER_REGISTRY_<TYPE>`, 由 `crate::matchers::registry_items` 手动收集.
#[derive(Debug)]
struct MatcherAttributes {
    name: String,
    id: String,
    reliability: String,
    domains: Vec<String>,
    replace: bool,
}

impl MatcherAttributes {
    fn from_attrs(input: &DeriveInput) -> Result<Self, syn::Error> {
        let attrs: &[Attribute] = &input.attrs;
        let mut name = None;
        let mut id = None;
        let mut reliability = None;
        let mut domains = Vec::new();
        let mut replace = false;

        for attr in attrs {
            if !attr.path().is_ident("matcher") {
                continue;
            }

            // 转为 token 字符串后用正则解析, 形如: (name = "xxx", domains = ["a", "b"])
            let mut ts = proc_macro2::TokenStream::new();
            attr.to_tokens(&mut ts);
            let s = ts.to_string();

            if name.is_none()
                && let Some(cap) = NAME_RE.captures(&s)
            {
                name = Some(cap[1].to_string());
            }
            if id.is_none()
                && let Some(cap) = ID_RE.captures(&s)
            {
                id = Some(cap[1].to_string());
            }
            if reliability.is_none()
                && let Some(cap) = RELIABILITY_RE.captures(&s)
            {
                reliability = Some(cap[1].to_lowercase());
            }
            if let Some(cap) = DOMAINS_RE.captures(&s) {
                for part in cap["inner"].split(',') {
                    let d = part.trim().trim_matches('"').trim().to_lowercase();
                    if !d.is_empty() {
                        domains.push(d);
                    }
                }
            }
            if let Some(cap) = REPLACE_RE.captures(&s) {
                replace = cap.name("value").is_none_or(|v| v.as_str() == "true");
            }
        }

        let name = name.ok_or_else(|| {
            syn::Error::new_spanned(&input.ident, "Missing required attribute 'name'")
        })?;
        let id = id.ok_or_else(|| {
            syn::Error::new_spanned(&input.ident, "Missing required attribute 'id'")
        })?;
        if domains.is_empty() {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Attribute 'domains' must list at least one domain",
            ));
        }
        let reliability = reliability.unwrap_or_else(|| "normal".to_string());
        if !matches!(reliability.as_str(), "high" | "normal" | "low") {
            return Err(syn::Error::new_spanned(
                &input.ident,
                format!("Unknown reliability '{reliability}', expected high, normal or low"),
            ));
        }

        Ok(MatcherAttributes {
            name,
            id,
            reliability,
            domains,
            replace,
        })
    }
}

#[proc_macro_derive(Matchable, attributes(matcher))]
pub fn derive_matchable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let ident = &input.ident;

    let attrs = match MatcherAttributes::from_attrs(&input) {
        Ok(attrs) => attrs,
        Err(e) => return e.to_compile_error().into(),
    };

    let MatcherAttributes {
        name,
        id,
        reliability,
        domains,
        replace,
    } = attrs;

    // 全部大写以符合静态注册项命名
    let registry_item_name =
        format_ident!("__MATCHER_REGISTRY_{}", ident.to_string().to_uppercase());

    let reliability_variant = match reliability.as_str() {
        "high" => format_ident!("High"),
        "low" => format_ident!("Low"),
        _ => format_ident!("Normal"),
    };

    let expanded = quote! {
        impl crate::traits::MatcherDescriptor for #ident {
            fn name(&self) -> &'static str {
                #name
            }

            fn id(&self) -> &'static str {
                #id
            }

            fn reliability(&self) -> crate::models::Reliability {
                crate::models::Reliability::#reliability_variant
            }

            fn domains(&self) -> &'static [&'static str] {
                &[#(#domains),*]
            }

            fn replace(&self) -> bool {
                #replace
            }
        }

        // 返回注册项, 由手动注册表收集调用
        #[allow(non_snake_case)]
        pub fn #registry_item_name() -> Box<dyn crate::traits::Matcher> {
            Box::new(#ident {})
        }
    };

    expanded.into()
}
