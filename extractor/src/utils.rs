//! 辅助工具

/*
 * Copyright (c) 2025 fltLi
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// 规范化主机名: 小写, 去掉端口和末尾的根点
pub fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let host = match host.rsplit_once(':') {
        Some((h, port)) if port.chars().all(|c| c.is_ascii_digit()) => h,
        _ => host,
    };
    host.trim_end_matches('.').to_lowercase()
}

/// 主机名是否等于域名或为其子域
pub fn domain_matches(host: &str, domain: &str) -> bool {
    let host = normalize_host(host);
    let domain = domain.trim_end_matches('.').to_lowercase();
    if domain.is_empty() {
        return false;
    }
    host == domain
        || host
            .strip_suffix(domain.as_str())
            .is_some_and(|rest| rest.ends_with('.'))
}

/// 按前导整数解析, 开头不是整数时为 None
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let t = s.trim_start();
    let (neg, digits) = match t.as_bytes().first() {
        Some(b'-') => (true, &t[1..]),
        Some(b'+') => (false, &t[1..]),
        _ => (false, t),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // 超出范围时饱和, 只关心能否解析
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if neg { -value } else { value })
}

/// 是否为规范写法的十进制整数 (全为数字且没有多余前导零)
pub fn is_canonical_int(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| c.is_ascii_digit())
        && (s == "0" || !s.starts_with('0'))
}

/// 按 URI 规则解码: 保留编码后的保留字符, 其余百分号序列解码为 UTF-8
pub fn decode_uri(s: &str) -> Option<String> {
    const RESERVED: &[u8] = b";/?:@&=+$,#";

    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut chunk_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        let hex = s
            .get(i + 1..i + 3)
            .filter(|h| h.bytes().all(|b| b.is_ascii_hexdigit()))?;
        let byte = u8::from_str_radix(hex, 16).ok()?;
        if RESERVED.contains(&byte) {
            out.push_str(&urlencoding::decode(&s[chunk_start..i]).ok()?);
            out.push_str(&s[i..i + 3]);
            chunk_start = i + 3;
        }
        i += 3;
    }
    out.push_str(&urlencoding::decode(&s[chunk_start..]).ok()?);

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_matches() {
        assert!(domain_matches("vidoza.net", "vidoza.net"));
        assert!(domain_matches("Foo.Vidoza.NET.", "vidoza.net"));
        assert!(domain_matches("dood.ws:443", "dood.ws"));
        assert!(!domain_matches("notvidoza.net", "vidoza.net"));
        assert!(!domain_matches("vidoza.net.evil.com", "vidoza.net"));
        assert!(!domain_matches("example.com", ""));
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("1697939838"), Some(1697939838));
        assert_eq!(parse_int_prefix("12abc"), Some(12));
        assert_eq!(parse_int_prefix("-7"), Some(-7));
        assert_eq!(parse_int_prefix("abc12"), None);
        assert_eq!(parse_int_prefix(""), None);
    }

    #[test]
    fn test_is_canonical_int() {
        assert!(is_canonical_int("43200"));
        assert!(is_canonical_int("0"));
        assert!(!is_canonical_int("04830"));
        assert!(!is_canonical_int("12ab"));
        assert!(!is_canonical_int(""));
    }

    #[test]
    fn test_decode_uri() {
        assert_eq!(
            decode_uri("https://uploads.ungrounded.net/alternate/1/video%20one.mp4?f1=x%26y").unwrap(),
            "https://uploads.ungrounded.net/alternate/1/video one.mp4?f1=x%26y"
        );
        assert_eq!(decode_uri("%E4%BD%A0").unwrap(), "你");
        assert_eq!(decode_uri("a%2Fb%3F").unwrap(), "a%2Fb%3F");
        assert!(decode_uri("bad%zz").is_none());
        assert!(decode_uri("trunc%4").is_none());
    }
}
