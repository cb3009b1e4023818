//! DuckDuckGo 動画検索アダプタ
//!
//! html.duckduckgo.com の検索結果から最初の 1 件（タイトル・リンク・
//! スニペット）を取り出す。リダイレクトリンクは uddg パラメータを復元する。

use crate::ports::outbound::{VideoResult, VideoSearch};
use common::error::Error;
use regex::Regex;
use std::time::Duration;

const SEARCH_URL: &str = "https://html.duckduckgo.com/html/";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

pub struct DdgVideoSearch {
    client: reqwest::blocking::Client,
    result_re: Regex,
    snippet_re: Regex,
    tag_re: Regex,
}

impl DdgVideoSearch {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| reqwest::blocking::Client::new()),
            result_re: Regex::new(r#"(?s)class="result__a"[^>]*href="([^"]+)"[^>]*>(.*?)</a>"#)
                .expect("result regex"),
            snippet_re: Regex::new(r#"(?s)class="result__snippet"[^>]*>(.*?)</a>"#)
                .expect("snippet regex"),
            tag_re: Regex::new(r"<[^>]+>").expect("tag regex"),
        }
    }

    fn fetch(&self, query: &str) -> Result<String, Error> {
        let url = format!(
            "{}?q={}",
            SEARCH_URL,
            urlencoding::encode(&format!("{} video tutorial", query))
        );
        let response = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .map_err(|e| Error::http(format!("video search request failed: {}", e)))?;
        if !response.status().is_success() {
            return Err(Error::http(format!(
                "video search HTTP {}",
                response.status()
            )));
        }
        response
            .text()
            .map_err(|e| Error::http(format!("failed to read video search response: {}", e)))
    }

    fn strip_tags(&self, html: &str) -> String {
        let text = self.tag_re.replace_all(html, "");
        let text = text
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#x27;", "'");
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// DDG のリダイレクト URL（uddg=...）から実 URL を復元する
    fn resolve_link(&self, href: &str) -> String {
        let href = href.replace("&amp;", "&");
        if let Some(pos) = href.find("uddg=") {
            let encoded = &href[pos + 5..];
            let encoded = encoded.split('&').next().unwrap_or(encoded);
            if let Ok(decoded) = urlencoding::decode(encoded) {
                return decoded.into_owned();
            }
        }
        if href.starts_with("//") {
            return format!("https:{}", href);
        }
        href
    }

    fn extract_first(&self, body: &str) -> Option<VideoResult> {
        let caps = self.result_re.captures(body)?;
        let href = caps.get(1)?.as_str();
        let title = self.strip_tags(caps.get(2)?.as_str());
        if title.is_empty() {
            return None;
        }
        let description = self
            .snippet_re
            .captures(body)
            .and_then(|c| c.get(1))
            .map(|m| self.strip_tags(m.as_str()))
            .unwrap_or_default();
        Some(VideoResult {
            title,
            url: self.resolve_link(href),
            description,
        })
    }
}

impl Default for DdgVideoSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoSearch for DdgVideoSearch {
    fn search(&self, query: &str) -> Option<VideoResult> {
        let body = self.fetch(query).ok()?;
        self.extract_first(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_first_result() {
        let search = DdgVideoSearch::new();
        let body = r#"
            <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fwatch%3Fv%3D42&amp;rut=abc">Rust <b>loops</b> tutorial</a>
            <a class="result__snippet" href="/x">Learn loops in Rust step by step.</a>
        "#;
        let result = search.extract_first(body).unwrap();
        assert_eq!(result.title, "Rust loops tutorial");
        assert_eq!(result.url, "https://example.com/watch?v=42");
        assert_eq!(result.description, "Learn loops in Rust step by step.");
    }

    #[test]
    fn test_extract_first_no_results() {
        let search = DdgVideoSearch::new();
        assert!(search.extract_first("<html></html>").is_none());
    }

    #[test]
    fn test_resolve_plain_link() {
        let search = DdgVideoSearch::new();
        assert_eq!(
            search.resolve_link("https://example.com/a"),
            "https://example.com/a"
        );
        assert_eq!(
            search.resolve_link("//example.com/b"),
            "https://example.com/b"
        );
    }
}
