//! DuckDuckGo ライブ検索アダプタ
//!
//! html.duckduckgo.com の検索結果ページからスニペットを上位 3 件抜き出して
//! 改行結合したテキストを返す。失敗時はエラー注釈付き文字列（Err にしない）。

use crate::ports::outbound::LiveSearch;
use common::error::Error;
use regex::Regex;
use std::time::Duration;

const SEARCH_URL: &str = "https://html.duckduckgo.com/html/";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";
const MAX_RESULTS: usize = 3;

pub struct DdgLiveSearch {
    client: reqwest::blocking::Client,
    snippet_re: Regex,
    tag_re: Regex,
}

impl DdgLiveSearch {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| reqwest::blocking::Client::new()),
            snippet_re: Regex::new(r#"(?s)class="result__snippet"[^>]*>(.*?)</a>"#)
                .expect("snippet regex"),
            tag_re: Regex::new(r"<[^>]+>").expect("tag regex"),
        }
    }

    fn fetch(&self, query: &str) -> Result<String, Error> {
        let url = format!("{}?q={}", SEARCH_URL, urlencoding::encode(query));
        let response = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .map_err(|e| Error::http(format!("search request failed: {}", e)))?;
        if !response.status().is_success() {
            return Err(Error::http(format!("search HTTP {}", response.status())));
        }
        response
            .text()
            .map_err(|e| Error::http(format!("failed to read search response: {}", e)))
    }

    /// HTML タグを剥がし、空白を 1 個に正規化する
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

    fn extract_snippets(&self, body: &str) -> Vec<String> {
        self.snippet_re
            .captures_iter(body)
            .filter_map(|c| c.get(1))
            .map(|m| self.strip_tags(m.as_str()))
            .filter(|s| !s.is_empty())
            .take(MAX_RESULTS)
            .collect()
    }
}

impl Default for DdgLiveSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveSearch for DdgLiveSearch {
    fn search(&self, query: &str) -> String {
        match self.fetch(query) {
            Ok(body) => self.extract_snippets(&body).join("\n"),
            Err(e) => format!("[Live Search Error: {}]", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_snippets_from_result_page() {
        let search = DdgLiveSearch::new();
        let body = r#"
            <a class="result__snippet" href="/x">First <b>bold</b> snippet.</a>
            <a class="result__snippet" href="/y">Second
            snippet &amp; more.</a>
            <a class="result__snippet" href="/z">Third.</a>
            <a class="result__snippet" href="/w">Fourth is dropped.</a>
        "#;
        let snippets = search.extract_snippets(body);
        assert_eq!(snippets.len(), 3);
        assert_eq!(snippets[0], "First bold snippet.");
        assert_eq!(snippets[1], "Second snippet & more.");
    }

    #[test]
    fn test_extract_snippets_empty_page() {
        let search = DdgLiveSearch::new();
        assert!(search.extract_snippets("<html></html>").is_empty());
    }
}
