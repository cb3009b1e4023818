//! Bing 画像検索アダプタ
//!
//! 画像検索結果ページの iusc アンカーが持つ m 属性（JSON）から murl を
//! 正規表現で抜き出す。失敗時は空リスト（Err にしない）。

use crate::ports::outbound::ImageSearch;
use common::error::Error;
use regex::Regex;
use std::time::Duration;

const SEARCH_URL: &str = "https://www.bing.com/images/search";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

pub struct BingImageSearch {
    client: reqwest::blocking::Client,
    murl_re: Regex,
}

impl BingImageSearch {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| reqwest::blocking::Client::new()),
            // m 属性は HTML エスケープされた JSON で埋め込まれる
            murl_re: Regex::new(r#"(?:&quot;|")murl(?:&quot;|")\s*:\s*(?:&quot;|")(.*?)(?:&quot;|")"#)
                .expect("murl regex"),
        }
    }

    fn fetch(&self, query: &str) -> Result<String, Error> {
        let url = format!(
            "{}?q={}&form=HDRSC2&first=1",
            SEARCH_URL,
            urlencoding::encode(query)
        );
        let response = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .map_err(|e| Error::http(format!("image search request failed: {}", e)))?;
        if !response.status().is_success() {
            return Err(Error::http(format!(
                "image search HTTP {}",
                response.status()
            )));
        }
        response
            .text()
            .map_err(|e| Error::http(format!("failed to read image search response: {}", e)))
    }

    fn extract_urls(&self, body: &str) -> Vec<String> {
        self.murl_re
            .captures_iter(body)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().replace("&amp;", "&").replace("\\/", "/"))
            .filter(|u| u.starts_with("http"))
            .collect()
    }
}

impl Default for BingImageSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageSearch for BingImageSearch {
    fn search(&self, query: &str) -> Vec<String> {
        match self.fetch(query) {
            Ok(body) => self.extract_urls(&body),
            Err(_) => Vec::new(),
        }
    }
}
