// ABOUTME: The main Client struct for wordglass that fetches pages and runs word analysis.
// ABOUTME: Provides async analyze() and analyze_html() methods producing a WordReport.

use std::collections::HashSet;
use std::net::ToSocketAddrs;

use crate::classify::{find_anagram_pairs, find_palindromes, Palindrome};
use crate::error::AnalyzeError;
use crate::extract::extract_words;
use crate::options::{ClientBuilder, Options};
use crate::report::WordReport;
use crate::resource::{fetch, FetchOptions};

/// The main wordglass client for analyzing web pages.
pub struct Client {
    opts: Options,
    http_client: reqwest::Client,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Self {
        let http_client = opts.http_client.clone().unwrap_or_else(|| {
            let allow_private = opts.allow_private_networks;
            let redirect_policy = reqwest::redirect::Policy::custom(move |attempt| {
                let next = attempt.url().clone();
                if !allow_private {
                    if let Some(host) = next.host_str() {
                        let scheme = next.scheme();
                        let port = next
                            .port()
                            .unwrap_or(if scheme == "https" { 443 } else { 80 });
                        if let Ok(ip) = host.parse::<std::net::IpAddr>() {
                            if crate::resource::is_private_ip(&ip) {
                                return attempt.error("redirect to private IP blocked");
                            }
                        } else {
                            // synchronous DNS resolution to avoid async in redirect policy
                            let addr_str = format!("{}:{}", host, port);
                            match addr_str.to_socket_addrs() {
                                Ok(addrs) => {
                                    for sa in addrs {
                                        if crate::resource::is_private_ip(&sa.ip()) {
                                            return attempt.error("redirect to private IP blocked");
                                        }
                                    }
                                }
                                Err(_) => {
                                    return attempt.error("DNS lookup failed during redirect");
                                }
                            }
                        }
                    }
                }
                attempt.follow()
            });

            reqwest::Client::builder()
                .redirect(redirect_policy)
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .expect("failed to build HTTP client")
        });

        Self { opts, http_client }
    }

    /// Analyze the page at the given URL.
    ///
    /// Fetches the page, decodes it as UTF-8, extracts the retained words,
    /// and classifies the unique set into palindromes and anagram pairs.
    pub async fn analyze(&self, url: &str) -> Result<WordReport, AnalyzeError> {
        if url.is_empty() {
            return Err(AnalyzeError::invalid_url(url, "Analyze", None));
        }

        // Validate URL format
        if url::Url::parse(url).is_err() {
            return Err(AnalyzeError::invalid_url(
                url,
                "Analyze",
                Some(anyhow::anyhow!("malformed URL")),
            ));
        }

        let fetch_opts = FetchOptions {
            headers: self.opts.headers.clone(),
            allow_private_networks: self.opts.allow_private_networks,
        };

        // Fetch the resource and decode strictly as UTF-8
        let fetch_result = fetch(&self.http_client, url, &fetch_opts).await?;
        let html = fetch_result.text_utf8()?;

        Ok(build_report(&html, &fetch_result.final_url))
    }

    /// Analyze caller-supplied HTML, using the given URL for report context.
    pub async fn analyze_html(&self, html: &str, url: &str) -> Result<WordReport, AnalyzeError> {
        if html.is_empty() {
            return Err(AnalyzeError::invalid_url(
                url,
                "AnalyzeHTML",
                Some(anyhow::anyhow!("empty HTML")),
            ));
        }

        if url.is_empty() {
            return Err(AnalyzeError::invalid_url(url, "AnalyzeHTML", None));
        }

        // Validate URL format
        url::Url::parse(url).map_err(|_| {
            AnalyzeError::invalid_url(url, "AnalyzeHTML", Some(anyhow::anyhow!("malformed URL")))
        })?;

        Ok(build_report(html, url))
    }
}

/// Run extraction and classification over `html`, reporting against `url`.
fn build_report(html: &str, url: &str) -> WordReport {
    let unique: HashSet<String> = extract_words(html).into_iter().collect();

    let mut palindromes: Vec<String> = find_palindromes(&unique)
        .into_iter()
        .map(Palindrome::into_word)
        .collect();
    palindromes.sort();

    let mut anagram_pairs: Vec<(String, String)> =
        find_anagram_pairs(&unique).into_iter().collect();
    anagram_pairs.sort();

    let domain = url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
        .unwrap_or_default();

    WordReport {
        url: url.to_string(),
        domain,
        unique_words: unique.len(),
        palindromes,
        anagram_pairs,
    }
}
