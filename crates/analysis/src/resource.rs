// ABOUTME: Resource handling module for fetching web pages.
// ABOUTME: Handles HTTP fetching with SSRF protection, content-length limits, and strict UTF-8 decoding.

use std::collections::HashMap;
use std::net::IpAddr;

use bytes::Bytes;
use ipnet::{Ipv4Net, Ipv6Net};

use crate::error::AnalyzeError;

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// Options for fetching a resource.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub headers: HashMap<String, String>,
    pub allow_private_networks: bool,
}

/// Result of a successful fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResult {
    /// Decode the body strictly as UTF-8 text.
    ///
    /// There is no fallback encoding; a body that is not valid UTF-8 is a
    /// Decode error.
    pub fn text_utf8(&self) -> Result<String, AnalyzeError> {
        match std::str::from_utf8(&self.body) {
            Ok(text) => Ok(text.to_string()),
            Err(e) => Err(AnalyzeError::decode(
                self.url.clone(),
                "Decode",
                Some(anyhow::anyhow!("body is not valid UTF-8: {}", e)),
            )),
        }
    }
}

/// Check if an IP address is in a private/reserved range.
pub(crate) fn is_private_ip(addr: &IpAddr) -> bool {
    match addr {
        IpAddr::V4(ip) => {
            // RFC1918 private ranges
            let private_10: Ipv4Net = "10.0.0.0/8".parse().unwrap();
            let private_172: Ipv4Net = "172.16.0.0/12".parse().unwrap();
            let private_192: Ipv4Net = "192.168.0.0/16".parse().unwrap();
            // Loopback
            let loopback: Ipv4Net = "127.0.0.0/8".parse().unwrap();
            // Link-local
            let link_local: Ipv4Net = "169.254.0.0/16".parse().unwrap();

            private_10.contains(ip)
                || private_172.contains(ip)
                || private_192.contains(ip)
                || loopback.contains(ip)
                || link_local.contains(ip)
        }
        IpAddr::V6(ip) => {
            // Loopback ::1
            if ip.is_loopback() {
                return true;
            }
            // Unique local fc00::/7
            let unique_local: Ipv6Net = "fc00::/7".parse().unwrap();
            // Link-local fe80::/10
            let link_local: Ipv6Net = "fe80::/10".parse().unwrap();

            unique_local.contains(ip) || link_local.contains(ip)
        }
    }
}

/// Fetch a resource from the given URL.
///
/// Fails on any network error, timeout, or non-2xx response. No retries.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    opts: &FetchOptions,
) -> Result<FetchResult, AnalyzeError> {
    // Validate URL is non-empty
    if url.is_empty() {
        return Err(AnalyzeError::invalid_url(url, "Fetch", None));
    }

    // Parse and validate URL
    let parsed_url = url::Url::parse(url).map_err(|e| {
        AnalyzeError::invalid_url(url, "Fetch", Some(anyhow::anyhow!("invalid URL: {}", e)))
    })?;

    // Check scheme
    let scheme = parsed_url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(AnalyzeError::invalid_url(
            url,
            "Fetch",
            Some(anyhow::anyhow!("scheme must be http or https")),
        ));
    }

    // Check for private IP if not allowed
    if !opts.allow_private_networks {
        if let Some(host) = parsed_url.host_str() {
            // Try to parse as IP address
            if let Ok(ip) = host.parse::<IpAddr>() {
                if is_private_ip(&ip) {
                    return Err(AnalyzeError::ssrf(
                        url,
                        "Fetch",
                        Some(anyhow::anyhow!("private IP addresses are not allowed")),
                    ));
                }
            } else {
                // Host is a hostname, resolve it and check all addresses
                let port = parsed_url
                    .port()
                    .unwrap_or(if scheme == "https" { 443 } else { 80 });
                let addrs = tokio::net::lookup_host((host, port)).await.map_err(|e| {
                    AnalyzeError::fetch(
                        url,
                        "Fetch",
                        Some(anyhow::anyhow!("DNS lookup failed: {}", e)),
                    )
                })?;

                for socket_addr in addrs {
                    if is_private_ip(&socket_addr.ip()) {
                        return Err(AnalyzeError::ssrf(
                            url,
                            "Fetch",
                            Some(anyhow::anyhow!("private IP addresses are not allowed")),
                        ));
                    }
                }
            }
        }
    }

    // Build request
    let mut request = client.get(url);
    for (key, value) in &opts.headers {
        request = request.header(key, value);
    }

    // Send request
    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            AnalyzeError::timeout(url, "Fetch", Some(anyhow::anyhow!("request timed out: {}", e)))
        } else {
            AnalyzeError::fetch(url, "Fetch", Some(anyhow::anyhow!("request failed: {}", e)))
        }
    })?;

    // SSRF check after redirect: verify the final URL doesn't resolve to a private IP
    if !opts.allow_private_networks {
        let final_url_ref = response.url();
        if let Some(host) = final_url_ref.host_str() {
            if let Ok(ip) = host.parse::<IpAddr>() {
                if is_private_ip(&ip) {
                    return Err(AnalyzeError::ssrf(
                        url,
                        "Fetch",
                        Some(anyhow::anyhow!(
                            "redirect to private IP address is not allowed"
                        )),
                    ));
                }
            } else {
                let port = final_url_ref
                    .port()
                    .unwrap_or(if final_url_ref.scheme() == "https" {
                        443
                    } else {
                        80
                    });
                let addrs = tokio::net::lookup_host((host, port)).await.map_err(|e| {
                    AnalyzeError::fetch(
                        url,
                        "Fetch",
                        Some(anyhow::anyhow!(
                            "DNS lookup failed for redirect target: {}",
                            e
                        )),
                    )
                })?;

                for socket_addr in addrs {
                    if is_private_ip(&socket_addr.ip()) {
                        return Err(AnalyzeError::ssrf(
                            url,
                            "Fetch",
                            Some(anyhow::anyhow!(
                                "redirect to private IP address is not allowed"
                            )),
                        ));
                    }
                }
            }
        }
    }

    // Check Content-Length header before reading body
    let content_length = response.content_length().or_else(|| {
        response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
    });

    if let Some(len) = content_length {
        if len as usize > MAX_CONTENT_LENGTH {
            return Err(AnalyzeError::fetch(
                url,
                "Fetch",
                Some(anyhow::anyhow!("content too large")),
            ));
        }
    }

    // Capture response metadata before consuming the response
    let status = response.status().as_u16();
    let is_success = response.status().is_success();
    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_lowercase());

    // Read body bytes
    let body = response.bytes().await.map_err(|e| {
        AnalyzeError::fetch(
            url,
            "Fetch",
            Some(anyhow::anyhow!("failed to read body: {}", e)),
        )
    })?;

    // Check body size
    if body.len() > MAX_CONTENT_LENGTH {
        return Err(AnalyzeError::fetch(
            url,
            "Fetch",
            Some(anyhow::anyhow!("content too large")),
        ));
    }

    // Any non-2xx status is a failure
    if !is_success {
        return Err(AnalyzeError::fetch(
            url,
            "Fetch",
            Some(anyhow::anyhow!("HTTP status {}", status)),
        ));
    }

    Ok(FetchResult {
        status,
        url: url.to_string(),
        final_url,
        content_type,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn create_test_client() -> reqwest::Client {
        reqwest::Client::builder()
            .user_agent("test-agent")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn fetch_ok_utf8() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/test");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body("hello");
        });

        let client = create_test_client();
        let opts = FetchOptions {
            allow_private_networks: true,
            ..Default::default()
        };

        let result = fetch(&client, &server.url("/test"), &opts).await;
        mock.assert();

        let result = result.expect("fetch should succeed");
        assert_eq!(result.status, 200);
        assert_eq!(result.text_utf8().unwrap(), "hello");
    }

    #[tokio::test]
    async fn fetch_non_2xx_rejected() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/notfound");
            then.status(404).body("not found");
        });

        let client = create_test_client();
        let opts = FetchOptions {
            allow_private_networks: true,
            ..Default::default()
        };

        let result = fetch(&client, &server.url("/notfound"), &opts).await;
        mock.assert();

        let err = result.expect_err("should fail on 404");
        assert!(err.is_fetch());
    }

    #[tokio::test]
    async fn fetch_accepts_other_2xx_statuses() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/created");
            then.status(201).body("<p>made</p>");
        });

        let client = create_test_client();
        let opts = FetchOptions {
            allow_private_networks: true,
            ..Default::default()
        };

        let result = fetch(&client, &server.url("/created"), &opts).await;
        mock.assert();

        let result = result.expect("2xx should succeed");
        assert_eq!(result.status, 201);
    }

    #[tokio::test]
    async fn invalid_utf8_body_is_decode_error() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/latin1");
            // 0xE9 is e-acute in ISO-8859-1 and invalid as a UTF-8 sequence
            then.status(200)
                .header("content-type", "text/html; charset=iso-8859-1")
                .body(vec![0x63, 0x61, 0x66, 0xE9]);
        });

        let client = create_test_client();
        let opts = FetchOptions {
            allow_private_networks: true,
            ..Default::default()
        };

        let result = fetch(&client, &server.url("/latin1"), &opts)
            .await
            .expect("fetch itself should succeed");
        mock.assert();

        let err = result.text_utf8().expect_err("decode should fail");
        assert!(err.is_decode());
    }

    #[tokio::test]
    async fn private_ip_blocked_by_default() {
        let server = MockServer::start();
        // No mock needed - the SSRF check fails before the request

        let client = create_test_client();
        let opts = FetchOptions::default();

        let url = format!("http://127.0.0.1:{}/test", server.port());
        let result = fetch(&client, &url, &opts).await;

        let err = result.expect_err("should fail on private IP");
        assert!(err.is_ssrf());
    }

    #[tokio::test]
    async fn rejects_non_http_scheme() {
        let client = create_test_client();
        let opts = FetchOptions::default();

        let err = fetch(&client, "ftp://example.com/file", &opts)
            .await
            .expect_err("ftp should be rejected");
        assert!(err.is_invalid_url());
    }

    #[tokio::test]
    async fn rejects_empty_url() {
        let client = create_test_client();
        let opts = FetchOptions::default();

        let err = fetch(&client, "", &opts).await.expect_err("empty URL");
        assert!(err.is_invalid_url());
    }

    #[test]
    fn is_private_ip_v4() {
        assert!(is_private_ip(&"10.0.0.1".parse().unwrap()));
        assert!(is_private_ip(&"172.16.0.1".parse().unwrap()));
        assert!(is_private_ip(&"192.168.0.1".parse().unwrap()));
        assert!(is_private_ip(&"127.0.0.1".parse().unwrap()));
        assert!(is_private_ip(&"169.254.0.1".parse().unwrap()));

        assert!(!is_private_ip(&"8.8.8.8".parse().unwrap()));
        assert!(!is_private_ip(&"1.1.1.1".parse().unwrap()));
        assert!(!is_private_ip(&"172.32.0.1".parse().unwrap())); // Outside 172.16/12
    }

    #[test]
    fn is_private_ip_v6() {
        assert!(is_private_ip(&"::1".parse().unwrap()));
        assert!(is_private_ip(&"fc00::1".parse().unwrap()));
        assert!(is_private_ip(&"fe80::1".parse().unwrap()));

        assert!(!is_private_ip(&"2001:4860:4860::8888".parse().unwrap()));
    }
}
