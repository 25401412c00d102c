use crate::db;
use axum::http::HeaderMap;
use sqlx::SqlitePool;
use std::net::SocketAddr;
use woothee::parser::Parser;

/// Label recorded when the user agent doesn't tell us anything.
pub const UNKNOWN_LABEL: &str = "Other";

/// Device / OS / browser family labels for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub device: String,
    pub os: String,
    pub browser: String,
}

impl ClientInfo {
    fn unknown() -> Self {
        Self {
            device: UNKNOWN_LABEL.to_owned(),
            os: UNKNOWN_LABEL.to_owned(),
            browser: UNKNOWN_LABEL.to_owned(),
        }
    }
}

/// Parse a User-Agent string using woothee.
pub fn parse_user_agent(ua: &str) -> ClientInfo {
    if ua.trim().is_empty() {
        return ClientInfo::unknown();
    }

    match Parser::new().parse(ua) {
        Some(result) => ClientInfo {
            device: label(result.category),
            os: label(result.os),
            browser: label(result.name),
        },
        None => ClientInfo::unknown(),
    }
}

fn label(value: &str) -> String {
    if value.is_empty() || value == "UNKNOWN" {
        UNKNOWN_LABEL.to_owned()
    } else {
        value.to_owned()
    }
}

/// Strip a trailing port from a remote address (`1.2.3.4:5678`, `[::1]:80`).
/// Anything that isn't a socket address is returned as-is.
pub fn client_ip(remote: &str) -> String {
    match remote.parse::<SocketAddr>() {
        Ok(addr) => addr.ip().to_string(),
        Err(_) => remote.to_owned(),
    }
}

/// Client IP for a request. With `trust_proxy_headers` set, the left-most
/// `X-Forwarded-For` hop wins, then `X-Real-IP`, then the socket peer.
pub fn resolve_ip(headers: &HeaderMap, addr: SocketAddr, trust_proxy_headers: bool) -> String {
    let forwarded = trust_proxy_headers
        .then(|| {
            header_str(headers, "x-forwarded-for")
                .and_then(|hops| hops.split(',').next())
                .or_else(|| header_str(headers, "x-real-ip"))
        })
        .flatten()
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    match forwarded {
        Some(ip) => client_ip(ip),
        None => client_ip(&addr.to_string()),
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Record a visit against `url_id`. Failures are logged and swallowed so the
/// redirect always goes out.
pub async fn track_visit(pool: &SqlitePool, url_id: i64, user_agent: &str, ip: &str) {
    let client = parse_user_agent(user_agent);
    if let Err(e) = db::track_hit(pool, url_id, &client.device, &client.os, &client.browser, ip).await {
        tracing::warn!("Error tracking hit for url {}: {:?}", url_id, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const FIREFOX_LINUX: &str =
        "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0";

    #[test]
    fn strips_port_from_ipv4() {
        assert_eq!(client_ip("203.0.113.7:54321"), "203.0.113.7");
    }

    #[test]
    fn strips_port_from_ipv6() {
        assert_eq!(client_ip("[2001:db8::1]:8080"), "2001:db8::1");
    }

    #[test]
    fn bare_address_is_unchanged() {
        assert_eq!(client_ip("203.0.113.7"), "203.0.113.7");
        assert_eq!(client_ip("2001:db8::1"), "2001:db8::1");
    }

    #[test]
    fn parses_desktop_firefox() {
        let info = parse_user_agent(FIREFOX_LINUX);
        assert_eq!(info.browser, "Firefox");
        assert_eq!(info.os, "Linux");
        assert_eq!(info.device, "pc");
    }

    #[test]
    fn empty_user_agent_is_other() {
        assert_eq!(parse_user_agent(""), ClientInfo::unknown());
    }

    #[test]
    fn gibberish_user_agent_is_other() {
        let info = parse_user_agent("definitely-not-a-browser");
        assert_eq!(info.browser, UNKNOWN_LABEL);
        assert_eq!(info.os, UNKNOWN_LABEL);
    }

    #[test]
    fn proxy_headers_ignored_unless_trusted() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("198.51.100.1, 10.0.0.1"));
        let addr: SocketAddr = "127.0.0.1:40000".parse().unwrap();

        assert_eq!(resolve_ip(&headers, addr, false), "127.0.0.1");
        assert_eq!(resolve_ip(&headers, addr, true), "198.51.100.1");
    }

    #[test]
    fn real_ip_used_when_no_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.9"));
        let addr: SocketAddr = "127.0.0.1:40000".parse().unwrap();

        assert_eq!(resolve_ip(&headers, addr, true), "198.51.100.9");
    }
}
