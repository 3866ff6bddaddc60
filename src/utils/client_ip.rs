//! 客户端 IP 解析

use actix_web::HttpRequest;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, UdpSocket};

const FALLBACK_IP: &str = "127.0.0.1";

/// 请求来源 IP：优先 `X-Forwarded-For` 第一项，其次对端地址。
/// 回环地址替换为本机局域网地址，便于在本机测试时匹配 WiFi 白名单。
pub fn client_ip(req: &HttpRequest) -> String {
    let forwarded = req
        .headers()
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok());
    let peer = req.peer_addr().map(|addr| addr.ip().to_string());
    resolve_client_ip(forwarded, peer.as_deref(), lan_ip)
}

fn resolve_client_ip(
    forwarded_for: Option<&str>,
    peer: Option<&str>,
    lan: impl FnOnce() -> Option<String>,
) -> String {
    let ip = forwarded_for
        .and_then(|raw| raw.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or(peer)
        .unwrap_or(FALLBACK_IP)
        .to_string();

    if is_loopback(&ip) {
        lan().unwrap_or_else(|| FALLBACK_IP.to_string())
    } else {
        ip
    }
}

/// 只认 `127.0.0.1` 与 `::1`，其余 127.0.0.0/8 地址原样保留
fn is_loopback(ip: &str) -> bool {
    match ip.parse::<IpAddr>() {
        Ok(IpAddr::V4(v4)) => v4 == Ipv4Addr::LOCALHOST,
        Ok(IpAddr::V6(v6)) => v6 == Ipv6Addr::LOCALHOST,
        Err(_) => false,
    }
}

/// 通过 UDP "连接"公网地址获取出口网卡地址，不会真正发送数据
fn lan_ip() -> Option<String> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;
    socket.local_addr().ok().map(|addr| addr.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_lan() -> Option<String> {
        None
    }

    #[test]
    fn test_forwarded_for_first_entry_wins() {
        let ip = resolve_client_ip(Some("203.0.113.5, 10.0.0.1"), Some("10.0.0.9"), no_lan);
        assert_eq!(ip, "203.0.113.5");
    }

    #[test]
    fn test_peer_used_without_header() {
        assert_eq!(resolve_client_ip(None, Some("192.168.1.20"), no_lan), "192.168.1.20");
        assert_eq!(resolve_client_ip(Some("  "), Some("192.168.1.20"), no_lan), "192.168.1.20");
    }

    #[test]
    fn test_loopback_replaced_with_lan() {
        let ip = resolve_client_ip(None, Some("127.0.0.1"), || Some("192.168.0.7".into()));
        assert_eq!(ip, "192.168.0.7");
        let ip = resolve_client_ip(Some("::1"), None, || Some("192.168.0.7".into()));
        assert_eq!(ip, "192.168.0.7");
    }

    #[test]
    fn test_loopback_without_lan_falls_back() {
        assert_eq!(resolve_client_ip(None, Some("127.0.0.1"), no_lan), "127.0.0.1");
        assert_eq!(resolve_client_ip(None, None, no_lan), "127.0.0.1");
    }

    #[test]
    fn test_only_canonical_loopback_replaced() {
        let lan = || Some("192.168.0.7".to_string());
        assert_eq!(resolve_client_ip(None, Some("127.0.0.2"), lan), "127.0.0.2");
        assert_eq!(resolve_client_ip(Some("0:0:0:0:0:0:0:1"), None, lan), "192.168.0.7");
    }
}
