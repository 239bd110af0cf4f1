use actix_web::HttpRequest;

/// Caller id used when the request carries no address at all
pub const UNKNOWN_CALLER: &str = "unknown";

/// Resolve the rate-limit key for a request
///
/// First entry of `X-Forwarded-For`, then `X-Real-IP`, then the socket
/// peer address.
pub fn client_ip(req: &HttpRequest) -> String {
    if let Some(first) = header_value(req, "x-forwarded-for")
        .and_then(|forwarded| forwarded.split(',').next())
        .map(str::trim)
        .filter(|first| !first.is_empty())
    {
        return first.to_string();
    }

    if let Some(real_ip) = header_value(req, "x-real-ip") {
        return real_ip.to_string();
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CALLER.to_string())
}

/// Non-empty, trimmed header value
fn header_value<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
