use actix_web::{dev::ServiceRequest, http::header::HeaderMap, HttpRequest};
use std::net::SocketAddr;

const UNKNOWN_CLIENT: &str = "unknown";

/// Extract the client's IP address from the request, considering X-Forwarded-For if trusted
/// `trust_x_forwarded_for`: whether to trust the X-Forwarded-For header
pub fn get_client_ip(req: &HttpRequest, trust_x_forwarded_for: bool) -> String {
    client_ip_from_parts(req.headers(), req.peer_addr(), trust_x_forwarded_for)
}

/// Same as [`get_client_ip`] for requests seen by middleware.
pub fn get_service_client_ip(req: &ServiceRequest, trust_x_forwarded_for: bool) -> String {
    client_ip_from_parts(req.headers(), req.peer_addr(), trust_x_forwarded_for)
}

fn client_ip_from_parts(
    headers: &HeaderMap,
    peer_addr: Option<SocketAddr>,
    trust_x_forwarded_for: bool,
) -> String {
    if trust_x_forwarded_for {
        if let Some(forwarded) = headers.get("x-forwarded-for") {
            if let Ok(s) = forwarded.to_str() {
                let first = s.split(',').next().unwrap_or("").trim();
                if !first.is_empty() {
                    return first.to_string();
                }
            }
        }
    }
    peer_addr
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn uses_first_forwarded_hop_when_trusted() {
        let req = TestRequest::default()
            .insert_header(("x-forwarded-for", "203.0.113.7, 10.0.0.1"))
            .peer_addr("10.0.0.1:4000".parse().unwrap())
            .to_http_request();

        assert_eq!(get_client_ip(&req, true), "203.0.113.7");
    }

    #[test]
    fn ignores_forwarded_header_when_untrusted() {
        let req = TestRequest::default()
            .insert_header(("x-forwarded-for", "203.0.113.7"))
            .peer_addr("10.0.0.1:4000".parse().unwrap())
            .to_http_request();

        assert_eq!(get_client_ip(&req, false), "10.0.0.1");
    }

    #[test]
    fn falls_back_to_unknown_without_peer() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(get_client_ip(&req, true), "unknown");
    }
}
