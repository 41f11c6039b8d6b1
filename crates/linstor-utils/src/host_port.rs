/// Splits a `host[:port]` or `[ipv6]:port` authority into its host and an
/// optional port.
///
/// Port defaults are scheme-dependent and are resolved by the caller; this
/// function only knows how to split the authority string itself.
pub fn split_host_port(authority: &str) -> (String, Option<u16>) {
    if let Some(bracket_end) = authority.strip_prefix('[').and_then(|rest| rest.find(']')) {
        let host = &authority[1..=bracket_end];
        let rest = &authority[bracket_end + 2..];
        let port = rest.strip_prefix(':').and_then(|p| p.parse().ok());
        return (host.to_string(), port);
    }

    match authority.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() && port.chars().all(|c| c.is_ascii_digit()) => {
            (host.to_string(), port.parse().ok())
        }
        _ => (authority.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::split_host_port;

    #[test]
    fn host_only() {
        assert_eq!(split_host_port("controller.example"), ("controller.example".to_string(), None));
    }

    #[test]
    fn host_and_port() {
        assert_eq!(split_host_port("controller.example:3377"), ("controller.example".to_string(), Some(3377)));
    }

    #[test]
    fn ipv6_with_port() {
        assert_eq!(split_host_port("[::1]:3376"), ("::1".to_string(), Some(3376)));
    }

    #[test]
    fn ipv6_without_port() {
        assert_eq!(split_host_port("[::1]"), ("::1".to_string(), None));
    }
}
