use linstor_proto::consts;

use crate::error::LinstorError;

/// A resolved connect target (§4.G step 1, §2 Controller URI).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerUri {
    pub tls: bool,
    pub host: String,
    pub port: u16,
}

/// Parses `plain-controller://host[:port]` or `tls-controller://host[:port]`
/// (§6 External interfaces).
///
/// No general-purpose URL crate is used here: the scheme set is fixed and
/// small, and the authority is a plain `host[:port]` or bracketed-IPv6
/// pair, which `linstor_utils::split_host_port` already handles.
pub fn parse(uri: &str) -> Result<ControllerUri, LinstorError> {
    let (scheme, authority) = uri
        .split_once("://")
        .ok_or_else(|| LinstorError::Config(format!("missing scheme in {uri:?}")))?;

    let tls = match scheme {
        "plain-controller" => false,
        "tls-controller" => true,
        other => return Err(LinstorError::Config(format!("unsupported scheme {other:?}"))),
    };

    if authority.is_empty() {
        return Err(LinstorError::Config(format!("missing host in {uri:?}")));
    }

    let (host, port) = linstor_utils::split_host_port(authority);
    if host.is_empty() {
        return Err(LinstorError::Config(format!("missing host in {uri:?}")));
    }

    let port = port.unwrap_or(if tls { consts::DFLT_CTRL_PORT_SSL } else { consts::DFLT_CTRL_PORT_PLAIN });

    Ok(ControllerUri { tls, host, port })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_with_default_port() {
        let uri = parse("plain-controller://ctrl.example.com").unwrap();
        assert_eq!(uri, ControllerUri { tls: false, host: "ctrl.example.com".into(), port: 3376 });
    }

    #[test]
    fn ssl_with_default_port() {
        let uri = parse("tls-controller://ctrl.example.com").unwrap();
        assert_eq!(uri, ControllerUri { tls: true, host: "ctrl.example.com".into(), port: 3377 });
    }

    #[test]
    fn explicit_port_overrides_default() {
        let uri = parse("plain-controller://ctrl.example.com:9999").unwrap();
        assert_eq!(uri.port, 9999);
    }

    #[test]
    fn ipv6_authority() {
        let uri = parse("plain-controller://[::1]:3376").unwrap();
        assert_eq!(uri.host, "::1");
        assert_eq!(uri.port, 3376);
    }

    #[test]
    fn rejects_unknown_scheme() {
        assert!(parse("http://ctrl.example.com").is_err());
    }

    #[test]
    fn rejects_missing_scheme() {
        assert!(parse("ctrl.example.com").is_err());
    }

    #[test]
    fn rejects_empty_host() {
        assert!(parse("plain-controller://").is_err());
    }
}
