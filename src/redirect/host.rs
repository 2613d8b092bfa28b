//! Host and port string handling.

/// Split `host:port` into its parts.
///
/// Bracketed IPv6 literals (`[::1]:8080`) yield the address without brackets.
/// Returns `None` when the input has no port separator, or when an
/// unbracketed host contains more than one colon (a bare IPv6 literal).
/// An empty port (`host:`) is accepted.
pub fn split_host_port(hostport: &str) -> Option<(&str, &str)> {
    let last_colon = hostport.rfind(':')?;

    let host = if let Some(rest) = hostport.strip_prefix('[') {
        let close = rest.find(']')? + 1;
        // The closing bracket must sit directly before the port separator.
        if close + 1 != last_colon {
            return None;
        }
        let inner = &hostport[1..close];
        if inner.contains('[') || inner.contains(']') {
            return None;
        }
        inner
    } else {
        let host = &hostport[..last_colon];
        if host.contains(':') || host.contains('[') || host.contains(']') {
            return None;
        }
        host
    };

    let port = &hostport[last_colon + 1..];
    if port.contains('[') || port.contains(']') {
        return None;
    }

    Some((host, port))
}

/// First dot-delimited label of a Host value, with any port removed.
///
/// `test.example.com` → `test`, `localhost:8080` → `localhost`.
/// A leaf with a colon that isn't a host:port pair yields an empty label.
pub fn leaf_label(host: &str) -> &str {
    let leaf = host.split_once('.').map_or(host, |(leaf, _)| leaf);
    if leaf.contains(':') {
        return split_host_port(leaf).map_or("", |(host, _)| host);
    }
    leaf
}
