//! Classification of tag library URIs and locations

/// The three kinds of URI a taglib directive or declaration may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UriType {
    /// Contains a scheme separator (`urn:acme`, `http://...`, `file:/...`).
    Absolute,
    /// Starts with `/` and is resolved against the application root.
    RootRelative,
    /// Neither; resolved against `/WEB-INF/`.
    Relative,
}

/// Classify a URI string.
pub fn uri_type(uri: &str) -> UriType {
    if uri.contains(':') {
        UriType::Absolute
    } else if uri.starts_with('/') {
        UriType::RootRelative
    } else {
        UriType::Relative
    }
}

/// Last path component of an archive reference (`file:/a/b/c.jar` -> `c.jar`).
pub fn basename(location: &str) -> &str {
    match location.rfind('/') {
        Some(slash) => &location[slash + 1..],
        None => location,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_type() {
        assert_eq!(uri_type("urn:acme:tags"), UriType::Absolute);
        assert_eq!(uri_type("http://java.sun.com/jsp/jstl/core"), UriType::Absolute);
        assert_eq!(uri_type("/WEB-INF/acme.tld"), UriType::RootRelative);
        assert_eq!(uri_type("lib/acme.jar"), UriType::Relative);
        assert_eq!(uri_type(""), UriType::Relative);
    }

    #[test]
    fn test_scheme_wins_over_leading_slash() {
        assert_eq!(uri_type("/c:/tags.tld"), UriType::Absolute);
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("file:/opt/shared/lib/catalina.jar"), "catalina.jar");
        assert_eq!(basename("catalina.jar"), "catalina.jar");
        assert_eq!(basename("/opt/lib/"), "");
    }
}
