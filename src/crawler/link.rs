use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use url::Url;

/// A URL as it was written on the page.
///
/// Two links are the same only if their text is identical: `https://a.com/x/../y`,
/// `https://A.com/y` and `https://a.com:443/y` are three different links even though
/// they parse to the same `Url`. The parsed form is kept for fetching.
#[derive(Clone)]
pub struct Link {
    raw: String,
    url: Url,
}

impl Link {
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(raw)?;
        Ok(Self {
            raw: raw.to_string(),
            url,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed form, used to make the request
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Host exactly as written, without user info or port. Empty when there is none.
    pub fn host(&self) -> &str {
        raw_host(&self.raw)
    }
}

fn raw_host(raw: &str) -> &str {
    let Some((_, rest)) = raw.split_once("://") else {
        return "";
    };
    let authority = rest.split(['/', '?', '#']).next().unwrap_or("");
    let host_and_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);

    if host_and_port.starts_with('[') {
        // IPv6 literal, the port follows the closing bracket
        return match host_and_port.find(']') {
            Some(end) => &host_and_port[..=end],
            None => host_and_port,
        };
    }
    host_and_port.split(':').next().unwrap_or("")
}

impl PartialEq for Link {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Link {}

impl Hash for Link {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl PartialOrd for Link {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Link {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.raw)
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::Link;
    use std::collections::HashSet;

    fn link(raw: &str) -> Link {
        Link::parse(raw).unwrap()
    }

    #[test]
    fn test_identity_is_the_written_text() {
        let variants = [
            "https://somewebsite.com/b",
            "https://somewebsite.com/a/../b",
            "https://somewebsite.com:443/b",
            "https://SOMEWEBSITE.com/b",
            "https://somewebsite.com/b/",
        ];
        let links: HashSet<Link> = variants.iter().map(|raw| link(raw)).collect();

        assert_eq!(links.len(), variants.len());
        // while the first four still point at the same resource
        let parsed: HashSet<_> = variants[..4].iter().map(|raw| link(raw).url().clone()).collect();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_text_is_not_rewritten() {
        assert_eq!(link("https://somewebsite.com").to_string(), "https://somewebsite.com");
        assert_eq!(link("https://somewebsite.com").url().as_str(), "https://somewebsite.com/");
    }

    #[test]
    fn test_host_keeps_case() {
        assert_eq!(link("https://SomeWebsite.com/x").host(), "SomeWebsite.com");
    }

    #[test]
    fn test_host_without_user_info_and_port() {
        assert_eq!(link("https://user:pw@site.com:8443/p?q=1").host(), "site.com");
        assert_eq!(link("http://localhost:8080").host(), "localhost");
        assert_eq!(link("https://site.com?q=a@b").host(), "site.com");
        assert_eq!(link("http://[::1]:3000/x").host(), "[::1]");
    }

    #[test]
    fn test_host_missing() {
        assert_eq!(link("file:///etc/passwd").host(), "");
        assert_eq!(link("mailto:someone@site.com").host(), "");
    }

    #[test]
    fn test_invalid_text_rejected() {
        assert!(Link::parse("http://:80").is_err());
        assert!(Link::parse("somewebsite.com").is_err());
    }
}
