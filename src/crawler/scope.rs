use super::link::Link;

/// Whether `candidate` belongs to the site rooted at `base`.
///
/// A candidate host is in scope when it starts with the base host or is a
/// subdomain of it, ie. `(bbc.com, www.bbc.com)` is in scope and so is
/// `(bbc.com, bbc.com.evil.net)`, but `(bbc.com, myfakesitebbc.com)` is not.
/// Hosts are compared as written, case included. Scheme and port are ignored.
pub fn in_scope(base: &Link, candidate: &Link) -> bool {
    let base_host = base.host();
    let candidate_host = candidate.host();

    candidate_host.starts_with(base_host) || candidate_host.ends_with(&format!(".{}", base_host))
}

#[cfg(test)]
mod tests {
    use super::in_scope;
    use crate::crawler::link::Link;

    fn scoped(base: &str, candidate: &str) -> bool {
        in_scope(&Link::parse(base).unwrap(), &Link::parse(candidate).unwrap())
    }

    #[test]
    fn test_same_host() {
        assert!(scoped("https://somewebsite.com", "https://somewebsite.com/otherpage"));
    }

    #[test]
    fn test_subdomain() {
        assert!(scoped("https://bbc.com", "https://www.bbc.com/news"));
        assert!(scoped("https://bbc.com", "https://a.b.bbc.com"));
    }

    #[test]
    fn test_different_host() {
        assert!(!scoped("https://somewebsite.com", "http://www.notsomewebsite.com?q=12234"));
        assert!(!scoped("https://bbc.com", "https://myfakesitebbc.com"));
    }

    #[test]
    fn test_scheme_and_port_ignored() {
        assert!(scoped("https://somewebsite.com", "ftp://somewebsite.com:2121/file"));
        assert!(scoped("http://127.0.0.1:4000", "http://127.0.0.1:5000/page"));
        assert!(scoped("https://somewebsite.com", "https://user@somewebsite.com:443/b"));
    }

    #[test]
    fn test_host_case_is_significant() {
        assert!(!scoped("https://somewebsite.com", "https://SomeWebsite.com/x"));
        assert!(!scoped("https://SomeWebsite.com", "https://somewebsite.com/x"));
        assert!(scoped("https://SomeWebsite.com", "https://www.SomeWebsite.com/x"));
    }

    /// Host prefix match is loose: any host that merely starts with the base host counts.
    #[test]
    fn test_prefix_match_is_loose() {
        assert!(scoped("https://somewebsite.com", "https://somewebsite.com.evil.net"));
        assert!(scoped("https://somewebsite.co", "https://somewebsite.com"));
    }

    #[test]
    fn test_candidate_without_host_out_of_scope() {
        assert!(!scoped("https://somewebsite.com", "file:///etc/passwd"));
    }
}
