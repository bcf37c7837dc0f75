/**
 * Path Normalizer
 * Canonical site paths from hrefs, absolute URLs and raw paths
 */
use url::Url;

/// Normalize `input` to a canonical site path.
///
/// The result starts with `/` and has no trailing slash (except the root),
/// with any `index.html` suffix removed. Inputs that point off-site come
/// back unchanged so callers can treat them as external destinations.
pub fn normalize_path(input: &str, base: &Url, site: &Url) -> String {
    if input.is_empty() {
        return "/".to_string();
    }

    if let Ok(url) = base.join(input) {
        if is_internal(&url, site) {
            return canonical_pathname(url.path());
        }
    }

    if input.starts_with('/') {
        return trim_trailing_slashes(input);
    }
    input.to_string()
}

/// Whether `url` belongs to this site.
///
/// The canonical host matches with or without a leading `www.`;
/// `localhost` and `file:` URLs are always treated as local previews.
pub fn is_internal(url: &Url, site: &Url) -> bool {
    if url.scheme() == "file" {
        return true;
    }
    let Some(host) = url.host_str() else {
        return false;
    };
    if host == "localhost" {
        return true;
    }
    let site_host = site.host_str().unwrap_or_default();
    strip_www(host) == strip_www(site_host)
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// Strip trailing slashes and `index.html` segments until neither remains.
fn canonical_pathname(pathname: &str) -> String {
    let mut path = pathname.trim_end_matches('/');
    while let Some(stripped) = path.strip_suffix("index.html") {
        path = stripped.trim_end_matches('/');
    }
    trim_trailing_slashes(path)
}

fn trim_trailing_slashes(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> Url {
        Url::parse("https://www.goinsurancenews.com").unwrap()
    }

    fn normalize(input: &str) -> String {
        normalize_path(input, &site(), &site())
    }

    #[test]
    fn test_absolute_site_url_with_trailing_slash() {
        assert_eq!(normalize("https://www.goinsurancenews.com/blog/"), "/blog");
    }

    #[test]
    fn test_relative_path_with_trailing_slash() {
        assert_eq!(normalize("/category/health/"), "/category/health");
    }

    #[test]
    fn test_root_variants() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("/index.html"), "/");
        assert_eq!(normalize("https://goinsurancenews.com"), "/");
    }

    #[test]
    fn test_index_html_suffix_is_stripped() {
        assert_eq!(normalize("/blog/index.html"), "/blog");
        assert_eq!(normalize("/blog/index.html/"), "/blog");
    }

    #[test]
    fn test_stacked_index_html_suffixes_collapse_in_one_pass() {
        assert_eq!(normalize("/blog/index.html/index.html"), "/blog");
        assert_eq!(normalize("/index.html/index.html/"), "/");
        assert_eq!(normalize("/post/a//index.html//"), "/post/a");
    }

    #[test]
    fn test_host_matches_without_www() {
        assert_eq!(normalize("https://goinsurancenews.com/post/a"), "/post/a");
        assert_eq!(normalize("http://localhost:8080/about/"), "/about");
    }

    #[test]
    fn test_query_and_fragment_are_dropped_for_internal_urls() {
        assert_eq!(normalize("/blog?q=term#top"), "/blog");
    }

    #[test]
    fn test_external_url_is_returned_unchanged() {
        assert_eq!(normalize("https://www.irs.gov/forms/"), "https://www.irs.gov/forms/");
        assert_eq!(normalize("mailto:editor@example.com"), "mailto:editor@example.com");
    }

    #[test]
    fn test_file_urls_are_internal() {
        let base = Url::parse("file:///home/user/site/index.html").unwrap();
        assert_eq!(normalize_path("/post/a/", &base, &site()), "/post/a");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "",
            "/",
            "/blog/",
            "/blog//",
            "/category/health/",
            "/a/index.html/",
            "/blog/index.html/index.html",
            "/index.html/index.html/",
            "https://www.goinsurancenews.com/post/x/index.html/index.html",
            "https://www.goinsurancenews.com/post/x/",
            "https://example.org/elsewhere",
            "relative/path",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input {:?}", input);
        }
    }
}
