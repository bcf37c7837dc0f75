/**
 * Router
 * Maps a normalized path to the page that renders it
 */
use url::Url;

use crate::content::SiteContext;
use crate::path::normalize_path;

/// Page states the site can be in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    BlogListing,
    Category(String),
    Post(String),
    Admin,
    StaticPage(String),
    NotFound,
}

impl Route {
    /// Dispatch a normalized path. Unknown ids resolve to `NotFound`.
    pub fn resolve(path: &str, site: &SiteContext) -> Route {
        match path {
            "/" | "/index.html" => return Route::Home,
            "/blog" => return Route::BlogListing,
            "/admin" => return Route::Admin,
            _ => {}
        }

        if path.starts_with("/category/") {
            let id = last_segment(path);
            return match site.category(id) {
                Some(_) => Route::Category(id.to_string()),
                None => Route::NotFound,
            };
        }

        if path.starts_with("/post/") {
            let id = last_segment(path);
            return match site.post(id) {
                Some(_) => Route::Post(id.to_string()),
                None => Route::NotFound,
            };
        }

        match path.strip_prefix('/') {
            Some(key) if site.page(key).is_some() => Route::StaticPage(key.to_string()),
            _ => Route::NotFound,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Route::NotFound)
    }
}

fn last_segment(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or_default()
}

/// Path the visitor is looking at.
///
/// File-based previews cannot use real paths, so the intended path travels
/// in the `p` query parameter. Over HTTP the same parameter is honored on
/// the root document so links exported for file hosting keep working.
pub fn location_path(location: &Url, site: &Url) -> String {
    let from_query = location.scheme() == "file" || matches!(location.path(), "/" | "/index.html");
    if from_query {
        let requested = location
            .query_pairs()
            .find(|(key, _)| key == "p")
            .map(|(_, value)| value.into_owned());
        match requested {
            Some(p) => return normalize_path(&p, location, site),
            None if location.scheme() == "file" => return "/".to_string(),
            None => {}
        }
    }
    normalize_path(location.as_str(), location, site)
}

/// Where following an href leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// A site path, handled without a full reload.
    Internal(String),
    /// Somewhere else; navigate normally.
    External(String),
}

pub fn link_target(href: &str, site: &SiteContext) -> LinkTarget {
    let path = site.normalize(href);
    if path.starts_with('/') {
        LinkTarget::Internal(path)
    } else {
        LinkTarget::External(href.to_string())
    }
}

/// Whether a nav link pointing at `href_path` is highlighted on `current`.
///
/// Posts highlight the blog entry; categories highlight their own entry.
pub fn is_nav_active(href_path: &str, current: &str) -> bool {
    if current.starts_with("/category/") {
        return href_path == format!("/category/{}", last_segment(current));
    }
    if current.starts_with("/post/") {
        return href_path == "/blog";
    }
    href_path == current
}
