//! Views - pure functions from site content to HTML fragments.
//!
//! Nothing here touches the network or the filesystem; [`render`] produces
//! the hero and content regions plus the page metadata, and
//! [`layout::document`] wraps them into the final document.

pub mod admin;
pub mod components;
pub mod layout;
pub mod meta;
pub mod pages;

use crate::content::{models::parse_date, SiteContext};
use crate::router::Route;
use crate::session::Session;

pub use meta::PageMeta;

/// Everything a render needs besides the site content.
#[derive(Debug, Clone)]
pub struct ViewState<'a> {
    pub route: Route,
    /// Normalized path being rendered.
    pub path: String,
    pub session: &'a Session,
    /// One-off message for the page, e.g. a failed login.
    pub notice: Option<String>,
}

/// The two render regions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    pub hero: String,
    pub content: String,
}

impl View {
    pub fn content(content: String) -> Self {
        Self {
            hero: String::new(),
            content,
        }
    }
}

/// A fully rendered page.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Route actually rendered; `NotFound` when a referenced record vanished.
    pub route: Route,
    pub path: String,
    pub hero: String,
    pub content: String,
    pub meta: PageMeta,
}

pub fn render(site: &SiteContext, state: &ViewState<'_>) -> RenderedPage {
    let (route, view) = match &state.route {
        Route::Home => (Route::Home, pages::home(site)),
        Route::BlogListing => (Route::BlogListing, pages::blog_listing(site)),
        Route::Category(id) => match site.category(id) {
            Some(category) => (state.route.clone(), pages::category(site, category)),
            None => not_found(site),
        },
        Route::Post(id) => match site.post(id) {
            Some(post) => (state.route.clone(), pages::post(site, post)),
            None => not_found(site),
        },
        Route::StaticPage(key) => match site.page(key) {
            Some(page) => (state.route.clone(), pages::static_page(site, page)),
            None => not_found(site),
        },
        Route::Admin => {
            let view = match state.session.user() {
                Some(user) => admin::dashboard(site, user),
                None => admin::login(state.notice.as_deref()),
            };
            (Route::Admin, view)
        }
        Route::NotFound => not_found(site),
    };

    let meta = meta::page_meta(site, &route, &state.path);
    RenderedPage {
        route,
        path: state.path.clone(),
        hero: view.hero,
        content: view.content,
        meta,
    }
}

fn not_found(site: &SiteContext) -> (Route, View) {
    (Route::NotFound, pages::not_found(site))
}

#[derive(Debug, Clone, Copy)]
pub enum DateStyle {
    /// `Jun 1, 2025`
    Short,
    /// `June 1, 2025`
    Long,
}

/// Format a content date for display; unparseable values are shown as-is.
pub fn format_date(value: &str, style: DateStyle) -> String {
    let pattern = match style {
        DateStyle::Short => "%b %-d, %Y",
        DateStyle::Long => "%B %-d, %Y",
    };
    match parse_date(value) {
        Some(dt) => dt.format(pattern).to_string(),
        None => escape_html(value),
    }
}

/// Attribute-safe absolute URL of a post.
pub fn post_href(site: &SiteContext, id: &str) -> String {
    escape_html(&site.build_url(&format!("/post/{}", id)))
}

/// Attribute-safe absolute URL of a category.
pub fn category_href(site: &SiteContext, id: &str) -> String {
    escape_html(&site.build_url(&format!("/category/{}", id)))
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_site;

    fn render_path(path: &str) -> RenderedPage {
        let site = sample_site();
        let session = Session::anonymous();
        let state = ViewState {
            route: Route::resolve(path, &site),
            path: path.to_string(),
            session: &session,
            notice: None,
        };
        render(&site, &state)
    }

    #[test]
    fn test_unknown_post_renders_not_found() {
        let page = render_path("/post/unknown-id");
        assert_eq!(page.route, Route::NotFound);
        assert!(page.content.contains("loading-state"));
        assert!(page.content.contains("404"));
        assert!(page.hero.is_empty());
    }

    #[test]
    fn test_stale_route_falls_back_to_not_found() {
        let site = sample_site();
        let session = Session::anonymous();
        let state = ViewState {
            route: Route::Category("removed".to_string()),
            path: "/category/removed".to_string(),
            session: &session,
            notice: None,
        };
        assert_eq!(render(&site, &state).route, Route::NotFound);
    }

    #[test]
    fn test_admin_without_session_shows_login() {
        let page = render_path("/admin");
        assert_eq!(page.route, Route::Admin);
        assert!(page.content.contains(r#"action="/admin/login""#));
        assert!(!page.content.contains("admin-table"));
    }

    #[test]
    fn test_format_date_styles() {
        assert_eq!(format_date("2025-06-01", DateStyle::Short), "Jun 1, 2025");
        assert_eq!(format_date("2025-06-01", DateStyle::Long), "June 1, 2025");
        assert_eq!(format_date("soon", DateStyle::Long), "soon");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}
