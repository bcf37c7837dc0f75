/**
 * Document layout
 * Wraps a rendered page into the full HTML document
 */
use crate::content::SiteContext;
use crate::router::is_nav_active;

use super::{category_href, escape_html, RenderedPage};

/// Primary navigation entries as (label, site path).
fn nav_entries(site: &SiteContext) -> Vec<(String, String)> {
    let mut entries = vec![
        ("Home".to_string(), "/".to_string()),
        ("Blog".to_string(), "/blog".to_string()),
    ];
    entries.extend(
        site.categories()
            .iter()
            .map(|c| (c.name.clone(), format!("/category/{}", c.id))),
    );
    if site.page("about").is_some() {
        entries.push(("About".to_string(), "/about".to_string()));
    }
    entries
}

/// Navigation links with their active state for the current path.
pub fn nav(site: &SiteContext, current: &str) -> String {
    let links: String = nav_entries(site)
        .into_iter()
        .map(|(label, path)| {
            let href = site.build_url(&path);
            let active = is_nav_active(&site.normalize(&href), current);
            format!(
                r#"<a href="{}" data-link{}>{}</a>"#,
                escape_html(&href),
                if active { r#" class="active""# } else { "" },
                escape_html(&label)
            )
        })
        .collect();
    format!(r#"<nav id="main-nav" class="main-nav">{}</nav>"#, links)
}

fn footer_categories(site: &SiteContext) -> String {
    site.categories()
        .iter()
        .map(|c| {
            format!(
                r#"<li><a href="{}" data-link>{}</a></li>"#,
                category_href(site, &c.id),
                escape_html(&c.name)
            )
        })
        .collect()
}

fn head(page: &RenderedPage) -> String {
    let meta = &page.meta;
    let title = escape_html(&meta.title);
    let description = escape_html(&meta.description);
    let canonical = escape_html(&meta.canonical);
    let image_tags = match &meta.image {
        Some(image) => {
            let image = escape_html(image);
            format!(
                r#"
    <meta property="og:image" content="{image}">
    <meta name="twitter:image" content="{image}">"#,
                image = image
            )
        }
        None => String::new(),
    };

    format!(
        r#"<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <meta name="description" content="{description}">
    <link rel="canonical" href="{canonical}">
    <meta property="og:type" content="{og_type}">
    <meta property="og:title" content="{title}">
    <meta property="og:description" content="{description}">
    <meta property="og:url" content="{canonical}">
    <meta name="twitter:card" content="{card}">
    <meta name="twitter:title" content="{title}">
    <meta name="twitter:description" content="{description}">{image_tags}
    <link rel="stylesheet" href="/assets/styles.css">
    <script type="application/ld+json">{json_ld}</script>
    <script src="/assets/app.js" defer></script>
</head>"#,
        title = title,
        description = description,
        canonical = canonical,
        og_type = meta.og_type,
        card = meta.twitter_card(),
        image_tags = image_tags,
        json_ld = meta.json_ld_script(),
    )
}

/// Assemble the full document for a rendered page.
pub fn document(site: &SiteContext, page: &RenderedPage) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
{head}
<body data-site-origin="{origin}">
<header class="site-header">
    <div class="container header-inner">
        <a href="{home}" class="brand" data-link>{name}</a>
        <button id="menu-toggle" class="menu-toggle" aria-expanded="false" aria-controls="main-nav">Menu</button>
        {nav}
    </div>
</header>
<div id="hero-container">{hero}</div>
<main id="content">{content}</main>
<footer class="site-footer">
    <div class="container">
        <ul id="footer-categories">{footer}</ul>
        <p>&copy; {name}</p>
    </div>
</footer>
</body>
</html>"#,
        head = head(page),
        origin = escape_html(site.origin()),
        home = site.build_url("/"),
        name = escape_html(site.site_name()),
        nav = nav(site, &page.path),
        hero = page.hero,
        content = page.content,
        footer = footer_categories(site),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::Route;
    use crate::session::Session;
    use crate::test_support::sample_site;
    use crate::views::{render, ViewState};

    fn document_for(path: &str) -> String {
        let site = sample_site();
        let session = Session::anonymous();
        let state = ViewState {
            route: Route::resolve(path, &site),
            path: path.to_string(),
            session: &session,
            notice: None,
        };
        document(&site, &render(&site, &state))
    }

    #[test]
    fn test_post_page_highlights_blog_nav() {
        let site = sample_site();
        let html = nav(&site, "/post/featured-1");
        assert!(html.contains(r#"<a href="https://www.goinsurancenews.com/blog" data-link class="active">Blog</a>"#));
        assert_eq!(html.matches("active").count(), 1);
    }

    #[test]
    fn test_category_page_highlights_its_own_entry() {
        let site = sample_site();
        let html = nav(&site, "/category/health");
        assert!(html.contains(r#"data-link class="active">Health</a>"#));
        assert_eq!(html.matches("class=\"active\"").count(), 1);
    }

    #[test]
    fn test_document_carries_metadata() {
        let html = document_for("/post/featured-1");
        assert!(html.contains("<title>Title of featured-1 | Insurance Insight</title>"));
        assert!(html.contains(r#"<link rel="canonical" href="https://www.goinsurancenews.com/post/featured-1">"#));
        assert!(html.contains(r#"<meta property="og:type" content="article">"#));
        assert!(html.contains(r#"<meta name="twitter:card" content="summary_large_image">"#));
        assert_eq!(html.matches("application/ld+json").count(), 1);
        assert!(html.contains(r#""@type":"BlogPosting""#));
    }

    #[test]
    fn test_document_loads_navigation_script() {
        let html = document_for("/blog");
        assert!(html.contains(r#"<script src="/assets/app.js" defer></script>"#));
        assert!(html.contains(r#"<body data-site-origin="https://www.goinsurancenews.com">"#));
        assert!(html.contains(r#"id="menu-toggle""#));
    }

    #[test]
    fn test_navigation_script_handles_links_history_and_menu() {
        let script = include_str!("../../assets/app.js");
        assert!(script.contains("a[data-link]"));
        assert!(script.contains("pushState"));
        assert!(script.contains("popstate"));
        assert!(script.contains("#menu-toggle"));
        for id in ["main-nav", "hero-container", "content", "footer-categories"] {
            assert!(script.contains(&format!("\"{}\"", id)), "region {}", id);
        }
    }

    #[test]
    fn test_document_has_both_regions_and_footer() {
        let html = document_for("/");
        assert!(html.contains(r#"<div id="hero-container"><section class="hero">"#));
        assert!(html.contains(r#"<main id="content">"#));
        assert!(html.contains(r#"<ul id="footer-categories"><li>"#));
    }
}
