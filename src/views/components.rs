/**
 * Shared view components
 * Cards, sidebar, breadcrumbs and the table of contents
 */
use crate::content::{models::Post, SiteContext};
use crate::markdown::TocEntry;

use super::{category_href, escape_html, format_date, post_href, DateStyle};

/// Recent posts shown in the sidebar.
const SIDEBAR_RECENT: usize = 4;

pub fn blog_card(site: &SiteContext, post: &Post) -> String {
    let href = post_href(site, &post.id);
    format!(
        r#"<article class="blog-card">
    <a class="card-media" href="{href}" data-link>
        <img src="{image}" alt="{alt}" loading="lazy">
    </a>
    <div class="card-body">
        <div class="card-meta">
            <span class="card-category">{category}</span>
            <time datetime="{date}">{date_text}</time>
        </div>
        <h3 class="card-title"><a href="{href}" data-link>{title}</a></h3>
        <p class="card-excerpt">{excerpt}</p>
        <a href="{href}" data-link class="card-link">Read article</a>
    </div>
</article>"#,
        href = href,
        image = escape_html(&post.image),
        alt = escape_html(post.alt()),
        category = escape_html(site.category_name(post)),
        date = escape_html(&post.date),
        date_text = format_date(&post.date, DateStyle::Short),
        title = escape_html(&post.title),
        excerpt = escape_html(&post.excerpt),
    )
}

pub fn blog_cards<'a>(site: &SiteContext, posts: impl IntoIterator<Item = &'a Post>) -> String {
    posts.into_iter().map(|p| blog_card(site, p)).collect()
}

pub fn sidebar(site: &SiteContext) -> String {
    let categories: String = site
        .categories()
        .iter()
        .map(|c| {
            format!(
                r#"<li><a href="{}" data-link><span>{}</span><span class="count">{}</span></a></li>"#,
                category_href(site, &c.id),
                escape_html(&c.name),
                site.category_count(&c.id)
            )
        })
        .collect();

    let recent: String = site
        .posts()
        .iter()
        .take(SIDEBAR_RECENT)
        .map(|p| {
            let href = post_href(site, &p.id);
            format!(
                r#"<li class="recent-post-item"><a href="{href}" data-link><img src="{image}" alt="{alt}"></a><div><h6><a href="{href}" data-link>{title}</a></h6><small>{date}</small></div></li>"#,
                href = href,
                image = escape_html(&p.image),
                alt = escape_html(p.alt()),
                title = escape_html(&p.title),
                date = format_date(&p.date, DateStyle::Short),
            )
        })
        .collect();

    format!(
        r#"<aside class="sidebar">
    <div class="sidebar-box">
        <h4>Browse Topics</h4>
        <ul class="category-list">{}</ul>
    </div>
    <div class="sidebar-box">
        <h4>Latest Articles</h4>
        <ul class="recent-list">{}</ul>
    </div>
    <div class="ad-slot">Ad placement available</div>
</aside>"#,
        categories, recent
    )
}

/// One breadcrumb after "Home"; the last crumb usually has no link.
#[derive(Debug, Clone)]
pub struct Crumb {
    pub label: String,
    pub link: Option<String>,
}

impl Crumb {
    pub fn text(label: &str) -> Self {
        Self {
            label: label.to_string(),
            link: None,
        }
    }

    pub fn link(label: &str, href: String) -> Self {
        Self {
            label: label.to_string(),
            link: Some(href),
        }
    }
}

pub fn breadcrumbs(site: &SiteContext, items: &[Crumb]) -> String {
    let crumbs: String = items
        .iter()
        .map(|item| {
            let inner = match &item.link {
                Some(href) => format!(
                    r#"<a href="{}" data-link>{}</a>"#,
                    escape_html(href),
                    escape_html(&item.label)
                ),
                None => format!("<span>{}</span>", escape_html(&item.label)),
            };
            format!(r#"<span class="breadcrumb-item">{}</span>"#, inner)
        })
        .collect();

    format!(
        r#"<div class="breadcrumbs-outer">
    <div class="container">
        <div class="breadcrumbs">
            <a href="{}" data-link>Home</a>{}
        </div>
    </div>
</div>"#,
        site.build_url("/"),
        crumbs
    )
}

/// Table of contents card; empty when the body has no headings.
pub fn toc(entries: &[TocEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let items: String = entries
        .iter()
        .map(|item| {
            format!(
                r##"<li class="toc-item toc-level-{}"><a href="#{}">{}</a></li>"##,
                item.level,
                item.id,
                escape_html(&item.label)
            )
        })
        .collect();
    format!(
        r#"<nav class="toc-card">
    <h4>Table of contents</h4>
    <ul class="toc-list">{}</ul>
</nav>"#,
        items
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{post, sample_site};

    #[test]
    fn test_blog_card_escapes_record_ids_in_links() {
        let site = sample_site();
        let card = blog_card(&site, &post(r#"x" onmouseover="alert(1)"#, "2025-01-01", "life"));
        assert!(!card.contains(r#"x" onmouseover"#));
        assert!(card.contains("/post/x&quot; onmouseover=&quot;alert(1)"));
    }

    #[test]
    fn test_blog_card_uses_category_name_and_hooks() {
        let site = sample_site();
        let card = blog_card(&site, site.post("featured-1").unwrap());
        for hook in ["blog-card", "card-media", "card-body", "card-category", "card-title", "card-excerpt", "card-link"] {
            assert!(card.contains(hook), "missing {}", hook);
        }
        assert!(card.contains(">Life<"));
        assert!(card.contains("https://www.goinsurancenews.com/post/featured-1"));
        assert!(card.contains("May 1, 2025"));
    }

    #[test]
    fn test_blog_card_with_unknown_category_shows_raw_id() {
        let site = sample_site();
        let card = blog_card(&site, site.post("orphan-post").unwrap());
        assert!(card.contains("retired-category"));
    }

    #[test]
    fn test_sidebar_counts_and_recent_limit() {
        let site = sample_site();
        let html = sidebar(&site);
        assert!(html.contains(r#"<span>Life</span><span class="count">3</span>"#));
        assert_eq!(html.matches("recent-post-item").count(), SIDEBAR_RECENT);
    }

    #[test]
    fn test_breadcrumbs_link_and_text() {
        let site = sample_site();
        let html = breadcrumbs(
            &site,
            &[Crumb::link("Life", site.build_url("/category/life")), Crumb::text("A & B")],
        );
        assert!(html.contains(r#"<a href="https://www.goinsurancenews.com/category/life" data-link>Life</a>"#));
        assert!(html.contains("<span>A &amp; B</span>"));
    }

    #[test]
    fn test_toc_is_empty_without_entries() {
        assert_eq!(toc(&[]), "");
        let html = toc(&[TocEntry {
            id: "costs".to_string(),
            label: "Costs".to_string(),
            level: 3,
        }]);
        assert!(html.contains(r##"<li class="toc-item toc-level-3"><a href="#costs">Costs</a></li>"##));
    }
}
