use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};

use crate::state::AppState;

const FEED_SIZE: usize = 50;

const SITE_DESCRIPTION: &str = "Expert insurance guides, comparisons and news";

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn rfc822(dt: &DateTime<Utc>) -> String {
    dt.format("%a, %d %b %Y %H:%M:%S +0000").to_string()
}

/// GET /rss.xml
pub async fn rss_feed(State(state): State<AppState>) -> Response {
    let site = state.site.as_ref();
    let posts = &site.posts()[..site.posts().len().min(FEED_SIZE)];

    let mut items = String::new();
    for post in posts {
        let post_url = site.build_url(&format!("/post/{}", post.id));
        let pub_date = post
            .published_at()
            .map(|dt| format!("\n      <pubDate>{}</pubDate>", rfc822(&dt)))
            .unwrap_or_default();
        items.push_str(&format!(
            r#"    <item>
      <title>{title}</title>
      <link>{link}</link>
      <description>{description}</description>
      <category>{category}</category>{pub_date}
      <guid isPermaLink="true">{link}</guid>
    </item>
"#,
            title = escape_xml(&post.title),
            link = escape_xml(&post_url),
            description = escape_xml(&post.excerpt),
            category = escape_xml(site.category_name(post)),
            pub_date = pub_date,
        ));
    }

    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
  <channel>
    <title>{}</title>
    <link>{}</link>
    <description>{}</description>
    <language>en-us</language>
    <atom:link href="{}" rel="self" type="application/rss+xml"/>
    <lastBuildDate>{}</lastBuildDate>
{}  </channel>
</rss>"#,
        escape_xml(site.site_name()),
        escape_xml(&site.build_url("/blog")),
        SITE_DESCRIPTION,
        escape_xml(&site.build_url("/rss.xml")),
        posts
            .first()
            .and_then(|p| p.published_at())
            .map(|dt| rfc822(&dt))
            .unwrap_or_default(),
        items,
    );

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/rss+xml; charset=utf-8"),
            (
                header::CACHE_CONTROL,
                "public, max-age=3600, stale-while-revalidate=600",
            ),
        ],
        xml,
    )
        .into_response()
}
