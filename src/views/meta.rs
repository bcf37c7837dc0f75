/**
 * Page metadata
 * Title, description, canonical link, social tags and JSON-LD per route
 */
use serde_json::{json, Value};

use crate::content::SiteContext;
use crate::router::Route;

const DEFAULT_DESCRIPTION: &str =
    "Get expert advice and educational guides on life, health, military, and home insurance.";

#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical: String,
    /// `website` or `article`.
    pub og_type: &'static str,
    pub image: Option<String>,
    pub json_ld: Value,
}

pub fn page_meta(site: &SiteContext, route: &Route, path: &str) -> PageMeta {
    let name = site.site_name();
    let canonical = site.build_url(if path.is_empty() { "/" } else { path });

    let mut meta = PageMeta {
        title: format!("{} | Expert Insurance Guides & News", name),
        description: DEFAULT_DESCRIPTION.to_string(),
        canonical,
        og_type: "website",
        image: None,
        json_ld: website_schema(site),
    };

    match route {
        Route::Post(id) => {
            if let Some(post) = site.post(id) {
                meta.title = format!("{} | {}", post.title, name);
                meta.description = post.excerpt.clone();
                meta.og_type = "article";
                if !post.image.is_empty() {
                    meta.image = Some(site.build_url(&post.image));
                }
                meta.json_ld = json!({
                    "@context": "https://schema.org",
                    "@type": "BlogPosting",
                    "headline": post.title,
                    "description": post.excerpt,
                    "image": meta.image.iter().collect::<Vec<_>>(),
                    "datePublished": post.date,
                    "dateModified": post.modified(),
                    "mainEntityOfPage": { "@type": "WebPage", "@id": meta.canonical },
                    "author": { "@type": "Person", "name": site.author_name(post) },
                    "publisher": {
                        "@type": "Organization",
                        "name": name,
                        "url": site.origin(),
                    },
                    "articleSection": site.category_name(post),
                });
            }
        }
        Route::Category(id) => {
            if let Some(category) = site.category(id) {
                meta.title = format!("{} Insurance Guides | {}", category.name, name);
                meta.description = category.description.clone();
            }
        }
        Route::BlogListing => {
            meta.title = format!("Insurance Blog | {}", name);
            meta.description =
                "Browse the latest insurance guides, comparisons, and policy insights.".to_string();
        }
        Route::StaticPage(key) => {
            if let Some(page) = site.page(key) {
                meta.title = format!("{} | {}", page.title, name);
            }
        }
        Route::Admin => {
            meta.title = format!("Admin | {}", name);
        }
        Route::NotFound => {
            meta.title = format!("Page not found | {}", name);
        }
        Route::Home => {}
    }

    meta
}

fn website_schema(site: &SiteContext) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "WebSite",
        "name": site.site_name(),
        "url": site.origin(),
        "potentialAction": {
            "@type": "SearchAction",
            "target": format!("{}/blog?q={{search_term_string}}", site.origin()),
            "query-input": "required name=search_term_string",
        },
    })
}

impl PageMeta {
    /// JSON-LD serialized for embedding in a `<script>` element.
    pub fn json_ld_script(&self) -> String {
        self.json_ld.to_string().replace("</", "<\\/")
    }

    pub fn twitter_card(&self) -> &'static str {
        if self.image.is_some() {
            "summary_large_image"
        } else {
            "summary"
        }
    }
}
