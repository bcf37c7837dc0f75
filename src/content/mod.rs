//! Site content: the read-only collections every view renders from.

pub mod bundle;
pub mod models;

use std::path::Path;
use url::Url;

use crate::path::normalize_path;
use models::{Author, Bundle, Category, Page, Post};

pub use bundle::BundleError;

/// Content loaded once at startup and shared read-only by every request.
#[derive(Debug, Clone)]
pub struct SiteContext {
    site_url: Url,
    site_name: String,
    posts: Vec<Post>,
    categories: Vec<Category>,
    authors: Vec<Author>,
    pages: std::collections::BTreeMap<String, Page>,
}

impl SiteContext {
    /// Build the context, sorting posts newest first.
    ///
    /// This is the only place posts are ordered; every listing relies on it.
    pub fn new(bundle: Bundle, site_url: Url, site_name: impl Into<String>) -> Self {
        let mut posts = bundle.posts;
        // Stable sort; posts with unparseable dates go last.
        posts.sort_by(|a, b| b.published_at().cmp(&a.published_at()));

        Self {
            site_url,
            site_name: site_name.into(),
            posts,
            categories: bundle.categories,
            authors: bundle.authors,
            pages: bundle.pages,
        }
    }

    /// Load from the generated bundle script when it exists, otherwise from
    /// the JSON sources in `data_dir`.
    pub fn load(
        bundle_script: &Path,
        data_dir: &Path,
        site_url: Url,
        site_name: impl Into<String>,
    ) -> Result<Self, BundleError> {
        let bundle = if bundle_script.is_file() {
            tracing::info!(path = %bundle_script.display(), "loading content bundle script");
            bundle::load_script(bundle_script)?
        } else {
            tracing::info!(dir = %data_dir.display(), "loading content from JSON sources");
            bundle::load_dir(data_dir)?
        };

        let site = Self::new(bundle, site_url, site_name);
        tracing::info!(
            posts = site.posts.len(),
            categories = site.categories.len(),
            authors = site.authors.len(),
            pages = site.pages.len(),
            "content loaded"
        );
        Ok(site)
    }

    pub fn site_url(&self) -> &Url {
        &self.site_url
    }

    /// Site origin without a trailing slash, e.g. `https://www.example.com`.
    pub fn origin(&self) -> &str {
        self.site_url.as_str().trim_end_matches('/')
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn pages(&self) -> &std::collections::BTreeMap<String, Page> {
        &self.pages
    }

    pub fn post(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn author(&self, id: &str) -> Option<&Author> {
        self.authors.iter().find(|a| a.id == id)
    }

    pub fn page(&self, slug: &str) -> Option<&Page> {
        self.pages.get(slug)
    }

    pub fn posts_in_category<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Post> + 'a {
        self.posts.iter().filter(move |p| p.category == id)
    }

    pub fn category_count(&self, id: &str) -> usize {
        self.posts_in_category(id).count()
    }

    /// Display name for a post's category, or the raw id when unknown.
    pub fn category_name<'a>(&'a self, post: &'a Post) -> &'a str {
        self.category(&post.category)
            .map(|c| c.name.as_str())
            .unwrap_or(&post.category)
    }

    /// Display name for a post's author, or the raw id when unknown.
    pub fn author_name<'a>(&'a self, post: &'a Post) -> &'a str {
        self.author(&post.author)
            .map(|a| a.name.as_str())
            .unwrap_or(&post.author)
    }

    /// Absolute URL on the canonical origin for a site path.
    pub fn build_url(&self, path: &str) -> String {
        if path.is_empty() {
            return self.origin().to_string();
        }
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.origin(), path)
        } else {
            format!("{}/{}", self.origin(), path)
        }
    }

    /// Normalize an href against the canonical origin.
    pub fn normalize(&self, href: &str) -> String {
        normalize_path(href, &self.site_url, &self.site_url)
    }
}
