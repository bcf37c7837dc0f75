/**
 * Blog Routes
 * Read-only JSON API over the loaded posts and categories
 */
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::content::models::Post;
use crate::markdown::{self, TocEntry};
use crate::routes::ErrorResponse;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for GET /api/posts
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    pub category: Option<String>,
    pub featured: Option<bool>,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

/// Response for GET /api/posts
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub items: Vec<PostSummary>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
}

/// Post summary (for list view)
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub date: String,
    pub category: String,
    pub category_name: String,
    pub author: String,
    pub image: String,
    pub featured: bool,
    pub url: String,
}

/// Full post response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse<'a> {
    #[serde(flatten)]
    pub post: &'a Post,
    pub author_name: &'a str,
    pub category_name: &'a str,
    pub read_time: String,
    pub url: String,
    pub html: String,
    pub toc: Vec<TocEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub post_count: usize,
    pub url: String,
}

// ============================================================================
// Validation
// ============================================================================

lazy_static::lazy_static! {
    /// Valid id pattern: lowercase letters, numbers, and hyphens
    static ref ID_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

fn is_valid_id(id: &str) -> bool {
    ID_REGEX.is_match(id)
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(format!("{} not found", what))),
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/posts - List posts newest first with pagination
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PostListQuery>,
) -> impl IntoResponse {
    let site = state.site.as_ref();

    // Clamp page_size to 1..=100
    let page_size = query.page_size.clamp(1, 100);
    let page = query.page.max(1);
    // Pages past the end are empty; saturate rather than overflow.
    let offset = usize::try_from((page - 1).saturating_mul(page_size)).unwrap_or(usize::MAX);

    let matching: Vec<&Post> = site
        .posts()
        .iter()
        .filter(|p| query.category.as_deref().is_none_or(|c| p.category == c))
        .filter(|p| query.featured.is_none_or(|f| p.featured == f))
        .collect();

    let items = matching
        .iter()
        .skip(offset)
        .take(page_size as usize)
        .map(|p| PostSummary {
            id: p.id.clone(),
            title: p.title.clone(),
            excerpt: p.excerpt.clone(),
            date: p.date.clone(),
            category: p.category.clone(),
            category_name: site.category_name(p).to_string(),
            author: site.author_name(p).to_string(),
            image: p.image.clone(),
            featured: p.featured,
            url: site.build_url(&format!("/post/{}", p.id)),
        })
        .collect();

    Json(PostListResponse {
        items,
        page,
        page_size,
        total: matching.len() as i64,
    })
}

/// GET /api/posts/{id} - Single post with rendered body
pub async fn get_post(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    if !is_valid_id(&id) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid post id".to_string(),
                message: Some("Ids use lowercase letters, numbers and hyphens".to_string()),
            }),
        )
            .into_response();
    }

    let site = state.site.as_ref();
    let Some(post) = site.post(&id) else {
        return not_found("Post");
    };

    let rendered = markdown::render(&post.content, site.origin());
    Json(PostResponse {
        post,
        author_name: site.author_name(post),
        category_name: site.category_name(post),
        read_time: markdown::read_time(&post.content),
        url: site.build_url(&format!("/post/{}", post.id)),
        html: rendered.html,
        toc: rendered.toc,
    })
    .into_response()
}

/// GET /api/categories - Categories with their post counts
pub async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    let site = state.site.as_ref();
    let categories: Vec<CategorySummary> = site
        .categories()
        .iter()
        .map(|c| CategorySummary {
            id: c.id.clone(),
            name: c.name.clone(),
            description: c.description.clone(),
            icon: c.icon.clone(),
            post_count: site.category_count(&c.id),
            url: site.build_url(&format!("/category/{}", c.id)),
        })
        .collect();
    Json(categories)
}
