//! Fixtures shared by the unit tests.

use std::sync::Arc;
use url::Url;

use crate::config::{AuthConfig, Config};
use crate::content::models::{Author, Bundle, Category, Page, Post};
use crate::content::SiteContext;
use crate::state::AppState;

pub const ADMIN_EMAIL: &str = "editor@goinsurancenews.com";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";

pub fn post(id: &str, date: &str, category: &str) -> Post {
    Post {
        id: id.to_string(),
        title: format!("Title of {}", id),
        excerpt: format!("Excerpt of {}", id),
        content: "Plain body".to_string(),
        date: date.to_string(),
        updated: None,
        category: category.to_string(),
        author: "jane".to_string(),
        image: format!("/assets/{}.jpg", id),
        alt_text: None,
        featured: false,
    }
}

fn featured(id: &str, date: &str, category: &str) -> Post {
    Post {
        featured: true,
        ..post(id, date, category)
    }
}

pub fn sample_bundle() -> Bundle {
    let mut posts = vec![
        featured("featured-3", "2025-03-01", "life"),
        featured("featured-1", "2025-05-01", "life"),
        featured("featured-2", "2025-04-01", "health"),
        featured("featured-4", "2025-02-01", "auto"),
    ];
    posts[1].content = "## Overview\nIntro text\n## Overview\n### Costs\n| Plan | Expert Verdict |\n|---|---|\n| Basic | Good |".to_string();
    posts[1].updated = Some("2025-05-20".to_string());

    for n in 1..=7 {
        let category = match n {
            1 => "life",
            n if n % 2 == 0 => "health",
            _ => "auto",
        };
        posts.push(post(&format!("latest-{}", n), &format!("2024-0{}-01", n), category));
    }

    let mut orphan = post("orphan-post", "2023-01-01", "retired-category");
    orphan.author = "ghost-writer".to_string();
    posts.push(orphan);

    let category = |id: &str, name: &str| Category {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{} insurance guides", name),
        icon: "*".to_string(),
    };

    let mut pages = std::collections::BTreeMap::new();
    pages.insert(
        "about".to_string(),
        Page {
            title: "About Us".to_string(),
            content: "## How we review\nEvery guide is checked.".to_string(),
        },
    );
    pages.insert(
        "privacy".to_string(),
        Page {
            title: "Privacy Policy".to_string(),
            content: "We do not sell data.".to_string(),
        },
    );

    Bundle {
        categories: vec![
            category("life", "Life"),
            category("health", "Health"),
            category("auto", "Auto"),
        ],
        authors: vec![Author {
            id: "jane".to_string(),
            name: "Jane Doe".to_string(),
            bio: "Licensed agent".to_string(),
            avatar: "/assets/jane.png".to_string(),
        }],
        pages,
        posts,
    }
}

pub fn sample_site() -> SiteContext {
    SiteContext::new(
        sample_bundle(),
        Url::parse("https://www.goinsurancenews.com").unwrap(),
        "Insurance Insight",
    )
}

/// App state with a known admin login; bcrypt runs at the minimum cost.
pub fn test_state() -> AppState {
    let config = Config {
        auth: AuthConfig {
            jwt_secret: "test-secret".to_string(),
            admin_email: ADMIN_EMAIL.to_string(),
            admin_password_hash: Some(bcrypt::hash(ADMIN_PASSWORD, 4).unwrap()),
        },
        ..Config::default()
    };
    AppState::new(Arc::new(sample_site()), Arc::new(config))
}
