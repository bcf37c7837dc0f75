/**
 * Page views
 * Home, blog archive, category, post, static page and not-found
 */
use crate::content::models::{Category, Page, Post};
use crate::content::SiteContext;
use crate::markdown::{self, read_time};

use super::components::{blog_card, blog_cards, breadcrumbs, sidebar, toc, Crumb};
use super::{category_href, escape_html, format_date, post_href, DateStyle, View};

pub const HOME_FEATURED: usize = 3;
pub const HOME_LATEST: usize = 6;
const RELATED_POSTS: usize = 2;

/// Posts shown on the home page: featured first, then the latest others.
pub fn home_selection(site: &SiteContext) -> (Vec<&Post>, Vec<&Post>) {
    let featured = site
        .posts()
        .iter()
        .filter(|p| p.featured)
        .take(HOME_FEATURED)
        .collect();
    let latest = site
        .posts()
        .iter()
        .filter(|p| !p.featured)
        .take(HOME_LATEST)
        .collect();
    (featured, latest)
}

fn section(eyebrow: &str, heading: &str, blurb: &str, body: &str) -> String {
    format!(
        r#"<section class="section">
    <div class="container">
        <div class="section-title">
            <div>
                <span class="eyebrow">{}</span>
                <h2>{}</h2>
            </div>
            <p>{}</p>
        </div>
        {}
    </div>
</section>"#,
        eyebrow, heading, blurb, body
    )
}

fn compact_hero(eyebrow: &str, heading: &str, blurb: &str) -> String {
    format!(
        r#"<section class="hero hero-compact">
    <div class="container hero-center">
        <span class="eyebrow">{}</span>
        <h1>{}</h1>
        <p>{}</p>
    </div>
</section>"#,
        eyebrow, heading, blurb
    )
}

pub fn home(site: &SiteContext) -> View {
    let (featured, latest) = home_selection(site);
    let hero_post = featured.first().copied().or_else(|| site.posts().first());

    let hero_card = match hero_post {
        Some(post) => {
            let href = post_href(site, &post.id);
            let category = site
                .category(&post.category)
                .map(|c| c.name.as_str())
                .unwrap_or("Insurance");
            format!(
                r#"<div>
                <span class="eyebrow">Featured guide</span>
                <h3><a href="{href}" data-link>{title}</a></h3>
                <p class="card-excerpt">{excerpt}</p>
            </div>
            <div class="hero-card-meta">
                <span>{category}</span>
                <span>{date}</span>
                <span>{read_time}</span>
            </div>
            <a href="{href}" data-link class="card-link">Read featured article</a>"#,
                href = href,
                title = escape_html(&post.title),
                excerpt = escape_html(&post.excerpt),
                category = escape_html(category),
                date = format_date(&post.date, DateStyle::Short),
                read_time = read_time(&post.content),
            )
        }
        None => String::new(),
    };

    let hero = format!(
        r#"<section class="hero">
    <div class="container hero-grid">
        <div>
            <span class="eyebrow">{name} Editorial</span>
            <h1>Clear insurance guidance for life, health, home, and auto decisions.</h1>
            <p>We publish practical, plain-language coverage guides so you can compare policies with confidence and protect what matters most.</p>
            <div class="hero-actions">
                <a href="{blog}" class="btn btn-primary" data-link>Read the latest</a>
                <a href="{about}" class="btn btn-secondary" data-link>How we review</a>
            </div>
        </div>
        <div class="hero-card">
            {card}
            <div class="hero-stat-grid">
                <div class="hero-stat"><strong>{count} guides</strong><span>Updated throughout the year</span></div>
                <div class="hero-stat"><strong>Editorial review</strong><span>Checked by insurance specialists</span></div>
            </div>
        </div>
    </div>
</section>"#,
        name = escape_html(site.site_name()),
        blog = site.build_url("/blog"),
        about = site.build_url("/about"),
        card = hero_card,
        count = site.posts().len(),
    );

    let category_cards: String = site
        .categories()
        .iter()
        .map(|c| {
            format!(
                r#"<a class="category-card" href="{}" data-link><span>{}</span><h3>{}</h3><p>{}</p></a>"#,
                category_href(site, &c.id),
                escape_html(&c.icon),
                escape_html(&c.name),
                escape_html(&c.description)
            )
        })
        .collect();

    let content = [
        section(
            "Featured insights",
            "Essential insurance reads",
            "High-impact guides and comparisons curated by our editorial team.",
            &format!(
                r#"<div class="grid">{}</div>"#,
                blog_cards(site, featured.iter().copied())
            ),
        ),
        section(
            "Browse by category",
            "Find the coverage you need",
            "Focused collections for every major insurance decision.",
            &format!(r#"<div class="category-grid">{}</div>"#, category_cards),
        ),
        section(
            "Latest updates",
            "Fresh from the newsroom",
            "New research, comparisons, and coverage tips published weekly.",
            &format!(
                r#"<div class="main-layout-split"><div class="grid">{}</div>{}</div>"#,
                blog_cards(site, latest.iter().copied()),
                sidebar(site)
            ),
        ),
    ]
    .concat();

    View { hero, content }
}

pub fn blog_listing(site: &SiteContext) -> View {
    let hero = compact_hero(
        "Insurance blog",
        "All articles and guides",
        "Explore our complete library of insurance insights, comparisons, and expert checklists.",
    );
    let content = section(
        "Latest stories",
        "Browse the full archive",
        "Sort by category or dive into the newest editorial research.",
        &format!(r#"<div class="grid">{}</div>"#, blog_cards(site, site.posts())),
    );
    View { hero, content }
}

pub fn category(site: &SiteContext, category: &Category) -> View {
    let hero = compact_hero(
        "Browse category",
        &escape_html(&category.name),
        &escape_html(&category.description),
    );

    let cards = blog_cards(site, site.posts_in_category(&category.id));
    let listing = if cards.is_empty() {
        r#"<p class="empty-state">Our insurance experts are drafting new articles for this category.</p>"#
            .to_string()
    } else {
        cards
    };

    let content = format!(
        r#"{}
<section class="section">
    <div class="container">
        <div class="main-layout-split">
            <div class="grid">{}</div>
            {}
        </div>
    </div>
</section>"#,
        breadcrumbs(site, &[Crumb::text(&category.name)]),
        listing,
        sidebar(site)
    );
    View { hero, content }
}

pub fn post(site: &SiteContext, post: &Post) -> View {
    let category = site.category(&post.category);
    let author = site.author(&post.author);
    let rendered = markdown::render(&post.content, site.origin());

    let topic_link = match category {
        Some(c) => format!(
            r#"<a href="{}" class="post-topic-link" data-link>{}</a>"#,
            category_href(site, &c.id),
            escape_html(&c.name)
        ),
        None => String::new(),
    };

    let byline = format!(
        "<span>By <strong>{}</strong></span>",
        escape_html(site.author_name(post))
    );

    let author_card = match author {
        Some(a) => format!(
            r#"<div class="author-card">
                <img src="{}" alt="{}">
                <div>
                    <h3>About {}</h3>
                    <p>{}</p>
                </div>
            </div>"#,
            escape_html(&a.avatar),
            escape_html(&a.name),
            escape_html(&a.name),
            escape_html(&a.bio)
        ),
        None => String::new(),
    };

    let mut crumbs = Vec::new();
    if let Some(c) = category {
        crumbs.push(Crumb::link(&c.name, site.build_url(&format!("/category/{}", c.id))));
    }
    crumbs.push(Crumb::text(&post.title));

    let related = site
        .posts_in_category(&post.category)
        .filter(|p| p.id != post.id)
        .take(RELATED_POSTS)
        .map(|p| blog_card(site, p))
        .collect::<String>();

    let content = format!(
        r#"<header class="post-header-hero">
    <div class="container">
        <div class="post-header-inner">
            <div>
                {topic_link}
                <h1 class="post-title-main">{title}</h1>
                <div class="post-meta">
                    {byline}
                    <span>Published {published}</span>
                    <span>Updated {updated}</span>
                    <span>{read_time}</span>
                </div>
            </div>
            <div class="post-featured-wrapper">
                <img src="{image}" alt="{alt}">
            </div>
        </div>
    </div>
</header>
{breadcrumbs}
<section class="section">
    <div class="container">
        <div class="main-layout-split">
            <div class="post-body-wrapper">
                {toc}
                <div class="post-content-rich">{body}</div>
                <div class="ad-slot">In-article ad placement</div>
                {author_card}
                <div class="related-articles">
                    <h3>Recommended next reads</h3>
                    <div class="grid">{related}</div>
                </div>
            </div>
            {sidebar}
        </div>
    </div>
</section>"#,
        topic_link = topic_link,
        title = escape_html(&post.title),
        byline = byline,
        published = format_date(&post.date, DateStyle::Long),
        updated = format_date(post.modified(), DateStyle::Long),
        read_time = read_time(&post.content),
        image = escape_html(&post.image),
        alt = escape_html(post.alt()),
        breadcrumbs = breadcrumbs(site, &crumbs),
        toc = toc(&rendered.toc),
        body = rendered.html,
        author_card = author_card,
        related = related,
        sidebar = sidebar(site),
    );

    View::content(content)
}

pub fn static_page(site: &SiteContext, page: &Page) -> View {
    let rendered = markdown::render(&page.content, site.origin());
    View::content(format!(
        r#"<section class="page-standard">
    <div class="container">
        <div class="page-box">
            <span class="eyebrow">Our policy</span>
            <h1>{}</h1>
            <div class="page-body">{}</div>
        </div>
    </div>
</section>"#,
        escape_html(&page.title),
        rendered.html
    ))
}

pub fn not_found(site: &SiteContext) -> View {
    View::content(format!(
        r#"<section class="section">
    <div class="container">
        <div class="loading-state">
            <h1>404</h1>
            <h2>We could not locate that page.</h2>
            <p>The insurance guide you requested might have moved. Try the homepage or the blog archive.</p>
            <a href="{}" data-link class="btn btn-primary">Return to Home</a>
        </div>
    </div>
</section>"#,
        site.build_url("/")
    ))
}
