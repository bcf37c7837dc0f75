/**
 * Admin views
 * Login form and the read-only content dashboard
 */
use crate::content::SiteContext;
use crate::routes::auth::UserInfo;

use super::{escape_html, format_date, post_href, DateStyle, View};

pub fn login(notice: Option<&str>) -> View {
    let alert = notice
        .map(|msg| {
            format!(
                r#"<div class="alert alert-error" role="alert">{}</div>"#,
                escape_html(msg)
            )
        })
        .unwrap_or_default();

    View::content(format!(
        r#"<section class="page-standard">
    <div class="container">
        <div class="page-box admin-login">
            <span class="eyebrow">Editorial team</span>
            <h1>Admin sign in</h1>
            {}
            <form class="admin-login-form" method="post" action="/admin/login">
                <label for="admin-email">Email</label>
                <input id="admin-email" name="email" type="email" autocomplete="username" required>
                <label for="admin-password">Password</label>
                <input id="admin-password" name="password" type="password" autocomplete="current-password" required>
                <button type="submit" class="btn btn-primary">Sign in</button>
            </form>
        </div>
    </div>
</section>"#,
        alert
    ))
}

fn stat_card(label: &str, value: usize) -> String {
    format!(
        r#"<div class="stat-card"><strong>{}</strong><span>{}</span></div>"#,
        value, label
    )
}

pub fn dashboard(site: &SiteContext, user: &UserInfo) -> View {
    let featured = site.posts().iter().filter(|p| p.featured).count();
    let stats = [
        stat_card("Posts", site.posts().len()),
        stat_card("Featured", featured),
        stat_card("Categories", site.categories().len()),
        stat_card("Authors", site.authors().len()),
        stat_card("Pages", site.pages().len()),
    ]
    .concat();

    // Edit/delete are placeholders: content is read-only at runtime.
    let rows: String = site
        .posts()
        .iter()
        .map(|p| {
            format!(
                r#"<tr>
    <td><a href="{href}" data-link>{title}</a></td>
    <td>{category}</td>
    <td>{author}</td>
    <td><time datetime="{date}">{date_text}</time></td>
    <td>{featured}</td>
    <td class="admin-actions"><button type="button" class="btn btn-small" disabled>Edit</button><button type="button" class="btn btn-small btn-danger" disabled>Delete</button></td>
</tr>"#,
                href = post_href(site, &p.id),
                title = escape_html(&p.title),
                category = escape_html(site.category_name(p)),
                author = escape_html(site.author_name(p)),
                date = escape_html(&p.date),
                date_text = format_date(&p.date, DateStyle::Short),
                featured = if p.featured { "Yes" } else { "No" },
            )
        })
        .collect();

    let hero = format!(
        r#"<section class="hero hero-compact">
    <div class="container hero-center">
        <span class="eyebrow">Dashboard</span>
        <h1>Content overview</h1>
        <p>Signed in as {}.</p>
        <form method="post" action="/admin/logout"><button type="submit" class="btn btn-secondary">Sign out</button></form>
    </div>
</section>"#,
        escape_html(&user.email)
    );

    let content = format!(
        r#"<section class="section">
    <div class="container">
        <div class="stat-grid">{}</div>
        <div class="table-wrapper">
            <table class="admin-table">
                <thead><tr><th>Title</th><th>Category</th><th>Author</th><th>Published</th><th>Featured</th><th>Actions</th></tr></thead>
                <tbody>{}</tbody>
            </table>
        </div>
    </div>
</section>"#,
        stats, rows
    );

    View { hero, content }
}
