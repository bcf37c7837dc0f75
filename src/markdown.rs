/**
 * Markdown Renderer
 * Line scanner for the markdown subset used in post and page bodies
 */
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

lazy_static! {
    static ref BOLD: Regex = Regex::new(r"\*\*(.+?)\*\*").unwrap();
    static ref ITALIC: Regex = Regex::new(r"\*(.+?)\*").unwrap();
    static ref LINK: Regex = Regex::new(r"\[(.+?)\]\((.+?)\)").unwrap();
    static ref ORDERED_ITEM: Regex = Regex::new(r"^\d+\.\s").unwrap();
    static ref SLUG_DISALLOWED: Regex = Regex::new(r"[^a-z0-9\s-]").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref HYPHEN_RUN: Regex = Regex::new(r"-+").unwrap();
}

const WORDS_PER_MINUTE: usize = 225;

/// One heading collected while rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub id: String,
    pub label: String,
    pub level: u8,
}

/// Output of a single render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rendered {
    pub html: String,
    pub toc: Vec<TocEntry>,
}

/// Render a post or page body.
///
/// `site_url` is the canonical origin; links pointing at it (or at a
/// root-relative path) are tagged for client-side navigation.
pub fn render(content: &str, site_url: &str) -> Rendered {
    let mut scanner = Scanner::new(site_url);
    for line in content.lines() {
        scanner.line(line);
    }
    scanner.finish()
}

/// Estimated reading time, e.g. `"4 min read"`.
pub fn read_time(text: &str) -> String {
    let words = text.split(char::is_whitespace).count();
    format!("{} min read", words.div_ceil(WORDS_PER_MINUTE))
}

pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = SLUG_DISALLOWED.replace_all(&lowered, "");
    let hyphenated = WHITESPACE_RUN.replace_all(stripped.trim(), "-");
    HYPHEN_RUN.replace_all(&hyphenated, "-").into_owned()
}

/// Hands out heading ids that are unique within one render.
///
/// Repeats of a base slug get `-2`, `-3`, ... in order of appearance. A
/// generated suffix never reuses an id that was already handed out.
#[derive(Debug, Default)]
pub struct Slugger {
    seen: HashMap<String, usize>,
    issued: HashSet<String>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let count = self.seen.entry(base.clone()).or_insert(0);
        *count += 1;

        let mut id = if *count == 1 {
            base.clone()
        } else {
            format!("{}-{}", base, count)
        };
        while self.issued.contains(&id) {
            *count += 1;
            id = format!("{}-{}", base, count);
        }

        self.issued.insert(id.clone());
        id
    }
}

/// Inline formatting: bold, then italic, then links.
pub fn format_inline(text: &str, site_url: &str) -> String {
    let text = BOLD.replace_all(text, "<strong>$1</strong>");
    let text = ITALIC.replace_all(&text, "<em>$1</em>");
    LINK.replace_all(&text, |caps: &Captures| {
        let label = &caps[1];
        let url = &caps[2];
        if is_internal_link(url, site_url) {
            format!(r#"<a href="{}" data-link>{}</a>"#, url, label)
        } else {
            format!(
                r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
                url, label
            )
        }
    })
    .into_owned()
}

fn is_internal_link(url: &str, site_url: &str) -> bool {
    url.starts_with('/') || (!site_url.is_empty() && url.starts_with(site_url))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
        }
    }
}

struct Scanner<'a> {
    site_url: &'a str,
    parts: Vec<String>,
    toc: Vec<TocEntry>,
    slugger: Slugger,
    list: Option<ListKind>,
    items: Vec<String>,
    table: Vec<Vec<String>>,
}

impl<'a> Scanner<'a> {
    fn new(site_url: &'a str) -> Self {
        Self {
            site_url,
            parts: Vec::new(),
            toc: Vec::new(),
            slugger: Slugger::new(),
            list: None,
            items: Vec::new(),
            table: Vec::new(),
        }
    }

    fn line(&mut self, line: &str) {
        let trimmed = line.trim();

        if trimmed.starts_with('|') {
            self.flush_list();
            self.table_row(trimmed);
            return;
        }
        self.flush_table();

        if trimmed == "---" {
            self.flush_list();
            self.parts.push(r#"<hr class="post-hr">"#.to_string());
            return;
        }

        if let Some(rest) = line.strip_prefix("###") {
            self.heading(rest, 3);
            return;
        }

        if let Some(rest) = line.strip_prefix("##") {
            self.heading(rest, 2);
            return;
        }

        if let Some(marker) = ORDERED_ITEM.find(line) {
            self.list_item(ListKind::Ordered, &line[marker.end()..]);
            return;
        }

        if let Some(rest) = line.strip_prefix("- ") {
            self.list_item(ListKind::Unordered, rest);
            return;
        }

        if trimmed.is_empty() {
            self.flush_list();
            return;
        }

        self.flush_list();
        let paragraph = format!("<p>{}</p>", self.inline(line));
        self.parts.push(paragraph);
    }

    fn finish(mut self) -> Rendered {
        self.flush_list();
        self.flush_table();
        Rendered {
            html: self.parts.concat(),
            toc: self.toc,
        }
    }

    fn inline(&self, text: &str) -> String {
        format_inline(text, self.site_url)
    }

    fn heading(&mut self, rest: &str, level: u8) {
        self.flush_list();
        let label = rest.trim();
        let id = self.slugger.slug(label);
        let html = format!(
            r#"<h{level} id="{id}">{}</h{level}>"#,
            self.inline(label),
            level = level,
            id = id
        );
        self.toc.push(TocEntry {
            id,
            label: label.to_string(),
            level,
        });
        self.parts.push(html);
    }

    fn list_item(&mut self, kind: ListKind, text: &str) {
        if self.list.is_some_and(|open| open != kind) {
            self.flush_list();
        }
        self.list = Some(kind);
        let item = format!("<li>{}</li>", self.inline(text.trim()));
        self.items.push(item);
    }

    fn flush_list(&mut self) {
        if let Some(kind) = self.list.take() {
            if !self.items.is_empty() {
                self.parts.push(format!(
                    r#"<{tag} class="post-list">{}</{tag}>"#,
                    self.items.concat(),
                    tag = kind.tag()
                ));
            }
        }
        self.items.clear();
    }

    fn table_row(&mut self, trimmed: &str) {
        let pieces: Vec<&str> = trimmed.split('|').collect();
        let last = pieces.len().saturating_sub(1);
        let cells = pieces
            .iter()
            .enumerate()
            .filter(|(i, _)| *i > 0 && *i < last)
            .map(|(_, cell)| self.inline(cell.trim()))
            .collect();
        self.table.push(cells);
    }

    // Row 1 is always treated as the separator and dropped.
    fn flush_table(&mut self) {
        if self.table.is_empty() {
            return;
        }
        let rows = std::mem::take(&mut self.table);
        let header = &rows[0];

        let head: String = header.iter().map(|c| format!("<th>{}</th>", c)).collect();
        let expert: Vec<bool> = header
            .iter()
            .map(|c| c.to_lowercase().contains("expert verdict"))
            .collect();

        let body: String = rows
            .iter()
            .skip(2)
            .map(|row| {
                let cells: String = row
                    .iter()
                    .enumerate()
                    .map(|(i, cell)| {
                        let label = header.get(i).map(String::as_str).unwrap_or("");
                        let class = if expert.get(i).copied().unwrap_or(false) {
                            r#" class="td-expert""#
                        } else {
                            ""
                        };
                        format!(r#"<td{} data-label="{}">{}</td>"#, class, label, cell)
                    })
                    .collect();
                format!("<tr>{}</tr>", cells)
            })
            .collect();

        self.parts.push(format!(
            r#"<div class="table-wrapper"><table class="post-table"><thead><tr>{}</tr></thead><tbody>{}</tbody></table></div>"#,
            head, body
        ));
    }
}
