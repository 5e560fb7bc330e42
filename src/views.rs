//! Server-rendered pages: static templates with placeholder substitution.
//!
//! Every interpolated value goes through [`escape_html`]; usernames, snippet
//! text, and error messages all carry user- or backend-controlled bytes.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::api::Snippet;
use crate::services::session::User;

const LOGIN_TEMPLATE: &str = include_str!("../templates/login.html");
const DASHBOARD_TEMPLATE: &str = include_str!("../templates/dashboard.html");

/// Everything the dashboard page renders from.
pub struct DashboardView<'a> {
    pub user: &'a User,
    pub snippets: &'a [Snippet],
    pub selected: Option<&'a Snippet>,
    pub error: Option<&'a str>,
    /// Editor contents: the selected snippet's text, or a failed submission
    /// being handed back to the user.
    pub text_buffer: &'a str,
}

/// Renders the login page, optionally with an inline error banner.
#[must_use]
pub fn login_page(error: Option<&str>) -> String {
    LOGIN_TEMPLATE.replace("{{ERROR}}", &error_banner(error))
}

/// Renders the dashboard.
#[must_use]
pub fn dashboard_page(view: &DashboardView) -> String {
    let editor_title = if view.selected.is_some() {
        "Edit Summary"
    } else {
        "Create New Summary"
    };
    let new_link = if view.selected.is_some() {
        r#"<a href="/dashboard">New Summary</a>"#
    } else {
        ""
    };
    let selected_id = view.selected.map(|snippet| snippet.id.as_str());

    DASHBOARD_TEMPLATE
        .replace("{{ERROR}}", &error_banner(view.error))
        .replace("{{EDITOR_TITLE}}", editor_title)
        .replace("{{NEW_LINK}}", new_link)
        .replace("{{SUMMARY}}", &summary_block(view.selected))
        .replace("{{SNIPPETS}}", &snippet_items(view.snippets, selected_id))
        .replace("{{USERNAME}}", &escape_html(&view.user.username))
        .replace("{{TEXT}}", &escape_html(view.text_buffer))
}

fn error_banner(error: Option<&str>) -> String {
    match error {
        Some(message) => format!(r#"<div class="error">{}</div>"#, escape_html(message)),
        None => String::new(),
    }
}

fn summary_block(selected: Option<&Snippet>) -> String {
    match selected {
        Some(snippet) => format!(
            concat!(
                r#"<div class="summary"><h3>AI Summary</h3><p>{summary}</p>"#,
                r#"<p class="created">Created: {created}</p></div>"#
            ),
            summary = escape_html(&snippet.summary),
            created = escape_html(&display_date(&snippet.created_at)),
        ),
        None => String::new(),
    }
}

fn snippet_items(snippets: &[Snippet], selected_id: Option<&str>) -> String {
    if snippets.is_empty() {
        return r#"<li class="empty">No summaries yet</li>"#.to_string();
    }
    snippets
        .iter()
        .map(|snippet| {
            let class = if selected_id == Some(snippet.id.as_str()) {
                " class=\"selected\""
            } else {
                ""
            };
            format!(
                concat!(
                    "<li{class}>",
                    r#"<a href="/dashboard?selected={id}">"#,
                    r#"<p class="preview">{preview}</p>"#,
                    r#"<p class="date">{date}</p>"#,
                    "</a>",
                    r#"<form method="post" action="/dashboard" "#,
                    r#"onsubmit="return confirm('Are you sure you want to delete this snippet?')">"#,
                    r#"<input type="hidden" name="intent" value="delete">"#,
                    r#"<input type="hidden" name="id" value="{id}">"#,
                    r#"<button type="submit" class="delete" title="Delete snippet">Delete</button>"#,
                    "</form></li>"
                ),
                class = class,
                id = escape_html(&snippet.id),
                preview = escape_html(&snippet.summary),
                date = escape_html(&display_date(&snippet.created_at)),
            )
        })
        .collect()
}

/// Date part of an RFC-3339 timestamp; backend garbage is shown verbatim
/// rather than failing the page.
fn display_date(timestamp: &str) -> String {
    OffsetDateTime::parse(timestamp, &Rfc3339).map_or_else(
        |_| timestamp.to_string(),
        |dt| format!("{:04}-{:02}-{:02}", dt.year(), u8::from(dt.month()), dt.day()),
    )
}

pub(crate) fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "views_test.rs"]
mod tests;
