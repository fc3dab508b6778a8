//! Pure rendering of a display snapshot
//!
//! [`render`] turns a [`DisplayState`] into a list of element updates that the
//! page applies in place; [`render_page`] produces the whole document. Nothing
//! here touches the network or the shared state lock.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::Serialize;

use crate::model::{HealthStatus, Indicator, Message, MessageForm, MessagePane, Notice, Overall};
use crate::state::DisplayState;

pub const TIMESTAMP_ID: &str = "timestamp";
pub const API_STATUS_ID: &str = "api-status";
pub const DB_STATUS_ID: &str = "db-status";
pub const REDIS_STATUS_ID: &str = "redis-status";
pub const MESSAGE_COUNT_ID: &str = "message-count";
pub const MESSAGES_ID: &str = "messages";

pub const EMPTY_PLACEHOLDER: &str = "No messages yet. Be the first to post!";
pub const ERROR_PLACEHOLDER: &str =
    "Failed to load messages. Check that the backend service is running.";
pub const LOADING_PLACEHOLDER: &str = "Loading...";
const PENDING_TEXT: &str = "Checking...";

const DISPLAY_FORMAT: &str = "%Y/%-m/%-d %H:%M:%S";

const CLASS_OK: &str = "status-value ok";
const CLASS_ERROR: &str = "status-value error";
const CLASS_PENDING: &str = "status-value";

/// New content for one page element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementUpdate {
    pub id: &'static str,
    #[serde(flatten)]
    pub content: Content,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<&'static str>,
}

/// Element content: text is inserted literally, html is already escaped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Content {
    Text(String),
    Html(String),
}

impl ElementUpdate {
    fn text(id: &'static str, text: impl Into<String>, class: Option<&'static str>) -> Self {
        Self {
            id,
            content: Content::Text(text.into()),
            class,
        }
    }

    fn html(id: &'static str, html: String) -> Self {
        Self {
            id,
            content: Content::Html(html),
            class: None,
        }
    }

    /// Content as it appears inside the element's markup
    pub fn inner_html(&self) -> String {
        match &self.content {
            Content::Text(text) => escape_html(text),
            Content::Html(html) => html.clone(),
        }
    }
}

/// Compute the live element updates for a snapshot
pub fn render(state: &DisplayState) -> Vec<ElementUpdate> {
    let (api_text, api_class) = overall_display(&state.health);
    let (db_text, db_class) = indicator_display(state.health.database);
    let (redis_text, redis_class) = indicator_display(state.health.cache);

    vec![
        ElementUpdate::text(
            TIMESTAMP_ID,
            state
                .clock
                .map(|now| now.format(DISPLAY_FORMAT).to_string())
                .unwrap_or_default(),
            None,
        ),
        ElementUpdate::text(API_STATUS_ID, api_text, Some(api_class)),
        ElementUpdate::text(DB_STATUS_ID, db_text, Some(db_class)),
        ElementUpdate::text(REDIS_STATUS_ID, redis_text, Some(redis_class)),
        ElementUpdate::text(
            MESSAGE_COUNT_ID,
            state
                .stats
                .map(|s| s.total_messages.to_string())
                .unwrap_or_else(|| "-".to_string()),
            None,
        ),
        ElementUpdate::html(MESSAGES_ID, render_messages(&state.messages)),
    ]
}

fn overall_display(health: &HealthStatus) -> (String, &'static str) {
    match health.overall {
        Some(overall @ Overall::Healthy) => (overall.to_string(), CLASS_OK),
        Some(overall) => (overall.to_string(), CLASS_ERROR),
        None => (PENDING_TEXT.to_string(), CLASS_PENDING),
    }
}

fn indicator_display(indicator: Indicator) -> (String, &'static str) {
    let class = match indicator {
        Indicator::Ok => CLASS_OK,
        Indicator::Fail => CLASS_ERROR,
        Indicator::Unknown => CLASS_PENDING,
    };
    (indicator.to_string(), class)
}

/// Markup for the message list
pub fn render_messages(pane: &MessagePane) -> String {
    match pane {
        MessagePane::Loading => format!(r#"<p class="loading">{}</p>"#, LOADING_PLACEHOLDER),
        MessagePane::Empty => format!(r#"<p class="loading">{}</p>"#, EMPTY_PLACEHOLDER),
        MessagePane::Failed => format!(r#"<p class="error">{}</p>"#, ERROR_PLACEHOLDER),
        MessagePane::Items(messages) => messages.iter().map(render_message).collect(),
    }
}

fn render_message(message: &Message) -> String {
    format!(
        r#"<div class="message-item">
    <div class="message-header">
        <span class="message-author">{}</span>
        <span class="message-time">{}</span>
    </div>
    <div class="message-content">{}</div>
</div>
"#,
        escape_html(message.author_or_default()),
        escape_html(&format_time(message.created_at.as_deref())),
        escape_html(&message.content),
    )
}

/// Escape text for insertion into element content or a quoted attribute
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Format a backend timestamp in local time; empty when absent or unparseable.
///
/// The backend emits ISO-8601 without an offset, which is read as local time.
pub fn format_time(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .and_then(parse_timestamp)
        .map(|t| t.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_default()
}

fn parse_timestamp(value: &str) -> Option<DateTime<Local>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(value) {
        return Some(t.with_timezone(&Local));
    }
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    Local.from_local_datetime(&naive).earliest()
}

/// Render the full page for a snapshot.
///
/// `form` and `notice` belong to the visitor being answered: the values to
/// put back into the inputs and the outcome of their last submission.
pub fn render_page(state: &DisplayState, form: &MessageForm, notice: Option<Notice>) -> String {
    let updates = render(state);
    let find = |id: &str| updates.iter().find(|u| u.id == id);
    let element = |tag: &str, id: &str| match find(id) {
        Some(update) => format!(
            r#"<{tag} id="{id}" class="{class}">{inner}</{tag}>"#,
            tag = tag,
            id = id,
            class = update.class.unwrap_or(""),
            inner = update.inner_html(),
        ),
        None => format!(r#"<{tag} id="{id}"></{tag}>"#, tag = tag, id = id),
    };

    let notice_html = match notice {
        Some(n) => format!(
            r#"<div id="notice" class="notice {}">{}</div>"#,
            if n.is_success() { "ok" } else { "error" },
            escape_html(&n.to_string())
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>DevOps Demo Portal</title>
    <style>
        body {{ font-family: system-ui, sans-serif; max-width: 960px; margin: 0 auto; padding: 1rem; }}
        .status-value {{ font-weight: 600; color: #383d41; }}
        .status-value.ok {{ color: #155724; }}
        .status-value.error {{ color: #721c24; }}
        .notice {{ padding: 0.5rem 1rem; border-radius: 0.25rem; margin-bottom: 1rem; }}
        .notice.ok {{ background-color: #d4edda; }}
        .notice.error {{ background-color: #f8d7da; }}
        .message-item {{ border-bottom: 1px solid #dee2e6; padding: 0.5rem 0; }}
        .message-header {{ display: flex; justify-content: space-between; font-size: 0.85em; }}
        .message-author {{ font-weight: 600; }}
        .loading {{ color: #6c757d; }}
        .error {{ color: #721c24; }}
    </style>
    <script>
        function applyUpdates(updates) {{
            for (const u of updates) {{
                const el = document.getElementById(u.id);
                if (!el) continue;
                if ('text' in u) {{ el.textContent = u.text; }} else {{ el.innerHTML = u.html; }}
                if (u.class) {{ el.className = u.class; }}
            }}
        }}
        function refreshView() {{
            fetch('/api/view')
                .then(r => r.json())
                .then(applyUpdates)
                .catch(e => console.error('view refresh failed', e));
        }}
        setInterval(refreshView, 1000);
    </script>
</head>
<body>
    <h1>DevOps Demo Portal</h1>
    <p>Updated: {timestamp}</p>
    {notice}
    <section>
        <h2>System Status</h2>
        <p>API: {api}</p>
        <p>Database: {db}</p>
        <p>Cache: {redis}</p>
        <p>Messages: {count}</p>
    </section>
    <section>
        <h2>Post a Message</h2>
        <form id="message-form" method="post" action="/messages">
            <input id="author" name="author" placeholder="Your name" value="{author}">
            <textarea id="content" name="content" placeholder="Say something" required>{content}</textarea>
            <button type="submit">Send</button>
        </form>
    </section>
    <section>
        <h2>Messages</h2>
        {messages}
    </section>
</body>
</html>"#,
        timestamp = element("span", TIMESTAMP_ID),
        notice = notice_html,
        api = element("span", API_STATUS_ID),
        db = element("span", DB_STATUS_ID),
        redis = element("span", REDIS_STATUS_ID),
        count = element("span", MESSAGE_COUNT_ID),
        author = escape_html(&form.author),
        content = escape_html(&form.content),
        messages = element("div", MESSAGES_ID),
    )
}
