use std::time::Duration;

use crate::{
    landing::{Panel, PanelBody},
    types::{Role, Turn},
};

/// Format an elapsed time as `4.2s` or `3m 5s`
pub fn format_duration(d: Duration) -> String {
    let tenths = (d.as_secs_f64() * 10.0).round() as u64;
    if tenths < 600 {
        format!("{}.{}s", tenths / 10, tenths % 10)
    } else {
        let secs = (tenths + 5) / 10;
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "You",
        Role::Assistant => "Assistant",
    }
}

/// One transcript turn as `You: ...` / `Assistant: ...`
pub fn format_turn(turn: &Turn) -> String {
    format!("{}: {}", role_label(turn.role), turn.content.trim())
}

/// Panel as markdown: heading, description, body
pub fn format_panel(title: &str, panel: &Panel) -> String {
    let body = match &panel.body {
        PanelBody::Notice(notice) => format!("_{notice}_"),
        PanelBody::Error(message) => format!("**Error:** {message}"),
        PanelBody::Content(content) => content.trim().to_string(),
    };
    format!("## {}\n\n{}\n\n{}\n", title, panel.description, body)
}
