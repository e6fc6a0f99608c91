//! Navigation model for the admin shell.
//!
//! Pure functions only; the handler supplies table names and counts.

use serde::Serialize;
use std::collections::HashMap;

/// Base path the admin UI is mounted on; hrefs derive from it.
pub const ADMIN_BASE_PATH: &str = "/admin";

/// Visual variant of a sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavVariant {
    Default,
    Outline,
}

/// One entry in the admin sidebar: a fixed page or a browsable table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavEntry {
    pub title: String,
    pub href: String,
    /// Icon name consumed by the UI's icon set.
    pub icon: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    pub variant: NavVariant,
}

/// Build the sidebar model: the fixed Dashboard entry, then one entry per
/// table annotated with its row count. Tables keep their given order.
pub fn build_navigation(tables: &[String], counts: &HashMap<String, i64>) -> Vec<NavEntry> {
    let mut items = Vec::with_capacity(tables.len() + 1);
    items.push(NavEntry {
        title: "Dashboard".to_string(),
        href: ADMIN_BASE_PATH.to_string(),
        icon: "LayoutDashboard",
        count: None,
        variant: NavVariant::Default,
    });

    for table in tables {
        items.push(NavEntry {
            title: humanize(table),
            href: format!("{ADMIN_BASE_PATH}/{table}"),
            icon: icon_for_table(table),
            count: Some(counts.get(table).copied().unwrap_or(0)),
            variant: NavVariant::Outline,
        });
    }
    items
}

/// `"user_sessions"` -> `"User Sessions"`.
fn humanize(table: &str) -> String {
    table
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fixed keyword mapping from table name to sidebar icon.
fn icon_for_table(table: &str) -> &'static str {
    if table.contains("user") {
        "Users"
    } else if table.contains("session") {
        "Key"
    } else if table.contains("account") {
        "CreditCard"
    } else {
        "Database"
    }
}
