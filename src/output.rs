//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable detail views, the
//! `tabled` row types used for listings, and the renderers behind
//! `--output table|json`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};

use crate::models::{
    role_labels, Author, DailyStats, Project, ProjectMember, ProjectPage, StaffMember, User,
    Version,
};
use crate::pagination::Page;

/// Output format selected with `--output`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable tables and detail views.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--output json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

impl PrettyPrint for Project {
    fn pretty_print(&self) -> String {
        let header = format!("Project: {}/{}", self.owner(), self.slug());
        let divider = "─".repeat(header.chars().count().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("ID:             {}", self.id),
            format!("Name:           {}", self.name),
            format!("Slug:           {}", self.slug()),
            format!("Owner:          {}", self.owner()),
            format!("Category:       {}", self.category),
        ];

        if !self.description.is_empty() {
            lines.push(format!("Description:    {}", self.description));
        }

        lines.push(format!(
            "Stats:          {} views, {} downloads, {} stars, {} watchers",
            self.stats.views, self.stats.downloads, self.stats.stars, self.stats.watchers
        ));

        let license = self.license_label();
        if !license.is_empty() {
            lines.push(format!("License:        {}", license));
        }

        if !self.settings.tags.is_empty() {
            lines.push(format!("Tags:           {}", self.settings.tags.join(", ")));
        }

        if let Some(ref created) = self.created_at {
            lines.push(format!("Created:        {}", created.format(DATE_FORMAT)));
        }

        if let Some(ref updated) = self.last_updated {
            lines.push(format!("Last Updated:   {}", updated.format(DATE_FORMAT)));
        }

        if !self.visibility.is_empty() {
            lines.push(format!("Visibility:     {}", self.visibility));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Version {
    fn pretty_print(&self) -> String {
        let header = format!("Version: {}", self.name);
        let divider = "─".repeat(header.chars().count().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("ID:             {}", self.id),
            format!("Author:         {}", self.author),
            format!("Channel:        {}", self.channel.name),
        ];

        if let Some(ref created) = self.created_at {
            lines.push(format!("Created:        {}", created.format(DATETIME_FORMAT)));
        }

        lines.push(format!("Visibility:     {}", self.visibility));
        lines.push(format!("Review State:   {}", self.review_state));
        lines.push(format!("Downloads:      {}", self.stats.total_downloads));

        if !self.downloads.is_empty() {
            lines.push(format!("Platforms:      {}", self.platforms().join(", ")));
        }

        if !self.description.is_empty() {
            lines.push(String::new());
            lines.push("Description:".to_string());
            lines.push(self.description.clone());
        }

        lines.join("\n")
    }
}

impl PrettyPrint for User {
    fn pretty_print(&self) -> String {
        let header = format!("User: {}", self.name);
        let divider = "─".repeat(header.chars().count().max(30));

        let mut lines = vec![header, divider];

        if let Some(ref tagline) = self.tagline {
            lines.push(format!("Tagline:        {}", tagline));
        }

        if let Some(ref joined) = self.join_date {
            lines.push(format!("Joined:         {}", joined.format(DATE_FORMAT)));
        }

        lines.push(format!("Projects:       {}", self.project_count));
        lines.push(format!("Locked:         {}", if self.locked { "yes" } else { "no" }));

        if !self.roles.is_empty() {
            lines.push(format!("Roles:          {}", role_labels(&self.roles)));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for ProjectPage {
    fn pretty_print(&self) -> String {
        format!("# {} ({})\n\n{}", self.name, self.slug, self.contents)
    }
}

// Table row types for listings

fn date_cell(date: Option<&chrono::DateTime<chrono::Utc>>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

#[derive(Tabled)]
pub struct ProjectRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Slug")]
    pub slug: String,
    #[tabled(rename = "Owner")]
    pub owner: String,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Downloads")]
    pub downloads: u64,
    #[tabled(rename = "Stars")]
    pub stars: u64,
    #[tabled(rename = "Watchers")]
    pub watchers: u64,
}

impl From<&Project> for ProjectRow {
    fn from(p: &Project) -> Self {
        Self {
            name: p.name.clone(),
            slug: p.slug().to_string(),
            owner: p.owner().to_string(),
            category: p.category.clone(),
            downloads: p.stats.downloads,
            stars: p.stats.stars,
            watchers: p.stats.watchers,
        }
    }
}

#[derive(Tabled)]
pub struct UserRow {
    #[tabled(rename = "Username")]
    pub name: String,
    #[tabled(rename = "Projects")]
    pub projects: u64,
    #[tabled(rename = "Joined")]
    pub joined: String,
    #[tabled(rename = "Roles")]
    pub roles: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            name: u.name.clone(),
            projects: u.project_count,
            joined: date_cell(u.join_date.as_ref()),
            roles: role_labels(&u.roles),
        }
    }
}

impl From<&Author> for UserRow {
    fn from(a: &Author) -> Self {
        Self {
            name: a.name.clone(),
            projects: a.project_count,
            joined: date_cell(a.join_date.as_ref()),
            roles: role_labels(&a.roles),
        }
    }
}

impl From<&StaffMember> for UserRow {
    fn from(s: &StaffMember) -> Self {
        Self {
            name: s.name.clone(),
            projects: s.project_count,
            joined: date_cell(s.join_date.as_ref()),
            roles: role_labels(&s.roles),
        }
    }
}

#[derive(Tabled)]
pub struct MemberRow {
    #[tabled(rename = "Username")]
    pub user: String,
    #[tabled(rename = "Roles")]
    pub roles: String,
    #[tabled(rename = "Accepted")]
    pub accepted: String,
}

impl From<&ProjectMember> for MemberRow {
    fn from(m: &ProjectMember) -> Self {
        Self {
            user: m.user.clone(),
            roles: role_labels(&m.roles),
            accepted: if m.accepted { "Yes" } else { "No (Pending)" }.to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct StatsRow {
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Downloads")]
    pub downloads: u64,
    #[tabled(rename = "Views")]
    pub views: u64,
}

impl From<(&String, &DailyStats)> for StatsRow {
    fn from((date, day): (&String, &DailyStats)) -> Self {
        Self {
            date: date.clone(),
            downloads: day.downloads,
            views: day.views,
        }
    }
}

/// Pretty JSON for any serializable value.
pub fn render_json<T: Serialize + ?Sized>(data: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(data)
}

/// Render a table from rows.
pub fn render_table<R: Tabled>(rows: Vec<R>) -> String {
    Table::new(rows).to_string()
}

/// Render a page as a table followed by a `Total: N <noun>` footer.
///
/// The footer reports the server's total count, not the page length.
pub fn render_page<T, R, F>(page: &Page<T>, noun: &str, to_row: F) -> String
where
    R: Tabled,
    F: Fn(&T) -> R,
{
    let rows: Vec<R> = page.result.iter().map(to_row).collect();
    format!(
        "{}\n\nTotal: {} {}",
        render_table(rows),
        page.pagination.count,
        noun
    )
}

/// Render daily statistics in date order with a day-count footer.
pub fn render_stats(stats: &BTreeMap<String, DailyStats>) -> String {
    let rows: Vec<StatsRow> = stats.iter().map(StatsRow::from).collect();
    format!("{}\n\nTotal days: {}", render_table(rows), stats.len())
}
