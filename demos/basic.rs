//! Basic example demonstrating the Hangar API client.
//!
//! Run with:
//! ```
//! cargo run --example basic
//! ```
//!
//! Set `HANGAR_API_TOKEN` to send a bearer token; the public API works without one.

use hangarapi::{
    get_download_url, get_latest_release_version, get_project_stats, ClientConfig, Get,
    HangarClient, List, ListOptions, Platform, Project, ProjectListQuery, StatsRange,
};

#[tokio::main]
async fn main() -> hangarapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    println!("Creating Hangar client...");
    let client = HangarClient::new(ClientConfig {
        token: std::env::var("HANGAR_API_TOKEN").ok(),
        ..Default::default()
    })?;
    println!("Connected to: {}", client.base_url());

    // List first page of projects
    println!("\n--- Listing Projects (first page) ---");
    let query = ProjectListQuery {
        category: Some("gameplay".to_string()),
    };
    let projects_page = Project::list_page(&client, &query, ListOptions::new(10, 0)).await?;
    println!(
        "Found {} projects (total: {})",
        projects_page.len(),
        projects_page.pagination.count
    );

    for project in &projects_page {
        println!(
            "  - {} by {} ({} downloads)",
            project.name,
            project.owner(),
            project.stats.downloads
        );
    }

    // Get a specific project (using the first one from the list)
    if let Some(first_project) = projects_page.result.first() {
        println!("\n--- Getting Project Details ---");
        let project = Project::get(&client, first_project.slug().to_string()).await?;
        println!("Project: {}", project.name);
        println!("  ID: {}", project.id);
        println!("  Category: {}", project.category);
        println!("  License: {}", project.license_label());
        println!("  Stars: {}", project.stats.stars);

        // Latest release and its download
        println!("\n--- Latest Release ---");
        match get_latest_release_version(&client, project.slug()).await {
            Ok(version) => {
                println!("  Version: {} ({})", version.name, version.channel.name);
                println!("  Platforms: {}", version.platforms().join(", "));

                let url = get_download_url(
                    &client,
                    project.owner(),
                    project.slug(),
                    &version.name,
                    Some(Platform::Paper),
                )
                .await;
                match url {
                    Ok(url) => println!("  Download: {url}"),
                    Err(e) => println!("  Download: unavailable ({e})"),
                }
            }
            Err(e) if e.is_not_found() => println!("  No release published"),
            Err(e) => return Err(e),
        }

        // Daily statistics for the server's default range
        println!("\n--- Statistics ---");
        let stats = get_project_stats(&client, project.slug(), &StatsRange::default()).await?;
        let total = hangarapi::totals(&stats);
        println!(
            "  {} days: {} downloads, {} views",
            stats.len(),
            total.downloads,
            total.views
        );
    }

    println!("\nDone!");
    Ok(())
}
