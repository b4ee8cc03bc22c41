// src/main.rs
// =============================================================================
// Entry point of the repo-scout CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr) and the GitHub client
// 3. Mount the search widget and feed it queries
// 4. Print settled results and exit with a proper code
//    (0 = results shown, 1 = the search ended in an error, 2 = internal error)
// =============================================================================

mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, GlobalOptions};
use repo_scout::logging::init_tracing;
use repo_scout::widget::watch_lines;
use repo_scout::{GithubClient, SearchWidget, WidgetSnapshot};
use tokio::io::BufReader;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(cli.options.debug)?;

    match cli.command {
        Commands::Search { username, json } => handle_search(&cli.options, &username, json).await,
        Commands::Watch { initial, json } => handle_watch(&cli.options, &initial, json).await,
    }
}

fn mount_widget(options: &GlobalOptions, default_query: &str) -> Result<SearchWidget> {
    let client =
        GithubClient::new(&options.client_config()).context("failed to set up GitHub client")?;
    Ok(SearchWidget::mount(
        Arc::new(client),
        options.widget_config(default_query),
    ))
}

// Handles the 'search' subcommand: mount with the username, wait, print
async fn handle_search(options: &GlobalOptions, username: &str, json: bool) -> Result<i32> {
    let widget = mount_widget(options, username)?;
    let snapshot = widget.settled().await;

    print_snapshot(&snapshot, json)?;

    if snapshot.error.is_some() {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Handles the 'watch' subcommand
//
// Each stdin line is a set_query; settled results are printed as they come.
// Returns once stdin is closed and the last query has been printed.
async fn handle_watch(options: &GlobalOptions, initial: &str, json: bool) -> Result<i32> {
    let widget = mount_widget(options, initial)?;
    let stdin = BufReader::new(tokio::io::stdin());

    watch_lines(&widget, stdin, |snapshot| print_snapshot(snapshot, json)).await?;

    Ok(0)
}

// Prints a settled snapshot either as a table or JSON
fn print_snapshot(snapshot: &WidgetSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
    } else {
        print_table(snapshot);
    }
    Ok(())
}

fn print_table(snapshot: &WidgetSnapshot) {
    println!("🔍 {}", snapshot.query);

    if let Some(error) = &snapshot.error {
        println!("❌ {}", error);
        println!();
        return;
    }

    if snapshot.sorted_results.is_empty() {
        println!("⚠️  No repositories found");
        println!();
        return;
    }

    println!("{:<45} {:>8} {:>7}  {}", "REPOSITORY", "STARS", "FORKS", "URL");
    println!("{}", "=".repeat(105));

    for repo in &snapshot.sorted_results {
        println!(
            "{:<45} {:>8} {:>7}  {}",
            truncate(&repo.full_name, 45),
            repo.stargazers_count,
            repo.forks,
            repo.html_url
        );
    }

    let stars: u64 = snapshot.sorted_results.iter().map(|r| r.stargazers_count).sum();
    println!();
    println!("📊 Summary:");
    println!("   📋 Repositories: {}", snapshot.sorted_results.len());
    println!("   ⭐ Stars: {}", stars);
    println!();
}

// Cuts long names on a char boundary so the columns stay aligned
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}
