//! Basic example demonstrating the IntelOwl API client.
//!
//! Run with:
//! ```
//! INTELOWL_TOKEN=your-token INTELOWL_URL=http://localhost:80 cargo run --example basic
//! ```

use std::time::Duration;

use intelowl::{Context, IntelOwlClient, ObservableAnalysisParams, TagParams};

#[tokio::main]
async fn main() -> intelowl::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating IntelOwl client...");
    let client = IntelOwlClient::from_env()?;
    println!("Connected to: {}", client.api().base_url());

    // Every call in this demo must finish within a minute
    let ctx = Context::background().with_timeout(Duration::from_secs(60));

    println!("\n--- Your Access ---");
    let access = client.users.access(&ctx).await?;
    println!(
        "Submissions: {} total, {} this month",
        access.total_submissions, access.month_submissions
    );

    println!("\n--- Tags ---");
    let tags = client.tags.list(&ctx).await?;
    for tag in &tags {
        println!("  - {} ({}) #{}", tag.label, tag.color, tag.id);
    }

    let tag = match tags.iter().find(|t| t.label == "demo") {
        Some(existing) => existing.clone(),
        None => {
            client
                .tags
                .create(&ctx, &TagParams::new("demo", "#1c71d8"))
                .await?
        }
    };

    println!("\n--- Analyzers ---");
    let analyzers = client.analyzers.list(&ctx).await?;
    let dns: Vec<String> = analyzers
        .iter()
        .filter(|a| !a.disabled && a.supports_observable("domain"))
        .map(|a| a.name.clone())
        .collect();
    println!("{} analyzers, {} usable for domains", analyzers.len(), dns.len());

    println!("\n--- Submitting an Observable ---");
    let mut params = ObservableAnalysisParams::new("google.com");
    params.observable_classification = "domain".to_string();
    params.basic.analyzers_requested = dns.into_iter().take(3).collect();
    params.basic.tags_labels = vec![tag.label.clone()];

    let submitted = client.analyses.observable(&ctx, &params).await?;
    println!(
        "Job {} {} (analyzers: {})",
        submitted.job_id,
        submitted.status,
        submitted.analyzers_running.join(", ")
    );
    for warning in &submitted.warnings {
        println!("  warning: {warning}");
    }

    let job = client.jobs.get(&ctx, submitted.job_id).await?;
    println!("Job {} is {:?}", job.id, job.status);

    // Rejections come back as client errors carrying the raw server body
    println!("\n--- Error Handling ---");
    match client.tags.get(&ctx, u64::MAX).await {
        Ok(tag) => println!("Unexpectedly found tag {}", tag.label),
        Err(e) => match e.as_client() {
            Some(rejected) => println!("Server said {}: {}", rejected.status_code, rejected.message),
            None => println!("Transport failure: {e}"),
        },
    }

    println!("\nDone!");
    Ok(())
}
