use anyhow::Result;
use apdesk_application::DashboardStats;
use apdesk_core::route::Route;
use colored::Colorize;

use crate::app::AppContext;

pub async fn show(ctx: &AppContext) -> Result<()> {
    ctx.enter(Route::Dashboard).await?;
    let stats = DashboardStats::load(ctx.api.as_ref()).await?;

    println!("{}", "=== Dashboard ===".bright_magenta().bold());
    println!("Clients:    {}", stats.clients);
    println!("Approvals:  {}", stats.approvals);
    println!("Documents:  {}", stats.documents);
    println!();
    let nav: Vec<String> = Route::navigation()
        .iter()
        .map(|r| format!("{} ({})", r, r.path()))
        .collect();
    println!("{}", nav.join("  |  ").bright_black());
    Ok(())
}
