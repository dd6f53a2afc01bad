//! login / logout / status / init

use anyhow::Result;
use apdesk_core::notification::Notification;
use apdesk_core::session::UserIdentity;
use apdesk_infrastructure::ConfigService;
use colored::Colorize;

use crate::app::AppContext;

pub async fn login(ctx: &AppContext, user: &str) -> Result<()> {
    let user = user.trim();
    if user.is_empty() {
        anyhow::bail!("User name must not be empty");
    }
    ctx.guard.login(&UserIdentity::new(user)).await?;
    ctx.notifier
        .notify(Notification::success(format!("Logged in as {}", user)));
    Ok(())
}

pub async fn logout(ctx: &AppContext) -> Result<()> {
    ctx.guard.logout().await;
    ctx.notifier.notify(Notification::info("Logged out"));
    Ok(())
}

pub async fn status(ctx: &AppContext) -> Result<()> {
    let state = ctx.guard.state();
    let user = ctx.guard.current_user().await;

    println!("{}", "=== APDESK ===".bright_magenta().bold());
    match (state.is_authenticated(), user) {
        (true, Some(identity)) => println!(
            "Session: {} ({}, since {})",
            "authenticated".green(),
            identity.name,
            identity.logged_in_at.format("%Y-%m-%d %H:%M UTC")
        ),
        (true, None) => println!("Session: {}", "authenticated".green()),
        (false, _) => println!("Session: {}", "anonymous".yellow()),
    }
    println!("API:     {}", ctx.config.api.base_url);
    println!("Config:  {}", ctx.config_service.path().display());
    if let Ok(logs) = ctx.paths.logs_dir() {
        println!("Logs:    {}", logs.display());
    }
    Ok(())
}

/// Writes the default config file if there is none yet.
pub fn init(service: &ConfigService) -> Result<()> {
    if service.ensure_exists()? {
        println!("{} {}", "Created".green(), service.path().display());
    } else {
        println!("Config already exists at {}", service.path().display());
    }
    Ok(())
}
