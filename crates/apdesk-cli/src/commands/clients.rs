//! Client roster commands.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use apdesk_application::DeleteOutcome;
use apdesk_core::client::{ClientId, NewClient};
use apdesk_core::document::FileKind;
use apdesk_core::format::format_file_size;
use apdesk_core::route::Route;
use apdesk_infrastructure::uploads::read_uploaded_document;
use colored::Colorize;

use crate::app::AppContext;
use crate::terminal::PromptConfirmer;

pub async fn list(ctx: &AppContext) -> Result<()> {
    ctx.enter(Route::Clients).await?;
    let mut roster = ctx.roster();
    let clients = roster.refresh().await.context("Failed to fetch clients")?;

    if clients.is_empty() {
        println!("{}", "No clients yet.".bright_black());
        return Ok(());
    }
    println!(
        "{}",
        format!(
            "{:>5}  {:<20} {:<20} {:<30} {:<11} {}",
            "ID", "Manager", "Director", "Address", "Letterhead", "Signature"
        )
        .bold()
    );
    for client in clients {
        println!(
            "{:>5}  {:<20} {:<20} {:<30} {:<11} {}",
            client.id,
            client.manager,
            client.directors_name,
            client.address,
            yes_no(client.letter_head.is_some()),
            yes_no(client.signature.is_some())
        );
    }
    Ok(())
}

fn yes_no(present: bool) -> &'static str {
    if present { "yes" } else { "-" }
}

pub struct AddArgs {
    pub manager: String,
    pub director: String,
    pub address: String,
    pub letter_head: Option<PathBuf>,
    pub signature: Option<PathBuf>,
}

pub async fn add(ctx: &AppContext, args: AddArgs) -> Result<()> {
    ctx.enter(Route::AddClient).await?;

    let mut new_client = NewClient::new(args.manager, args.director, args.address);
    if let Some(path) = &args.letter_head {
        new_client = new_client.with_letter_head(read_uploaded_document(path).await?);
    }
    if let Some(path) = &args.signature {
        new_client = new_client.with_signature(read_uploaded_document(path).await?);
    }

    let mut roster = ctx.roster();
    let created = roster
        .create(&new_client)
        .await
        .context("Failed to add client")?;
    println!(
        "Client {} ({}) created; {} client(s) on file.",
        created.id,
        created.manager,
        roster.clients().len()
    );
    Ok(())
}

pub async fn delete(ctx: &AppContext, id: ClientId, assume_yes: bool) -> Result<()> {
    ctx.enter(Route::Clients).await?;
    let mut roster = ctx.roster();
    if let Err(e) = roster.refresh().await {
        tracing::warn!("Deleting {} without a fresh client list: {}", id, e);
    }

    match roster.delete(id, &PromptConfirmer::new(assume_yes)).await {
        DeleteOutcome::Deleted => {
            println!("Client {} deleted.", id);
            Ok(())
        }
        DeleteOutcome::Cancelled => {
            println!("{}", "Cancelled.".bright_black());
            Ok(())
        }
        DeleteOutcome::Failed => bail!("Client {} was not deleted", id),
    }
}

pub async fn download(
    ctx: &AppContext,
    kind: FileKind,
    id: ClientId,
    name: Option<&str>,
) -> Result<()> {
    ctx.enter(Route::Clients).await?;
    let Some(path) = ctx.roster().download(kind, id, name).await else {
        bail!("Download of {} for client {} failed (see log)", kind, id);
    };

    let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
    println!("Saved {} ({})", path.display(), format_file_size(size));
    Ok(())
}
