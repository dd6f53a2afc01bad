//! Approval commands.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use apdesk_application::workflow::load_client_options;
use apdesk_application::ReplacementOutcome;
use apdesk_core::approval::{AccountType, ApprovalForm};
use apdesk_core::client::ClientId;
use apdesk_core::document::ReplacementPicker;
use apdesk_core::format::format_file_size;
use apdesk_core::route::Route;
use apdesk_infrastructure::PresetPicker;
use colored::Colorize;

use crate::app::AppContext;
use crate::terminal::InteractivePicker;

pub async fn list(ctx: &AppContext) -> Result<()> {
    ctx.enter(Route::Approvals).await?;
    let mut book = ctx.approval_book();
    let records = book.refresh().await.context("Failed to fetch approvals")?;

    if records.is_empty() {
        println!("{}", "No approvals yet.".bright_black());
        return Ok(());
    }
    println!(
        "{}",
        format!(
            "{:>5}  {:<20} {:<12} {:<16} {:>14}  {}",
            "ID", "Client", "Account", "Number", "Amount", "PDF"
        )
        .bold()
    );
    for record in records {
        println!(
            "{:>5}  {:<20} {:<12} {:<16} {:>14}  {}",
            record.id,
            record.manager_label(),
            record
                .account_type
                .map(|t| t.to_string())
                .unwrap_or_default(),
            record.account_number.as_deref().unwrap_or(""),
            record.amount.map(|a| a.to_string()).unwrap_or_default(),
            if record.has_document() {
                record.archive_file_name()
            } else {
                "-".to_string()
            }
        );
    }
    Ok(())
}

pub struct SendArgs {
    pub client: Option<ClientId>,
    pub account_type: Option<AccountType>,
    pub account_number: String,
    pub amount: String,
    pub replacement: Option<PathBuf>,
    pub no_replacement: bool,
}

pub async fn send(ctx: &AppContext, args: SendArgs) -> Result<()> {
    ctx.enter(Route::SendApproval).await?;

    let mut form = ApprovalForm::new()
        .with_account_number(args.account_number)
        .with_amount(args.amount);
    form.account_type = args.account_type;
    if let Some(id) = args.client {
        let options = load_client_options(ctx.api.as_ref(), ctx.notifier.as_ref()).await;
        match options.into_iter().find(|o| o.id == id) {
            Some(option) => form = form.with_client(option),
            None => tracing::warn!("Client {} is not in the client list", id),
        }
    }

    let picker: Box<dyn ReplacementPicker> = match (args.replacement, args.no_replacement) {
        (Some(path), _) => Box::new(PresetPicker::new(Some(path))),
        (None, true) => Box::new(PresetPicker::declined()),
        (None, false) => Box::new(InteractivePicker),
    };

    let mut workflow = ctx.workflow();
    let report = workflow.run(&form, picker.as_ref()).await?;

    if let Some(record) = &report.record {
        println!("Approval {} created.", record.id);
    }
    if let Some(document) = &report.document {
        println!(
            "Document saved to {} ({})",
            document.path.display(),
            format_file_size(document.size)
        );
    }
    match report.replacement {
        Some(ReplacementOutcome::Uploaded) => println!("Edited PDF uploaded."),
        Some(ReplacementOutcome::Declined) => {
            println!("{}", "No edited PDF uploaded.".bright_black())
        }
        Some(ReplacementOutcome::Failed) | None => {}
    }

    if !report.succeeded() {
        bail!("Approval not completed ({})", report.final_state);
    }
    Ok(())
}
