//! Table commands: list, create, edit and delete

use crate::console::CliConsole;
use crate::prompts::{self, AssumeYes, TerminalConfirmer};
use tabula_core::record::fields;
use tabula_core::store::Confirmer;
use tabula_core::{
    ClientConfig, CreateForm, DeleteOutcome, SaveOutcome, TableController, TabulaResult,
};

async fn open_table(config: &ClientConfig, console: &CliConsole) -> TabulaResult<TableController> {
    let mut table = TableController::from_config(config)?;
    let count = table.load().await?;
    console.info(&format!("loaded {} machines", count));
    Ok(table)
}

/// Print every machine
pub async fn list(config: &ClientConfig, console: &CliConsole) -> TabulaResult<()> {
    let table = open_table(config, console).await?;
    console.print_header("Machines");
    console.print_table(table.columns(), table.records());
    Ok(())
}

/// Walk the user through the creation form and submit it
pub async fn create(config: &ClientConfig, console: &CliConsole) -> TabulaResult<()> {
    let mut table = open_table(config, console).await?;
    let mut form = table.create_form();
    form.open();

    console.print_header(CreateForm::TITLE);
    for control in form.controls() {
        let value = prompts::prompt_control(&control)?;
        form.set_value(&control.key, &value)?;
    }

    if !prompts::confirm(&format!("{}?", CreateForm::TITLE))? {
        form.cancel();
        console.warn("Creation cancelled");
        return Ok(());
    }

    if let Some(created) = table.submit_create_form(&mut form).await? {
        console.success(&format!("Created machine {} ({})", created.name, created.id));
    }
    Ok(())
}

/// Edit a row inline; fields not given on the command line are prompted for
pub async fn edit(
    config: &ClientConfig,
    console: &CliConsole,
    id: &str,
    name: Option<String>,
    location: Option<String>,
) -> TabulaResult<()> {
    let mut table = open_table(config, console).await?;
    table.begin_edit(id)?;

    let interactive = name.is_none() && location.is_none();
    let editable: Vec<(String, String)> = table
        .columns()
        .iter()
        .filter(|c| c.editable)
        .map(|c| (c.key.clone(), c.label.clone()))
        .collect();

    for (key, label) in editable {
        let given = match key.as_str() {
            fields::NAME => name.clone(),
            fields::LOCATION => location.clone(),
            _ => None,
        };
        let value = match given {
            Some(value) => Some(value),
            None if interactive => {
                let current = table
                    .editing()
                    .and_then(|edit| edit.draft.get(&key))
                    .unwrap_or_default();
                Some(prompts::prompt_text(&label, &current)?)
            }
            None => None,
        };
        if let Some(value) = value {
            table.set_edit_value(&key, &value)?;
            if let Some(message) = table.blur(&key)? {
                console.warn(&message);
            }
        }
    }

    match table.save_edit().await? {
        SaveOutcome::Saved(machine) => {
            console.success(&format!("Updated machine {}", machine.id));
        }
        SaveOutcome::Blocked { errors } => {
            table.cancel_edit();
            console.warn(&format!(
                "Not saved: {} field{} need{} a value",
                errors,
                if errors == 1 { "" } else { "s" },
                if errors == 1 { "s" } else { "" }
            ));
        }
        SaveOutcome::Rejected { status } => {
            table.cancel_edit();
            console.error(&format!("Server rejected the update with status {}", status));
        }
    }
    Ok(())
}

/// Delete a row after confirmation
pub async fn delete(
    config: &ClientConfig,
    console: &CliConsole,
    id: &str,
    yes: bool,
) -> TabulaResult<()> {
    let mut table = open_table(config, console).await?;
    let confirmer: &dyn Confirmer = if yes { &AssumeYes } else { &TerminalConfirmer };

    match table.delete(id, confirmer).await? {
        DeleteOutcome::Deleted(machine) => {
            console.success(&format!("Deleted machine {} ({})", machine.name, machine.id));
        }
        DeleteOutcome::Declined => console.warn("Deletion cancelled"),
        DeleteOutcome::Rejected { status } => {
            console.error(&format!("Server rejected the delete with status {}", status));
        }
    }
    Ok(())
}
