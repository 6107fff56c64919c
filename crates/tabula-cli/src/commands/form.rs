//! Schema-driven form command

use crate::console::CliConsole;
use crate::prompts;
use std::sync::Arc;
use tabula_core::http::{ReqwestTransport, RetryingTransport};
use tabula_core::{ClientConfig, DynamicForm, FormType, FormValues, TabulaError, TabulaResult};

/// Arguments of `tabula form`
pub struct FormArgs {
    pub schema: String,
    pub submit: String,
    pub topic: String,
    pub update: bool,
    pub initial: Option<String>,
}

/// Mount a form from its schema, prompt for each field and submit it
pub async fn run(config: &ClientConfig, console: &CliConsole, args: FormArgs) -> TabulaResult<()> {
    let transport = RetryingTransport::new(ReqwestTransport::new(config)?, config.retry.clone());
    let form_type = if args.update {
        FormType::Update
    } else {
        FormType::Create
    };

    let mut form = DynamicForm::new(
        Arc::new(transport),
        args.topic,
        form_type,
        config.resolve(&args.schema),
        config.resolve(&args.submit),
    );
    if let Some(initial) = &args.initial {
        let value: serde_json::Value = serde_json::from_str(initial)?;
        if !value.is_object() {
            return Err(TabulaError::invalid_input_field(
                "initial values must be a JSON object",
                "initial",
            ));
        }
        form = form.with_initial(FormValues::from_json(&value));
    }

    form.mount().await?;
    console.print_header(&form.title());

    for control in form.controls() {
        let value = prompts::prompt_control(&control)?;
        form.set_value(&control.key, &value)?;
    }

    if !prompts::confirm(&format!("{}?", form.title()))? {
        form.cancel();
        console.warn("Form cancelled");
        return Ok(());
    }

    form.submit()?;
    if let Some(response) = form.settle().await? {
        console.success(&format!("Submitted with status {}", response.status));
    }
    Ok(())
}
