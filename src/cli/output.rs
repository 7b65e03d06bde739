use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::{json, Value};

use crate::admin::{ConfirmGate, Notice, Notifier};
use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(Value::Object(extra)) = data {
                response.as_object_mut().unwrap().extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "success": false,
                    "error": message
                }))?
            );
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Controller notice sink that prints through the standard output helpers
/// and remembers whether anything went wrong, so command handlers can exit
/// non-zero.
pub struct CliNotifier {
    format: OutputFormat,
    saw_error: AtomicBool,
}

impl CliNotifier {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            saw_error: AtomicBool::new(false),
        }
    }

    pub fn saw_error(&self) -> bool {
        self.saw_error.load(Ordering::SeqCst)
    }
}

impl Notifier for CliNotifier {
    fn notify(&self, notice: Notice) {
        let result = match &notice {
            Notice::Success(message) => output_success(self.format, message, None),
            Notice::Error(message) => {
                self.saw_error.store(true, Ordering::SeqCst);
                output_error(self.format, message)
            }
        };
        if let Err(e) = result {
            tracing::error!("failed to print notice: {}", e);
        }
    }
}

/// Interactive destructive-action gate. `--yes` turns it into a pass.
pub struct ConsolePrompt {
    pub assume_yes: bool,
}

impl ConfirmGate for ConsolePrompt {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim(), "y" | "Y" | "yes")
    }
}
