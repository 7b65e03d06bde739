use serde_json::json;

use crate::cli::output::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::client::ApiClient;

pub async fn handle(
    api: &ApiClient,
    user: &str,
    password: &str,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match api.login(user, password).await {
        Ok(token) => {
            output_success(
                output_format,
                &format!("Logged in as {}", user),
                Some(json!({ "token": token })),
            )?;
            if output_format == OutputFormat::Text {
                println!("export JOBBOARD_TOKEN={}", token);
            }
            Ok(())
        }
        Err(e) => {
            output_error(output_format, &e.to_string())?;
            anyhow::bail!("login failed")
        }
    }
}
