use std::path::PathBuf;

use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::admin::{
    CreatorController, EditorController, FormField, ListController, Navigation,
};
use crate::admin::list::ListView;
use crate::cli::output::{output_success, CliNotifier, ConsolePrompt};
use crate::cli::OutputFormat;
use crate::client::ApiClient;

#[derive(Subcommand)]
pub enum JobsCommands {
    #[command(about = "List all postings")]
    List,

    #[command(about = "Create a posting")]
    Post {
        #[arg(long)]
        title: String,
        #[arg(long)]
        company: String,
        #[arg(long)]
        location: String,
        #[arg(long, default_value = "Remote", help = "Remote, Onsite or Hybrid")]
        job_type: String,
        #[arg(long, default_value = "Junior", help = "Intern, Junior, Mid or Senior")]
        level: String,
        #[arg(long)]
        apply_url: String,
        #[arg(long, default_value = "", help = "Description as an HTML fragment")]
        description: String,
        #[arg(long, help = "Logo image file, at most 2 MiB")]
        logo: Option<PathBuf>,
    },

    #[command(about = "Edit a posting; only the given fields change")]
    Edit {
        #[arg(help = "Posting id")]
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        job_type: Option<String>,
        #[arg(long)]
        level: Option<String>,
        #[arg(long)]
        apply_url: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    #[command(about = "Delete a posting")]
    Delete {
        #[arg(help = "Posting id")]
        id: Uuid,
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

pub async fn handle(
    api: &ApiClient,
    cmd: JobsCommands,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        JobsCommands::List => list(api, output_format).await,
        JobsCommands::Post {
            title,
            company,
            location,
            job_type,
            level,
            apply_url,
            description,
            logo,
        } => {
            let notifier = CliNotifier::new(output_format);
            let mut controller = CreatorController::new();
            controller.set(FormField::Title, &title)?;
            controller.set(FormField::Company, &company)?;
            controller.set(FormField::Location, &location)?;
            controller.set(FormField::JobType, &job_type)?;
            controller.set(FormField::ExperienceLevel, &level)?;
            controller.set(FormField::ApplyUrl, &apply_url)?;
            controller.set_description(&description);

            if let Some(path) = logo {
                controller.attach_logo(&path, &notifier).await;
                if notifier.saw_error() {
                    anyhow::bail!("logo was not attached");
                }
            }

            match controller.submit(api, &notifier).await {
                Navigation::ToList => Ok(()),
                Navigation::Stay => anyhow::bail!("job was not created"),
            }
        }
        JobsCommands::Edit {
            id,
            title,
            company,
            location,
            job_type,
            level,
            apply_url,
            description,
        } => {
            let notifier = CliNotifier::new(output_format);
            let mut controller = EditorController::new(id);

            if controller.load(api, &notifier).await == Navigation::ToList {
                anyhow::bail!("job {} could not be loaded", id);
            }

            let changes = [
                (FormField::Title, title),
                (FormField::Company, company),
                (FormField::Location, location),
                (FormField::JobType, job_type),
                (FormField::ExperienceLevel, level),
                (FormField::ApplyUrl, apply_url),
            ];
            for (field, value) in changes {
                if let Some(value) = value {
                    controller.set(field, &value)?;
                }
            }
            if let Some(html) = description {
                controller.set_description(&html);
            }

            match controller.submit(api, &notifier).await {
                Navigation::ToList => Ok(()),
                Navigation::Stay => anyhow::bail!("job was not updated"),
            }
        }
        JobsCommands::Delete { id, yes } => {
            let notifier = CliNotifier::new(output_format);
            let gate = ConsolePrompt { assume_yes: yes };
            let mut controller = ListController::new();
            controller.load(api).await;

            controller.delete(api, id, &gate, &notifier).await;
            if notifier.saw_error() {
                anyhow::bail!("job was not deleted");
            }
            Ok(())
        }
    }
}

async fn list(api: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut controller = ListController::new();
    controller.load(api).await;

    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ "jobs": controller.jobs() }))?
            );
            Ok(())
        }
        OutputFormat::Text => {
            match controller.view() {
                ListView::Empty => {
                    // The explicit empty-state row.
                    println!("No jobs found.");
                }
                ListView::Rows(rows) => {
                    for row in rows {
                        println!(
                            "{}  {}  {}  ({})",
                            row.id,
                            row.title,
                            row.company,
                            row.posted.format("%Y-%m-%d")
                        );
                    }
                }
                ListView::Loading => unreachable!("load has completed"),
            }
            output_success(
                output_format,
                &format!("{} job(s)", controller.jobs().len()),
                None,
            )
        }
    }
}
