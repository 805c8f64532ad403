use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use crossing_app::aws;
use crossing_app::commands::{self, ReportOptions};
use crossing_app::config::{self, CredentialSource};
use crossing_app::state::Session;
use crossing_bedrock::narrate::BedrockNarrator;
use crossing_core::projection;
use crossing_core::store::AssessmentStore;
use crossing_schema::error::SchemaError;
use crossing_schema::field::FieldKind;
use crossing_schema::{CROSSING_ID, FormSchema};
use eyre::Result;

#[derive(Parser)]
#[command(name = "crossing", about = "Bridge pipeline crossing inspection records")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the form's sections and fields.
    Fields,
    /// Start a new assessment document in DIR.
    New {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        #[arg(long)]
        crossing_id: String,
    },
    /// Set a text, number, date or select field.
    Set {
        document: PathBuf,
        field: String,
        value: String,
    },
    /// Replace the selections of a checkbox group.
    SetGroup {
        document: PathBuf,
        field: String,
        values: Vec<String>,
    },
    /// Attach files to a photograph field.
    Attach {
        document: PathBuf,
        field: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Edit the comment of an attached file.
    Comment {
        document: PathBuf,
        field: String,
        index: usize,
        text: String,
    },
    /// Remove an attached file.
    Detach {
        document: PathBuf,
        field: String,
        index: usize,
    },
    /// Print the narrative text sent for summarisation.
    Narrative { document: PathBuf },
    /// Generate the DOCX report.
    Report {
        document: PathBuf,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Save the generated summary back into the document.
        #[arg(long)]
        keep_summary: bool,
    },
    /// Ask for alternative phrasings of a piece of text.
    Improve { text: String },
    /// Copy a document to DIR under its canonical `<crossing-id>_<date>.json` name.
    SaveAs {
        document: PathBuf,
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Store the AWS region, model and credentials to use.
    Configure {
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        model_id: Option<String>,
        #[arg(long)]
        profile: Option<String>,
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// Check that the configured credentials are accepted by AWS.
    CheckCredentials,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let schema = FormSchema::bridge_crossing();

    match cli.command {
        Command::Fields => {
            for section in schema.sections() {
                println!("{}", section.title());
                for field in section.fields() {
                    println!("  {:<28} {:?}  {}", field.id, field.kind, field.label);
                    for option in &field.options {
                        println!("      {:<24} {}", option.value, option.label);
                    }
                    if let Some(key) = field.assessment_key() {
                        println!("  {key:<28} source");
                    }
                }
            }
        }
        Command::New { dir, crossing_id } => {
            let mut store = AssessmentStore::new();
            store.set(CROSSING_ID, crossing_id);
            store.set("inspection-date", today().to_string());
            let session = Session::with_store(store);
            let path = commands::save(&session, &dir, today()).await?;
            println!("{}", path.display());
        }
        Command::Set {
            document,
            field,
            value,
        } => {
            match schema.field(&field) {
                Some(_) => schema.validate_option(&field, &value)?,
                // derived `-assessment` source key
                None if schema.is_known_key(&field) => {}
                None => return Err(SchemaError::UnknownField(field).into()),
            }
            let session = load(&document).await?;
            {
                let mut store = session.store.lock().await;
                match schema.field(&field).map(|f| f.kind) {
                    Some(FieldKind::SingleGroup) => store.set_single_group(&field, Some(value)),
                    _ => store.set(&field, value),
                }
            }
            persist(&session, &document).await?;
        }
        Command::SetGroup {
            document,
            field,
            values,
        } => {
            let descriptor = schema.require_field(&field)?;
            if descriptor.kind != FieldKind::MultiGroup {
                return Err(eyre::eyre!("{field} is not a checkbox group"));
            }
            for value in &values {
                schema.validate_option(&field, value)?;
            }
            let session = load(&document).await?;
            session.store.lock().await.set_group(&field, values);
            persist(&session, &document).await?;
        }
        Command::Attach {
            document,
            field,
            files,
        } => {
            let session = load(&document).await?;
            let outcomes = commands::attach_paths(&session, &field, &files).await?;
            for outcome in &outcomes {
                match &outcome.result {
                    Ok(()) => println!("attached {}", outcome.path.display()),
                    Err(e) => eprintln!("skipped {}", e),
                }
            }
            persist(&session, &document).await?;
        }
        Command::Comment {
            document,
            field,
            index,
            text,
        } => {
            let session = load(&document).await?;
            session.store.lock().await.set_comment(&field, index, text)?;
            persist(&session, &document).await?;
        }
        Command::Detach {
            document,
            field,
            index,
        } => {
            let session = load(&document).await?;
            let removed = session.store.lock().await.remove_attachment(&field, index)?;
            persist(&session, &document).await?;
            println!("removed {}", removed.filename);
        }
        Command::Narrative { document } => {
            let session = load(&document).await?;
            let snapshot = session.store.lock().await.snapshot();
            print!("{}", projection::narrative(schema, &snapshot));
        }
        Command::Report {
            document,
            out_dir,
            keep_summary,
        } => {
            let session = load(&document).await?;
            let narrator = narrator().await?;
            let options = ReportOptions {
                write_back_summary: keep_summary,
                ..ReportOptions::default()
            };
            let report = commands::generate_report(&session, &narrator, &options).await?;
            if !report.summary_generated {
                eprintln!("{}", report.summary);
            }
            let path = out_dir.join(&report.file_name);
            tokio::fs::write(&path, &report.bytes).await?;
            if keep_summary && report.summary_generated {
                persist(&session, &document).await?;
            }
            println!("{}", path.display());
        }
        Command::Improve { text } => {
            let narrator = narrator().await?;
            for (i, alternative) in commands::improve_text(&narrator, &text)
                .await
                .iter()
                .enumerate()
            {
                println!("{}. {alternative}", i + 1);
            }
        }
        Command::SaveAs { document, dir } => {
            let session = load(&document).await?;
            let path = commands::save(&session, &dir, today()).await?;
            println!("{}", path.display());
        }
        Command::Configure {
            region,
            model_id,
            profile,
            timeout_secs,
        } => {
            let mut cfg = config::load_config()?;
            if let Some(region) = region {
                cfg.region = region;
            }
            if let Some(model_id) = model_id {
                cfg.model_id = model_id;
            }
            if let Some(profile_name) = profile {
                cfg.credentials = CredentialSource::Profile { profile_name };
            }
            if let Some(secs) = timeout_secs {
                cfg.request_timeout_secs = secs;
            }
            let path = config::save_config(&cfg)?;
            println!(
                "{} (region {}, model {}, credentials {})",
                path.display(),
                cfg.region,
                cfg.model_id,
                config::describe_credentials(&cfg.credentials)
            );
        }
        Command::CheckCredentials => {
            let cfg = config::load_config()?;
            let identity = aws::check_credentials(&cfg).await?;
            println!("{} ({})", identity.arn, identity.account_id);
        }
    }

    Ok(())
}

fn today() -> jiff::civil::Date {
    jiff::Zoned::now().date()
}

async fn load(path: &Path) -> Result<Session> {
    let session = Session::new();
    commands::open(&session, path).await?;
    Ok(session)
}

async fn persist(session: &Session, path: &Path) -> Result<()> {
    let document = session.store.lock().await.snapshot();
    commands::write_document(path, &document).await?;
    Ok(())
}

async fn narrator() -> Result<BedrockNarrator> {
    let cfg = config::load_config()?;
    Ok(aws::narrator(&cfg).await)
}
