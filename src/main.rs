use anyhow::Context;
use clap::{Parser, Subcommand};
use jerseygirl::{
    configuration::get_configuration,
    domain::{ContactKind, DocumentFile, Subscriber, PDF_MEDIA_TYPE},
    service::status_message::StatusMessage,
    telemetry, App,
};
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Manage sign-ups and weekly specials for JerseyGirl.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign up for the weekly specials with an email or a phone number.
    Subscribe {
        #[arg(long, conflicts_with = "phone", required_unless_present = "phone")]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// List subscribers, optionally narrowed down by email or phone.
    Subscribers {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Upload the weekly specials PDF.
    Upload {
        path: PathBuf,
        /// Declared media type, guessed from the file extension when left out.
        #[arg(long)]
        media_type: Option<String>,
    },
    /// Schedule the specials notification, e.g. `2024-05-03T17:30`.
    Schedule { time: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    telemetry::init_subscriber(telemetry::get_subscriber(
        "jerseygirl".to_string(),
        telemetry::default_targets(),
        std::io::stderr,
    ))?;

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let app = App::build(&configuration).context("Failed to set up the directory client.")?;

    let status = match args.command {
        Command::Subscribe { email, phone } => {
            let sign_up = app.sign_up();
            sign_up.open();
            match (email, phone) {
                (Some(email), _) => {
                    sign_up.set_kind(ContactKind::Email);
                    sign_up.set_value(email);
                }
                (None, phone) => {
                    sign_up.set_kind(ContactKind::Phone);
                    sign_up.set_value(phone.unwrap_or_default());
                }
            }
            sign_up.submit().await;
            sign_up.status()
        }
        Command::Subscribers { search } => {
            let admin = app.admin();
            admin.activate().await;
            admin.set_filter(&search);
            print_subscribers(&admin.visible_subscribers());
            admin.status()
        }
        Command::Upload { path, media_type } => {
            let admin = app.admin();
            let file = read_document(&path, media_type).await?;
            if admin.select_document(file).is_ok() {
                admin.upload().await;
            }
            admin.status()
        }
        Command::Schedule { time } => {
            let admin = app.admin();
            tracing::debug!("Earliest schedulable time is {}", admin.schedule_minimum());
            admin.set_schedule_time(time);
            admin.schedule().await;
            admin.status()
        }
    };

    Ok(report(status))
}

/// Print the status banner and turn it into an exit code.
fn report(status: Option<StatusMessage>) -> ExitCode {
    match status {
        Some(status) if status.is_error() => {
            eprintln!("{status}");
            ExitCode::FAILURE
        }
        Some(status) => {
            eprintln!("{status}");
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("Nothing was sent.");
            ExitCode::FAILURE
        }
    }
}

async fn read_document(path: &Path, media_type: Option<String>) -> anyhow::Result<DocumentFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let media_type = media_type.unwrap_or_else(|| guess_media_type(path).to_string());

    Ok(DocumentFile::new(file_name, media_type, bytes))
}

fn guess_media_type(path: &Path) -> &'static str {
    match path.extension().and_then(|extension| extension.to_str()) {
        Some(extension) if extension.eq_ignore_ascii_case("pdf") => PDF_MEDIA_TYPE,
        _ => FALLBACK_MEDIA_TYPE,
    }
}

fn print_subscribers(subscribers: &[Subscriber]) {
    println!("{:<24} {:<32} {:<16} {}", "ID", "EMAIL", "PHONE", "SUBSCRIBED AT");
    for subscriber in subscribers {
        println!(
            "{:<24} {:<32} {:<16} {}",
            subscriber.id_or_placeholder(),
            subscriber.email_or_placeholder(),
            subscriber.phone_or_placeholder(),
            subscriber.subscribed_at().unwrap_or_default(),
        );
    }
}
