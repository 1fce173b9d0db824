use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use gridmap::config::{AppConfig, OutageBackendKind};
use gridmap::i18n::Locale;

pub(crate) enum RunOutcome {
    Serve(AppConfig),
    Exit(i32),
}

pub(crate) fn run() -> RunOutcome {
    let cli = Cli::parse();
    if let Some(Command::Init(args)) = cli.command {
        let code = run_init(args);
        return RunOutcome::Exit(code);
    }

    let data_dir = match cli.data_dir.as_ref() {
        Some(data_dir) => data_dir.clone(),
        None => {
            eprintln!("error: --data-dir is required unless using a subcommand");
            return RunOutcome::Exit(2);
        }
    };

    let locale = match resolve_locale(&cli.locale) {
        Ok(locale) => locale,
        Err(err) => {
            eprintln!("error: {err}");
            return RunOutcome::Exit(2);
        }
    };
    let outage_backend = match resolve_outage_backend(&cli.outage_backend) {
        Ok(backend) => backend,
        Err(err) => {
            eprintln!("error: {err}");
            return RunOutcome::Exit(2);
        }
    };

    RunOutcome::Serve(AppConfig {
        data_dir,
        app_name: cli.app_name,
        locale,
        outage_backend,
        vapid_private_key: cli.vapid_private_key,
        vapid_public_key: cli.vapid_public_key,
        vapid_subject: cli.vapid_subject,
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "gridmap",
    version,
    about = "Mobile-first outage map with push notifications"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    #[arg(long)]
    data_dir: Option<PathBuf>,
    #[arg(long, default_value = "Gridmap")]
    app_name: String,
    #[arg(long, default_value = "en")]
    locale: String,
    #[arg(long, default_value = "mock")]
    outage_backend: String,
    #[arg(long, env = "GRIDMAP_VAPID_PRIVATE_KEY")]
    vapid_private_key: Option<String>,
    #[arg(long, env = "GRIDMAP_VAPID_PUBLIC_KEY")]
    vapid_public_key: Option<String>,
    #[arg(long, env = "GRIDMAP_VAPID_SUBJECT")]
    vapid_subject: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    Init(InitArgs),
}

#[derive(Args, Debug)]
struct InitArgs {
    #[arg(long)]
    subject: Option<String>,
}

fn run_init(args: InitArgs) -> i32 {
    let credentials = match gridmap::generate_vapid_credentials() {
        Ok(credentials) => credentials,
        Err(err) => {
            eprintln!("failed to generate VAPID credentials: {err}");
            return 1;
        }
    };
    let (subject, show_subject_note) = match args.subject {
        Some(subject) => (subject, false),
        None => ("mailto:you@example.com".to_string(), true),
    };

    println!("VAPID credentials generated.");
    println!();
    println!("GRIDMAP_VAPID_PRIVATE_KEY=\"{}\"", credentials.private_key);
    println!("GRIDMAP_VAPID_PUBLIC_KEY=\"{}\"", credentials.public_key);
    println!("GRIDMAP_VAPID_SUBJECT=\"{subject}\"");
    if show_subject_note {
        println!();
        println!("Note: replace GRIDMAP_VAPID_SUBJECT with a contact URI you control.");
    }
    println!();
    println!(
        "--vapid-private-key \"{}\" --vapid-public-key \"{}\" --vapid-subject \"{subject}\"",
        credentials.private_key, credentials.public_key
    );
    0
}

fn resolve_locale(raw: &str) -> Result<Locale, String> {
    Locale::parse(raw.trim())
        .ok_or_else(|| format!("invalid locale '{raw}'; expected one of: en, es"))
}

fn resolve_outage_backend(raw: &str) -> Result<OutageBackendKind, String> {
    match raw.trim() {
        "mock" => Ok(OutageBackendKind::Mock),
        "utility" => Ok(OutageBackendKind::Utility),
        _ => Err(format!(
            "invalid outage backend '{raw}'; expected one of: mock, utility"
        )),
    }
}
