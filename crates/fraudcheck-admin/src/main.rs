//! Fraud Check admin editor
//!
//! Command-line counterpart of the site's admin screens: inspect, import and
//! reset content records, add community scam reports and score the quiz.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use fraudcheck_content::{Config, ContentStore, RecordKind, ScamOfTheWeek, UserReportedScam};

#[derive(Parser, Debug)]
#[command(name = "fraudcheck-admin")]
#[command(author, version, about = "Edit Fraud Check site content")]
struct Cli {
    /// Content database file (defaults to the per-user data directory)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Storage quota in bytes
    #[arg(long, global = true)]
    quota: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a record as JSON, seeding the default if it is missing
    Show { record: RecordArg },

    /// Replace a record with the JSON in a file; missing fields keep defaults
    Import { record: RecordArg, file: PathBuf },

    /// Restore a record's built-in default
    Reset { record: RecordArg },

    /// List stored keys
    Keys,

    /// Add a community scam report
    ReportScam {
        /// Kind of scam, e.g. "Phone call"
        #[arg(long = "type")]
        scam_type: String,

        #[arg(long)]
        description: String,

        /// What the reporter did about it
        #[arg(long, default_value = "")]
        action: String,

        /// Where the scam was seen
        #[arg(long, default_value = "")]
        url: String,
    },

    /// Make the scam in a JSON file the scam of the week
    PromoteScam { file: PathBuf },

    /// Score quiz answers given as question=value pairs
    Quiz { answers: Vec<String> },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum RecordArg {
    Home,
    HomeArticles,
    ScamTrends,
    ScamChecker,
    ArticleSettings,
}

impl From<RecordArg> for RecordKind {
    fn from(arg: RecordArg) -> Self {
        match arg {
            RecordArg::Home => RecordKind::Home,
            RecordArg::HomeArticles => RecordKind::HomeArticles,
            RecordArg::ScamTrends => RecordKind::ScamTrends,
            RecordArg::ScamChecker => RecordKind::ScamChecker,
            RecordArg::ArticleSettings => RecordKind::ArticleSettings,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::default();
    if let Some(path) = cli.database {
        config.database_path = path;
    }
    if let Some(quota) = cli.quota {
        config.quota_bytes = quota;
    }

    fraudcheck_content::init_logging(&config.log_filter);

    let store = config.open_store().with_context(|| {
        format!(
            "failed to open content database at {}",
            config.database_path.display()
        )
    })?;

    let stdout = std::io::stdout();
    run(&store, cli.command, &mut stdout.lock())
}

fn run(store: &ContentStore, command: Commands, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Show { record } => {
            let value = store.snapshot(record.into())?;
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        }
        Commands::Import { record, file } => {
            let kind = RecordKind::from(record);
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            store
                .import(kind, &text)
                .with_context(|| format!("failed to import {}", kind.label()))?;
            info!(record = %kind, file = %file.display(), "Imported record");
            writeln!(out, "Imported {} from {}", kind.label(), file.display())?;
        }
        Commands::Reset { record } => {
            let kind = RecordKind::from(record);
            store.reset(kind)?;
            writeln!(out, "Reset {} to defaults", kind.label())?;
        }
        Commands::Keys => {
            for entry in store.storage().entries()? {
                let label = RecordKind::from_key(&entry.key)
                    .map(|kind| kind.label())
                    .unwrap_or("(unknown)");
                let updated = entry
                    .updated_at
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| "-".to_string());
                writeln!(
                    out,
                    "{:<18} {:<26} {:>8} bytes  {}",
                    entry.key, label, entry.size, updated
                )?;
            }
        }
        Commands::ReportScam {
            scam_type,
            description,
            action,
            url,
        } => {
            let report = UserReportedScam::new(scam_type, description, action, url)?;
            let id = report.id.clone();
            store
                .add_user_report(report)
                .context("failed to save scam trends")?;
            writeln!(out, "Added report {id}")?;
        }
        Commands::PromoteScam { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let scam: ScamOfTheWeek = serde_json::from_str(&text)
                .with_context(|| format!("{} is not a scam of the week", file.display()))?;
            let name = scam.name.clone();
            store
                .promote_scam_of_the_week(scam)
                .context("failed to save scam trends")?;
            writeln!(out, "\"{name}\" is now the scam of the week")?;
        }
        Commands::Quiz { answers } => {
            let answers = parse_answers(&answers)?;
            let outcome = store.get_scam_checker_quiz().assess(&answers);
            writeln!(out, "{}", serde_json::to_string_pretty(&outcome)?)?;
        }
    }

    Ok(())
}

fn parse_answers(pairs: &[String]) -> Result<HashMap<String, String>> {
    pairs
        .iter()
        .map(|pair| {
            let (question, value) = pair
                .split_once('=')
                .ok_or_else(|| anyhow!("expected question=value, got `{pair}`"))?;
            let question = question.trim();
            if question.is_empty() {
                return Err(anyhow!("missing question id in `{pair}`"));
            }
            Ok((question.to_string(), value.trim().to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use fraudcheck_content::{ContentRecord, MemoryStorage, ScamTrendsContent};

    fn run_to_string(store: &ContentStore, args: &[&str]) -> Result<String> {
        let argv = std::iter::once("fraudcheck-admin").chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv)?;
        let mut out = Vec::new();
        run(store, cli.command, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "fraudcheck-admin-{}-{name}",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_record_names() {
        let cli = Cli::try_parse_from(["fraudcheck-admin", "show", "scam-trends"]).unwrap();
        match cli.command {
            Commands::Show { record } => {
                assert_eq!(RecordKind::from(record), RecordKind::ScamTrends)
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(Cli::try_parse_from(["fraudcheck-admin", "show", "bogus"]).is_err());
    }

    #[test]
    fn test_parse_answers() {
        let answers = parse_answers(&["payment=yes".to_string(), " urgency = no ".to_string()])
            .unwrap();
        assert_eq!(answers["payment"], "yes");
        assert_eq!(answers["urgency"], "no");

        assert!(parse_answers(&["payment".to_string()]).is_err());
        assert!(parse_answers(&["=yes".to_string()]).is_err());
    }

    #[test]
    fn test_show_seeds_and_prints_json() {
        let storage = MemoryStorage::new();
        let store = ContentStore::new(storage.clone());

        let output = run_to_string(&store, &["show", "article-settings"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(value["defaultHeroImage"].is_string());
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_import_and_reset() {
        let store = ContentStore::new(MemoryStorage::new());
        let file = temp_file("home.json", r#"{"hero":{"title":"Imported"}}"#);

        run_to_string(&store, &["import", "home", file.to_str().unwrap()]).unwrap();
        assert_eq!(store.get_home_data().hero.title, "Imported");

        run_to_string(&store, &["reset", "home"]).unwrap();
        assert_ne!(store.get_home_data().hero.title, "Imported");

        let _ = std::fs::remove_file(file);
    }

    #[test]
    fn test_report_scam_surfaces_write_failure() {
        let storage = MemoryStorage::new();
        let store = ContentStore::new(storage.clone());
        let args = ["report-scam", "--type", "Email", "--description", "Fake invoice"];

        run_to_string(&store, &args).unwrap();
        assert_eq!(store.get_scam_trends_data().user_reported_scams.len(), 1);

        storage.set_fail_writes(true);
        assert!(run_to_string(&store, &args).is_err());
    }

    #[test]
    fn test_promote_scam() {
        let store = ContentStore::new(MemoryStorage::new());
        let mut scam = ScamTrendsContent::default_record().scam_of_the_week;
        scam.name = "Ticket resale".to_string();
        let file = temp_file("scam.json", &serde_json::to_string(&scam).unwrap());

        let output = run_to_string(&store, &["promote-scam", file.to_str().unwrap()]).unwrap();
        assert!(output.contains("Ticket resale"));
        assert_eq!(store.get_scam_trends_data().scam_of_the_week.name, "Ticket resale");

        let _ = std::fs::remove_file(file);
    }

    #[test]
    fn test_quiz_outcome() {
        let store = ContentStore::new(MemoryStorage::new());
        let output = run_to_string(
            &store,
            &["quiz", "urgency=yes", "payment=yes", "personal_details=yes"],
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["risk"], "high");
        assert_eq!(value["maxScore"], 15);
    }

    #[test]
    fn test_keys_lists_entries() {
        let store = ContentStore::new(MemoryStorage::new());
        store.get_home_data();

        let output = run_to_string(&store, &["keys"]).unwrap();
        assert!(output.contains("homeData"));
        assert!(output.contains("Home content"));
    }
}
