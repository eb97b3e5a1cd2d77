use std::env;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use passgen::{Language, Theme};

mod generate;
mod interactive;
mod session;
mod table;

use session::Session;

/// Generate random passwords and estimate how long they would take to crack.
#[derive(Parser)]
struct Args {
    /// Where the theme and language preferences are kept.
    #[arg(long, global = true)]
    preferences: Option<PathBuf>,
    /// Log what is going on to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate one or more passwords.
    #[command(alias = "gen")]
    Generate(generate::GenerateArgs),
    /// Choose the length, composition and count through prompts, then generate.
    Interactive,
    /// Set the colour theme used for the strength meter, or switch to the other one if no theme
    /// is given.
    Theme { theme: Option<Theme> },
    /// Set the display language ("fr" or "en").
    Language { language: Language },
}

fn run(args: Args) -> Result<(), ProgError> {
    let preferences_path = or_default_preferences(args.preferences)?;
    let mut session = Session::start(preferences_path)?;

    let outcome = match args.command {
        Command::Generate(gen_args) => generate::generate(&session, &gen_args),
        Command::Interactive => interactive::interactive(&session),
        Command::Theme { theme } => {
            let theme = session.set_theme(theme);
            println!("{}: {theme}", session.localizer().t("themeSet"));
            Ok(())
        }
        Command::Language { language } => {
            session.set_language(language);
            println!("{}: {language}", session.localizer().t("languageSet"));
            Ok(())
        }
    };

    session.shutdown()?;
    outcome
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(err) = run(args) {
        match &err {
            ProgError::Other(err) => eprintln!("Error: {err:?}"),
            err => eprintln!("{err}"),
        }
        process::exit(err.exit_code());
    }
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

fn or_default_preferences(preferences_path: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match preferences_path {
        Some(p) => Ok(p),
        None => default_preferences(),
    }
}

fn default_preferences() -> anyhow::Result<PathBuf> {
    let home = env::var_os("HOME")
        .ok_or_else(|| anyhow::anyhow!("HOME is not set; cannot find home directory of user"))?;
    let default_path = {
        let mut p = PathBuf::from(home);
        p.push(".passgen");
        p.push("preferences.yaml");
        p
    };
    Ok(default_path)
}

#[derive(Debug, thiserror::Error)]
enum ProgError {
    /// Carries the already-translated guidance to show.
    #[error("{0}")]
    EmptyAlphabet(String),
    #[error(transparent)]
    InvalidRequest(#[from] passgen::RequestError),
    #[error("Input cancelled; exiting.")]
    InputCancelled,
    #[error(transparent)]
    Other(anyhow::Error),
}

impl ProgError {
    /// 2 for an empty alphabet, 1 for everything else.
    fn exit_code(&self) -> i32 {
        match self {
            ProgError::EmptyAlphabet(_) => 2,
            _ => 1,
        }
    }
}

impl From<anyhow::Error> for ProgError {
    fn from(err: anyhow::Error) -> ProgError {
        ProgError::Other(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_generate_command() {
        let args = Args::try_parse_from([
            "passgen",
            "generate",
            "--length",
            "32",
            "--count",
            "5",
            "--no-symbols",
            "--exclude",
            "xyz",
        ])
        .unwrap();
        let Command::Generate(gen_args) = args.command else {
            panic!("expected the generate command");
        };
        let request = gen_args.request().unwrap();
        assert_eq!(request.length.get(), 32);
        assert_eq!(request.count.get(), 5);
        assert!(!request.options.symbols);
        assert!(request.options.exclude_enabled);
        assert!(request.options.exclude_set.contains(&'y'));
    }

    #[test]
    fn exit_codes() {
        assert_eq!(ProgError::EmptyAlphabet(String::new()).exit_code(), 2);
        assert_eq!(ProgError::InputCancelled.exit_code(), 1);
        assert_eq!(ProgError::Other(anyhow::anyhow!("boom")).exit_code(), 1);
    }

    #[test]
    fn parses_theme_and_language() {
        let args = Args::try_parse_from(["passgen", "theme"]).unwrap();
        assert!(matches!(args.command, Command::Theme { theme: None }));
        let args = Args::try_parse_from(["passgen", "theme", "dark"]).unwrap();
        assert!(matches!(args.command, Command::Theme { theme: Some(Theme::Dark) }));
        let args = Args::try_parse_from(["passgen", "language", "en"]).unwrap();
        assert!(matches!(args.command, Command::Language { language: Language::En }));
        assert!(Args::try_parse_from(["passgen", "language", "de"]).is_err());
    }
}
