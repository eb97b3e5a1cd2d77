use std::io::{self, Write};
use std::process::{Command, Stdio};

use anyhow::Context;
use console::Style;

use passgen::{
    classify_strength, estimate_crack_time, CompositionOptions, GenerateError, GenerationRequest,
    PasswordCount, PasswordLength, RequestError, Secret, StrengthLevel, Theme,
};

use crate::session::Session;
use crate::table::{display_table, TableDisplay};
use crate::ProgError;

#[derive(clap::Args)]
pub(crate) struct GenerateArgs {
    /// Password length, from 8 to 64 characters.
    #[arg(short, long, default_value_t = 24)]
    length: u32,
    /// How many passwords to generate: 1, 3, 5 or 10.
    #[arg(short, long, default_value_t = 1)]
    count: u32,
    /// Leave out lowercase letters.
    #[arg(long)]
    no_lowercase: bool,
    /// Leave out uppercase letters.
    #[arg(long)]
    no_uppercase: bool,
    /// Leave out digits.
    #[arg(long)]
    no_numbers: bool,
    /// Leave out symbols.
    #[arg(long)]
    no_symbols: bool,
    /// Keep characters that are easy to mistake for one another (i, l, I, L, 1, 0, o, O).
    #[arg(long)]
    allow_ambiguous: bool,
    /// Characters that must never appear in a password.
    #[arg(long, value_name = "CHARS")]
    exclude: Option<String>,
    /// Also copy the passwords to the clipboard, one per line.
    #[arg(long)]
    copy: bool,
}

impl GenerateArgs {
    pub(crate) fn request(&self) -> Result<GenerationRequest, RequestError> {
        let options = CompositionOptions {
            lowercase: !self.no_lowercase,
            uppercase: !self.no_uppercase,
            numbers: !self.no_numbers,
            symbols: !self.no_symbols,
            avoid_ambiguous: !self.allow_ambiguous,
            ..CompositionOptions::none()
        };
        let options = match self.exclude.as_deref() {
            Some(chars) => options.excluding(chars),
            None => options,
        };
        Ok(GenerationRequest {
            length: PasswordLength::try_from(self.length)?,
            count: PasswordCount::try_from(self.count)?,
            options,
        })
    }
}

pub(crate) fn generate(session: &Session, args: &GenerateArgs) -> Result<(), ProgError> {
    let request = args.request()?;
    generate_and_report(session, &request, args.copy)
}

/// Generate the passwords for `request`, print them to stdout and print the strength estimate
/// to stderr.
pub(crate) fn generate_and_report(
    session: &Session,
    request: &GenerationRequest,
    copy: bool,
) -> Result<(), ProgError> {
    let localizer = session.localizer();
    let passwords = match passgen::generate(request) {
        Ok(passwords) => passwords,
        Err(GenerateError::EmptyAlphabet) => {
            return Err(ProgError::EmptyAlphabet(
                localizer.t("selectAtLeastOneOption").to_owned(),
            ))
        }
    };

    print_passwords(session, &passwords).context("failed to write passwords to stdout")?;

    let assessment = classify_strength(&request.options, request.length);
    let crack_time = estimate_crack_time(&request.options, request.length);
    let style = level_style(assessment.level, session.theme());
    eprintln!(
        "{}: {} {} ({} bits)",
        localizer.t("security"),
        style.apply_to(localizer.t(assessment.level.key())),
        style.apply_to(meter(assessment.level.percent())),
        assessment.entropy_bits,
    );
    eprintln!(
        "{} {}",
        console::style(crack_time.localize(localizer)).for_stderr().bold(),
        localizer.t("toCrack"),
    );

    if copy {
        let joined = passwords
            .iter()
            .map(Secret::as_str)
            .collect::<Vec<_>>()
            .join("\n");
        send_to_clipboard(joined.as_bytes()).context("failed to copy to the clipboard")?;
        let key = if passwords.len() > 1 { "allCopied" } else { "copied" };
        eprintln!("{}", localizer.t(key));
    }
    Ok(())
}

fn print_passwords(session: &Session, passwords: &[Secret]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let [password] = passwords {
        writeln!(out, "{}", password.as_str())?;
    } else {
        let rows = passwords
            .iter()
            .enumerate()
            .map(|(idx, password)| PasswordRow {
                number: (idx + 1).to_string(),
                password,
            })
            .collect::<Vec<_>>();
        display_table(&rows, session.localizer(), &mut out)?;
    }
    out.flush()
}

struct PasswordRow<'a> {
    number: String,
    password: &'a Secret,
}

impl TableDisplay for PasswordRow<'_> {
    fn columns() -> usize {
        2
    }

    fn column_name(column_index: usize) -> &'static str {
        match column_index {
            0 => "index",
            _ => "password",
        }
    }

    fn item(&self, column_index: usize) -> &str {
        match column_index {
            0 => &self.number,
            _ => self.password.as_str(),
        }
    }
}

/// Terminal colours for a strength level. Named ANSI colours close to
/// [`StrengthLevel::color`], since terminals can't be relied on for true colour.
fn level_style(level: StrengthLevel, theme: Theme) -> Style {
    let style = Style::new().for_stderr().bold();
    let style = match level {
        StrengthLevel::Weak => style.red(),
        StrengthLevel::Medium => style.yellow(),
        StrengthLevel::Strong | StrengthLevel::VeryStrong => style.green(),
    };
    match theme {
        Theme::Light => style,
        Theme::Dark => style.bright(),
    }
}

/// A ten-cell bar, filled in proportion to `percent`.
fn meter(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) / 10;
    format!("[{}{}]", "█".repeat(filled), "·".repeat(10 - filled))
}

fn send_to_clipboard(data: &[u8]) -> anyhow::Result<()> {
    let mut child = clipboard_cmd()
        .stdin(Stdio::piped())
        .spawn()
        .context("failed to start the clipboard helper")?;
    child
        .stdin
        .as_mut()
        .ok_or_else(|| anyhow::anyhow!("the clipboard helper has no stdin"))?
        .write_all(data)?;
    let status = child.wait()?;
    if !status.success() {
        anyhow::bail!("the clipboard helper exited with {status}");
    }
    Ok(())
}

#[cfg(target_os = "macos")]
fn clipboard_cmd() -> Command {
    Command::new("pbcopy")
}

#[cfg(not(target_os = "macos"))]
fn clipboard_cmd() -> Command {
    let mut cmd = Command::new("xsel");
    cmd.arg("-b");
    cmd
}
