use anyhow::Context;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};

use passgen::{CompositionOptions, GenerationRequest, PasswordCount, PasswordLength};

use crate::session::Session;
use crate::ProgError;

// Order of the composition checklist.
const LOWERCASE: usize = 0;
const UPPERCASE: usize = 1;
const NUMBERS: usize = 2;
const SYMBOLS: usize = 3;
const AVOID_AMBIGUOUS: usize = 4;
const EXCLUDE: usize = 5;

pub(crate) fn interactive(session: &Session) -> Result<(), ProgError> {
    let localizer = session.localizer();
    let theme = ColorfulTheme::default();
    eprintln!("{}", console::style(localizer.t("title")).for_stderr().bold());
    eprintln!("{}", localizer.t("description"));

    let length: u32 = Input::with_theme(&theme)
        .with_prompt(localizer.t("passwordLength"))
        .default(24)
        .validate_with(|len: &u32| -> Result<(), String> {
            PasswordLength::try_from(*len)
                .map(|_| ())
                .map_err(|err| err.to_string())
        })
        .interact_text()
        .context("failed to read the password length")?;

    let composition = MultiSelect::with_theme(&theme)
        .with_prompt(localizer.t("passwordComposition"))
        .items(&[
            localizer.t("lowercase"),
            localizer.t("uppercase"),
            localizer.t("numbers"),
            localizer.t("symbols"),
            localizer.t("avoidAmbiguous"),
            localizer.t("exclude"),
        ])
        .defaults(&[true, true, true, true, true, false])
        .interact_opt()
        .context("failed to read the password composition")?
        .ok_or(ProgError::InputCancelled)?;
    let chosen = |idx| composition.contains(&idx);

    let mut options = CompositionOptions {
        lowercase: chosen(LOWERCASE),
        uppercase: chosen(UPPERCASE),
        numbers: chosen(NUMBERS),
        symbols: chosen(SYMBOLS),
        avoid_ambiguous: chosen(AVOID_AMBIGUOUS),
        ..CompositionOptions::none()
    };
    if chosen(EXCLUDE) {
        let excluded: String = Input::with_theme(&theme)
            .with_prompt(localizer.t("exclude"))
            .allow_empty(true)
            .interact_text()
            .context("failed to read the characters to exclude")?;
        options = options.excluding(&excluded);
    }

    let counts = PasswordCount::ALLOWED;
    let count_idx = Select::with_theme(&theme)
        .with_prompt(localizer.t("numberOfPasswords"))
        .items(&counts)
        .default(0)
        .interact_opt()
        .context("failed to read the number of passwords")?
        .ok_or(ProgError::InputCancelled)?;

    let copy = Confirm::with_theme(&theme)
        .with_prompt(localizer.t("copyAll"))
        .default(false)
        .interact()
        .context("failed to read whether to copy the passwords")?;

    let request = GenerationRequest {
        length: PasswordLength::try_from(length)?,
        count: PasswordCount::try_from(counts[count_idx])?,
        options,
    };
    log::debug!("interactive request: {request:?}");
    crate::generate::generate_and_report(session, &request, copy)
}
