use labcred_webclient::{CredField, CredFieldKind, CredentialRecord};

pub mod util {
    use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password};
    use std::io;

    fn theme() -> ColorfulTheme {
        ColorfulTheme::default()
    }

    pub fn ask_text(prompt: &str, initial: &str) -> io::Result<String> {
        let theme = theme();
        let mut input = Input::<String>::with_theme(&theme);
        input.with_prompt(prompt).allow_empty(true);
        if !initial.is_empty() {
            input.with_initial_text(initial);
        }
        input.interact_text()
    }

    pub fn ask_secret(prompt: &str) -> io::Result<String> {
        Password::with_theme(&theme())
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
    }

    pub fn confirm(prompt: &str) -> io::Result<bool> {
        Confirm::with_theme(&theme())
            .with_prompt(prompt)
            .default(false)
            .interact()
    }
}

/// Prompt for every record field. Text fields start from their current
/// value; secret fields are asked blind and keep their current value
/// when left empty.
pub fn ask_record(current: &CredentialRecord) -> CredentialRecord {
    let mut rec = current.clone();

    for field in CredField::ALL {
        use CredFieldKind::*;

        let value = match field.kind() {
            Text => util::ask_text(field.name(), current.get(field)),
            Secret => util::ask_secret(field.name()),
        }
        .unwrap_or_else(|e| panic!("{:?}", e));

        if value.is_empty() && field.kind() == Secret {
            continue;
        }
        rec.set(field, value);
    }
    rec
}
