use dialoguer::{theme::ColorfulTheme, Confirm};
use rulesync_common::RuleCategory;

/// Asks before a publish overwrites a stored rule set. Defaults to "no"; a
/// prompt that cannot be shown counts as a refusal.
pub fn confirm_replace(category: RuleCategory, app: &str, count: usize) -> bool {
    let prompt = match count {
        0 => format!("Clear the {category} rules stored for '{app}'?"),
        1 => format!("Replace the {category} rules stored for '{app}' with 1 rule?"),
        n => format!("Replace the {category} rules stored for '{app}' with {n} rules?"),
    };
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .unwrap_or(false)
}
