use colored::Colorize;

pub fn print_header(title: &str) {
    let border = "─".repeat(title.chars().count() + 4);
    println!();
    println!("  ┌{}┐", border.cyan());
    println!("  │  {}  │", title.bright_cyan().bold());
    println!("  └{}┘", border.cyan());
    println!();
}

pub fn print_section(title: &str) {
    println!();
    println!("  {}", title.bold().underline());
}

pub fn print_kv(label: &str, value: &str) {
    println!("    {} {}", format!("{label:<12}").dimmed(), value.bright_white());
}

/// Prints `unset` dimmed in place of a missing or blank value.
pub fn print_kv_opt(label: &str, value: Option<&str>, unset: &str) {
    match value.filter(|v| !v.is_empty()) {
        Some(v) => print_kv(label, v),
        None => println!("    {} {}", format!("{label:<12}").dimmed(), unset.dimmed()),
    }
}

pub fn print_dim(msg: &str) {
    println!("  {}", msg.dimmed());
}
