use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    println!("{} {}", Icons::CARD, text.style(theme().header.clone()));
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", title.style(theme().header.clone()));
}

pub fn record_added(what: &str, id: i64) {
    println!(
        "{} Added {} #{}",
        Icons::NEW.style(theme().success.clone()),
        what,
        id
    );
}

pub fn record_updated(count: usize) {
    println!("{} Updated {} row(s)", Icons::MOD.style(theme().warn.clone()), count);
}

pub fn record_deleted(count: usize) {
    println!("{} Deleted {} row(s)", Icons::DEL.style(theme().error.clone()), count);
}

pub fn summary_row(label: &str, value: &str) {
    println!("  {} {}", label.style(theme().dim.clone()), value);
}

/// Render cents as a price string: 1099 -> "$ 10.99"
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("$ {}{}.{:02}", sign, abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(1099), "$ 10.99");
        assert_eq!(format_cents(150), "$ 1.50");
        assert_eq!(format_cents(5), "$ 0.05");
        assert_eq!(format_cents(0), "$ 0.00");
        assert_eq!(format_cents(-250), "$ -2.50");
    }
}
