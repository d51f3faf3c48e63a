pub mod check;
pub mod report;

use colored::Colorize;

pub fn banner() -> String {
    format!(
        "\n{} {}\n{}\n\n",
        "mediacheck".bright_cyan().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_black(),
        "verifies every <source> media URL on a deployed page".bright_black()
    )
}
