//! The `languages` command: list supported corpus languages

use anyhow::Result;
use console::style;

use crate::language::Language;

pub fn run() -> Result<()> {
    println!("{}", style("Supported corpus languages").bold());
    for language in Language::all() {
        let profile = language.profile();
        println!(
            "  {}  {:<8} thousands '{}', decimal '{}'",
            style(language.id()).green(),
            language.name(),
            profile.thousands_separator,
            profile.decimal_separator,
        );
    }
    Ok(())
}
