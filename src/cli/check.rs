//! Configuration check command.

use anyhow::Result;

use crate::config::EmitConfig;
use crate::log;
use crate::utils::count_noun;

/// Report the effective configuration after successful validation.
///
/// Loading already validated globs and target pairs; this prints what
/// a build pass would actually use.
pub fn run_check(config: &EmitConfig) -> Result<()> {
    log!(
        "check";
        "config ok: {} -> {}",
        config.emit.from.display(),
        config.emit.to.display()
    );
    if !config.targets.is_empty() {
        log!("check"; "{}", count_noun(config.targets.len(), "transform target"));
    }

    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
