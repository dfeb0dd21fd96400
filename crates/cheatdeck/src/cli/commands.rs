//! # CLI Layer
//!
//! The only place in the workspace that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! Each command resolves configuration, opens the repository, calls one
//! library operation and renders the result.

use super::logging;
use super::render;
use super::setup::{Cli, Commands};
use anyhow::{anyhow, bail, Context, Result};
use cheatdeckapp::catalog::UNSUPPORTED_LANGUAGE_KEY;
use cheatdeckapp::config::default_config_file;
use cheatdeckapp::tags::normalize_tag;
use cheatdeckapp::{AppConfig, CheatItem, LanguageCatalog, LanguageSelection, Repository};
use clap::Parser;
use serde::Serialize;

/// Separator between the parts of an `--item` argument.
const ITEM_SEPARATOR: &str = "::";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = load_config(&cli)?;
    let command = cli.command.unwrap_or(Commands::List {
        tag: None,
        lang: None,
    });

    if let Commands::Config = command {
        print!("{}", describe_config(&config, cli.config.as_deref()));
        return Ok(());
    }

    let mut repo = config
        .open_repository()
        .with_context(|| format!("cannot open {}", config.data_path().display()))?;

    let preferred = cli.ui_lang.as_deref().or(config.current_language.as_deref());
    let selection = LanguageSelection::new(repo.catalog(), preferred);
    if let Some(code) = preferred.filter(|code| *code != selection.current()) {
        tracing::warn!(language = code, "unsupported interface language, using default");
    }

    let out = Output {
        json: cli.json,
        ui_lang: selection.current().to_string(),
    };

    match command {
        Commands::List { tag, lang } => {
            let tag = tag.unwrap_or_else(|| config.current_tag.clone());
            let sheets = match lang {
                Some(lang) => {
                    out.ensure_language(&repo, &lang)?;
                    repo.list_by_tag_and_language(&tag, &lang)
                }
                None => repo.list_by_tag(&tag),
            };
            out.emit(&sheets, || render::render_list(&sheets, repo.catalog()))?;
        }
        Commands::Show { filename } => {
            let sheet = repo.get(&filename)?;
            out.emit(&sheet, || render::render_sheet(&sheet, repo.catalog()))?;
        }
        Commands::Search { query, lang } => {
            let sheets = match lang {
                Some(lang) => {
                    out.ensure_language(&repo, &lang)?;
                    repo.search_by_language(&query, &lang)
                }
                None => repo.search(&query),
            };
            out.emit(&sheets, || render::render_list(&sheets, repo.catalog()))?;
        }
        Commands::Create {
            title,
            tags,
            items,
            lang,
        } => {
            let tags = tags
                .iter()
                .map(|tag| normalize_tag(tag).map_err(|e| anyhow!("invalid tag '{}': {}", tag, e)))
                .collect::<Result<Vec<_>>>()?;
            let items = items
                .iter()
                .map(|raw| parse_item(raw))
                .collect::<Result<Vec<_>>>()?;

            let problems = repo.validate(&title, &tags, &items, lang.as_deref());
            if !problems.is_empty() {
                eprint!("{}", render::render_problems(&problems));
                bail!("cheatsheet not created");
            }

            let filename = repo.create(&title, tags, items, lang.as_deref())?;
            out.emit(&filename, || format!("{}\n", filename))?;
        }
        Commands::Delete { filename } => {
            repo.delete(&filename)?;
            print!("{}", render::render_success(&format!("Deleted {}", filename)));
        }
        Commands::Tags => {
            let tags = repo.tags_with_usage();
            out.emit(&tags, || render::render_tags(&tags))?;
        }
        Commands::RenameTag { old, new } => {
            let new = normalize_tag(&new).map_err(|e| anyhow!("invalid tag '{}': {}", new, e))?;
            if repo.tag_usage_count(&old) == 0 {
                bail!("no cheatsheet uses tag '{}'", old);
            }
            if !repo.rename_tag(&old, &new) {
                bail!("tag '{}' was not renamed", old);
            }
            print!(
                "{}",
                render::render_success(&format!("Renamed tag {} to {}", old, new))
            );
        }
        Commands::DeleteTag { name } => {
            if !repo.delete_tag(&name) {
                bail!("no cheatsheet uses tag '{}'", name);
            }
            print!("{}", render::render_success(&format!("Deleted tag {}", name)));
        }
        Commands::Languages => {
            let stats = repo.language_statistics();
            let default = repo.default_language().to_string();
            out.emit(&stats, || render::render_languages(&stats, &default))?;
        }
        Commands::AddLanguage { code, name, flag } => {
            repo.add_language(&code, &name, flag.as_deref(), None)?;
            print!("{}", render::render_success(&format!("Added {} ({})", name, code)));
        }
        Commands::RemoveLanguage { code } => {
            repo.remove_language(&code)?;
            print!("{}", render::render_success(&format!("Removed {}", code)));
        }
        Commands::Migrate { from, to } => {
            out.ensure_language(&repo, &from)?;
            out.ensure_language(&repo, &to)?;
            let migrated = repo.migrate_language(&from, &to);
            print!(
                "{}",
                render::render_success(&format!(
                    "Migrated {} cheatsheet(s) from {} to {}",
                    migrated, from, to
                ))
            );
        }
        Commands::FillLanguages => {
            let filled = repo.fill_missing_languages();
            out.emit(&filled, || {
                let mut text: String = filled
                    .iter()
                    .map(|(filename, language)| format!("{} -> {}\n", filename, language))
                    .collect();
                text.push_str(&render::render_success(&format!(
                    "Assigned a language to {} cheatsheet(s)",
                    filled.len()
                )));
                text
            })?;
        }
        Commands::ValidateCatalog { path } => {
            let path = path.unwrap_or_else(|| config.languages_file());
            let problems = LanguageCatalog::validate_file(&path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            if !problems.is_empty() {
                print!("{}", render::render_problems(&problems));
                bail!("{} problem(s) in {}", problems.len(), path.display());
            }
            print!(
                "{}",
                render::render_success(&format!("{} is valid", path.display()))
            );
        }
        Commands::Seed => {
            let written = repo.seed_examples()?;
            if written == 0 {
                println!("Collection is not empty; nothing seeded.");
            } else {
                print!(
                    "{}",
                    render::render_success(&format!("Seeded {} example cheatsheet(s)", written))
                );
            }
        }
        // Printed before the repository is opened
        Commands::Config => {}
    }
    Ok(())
}

/// Per-invocation output settings.
struct Output {
    json: bool,
    ui_lang: String,
}

impl Output {
    /// Prints `value` as JSON with `--json`, otherwise the rendered text.
    fn emit<T, F>(&self, value: &T, text: F) -> Result<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce() -> String,
    {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            print!("{}", text());
        }
        Ok(())
    }

    /// Fails with the catalog's localized "unsupported language" message.
    fn ensure_language<B>(&self, repo: &Repository<B>, code: &str) -> Result<()>
    where
        B: cheatdeckapp::store::SheetBackend,
    {
        if repo.catalog().is_supported(code) {
            return Ok(());
        }
        let message = repo.interface_text(UNSUPPORTED_LANGUAGE_KEY, Some(self.ui_lang.as_str()));
        bail!("{}: {}", message, repo.catalog().codes().join(", "))
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(data) = &cli.data {
        config.data_path = Some(data.clone());
    }
    if let Some(languages) = &cli.languages {
        config.languages_file = Some(languages.clone());
    }
    Ok(config)
}

fn describe_config(config: &AppConfig, explicit: Option<&std::path::Path>) -> String {
    let file = explicit
        .map(|p| p.display().to_string())
        .or_else(|| default_config_file().map(|p| p.display().to_string()))
        .unwrap_or_else(|| "-".to_string());

    format!(
        "config_file = {}\ndata_path = {}\nlanguages_file = {}\ndefault_language = {}\ncurrent_language = {}\ncurrent_tag = {}\n",
        file,
        config.data_path().display(),
        config.languages_file().display(),
        config.default_language.as_deref().unwrap_or("-"),
        config.current_language.as_deref().unwrap_or("-"),
        config.current_tag,
    )
}

/// Parses `code::description` or `code::description::example`.
fn parse_item(raw: &str) -> Result<CheatItem> {
    let mut parts = raw.splitn(3, ITEM_SEPARATOR);
    let code = parts.next().unwrap_or_default().trim();
    let description = parts
        .next()
        .ok_or_else(|| anyhow!("item '{}' needs the form code::description[::example]", raw))?
        .trim();

    let item = CheatItem::new(code, description);
    Ok(match parts.next().map(str::trim) {
        Some(example) if !example.is_empty() => item.with_example(example),
        _ => item,
    })
}
