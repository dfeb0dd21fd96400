use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cheatdeck",
    bin_name = "cheatdeck",
    version,
    disable_help_subcommand = true,
    after_help = "Logging goes to stderr; set CHEATDECK_LOG=debug for details."
)]
#[command(about = "Multilingual cheatsheet collection manager", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (defaults to config.toml in the user config dir)
    #[arg(long, global = true, help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Cheatsheets directory
    #[arg(long, global = true, help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Language catalog file
    #[arg(long, global = true, help_heading = "Options")]
    pub languages: Option<PathBuf>,

    /// Interface language for messages
    #[arg(long = "ui-lang", global = true, help_heading = "Options")]
    pub ui_lang: Option<String>,

    /// Print records as JSON
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List cheatsheets
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Only cheatsheets with this tag ("all" for every tag)
        #[arg(short, long)]
        tag: Option<String>,

        /// Only cheatsheets in this language
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Show one cheatsheet
    #[command(alias = "v", display_order = 2)]
    Show { filename: String },

    /// Search titles, tags and items
    #[command(display_order = 3)]
    Search {
        query: String,

        /// Only cheatsheets in this language
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Create a cheatsheet
    #[command(alias = "n", display_order = 4)]
    Create {
        title: String,

        /// Tag (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Item as "code::description" or "code::description::example" (repeatable)
        #[arg(short, long = "item")]
        items: Vec<String>,

        /// Language code (defaults to the default language)
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Delete a cheatsheet
    #[command(alias = "rm", display_order = 5)]
    Delete { filename: String },

    /// List tags with usage counts
    #[command(display_order = 10)]
    Tags,

    /// Rename a tag in every cheatsheet
    #[command(display_order = 11)]
    RenameTag { old: String, new: String },

    /// Remove a tag from every cheatsheet
    #[command(display_order = 12)]
    DeleteTag { name: String },

    /// Show supported languages with cheatsheet counts
    #[command(display_order = 20)]
    Languages,

    /// Add a language to the catalog
    #[command(display_order = 21)]
    AddLanguage {
        code: String,
        name: String,

        #[arg(long)]
        flag: Option<String>,
    },

    /// Remove a language from the catalog
    #[command(display_order = 22)]
    RemoveLanguage { code: String },

    /// Move every cheatsheet from one language to another
    #[command(display_order = 23)]
    Migrate { from: String, to: String },

    /// Assign a detected language to cheatsheets that have none
    #[command(display_order = 24)]
    FillLanguages,

    /// Check the structure of a language catalog file
    #[command(display_order = 25)]
    ValidateCatalog {
        /// Defaults to the configured catalog
        path: Option<PathBuf>,
    },

    /// Write the example cheatsheets into an empty collection
    #[command(display_order = 30)]
    Seed,

    /// Show the effective configuration
    #[command(display_order = 31)]
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_filters() {
        let cli = Cli::try_parse_from(["cheatdeck", "list", "--tag", "git", "-l", "es"]).unwrap();
        match cli.command {
            Some(Commands::List { tag, lang }) => {
                assert_eq!(tag.as_deref(), Some("git"));
                assert_eq!(lang.as_deref(), Some("es"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_create_repeatable_args() {
        let cli = Cli::try_parse_from([
            "cheatdeck",
            "create",
            "Git",
            "-t",
            "git",
            "-t",
            "vcs",
            "-i",
            "git status::Show status",
            "--data",
            "/tmp/x",
        ])
        .unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/x")));
        match cli.command {
            Some(Commands::Create { title, tags, items, lang }) => {
                assert_eq!(title, "Git");
                assert_eq!(tags, vec!["git", "vcs"]);
                assert_eq!(items, vec!["git status::Show status"]);
                assert_eq!(lang, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_migrate_requires_both_codes() {
        assert!(Cli::try_parse_from(["cheatdeck", "migrate", "en"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
