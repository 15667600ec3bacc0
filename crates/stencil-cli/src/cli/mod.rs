//! Command-line surface of `stencil`. Doc comments on the types below are
//! the help text clap prints.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

const EXAMPLES: &str = "\
Examples:
  stencil list
  stencil new web AcmeShop
  stencil new web@1.2 AcmeShop
  stencil new NetCoreTemplates/vue-spa Dashboard
  stencil new https://example.org/templates/api.zip Acme";

const TEMPLATE_FORMS: &str = "\
TEMPLATE may be:
  web                  a repository name from the configured sources
  web@1.2              the same, pinned to a release
  owner/repo           a GitHub repository
  https://github.com/owner/repo
  https://api.github.com/repos/owner/repo/releases
  https://host/path/template.zip
  ./template.zip       an archive on disk";

/// Create new projects from template archives
///
/// Stencil downloads a template archive (a GitHub release, a repository's
/// master branch or any .zip), extracts it and renames every MyApp / my-app
/// placeholder to your project name.
#[derive(Debug, Parser)]
#[command(
    name = "stencil",
    version,
    author,
    after_help = EXAMPLES,
    arg_required_else_help = true,
    subcommand_required = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project from a template
    #[command(visible_alias = "n", after_help = TEMPLATE_FORMS)]
    New(NewArgs),

    /// List templates from every configured source
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Clear the template download cache
    Clean,

    /// Write a default configuration file
    Init(InitArgs),

    /// Print a shell completion script to stdout
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Template name, repository, releases URL or zip archive
    pub template: String,

    /// Project name; without one the template's MyApp names are kept
    pub name: Option<String>,

    /// Resolve the template and show which archive would be used
    #[arg(long)]
    pub dry_run: bool,

    /// Do not run the configured post-install commands
    #[arg(long = "no-postinstall")]
    pub no_postinstall: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long, value_enum, default_value_t = ListFormat::Table)]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Numbered table per source
    Table,
    /// One repository name per line
    List,
    /// JSON array of sources with their repositories
    Json,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write ./stencil.config.json instead of the user config file
    #[arg(long)]
    pub local: bool,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
