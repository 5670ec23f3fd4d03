//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "kubeforge",
    bin_name = "kubeforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold Rust Kubernetes operators",
    long_about = "Kubeforge lays out a kube-rs operator project and wires new \
                  resources and controllers into it at marker comments.",
    after_help = "EXAMPLES:\n\
        \x20 kubeforge init --owner \"Acme Corp\"\n\
        \x20 kubeforge create api --group ship --version v1 --kind Frigate\n\
        \x20 kubeforge completions bash > /usr/share/bash-completion/completions/kubeforge",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialise a new operator project.
    #[command(
        about = "Initialise a new operator project",
        long_about = "Initialise a new project including the following files:\n\
            \x20 - a \"Cargo.toml\" with project dependencies\n\
            \x20 - a \"Makefile\" with several useful make targets for the project\n\
            \x20 - a \"Dockerfile\" that helps containerizing the project\n\
            \x20 - a \"src/main.rs\" file that runs controller reconcilers\n\
            \x20 - a \"src/controller.rs\" file that provides a runner for controllers\n\
            \x20 - a \"src/crd_generator.rs\" file that generates CRDs",
        after_help = "EXAMPLES:\n\
            \x20 kubeforge init --owner \"Your name\"\n\
            \x20 kubeforge -C ./memcached-operator init --license none"
    )]
    Init(InitArgs),

    /// Scaffold a Kubernetes API.
    #[command(about = "Scaffold a Kubernetes API", subcommand)]
    Create(CreateCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 kubeforge completions bash > ~/.local/share/bash-completion/completions/kubeforge\n\
            \x20 kubeforge completions zsh  > ~/.zfunc/_kubeforge\n\
            \x20 kubeforge completions fish > ~/.config/fish/completions/kubeforge.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the Kubeforge configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 kubeforge config get defaults.owner\n\
            \x20 kubeforge config list\n\
            \x20 kubeforge config init"
    )]
    Config(ConfigCommands),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `kubeforge init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Name of the project; defaults to the directory name.
    #[arg(long = "project-name", value_name = "NAME")]
    pub project_name: Option<String>,

    /// Owner to add to the copyright.
    #[arg(long = "owner", value_name = "OWNER")]
    pub owner: Option<String>,

    /// Domain for groups, recorded in PROJECT.
    #[arg(long = "domain", value_name = "DOMAIN")]
    pub domain: Option<String>,

    /// License header for generated files.
    #[arg(
        long = "license",
        value_name = "LICENSE",
        help = "License to use for the boilerplate: 'apache2' or 'none'"
    )]
    pub license: Option<String>,
}

// ── create api ────────────────────────────────────────────────────────────────

/// Subcommands for `kubeforge create`.
#[derive(Debug, Subcommand)]
pub enum CreateCommands {
    /// Scaffold a Resource definition and/or a Controller.
    #[command(
        long_about = "Scaffold a Kubernetes API by writing a Resource definition and/or a Controller.\n\n\
            If --resource or --controller is not given, you are asked whether to\n\
            scaffold it when a terminal is attached; otherwise both are scaffolded.\n\n\
            After the scaffold is written, `cargo fmt` is run.",
        after_help = "EXAMPLES:\n\
            \x20 # Create a frigates API with Group: ship, Version: v1 and Kind: Frigate\n\
            \x20 kubeforge create api --group ship --version v1 --kind Frigate\n\n\
            \x20 # Edit the API scheme\n\
            \x20 vim src/api/frigate_types.rs\n\n\
            \x20 # Edit the controller\n\
            \x20 vim src/controller/frigate_controller.rs\n\n\
            \x20 # Generate CRDs and install them into the cluster\n\
            \x20 make generate-crds install"
    )]
    Api(ApiArgs),
}

/// Arguments for `kubeforge create api`.
#[derive(Debug, Args)]
pub struct ApiArgs {
    /// Resource group, e.g. `ship` or `ship.example.com`.
    #[arg(long = "group", value_name = "GROUP")]
    pub group: String,

    /// Resource version, e.g. `v1` or `v1beta1`.
    #[arg(long = "version", value_name = "VERSION")]
    pub version: String,

    /// Resource kind, e.g. `Frigate`.
    #[arg(long = "kind", value_name = "KIND")]
    pub kind: String,

    /// Generate the resource without prompting.
    #[arg(
        long = "resource",
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub resource: Option<bool>,

    /// Generate the controller without prompting.
    #[arg(
        long = "controller",
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub controller: Option<bool>,

    /// Whether the resource is namespaced.
    #[arg(
        long = "namespaced",
        value_name = "BOOL",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = true,
        default_missing_value = "true"
    )]
    pub namespaced: bool,

    /// Regenerate the types and controller files even if they exist.
    #[arg(long = "force", help = "Overwrite existing types and controller files")]
    pub force: bool,

    /// Skip `cargo fmt` afterwards.
    #[arg(long = "no-fmt", help = "Do not run cargo fmt after scaffolding")]
    pub no_fmt: bool,

    /// Never prompt; unset flags default to true.
    #[arg(short = 'y', long = "yes", help = "Do not prompt")]
    pub yes: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `kubeforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `kubeforge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.owner`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
    /// Write a configuration file with the default values.
    Init {
        /// Overwrite an existing config file.
        #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
        force: bool,
    },
}

// ── tests ─────────────────────────────────────────────────────────────────────
