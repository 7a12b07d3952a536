use buildcrew::cli::{Cli, Commands, GlobalOpts};
use clap::Parser;
use miette::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_tracing(&global);

    match cli.command {
        Commands::Duration(args) => buildcrew::cli::commands::duration::run(args, &global),
        Commands::Crew(args) => buildcrew::cli::commands::crew::run(args, &global),
        Commands::Run(args) => buildcrew::cli::commands::run::run(args, &global),
        Commands::New(args) => buildcrew::cli::commands::new::run(args, &global),
        Commands::Validate(args) => buildcrew::cli::commands::validate::run(args, &global),
        Commands::Profile(args) => buildcrew::cli::commands::profile::run(args, &global),
        Commands::Config(cmd) => buildcrew::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => buildcrew::cli::commands::completions::run(args),
    }
}

/// Logs go to stderr: BUILDCREW_LOG_FORMAT=json for JSON lines, RUST_LOG overrides the level
fn init_tracing(global: &GlobalOpts) {
    let default_level = if global.verbose {
        "warn,buildcrew=debug"
    } else if global.quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let log_format = std::env::var("BUILDCREW_LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
}
