use clap::Parser;
use miette::Result;
use partwise::cli::commands;
use partwise::cli::{Cli, Commands, Session};
use partwise::core::{logging, Config, LogSettings};

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
    let config = Config::load();

    logging::init(&LogSettings {
        verbose: global.verbose,
        quiet: global.quiet,
        directive: config.log_level.clone(),
    })?;

    let session = Session::new(&global, config);

    match cli.command {
        Commands::Bbox(args) => commands::bbox::run(args, &session),
        Commands::Check(args) => commands::check::run(args, &session),
        Commands::Cost(args) => commands::cost::run(args, &session),
        Commands::Eval(args) => commands::eval::run(args, &session),
        Commands::Parts(cmd) => commands::parts::run(cmd, &session),
        Commands::Rules(args) => commands::rules::run(args, &session),
        Commands::Export(args) => commands::export::run(args, &session),
        Commands::Schema(args) => commands::schema::run(args, &session),
        Commands::Config(cmd) => commands::config::run(cmd, &session),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
