use anyhow::Result;
use blogfeed::build::build_feed;
use blogfeed::config::Config;
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use std::path::{Path, PathBuf};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = App::new("blogfeed")
        .about("Builds a blog's syndication feed from markdown articles")
        .version(env!("CARGO_PKG_VERSION"))
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("build")
                .about("Builds the feed")
                .arg(
                    Arg::with_name("project")
                        .help("The project directory (or any directory below it)")
                        .index(1)
                        .default_value("."),
                )
                .arg(
                    Arg::with_name("output")
                        .help("The output directory (defaults to `{project}/public`)")
                        .short("o")
                        .long("output")
                        .takes_value(true),
                ),
        )
        .get_matches();

    let result = match matches.subcommand() {
        ("build", Some(matches)) => build(matches),
        _ => unreachable!("clap requires a subcommand"),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn build(matches: &ArgMatches) -> Result<()> {
    // `project` has a default value
    let project = Path::new(matches.value_of("project").unwrap_or("."));
    let output = match matches.value_of("output") {
        Some(output) => PathBuf::from(output),
        None => project.join("public"),
    };

    let config = Config::from_directory(project, &output)?;
    build_feed(&config)?;
    Ok(())
}
