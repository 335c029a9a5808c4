use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::QualityLevel;
use crate::domain::services::actions::help_text;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if !config_file_path.parent().unwrap().exists() {
        fs::create_dir_all(config_file_path.parent().unwrap()).await?;
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    let config_path_display = config_file_path.as_os_str().to_str().unwrap();
    println!("Created default config file at {config_path_display}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    let mut cmd = Command::new("debug");
    cmd = cmd.about("Debug helpers for quizforge")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running quizforge with environment variable RUST_LOG=quizforge")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );

    return cmd;
}

pub fn build() -> Command {
    let hotkeys_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("HOTKEYS:") {
                return Paint::new(format!("WIZARD {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("quizforge")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(hotkeys_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .arg(
            Arg::new(ConfigKey::UploadFile.to_string())
                .value_name("FILE")
                .help("Path to a notes document to preload into the upload step.")
                .required(false),
        )
        .arg(
            Arg::new(ConfigKey::ServerUrl.to_string())
                .long(ConfigKey::ServerUrl.to_string())
                .env("QUIZFORGE_SERVER_URL")
                .num_args(1)
                .help(format!(
                    "The URL of the question generation server. [default: {}]",
                    Config::default(ConfigKey::ServerUrl)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ApiKey.to_string())
                .long(ConfigKey::ApiKey.to_string())
                .env("QUIZFORGE_API_KEY")
                .num_args(1)
                .help("API key sent with each generation request. Never written to disk by quizforge.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Quality.to_string())
                .short('q')
                .long(ConfigKey::Quality.to_string())
                .env("QUIZFORGE_QUALITY")
                .num_args(1)
                .help(format!(
                    "How much effort the server puts into generated questions. [default: {}]",
                    Config::default(ConfigKey::Quality)
                ))
                .value_parser(PossibleValuesParser::new(QualityLevel::VARIANTS))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::EnableReview.to_string())
                .long(ConfigKey::EnableReview.to_string())
                .env("QUIZFORGE_ENABLE_REVIEW")
                .num_args(1)
                .help(format!(
                    "Review and edit generated questions before taking the quiz. [default: {}]",
                    Config::default(ConfigKey::EnableReview)
                ))
                .value_parser(PossibleValuesParser::new(["true", "false"]))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::PollInterval.to_string())
                .long(ConfigKey::PollInterval.to_string())
                .env("QUIZFORGE_POLL_INTERVAL")
                .num_args(1)
                .help(format!(
                    "Time to wait in milliseconds between status checks while the server processes a document. [default: {}]",
                    Config::default(ConfigKey::PollInterval)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::HealthCheckTimeout.to_string())
                .long(ConfigKey::HealthCheckTimeout.to_string())
                .env("QUIZFORGE_HEALTH_CHECK_TIMEOUT")
                .num_args(1)
                .help(format!(
                    "Time to wait in milliseconds before timing out when doing a healthcheck for the generation server. [default: {}]",
                    Config::default(ConfigKey::HealthCheckTimeout)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("QUIZFORGE_CONFIG_FILE")
                .num_args(1)
                .help(format!(
                    "Path to configuration file [default: {}]",
                    Config::default(ConfigKey::ConfigFile)
                ))
                .global(true),
        );
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = dirs::cache_dir().unwrap().join("quizforge/debug.log");
                    println!("{}", log_path.to_str().unwrap());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
