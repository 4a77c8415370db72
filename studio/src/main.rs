// This file is part of the product NoPressure Studio.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::rt::System;
use actix_web::{App, HttpServer, middleware::Logger, web};
use log::info;
use std::io::Write;
use std::sync::Arc;

use studio::app_state::AppState;
use studio::bootstrap::{self, BootstrapResult};
use studio::config::ValidatedConfig;
use studio::iam::{JwtAuthMiddlewareFactory, JwtService, User};
use studio::items;
use studio::runtime_paths::RuntimePaths;

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let parsed_args = match parse_args() {
        Ok(args) => args,
        Err(error) => {
            eprintln!("❌ Invalid command line arguments: {}", error);
            eprintln!("❌ Use -C <root> to set the runtime directory.");
            return 1;
        }
    };

    if matches!(parsed_args.mode, RunMode::Help) {
        print!("{}", help_text());
        return 0;
    }

    let bootstrap = match bootstrap::bootstrap_runtime(&parsed_args.runtime_root) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("❌ Bootstrap error: {}", error);
            eprintln!("❌ Application cannot start with invalid configuration.");
            return 1;
        }
    };

    match parsed_args.mode {
        RunMode::Token { username, roles } => {
            issue_token(&bootstrap.validated_config, username, roles)
        }
        _ => match System::new().block_on(run_server(bootstrap)) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("❌ Server failed to start: {}", error);
                1
            }
        },
    }
}

fn issue_token(config: &ValidatedConfig, username: String, roles: Vec<String>) -> i32 {
    let token = JwtService::new(&config.auth)
        .and_then(|jwt_service| jwt_service.create_token(&User::new(username, roles)));
    match token {
        Ok(token) => {
            println!("{}", token);
            0
        }
        Err(error) => {
            eprintln!("❌ Failed to issue token: {}", error);
            1
        }
    }
}

async fn run_server(bootstrap: BootstrapResult) -> std::io::Result<()> {
    let validated_config = Arc::new(bootstrap.validated_config);
    let runtime_paths = bootstrap.runtime_paths;

    // Configure logging with a stable format
    env_logger::Builder::from_default_env()
        .filter_level(validated_config.log_level())
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .map_err(|error| {
            eprintln!("❌ Failed to initialize logger: {}", error);
            std::io::Error::other(error.to_string())
        })?;

    log_startup_info(&validated_config, &runtime_paths, bootstrap.seeded_templates);

    let jwt_service = JwtService::new(&validated_config.auth).map_err(|error| {
        eprintln!("❌ Failed to initialize JWT service: {}", error);
        std::io::Error::other(error.to_string())
    })?;
    let jwt_service = web::Data::new(jwt_service);

    let app_state = AppState::from_runtime(&validated_config, &runtime_paths).map_err(|error| {
        eprintln!("❌ Failed to open stores: {}", error);
        std::io::Error::other(error.to_string())
    })?;
    let app_state = web::Data::new(app_state);

    info!("✅ Module store opened: {}", runtime_paths.modulestore_file.display());

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(jwt_service.clone())
            .wrap(Logger::new(
                r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T"#,
            ))
            .wrap(JwtAuthMiddlewareFactory)
            .configure(items::configure)
    })
    .workers(validated_config.server.workers)
    .bind(validated_config.server.address_tuple())?
    .run()
    .await
}

fn log_startup_info(config: &ValidatedConfig, runtime_paths: &RuntimePaths, seeded: bool) {
    info!("Starting {}", config.app.name);
    info!("Workers: {}", config.server.workers);
    info!(
        "Listening on http://{}:{}",
        config.server.host, config.server.port
    );
    info!(
        "Subtitles from {} (lang {}, timeout {}s)",
        config.subtitles.youtube_url, config.subtitles.language, config.subtitles.timeout_seconds
    );

    info!(
        "State directory (canonical): {}",
        runtime_paths.state_dir.display()
    );
    info!(
        "Assets directory (canonical): {}",
        runtime_paths.assets_dir.display()
    );
    if seeded {
        info!("Seeded module store with course templates");
    }
    info!("Config file: {}", runtime_paths.config_file.display());
    info!("Runtime root: {}", runtime_paths.root.display());

    if let Ok(current_dir) = std::env::current_dir() {
        info!("Working directory: {}", current_dir.display());
    }
}

fn help_text() -> &'static str {
    concat!(
        "Usage: studio [-C <root>] [command]\n",
        "\n",
        "Commands:\n",
        "    serve                         Run the HTTP server (default)\n",
        "    token <username> [role...]    Print a signed access token\n",
        "    help                          Show this message\n",
        "\n",
        "Options:\n",
        "    -C <root>                     Runtime directory (default: current directory)\n",
    )
}

#[derive(Debug)]
enum RunMode {
    Serve,
    Token {
        username: String,
        roles: Vec<String>,
    },
    Help,
}

struct ParsedArgs {
    runtime_root: std::path::PathBuf,
    mode: RunMode,
}

fn parse_args() -> Result<ParsedArgs, String> {
    parse_args_from(std::env::args().skip(1))
}

fn parse_args_from<I>(args: I) -> Result<ParsedArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    if args.iter().any(|arg| is_help_flag(arg)) {
        return Ok(ParsedArgs {
            runtime_root: std::path::PathBuf::from("."),
            mode: RunMode::Help,
        });
    }

    let mut args = args.into_iter();
    let mut runtime_root = std::path::PathBuf::from(".");
    let mut tokens = Vec::new();

    while let Some(arg) = args.next() {
        if arg == "--" {
            continue;
        } else if arg == "-C" {
            let value = args
                .next()
                .ok_or_else(|| "Missing value for -C".to_string())?;
            runtime_root = std::path::PathBuf::from(value);
        } else {
            tokens.push(arg);
        }
    }

    let mode = match tokens.split_first() {
        None => RunMode::Serve,
        Some((command, rest)) => match command.to_ascii_lowercase().as_str() {
            "help" => RunMode::Help,
            "serve" if rest.is_empty() => RunMode::Serve,
            "serve" => return Err("serve takes no arguments".to_string()),
            "token" => {
                let (username, roles) = rest
                    .split_first()
                    .ok_or_else(|| "token requires a username".to_string())?;
                RunMode::Token {
                    username: username.clone(),
                    roles: roles.to_vec(),
                }
            }
            other => return Err(format!("Unknown command: {}", other)),
        },
    };

    let runtime_root = make_runtime_root_absolute(runtime_root)?;
    Ok(ParsedArgs { runtime_root, mode })
}

fn is_help_flag(arg: &str) -> bool {
    arg == "-h" || arg == "--help"
}

fn make_runtime_root_absolute(
    runtime_root: std::path::PathBuf,
) -> Result<std::path::PathBuf, String> {
    if runtime_root.is_absolute() {
        return Ok(runtime_root);
    }

    let current_dir = std::env::current_dir()
        .map_err(|error| format!("Failed to resolve current directory: {}", error))?;
    Ok(current_dir.join(runtime_root))
}

#[cfg(test)]
mod tests {
    use super::{RunMode, help_text, parse_args_from};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parse_args_defaults_to_serve() {
        let parsed = parse_args_from(Vec::new()).expect("parse args");
        assert!(matches!(parsed.mode, RunMode::Serve));
        assert!(parsed.runtime_root.is_absolute());
    }

    #[test]
    fn parse_args_accepts_runtime_root() {
        let parsed = parse_args_from(args(&["-C", "/tmp/studio", "serve"])).expect("parse args");
        assert!(matches!(parsed.mode, RunMode::Serve));
        assert_eq!(parsed.runtime_root, std::path::PathBuf::from("/tmp/studio"));
    }

    #[test]
    fn parse_args_reads_token_command() {
        let parsed =
            parse_args_from(args(&["token", "alice", "staff_MITx.999", "admin"])).expect("parse");
        match parsed.mode {
            RunMode::Token { username, roles } => {
                assert_eq!(username, "alice");
                assert_eq!(roles, vec!["staff_MITx.999", "admin"]);
            }
            other => panic!("unexpected mode {:?}", other),
        }
    }

    #[test]
    fn parse_args_rejects_token_without_username() {
        assert!(parse_args_from(args(&["token"])).is_err());
    }

    #[test]
    fn parse_args_rejects_unknown_command() {
        assert!(parse_args_from(args(&["launch"])).is_err());
        assert!(parse_args_from(args(&["-C"])).is_err());
    }

    #[test]
    fn parse_args_accepts_help() {
        assert!(matches!(
            parse_args_from(args(&["--help"])).unwrap().mode,
            RunMode::Help
        ));
        assert!(matches!(
            parse_args_from(args(&["-C", "x", "help"])).unwrap().mode,
            RunMode::Help
        ));
    }

    #[test]
    fn help_text_lists_commands() {
        let text = help_text();
        assert!(text.starts_with("Usage: studio"));
        assert!(text.contains("token <username>"));
        assert!(text.contains("-C <root>"));
    }
}
