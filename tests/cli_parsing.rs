use clap::Parser;
use gh2tracker::cli::{Cli, Commands};

#[test]
fn parse_sync_with_state_file() {
    let cli = Cli::try_parse_from(vec![
        "gh2tracker",
        "sync",
        "--gh-org",
        "octo",
        "--gh-repo",
        "widgets",
        "--gh-token",
        "t1",
        "--tracker-token",
        "t2",
        "--state-file",
        "states.json",
        "--direction",
        "gh2tracker",
    ])
    .unwrap();

    match cli.command {
        Commands::Sync(args) => {
            assert_eq!(args.creds.gh_org.as_deref(), Some("octo"));
            assert_eq!(args.creds.gh_repo.as_deref(), Some("widgets"));
            assert_eq!(args.state_file.as_deref(), Some("states.json"));
            assert_eq!(args.state_issue, None);
            assert_eq!(args.behavior.direction.as_deref(), Some("gh2tracker"));
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn parse_sync_with_auto_state_issue() {
    let cli = Cli::try_parse_from(vec!["gh2tracker", "sync", "--state-issue", "-"]).unwrap();

    match cli.command {
        Commands::Sync(args) => {
            assert_eq!(args.state_issue.as_deref(), Some("-"));
            // direction falls back to the configured default
            assert_eq!(args.behavior.direction, None);
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn parse_serve_with_port() {
    let cli = Cli::try_parse_from(vec![
        "gh2tracker",
        "serve",
        "--port",
        "8080",
        "--secret",
        "hush",
    ])
    .unwrap();

    match cli.command {
        Commands::Serve(args) => {
            assert_eq!(args.port, Some(8080));
            assert_eq!(args.creds.secret.as_deref(), Some("hush"));
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn parse_hooks_install() {
    let cli = Cli::try_parse_from(vec![
        "gh2tracker",
        "hooks",
        "install",
        "--gh-org",
        "octo",
        "--hook-url",
        "https://hooks.example/hook",
        "--insecure-ssl",
    ])
    .unwrap();

    match cli.command {
        Commands::Hooks(args) => match args.command {
            gh2tracker::cli::commands::hooks::HooksCommand::Install {
                creds,
                hook_url,
                insecure_ssl,
            } => {
                assert_eq!(creds.gh_org.as_deref(), Some("octo"));
                assert_eq!(hook_url.as_deref(), Some("https://hooks.example/hook"));
                assert!(insecure_ssl);
            }
            _ => panic!("Wrong hooks command"),
        },
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(vec!["gh2tracker", "frobnicate"]).is_err());
}
