use super::*;

#[test]
fn parses_db_ping_command() {
    let cli =
        Cli::try_parse_from(["rivalwatch-cli", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli =
        Cli::try_parse_from(["rivalwatch-cli", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn parses_db_seed_command() {
    let cli =
        Cli::try_parse_from(["rivalwatch-cli", "db", "seed"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Seed
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["rivalwatch-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_scan_command() {
    let cli = Cli::try_parse_from(["rivalwatch-cli", "scan"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Scan)));
}

#[test]
fn parses_check_with_target_id() {
    let cli = Cli::try_parse_from(["rivalwatch-cli", "check", "42"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Check { target_id: 42 })
    ));
}

#[test]
fn check_requires_numeric_target_id() {
    assert!(Cli::try_parse_from(["rivalwatch-cli", "check", "acme"]).is_err());
    assert!(Cli::try_parse_from(["rivalwatch-cli", "check"]).is_err());
}

#[test]
fn insights_defaults_to_all_competitors_and_limit_20() {
    let cli = Cli::try_parse_from(["rivalwatch-cli", "insights"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Insights {
            competitor: None,
            limit: 20
        })
    ));
}

#[test]
fn insights_rejects_zero_and_negative_limits() {
    for limit in ["--limit=0", "--limit=-1"] {
        let result = Cli::try_parse_from(["rivalwatch-cli", "insights", limit]);
        assert!(result.is_err(), "{limit} should be rejected");
    }
}

#[test]
fn insights_with_competitor_and_limit() {
    let cli = Cli::try_parse_from([
        "rivalwatch-cli",
        "insights",
        "--competitor",
        "Acme",
        "--limit",
        "5",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Insights {
            competitor: Some(ref name),
            limit: 5
        }) if name == "Acme"
    ));
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["rivalwatch-cli", "collect"]).is_err());
}
