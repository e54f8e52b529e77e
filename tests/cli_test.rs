// tests/cli_test.rs
use clap::Parser;
use release_branch::cli::{Cli, Command};
use release_branch::domain::{BumpMode, DependencyPolicy, PublishMode, StartingPoint};

fn parse_build(args: &[&str]) -> release_branch::domain::ReleaseRequest {
    let mut argv = vec!["release-branch", "build"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).expect("arguments should parse");
    match cli.command {
        Command::Build(args) => args.into_request().unwrap(),
        other => panic!("expected build, got {:?}", other),
    }
}

#[test]
fn test_dist_tag_with_defaults() {
    let request = parse_build(&["--start-from-npm-dist-tag", "latest-rc"]);
    assert_eq!(request.start, StartingPoint::DistTag("latest-rc".to_string()));
    assert_eq!(request.bump, BumpMode::Ordinary);
    assert_eq!(request.publish, PublishMode::Publish);
    assert_eq!(request.dependencies, DependencyPolicy::default());
    assert!(!request.snapshot);
    assert!(!request.schema);
}

#[test]
fn test_rctag_alias_and_short_flags() {
    let request = parse_build(&["--rctag", "latest-rc"]);
    assert_eq!(request.start, StartingPoint::DistTag("latest-rc".to_string()));

    let request = parse_build(&["-g", "abc1234", "--build-only", "--snapshot", "--schema"]);
    assert_eq!(request.start, StartingPoint::Ref("abc1234".to_string()));
    assert_eq!(request.publish, PublishMode::BuildOnly);
    assert!(request.snapshot);
    assert!(request.schema);
}

#[test]
fn test_prerelease_and_patch() {
    let request = parse_build(&["-d", "latest-rc", "--prerelease", "dev"]);
    assert_eq!(request.bump, BumpMode::Prerelease("dev".to_string()));

    let request = parse_build(&["-g", "2.3.0", "--patch"]);
    assert_eq!(request.bump, BumpMode::Patch);
}

#[test]
fn test_policy_negation_last_wins() {
    let request = parse_build(&["-d", "latest-rc", "--no-resolutions"]);
    assert_eq!(
        request.dependencies,
        DependencyPolicy::Policies {
            resolutions: false,
            pinned: true,
        }
    );

    let request = parse_build(&["-d", "latest-rc", "--no-pinned-deps", "--pinned-deps"]);
    assert_eq!(request.dependencies, DependencyPolicy::default());
}

#[test]
fn test_only_is_comma_separated() {
    let request = parse_build(&[
        "-d",
        "latest-rc",
        "--only",
        "@salesforce/plugin-auth,@salesforce/plugin-data@3.1.0",
    ]);
    assert_eq!(
        request.dependencies,
        DependencyPolicy::Only(vec![
            "@salesforce/plugin-auth".to_string(),
            "@salesforce/plugin-data@3.1.0".to_string(),
        ])
    );
}

#[test]
fn test_invalid_combinations_rejected() {
    let invalid: [&[&str]; 5] = [
        &["release-branch", "build"],
        &["release-branch", "build", "-d", "latest-rc", "-g", "main"],
        &["release-branch", "build", "-g", "main", "--patch", "--prerelease", "dev"],
        &["release-branch", "build", "-g", "main", "--only", "a", "--no-resolutions"],
        &["release-branch", "build", "-g", "main", "--only", "a", "--pinned-deps"],
    ];

    for argv in invalid {
        assert!(Cli::try_parse_from(argv).is_err(), "should reject {:?}", argv);
    }
}

#[test]
fn test_global_config_flag() {
    let cli = Cli::try_parse_from([
        "release-branch",
        "build",
        "-g",
        "main",
        "--config",
        "custom.toml",
    ])
    .unwrap();
    assert_eq!(cli.config.as_deref(), Some("custom.toml"));
}

#[test]
fn test_prune_flags() {
    let cli = Cli::try_parse_from(["release-branch", "prune", "-d", "-t"]).unwrap();
    match cli.command {
        Command::Prune(args) => {
            assert!(args.dryrun);
            assert!(args.types);
            assert!(!args.verbose);
        }
        other => panic!("expected prune, got {:?}", other),
    }
}
