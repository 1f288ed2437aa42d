use super::*;

// =============================================================================
// ARGUMENT PARSING
// =============================================================================

#[test]
fn login_takes_username_and_password_flag() {
    let cli = Cli::try_parse_from(["quill", "login", "alice", "--password", "pw"]).expect("parse");
    match cli.command {
        Command::Login { username, password } => {
            assert_eq!(username, "alice");
            assert_eq!(password, "pw");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn register_names_are_optional() {
    let cli = Cli::try_parse_from([
        "quill", "register", "bob", "--email", "bob@example.com", "--password", "pw", "--first-name", "Bob",
    ])
    .expect("parse");
    let Command::Register(args) = cli.command else {
        panic!("expected register");
    };
    assert_eq!(args.email, "bob@example.com");
    assert_eq!(args.first_name.as_deref(), Some("Bob"));
    assert!(args.last_name.is_none());
}

#[test]
fn post_update_requires_title_and_content() {
    assert!(Cli::try_parse_from(["quill", "post", "update", "3", "--title", "t"]).is_err());

    let cli = Cli::try_parse_from(["quill", "post", "update", "3", "--title", "t", "--content", "c"])
        .expect("parse");
    let Command::Post(PostCommand { command: PostSubcommand::Update { id, title, content } }) = cli.command else {
        panic!("expected post update");
    };
    assert_eq!((id.as_str(), title.as_str(), content.as_str()), ("3", "t", "c"));
}

#[test]
fn zero_timeout_is_rejected() {
    assert!(Cli::try_parse_from(["quill", "--timeout-ms", "0", "post", "list"]).is_err());
}

#[test]
fn global_flags_shape_the_config() {
    let cli = Cli::try_parse_from([
        "quill",
        "--base-url",
        "https://blog.test/api/",
        "--timeout-ms",
        "250",
        "post",
        "list",
    ])
    .expect("parse");

    let config = config_from(&cli);

    assert_eq!(config.url("/posts/"), "https://blog.test/api/posts/");
    assert_eq!(config.timeout, Duration::from_millis(250));
}

#[test]
fn explicit_session_file_is_kept() {
    let cli = Cli::try_parse_from(["quill", "--session-file", "/tmp/s.json", "whoami"]).expect("parse");
    assert_eq!(cli.session_file, Some(PathBuf::from("/tmp/s.json")));
}

#[test]
fn default_session_file_is_json() {
    assert!(default_session_file().to_string_lossy().ends_with(".json"));
}

// =============================================================================
// ERROR MESSAGES
// =============================================================================

#[test]
fn api_errors_show_backend_message() {
    let err = CliError::from(ApiError::Status {
        status: 400,
        payload: serde_json::json!({ "error": "Username taken" }),
    });
    assert_eq!(err.message(), "Username taken");
}

#[test]
fn not_signed_in_points_at_login() {
    assert_eq!(CliError::NotSignedIn.message(), "not signed in; run `quill login`");
}
