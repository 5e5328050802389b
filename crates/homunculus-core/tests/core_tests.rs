//! Integration tests for homunculus-core
//!
//! Input types handed to the evolution engine and the shared error type.

use homunculus_core::{CommandOutcome, Error, Persona, Proposal, DEFAULT_PROPOSAL_KIND};
use std::path::PathBuf;

// ============================================================
// Persona
// ============================================================

#[test]
fn persona_parses_names_and_aliases() {
    assert_eq!("proposer".parse::<Persona>().unwrap(), Persona::Proposer);
    assert_eq!("Evaluator".parse::<Persona>().unwrap(), Persona::Evaluator);
    assert_eq!(" child ".parse::<Persona>().unwrap(), Persona::Proposer);
    assert_eq!("brain".parse::<Persona>().unwrap(), Persona::Evaluator);
}

#[test]
fn persona_rejects_unknown_names() {
    let err = "narrator".parse::<Persona>().unwrap_err();
    assert!(matches!(err, Error::UnknownPersona(ref name) if name == "narrator"));
    assert_eq!(err.to_string(), "unknown persona: narrator");
}

#[test]
fn persona_display_matches_serde() {
    for persona in [Persona::Proposer, Persona::Evaluator] {
        let json = serde_json::to_string(&persona).unwrap();
        assert_eq!(json, format!("\"{}\"", persona));
        assert_eq!(persona.to_string().parse::<Persona>().unwrap(), persona);
    }
}

// ============================================================
// CommandOutcome / Proposal
// ============================================================

#[test]
fn command_prefix_is_first_token() {
    assert_eq!(CommandOutcome::succeeded("ls -la /tmp", "").prefix(), Some("ls"));
    assert_eq!(CommandOutcome::failed("  \tgrep foo", "").prefix(), Some("grep"));
    assert_eq!(CommandOutcome::failed("   ", "").prefix(), None);
}

#[test]
fn command_outcome_output_defaults_to_empty() {
    let outcome: CommandOutcome =
        serde_json::from_str(r#"{"command": "ls", "success": true}"#).unwrap();
    assert_eq!(outcome, CommandOutcome::succeeded("ls", ""));
}

#[test]
fn proposal_kind_defaults_to_feature() {
    let proposal = Proposal::feature("add a guestbook");
    assert_eq!(proposal.kind, DEFAULT_PROPOSAL_KIND);
    assert_eq!(Proposal::new("x", "game").kind, "game");
}

// ============================================================
// Error
// ============================================================

#[test]
fn error_messages_name_their_context() {
    let err = Error::persist("/tmp/evolution.json", "rename: denied");
    assert_eq!(
        err.to_string(),
        "persist failed: /tmp/evolution.json - rename: denied"
    );
    match err {
        Error::Persist { path, .. } => assert_eq!(path, PathBuf::from("/tmp/evolution.json")),
        other => panic!("unexpected {:?}", other),
    }

    let err = Error::SchemaTooNew {
        found: 3,
        supported: 2,
    };
    assert_eq!(err.to_string(), "state schema v3 is newer than supported v2");

    assert_eq!(Error::config("bad key").to_string(), "config error: bad key");

    let err = Error::state_read("/tmp/evolution.json", "Is a directory");
    assert_eq!(
        err.to_string(),
        "cannot read state /tmp/evolution.json: Is a directory"
    );

    let err = Error::SchemaTooNew {
        found: u64::from(u32::MAX) + 3,
        supported: 2,
    };
    assert_eq!(err.to_string(), "state schema v4294967298 is newer than supported v2");
}

#[test]
fn io_and_json_errors_convert() {
    let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
    let err: Error = io.into();
    assert!(matches!(err, Error::IoError(_)));

    let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: Error = json.into();
    assert!(err.to_string().starts_with("json error:"));
}
