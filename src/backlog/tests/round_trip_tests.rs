//! Render-then-parse fidelity of backlog documents.

use crate::backlog::domain::{Backlog, BacklogDomainError, Proposal, TaskId};
use crate::backlog::grammar::{parse, render};
use rstest::{fixture, rstest};

fn id(value: u64) -> TaskId {
    TaskId::new(value).expect("valid task id")
}

#[fixture]
fn populated() -> Backlog {
    let mut backlog = Backlog::new();
    backlog
        .append_tasks([
            "Fix login bug",
            "Document the **Options:** field",
            "Rotate signing keys",
            "Retire legacy endpoint",
        ])
        .expect("valid descriptions");
    backlog
        .propose_fixes(
            id(1),
            [
                Proposal::structured("Patch session handling", "Reset the cookie\n- keep audit log"),
                Proposal::from("Roll back release"),
            ],
        )
        .expect("valid proposals");
    backlog
        .approve_resolution(id(3), "Rotate quarterly")
        .expect("valid resolution");
    backlog.mark_done(id(4), Some("Removed in 2.0"));
    backlog
}

#[rstest]
fn parse_restores_rendered_backlog(populated: Backlog) {
    let reparsed = parse(&render(&populated));

    assert_eq!(reparsed, populated);
}

#[rstest]
fn rendering_is_idempotent(populated: Backlog) {
    let first = render(&populated);
    let second = render(&parse(&first));

    assert_eq!(first, second);
}

#[rstest]
fn empty_backlog_round_trips() {
    assert_eq!(parse(&render(&Backlog::new())), Backlog::new());
}

#[rstest]
fn history_only_backlog_round_trips() {
    let mut backlog = Backlog::new();
    backlog
        .append_tasks(["one", "two"])
        .expect("valid descriptions");
    backlog.mark_done(id(2), None);
    backlog.mark_done(id(1), Some("Closed"));

    let reparsed = parse(&render(&backlog));

    assert_eq!(reparsed, backlog);
    assert_eq!(reparsed.task_count(), 0);
    assert_eq!(reparsed.history().len(), 2);
}

#[rstest]
fn hand_written_document_normalises_to_canonical_form() {
    let text = concat!(
        "Notes before the first task are ignored.\n",
        "## 2\n",
        "**Description:** Second\n",
        "task\n",
        "**Options:**\n",
        "* Try this\n",
        "\tindented detail\n",
        "## 1\n",
        "**Description:** First\n",
        "**Resolution:** Done already\n",
    );

    let backlog = parse(text);
    let canonical = render(&backlog);

    assert_eq!(
        canonical,
        concat!(
            "## 1\n\n",
            "**Description:** First\n\n",
            "**Resolution:** Done already\n",
            "\n",
            "## 2\n\n",
            "**Description:** Second task\n\n",
            "**Options:**\n",
            "1. Try this\n",
            "   indented detail\n",
        )
    );
    assert_eq!(parse(&canonical), backlog);
}

#[rstest]
#[case("# History")]
#[case("First step\n  # History  \nLast step")]
fn history_marker_in_option_details_is_rejected(#[case] details: &str) {
    let mut backlog = Backlog::new();
    backlog
        .append_tasks(["First", "Second"])
        .expect("valid descriptions");
    let before = backlog.clone();

    let result = backlog.propose_fixes(id(1), [Proposal::structured("Split", details)]);

    assert_eq!(
        result,
        Err(BacklogDomainError::ReservedDetailLine("# History".to_owned()))
    );
    assert_eq!(backlog, before);
    let reparsed = parse(&render(&backlog));
    assert_eq!(reparsed.task_count(), 2);
    assert!(reparsed.history().is_empty());
}

#[rstest]
fn history_heading_variants_in_details_survive_round_trip() {
    let mut backlog = Backlog::new();
    backlog
        .append_tasks(["First", "Second"])
        .expect("valid descriptions");
    backlog
        .propose_fixes(
            id(1),
            [Proposal::structured("Split", "## History\n# History of the module")],
        )
        .expect("valid proposal");

    let reparsed = parse(&render(&backlog));

    assert_eq!(reparsed, backlog);
}
