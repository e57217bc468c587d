use super::*;
use crate::gateway::memory::{asset_row, pin_row, Call, MemoryGateway, Op};
use crate::model::{ASSETS_TABLE, PINS_TABLE};
use crate::notify::NotificationKind;

fn scenario_gateway() -> MemoryGateway {
    MemoryGateway::new()
        .with_rows(
            PINS_TABLE,
            vec![
                pin_row("P2", "2024-01-01", None),
                pin_row("P1", "2024-01-02", None),
            ],
        )
        .with_rows(ASSETS_TABLE, vec![asset_row("A9", "sku-42")])
}

fn loaded_board(gateway: &MemoryGateway) -> MissionBoard {
    let mut board = MissionBoard::default();
    board.reload(gateway).expect("initial load");
    board
}

fn pin_ids(board: &MissionBoard) -> Vec<&str> {
    board
        .orphans()
        .iter()
        .map(|pin| pin.pin_id.as_str())
        .collect()
}

#[test]
fn successful_adoption_removes_pin_and_idles_session() {
    let gateway = scenario_gateway();
    let mut board = loaded_board(&gateway);
    assert_eq!(pin_ids(&board), vec!["P1", "P2"]);

    board.start_adoption("P1").expect("start");
    assert_eq!(
        board.session(),
        &AdoptionSession::Editing {
            target_pin_id: "P1".to_string(),
            sku_input: String::new()
        }
    );
    board.update_sku_input("sku-42").expect("edit");
    assert_eq!(board.session().sku_input(), Some("sku-42"));

    let asset_id = board.submit(&gateway).expect("submit");
    assert_eq!(asset_id, "A9");
    assert_eq!(pin_ids(&board), vec!["P2"]);
    assert!(board.session().is_idle());
    let toast = board.notification().expect("success toast");
    assert_eq!(toast.kind, NotificationKind::Success);
    assert_eq!(toast.message, "Pin P1 linked to sku-42.");
}

#[test]
fn unknown_sku_keeps_list_and_returns_to_editing() {
    let gateway = scenario_gateway();
    let mut board = loaded_board(&gateway);

    board.start_adoption("P1").expect("start");
    board.update_sku_input("ghost").expect("edit");
    let err = board.submit(&gateway).expect_err("unknown sku");

    assert_eq!(err.classification(), "AssetNotFound");
    assert_eq!(pin_ids(&board), vec!["P1", "P2"]);
    assert_eq!(
        board.session(),
        &AdoptionSession::Editing {
            target_pin_id: "P1".to_string(),
            sku_input: "ghost".to_string()
        }
    );
    let toast = board.notification().expect("error toast");
    assert_eq!(toast.kind, NotificationKind::Error);
    assert_eq!(toast.message, "Asset with the provided SKU not found.");
    assert_eq!(toast.classification, Some("AssetNotFound"));
}

#[test]
fn blank_submit_issues_no_remote_call() {
    let gateway = scenario_gateway();
    let mut board = loaded_board(&gateway);
    let calls_after_load = gateway.calls().len();

    board.start_adoption("P1").expect("start");
    board.update_sku_input("   ").expect("edit");
    let err = board.submit(&gateway).expect_err("blank sku");

    assert_eq!(err.classification(), "ValidationError");
    assert_eq!(gateway.calls().len(), calls_after_load);
    assert_eq!(board.session().state_label(), "editing");
    assert_eq!(pin_ids(&board), vec!["P1", "P2"]);
}

#[test]
fn write_failure_preserves_input_for_correction() {
    let gateway = scenario_gateway();
    let mut board = loaded_board(&gateway);
    gateway.fail_next(Op::Update, "permission denied for table active_pins");

    board.start_adoption("P2").expect("start");
    board.update_sku_input("sku-42").expect("edit");
    let err = board.submit(&gateway).expect_err("write fails");

    assert_eq!(
        err,
        MissionError::LinkWriteFailed("permission denied for table active_pins".to_string())
    );
    assert_eq!(board.session().sku_input(), Some("sku-42"));
    assert_eq!(pin_ids(&board), vec!["P1", "P2"]);

    // Resubmitting the same input succeeds once the backend recovers.
    board.submit(&gateway).expect("retry by user");
    assert_eq!(pin_ids(&board), vec!["P1"]);
}

#[test]
fn reload_after_link_agrees_with_local_removal() {
    let gateway = scenario_gateway();
    let mut board = loaded_board(&gateway);
    board.start_adoption("P1").expect("start");
    board.update_sku_input("sku-42").expect("edit");
    board.submit(&gateway).expect("submit");
    let local = pin_ids(&board)
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>();

    board.reload(&gateway).expect("reload");
    assert_eq!(pin_ids(&board), local);
    assert!(matches!(
        gateway.calls().last(),
        Some(Call::Query { .. })
    ));
}

#[test]
fn failed_reload_keeps_previous_snapshot() {
    let gateway = scenario_gateway();
    let mut board = loaded_board(&gateway);
    gateway.fail_next(Op::Query, "fetch failed");

    let err = board.reload(&gateway).expect_err("reload fails");
    assert_eq!(err.classification(), "DataAccessError");
    assert_eq!(
        board.load_error(),
        Some("Failed to fetch orphan pins: fetch failed")
    );
    assert_eq!(pin_ids(&board), vec!["P1", "P2"]);

    board.reload(&gateway).expect("reload recovers");
    assert_eq!(board.load_error(), None);
}

#[test]
fn second_adoption_is_rejected_while_one_is_open() {
    let gateway = scenario_gateway();
    let mut board = loaded_board(&gateway);
    board.start_adoption("P1").expect("start");

    let err = board.start_adoption("P2").expect_err("second start");
    assert_eq!(err.classification(), "InvalidTransition");
    assert_eq!(board.session().target_pin_id(), Some("P1"));
    assert!(board
        .notification()
        .is_some_and(|toast| toast.kind == NotificationKind::Error));
}

#[test]
fn only_pins_on_the_board_can_be_adopted() {
    let gateway = scenario_gateway();
    let mut board = loaded_board(&gateway);
    let err = board.start_adoption("P9").expect_err("unknown pin");
    assert_eq!(
        err,
        MissionError::Validation("Pin P9 is not in the orphan set.".to_string())
    );
    assert!(board.session().is_idle());
}

#[test]
fn late_success_after_cancel_still_removes_pin() {
    let gateway = scenario_gateway();
    let mut board = loaded_board(&gateway);
    board.start_adoption("P1").expect("start");
    board.cancel_adoption().expect("cancel");

    board
        .settle("P1", "sku-42", Ok("A9".to_string()))
        .expect("late completion");
    assert!(board.session().is_idle());
    assert_eq!(pin_ids(&board), vec!["P2"]);
}

#[test]
fn local_removal_reports_whether_a_pin_was_dropped() {
    let gateway = scenario_gateway();
    let mut board = loaded_board(&gateway);
    assert!(board.apply_local_removal("P2"));
    assert!(!board.apply_local_removal("P2"));
    assert!(!board.apply_local_removal("missing"));
    assert_eq!(pin_ids(&board), vec!["P1"]);
}

#[test]
fn notifications_expire_after_ttl() {
    let mut board = MissionBoard::new(Duration::from_secs(4));
    board.notify(Notification::success("copied", board.toast_ttl()));

    assert!(!board.expire_notification(Instant::now()));
    assert!(board.notification().is_some());
    assert!(board.expire_notification(Instant::now() + Duration::from_secs(5)));
    assert!(board.notification().is_none());
}

#[test]
fn submitting_is_observable_between_begin_and_finish() {
    let gateway = scenario_gateway();
    let mut board = loaded_board(&gateway);
    let calls_after_load = gateway.calls().len();
    board.start_adoption("P1").expect("start");
    board.update_sku_input(" sku-42 ").expect("edit");

    let request = board.begin_submit().expect("begin");
    assert!(board.session().is_submitting());
    assert_eq!(request.sku, "sku-42");
    assert_eq!(gateway.calls().len(), calls_after_load);

    board.finish_submit(&gateway, &request).expect("finish");
    assert!(board.session().is_idle());
    assert_eq!(pin_ids(&board), vec!["P2"]);
}
