//! End-to-end behaviour of a grid session driven by keys, clicks and the clipboard.

use gridedit_core::{
    CellRef, FocusLog, GridModel, Key, KeyInput, Modifiers, Row, RowId, SelectionRange, Session,
};

fn five_rows() -> GridModel {
    GridModel::new(
        (1..=5)
            .map(|i| {
                Row::new(
                    RowId(i),
                    format!("2024-02-0{}", i),
                    format!("row {}", i),
                    i as i64 * 10,
                )
            })
            .collect(),
    )
}

fn press(session: &mut Session<FocusLog>, key: Key, modifiers: Modifiers) {
    session.handle_key(KeyInput::new(key, modifiers));
}

fn cell(row: usize, col: usize) -> CellRef {
    CellRef::new(row, col)
}

#[test]
fn extend_then_retract_matches_single_extension() {
    let mut a = Session::new(five_rows(), FocusLog::default());
    a.click_cell(cell(1, 1), false);
    press(&mut a, Key::ArrowDown, Modifiers::shift());

    let mut b = Session::new(five_rows(), FocusLog::default());
    b.click_cell(cell(1, 1), false);
    press(&mut b, Key::ArrowDown, Modifiers::shift());
    press(&mut b, Key::ArrowDown, Modifiers::shift());
    press(&mut b, Key::ArrowUp, Modifiers::shift());

    assert_eq!(a.current_selection(), b.current_selection());
    assert_eq!(
        b.current_selection(),
        SelectionRange::new(cell(1, 1), cell(2, 1))
    );
}

#[test]
fn ctrl_down_always_reaches_last_row() {
    for start in 0..5 {
        let mut s = Session::new(five_rows(), FocusLog::default());
        s.click_cell(cell(start, 0), false);
        press(&mut s, Key::ArrowDown, Modifiers::ctrl());
        assert_eq!(s.current_selection().end.row, 4);
        let once = s.selection_state();
        press(&mut s, Key::ArrowDown, Modifiers::ctrl());
        assert_eq!(s.selection_state(), once);
    }
}

#[test]
fn meta_shift_up_selects_to_top_keeping_bottom() {
    let mut s = Session::new(five_rows(), FocusLog::default());
    s.click_cell(cell(2, 2), false);
    press(&mut s, Key::ArrowDown, Modifiers::shift());
    press(&mut s, Key::ArrowUp, Modifiers::meta().with_shift());
    assert_eq!(
        s.current_selection(),
        SelectionRange::new(cell(0, 2), cell(3, 2))
    );
}

#[test]
fn copy_then_paste_elsewhere_round_trips() {
    let mut s = Session::new(five_rows(), FocusLog::default());
    s.click_cell(cell(0, 0), false);
    press(&mut s, Key::ArrowDown, Modifiers::shift());
    press(&mut s, Key::ArrowRight, Modifiers::shift().with_ctrl());

    let text = s.copy().expect("not editing");
    assert_eq!(text, "2024-02-01\trow 1\t10\n2024-02-02\trow 2\t20");

    s.click_cell(cell(3, 0), false);
    s.paste(&text);
    let rows = s.grid().rows();
    assert_eq!(rows[3].date, "2024-02-01");
    assert_eq!(rows[3].title, "row 1");
    assert_eq!(rows[3].count, 10);
    assert_eq!(rows[4].count, 20);
    // Identity stays with the position that was written to.
    assert_eq!(rows[3].id, RowId(4));
}

#[test]
fn paste_block_at_last_row_writes_only_that_row() {
    let mut s = Session::new(five_rows(), FocusLog::default());
    let before = s.grid().clone();
    s.click_cell(cell(4, 0), false);
    s.paste("a\tb\t1\nc\td\t2\ne\tf\t3");

    assert_eq!(s.grid().row_count(), 5);
    assert_eq!(s.grid().row(4).unwrap().title, "b");
    assert_eq!(&s.grid().rows()[..4], &before.rows()[..4]);
    // The snapshot taken before the paste is unaffected.
    assert_eq!(before.row(4).unwrap().title, "row 5");
}

#[test]
fn paste_numeric_fallback() {
    let mut s = Session::new(five_rows(), FocusLog::default());
    s.click_cell(cell(0, 2), false);

    s.paste("abc");
    assert_eq!(s.grid().row(0).unwrap().count, 10);
    s.paste("");
    assert_eq!(s.grid().row(0).unwrap().count, 10);
    s.paste("7");
    assert_eq!(s.grid().row(0).unwrap().count, 7);
}

#[test]
fn editing_flow_with_focus_requests() {
    let mut s = Session::new(five_rows(), FocusLog::default());

    s.on_cell_activate(cell(0, 1));
    assert_eq!(s.current_editing_cell(), Some(cell(0, 1)));
    s.on_cell_value_change(cell(0, 1), "edited");
    press(&mut s, Key::Enter, Modifiers::NONE);

    assert_eq!(s.current_editing_cell(), None);
    assert_eq!(s.selected_cell(), cell(1, 1));
    assert_eq!(s.grid().row(0).unwrap().title, "edited");

    press(&mut s, Key::Enter, Modifiers::NONE);
    assert_eq!(s.focus().requests, vec![cell(0, 1), cell(1, 1)]);
}

#[test]
fn shift_selection_closes_active_edit() {
    let mut s = Session::new(five_rows(), FocusLog::default());
    s.click_cell(cell(2, 0), false);
    press(&mut s, Key::Enter, Modifiers::NONE);
    assert!(s.is_editing());

    press(&mut s, Key::ArrowRight, Modifiers::shift());
    assert!(!s.is_editing());
    assert!(!s.current_selection().is_single_cell());
}
