use super::*;

fn typed(s: &str) -> Input {
    let mut input = Input::default();
    for c in s.chars() {
        input.insert_char(c);
    }
    input
}

#[test]
fn insert_and_backspace_at_end() {
    let mut input = typed("iran");
    assert_eq!(input.buf, "iran");
    assert_eq!(input.cursor, 4);
    input.backspace();
    assert_eq!(input.buf, "ira");
    assert_eq!(input.cursor, 3);
}

#[test]
fn editing_mid_string() {
    let mut input = typed("ac");
    input.move_left();
    input.insert_char('b');
    assert_eq!(input.buf, "abc");
    input.delete();
    assert_eq!(input.buf, "ab");
    input.delete();
    assert_eq!(input.buf, "ab");
}

#[test]
fn multibyte_chars_keep_cursor_on_boundaries() {
    let mut input = typed("héé");
    assert_eq!(input.cursor, input.buf.len());
    input.move_left();
    input.backspace();
    assert_eq!(input.buf, "hé");
    input.move_right();
    assert_eq!(input.cursor, input.buf.len());
    input.move_right();
    assert_eq!(input.cursor, input.buf.len());
}

#[test]
fn backspace_at_start_is_a_no_op() {
    let mut input = typed("x");
    input.move_left();
    input.backspace();
    assert_eq!(input.buf, "x");
    assert_eq!(input.cursor, 0);
}

#[test]
fn take_and_mask() {
    let mut input = typed("pässword");
    assert_eq!(input.masked(), "********");
    assert_eq!(input.take(), "pässword");
    assert!(input.buf.is_empty());
    assert_eq!(input.cursor, 0);

    let mut input = typed("abc");
    input.clear();
    assert_eq!(input.masked(), "");
}
