use pop_a_mole::nickname::*;

#[test]
fn accepts_alnum_and_underscore() {
    assert!(is_valid("ab_12"));
    assert!(is_valid("abc"));
    assert!(is_valid("ABCDEFGHIJ_9"));
}

#[test]
fn rejects_bad_lengths_and_characters() {
    assert!(!is_valid("ab"));
    assert!(!is_valid("thirteenchars!"));
    assert!(!is_valid("thirteenchars"));
    assert!(!is_valid("has space"));
    assert!(!is_valid("dash-ed"));
    assert!(!is_valid("ünï"));
    assert!(!is_valid(""));
}

#[test]
fn buffer_caps_at_twelve_characters() {
    let mut buf = NicknameBuffer::new();
    for c in "abcdefghijklmnop".chars() {
        buf.push(c);
    }
    assert_eq!(buf.as_str(), "abcdefghijkl");
}

#[test]
fn confirm_is_a_no_op_while_invalid() {
    let mut buf = NicknameBuffer::new();
    buf.push('a');
    buf.push('b');
    assert_eq!(buf.confirm(), None);
    buf.push('!');
    assert_eq!(buf.confirm(), None);
    assert_eq!(buf.as_str(), "ab!");
    buf.backspace();
    buf.push('c');
    assert_eq!(buf.confirm(), Some("abc".to_string()));
}

#[test]
fn control_characters_are_ignored() {
    let mut buf = NicknameBuffer::new();
    buf.push('\t');
    buf.push('\u{7}');
    assert_eq!(buf.as_str(), "");
}

#[test]
fn backspace_on_empty_buffer_is_harmless() {
    let mut buf = NicknameBuffer::new();
    buf.backspace();
    assert_eq!(buf.as_str(), "");
}
