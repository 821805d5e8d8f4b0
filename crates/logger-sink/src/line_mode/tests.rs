use super::LineMode;

#[test]
fn default_terminates_lines() {
    assert_eq!(LineMode::default(), LineMode::WithNewline);
}

#[test]
fn bool_conversions_agree_with_append_newline() {
    for mode in [LineMode::WithNewline, LineMode::WithoutNewline] {
        let flag: bool = mode.into();
        assert_eq!(flag, mode.append_newline());
        assert_eq!(LineMode::from(flag), mode);
    }
}
