use stocktalk::directory;

#[test]
fn exact_match_on_substring() {
    let inst = directory::resolve_exact("삼성전자 10주 사줘").expect("should resolve");
    assert_eq!(inst.name, "삼성전자");
    assert_eq!(inst.code, "005930");
}

#[test]
fn exact_match_ties_break_by_declaration_order() {
    // Both names occur; the earlier table entry wins.
    let inst = directory::resolve_exact("네이버랑 카카오 비교해줘").expect("should resolve");
    assert_eq!(inst.name, "네이버");
}

#[test]
fn aliases_share_one_code() {
    let a = directory::resolve("네이버 현재가").expect("should resolve");
    let b = directory::resolve("NAVER 현재가").expect("should resolve");
    assert_eq!(a.code, b.code);
    assert_ne!(a.name, b.name);
}

#[test]
fn fuzzy_match_corrects_typos() {
    // 삼송전자 is one edit away from 삼성전자 (similarity 0.75).
    let inst = directory::resolve_fuzzy("삼송전자 5주 매수").expect("should resolve");
    assert_eq!(inst.name, "삼성전자");

    let inst = directory::resolve("삼송전자 5주 매수").expect("should resolve");
    assert_eq!(inst.code, "005930");
}

#[test]
fn exact_match_is_never_overridden_by_fuzzy() {
    // A typo token appears before a verbatim name; exact still wins.
    let inst = directory::resolve("삼송전자 말고 네이버 사줘").expect("should resolve");
    assert_eq!(inst.name, "네이버");
}

#[test]
fn unrelated_text_resolves_to_nothing() {
    assert!(directory::resolve("오늘 날씨 어때").is_none());
    assert!(directory::resolve("").is_none());
}
