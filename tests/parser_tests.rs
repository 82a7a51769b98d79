use stocktalk::models::{Intent, OrderStyle, QueryKind, TradeAction, QTY_ALL};
use stocktalk::parser;

#[test]
fn spoken_numbers_match_reference_table() {
    let cases = [
        ("일", 1),
        ("십", 10),
        ("십오", 15),
        ("이십일", 21),
        ("육십", 60),
        ("육십오", 65),
        ("삼백", 300),
        ("이천삼백", 2300),
        ("이천삼백십이", 2312),
        ("만", 10000),
    ];
    for (text, expected) in cases {
        assert_eq!(parser::parse_spoken_number(text), expected, "input: {text}");
    }
}

#[test]
fn spoken_number_passes_ascii_digits_through() {
    assert_eq!(parser::parse_spoken_number("15"), 15);
    assert_eq!(parser::parse_spoken_number(" 230 "), 230);
}

#[test]
fn detect_trade_action_buy_checked_before_sell() {
    assert_eq!(
        parser::detect_trade_action("삼성전자 10주 사줘"),
        Some(TradeAction::Buy)
    );
    assert_eq!(
        parser::detect_trade_action("네이버 팔아줘"),
        Some(TradeAction::Sell)
    );
    // 사 and 팔 both present: buy keywords are scanned first.
    assert_eq!(
        parser::detect_trade_action("사고 팔아"),
        Some(TradeAction::Buy)
    );
    assert_eq!(parser::detect_trade_action("현재가 알려줘"), None);
}

#[test]
fn detect_query_kind_price_wins_over_balance() {
    assert_eq!(
        parser::detect_query_kind("카카오 현재가 알려줘"),
        Some(QueryKind::Price)
    );
    assert_eq!(
        parser::detect_query_kind("내 잔고 확인"),
        Some(QueryKind::Balance)
    );
    assert_eq!(
        parser::detect_query_kind("보유 종목 보여줘"),
        Some(QueryKind::Holdings)
    );
    // Both a price word and a balance word: price keywords scan first.
    assert_eq!(
        parser::detect_query_kind("잔고 시세 알려줘"),
        Some(QueryKind::Price)
    );
}

#[test]
fn extract_quantity_digits_then_spoken_then_entirety() {
    assert_eq!(parser::extract_quantity("10주 사줘"), Some(10));
    assert_eq!(parser::extract_quantity("육주 팔아"), Some(6));
    assert_eq!(parser::extract_quantity("육십오주 매수"), Some(65));
    assert_eq!(parser::extract_quantity("전부 매도"), Some(QTY_ALL));
    assert_eq!(parser::extract_quantity("매수해줘"), None);
}

#[test]
fn extract_quantity_digit_count_beats_entirety_keyword() {
    // Rule (a) applies before rule (c).
    assert_eq!(parser::extract_quantity("10주 전부 팔아"), Some(10));
}

#[test]
fn extract_quantity_rejects_zero_share_count() {
    // A zero share count is not a quantity; the utterance must end up
    // as a clarification turn, never a zero-share order.
    assert_eq!(parser::extract_quantity("삼성전자 0주 사줘"), None);

    let intent = parser::parse("삼성전자 0주 사줘");
    match intent {
        Intent::Trade { quantity, .. } => assert_eq!(quantity, None),
        other => panic!("expected trade intent, got {other:?}"),
    }
}

#[test]
fn extract_quantity_zero_digits_fall_through_to_entirety() {
    assert_eq!(parser::extract_quantity("0주 전부 팔아"), Some(QTY_ALL));
}

#[test]
fn extract_order_style_precedence() {
    assert_eq!(
        parser::extract_order_style("SK하이닉스 시장가로 15주 구매"),
        (OrderStyle::Market, 0)
    );
    assert_eq!(
        parser::extract_order_style("지정가 85000원 매수"),
        (OrderStyle::Limit, 85000)
    );
    // A bare amount of 4+ digits followed by 원 is a limit order.
    assert_eq!(
        parser::extract_order_style("75000원에 사줘"),
        (OrderStyle::Limit, 75000)
    );
    // Fewer than 4 digits never sets a limit price.
    assert_eq!(
        parser::extract_order_style("500원에 사줘"),
        (OrderStyle::Market, 0)
    );
    assert_eq!(parser::extract_order_style("사줘"), (OrderStyle::Market, 0));
}

#[test]
fn parse_price_query_resolves_instrument() {
    match parser::parse("네이버 현재가?") {
        Intent::Query {
            kind: QueryKind::Price,
            instrument: Some(inst),
            ..
        } => {
            assert_eq!(inst.name, "네이버");
            assert_eq!(inst.code, "035420");
        }
        other => panic!("unexpected intent: {other:?}"),
    }
}

#[test]
fn parse_balance_query_has_no_instrument() {
    match parser::parse("내 잔고 확인") {
        Intent::Query {
            kind: QueryKind::Balance,
            instrument: None,
            ..
        } => {}
        other => panic!("unexpected intent: {other:?}"),
    }
}

#[test]
fn parse_full_limit_buy() {
    match parser::parse("카카오 20주 지정가 85000원 매수") {
        Intent::Trade {
            action: TradeAction::Buy,
            instrument: Some(inst),
            quantity: Some(20),
            style: OrderStyle::Limit,
            limit_price: 85000,
            ..
        } => {
            assert_eq!(inst.name, "카카오");
            assert_eq!(inst.code, "035720");
        }
        other => panic!("unexpected intent: {other:?}"),
    }
}

#[test]
fn parse_sell_all_market() {
    match parser::parse("카카오 전부 팔아") {
        Intent::Trade {
            action: TradeAction::Sell,
            instrument: Some(inst),
            quantity: Some(QTY_ALL),
            style: OrderStyle::Market,
            limit_price: 0,
            ..
        } => assert_eq!(inst.code, "035720"),
        other => panic!("unexpected intent: {other:?}"),
    }
}

#[test]
fn parse_trade_without_quantity_or_instrument() {
    match parser::parse("삼성전자 사줘") {
        Intent::Trade {
            instrument: Some(inst),
            quantity: None,
            ..
        } => assert_eq!(inst.code, "005930"),
        other => panic!("unexpected intent: {other:?}"),
    }

    match parser::parse("10주 매수해줘") {
        Intent::Trade {
            instrument: None,
            quantity: Some(10),
            ..
        } => {}
        other => panic!("unexpected intent: {other:?}"),
    }
}

#[test]
fn query_detection_strictly_precedes_trade_detection() {
    // Contains both a balance word (계좌) and a buy word (사줘).
    match parser::parse("계좌 확인하고 사줘") {
        Intent::Query {
            kind: QueryKind::Balance,
            ..
        } => {}
        other => panic!("unexpected intent: {other:?}"),
    }
}

#[test]
fn parse_is_total_on_unrecognized_input() {
    match parser::parse("안녕") {
        Intent::Unknown { raw } => assert_eq!(raw, "안녕"),
        other => panic!("unexpected intent: {other:?}"),
    }
    // Whitespace is trimmed, not an error.
    assert!(matches!(parser::parse("   "), Intent::Unknown { .. }));
}
