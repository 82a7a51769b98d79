use stocktalk::format;
use stocktalk::models::{OrderStyle, PendingConfirmation, TradeAction, QTY_ALL};
use stocktalk::services::kis::PriceQuote;

#[test]
fn comma_groups_thousands() {
    assert_eq!(format::comma(0), "0");
    assert_eq!(format::comma(999), "999");
    assert_eq!(format::comma(72500), "72,500");
    assert_eq!(format::comma(1234567), "1,234,567");
    assert_eq!(format::comma(-1234567), "-1,234,567");
}

#[test]
fn signed_comma_always_carries_a_sign() {
    assert_eq!(format::signed_comma(1500), "+1,500");
    assert_eq!(format::signed_comma(-300), "-300");
    assert_eq!(format::signed_comma(0), "+0");
}

#[test]
fn price_reply_is_spoken() {
    let reply = format::price_reply(&PriceQuote {
        name: "삼성전자".to_string(),
        price: 72500,
        change: 1500,
        change_rate: 2.11,
        volume: 13250000,
    });
    assert!(reply.speak);
    assert!(reply.message.contains("삼성전자 현재가"));
    assert!(reply.message.contains("현재가: 72,500원"));
    assert!(reply.message.contains("전일대비: +1,500원 (+2.11%)"));
    assert!(reply.message.contains("거래량: 13,250,000주"));
}

#[test]
fn empty_holdings_have_their_own_message() {
    let reply = format::holdings_reply(&[]);
    assert_eq!(reply.message, "보유 중인 종목이 없습니다.");
}

#[test]
fn confirm_prompt_includes_estimate_when_available() {
    let confirmation = PendingConfirmation {
        name: "카카오".to_string(),
        code: "035720".to_string(),
        action: TradeAction::Buy,
        quantity: 20,
        style: OrderStyle::Limit,
        limit_price: 85000,
    };

    let reply = format::confirm_prompt(&confirmation, Some(1700000));
    assert!(reply.message.contains("종목: 카카오"));
    assert!(reply.message.contains("수량: 20주"));
    assert!(reply.message.contains("방식: 지정가"));
    assert!(reply.message.contains("예상금액: 1,700,000원"));
    assert!(reply.message.contains("정말 매수하시겠어요?"));
}

#[test]
fn confirm_prompt_for_sell_all_skips_estimate() {
    let confirmation = PendingConfirmation {
        name: "삼성전자".to_string(),
        code: "005930".to_string(),
        action: TradeAction::Sell,
        quantity: QTY_ALL,
        style: OrderStyle::Market,
        limit_price: 0,
    };

    let reply = format::confirm_prompt(&confirmation, None);
    assert!(reply.message.contains("수량: 전량"));
    assert!(!reply.message.contains("예상금액"));
    assert!(reply.message.contains("정말 매도하시겠어요?"));
}
