//! Response formatter: pure mapping from domain results to the Korean
//! strings shown in chat and read out by TTS. No I/O, no state.

use crate::models::{OrderStyle, PendingConfirmation, TradeAction, QTY_ALL};
use crate::services::kis::{AccountBalance, Holding, PriceQuote};

/// A bot reply plus whether it should also be spoken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub message: String,
    pub speak: bool,
}

impl Reply {
    pub fn spoken(message: impl Into<String>) -> Self {
        Reply {
            message: message.into(),
            speak: true,
        }
    }

    pub fn silent(message: impl Into<String>) -> Self {
        Reply {
            message: message.into(),
            speak: false,
        }
    }
}

/// Thousands grouping, e.g. 1234567 → "1,234,567".
pub fn comma(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Grouped with an explicit sign, e.g. "+1,500" / "-300" / "+0".
pub fn signed_comma(n: i64) -> String {
    if n < 0 {
        comma(n)
    } else {
        format!("+{}", comma(n))
    }
}

pub fn price_reply(quote: &PriceQuote) -> Reply {
    Reply::spoken(format!(
        "{} 현재가\n현재가: {}원\n전일대비: {}원 ({:+.2}%)\n거래량: {}주",
        quote.name,
        comma(quote.price),
        signed_comma(quote.change),
        quote.change_rate,
        comma(quote.volume),
    ))
}

pub fn balance_reply(balance: &AccountBalance) -> Reply {
    Reply::spoken(format!(
        "계좌 정보\n예수금: {}원\n총 평가액: {}원\n평가 손익: {}원 ({:+.2}%)",
        comma(balance.deposit),
        comma(balance.total_value),
        signed_comma(balance.profit_loss),
        balance.profit_rate,
    ))
}

pub fn holdings_reply(holdings: &[Holding]) -> Reply {
    if holdings.is_empty() {
        return Reply::spoken("보유 중인 종목이 없습니다.");
    }

    let mut msg = format!("보유 종목 ({}개)\n\n", holdings.len());
    for (i, h) in holdings.iter().enumerate() {
        msg.push_str(&format!(
            "{}. {}\n   {}주 | {}원\n   손익: {}원 ({:+.2}%)\n\n",
            i + 1,
            h.name,
            comma(h.quantity),
            comma(h.current_price),
            signed_comma(h.profit_loss),
            h.profit_rate,
        ));
    }
    Reply::spoken(msg.trim_end().to_string())
}

pub fn clarify_price_instrument() -> Reply {
    Reply::spoken("어떤 종목의 현재가를 알려드릴까요?")
}

pub fn clarify_trade_instrument() -> Reply {
    Reply::spoken("어떤 종목을 거래하시겠어요?")
}

pub fn clarify_quantity(name: &str, action: TradeAction) -> Reply {
    Reply::spoken(format!("{} 몇 주를 {}하시겠어요?", name, action.korean()))
}

/// Confirmation card. The estimate is omitted for entire-position
/// sells and when the quote lookup failed.
pub fn confirm_prompt(confirmation: &PendingConfirmation, estimated_cost: Option<i64>) -> Reply {
    let quantity_text = if confirmation.quantity == QTY_ALL {
        "전량".to_string()
    } else {
        format!("{}주", comma(confirmation.quantity))
    };

    let style_text = match confirmation.style {
        OrderStyle::Limit => format!("지정가 {}원", comma(confirmation.limit_price)),
        OrderStyle::Market => "시장가".to_string(),
    };

    let mut msg = format!(
        "주문 확인\n\n종목: {}\n수량: {}\n방식: {}",
        confirmation.name, quantity_text, style_text,
    );
    if let Some(cost) = estimated_cost.filter(|c| *c > 0) {
        msg.push_str(&format!("\n예상금액: {}원", comma(cost)));
    }
    msg.push_str(&format!(
        "\n\n정말 {}하시겠어요?",
        confirmation.action.korean()
    ));

    Reply::spoken(msg)
}

pub fn order_success(action: TradeAction, order_no: &str) -> Reply {
    Reply::spoken(format!(
        "{} 주문 성공 (주문번호: {})",
        action.korean(),
        order_no
    ))
}

pub fn help_reply() -> Reply {
    Reply::spoken(
        "무엇을 도와드릴까요?\n\n사용 가능한 명령어:\n- \"삼성전자 현재가?\"\n- \"네이버 10주 사줘\"\n- \"카카오 전부 팔아\"\n- \"내 잔고 확인\"\n- \"보유 종목 보여줘\"\n\n음성 또는 키보드로 입력하세요.",
    )
}
