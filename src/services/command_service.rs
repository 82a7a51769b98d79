//! Command handler: turns a parsed `Intent` into a reply, walking a
//! trade through clarify → confirm → execute. Queries are a single
//! exchange; a fully-specified trade parks a `PendingConfirmation`
//! behind a single-use token and waits for the explicit execute call.

use crate::format;
use crate::models::{Intent, OrderStyle, PendingConfirmation, QueryKind, QTY_ALL, TradeAction};
use crate::services::chat_service;
use crate::services::kis::Holding;
use crate::AppState;

/// Outcome of one handled utterance. `confirmation` is set only on
/// the confirm turn: the token plus the payload echoed to the client.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    pub reply: format::Reply,
    pub confirmation: Option<(String, PendingConfirmation)>,
}

impl CommandOutcome {
    fn reply(reply: format::Reply) -> Self {
        CommandOutcome {
            reply,
            confirmation: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExecuteOutcome {
    pub success: bool,
    pub reply: format::Reply,
}

pub async fn handle(state: &AppState, intent: &Intent) -> CommandOutcome {
    match intent {
        Intent::Query { kind, instrument, .. } => match kind {
            QueryKind::Price => {
                let Some(inst) = instrument else {
                    return CommandOutcome::reply(format::clarify_price_instrument());
                };
                match state.kis.get_current_price(&inst.code).await {
                    Ok(quote) => CommandOutcome::reply(format::price_reply(&quote)),
                    Err(msg) => {
                        tracing::warn!("price lookup failed: {msg}");
                        CommandOutcome::reply(format::Reply::spoken(msg))
                    }
                }
            }
            QueryKind::Balance => match state.kis.get_balance().await {
                Ok(balance) => CommandOutcome::reply(format::balance_reply(&balance)),
                Err(msg) => {
                    tracing::warn!("balance lookup failed: {msg}");
                    CommandOutcome::reply(format::Reply::spoken(msg))
                }
            },
            QueryKind::Holdings => match state.kis.get_holdings().await {
                Ok(holdings) => CommandOutcome::reply(format::holdings_reply(&holdings)),
                Err(msg) => {
                    tracing::warn!("holdings lookup failed: {msg}");
                    CommandOutcome::reply(format::Reply::spoken(msg))
                }
            },
        },

        Intent::Trade {
            action,
            instrument,
            quantity,
            style,
            limit_price,
            ..
        } => {
            let Some(inst) = instrument else {
                return CommandOutcome::reply(format::clarify_trade_instrument());
            };
            let Some(quantity) = *quantity else {
                return CommandOutcome::reply(format::clarify_quantity(&inst.name, *action));
            };

            let confirmation = PendingConfirmation {
                name: inst.name.clone(),
                code: inst.code.clone(),
                action: *action,
                quantity,
                style: *style,
                limit_price: *limit_price,
            };

            // Estimate from the live quote; skipped for entire-position
            // sells and silently absent when the quote is unavailable.
            let estimated_cost = if quantity == QTY_ALL {
                None
            } else {
                state
                    .kis
                    .get_current_price(&inst.code)
                    .await
                    .ok()
                    .and_then(|q| estimate_cost(q.price, quantity))
            };

            let reply = format::confirm_prompt(&confirmation, estimated_cost);
            let token = state.pending.put(confirmation.clone());
            CommandOutcome {
                reply,
                confirmation: Some((token, confirmation)),
            }
        }

        Intent::Unknown { .. } => CommandOutcome::reply(format::help_reply()),
    }
}

/// Price times share count, dropped when the product would not fit in
/// i64. The confirmation card simply omits the estimate line then.
pub fn estimate_cost(price: i64, quantity: i64) -> Option<i64> {
    price.checked_mul(quantity)
}

/// Resolve the entire-position sentinel against a holdings snapshot.
/// Concrete quantities pass through untouched.
pub fn resolve_sell_quantity(quantity: i64, holdings: &[Holding], code: &str) -> Result<i64, String> {
    if quantity != QTY_ALL {
        return Ok(quantity);
    }
    holdings
        .iter()
        .find(|h| h.code == code)
        .map(|h| h.quantity)
        .ok_or_else(|| "해당 종목을 보유하고 있지 않습니다.".to_string())
}

/// The execute half of the confirm protocol. The token is consumed up
/// front, so a replay can never reach the broker twice. Broker
/// rejections are reported verbatim and never retried.
pub async fn execute(state: &AppState, user_id: i64, token: &str) -> ExecuteOutcome {
    let Some(confirmation) = state.pending.take(token) else {
        return ExecuteOutcome {
            success: false,
            reply: format::Reply::spoken(
                "확인이 만료되었거나 이미 처리된 주문입니다. 다시 말씀해주세요.",
            ),
        };
    };

    let is_market = confirmation.style == OrderStyle::Market;

    let quantity = match confirmation.action {
        TradeAction::Buy => confirmation.quantity,
        TradeAction::Sell => {
            if confirmation.quantity == QTY_ALL {
                let holdings = match state.kis.get_holdings().await {
                    Ok(h) => h,
                    Err(msg) => {
                        tracing::warn!("holdings lookup for sell-all failed: {msg}");
                        return ExecuteOutcome {
                            success: false,
                            reply: format::Reply::spoken("보유 종목 조회에 실패했습니다."),
                        };
                    }
                };
                match resolve_sell_quantity(confirmation.quantity, &holdings, &confirmation.code) {
                    Ok(q) => q,
                    Err(msg) => {
                        return ExecuteOutcome {
                            success: false,
                            reply: format::Reply::spoken(msg),
                        };
                    }
                }
            } else {
                confirmation.quantity
            }
        }
    };

    let placed = match confirmation.action {
        TradeAction::Buy => {
            state
                .kis
                .buy(&confirmation.code, quantity, confirmation.limit_price, is_market)
                .await
        }
        TradeAction::Sell => {
            state
                .kis
                .sell(&confirmation.code, quantity, confirmation.limit_price, is_market)
                .await
        }
    };

    match placed {
        Ok(ack) => {
            // Best-effort: a persistence hiccup must not fail the order
            // the broker already accepted.
            if let Err(e) =
                chat_service::save_order(state, user_id, &confirmation, quantity, &ack.order_no)
                    .await
            {
                tracing::warn!("order persistence failed: {e}");
            }
            ExecuteOutcome {
                success: true,
                reply: format::order_success(confirmation.action, &ack.order_no),
            }
        }
        Err(msg) => {
            tracing::warn!("order placement failed: {msg}");
            ExecuteOutcome {
                success: false,
                reply: format::Reply::spoken(msg),
            }
        }
    }
}
