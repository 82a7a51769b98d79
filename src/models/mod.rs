pub mod chat;
pub mod instrument;
pub mod intent;
pub mod order;

pub use chat::{ChatLogEntry, Sender};
pub use instrument::Instrument;
pub use intent::{Intent, OrderStyle, QueryKind, TradeAction, QTY_ALL};
pub use order::{Order, OrderStatus, PendingConfirmation};
