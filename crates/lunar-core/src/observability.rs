use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// DeliveryCounts は配送キューの topic ごとのカウンタ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryCounts {
    pub queued: usize,
    pub in_flight: usize,
    pub acked: u64,
}

/// プロセスの tracing を初期化する
///
/// フィルタは `RUST_LOG`（既定 `info`）。2 回目以降の呼び出しは何もしない。
pub fn init(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
