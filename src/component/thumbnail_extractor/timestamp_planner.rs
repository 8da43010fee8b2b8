use std::time::Duration;

/// 產生截圖時間點（秒）：`interval, 2*interval, …, count*interval`
///
/// `count = floor(duration / interval)`；影片短於一個間隔時回傳空列表。
#[must_use]
pub fn plan_timestamps(duration: Duration, interval: u32) -> Vec<u32> {
    if interval == 0 {
        return Vec::new();
    }

    let count = duration.as_secs() / u64::from(interval);

    (1..=count)
        .map_while(|i| u32::try_from(i * u64::from(interval)).ok())
        .collect()
}

/// 將時間點依序切成每批最多 `limit` 個，最後一批存放剩餘部分
#[must_use]
pub fn into_batches(timestamps: &[u32], limit: usize) -> Vec<&[u32]> {
    timestamps.chunks(limit.max(1)).collect()
}
