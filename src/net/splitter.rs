//! 无源分光器
//!
//! 分光比写作 `"1:N"`，分光损耗为 `10·log10(N)` dB；无法解析时取 15 dB。

use super::id::{OltId, OnuId};
use tracing::warn;

/// 分光比无法解析时使用的分光损耗（dB）
pub const FALLBACK_SPLIT_LOSS_DB: f64 = 15.0;

/// 无源 1:N 分光器
#[derive(Debug, Clone, PartialEq)]
pub struct Splitter {
    pub id: String,
    pub name: String,
    ratio: String,
    split_loss_db: f64,
    pub(crate) olt: Option<OltId>,
    pub(crate) onus: Vec<OnuId>,
}

/// 解析 `"1:N"` 形式的分光比，返回 N。
///
/// 缺少 `:`、N 不是整数或 N 为 0 时返回 None。
pub fn parse_fan_out(ratio: &str) -> Option<u32> {
    let (_, n) = ratio.split_once(':')?;
    match n.trim().parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(n),
    }
}

/// 由分光比计算分光损耗
pub fn split_loss_for(ratio: &str) -> f64 {
    match parse_fan_out(ratio) {
        Some(n) => 10.0 * f64::from(n).log10(),
        None => {
            warn!(ratio, fallback_db = FALLBACK_SPLIT_LOSS_DB, "⚠️  无法解析分光比，使用默认损耗");
            FALLBACK_SPLIT_LOSS_DB
        }
    }
}

impl Splitter {
    pub fn new(id: impl Into<String>, name: impl Into<String>, ratio: impl Into<String>) -> Self {
        let ratio = ratio.into();
        let split_loss_db = split_loss_for(&ratio);
        Self {
            id: id.into(),
            name: name.into(),
            ratio,
            split_loss_db,
            olt: None,
            onus: Vec::new(),
        }
    }

    pub fn ratio(&self) -> &str {
        &self.ratio
    }

    pub fn fan_out(&self) -> Option<u32> {
        parse_fan_out(&self.ratio)
    }

    pub fn split_loss(&self) -> f64 {
        self.split_loss_db
    }

    /// 上游 OLT（若已连接）
    pub fn olt(&self) -> Option<OltId> {
        self.olt
    }

    /// 下游 ONU，保持插入顺序
    pub fn onus(&self) -> &[OnuId] {
        &self.onus
    }

    /// 挂接 ONU；重复挂接同一 ONU 不做任何事
    pub(crate) fn attach_onu(&mut self, onu: OnuId) -> bool {
        if self.onus.contains(&onu) {
            return false;
        }
        self.onus.push(onu);
        true
    }
}
