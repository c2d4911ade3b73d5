//! 光纤段
//!
//! 有向边：线性衰减 + 每 2 km 一个熔接点的熔接损耗。

use super::id::ElementRef;
use crate::error::{Result, ensure_non_negative};

/// 默认衰减系数（dB/km）
pub const DEFAULT_ATTENUATION_DB_PER_KM: f64 = 0.2;
/// 默认色散系数（ps/(nm·km)），仅作展示
pub const DEFAULT_DISPERSION: f64 = 17.0;
/// 单个熔接点损耗（dB）
pub const SPLICE_LOSS_DB: f64 = 0.1;
/// 熔接间隔（km）
pub const SPLICE_INTERVAL_KM: f64 = 2.0;

/// 光纤段
#[derive(Debug, Clone, PartialEq)]
pub struct Fiber {
    pub id: String,
    pub name: String,
    pub length_km: f64,
    pub attenuation_db_per_km: f64,
    pub dispersion: f64,
    pub from: ElementRef,
    pub to: ElementRef,
}

impl Fiber {
    /// 创建使用默认衰减/色散的光纤段
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        length_km: f64,
        from: ElementRef,
        to: ElementRef,
    ) -> Result<Self> {
        Self::with_attenuation(id, name, length_km, DEFAULT_ATTENUATION_DB_PER_KM, from, to)
    }

    pub fn with_attenuation(
        id: impl Into<String>,
        name: impl Into<String>,
        length_km: f64,
        attenuation_db_per_km: f64,
        from: ElementRef,
        to: ElementRef,
    ) -> Result<Self> {
        Ok(Self {
            id: id.into(),
            name: name.into(),
            length_km: ensure_non_negative("length_km", length_km)?,
            attenuation_db_per_km: ensure_non_negative("attenuation", attenuation_db_per_km)?,
            dispersion: DEFAULT_DISPERSION,
            from,
            to,
        })
    }

    /// 光纤衰减 = 长度 × 衰减系数
    pub fn loss(&self) -> f64 {
        self.length_km * self.attenuation_db_per_km
    }

    /// 熔接损耗 = 0.1 × (floor(L / 2) + 1)
    pub fn splice_loss(&self) -> f64 {
        splice_loss_for(self.length_km)
    }

    pub fn total_loss(&self) -> f64 {
        self.loss() + self.splice_loss()
    }
}

pub fn splice_loss_for(length_km: f64) -> f64 {
    SPLICE_LOSS_DB * ((length_km / SPLICE_INTERVAL_KM).floor() + 1.0)
}
