//! 功率预算计算
//!
//! 可用功率 = (发射功率 - 接收灵敏度) - 总损耗 - 3 dB 安全余量，非负即有效。

use serde::{Deserialize, Serialize};

use super::path::find_path;
use crate::net::{ElementRef, Fiber, FiberId, Network, OnuId};
use tracing::debug;

/// 安全余量（dB）
pub const SAFETY_MARGIN_DB: f64 = 3.0;

/// 计入损耗的光纤段选择方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStrategy {
    /// 沿真实光纤邻接从 OLT 走到 ONU，路径上每段光纤、每个分光器都计入
    #[default]
    Walk,
    /// 只取“终点是该 ONU”的光纤和“OLT 直连所属分光器”的光纤；
    /// 只计所属分光器的损耗。多级拓扑中的中间段不会被计入。
    Direct,
}

/// 单段光纤的损耗明细
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiberLoss {
    pub fiber_id: String,
    pub from: String,
    pub to: String,
    pub length: f64,
    pub attenuation: f64,
    pub fiber_loss: f64,
    pub splice_loss: f64,
}

/// 功率预算结果（含完整明细，供展示）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerBudgetResult {
    pub power_budget: f64,
    pub tx_power: f64,
    pub rx_sensitivity: f64,
    pub splitter_loss: f64,
    pub split_ratio: String,
    pub fiber_losses: Vec<FiberLoss>,
    pub total_fiber_loss: f64,
    pub total_splice_loss: f64,
    pub total_loss: f64,
    pub margin: f64,
    pub available_power: f64,
    pub is_valid: bool,
}

/// 带 ONU 标识的结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnuPowerBudget {
    pub onu_id: String,
    #[serde(flatten)]
    pub result: PowerBudgetResult,
}

#[derive(Debug, Clone, Copy)]
pub struct PowerBudgetEvaluator {
    pub strategy: PathStrategy,
    pub margin_db: f64,
}

impl Default for PowerBudgetEvaluator {
    fn default() -> Self {
        Self {
            strategy: PathStrategy::default(),
            margin_db: SAFETY_MARGIN_DB,
        }
    }
}

impl PowerBudgetEvaluator {
    pub fn new(strategy: PathStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// 计算某个 ONU 的功率预算。
    ///
    /// 网络没有 OLT、ONU 没有所属分光器（Walk 模式下还包括不可达）时返回 None。
    pub fn evaluate(&self, net: &Network, onu: OnuId) -> Option<PowerBudgetResult> {
        let olt = net.olt()?;
        let owner = net.onu(onu).splitter()?;
        let owner_splitter = net.splitter(owner);

        let (fibers, splitter_loss): (Vec<FiberId>, f64) = match self.strategy {
            PathStrategy::Walk => {
                let path = find_path(net, onu)?;
                let loss = path
                    .splitters
                    .iter()
                    .map(|&s| net.splitter(s).split_loss())
                    .sum();
                (path.fibers, loss)
            }
            PathStrategy::Direct => {
                let olt_ref = net.olt_id().map(ElementRef::Olt);
                let fibers = (0..net.fibers().len())
                    .map(FiberId)
                    .filter(|&f| {
                        let fiber = net.fiber(f);
                        fiber.to == ElementRef::Onu(onu)
                            || (Some(fiber.from) == olt_ref
                                && fiber.to == ElementRef::Splitter(owner))
                    })
                    .collect();
                (fibers, owner_splitter.split_loss())
            }
        };

        let fiber_losses: Vec<FiberLoss> = fibers
            .iter()
            .map(|&f| fiber_loss_detail(net, net.fiber(f)))
            .collect();
        let total_fiber_loss: f64 = fiber_losses.iter().map(|l| l.fiber_loss).sum();
        let total_splice_loss: f64 = fiber_losses.iter().map(|l| l.splice_loss).sum();
        let total_loss = splitter_loss + total_fiber_loss + total_splice_loss;

        let power_budget = olt.power_budget();
        let available_power = power_budget - total_loss - self.margin_db;

        debug!(
            onu = %net.onu(onu).id,
            strategy = ?self.strategy,
            segments = fiber_losses.len(),
            total_loss,
            available_power,
            "计算功率预算"
        );

        Some(PowerBudgetResult {
            power_budget,
            tx_power: olt.tx_power_dbm,
            rx_sensitivity: olt.rx_sensitivity_dbm,
            splitter_loss,
            split_ratio: owner_splitter.ratio().to_string(),
            fiber_losses,
            total_fiber_loss,
            total_splice_loss,
            total_loss,
            margin: self.margin_db,
            available_power,
            is_valid: available_power >= 0.0,
        })
    }

    /// 计算所有 ONU 的功率预算，跳过无结果的 ONU
    pub fn evaluate_all(&self, net: &Network) -> Vec<OnuPowerBudget> {
        net.onu_ids()
            .filter_map(|onu| {
                self.evaluate(net, onu).map(|result| OnuPowerBudget {
                    onu_id: net.onu(onu).id.clone(),
                    result,
                })
            })
            .collect()
    }
}

fn fiber_loss_detail(net: &Network, fiber: &Fiber) -> FiberLoss {
    FiberLoss {
        fiber_id: fiber.id.clone(),
        from: net.label_of(fiber.from).to_string(),
        to: net.label_of(fiber.to).to_string(),
        length: fiber.length_km,
        attenuation: fiber.attenuation_db_per_km,
        fiber_loss: fiber.loss(),
        splice_loss: fiber.splice_loss(),
    }
}

/// 使用默认设置（Walk + 3 dB 余量）计算功率预算
pub fn evaluate_power_budget(net: &Network, onu: OnuId) -> Option<PowerBudgetResult> {
    PowerBudgetEvaluator::default().evaluate(net, onu)
}
