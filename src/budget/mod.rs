//! 光功率预算
//!
//! 从 OLT 沿光纤走到某个 ONU，累加分光损耗、光纤衰减与熔接损耗。

mod path;
mod power_budget;

pub use path::{OpticalPath, find_path};
pub use power_budget::{
    FiberLoss, OnuPowerBudget, PathStrategy, PowerBudgetEvaluator, PowerBudgetResult,
    SAFETY_MARGIN_DB, evaluate_power_budget,
};
