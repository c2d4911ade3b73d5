mod power_budget;
mod records;
mod simulator;
mod traffic;

/// 浮点比较容差
pub(crate) const EPS: f64 = 1e-9;

pub(crate) fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}
