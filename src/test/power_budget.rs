use super::{EPS, approx_eq};
use crate::budget::{PathStrategy, PowerBudgetEvaluator, SAFETY_MARGIN_DB, evaluate_power_budget};
use crate::net::{Network, Onu};
use crate::topo::build_topology;

#[test]
fn star_power_budget_breakdown() {
    let net = build_topology("star", 32, "1:32").expect("build star");
    let onu = net.onu_by_label("ONU-1").expect("ONU-1");
    let r = evaluate_power_budget(&net, onu).expect("has budget");

    assert_eq!(r.power_budget, 29.5);
    assert_eq!(r.tx_power, 2.5);
    assert_eq!(r.rx_sensitivity, -27.0);
    assert_eq!(r.split_ratio, "1:32");
    assert!(approx_eq(r.splitter_loss, 10.0 * 32f64.log10(), EPS));

    // 主干 2 km + 下行 3 km
    assert_eq!(r.fiber_losses.len(), 2);
    assert_eq!(r.fiber_losses[0].fiber_id, "FIBER-OLT-SPLIT");
    assert_eq!(r.fiber_losses[1].to, "ONU-1");
    assert!(approx_eq(r.total_fiber_loss, 1.0, EPS));
    assert!(approx_eq(r.total_splice_loss, 0.4, EPS));
    assert!(approx_eq(r.total_loss, r.splitter_loss + 1.4, EPS));
    assert_eq!(r.margin, SAFETY_MARGIN_DB);
    assert!(approx_eq(r.available_power, 29.5 - r.total_loss - 3.0, EPS));
    assert!(r.is_valid);
}

#[test]
fn walk_and_direct_agree_on_star() {
    let net = build_topology("star", 16, "1:16").expect("build star");
    let walk = PowerBudgetEvaluator::new(PathStrategy::Walk);
    let direct = PowerBudgetEvaluator::new(PathStrategy::Direct);
    for onu in net.onu_ids() {
        assert_eq!(walk.evaluate(&net, onu), direct.evaluate(&net, onu));
    }
}

#[test]
fn walk_sums_intermediate_hops_that_direct_skips() {
    let net = build_topology("tree", 10, "1:4").expect("build tree");
    let onu = net.onu_by_label("ONU-1").expect("ONU-1");

    let walk = PowerBudgetEvaluator::new(PathStrategy::Walk)
        .evaluate(&net, onu)
        .expect("walk budget");
    let direct = PowerBudgetEvaluator::new(PathStrategy::Direct)
        .evaluate(&net, onu)
        .expect("direct budget");

    let one_split = 10.0 * 4f64.log10();
    assert_eq!(walk.fiber_losses.len(), 3);
    assert!(approx_eq(walk.splitter_loss, 2.0 * one_split, EPS));
    assert_eq!(direct.fiber_losses.len(), 1);
    assert!(approx_eq(direct.splitter_loss, one_split, EPS));
    assert!(walk.total_loss > direct.total_loss);
    assert_eq!(walk.split_ratio, "1:4");
}

#[test]
fn long_bus_runs_out_of_budget() {
    let net = build_topology("bus", 10, "1:32").expect("build bus");
    let results = PowerBudgetEvaluator::default().evaluate_all(&net);
    assert_eq!(results.len(), 10);
    assert!(results[0].result.is_valid);
    assert!(!results[9].result.is_valid);
    // 越远的 ONU 损耗越大
    for pair in results.windows(2) {
        assert!(pair[1].result.total_loss > pair[0].result.total_loss);
    }
}

#[test]
fn absent_without_olt_or_owning_splitter() {
    let mut bare = Network::new("bare");
    let lonely = bare.add_onu(Onu::new("ONU-1", "ONU 1"));
    assert!(evaluate_power_budget(&bare, lonely).is_none());

    let mut net = build_topology("star", 2, "1:8").expect("build star");
    let detached = net.add_onu(Onu::new("ONU-X", "ONU X"));
    assert!(evaluate_power_budget(&net, detached).is_none());
    assert!(
        PowerBudgetEvaluator::new(PathStrategy::Direct)
            .evaluate(&net, detached)
            .is_none()
    );
    // evaluate_all 跳过无结果的 ONU
    assert_eq!(PowerBudgetEvaluator::default().evaluate_all(&net).len(), 2);
}

#[test]
fn serialized_result_flattens_onu_id() {
    let net = build_topology("star", 1, "1:8").expect("build star");
    let all = PowerBudgetEvaluator::default().evaluate_all(&net);
    let v = serde_json::to_value(&all[0]).expect("serialize");
    assert_eq!(v["onu_id"], "ONU-1");
    assert_eq!(v["split_ratio"], "1:8");
    assert_eq!(v["is_valid"], true);
    assert!(v["fiber_losses"].is_array());
}
