use super::{EPS, approx_eq};
use crate::Error;
use crate::traffic::{
    BURST_GAP_SECS, MTU_BYTES, MetricType, ServiceClass, SimOpts, TrafficPattern, TrafficProfile,
    TrafficSimulator, mean_interval_secs, run_traffic_simulation, triple_play_profiles,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn constant_profiles(n: usize, rate: f64) -> Vec<TrafficProfile> {
    (0..n)
        .map(|i| TrafficProfile::new(format!("ONU-{}", i + 1), rate, TrafficPattern::Constant))
        .collect()
}

#[test]
fn constant_pattern_sends_fixed_mtu_at_fixed_interval() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(TrafficPattern::Constant.packet_size(&mut rng), MTU_BYTES);
    let dt = TrafficPattern::Constant.interval_secs(10.0, &mut rng);
    assert!(approx_eq(dt, 0.0012, EPS));
    assert!(approx_eq(mean_interval_secs(1500, 10.0), 0.0012, EPS));
}

#[test]
fn bursty_and_poisson_sizes_follow_their_distributions() {
    let mut rng = StdRng::seed_from_u64(7);

    let mut large = 0;
    for _ in 0..5_000 {
        let size = TrafficPattern::Bursty.packet_size(&mut rng);
        if (1400..=1500).contains(&size) {
            large += 1;
        } else {
            assert!((64..=512).contains(&size), "unexpected bursty size {size}");
        }
    }
    // 期望 30% 大包
    assert!((1_200..=1_800).contains(&large), "large packets: {large}");

    let n = 20_000;
    let total: u64 = (0..n)
        .map(|_| u64::from(TrafficPattern::Poisson.packet_size(&mut rng)))
        .sum();
    let mean = total as f64 / n as f64;
    assert!((900.0..1100.0).contains(&mean), "poisson mean size {mean}");
}

#[test]
fn bursty_intervals_include_short_bursts() {
    let mut rng = StdRng::seed_from_u64(11);
    let bursts = (0..2_000)
        .map(|_| TrafficPattern::Bursty.interval_secs(10.0, &mut rng))
        .filter(|&dt| dt == BURST_GAP_SECS)
        .count();
    assert!((250..=550).contains(&bursts), "bursts: {bursts}");
}

#[test]
fn pattern_and_class_names_parse() {
    assert_eq!("Poisson".parse::<TrafficPattern>(), Ok(TrafficPattern::Poisson));
    assert_eq!(
        "wave".parse::<TrafficPattern>(),
        Err(Error::UnknownPattern("wave".into()))
    );
    assert_eq!("voice".parse::<ServiceClass>(), Ok(ServiceClass::Voice));
    assert!("fax".parse::<ServiceClass>().is_err());
    let json = serde_json::to_string(&TrafficPattern::Bursty).expect("serialize");
    assert_eq!(json, "\"bursty\"");
}

#[test]
fn triple_play_profiles_stay_within_class_ranges() {
    let mut rng = StdRng::seed_from_u64(3);
    let profiles = triple_play_profiles(200, &mut rng);
    assert_eq!(profiles.len(), 200);
    assert_eq!(profiles[0].subscriber_id, "ONU-1");
    assert_eq!(profiles[199].subscriber_id, "ONU-200");

    let class_of = |p: &TrafficProfile| {
        ServiceClass::ALL
            .into_iter()
            .find(|c| c.pattern() == p.pattern && c.rate_range().contains(&p.rate))
    };
    for p in &profiles {
        assert!(class_of(p).is_some(), "profile outside every class: {p:?}");
    }
    assert!(profiles.iter().any(|p| p.pattern == TrafficPattern::Poisson));
    assert!(profiles.iter().any(|p| p.rate < 1.0));
    assert!(profiles.iter().any(|p| p.rate >= 15.0));
}

#[test]
fn constant_rate_run_counts_every_interval_before_horizon() {
    let sim = TrafficSimulator::with_seed(3, 1.0, 42).expect("simulator");
    let result = sim.run(Some(constant_profiles(3, 10.0))).expect("run");

    // 间隔 1.2 ms，k·1.2 ms < 1 s 的 k 共 833 个
    for i in 1..=3 {
        let id = format!("ONU-{i}");
        assert_eq!(result.packets_of(&id), Some(833));
        let tp = result.throughput_of(&id).expect("throughput");
        assert!(approx_eq(tp, 833.0 * 1500.0 * 8.0 / 1e6, 1e-9));
        assert!(tp <= 10.0);
    }
    assert_eq!(result.total_packets, 3 * 833);
    assert!(approx_eq(result.average_throughput, result.total_throughput / 3.0, EPS));
    assert_eq!(result.metrics.len(), 6);
    assert!(result.metrics.iter().all(|m| m.timestamp == 1.0 && m.value >= 0.0));
}

#[test]
fn throughput_stays_near_configured_rate() {
    for rate in [0.064, 1.0, 25.0] {
        let result = run_traffic_simulation(4, 2.0, Some(constant_profiles(4, rate)), Some(5))
            .expect("run");
        for m in result.metrics.iter().filter(|m| m.metric_type == MetricType::Throughput) {
            assert!(m.value <= rate * 1.0001, "{} > {rate}", m.value);
            assert!(m.value >= 0.0);
        }
    }
}

#[test]
fn same_seed_reproduces_default_workload() {
    let opts = SimOpts {
        subscribers: 6,
        horizon_secs: 0.5,
        seed: Some(2024),
    };
    let a = TrafficSimulator::from_opts(&opts).expect("sim").run(None).expect("run a");
    let b = TrafficSimulator::from_opts(&opts).expect("sim").run(None).expect("run b");
    assert_eq!(a, b);
    assert_eq!(a.metrics.len(), 12);
    assert!(a.total_packets > 0);
    assert!(a.throughput_of("ONU-6").is_some());
}

#[test]
fn zero_rate_sends_nothing() {
    let profiles = vec![TrafficProfile::new("ONU-1", 0.0, TrafficPattern::Poisson)];
    let result = run_traffic_simulation(1, 1.0, Some(profiles), Some(1)).expect("run");
    assert_eq!(result.total_packets, 0);
    assert_eq!(result.total_throughput, 0.0);
}

#[test]
fn empty_workload_has_zero_average() {
    let result = run_traffic_simulation(0, 1.0, None, Some(1)).expect("run");
    assert!(result.metrics.is_empty());
    assert_eq!(result.average_throughput, 0.0);
}

#[test]
fn invalid_horizon_and_rate_are_rejected() {
    for horizon in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            TrafficSimulator::with_seed(1, horizon, 1),
            Err(Error::InvalidArgument { name: "horizon", .. })
        ));
    }
    let profiles = vec![TrafficProfile::new("ONU-1", -1.0, TrafficPattern::Constant)];
    assert!(matches!(
        run_traffic_simulation(1, 1.0, Some(profiles), Some(1)),
        Err(Error::InvalidArgument { name: "rate", .. })
    ));
}

#[test]
fn measured_throughput_becomes_dba_requests() {
    let result = run_traffic_simulation(2, 1.0, Some(constant_profiles(2, 10.0)), Some(9))
        .expect("run");
    let requests = result.bandwidth_requests();
    assert_eq!(requests.len(), 2);
    let tp = result.throughput_of("ONU-1").expect("throughput");
    assert!(approx_eq(requests["ONU-1"], tp * 1.2, EPS));
}
