//! 用户流量仿真
//!
//! 每个 ONU 一个流量发生"进程"，全部挂在同一个虚拟时钟（`sim::Simulator`）上：
//! 进程等待下一个包间隔、记录一个包、再调度下一次唤醒，直到仿真时长结束。

mod generator;
mod pattern;
mod profile;
mod simulator;

pub use generator::{EmitPacket, TrafficGenerator, TrafficWorld};
pub use pattern::{
    BURST_GAP_PROBABILITY, BURST_GAP_SECS, BURST_LARGE_PROBABILITY, MTU_BYTES,
    POISSON_MEAN_PACKET_BYTES, TrafficPattern, mean_interval_secs,
};
pub use profile::{ServiceClass, TrafficProfile, triple_play_profiles};
pub use simulator::{
    MetricRecord, MetricType, SimOpts, SimulationResult, TrafficSimulator, run_traffic_simulation,
};
