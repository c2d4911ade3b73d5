//! 动态带宽分配（DBA）
//!
//! 两种策略：按标识升序依次授予（IPACT 近似）与均分（fair share）。
//! 均为纯函数，不保存任何状态。

mod allocation;

pub use allocation::{
    Allocation, AllocationResult, DynamicBandwidthAllocation, FairAllocationResult, Requests,
    allocate, fair_allocate, requests_from_network,
};
