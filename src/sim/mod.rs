//! 仿真核心模块
//!
//! 事件驱动仿真的通用部件：虚拟时钟、事件、事件队列与世界。
//! 所有"进程"都是调度在同一时钟上的事件，严格按 (时间, 序号) 顺序执行。

mod event;
mod scheduled_event;
mod simulator;
mod time;

pub use event::{Event, World};
pub use scheduled_event::ScheduledEvent;
pub use simulator::Simulator;
pub use time::SimTime;
