//! 事件与世界
//!
//! 仿真中的"进程"拆成一串事件：事件执行时通过 `World` 读写业务状态，
//! 需要继续运行时把自己（或后继事件）重新交给 `Simulator` 调度。

use super::simulator::Simulator;
use std::any::Any;

/// 可调度的事件。按值消费自身，进程状态随事件一起 move 到下一次唤醒。
pub trait Event: 'static {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World);
}

/// 业务状态的宿主（例如流量发生器与共享随机数源）。
///
/// 事件只拿到 `&mut dyn World`，需要具体类型时经 `as_any_mut` 向下转型。
pub trait World: Any {
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// 每执行完一个事件调用一次
    fn on_tick(&mut self, _sim: &mut Simulator) {}
}
