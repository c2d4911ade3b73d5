use crate::sim::{Event, SimTime, Simulator, World};
use std::any::Any;
use std::sync::{Arc, Mutex};

type Log = Arc<Mutex<Vec<(u32, SimTime)>>>;

/// 只统计执行过的事件数
#[derive(Default)]
struct Counting {
    executed: usize,
}

impl World for Counting {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn on_tick(&mut self, _sim: &mut Simulator) {
        self.executed += 1;
    }
}

/// 一次性事件：记下 (id, 执行时刻)
struct Mark {
    id: u32,
    log: Log,
}

impl Event for Mark {
    fn execute(self: Box<Self>, sim: &mut Simulator, _world: &mut dyn World) {
        self.log.lock().expect("log lock").push((self.id, sim.now()));
    }
}

/// 周期进程：每隔 `period` 唤醒一次，共 `left` 次
struct Periodic {
    id: u32,
    period: SimTime,
    left: u32,
    log: Log,
}

impl Event for Periodic {
    fn execute(self: Box<Self>, sim: &mut Simulator, _world: &mut dyn World) {
        let p = *self;
        p.log.lock().expect("log lock").push((p.id, sim.now()));
        if p.left > 1 {
            let at = sim.now().saturating_add(p.period);
            sim.schedule(at, Periodic { left: p.left - 1, ..p });
        }
    }
}

fn mark(sim: &mut Simulator, log: &Log, id: u32, at: u64) {
    sim.schedule(SimTime(at), Mark { id, log: Arc::clone(log) });
}

fn order(log: &Log) -> Vec<u32> {
    log.lock().expect("log lock").iter().map(|&(id, _)| id).collect()
}

#[test]
fn ties_on_time_break_by_schedule_order() {
    let log = Log::default();
    let mut sim = Simulator::default();
    mark(&mut sim, &log, 1, 10);
    mark(&mut sim, &log, 2, 5);
    mark(&mut sim, &log, 3, 10);

    let mut world = Counting::default();
    sim.run(&mut world);

    assert_eq!(order(&log), vec![2, 1, 3]);
    assert_eq!(world.executed, 3);
    assert_eq!(sim.executed(), 3);
    assert_eq!(sim.now(), SimTime(10));
    assert_eq!(sim.pending(), 0);
}

#[test]
fn periodic_processes_share_one_clock() {
    let log = Log::default();
    let mut sim = Simulator::default();
    sim.schedule(
        SimTime(3),
        Periodic { id: 1, period: SimTime(3), left: 4, log: Arc::clone(&log) },
    );
    sim.schedule(
        SimTime(2),
        Periodic { id: 2, period: SimTime(5), left: 3, log: Arc::clone(&log) },
    );
    sim.run(&mut Counting::default());

    let times: Vec<SimTime> = log.lock().expect("log lock").iter().map(|&(_, t)| t).collect();
    assert!(times.windows(2).all(|w| w[0] <= w[1]), "{times:?}");
    // 2@2 1@3 1@6 2@7 1@9，时间 12 处 2 先于 1 被调度
    assert_eq!(order(&log), vec![2, 1, 1, 2, 1, 2, 1]);
}

#[test]
fn run_until_stops_at_the_deadline_inclusive() {
    let log = Log::default();
    let mut sim = Simulator::default();
    mark(&mut sim, &log, 1, 0);
    mark(&mut sim, &log, 2, 5);
    mark(&mut sim, &log, 3, 10);

    let mut world = Counting::default();
    sim.run_until(SimTime(5), &mut world);
    assert_eq!(order(&log), vec![1, 2]);
    assert_eq!(sim.pending(), 1);
    assert_eq!(sim.now(), SimTime(5));

    sim.run(&mut world);
    assert_eq!(order(&log), vec![1, 2, 3]);
    assert_eq!(world.executed, 3);
}

#[test]
fn idle_run_until_still_advances_the_clock() {
    let log = Log::default();
    let mut sim = Simulator::default();
    let mut world = Counting::default();
    sim.run_until(SimTime(7), &mut world);
    assert_eq!(sim.now(), SimTime(7));
    assert_eq!(world.executed, 0);

    // 早于当前时间的调度按当前时间执行
    mark(&mut sim, &log, 9, 1);
    sim.run(&mut world);
    assert_eq!(*log.lock().expect("log lock"), vec![(9, SimTime(7))]);
}
