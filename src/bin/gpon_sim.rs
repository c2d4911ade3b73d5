//! GPON 仿真命令行
//!
//! 构建拓扑、计算功率预算、运行 DBA 与流量仿真，结果以 JSON 输出到 stdout。

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use gpon_sim::budget::{PathStrategy, PowerBudgetEvaluator};
use gpon_sim::dba::{DynamicBandwidthAllocation, Requests};
use gpon_sim::net::{GPON_CAPACITY_MBPS, Network};
use gpon_sim::topo::{self, TopologyOpts, TopologyShape, topology_metrics};
use gpon_sim::traffic::{SimOpts, TrafficProfile, TrafficSimulator};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "gpon-sim", about = "GPON/FTTH 拓扑、功率预算、DBA 与流量仿真")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 构建拓扑并输出网络记录
    Topology(TopologyArgs),
    /// 计算各 ONU 的功率预算
    PowerBudget {
        #[command(flatten)]
        topo: TopologyArgs,
        #[arg(long, value_enum, default_value_t = Strategy::Walk)]
        strategy: Strategy,
        /// 只计算指定 ONU（例如 ONU-3）
        #[arg(long)]
        onu: Option<String>,
    },
    /// 输出拓扑指标（光纤总长、路径长度、传播时延）
    Metrics(TopologyArgs),
    /// 动态带宽分配
    Dba {
        /// 形如 ONU-1=12.5 的请求，可重复
        #[arg(long = "request", value_parser = parse_request)]
        requests: Vec<(String, f64)>,
        /// 总容量（Mbps）
        #[arg(long, default_value_t = GPON_CAPACITY_MBPS)]
        capacity: f64,
        /// 使用均分策略
        #[arg(long)]
        fair: bool,
    },
    /// 运行流量仿真
    Simulate {
        #[arg(long, default_value_t = 32)]
        subscribers: usize,
        /// 仿真时长（秒）
        #[arg(long, default_value_t = 100.0)]
        horizon: f64,
        #[arg(long)]
        seed: Option<u64>,
        /// 流量配置 JSON 文件（TrafficProfile 数组）；缺省为随机三网融合负载
        #[arg(long)]
        profiles: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct TopologyArgs {
    /// star / bus / ring / tree，未知值按 star 处理
    #[arg(long, default_value = "star")]
    shape: String,
    #[arg(long, default_value_t = 32)]
    subscribers: usize,
    #[arg(long, default_value = "1:32")]
    split_ratio: String,
    #[arg(long)]
    name: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    Walk,
    Direct,
}

impl From<Strategy> for PathStrategy {
    fn from(s: Strategy) -> Self {
        match s {
            Strategy::Walk => PathStrategy::Walk,
            Strategy::Direct => PathStrategy::Direct,
        }
    }
}

fn parse_request(raw: &str) -> Result<(String, f64), String> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=MBPS, got `{raw}`"))?;
    let mbps = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid bandwidth `{value}`: {e}"))?;
    Ok((id.trim().to_string(), mbps))
}

fn build_network(args: &TopologyArgs) -> gpon_sim::Result<Network> {
    let defaults = TopologyOpts::default();
    topo::build(&TopologyOpts {
        name: args.name.clone().unwrap_or(defaults.name),
        shape: TopologyShape::parse(&args.shape),
        subscribers: args.subscribers,
        split_ratio: args.split_ratio.clone(),
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let out = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{out}");
    Ok(())
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Topology(args) => {
            let net = build_network(&args).map_err(|e| e.to_string())?;
            print_json(&net.to_record())
        }
        Command::PowerBudget {
            topo,
            strategy,
            onu,
        } => {
            let net = build_network(&topo).map_err(|e| e.to_string())?;
            let evaluator = PowerBudgetEvaluator::new(strategy.into());
            let mut results = evaluator.evaluate_all(&net);
            if let Some(label) = onu {
                results.retain(|r| r.onu_id == label);
                if results.is_empty() {
                    return Err(format!("no power budget for `{label}`"));
                }
            }
            print_json(&results)
        }
        Command::Metrics(args) => {
            let net = build_network(&args).map_err(|e| e.to_string())?;
            print_json(&topology_metrics(&net))
        }
        Command::Dba {
            requests,
            capacity,
            fair,
        } => {
            let requests: Requests = requests.into_iter().collect();
            let dba = DynamicBandwidthAllocation::new(capacity);
            if fair {
                let result = dba.fair_allocate(&requests, None).map_err(|e| e.to_string())?;
                print_json(&result)
            } else {
                let result = dba.allocate(&requests, None).map_err(|e| e.to_string())?;
                print_json(&result)
            }
        }
        Command::Simulate {
            subscribers,
            horizon,
            seed,
            profiles,
        } => {
            let profiles = match profiles {
                Some(path) => {
                    let raw = fs::read_to_string(&path)
                        .map_err(|e| format!("read {}: {e}", path.display()))?;
                    let parsed: Vec<TrafficProfile> = serde_json::from_str(&raw)
                        .map_err(|e| format!("parse {}: {e}", path.display()))?;
                    Some(parsed)
                }
                None => None,
            };
            let opts = SimOpts {
                subscribers,
                horizon_secs: horizon,
                seed,
            };
            let result = TrafficSimulator::from_opts(&opts)
                .and_then(|sim| sim.run(profiles))
                .map_err(|e| e.to_string())?;
            print_json(&result)
        }
    }
}

fn main() -> ExitCode {
    // 日志写到 stderr，stdout 只输出 JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
