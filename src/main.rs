//! Xiangqi Engine CLI
//!
//! 命令行界面，用于测试规则引擎与 AI
//!
//! 支持两种模式：
//! 1. 单次命令模式：每次执行一个命令
//! 2. Server 模式：长驻进程，通过 stdin/stdout 逐行交换 JSON

use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::time::Instant;
use xiangqi_engine::protocol::MoveInfo;
use xiangqi_engine::{
    handle_request, parse_fen, parse_request, Difficulty, EngineConfig, EngineError, MinimaxAI,
    Request, Response, Side, XiangqiAI,
};

#[derive(Parser)]
#[command(name = "xiangqi-engine")]
#[command(about = "Xiangqi rules engine and AI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 获取合法走法
    Moves {
        /// FEN 字符串
        #[arg(long)]
        fen: String,

        /// 走子方 (red, black)，默认取 FEN 中的走子方
        #[arg(long)]
        side: Option<Side>,
    },

    /// 选择最佳走法
    Best {
        /// FEN 字符串
        #[arg(long)]
        fen: String,

        /// 难度 (easy, medium, hard)
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,

        /// 走子方，默认取 FEN 中的走子方
        #[arg(long)]
        side: Option<Side>,

        /// 随机种子
        #[arg(long)]
        seed: Option<u64>,

        /// 搜索深度（hard）
        #[arg(long, default_value = "3")]
        depth: u32,

        /// 搜索节点上限
        #[arg(long)]
        max_nodes: Option<u64>,

        /// 时间限制（秒）
        #[arg(long)]
        time_limit: Option<f64>,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 一步前瞻的提示
    Hint {
        /// FEN 字符串
        #[arg(long)]
        fen: String,

        /// 走子方，默认取 FEN 中的走子方
        #[arg(long)]
        side: Option<Side>,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 评估局面分数（红方视角）
    Score {
        /// FEN 字符串
        #[arg(long)]
        fen: String,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 启动 server 模式（stdin/stdout 通信）
    Server {
        /// 默认搜索深度（hard）
        #[arg(long, default_value = "3")]
        depth: u32,

        /// 默认搜索节点上限，可被请求中的 max_nodes 覆盖
        #[arg(long)]
        max_nodes: Option<u64>,

        /// 默认时间限制（秒），可被请求中的 time_limit 覆盖
        #[arg(long)]
        time_limit: Option<f64>,

        /// 随机种子
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Serialize)]
struct BestResult {
    #[serde(rename = "move")]
    mv: MoveInfo,
    difficulty: Difficulty,
    side: Side,
    #[serde(skip_serializing_if = "Option::is_none")]
    nodes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<i32>,
    elapsed_ms: f64,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), EngineError> {
    let text =
        serde_json::to_string_pretty(value).map_err(|e| EngineError::Internal(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Moves { fen, side } => cmd_moves(&fen, side),
        Commands::Best {
            fen,
            difficulty,
            side,
            seed,
            depth,
            max_nodes,
            time_limit,
            json,
        } => {
            let config = EngineConfig {
                depth,
                seed,
                max_nodes,
                time_limit,
            };
            cmd_best(&fen, difficulty, side, config, json)
        }
        Commands::Hint { fen, side, json } => cmd_hint(&fen, side, json),
        Commands::Score { fen, json } => cmd_score(&fen, json),
        Commands::Server {
            depth,
            max_nodes,
            time_limit,
            seed,
        } => run_server(EngineConfig {
            depth,
            seed,
            max_nodes,
            time_limit,
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_moves(fen: &str, side: Option<Side>) -> Result<(), EngineError> {
    let state = parse_fen(fen)?;
    let side = side.unwrap_or(state.turn);
    let moves = state.board.all_moves(side);

    println!("Legal moves for {} ({}):", side, moves.len());
    for mv in &moves {
        println!("  {}", mv);
    }
    Ok(())
}

fn cmd_best(
    fen: &str,
    difficulty: Difficulty,
    side: Option<Side>,
    config: EngineConfig,
    json: bool,
) -> Result<(), EngineError> {
    let state = parse_fen(fen)?;
    let side = side.unwrap_or(state.turn);
    let ai = XiangqiAI::new(config);
    let mut rng = ai.rng();

    let start = Instant::now();
    // hard 难度直接调用搜索，便于输出节点数与分数
    let (mv, nodes, score) = if difficulty == Difficulty::Hard {
        let outcome = MinimaxAI::new(ai.config()).search(&state.board, side);
        (outcome.best_move, Some(outcome.nodes), outcome.score)
    } else {
        (
            ai.select_move_for(&state.board, side, difficulty, &mut rng),
            None,
            None,
        )
    };
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    let mv = mv.ok_or(EngineError::NoMoves { side })?;

    if json {
        print_json(&BestResult {
            mv: mv.into(),
            difficulty,
            side,
            nodes,
            score,
            elapsed_ms,
        })?;
    } else {
        println!("Best move (difficulty={}, side={}): {}", difficulty, side, mv);
        if let Some(n) = nodes {
            println!("Nodes: {}, score: {:?}, time: {:.1}ms", n, score, elapsed_ms);
        }
    }
    Ok(())
}

fn cmd_hint(fen: &str, side: Option<Side>, json: bool) -> Result<(), EngineError> {
    let state = parse_fen(fen)?;
    let side = side.unwrap_or(state.turn);
    let ai = XiangqiAI::default();

    let mv = ai
        .hint(&state.board, side)
        .ok_or(EngineError::NoMoves { side })?;

    if json {
        print_json(&MoveInfo::from(mv))?;
    } else {
        println!("Hint for {}: {}", side, mv);
    }
    Ok(())
}

fn cmd_score(fen: &str, json: bool) -> Result<(), EngineError> {
    let state = parse_fen(fen)?;
    let evaluation = XiangqiAI::default().evaluate(&state.board);

    if json {
        print_json(&evaluation)?;
    } else {
        println!(
            "局面评估 (红方视角): {} ({})",
            evaluation.score, evaluation.advantage
        );
    }
    Ok(())
}

/// Server 模式主循环
/// 从 stdin 读取 JSON 请求，返回 JSON 响应到 stdout
fn run_server(config: EngineConfig) -> Result<(), EngineError> {
    let ai = XiangqiAI::new(config);
    let mut rng = ai.rng();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    info!("server started with {:?}", ai.config());

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        // 空行跳过
        if line.trim().is_empty() {
            continue;
        }

        let response = match parse_request(&line) {
            Ok(Request::Quit) => break,
            Ok(request) => handle_request(&ai, &request, &mut rng),
            Err(e) => Response::error(&e),
        };

        let text = serde_json::to_string(&response).map_err(|e| EngineError::Internal(e.to_string()))?;
        writeln!(stdout, "{}", text).map_err(|e| EngineError::Internal(e.to_string()))?;
        let _ = stdout.flush();
    }

    info!("server stopped");
    Ok(())
}
