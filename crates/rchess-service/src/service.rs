//! EngineService本体
//!
//! 1本の専用ワーカースレッドに探索を直列化するサービス。
//! リクエスト側スレッドは pending スロットへの書き込みと
//! キャッシュ参照しか行わず、探索コードを実行しない。
//!
//! ロック規律: `SharedState` のミューテックスはスロット読み書きと
//! キャッシュ操作の短い区間だけ保持する。探索実行中・コールバック
//! 呼び出し中には保持しない。

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use rchess_core::{Level, SearchEngine, Value};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Color, Position};

use crate::cache::{structural_key, EvalCache};
use crate::config::ServiceConfig;
use crate::job::{EvalOutcome, JobError, MoveOutcome, SearchJob, SearchRequest};

/// エンジン生成ファクトリ
///
/// ワーカースレッド上で呼ばれる。失敗はサービスの「停止」として
/// 扱われ、呼び出し側スレッドには伝播しない。
pub type EngineFactory = Arc<dyn Fn() -> anyhow::Result<SearchEngine> + Send + Sync>;

/// 指し手結果のデータシンク。ブロックしてはならず、
/// 同期的にサービスへ再入してはならない
pub type MoveResultSink = Arc<dyn Fn(MoveOutcome) + Send + Sync>;

/// 評価結果のデータシンク
pub type EvalResultSink = Arc<dyn Fn(EvalOutcome) + Send + Sync>;

/// リクエスト側とワーカーが共有する状態
///
/// `epoch` は start() のたびに進む世代番号。stop() 後すぐ start() しても
/// 旧ワーカーが新しい世代のジョブを食わないようにするガード。
struct SharedState {
    running: bool,
    epoch: u64,
    pending_move: Option<SearchRequest>,
    pending_eval: Option<SearchRequest>,
    cache: EvalCache,
}

/// 単一ワーカーのジョブ合流サービス
pub struct EngineService {
    config: ServiceConfig,
    factory: EngineFactory,
    on_move: MoveResultSink,
    on_eval: EvalResultSink,
    shared: Arc<Mutex<SharedState>>,
}

impl EngineService {
    pub fn new(
        config: ServiceConfig,
        factory: EngineFactory,
        on_move: MoveResultSink,
        on_eval: EvalResultSink,
    ) -> Self {
        let cache_capacity = config.cache_capacity;
        Self {
            config,
            factory,
            on_move,
            on_eval,
            shared: Arc::new(Mutex::new(SharedState {
                running: false,
                epoch: 0,
                pending_move: None,
                pending_eval: None,
                cache: EvalCache::new(cache_capacity),
            })),
        }
    }

    /// ワーカースレッドを起動する（冪等）
    ///
    /// エンジンはワーカースレッド上で構築される。pending スロットと
    /// キャッシュはクリアされ、前セッションの状態は持ち越さない。
    pub fn start(&self) {
        let epoch = {
            let mut st = self.lock();
            if st.running {
                return;
            }
            st.running = true;
            st.epoch += 1;
            st.pending_move = None;
            st.pending_eval = None;
            st.cache.clear();
            st.epoch
        };

        let ctx = WorkerContext {
            shared: Arc::clone(&self.shared),
            epoch,
            factory: Arc::clone(&self.factory),
            on_move: Arc::clone(&self.on_move),
            on_eval: Arc::clone(&self.on_eval),
            name: self.config.name.clone(),
            idle_sleep: Duration::from_millis(self.config.idle_sleep_ms),
        };

        let spawned = thread::Builder::new()
            .name(format!("{}-worker", self.config.name))
            .spawn(move || worker_loop(ctx));

        if let Err(err) = spawned {
            log::error!("[{}] failed to spawn worker thread: {err}", self.config.name);
            self.lock().running = false;
        } else {
            log::info!("[{}] started", self.config.name);
        }
    }

    /// ワーカーに停止を指示する（冪等・非ブロッキング）
    ///
    /// pending のジョブは破棄され、キャッシュはクリアされる。
    /// 実行中のジョブには割り込まない。そのジョブは自身の締切まで
    /// 走り切り、結果のコールバックも発火しうる。
    pub fn stop(&self) {
        let mut st = self.lock();
        if st.running {
            log::info!("[{}] stopping", self.config.name);
        }
        st.running = false;
        st.pending_move = None;
        st.pending_eval = None;
        st.cache.clear();
    }

    /// 稼働中かどうか
    pub fn is_running(&self) -> bool {
        self.lock().running
    }

    /// 指し手リクエスト
    ///
    /// 単一の pending スロットを上書きする（最新1件のみ保持）。
    /// pending の評価リクエストより常に優先される。
    pub fn request_move(&self, fen: &str, level: Level, generation: u64) {
        let mut st = self.lock();
        st.pending_move = Some(SearchRequest {
            fen: fen.to_string(),
            level,
            generation,
        });
    }

    /// 評価リクエスト
    ///
    /// まずキャッシュを構造キーで参照し、支配則ヒットなら
    /// ワーカーを経由せずその場でコールバックを呼んで返る。
    /// ミス時は単一の pending スロットを上書きする。
    pub fn request_eval(&self, fen: &str, level: Level, generation: u64) {
        let key = structural_key(fen);
        let cached = self.lock().cache.probe(&key, level);
        if let Some(white_cp) = cached {
            (self.on_eval)(EvalOutcome {
                generation,
                fen: fen.to_string(),
                white_cp,
            });
            return;
        }

        let mut st = self.lock();
        st.pending_eval = Some(SearchRequest {
            fen: fen.to_string(),
            level,
            generation,
        });
    }

    fn lock(&self) -> MutexGuard<'_, SharedState> {
        lock_shared(&self.shared, &self.config.name)
    }
}

impl Drop for EngineService {
    fn drop(&mut self) {
        // ワーカーは次の周回で停止を観測して抜ける。joinはしない
        self.stop();
    }
}

/// ワーカースレッドへ渡す一式
struct WorkerContext {
    shared: Arc<Mutex<SharedState>>,
    epoch: u64,
    factory: EngineFactory,
    on_move: MoveResultSink,
    on_eval: EvalResultSink,
    name: String,
    idle_sleep: Duration,
}

/// ミューテックスの Poison を透過してロックを取得する共通ヘルパ
fn lock_shared<'a>(shared: &'a Arc<Mutex<SharedState>>, name: &str) -> MutexGuard<'a, SharedState> {
    match shared.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log::warn!("[{name}] shared state mutex poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

/// ワーカーループ
///
/// エンジン構築に失敗したらサービスを停止状態に落として抜ける。
/// 以降は「指し手優先・評価は指し手に破棄される」規律でジョブを
/// 1件ずつ直列実行する。
fn worker_loop(ctx: WorkerContext) {
    let mut engine = match (ctx.factory)() {
        Ok(engine) => engine,
        Err(err) => {
            log::error!("[{}] engine construction failed: {err:#}", ctx.name);
            let mut st = lock_shared(&ctx.shared, &ctx.name);
            if st.epoch == ctx.epoch {
                st.running = false;
            }
            return;
        }
    };

    loop {
        let job = {
            let mut st = lock_shared(&ctx.shared, &ctx.name);
            if !st.running || st.epoch != ctx.epoch {
                break;
            }
            if let Some(req) = st.pending_move.take() {
                // 指し手計算に追い越された評価は計算する価値がない
                st.pending_eval = None;
                Some(SearchJob::Move(req))
            } else {
                st.pending_eval.take().map(SearchJob::Eval)
            }
        };

        let Some(job) = job else {
            thread::sleep(ctx.idle_sleep);
            continue;
        };

        // ジョブ単位の失敗はワーカーを殺さない
        match panic::catch_unwind(AssertUnwindSafe(|| run_job(&mut engine, &ctx, &job))) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => log::warn!("[{}] job failed: {err}", ctx.name),
            Err(_) => log::error!("[{}] job panicked", ctx.name),
        }
    }

    log::info!("[{}] worker exited (epoch {})", ctx.name, ctx.epoch);
}

/// ジョブを1件実行してコールバックを呼ぶ
fn run_job(engine: &mut SearchEngine, ctx: &WorkerContext, job: &SearchJob) -> Result<(), JobError> {
    match job {
        SearchJob::Move(req) => {
            let pos = parse_fen(&req.fen)?;
            let (best_move, score) = engine.choose_move(&pos, req.level);
            let white_cp = to_white_cp(score, pos.turn());
            (ctx.on_move)(MoveOutcome {
                generation: req.generation,
                fen: req.fen.clone(),
                best_move,
                white_cp,
            });
        }
        SearchJob::Eval(req) => {
            let pos = parse_fen(&req.fen)?;
            let score = engine.eval_position(&pos, req.level);
            let white_cp = to_white_cp(score, pos.turn());
            {
                let mut st = lock_shared(&ctx.shared, &ctx.name);
                st.cache.store(structural_key(&req.fen), req.level, white_cp);
            }
            (ctx.on_eval)(EvalOutcome {
                generation: req.generation,
                fen: req.fen.clone(),
                white_cp,
            });
        }
    }
    Ok(())
}

/// FEN から局面を復元する
fn parse_fen(fen: &str) -> Result<Chess, JobError> {
    fen.parse::<Fen>()
        .map_err(|_| JobError::InvalidPosition(fen.to_string()))?
        .into_position(CastlingMode::Standard)
        .map_err(|_| JobError::InvalidPosition(fen.to_string()))
}

/// 手番側視点のスコアを白視点（正 = 白有利）へ変換する
fn to_white_cp(score: Value, turn: Color) -> Value {
    match turn {
        Color::White => score,
        Color::Black => -score,
    }
}
