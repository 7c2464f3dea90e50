use prometrics::metrics::MetricBuilder;
use slog::{Discard, Logger};

use super::BlockFinder;
use crate::metrics::FinderMetrics;

/// `BlockFinder`のビルダ.
#[derive(Debug, Clone)]
pub struct FinderBuilder {
    max_visited_nodes: usize,
    logger: Logger,
    metrics: MetricBuilder,
}
impl FinderBuilder {
    /// 訪問ノード数の上限のデフォルト値.
    pub const DEFAULT_MAX_VISITED_NODES: usize = 1 << 20;

    /// デフォルト設定で`FinderBuilder`インスタンスを生成する.
    pub fn new() -> Self {
        FinderBuilder {
            max_visited_nodes: Self::DEFAULT_MAX_VISITED_NODES,
            logger: Logger::root(Discard, o!()),
            metrics: MetricBuilder::new(),
        }
    }

    /// 一回の探索で訪問可能なノード数の上限を設定する.
    ///
    /// 探索木のノードを一つ取り出す度に一回の訪問とみなされる.
    /// この値を超えて訪問しようとした場合には、探索は`ErrorKind::SearchBudgetExceeded`で失敗する.
    ///
    /// 探索量は「要求マスクとルートブロックのプレフィックス長の差」に対して指数的に増加し得るため、
    /// その最悪時のレイテンシを抑えるために使われる.
    ///
    /// デフォルト値は`FinderBuilder::DEFAULT_MAX_VISITED_NODES`.
    pub fn max_visited_nodes(&mut self, n: usize) -> &mut Self {
        self.max_visited_nodes = n;
        self
    }

    /// 探索処理用の logger を登録する.
    ///
    /// デフォルトでは何も出力されない.
    pub fn logger(&mut self, logger: Logger) -> &mut Self {
        self.logger = logger;
        self
    }

    /// メトリクス用の共通設定を登録する.
    ///
    /// デフォルト値は`MetricBuilder::new()`.
    pub fn metrics(&mut self, metrics: MetricBuilder) -> &mut Self {
        self.metrics = metrics;
        self
    }

    /// 設定内容に従って`BlockFinder`を生成する.
    pub fn finish(&self) -> BlockFinder {
        BlockFinder {
            max_visited_nodes: self.max_visited_nodes,
            logger: self.logger.clone(),
            metrics: FinderMetrics::new(&self.metrics),
        }
    }
}
impl Default for FinderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
