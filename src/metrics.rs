//! [Prometheus][prometheus]用のメトリクス.
//!
//! [prometheus]: https://prometheus.io/
use prometrics::metrics::{Counter, MetricBuilder};

use crate::ErrorKind;

/// ブロック探索のメトリクス.
#[derive(Debug, Clone)]
pub struct FinderMetrics {
    pub(crate) searches: Counter,
    pub(crate) found_blocks: Counter,
    pub(crate) visited_nodes: Counter,
    pub(crate) pruned_nodes: Counter,
    pub(crate) failures: FailureCounter,
}
impl FinderMetrics {
    /// 探索の実行回数.
    ///
    /// # Prometheus
    ///
    /// ```prometheus
    /// cola_finder_searches_total <COUNTER>
    /// ```
    pub fn searches(&self) -> u64 {
        self.searches.value() as u64
    }

    /// 空きブロックの発見に成功した回数.
    ///
    /// # Prometheus
    ///
    /// ```prometheus
    /// cola_finder_found_blocks_total <COUNTER>
    /// ```
    pub fn found_blocks(&self) -> u64 {
        self.found_blocks.value() as u64
    }

    /// 探索木上で訪問したノードの数の合計.
    ///
    /// # Prometheus
    ///
    /// ```prometheus
    /// cola_finder_visited_nodes_total <COUNTER>
    /// ```
    pub fn visited_nodes(&self) -> u64 {
        self.visited_nodes.value() as u64
    }

    /// 使用済みブロックと一致したために、配下の探索が省略されたノードの数.
    ///
    /// # Prometheus
    ///
    /// ```prometheus
    /// cola_finder_pruned_nodes_total <COUNTER>
    /// ```
    pub fn pruned_nodes(&self) -> u64 {
        self.pruned_nodes.value() as u64
    }

    /// 探索が失敗した回数(エラー種別毎).
    ///
    /// # Prometheus
    ///
    /// ```prometheus
    /// cola_finder_failures_total { reason="invalid_input_ranges|no_available_block|mask_exhausted|search_budget_exceeded" } <COUNTER>
    /// ```
    pub fn failures(&self) -> &FailureCounter {
        &self.failures
    }

    pub(crate) fn new(builder: &MetricBuilder) -> Self {
        let mut builder = builder.clone();
        builder.namespace("cola").subsystem("finder");
        FinderMetrics {
            searches: builder
                .counter("searches_total")
                .help("Number of searches")
                .finish()
                .expect("Never fails"),
            found_blocks: builder
                .counter("found_blocks_total")
                .help("Number of available blocks found")
                .finish()
                .expect("Never fails"),
            visited_nodes: builder
                .counter("visited_nodes_total")
                .help("Number of visited nodes of the subdivision tree")
                .finish()
                .expect("Never fails"),
            pruned_nodes: builder
                .counter("pruned_nodes_total")
                .help("Number of nodes pruned because they match used blocks")
                .finish()
                .expect("Never fails"),
            failures: FailureCounter::new(&builder),
        }
    }
}

/// エラー種別毎の失敗回数を保持するカウンタ.
#[derive(Debug, Clone)]
pub struct FailureCounter {
    pub(crate) invalid_input_ranges: Counter,
    pub(crate) no_available_block: Counter,
    pub(crate) mask_exhausted: Counter,
    pub(crate) search_budget_exceeded: Counter,
}
impl FailureCounter {
    /// `ErrorKind::InvalidInputRanges`の発生回数.
    pub fn invalid_input_ranges(&self) -> u64 {
        self.invalid_input_ranges.value() as u64
    }

    /// `ErrorKind::NoAvailableBlock`の発生回数.
    pub fn no_available_block(&self) -> u64 {
        self.no_available_block.value() as u64
    }

    /// `ErrorKind::MaskExhausted`の発生回数.
    pub fn mask_exhausted(&self) -> u64 {
        self.mask_exhausted.value() as u64
    }

    /// `ErrorKind::SearchBudgetExceeded`の発生回数.
    pub fn search_budget_exceeded(&self) -> u64 {
        self.search_budget_exceeded.value() as u64
    }

    /// 全種別の合計.
    pub fn sum(&self) -> u64 {
        self.invalid_input_ranges()
            + self.no_available_block()
            + self.mask_exhausted()
            + self.search_budget_exceeded()
    }

    pub(crate) fn increment(&self, kind: ErrorKind) {
        match kind {
            ErrorKind::InvalidInputRanges => self.invalid_input_ranges.increment(),
            ErrorKind::NoAvailableBlock => self.no_available_block.increment(),
            ErrorKind::MaskExhausted => self.mask_exhausted.increment(),
            ErrorKind::SearchBudgetExceeded => self.search_budget_exceeded.increment(),
            ErrorKind::InvalidInput => {} // 探索中には発生しない
        }
    }

    fn new(builder: &MetricBuilder) -> Self {
        let counter = |reason: &str| {
            builder
                .counter("failures_total")
                .help("Number of failed searches")
                .label("reason", reason)
                .finish()
                .expect("Never fails")
        };
        FailureCounter {
            invalid_input_ranges: counter("invalid_input_ranges"),
            no_available_block: counter("no_available_block"),
            mask_exhausted: counter("mask_exhausted"),
            search_budget_exceeded: counter("search_budget_exceeded"),
        }
    }
}
