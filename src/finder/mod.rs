//! 空きブロックの探索.
//!
//! ルートブロックを根とし、[`Block::split`]による二分割を辿る二分木を、
//! 深さ優先で(常にアドレスの小さい子から順に)探索して、
//! 要求サイズの空きブロックの中で最もアドレスが小さいものを選択する.
//!
//! 探索は呼び出し毎に完結しており、使用済みブロックの一覧は毎回呼び出し側から渡される.
//! 呼び出し間で共有される状態はメトリクスのカウンタのみ.
//!
//! # 探索例
//!
//! ```text
//! ルートブロック: 10.0.0.0/16
//! 使用済みブロック: 10.0.0.0/18, 10.0.64.0/20, 10.0.80.0/24
//! 要求マスク: /21
//!
//!                        10.0.0.0/16
//!                       /           \
//!               10.0.0.0/17        (未訪問)
//!              /           \
//!       10.0.0.0/18      10.0.64.0/18
//!       (使用済み)       /           \
//!                  10.0.64.0/19     (未訪問)
//!                  /          \
//!           10.0.64.0/20     10.0.80.0/20
//!           (使用済み)       /          \
//!                     10.0.80.0/21    10.0.88.0/21
//!                  (使用済みを含む)   => 結果
//! ```
//!
//! [`Block::split`]: ../block/struct.Block.html#method.split
use slog::Logger;
use trackable::error::ErrorKindExt;

use crate::address::Mask;
use crate::block::{self, Block};
use crate::error::OutOfRootBlock;
use crate::metrics::FinderMetrics;
use crate::{Error, ErrorKind, Result};

pub use self::builder::FinderBuilder;

mod builder;

/// デフォルト設定の`BlockFinder`を使って、空きブロックを探索する.
///
/// 詳細は[`BlockFinder::find_available`]を参照のこと.
///
/// [`BlockFinder::find_available`]: ./struct.BlockFinder.html#method.find_available
///
/// # Examples
///
/// ```
/// use cola::ErrorKind;
/// use cola::address::Mask;
/// use cola::block::Block;
/// use cola::finder::find_available;
///
/// let root: Block = "10.0.0.0/16".parse().unwrap();
/// let used: Vec<Block> = vec!["10.0.0.0/24".parse().unwrap()];
///
/// let found = find_available(&root, Mask::ipv4(24).unwrap(), &used).unwrap();
/// assert_eq!(found.to_string(), "10.0.1.0/24");
///
/// let e = find_available(&root, Mask::ipv4(15).unwrap(), &used).err().unwrap();
/// assert_eq!(*e.kind(), ErrorKind::NoAvailableBlock);
/// ```
pub fn find_available(root: &Block, desired_mask: Mask, used: &[Block]) -> Result<Block> {
    track!(FinderBuilder::new()
        .finish()
        .find_available(root, desired_mask, used))
}

/// `block`と等しい使用済みブロックが存在するかどうかを判定する.
pub fn matches_existing(block: &Block, used: &[Block]) -> bool {
    used.iter().any(|u| block::blocks_equal(block, u))
}

/// `block`に含まれる使用済みブロックが存在するかどうかを判定する.
///
/// 包含判定は両端を含むため、`block`と等しい使用済みブロックも対象となる.
pub fn contains_existing(block: &Block, used: &[Block]) -> bool {
    used.iter().any(|u| block.contains(u))
}

/// 空きブロックの探索器.
///
/// 探索自体は状態を持たないため、一つのインスタンスを複数の呼び出し元で共有して良い.
#[derive(Debug, Clone)]
pub struct BlockFinder {
    max_visited_nodes: usize,
    logger: Logger,
    metrics: FinderMetrics,
}
impl BlockFinder {
    /// デフォルト設定で`BlockFinder`インスタンスを生成する.
    ///
    /// `FinderBuilder::new().finish()`と等価.
    pub fn new() -> Self {
        FinderBuilder::new().finish()
    }

    /// `root`の中から、`used`のいずれとも重ならない、マスクが`desired_mask`のブロックを探す.
    ///
    /// 条件を満たすブロックが複数存在する場合には、最もアドレスが小さいものが返される.
    ///
    /// `root`および`used`の各ブロックは、ホスト部をゼロクリアした上で探索に使われる.
    /// そのため、返り値のアドレスのホスト部は常にゼロとなる.
    ///
    /// # Errors
    ///
    /// 以下の場合にはエラーが返される:
    ///
    /// - `used`の中に`root`に含まれないブロックがある: `ErrorKind::InvalidInputRanges`
    ///   - 最初に見つかったブロックが[`OutOfRootBlock`]として原因に格納される
    /// - `desired_mask`が`root`のマスクよりも大きい: `ErrorKind::NoAvailableBlock`
    /// - 空きブロックが見つからなかった: `ErrorKind::NoAvailableBlock`
    /// - 分割不可能なブロックに到達した: `ErrorKind::MaskExhausted`
    /// - 訪問ノード数が上限を超えた: `ErrorKind::SearchBudgetExceeded`
    ///
    /// [`OutOfRootBlock`]: ../struct.OutOfRootBlock.html
    pub fn find_available(
        &self,
        root: &Block,
        desired_mask: Mask,
        used: &[Block],
    ) -> Result<Block> {
        self.metrics.searches.increment();
        debug!(
            self.logger,
            "Starts searching an available block";
            "root" => %root, "desired_mask" => %desired_mask, "used" => used.len()
        );
        match track!(self.search(root, desired_mask, used)) {
            Ok(found) => {
                self.metrics.found_blocks.increment();
                debug!(self.logger, "Found an available block: {}", found; "root" => %root);
                Ok(found)
            }
            Err(e) => {
                self.metrics.failures.increment(*e.kind());
                debug!(self.logger, "Search failed: {}", e; "root" => %root);
                Err(e)
            }
        }
    }

    /// 探索用のメトリクスを返す.
    pub fn metrics(&self) -> &FinderMetrics {
        &self.metrics
    }

    fn search(&self, root: &Block, desired_mask: Mask, used: &[Block]) -> Result<Block> {
        track!(validate_used_blocks(root, used))?;

        // 探索木のノードは常にホスト部がゼロのアドレスを持つので、比較対象もそれに揃える
        let root = &root.to_network();
        let used = used.iter().map(Block::to_network).collect::<Vec<_>>();
        let used = &used[..];

        track_assert!(
            !root.mask().is_smaller_than(desired_mask),
            ErrorKind::NoAvailableBlock,
            "Desired mask {} is larger than {}",
            desired_mask,
            root
        );
        if root.mask() == desired_mask {
            track_assert!(
                used.is_empty(),
                ErrorKind::NoAvailableBlock,
                "{} is partially used",
                root
            );
            return Ok(*root);
        }

        // 左の子を後に積むことで、常にアドレスの小さい方から取り出されるようにする
        let mut stack = vec![*root];
        let mut visited = 0;
        while let Some(node) = stack.pop() {
            visited += 1;
            self.metrics.visited_nodes.increment();
            track_assert!(
                visited <= self.max_visited_nodes,
                ErrorKind::SearchBudgetExceeded,
                "max_visited_nodes={}, root={}, desired_mask={}",
                self.max_visited_nodes,
                root,
                desired_mask
            );

            if node.mask() == desired_mask {
                if matches_existing(&node, used) || contains_existing(&node, used) {
                    trace!(self.logger, "Rejected: {}", node);
                    continue;
                }
                return Ok(node);
            }
            if matches_existing(&node, used) {
                self.metrics.pruned_nodes.increment();
                trace!(self.logger, "Pruned: {}", node);
                continue;
            }

            let (left, right) = track!(node.split())?;
            stack.push(right);
            stack.push(left);
        }
        track_panic!(
            ErrorKind::NoAvailableBlock,
            "No available {} block in {} (visited={})",
            desired_mask,
            root,
            visited
        )
    }
}
impl Default for BlockFinder {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_used_blocks(root: &Block, used: &[Block]) -> Result<()> {
    if let Some(u) = used.iter().find(|u| !root.contains(u)) {
        let e = ErrorKind::InvalidInputRanges.cause(OutOfRootBlock::new(*u, *root));
        return Err(track!(Error::from(e)));
    }
    Ok(())
}
