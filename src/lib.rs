//! CIDR Optimization Lookup & Assignment.
//!
//! `cola`は、親となるCIDRブロックの中から、指定サイズの未使用サブブロックを選び出すためのライブラリ.
//!
//! # 特徴
//!
//! - 使用済みブロックの一覧は呼び出し毎に利用者が渡す
//!   - アロケータとしての状態は持たず、永続化も行わない
//!   - 一つの探索は同期的かつCPUのみで完結する
//! - 条件を満たすブロックが複数ある場合には、常にアドレスが最も小さいものが選ばれる
//! - IPv4(32bit)とIPv6(128bit)の両方のアドレスを扱える
//!   - アドレスの比較は128bit幅に正規化した上で行われる
//! - 最悪時の探索量は指数的に増加し得るため、訪問ノード数に上限を設けている
//!
//! # モジュールの依存関係
//!
//! ```text
//! finder => block => address
//! ```
//!
//! - [finder]モジュール:
//!   - 主に[BlockFinder]構造体と[find_available]関数を提供
//!   - `cola`の利用者が直接触るのはこれら
//! - [block]モジュール:
//!   - 主に[Block]構造体を提供
//!   - ブロックの等価判定・包含判定・二分割を担当する
//! - [address]モジュール:
//!   - 主に[Address]構造体と[Mask]構造体を提供
//!
//! # Examples
//!
//! ```
//! use cola::address::Mask;
//! use cola::block::Block;
//! use cola::finder::find_available;
//!
//! let root: Block = "10.0.0.0/16".parse().unwrap();
//! let used: Vec<Block> = ["10.0.0.0/18", "10.0.64.0/20", "10.0.80.0/24"]
//!     .iter()
//!     .map(|s| s.parse().unwrap())
//!     .collect();
//!
//! let found = find_available(&root, Mask::ipv4(21).unwrap(), &used).unwrap();
//! assert_eq!(found.to_string(), "10.0.88.0/21");
//! ```
//!
//! [finder]: ./finder/index.html
//! [BlockFinder]: ./finder/struct.BlockFinder.html
//! [find_available]: ./finder/fn.find_available.html
//! [block]: ./block/index.html
//! [Block]: ./block/struct.Block.html
//! [address]: ./address/index.html
//! [Address]: ./address/struct.Address.html
//! [Mask]: ./address/struct.Mask.html
#![warn(missing_docs)]
extern crate prometrics;
#[macro_use]
extern crate trackable;
#[macro_use]
extern crate slog;

pub use crate::error::{Error, ErrorKind, OutOfRootBlock};

pub mod address;
pub mod block;
pub mod finder;
pub mod metrics;

mod error;

/// crate固有の`Result`型.
pub type Result<T> = std::result::Result<T, Error>;
