use std::fmt;
use trackable::error::ErrorKindExt;

use crate::block::Block;

/// crate固有のエラー型.
#[derive(Debug, Clone, TrackableError)]
pub struct Error(trackable::error::TrackableError<ErrorKind>);
impl From<std::net::AddrParseError> for Error {
    fn from(e: std::net::AddrParseError) -> Self {
        ErrorKind::InvalidInput.cause(e).into()
    }
}
impl From<std::num::ParseIntError> for Error {
    fn from(e: std::num::ParseIntError) -> Self {
        ErrorKind::InvalidInput.cause(e).into()
    }
}

/// 発生し得るエラーの種別.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 使用済みブロックの中に、ルートブロックに含まれないものが存在する.
    ///
    /// 探索開始前の検証段階で検出される.
    /// 最初に見つかった違反ブロックは[`OutOfRootBlock`]として原因に保持されている.
    ///
    /// # 典型的な対応策
    ///
    /// - 利用者側で使用済みブロックの一覧を修正する
    ///
    /// [`OutOfRootBlock`]: ./struct.OutOfRootBlock.html
    InvalidInputRanges,

    /// 要求されたサイズの空きブロックが存在しない.
    ///
    /// 探索木を全て辿り終えた場合の他に、
    /// 要求サイズがルートブロックよりも大きい場合にもこのエラーが返される.
    ///
    /// # 典型的な対応策
    ///
    /// - 要求サイズを小さくする
    /// - より大きなルートブロックを使う
    NoAvailableBlock,

    /// これ以上分割できないブロックを分割しようとした.
    ///
    /// 通常の入力では発生しないが、ルートブロックと要求マスクの幅が食い違っている場合等に返される.
    ///
    /// # 典型的な対応策
    ///
    /// - 要求マスクの幅(32bit or 128bit)をルートブロックに揃える
    MaskExhausted,

    /// 探索で訪問したノード数が上限を超えた.
    ///
    /// # 典型的な対応策
    ///
    /// - `FinderBuilder::max_visited_nodes`で上限を引き上げる
    /// - ルートブロックと要求サイズの差を小さくする
    SearchBudgetExceeded,

    /// 入力が不正.
    ///
    /// E.g., CIDR表記の文字列が不正、マスクの長さが範囲外
    ///
    /// # 典型的な対応策
    ///
    /// - 利用者側のプログラムを修正して入力を正しくする
    InvalidInput,
}
impl trackable::error::ErrorKind for ErrorKind {}

/// ルートブロックに含まれていない使用済みブロック.
///
/// `ErrorKind::InvalidInputRanges`のエラーの原因として保持される.
///
/// # Examples
///
/// ```
/// use cola::{ErrorKind, OutOfRootBlock};
/// use cola::address::Mask;
/// use cola::block::Block;
/// use cola::finder::find_available;
///
/// let root: Block = "10.0.0.0/16".parse().unwrap();
/// let used: Vec<Block> = vec!["10.1.0.0/24".parse().unwrap()];
///
/// let e = find_available(&root, Mask::ipv4(24).unwrap(), &used).err().unwrap();
/// assert_eq!(*e.kind(), ErrorKind::InvalidInputRanges);
/// assert_eq!(e.concrete_cause::<OutOfRootBlock>().map(|c| c.block()), Some(&used[0]));
/// ```
#[derive(Debug, Clone)]
pub struct OutOfRootBlock {
    block: Block,
    root: Block,
}
impl OutOfRootBlock {
    pub(crate) fn new(block: Block, root: Block) -> Self {
        OutOfRootBlock { block, root }
    }

    /// ルートブロックに含まれていなかったブロックを返す.
    pub fn block(&self) -> &Block {
        &self.block
    }

    /// 検証に使われたルートブロックを返す.
    pub fn root(&self) -> &Block {
        &self.root
    }
}
impl fmt::Display for OutOfRootBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} is not contained in {}", self.block, self.root)
    }
}
impl std::error::Error for OutOfRootBlock {}
