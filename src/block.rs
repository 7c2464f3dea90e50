//! CIDRブロック関連の構成要素.
//!
//! ブロック同士の関係を判定するための演算を提供する:
//!
//! - 等価判定 ([`blocks_equal`])
//! - 包含判定 ([`Block::contains`])
//! - 二分割 ([`Block::split`])
//!
//! 同じアドレスファミリーに属する二つのブロックは「互いに素」「一方が他方を真に包含」「等しい」の
//! いずれかの関係になり、部分的に重なり合うことはない.
//! 探索時の枝刈りはこの性質を前提としている.
//!
//! [`blocks_equal`]: ./fn.blocks_equal.html
//! [`Block::contains`]: ./struct.Block.html#method.contains
//! [`Block::split`]: ./struct.Block.html#method.split
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use crate::address::{self, Address, Mask, CANONICAL_BITS};
use crate::{Error, ErrorKind, Result};

/// CIDRブロック.
///
/// アドレスとマスクの組で、両端を含むアドレス範囲`[first, last]`を表現する.
///
/// 範囲の計算は、128bit幅に正規化したアドレス空間上で行われる.
///
/// # Examples
///
/// ```
/// use cola::block::Block;
///
/// let parent: Block = "10.0.0.0/16".parse().unwrap();
/// let child: Block = "10.0.17.0/24".parse().unwrap();
/// assert!(parent.contains(&child));
/// assert!(!child.contains(&parent));
///
/// let (left, right) = parent.split().unwrap();
/// assert_eq!(left.to_string(), "10.0.0.0/17");
/// assert_eq!(right.to_string(), "10.0.128.0/17");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    address: Address,
    mask: Mask,
}
impl Block {
    /// アドレスとマスクから`Block`インスタンスを生成する.
    ///
    /// アドレスのホスト部はそのまま保持される(ゼロクリアは行われない).
    ///
    /// # Errors
    ///
    /// 32bit幅で保持されたアドレスに、128bit幅のマスクが指定された場合には、
    /// 種類が`ErrorKind::InvalidInput`のエラーが返される.
    #[allow(clippy::new_ret_no_self)]
    pub fn new(address: Address, mask: Mask) -> Result<Self> {
        track_assert!(
            address.stored_bits() >= mask.bits(),
            ErrorKind::InvalidInput,
            "Mask {} (width={}) is too wide for {}",
            mask,
            mask.bits(),
            address
        );
        Ok(Block { address, mask })
    }

    /// ブロックのアドレスを返す.
    pub fn address(&self) -> Address {
        self.address
    }

    /// ブロックのマスクを返す.
    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// ブロックの先頭アドレス(正規化済み)を返す.
    pub fn first(&self) -> u128 {
        self.address.canonical() & !self.host_mask()
    }

    /// ブロックの末尾アドレス(正規化済み)を返す.
    ///
    /// 末尾アドレス自体も範囲に含まれる.
    pub fn last(&self) -> u128 {
        self.first() | self.host_mask()
    }

    /// ホスト部をゼロクリアしたアドレスを返す.
    ///
    /// 返り値の保持幅は`self.address()`と同じ.
    pub fn network(&self) -> Address {
        self.address.with_canonical(self.first())
    }

    /// ホスト部をゼロクリアしたブロックを返す.
    ///
    /// マスクはそのまま引き継がれる.
    pub fn to_network(&self) -> Block {
        Block {
            address: self.network(),
            mask: self.mask,
        }
    }

    /// `child`が`self`の範囲内に収まっているかどうかを判定する.
    ///
    /// 両端を含む比較を行うため、同じブロック同士では常に`true`となる.
    pub fn contains(&self, child: &Block) -> bool {
        self.first() <= child.first() && child.last() <= self.last()
    }

    /// プレフィックス長を一つ伸ばして、ブロックを二分割する.
    ///
    /// 返り値の第一要素は新たに有効になったビットが`0`のブロック(アドレスが小さい方)で、
    /// 第二要素は`1`のブロック.
    /// 二つを合わせると、元のブロックの範囲と一致する.
    ///
    /// # Errors
    ///
    /// プレフィックス長が既にマスクの全体幅に達している場合には、
    /// 種類が`ErrorKind::MaskExhausted`のエラーが返される.
    pub fn split(&self) -> Result<(Block, Block)> {
        let mask = track_assert_some!(
            self.mask.narrowed(),
            ErrorKind::MaskExhausted,
            "block={}",
            self
        );
        let first = self.first();
        let bit = 1u128 << mask.host_bits();
        let left = Block {
            address: self.address.with_canonical(first),
            mask,
        };
        let right = Block {
            address: self.address.with_canonical(first | bit),
            mask,
        };
        Ok((left, right))
    }

    fn host_mask(&self) -> u128 {
        let host_bits = self.mask.host_bits();
        if host_bits >= CANONICAL_BITS {
            u128::max_value()
        } else {
            (1u128 << host_bits) - 1
        }
    }
}
impl FromStr for Block {
    type Err = Error;

    /// `"10.0.0.0/16"`や`"fd00::/8"`のようなCIDR表記の文字列から`Block`を生成する.
    ///
    /// マスクの全体幅はアドレスの種類から決定される.
    /// 生成されたブロックのアドレスは、ホスト部がゼロクリアされたものとなる.
    ///
    /// # Errors
    ///
    /// 文字列がCIDR表記として解釈できない場合には、種類が`ErrorKind::InvalidInput`のエラーが返される.
    ///
    /// # Examples
    ///
    /// ```
    /// use cola::ErrorKind;
    /// use cola::block::Block;
    ///
    /// let block: Block = "10.0.196.0/18".parse().unwrap();
    /// assert_eq!(block.to_string(), "10.0.192.0/18");
    ///
    /// assert_eq!("10.0.0.0".parse::<Block>().err().map(|e| *e.kind()),
    ///            Some(ErrorKind::InvalidInput));
    /// assert_eq!("10.0.0.0/33".parse::<Block>().err().map(|e| *e.kind()),
    ///            Some(ErrorKind::InvalidInput));
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        let mut tokens = s.splitn(2, '/');
        let address = tokens.next().unwrap_or("");
        let ones = track_assert_some!(tokens.next(), ErrorKind::InvalidInput, "input={:?}", s);

        let address: Address = track!(address.parse())?;
        let ones = track!(ones.parse::<u8>().map_err(Error::from), "input={:?}", s)?;
        let mask = match address.as_ip_addr() {
            IpAddr::V4(_) => track!(Mask::ipv4(ones))?,
            IpAddr::V6(_) => track!(Mask::ipv6(ones))?,
        };
        let block = track!(Block::new(address, mask))?;
        Ok(block.to_network())
    }
}
impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, r#"Block("{}")"#, self)
    }
}
impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.address, self.mask)
    }
}

/// `x`と`y`が等しいブロックかどうかを判定する.
///
/// アドレスは正規化した上で、マスクはそのまま比較される.
pub fn blocks_equal(x: &Block, y: &Block) -> bool {
    address::addresses_equal(x.address, y.address) && address::masks_equal(x.mask, y.mask)
}
