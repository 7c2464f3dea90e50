use std::fmt;

use crate::{ErrorKind, Result};

/// ネットワークマスク.
///
/// プレフィックス長(`ones`)と、そのマスクが想定しているアドレスの全体幅(`bits`)の組.
///
/// 全体幅は、マスクの宣言上の値であり、実際のアドレスの保持幅との整合性は検証されない.
/// (例えば、128bit幅で保持されたIPv4射影アドレスに`/16`(32bit幅)のマスクを組み合わせても良い)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mask {
    ones: u8,
    bits: u8,
}
impl Mask {
    /// 指定されたプレフィックス長と全体幅を持つマスクを生成する.
    ///
    /// # Errors
    ///
    /// 以下の場合には、種類が`ErrorKind::InvalidInput`のエラーが返される:
    ///
    /// - `bits`が`32`でも`128`でもない
    /// - `ones`が`bits`を超えている
    ///
    /// # Examples
    ///
    /// ```
    /// use cola::ErrorKind;
    /// use cola::address::Mask;
    ///
    /// assert_eq!(Mask::new(24, 32).ok().map(|m| m.ones()), Some(24));
    /// assert_eq!(Mask::new(33, 32).err().map(|e| *e.kind()), Some(ErrorKind::InvalidInput));
    /// assert_eq!(Mask::new(8, 64).err().map(|e| *e.kind()), Some(ErrorKind::InvalidInput));
    /// ```
    #[allow(clippy::new_ret_no_self)]
    pub fn new(ones: u8, bits: u8) -> Result<Self> {
        track_assert!(
            bits == 32 || bits == 128,
            ErrorKind::InvalidInput,
            "Unsupported address width: {}",
            bits
        );
        track_assert!(ones <= bits, ErrorKind::InvalidInput; ones, bits);
        Ok(Mask { ones, bits })
    }

    /// 32bit幅のマスクを生成する.
    pub fn ipv4(ones: u8) -> Result<Self> {
        track!(Self::new(ones, 32))
    }

    /// 128bit幅のマスクを生成する.
    pub fn ipv6(ones: u8) -> Result<Self> {
        track!(Self::new(ones, 128))
    }

    /// プレフィックス長を返す.
    pub fn ones(self) -> u8 {
        self.ones
    }

    /// マスクの全体幅を返す.
    pub fn bits(self) -> u8 {
        self.bits
    }

    /// ホスト部のビット数(`bits - ones`)を返す.
    pub fn host_bits(self) -> u8 {
        self.bits - self.ones
    }

    /// これ以上分割できないマスクかどうかを判定する.
    pub fn is_exhausted(self) -> bool {
        self.ones == self.bits
    }

    /// `self`が`other`よりも小さい(より狭い範囲を表す)マスクかどうかを判定する.
    ///
    /// # Examples
    ///
    /// ```
    /// use cola::address::Mask;
    ///
    /// let m16 = Mask::ipv4(16).unwrap();
    /// let m24 = Mask::ipv4(24).unwrap();
    /// assert!(m24.is_smaller_than(m16));
    /// assert!(!m16.is_smaller_than(m24));
    /// ```
    pub fn is_smaller_than(self, other: Mask) -> bool {
        super::is_smaller_mask(self, other)
    }

    /// プレフィックス長を一つ伸ばしたマスクを返す.
    ///
    /// 既に全体幅に達している場合には`None`が返される.
    pub(crate) fn narrowed(self) -> Option<Self> {
        if self.is_exhausted() {
            None
        } else {
            Some(Mask {
                ones: self.ones + 1,
                bits: self.bits,
            })
        }
    }
}
impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "/{}", self.ones)
    }
}
