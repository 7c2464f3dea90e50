//! アドレスおよびマスク関連の構成要素.
//!
//! このモジュールが提供するのは、ブロック同士の比較の土台となる以下の基本演算のみ:
//!
//! - アドレス同士の等価判定 (表現幅の違いは正規化して吸収する)
//! - マスク同士の等価判定
//! - マスクの大小判定
use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::{Error, Result};

pub use self::mask::Mask;

mod mask;

/// 正規化後のアドレスのビット幅.
pub const CANONICAL_BITS: u8 = 128;

/// ネットワークアドレス.
///
/// 内部的には32bit(IPv4)ないし128bit(IPv6)のいずれかの幅で値を保持している.
///
/// 等価判定およびハッシュ値の計算は、常に128bit幅に正規化された値を用いて行われる.
/// 32bitのアドレスは、IPv4射影アドレス(`::ffff:a.b.c.d`)に変換された上で比較される.
///
/// # Examples
///
/// ```
/// use std::net::Ipv4Addr;
/// use cola::address::Address;
///
/// let v4 = Address::from(Ipv4Addr::new(1, 2, 3, 4));
/// let v6 = Address::from(Ipv4Addr::new(1, 2, 3, 4).to_ipv6_mapped());
/// assert_eq!(v4, v6);
/// assert_ne!(v4, Address::from(Ipv4Addr::new(1, 2, 3, 5)));
/// ```
#[derive(Clone, Copy)]
pub struct Address(IpAddr);
impl Address {
    /// 保持しているアドレスの幅(ビット単位)を返す.
    pub fn stored_bits(self) -> u8 {
        match self.0 {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        }
    }

    /// 128bit幅に正規化された値を返す.
    pub fn canonical(self) -> u128 {
        match self.0 {
            IpAddr::V4(a) => u128::from(a.to_ipv6_mapped()),
            IpAddr::V6(a) => u128::from(a),
        }
    }

    /// 内部表現の`IpAddr`を返す.
    pub fn as_ip_addr(self) -> IpAddr {
        self.0
    }

    /// 正規化された値`canonical`を、`self`と同じ幅の表現に戻したアドレスを返す.
    ///
    /// 32bit幅の場合には、下位32bitのみが使用される.
    pub(crate) fn with_canonical(self, canonical: u128) -> Self {
        match self.0 {
            IpAddr::V4(_) => Address(IpAddr::V4(Ipv4Addr::from(canonical as u32))),
            IpAddr::V6(_) => Address(IpAddr::V6(Ipv6Addr::from(canonical))),
        }
    }
}
impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        addresses_equal(*self, *other)
    }
}
impl Eq for Address {}
impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}
impl From<IpAddr> for Address {
    fn from(f: IpAddr) -> Self {
        Address(f)
    }
}
impl From<Ipv4Addr> for Address {
    fn from(f: Ipv4Addr) -> Self {
        Address(IpAddr::V4(f))
    }
}
impl From<Ipv6Addr> for Address {
    fn from(f: Ipv6Addr) -> Self {
        Address(IpAddr::V6(f))
    }
}
impl FromStr for Address {
    type Err = Error;

    /// `"10.0.0.1"`ないし`"fd00::1"`形式の文字列からアドレスを生成する.
    ///
    /// # Errors
    ///
    /// 文字列がアドレスとして解釈できない場合には、種類が`ErrorKind::InvalidInput`のエラーが返される.
    fn from_str(s: &str) -> Result<Self> {
        let addr = track!(s.parse::<IpAddr>().map_err(Error::from), "input={:?}", s)?;
        Ok(Address(addr))
    }
}
impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, r#"Address("{}")"#, self.0)
    }
}
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `a`と`b`が同じアドレスを表しているかどうかを判定する.
///
/// 比較は128bit幅に正規化した値で行われるため、保持している幅が異なっていても良い.
pub fn addresses_equal(a: Address, b: Address) -> bool {
    a.canonical() == b.canonical()
}

/// `m1`と`m2`が等しいかどうかを判定する.
///
/// プレフィックス長と全体幅の両方が一致している場合に`true`となる.
/// 全体幅はそのまま比較され、正規化は行われない.
pub fn masks_equal(m1: Mask, m2: Mask) -> bool {
    m1.ones() == m2.ones() && m1.bits() == m2.bits()
}

/// `m1`が`m2`よりも小さい(より狭い範囲を表す)マスクかどうかを判定する.
pub fn is_smaller_mask(m1: Mask, m2: Mask) -> bool {
    m1.ones() > m2.ones()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::net::{Ipv4Addr, Ipv6Addr};
    use trackable::result::TestResult;

    use super::*;
    use crate::ErrorKind;

    #[test]
    fn normalized_equality_works() {
        let v4 = Address::from(Ipv4Addr::new(1, 2, 3, 4));
        let mapped = Address::from(Ipv4Addr::new(1, 2, 3, 4).to_ipv6_mapped());
        assert!(addresses_equal(v4, mapped));
        assert!(addresses_equal(mapped, v4));
        assert_eq!(v4.stored_bits(), 32);
        assert_eq!(mapped.stored_bits(), 128);

        let other = Address::from(Ipv4Addr::new(1, 2, 3, 5));
        assert!(!addresses_equal(v4, other));

        // IPv4互換アドレス(`::a.b.c.d`)は射影アドレスとは別物
        let compat = Address::from(Ipv4Addr::new(1, 2, 3, 4).to_ipv6_compatible());
        assert!(!addresses_equal(v4, compat));

        let mut set = HashSet::new();
        set.insert(v4);
        assert!(set.contains(&mapped));
    }

    #[test]
    fn with_canonical_keeps_representation() {
        let v4 = Address::from(Ipv4Addr::new(10, 0, 0, 0));
        let next = v4.with_canonical(v4.canonical() | 0x100);
        assert_eq!(next.as_ip_addr(), IpAddr::V4(Ipv4Addr::new(10, 0, 1, 0)));

        let v6 = Address::from(Ipv6Addr::new(0xfd00, 0, 0, 0, 0, 0, 0, 0));
        let next = v6.with_canonical(v6.canonical() | 1);
        assert_eq!(
            next.as_ip_addr(),
            IpAddr::V6(Ipv6Addr::new(0xfd00, 0, 0, 0, 0, 0, 0, 1))
        );
    }

    #[test]
    fn mask_comparison_works() -> TestResult {
        let m16 = track!(Mask::ipv4(16))?;
        let m24 = track!(Mask::ipv4(24))?;
        assert!(masks_equal(m16, track!(Mask::new(16, 32))?));
        assert!(!masks_equal(m16, m24));
        assert!(!masks_equal(m16, track!(Mask::ipv6(16))?));

        assert!(is_smaller_mask(m24, m16));
        assert!(!is_smaller_mask(m16, m24));
        assert!(!is_smaller_mask(m16, m16));

        // 全体幅は大小判定に影響しない
        assert!(!is_smaller_mask(m16, track!(Mask::ipv6(16))?));
        Ok(())
    }

    #[test]
    fn parse_works() -> TestResult {
        let a: Address = track!("10.0.0.1".parse())?;
        assert_eq!(a.to_string(), "10.0.0.1");

        let a: Address = track!("fd00::1".parse())?;
        assert_eq!(a.to_string(), "fd00::1");

        assert_eq!(
            "10.0.0".parse::<Address>().err().map(|e| *e.kind()),
            Some(ErrorKind::InvalidInput)
        );
        Ok(())
    }
}
