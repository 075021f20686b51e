use rivulet_core::{Address, Token};

/// Fixture token addresses, stable across the test suite.
pub const USDCX: &str = "0x00000000000000000000000000000000000000aa";
pub const DAIX: &str = "0x00000000000000000000000000000000000000bb";

pub fn by_address(address: &Address) -> Option<Token> {
    match address.as_str() {
        USDCX => Some(build(USDCX, "USDCx", 18)),
        DAIX => Some(build(DAIX, "DAIx", 18)),
        _ => None,
    }
}

pub fn build(address: &str, symbol: &str, decimals: u8) -> Token {
    Token {
        address: address.parse().unwrap(),
        symbol: Some(symbol.to_string()),
        decimals,
    }
}
