//! Currency-pair registry for the LTC/XBT/USD triangle.

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::FetchError;

/// A tracked currency pair.
///
/// Variant order is the registry order: it fixes which quote feeds which
/// calculator argument, so do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum Pair {
    /// Litecoin priced in US dollars.
    #[strum(serialize = "LTCUSD")]
    LtcUsd,
    /// Litecoin priced in bitcoin.
    #[strum(serialize = "LTCXBT")]
    LtcXbt,
    /// Bitcoin priced in US dollars.
    #[strum(serialize = "XBTUSD")]
    XbtUsd,
}

impl Pair {
    /// Kraken's identifier for this pair, as used in Depth queries and
    /// as the key of the `result` object.
    pub const fn exchange_id(&self) -> &'static str {
        match self {
            Pair::LtcUsd => "XLTCZUSD",
            Pair::LtcXbt => "XLTCXXBT",
            Pair::XbtUsd => "XXBTZUSD",
        }
    }

    /// Logical symbol, e.g. `LTCUSD`.
    pub fn symbol(&self) -> String {
        self.to_string()
    }

    /// Resolve a logical symbol against the registry.
    pub fn from_symbol(symbol: &str) -> Result<Self, FetchError> {
        symbol
            .parse()
            .map_err(|_| FetchError::UnknownPair(symbol.to_string()))
    }

    /// All tracked pairs in registry order.
    pub fn registry() -> impl Iterator<Item = Pair> {
        Pair::iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_order_is_fixed() {
        let pairs: Vec<Pair> = Pair::registry().collect();
        assert_eq!(pairs, vec![Pair::LtcUsd, Pair::LtcXbt, Pair::XbtUsd]);
    }

    #[test]
    fn symbols_map_to_exchange_ids() {
        let mapping: Vec<(String, &str)> = Pair::registry()
            .map(|p| (p.symbol(), p.exchange_id()))
            .collect();
        assert_eq!(
            mapping,
            vec![
                ("LTCUSD".to_string(), "XLTCZUSD"),
                ("LTCXBT".to_string(), "XLTCXXBT"),
                ("XBTUSD".to_string(), "XXBTZUSD"),
            ]
        );
    }

    #[test]
    fn from_symbol_resolves_known_pairs() {
        assert_eq!(Pair::from_symbol("XBTUSD").unwrap(), Pair::XbtUsd);
    }

    #[test]
    fn from_symbol_rejects_unknown_pairs() {
        let err = Pair::from_symbol("DOGEUSD").unwrap_err();
        assert!(matches!(err, FetchError::UnknownPair(ref s) if s == "DOGEUSD"));
        assert_eq!(err.to_string(), "unknown pair: DOGEUSD");
    }
}
