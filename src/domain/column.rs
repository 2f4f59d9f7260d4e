//! Typed column keys for [`BarTable`](crate::domain::table::BarTable).
//!
//! Every column a table can hold is a variant of [`Column`]; the `Display`
//! form is the column label used in CSV headers and error messages:
//!
//! - base fields: `open`, `high`, `low`, `close`, `volume`
//! - RSI copies: `rsi-buy`, `rsi-sell`
//! - Bollinger bands: `bb_{lower,middle,upper}band_{1..4}sd`

use std::fmt;
use std::str::FromStr;

/// Bollinger band width in standard deviations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BandWidth {
    One,
    Two,
    Three,
    Four,
}

impl BandWidth {
    pub const ALL: [BandWidth; 4] = [
        BandWidth::One,
        BandWidth::Two,
        BandWidth::Three,
        BandWidth::Four,
    ];

    pub fn stds(self) -> u32 {
        match self {
            BandWidth::One => 1,
            BandWidth::Two => 2,
            BandWidth::Three => 3,
            BandWidth::Four => 4,
        }
    }

    /// Multiplier in the x100 fixed-point form used by `IndicatorType::Bollinger`.
    pub fn stddev_mult_x100(self) -> u32 {
        self.stds() * 100
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BandField {
    Lower,
    Middle,
    Upper,
}

impl BandField {
    pub const ALL: [BandField; 3] = [BandField::Lower, BandField::Middle, BandField::Upper];

    fn label(self) -> &'static str {
        match self {
            BandField::Lower => "lower",
            BandField::Middle => "middle",
            BandField::Upper => "upper",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Open,
    High,
    Low,
    Close,
    Volume,
    RsiBuy,
    RsiSell,
    Band { width: BandWidth, field: BandField },
}

impl Column {
    pub const BASE: [Column; 5] = [
        Column::Open,
        Column::High,
        Column::Low,
        Column::Close,
        Column::Volume,
    ];

    pub fn band(width: BandWidth, field: BandField) -> Self {
        Column::Band { width, field }
    }

    /// Columns added by the annotator, in output order.
    pub fn indicator_columns() -> Vec<Column> {
        let mut columns = vec![Column::RsiBuy, Column::RsiSell];
        for width in BandWidth::ALL {
            for field in BandField::ALL {
                columns.push(Column::band(width, field));
            }
        }
        columns
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Open => write!(f, "open"),
            Column::High => write!(f, "high"),
            Column::Low => write!(f, "low"),
            Column::Close => write!(f, "close"),
            Column::Volume => write!(f, "volume"),
            Column::RsiBuy => write!(f, "rsi-buy"),
            Column::RsiSell => write!(f, "rsi-sell"),
            Column::Band { width, field } => {
                write!(f, "bb_{}band_{}sd", field.label(), width.stds())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown column: {0}")]
pub struct UnknownColumn(pub String);

impl FromStr for Column {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Column::BASE
            .into_iter()
            .chain(Column::indicator_columns())
            .find(|c| c.to_string() == name)
            .ok_or(UnknownColumn(name))
    }
}

/// Which signal column a rule writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Buy,
    Sell,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalKind::Buy => write!(f, "buy"),
            SignalKind::Sell => write!(f, "sell"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_column_labels() {
        assert_eq!(
            Column::band(BandWidth::One, BandField::Lower).to_string(),
            "bb_lowerband_1sd"
        );
        assert_eq!(
            Column::band(BandWidth::Three, BandField::Middle).to_string(),
            "bb_middleband_3sd"
        );
        assert_eq!(
            Column::band(BandWidth::Four, BandField::Upper).to_string(),
            "bb_upperband_4sd"
        );
    }

    #[test]
    fn indicator_columns_are_rsi_then_bands() {
        let columns = Column::indicator_columns();
        assert_eq!(columns.len(), 2 + 4 * 3);
        assert_eq!(columns[0], Column::RsiBuy);
        assert_eq!(columns[1], Column::RsiSell);
        assert_eq!(columns[2], Column::band(BandWidth::One, BandField::Lower));
        assert_eq!(columns[13], Column::band(BandWidth::Four, BandField::Upper));
    }

    #[test]
    fn parse_round_trips_every_label() {
        let all = Column::BASE.into_iter().chain(Column::indicator_columns());
        for column in all {
            assert_eq!(column.to_string().parse::<Column>(), Ok(column));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(" Close ".parse::<Column>(), Ok(Column::Close));
        assert_eq!("VOLUME".parse::<Column>(), Ok(Column::Volume));
    }

    #[test]
    fn parse_unknown_column() {
        assert_eq!(
            "adj_close".parse::<Column>(),
            Err(UnknownColumn("adj_close".into()))
        );
    }

    #[test]
    fn band_width_multipliers() {
        let mults: Vec<u32> = BandWidth::ALL.iter().map(|w| w.stddev_mult_x100()).collect();
        assert_eq!(mults, vec![100, 200, 300, 400]);
    }

    #[test]
    fn signal_kind_labels() {
        assert_eq!(SignalKind::Buy.to_string(), "buy");
        assert_eq!(SignalKind::Sell.to_string(), "sell");
    }
}
