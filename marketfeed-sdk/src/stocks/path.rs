use crate::shared::rest::base::RestPath;

#[derive(Clone)]
pub(super) enum StocksRestPath {
    Quote,
    StockCandle,
}

impl RestPath for StocksRestPath {
    fn to_path_string(self) -> String {
        match self {
            StocksRestPath::Quote => "/api/v1/quote".into(),
            StocksRestPath::StockCandle => "/api/v1/stock/candle".into(),
        }
    }
}
