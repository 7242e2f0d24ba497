use crate::shared::rest::base::RestPath;

#[derive(Clone)]
pub(super) enum CryptoRestPath {
    QuotesLatest,
}

impl RestPath for CryptoRestPath {
    fn to_path_string(self) -> String {
        match self {
            CryptoRestPath::QuotesLatest => "/v1/cryptocurrency/quotes/latest".into(),
        }
    }
}
