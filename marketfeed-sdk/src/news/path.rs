use crate::shared::rest::base::RestPath;

#[derive(Clone)]
pub(super) enum NewsRestPath {
    LatestNews,
}

impl RestPath for NewsRestPath {
    fn to_path_string(self) -> String {
        match self {
            NewsRestPath::LatestNews => "/api/1/news".into(),
        }
    }
}
