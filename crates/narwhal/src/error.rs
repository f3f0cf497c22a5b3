use crate::model::CellId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("hierarchy has no cell {cell:?}")]
    UnknownCell { cell: CellId },
    #[error("cell {cell:?} is not a vertex")]
    NotAVertex { cell: CellId },
    #[error("cell {cell:?} is missing from rank {rank}")]
    CellNotInRank { cell: CellId, rank: usize },
    #[error("edge chain must descend through the ranks (source rank {source_rank}, target rank {target_rank})")]
    InvalidChain {
        source_rank: usize,
        target_rank: usize,
    },
    #[error("rank {rank} does not exist")]
    UnknownRank { rank: usize },
    #[error("rank {rank} has no band yet; cell locations must be set before edges are routed")]
    MissingRankBand { rank: usize },
    #[error("new order for rank {rank} is not a permutation of its cells")]
    InvalidRankOrder { rank: usize },
    #[error("option `{name}` must be a finite, non-negative number (got {value})")]
    InvalidOption { name: &'static str, value: f64 },
    #[error("failed to parse layout options: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
