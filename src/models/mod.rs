mod catalog;
mod fanout;

pub use catalog::{find_model, ModelInfo, FALLBACK_MODEL, MODEL_CATALOG};
pub use fanout::{
    ExpandedQuery, FanoutDocument, FanoutMode, FanoutRequest, FanoutResult, GenerationDetails,
};
