pub mod artistsplitter;
pub mod billboard;
pub mod corpus_store;
pub mod http_client;
pub mod lyrics;
pub mod retry;
pub mod wiki;

pub use corpus_store::CorpusStore;
